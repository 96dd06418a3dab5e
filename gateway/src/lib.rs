//! Ledger RPC gateway.
//!
//! The node exposes a single JSON "action" endpoint: every request is a POST
//! of `{"action": ..., ...params}`. [`Gateway`] is that one primitive;
//! [`HttpGateway`] implements it over reqwest, and test doubles implement it
//! in memory. [`NodeClient`] layers typed calls for the actions the engines
//! consume (`account_info`, `account_balance`, `pending`, `blocks_info`,
//! `work_generate`, `process`) on top of any gateway.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod responses;

use async_trait::async_trait;

pub use client::NodeClient;
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpGateway;
pub use responses::{AccountBalance, AccountInfo, BlockInfo, PendingEntry};

/// The single call primitive of the node's RPC API.
///
/// Implementations return the parsed JSON body on success, and fail when the
/// transport fails, the status is not 2xx, or the body carries an `error`.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError>;
}

/// Turn a JSON body that carries an `error` string into a [`GatewayError::Node`].
///
/// Shared by every gateway so that ledger-reported failures surface the same
/// way regardless of transport.
pub fn check_node_error(body: serde_json::Value) -> Result<serde_json::Value, GatewayError> {
    match body.get("error") {
        Some(serde_json::Value::String(message)) => Err(GatewayError::Node(message.clone())),
        Some(other) if !other.is_null() => Err(GatewayError::Node(other.to_string())),
        _ => Ok(body),
    }
}
