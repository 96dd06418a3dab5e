//! RPC error types and their wire codes.

use serde_json::{json, Value};
use thiserror::Error;

use crate::envelope::ErrorObject;

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

#[derive(Debug, Error)]
pub enum RpcError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("method not found: {method}")]
    MethodNotFound {
        method: String,
        available: Vec<&'static str>,
    },

    #[error("{0}")]
    InvalidParams(String),

    /// A handler failed after validation. The message is the underlying
    /// failure, unchanged.
    #[error("{0}")]
    Internal(String),

    #[error("server error: {0}")]
    Server(String),
}

impl RpcError {
    pub fn code(&self) -> i64 {
        match self {
            RpcError::Parse(_) => PARSE_ERROR,
            RpcError::InvalidRequest(_) => INVALID_REQUEST,
            RpcError::MethodNotFound { .. } => METHOD_NOT_FOUND,
            RpcError::InvalidParams(_) => INVALID_PARAMS,
            RpcError::Internal(_) | RpcError::Server(_) => INTERNAL_ERROR,
        }
    }

    pub fn details(&self) -> Option<Value> {
        match self {
            RpcError::MethodNotFound { available, .. } => {
                Some(json!({ "availableMethods": available }))
            }
            _ => None,
        }
    }

    pub fn to_error_object(&self) -> ErrorObject {
        ErrorObject {
            code: self.code(),
            message: self.to_string(),
            details: self.details(),
        }
    }
}

impl From<nano_mcp_wallet::WalletError> for RpcError {
    fn from(err: nano_mcp_wallet::WalletError) -> Self {
        if err.is_validation() {
            RpcError::InvalidParams(err.to_string())
        } else {
            RpcError::Internal(err.to_string())
        }
    }
}

impl From<prometheus::Error> for RpcError {
    fn from(err: prometheus::Error) -> Self {
        RpcError::Server(format!("metrics: {err}"))
    }
}
