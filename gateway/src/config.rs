//! Connection settings for the node.

use serde::{Deserialize, Serialize};

/// Where and how to reach the node's RPC endpoint.
///
/// Passed by value into [`crate::HttpGateway::new`]; gateways built from
/// different configs can be used side by side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Full URL of the RPC endpoint (e.g. `http://127.0.0.1:7076`).
    pub node_url: String,

    /// Sent verbatim as the `Authorization` header when set.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Limit on establishing a connection. Requests themselves are not
    /// bounded: `work_generate` can legitimately run for minutes.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl GatewayConfig {
    pub fn new(node_url: impl Into<String>) -> Self {
        Self {
            node_url: node_url.into(),
            api_key: None,
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}
