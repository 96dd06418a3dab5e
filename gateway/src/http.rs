//! HTTP transport to the node.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use tracing::debug;

use crate::{check_node_error, Gateway, GatewayConfig, GatewayError};

/// Gateway that POSTs actions to a node over HTTP.
///
/// Wraps `reqwest::Client` with the node's URL and optional API key. Cheap to
/// clone; clones share the connection pool.
#[derive(Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| GatewayError::Transport(format!("failed to create HTTP client: {e}")))?;
        Ok(Self { http, config })
    }

    /// The configured node URL.
    pub fn node_url(&self) -> &str {
        &self.config.node_url
    }
}

#[async_trait]
impl Gateway for HttpGateway {
    async fn call(
        &self,
        action: &str,
        params: serde_json::Value,
    ) -> Result<serde_json::Value, GatewayError> {
        let mut body = match params {
            serde_json::Value::Null => serde_json::Value::Object(Default::default()),
            other => other,
        };
        body.as_object_mut()
            .ok_or_else(|| GatewayError::Transport("params must be a JSON object".into()))?
            .insert("action".to_string(), serde_json::json!(action));

        debug!(action, url = %self.config.node_url, "node rpc call");

        let mut request = self.http.post(&self.config.node_url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.header(AUTHORIZATION, key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GatewayError::Http {
                status: response.status().as_u16(),
            });
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GatewayError::invalid(action, format!("body is not JSON: {e}")))?;

        check_node_error(json)
    }
}
