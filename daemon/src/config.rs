//! Daemon configuration, loadable from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working setup against a local node on port 7076.

use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use nano_mcp_gateway::GatewayConfig;
use nano_mcp_types::RawAmount;
use nano_mcp_utils::LogFormat;
use nano_mcp_wallet::{EngineConfig, WorkSource};
use nano_mcp_work::{parse_difficulty, WorkThresholds};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

const REDACTED: &str = "<redacted>";

/// Which transport carries the request envelopes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    #[default]
    Http,
    Stdio,
}

impl FromStr for Transport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "http" => Ok(Transport::Http),
            "stdio" => Ok(Transport::Stdio),
            other => Err(format!("unknown transport: {other} (expected http or stdio)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct McpConfig {
    /// RPC endpoint of the node.
    #[serde(default = "default_node_url")]
    pub node_url: String,

    /// Sent as the `Authorization` header on every node call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Connect timeout for the node. Calls are otherwise unbounded.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    #[serde(default)]
    pub transport: Transport,

    /// Bind address for the HTTP transport. Ignored for stdio.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: SocketAddr,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Default filter directive; `RUST_LOG` wins when set.
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Minimum difficulty for open blocks, as hex.
    #[serde(default = "default_open_difficulty")]
    pub open_difficulty: String,

    /// Minimum difficulty for receive and send blocks, as hex.
    #[serde(default = "default_secured_difficulty")]
    pub secured_difficulty: String,

    /// Pending blocks fetched per `receiveAll` pass.
    #[serde(default = "default_pending_count")]
    pub pending_count: u64,

    /// Smallest pending amount (raw) worth receiving.
    #[serde(default = "default_pending_threshold")]
    pub pending_threshold: RawAmount,

    #[serde(default)]
    pub work_source: WorkSource,

    /// Leave out `generateWallet`, `send` and `receiveAll`.
    #[serde(default)]
    pub read_only: bool,
}

fn default_node_url() -> String {
    "http://127.0.0.1:7076".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_listen_addr() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_open_difficulty() -> String {
    "fffffe0000000000".to_string()
}

fn default_secured_difficulty() -> String {
    "fffffff800000000".to_string()
}

fn default_pending_count() -> u64 {
    100
}

fn default_pending_threshold() -> RawAmount {
    RawAmount::from(1)
}

impl Default for McpConfig {
    fn default() -> Self {
        Self {
            node_url: default_node_url(),
            api_key: None,
            connect_timeout_secs: default_connect_timeout_secs(),
            transport: Transport::default(),
            listen_addr: default_listen_addr(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            open_difficulty: default_open_difficulty(),
            secured_difficulty: default_secured_difficulty(),
            pending_count: default_pending_count(),
            pending_threshold: default_pending_threshold(),
            work_source: WorkSource::default(),
            read_only: false,
        }
    }
}

impl McpConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// A copy safe to print: the API key, if any, is masked.
    pub fn redacted(&self) -> Self {
        Self {
            api_key: self.api_key.as_ref().map(|_| REDACTED.to_string()),
            ..self.clone()
        }
    }

    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            node_url: self.node_url.clone(),
            api_key: self.api_key.clone(),
            connect_timeout_secs: self.connect_timeout_secs,
        }
    }

    /// Engine settings, with the hex difficulties parsed.
    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let open = parse_difficulty(&self.open_difficulty).map_err(|e| ConfigError::Invalid {
            field: "open_difficulty",
            reason: e.to_string(),
        })?;
        let secured =
            parse_difficulty(&self.secured_difficulty).map_err(|e| ConfigError::Invalid {
                field: "secured_difficulty",
                reason: e.to_string(),
            })?;
        if self.pending_count == 0 {
            return Err(ConfigError::Invalid {
                field: "pending_count",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(EngineConfig {
            thresholds: WorkThresholds::with_values(open, secured),
            pending_count: self.pending_count,
            pending_threshold: self.pending_threshold.clone(),
            work_source: self.work_source,
        })
    }
}
