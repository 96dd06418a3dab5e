//! Engine settings, passed by value into [`crate::Wallet::new`].

use std::str::FromStr;

use nano_mcp_types::RawAmount;
use nano_mcp_work::WorkThresholds;
use serde::{Deserialize, Serialize};

/// Where proof-of-work comes from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkSource {
    /// The node's `work_generate` action.
    #[default]
    Node,
    /// This process's CPUs.
    Local,
}

impl FromStr for WorkSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "node" => Ok(WorkSource::Node),
            "local" => Ok(WorkSource::Local),
            other => Err(format!("unknown work source: {other} (expected node or local)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub thresholds: WorkThresholds,
    /// Maximum pending blocks fetched per receive pass.
    pub pending_count: u64,
    /// Smallest pending amount (raw) worth receiving.
    pub pending_threshold: RawAmount,
    pub work_source: WorkSource,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: WorkThresholds::new(),
            pending_count: 100,
            pending_threshold: RawAmount::from(1),
            work_source: WorkSource::Node,
        }
    }
}
