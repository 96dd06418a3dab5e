//! Values returned to callers by the engines.

use nano_mcp_types::{BlockHash, BlockSubtype, RawAmount};
use serde::Serialize;

/// Outcome of a single mutating operation. Carries either `hash` or `error`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<BlockHash>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TransactionResult {
    pub fn succeeded(hash: BlockHash) -> Self {
        Self {
            success: true,
            hash: Some(hash),
            error: None,
        }
    }

    pub fn failed(error: impl ToString) -> Self {
        Self {
            success: false,
            hash: None,
            error: Some(error.to_string()),
        }
    }
}

/// What `process` produced for one received pending block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReceivedBlock {
    /// Hash of the new open/receive block.
    pub hash: BlockHash,
    pub subtype: BlockSubtype,
    /// Account balance after the block.
    pub balance: RawAmount,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProcessedEntry {
    /// The pending (source) block hash.
    pub hash: BlockHash,
    pub amount: RawAmount,
    pub result: ReceivedBlock,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FailedEntry {
    pub hash: BlockHash,
    /// Unknown when the failure came before the amount was learned.
    pub amount: Option<RawAmount>,
    pub error: String,
}

/// Aggregate of a receive pass. Each pending block lands in exactly one of
/// `processed` or `failed`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiveBatchResult {
    pub success: bool,
    pub received_count: usize,
    pub processed: Vec<ProcessedEntry>,
    pub failed: Vec<FailedEntry>,
    /// Set only when the pass could not start.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ReceiveBatchResult {
    pub fn empty() -> Self {
        Self {
            success: true,
            ..Self::default()
        }
    }

    pub fn aborted(error: impl ToString) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            ..Self::default()
        }
    }
}
