//! Typed views of the node responses the engines consume.

use nano_mcp_types::{Account, BlockHash, RawAmount};
use serde::{Deserialize, Serialize};

/// `account_info` for an opened account.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct AccountInfo {
    pub frontier: BlockHash,
    pub representative: Account,
    pub balance: RawAmount,
    #[serde(default)]
    pub block_count: Option<String>,
}

/// `account_balance`, every field a raw decimal string on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    #[serde(default)]
    pub balance: RawAmount,
    #[serde(default)]
    pub pending: RawAmount,
    #[serde(default)]
    pub receivable: RawAmount,
}

/// One entry of a `pending` listing. Amount and source are present only when
/// the node was asked for them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingEntry {
    pub hash: BlockHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawAmount>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// The detail of one block from `blocks_info`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockInfo {
    pub hash: BlockHash,
    /// Account that owns the block (for a send: the sender).
    pub block_account: Account,
    pub amount: RawAmount,
    pub subtype: Option<String>,
}
