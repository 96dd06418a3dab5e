//! Typed wrappers over the node actions the engines consume.

use std::sync::Arc;

use nano_mcp_types::{Account, BlockHash, RawAmount, SignedBlock, WorkNonce};
use serde_json::{json, Value};

use crate::{AccountBalance, AccountInfo, BlockInfo, Gateway, GatewayError, PendingEntry};

/// Typed access to the node's RPC actions.
///
/// Every method is one round-trip through the wrapped [`Gateway`]. Nothing is
/// cached: account state is read fresh on every call.
#[derive(Clone)]
pub struct NodeClient {
    gateway: Arc<dyn Gateway>,
}

impl NodeClient {
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self { gateway }
    }

    /// The underlying gateway.
    pub fn gateway(&self) -> &Arc<dyn Gateway> {
        &self.gateway
    }

    /// Raw `account_info` body, as returned by the node.
    pub async fn account_info_raw(&self, account: &Account) -> Result<Value, GatewayError> {
        self.gateway
            .call(
                "account_info",
                json!({ "account": account, "representative": "true" }),
            )
            .await
    }

    /// Frontier, representative, and balance of an account.
    ///
    /// Returns `Ok(None)` when the node reports the account has never been
    /// opened; every other failure propagates.
    pub async fn account_info(&self, account: &Account) -> Result<Option<AccountInfo>, GatewayError> {
        match self.account_info_raw(account).await {
            Ok(body) => serde_json::from_value(body)
                .map(Some)
                .map_err(|e| GatewayError::invalid("account_info", e.to_string())),
            Err(e) if e.is_account_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Confirmed balance plus pending/receivable totals. Missing fields are zero.
    pub async fn account_balance(&self, account: &Account) -> Result<AccountBalance, GatewayError> {
        let body = self
            .gateway
            .call(
                "account_balance",
                json!({ "account": account, "include_only_confirmed": "true" }),
            )
            .await?;
        serde_json::from_value(body).map_err(|e| GatewayError::invalid("account_balance", e.to_string()))
    }

    /// Confirmed pending blocks for an account at or above `threshold` raw.
    pub async fn pending(
        &self,
        account: &Account,
        count: u64,
        threshold: &RawAmount,
    ) -> Result<Vec<PendingEntry>, GatewayError> {
        let body = self
            .gateway
            .call(
                "pending",
                json!({
                    "account": account,
                    "count": count.to_string(),
                    "threshold": threshold,
                    "source": "true",
                    "include_only_confirmed": "true",
                }),
            )
            .await?;
        parse_pending(body.get("blocks").unwrap_or(&Value::Null))
    }

    /// Detail of a single block via `blocks_info`.
    pub async fn block_info(&self, hash: &BlockHash) -> Result<BlockInfo, GatewayError> {
        const ACTION: &str = "blocks_info";
        let body = self
            .gateway
            .call(
                ACTION,
                json!({ "hashes": [hash], "json_block": "true" }),
            )
            .await?;
        let blocks = body
            .get("blocks")
            .and_then(Value::as_object)
            .ok_or_else(|| GatewayError::invalid(ACTION, "missing blocks"))?;
        let wanted = hash.to_string();
        let entry = blocks
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(&wanted))
            .map(|(_, v)| v)
            .ok_or_else(|| GatewayError::invalid(ACTION, format!("block {wanted} not returned")))?;

        let block_account = entry
            .get("block_account")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::invalid(ACTION, "missing block_account"))
            .and_then(|s| Account::new(s).map_err(|e| GatewayError::invalid(ACTION, e.to_string())))?;
        let amount = entry
            .get("amount")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::invalid(ACTION, "missing amount"))
            .and_then(|s| s.parse::<RawAmount>().map_err(|e| GatewayError::invalid(ACTION, e.to_string())))?;
        let subtype = entry
            .get("subtype")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(BlockInfo {
            hash: *hash,
            block_account,
            amount,
            subtype,
        })
    }

    /// Ask the node for a work nonce over `root` meeting `difficulty`.
    pub async fn work_generate(&self, root: &BlockHash, difficulty: u64) -> Result<WorkNonce, GatewayError> {
        const ACTION: &str = "work_generate";
        let body = self
            .gateway
            .call(
                ACTION,
                json!({ "hash": root, "difficulty": format!("{difficulty:016x}") }),
            )
            .await?;
        match body.get("work").and_then(Value::as_str) {
            Some(work) if !work.is_empty() => work
                .parse()
                .map_err(|e: nano_mcp_types::TypesError| GatewayError::invalid(ACTION, e.to_string())),
            _ => Err(GatewayError::invalid(ACTION, "no work returned")),
        }
    }

    /// Submit a signed block. Returns the hash the node assigned.
    pub async fn process(&self, block: &SignedBlock) -> Result<BlockHash, GatewayError> {
        const ACTION: &str = "process";
        let body = self
            .gateway
            .call(
                ACTION,
                json!({
                    "json_block": "true",
                    "subtype": block.subtype.as_str(),
                    "block": block,
                }),
            )
            .await?;
        body.get("hash")
            .and_then(Value::as_str)
            .ok_or_else(|| GatewayError::invalid(ACTION, "missing hash"))?
            .parse()
            .map_err(|e: nano_mcp_types::TypesError| GatewayError::invalid(ACTION, e.to_string()))
    }
}

/// The node answers `pending` in several shapes depending on the flags and on
/// whether anything is pending: `""`, a list of hashes, a map of hash to
/// amount, or a map of hash to `{amount, source}`.
fn parse_pending(blocks: &Value) -> Result<Vec<PendingEntry>, GatewayError> {
    const ACTION: &str = "pending";
    let hash = |s: &str| {
        s.parse::<BlockHash>()
            .map_err(|e| GatewayError::invalid(ACTION, e.to_string()))
    };
    let amount = |v: Option<&Value>| -> Result<Option<RawAmount>, GatewayError> {
        match v.and_then(Value::as_str) {
            Some(s) => s
                .parse()
                .map(Some)
                .map_err(|e: nano_mcp_types::TypesError| GatewayError::invalid(ACTION, e.to_string())),
            None => Ok(None),
        }
    };

    match blocks {
        Value::Null => Ok(Vec::new()),
        Value::String(s) if s.is_empty() => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                let s = item
                    .as_str()
                    .ok_or_else(|| GatewayError::invalid(ACTION, "hash is not a string"))?;
                Ok(PendingEntry {
                    hash: hash(s)?,
                    amount: None,
                    source: None,
                })
            })
            .collect(),
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| {
                let (amount, source) = match value {
                    Value::String(_) => (amount(Some(value))?, None),
                    Value::Object(detail) => (
                        amount(detail.get("amount"))?,
                        detail.get("source").and_then(Value::as_str).map(str::to_string),
                    ),
                    _ => (None, None),
                };
                Ok(PendingEntry {
                    hash: hash(key)?,
                    amount,
                    source,
                })
            })
            .collect(),
        other => Err(GatewayError::invalid(ACTION, format!("unexpected blocks value {other}"))),
    }
}
