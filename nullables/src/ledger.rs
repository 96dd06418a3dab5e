//! Nullable ledger: an in-memory node that validates and applies blocks.
//!
//! Unlike [`crate::NullGateway`], which replays canned bodies, `NullLedger`
//! keeps account chains and pending sends, and its `process` action checks
//! what a real node checks before accepting a block: the hash is recomputed,
//! the signature verified against the account's key, `previous` must be the
//! current frontier, the work must clear the ledger's difficulty, and the
//! balance must move by exactly the amount received or sent.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use async_trait::async_trait;
use nano_mcp_crypto::{account_public_key, blake2b_256, derive_address, hash_state_block, verify_signature};
use nano_mcp_gateway::{AccountInfo, Gateway, GatewayError};
use nano_mcp_types::{Account, BlockHash, PublicKey, RawAmount, Signature, StateBlock, WorkNonce};
use nano_mcp_work::{format_difficulty, validate_work, WorkGenerator};
use serde_json::{json, Map, Value};

use crate::{lock, RecordedCall};

/// A block the ledger accepted through `process`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessedBlock {
    pub hash: BlockHash,
    pub subtype: String,
    pub block: StateBlock,
}

#[derive(Clone, Debug)]
struct AccountState {
    frontier: BlockHash,
    representative: Account,
    balance: RawAmount,
    block_count: u64,
}

#[derive(Clone, Debug)]
struct PendingSend {
    hash: BlockHash,
    destination: Account,
}

#[derive(Clone, Debug)]
struct SendDetail {
    source: Account,
    amount: RawAmount,
}

#[derive(Default)]
struct LedgerState {
    accounts: HashMap<Account, AccountState>,
    pending: Vec<PendingSend>,
    sends: HashMap<BlockHash, SendDetail>,
    failing_work: HashSet<BlockHash>,
    failing_actions: HashMap<String, String>,
    failing_calls: HashMap<(String, usize), String>,
    call_counts: HashMap<String, usize>,
    processed: Vec<ProcessedBlock>,
    work_difficulty: u64,
    next_synthetic: u64,
}

/// In-memory ledger node behind the `Gateway` trait.
///
/// Serves `account_info`, `account_balance`, `pending`, `blocks_info`,
/// `work_generate` and `process`. Work is generated and validated at the
/// ledger's own difficulty (zero by default, so any nonce passes), not at the
/// difficulty the caller asks for; the requested value is still visible in
/// [`NullLedger::calls`].
pub struct NullLedger {
    state: Mutex<LedgerState>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LedgerState::default()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Difficulty that `work_generate` produces and `process` enforces.
    pub fn set_work_difficulty(&self, difficulty: u64) {
        lock(&self.state).work_difficulty = difficulty;
    }

    /// Seed an opened account.
    pub fn open_account(
        &self,
        account: &Account,
        frontier: BlockHash,
        representative: &Account,
        balance: RawAmount,
    ) {
        lock(&self.state).accounts.insert(
            account.clone(),
            AccountState {
                frontier,
                representative: representative.clone(),
                balance,
                block_count: 1,
            },
        );
    }

    /// Seed a confirmed send from `source` to `destination`. Returns the hash
    /// of the synthetic send block.
    pub fn add_pending(&self, destination: &Account, source: &Account, amount: RawAmount) -> BlockHash {
        let mut state = lock(&self.state);
        state.next_synthetic += 1;
        let hash = BlockHash::new(blake2b_256(&state.next_synthetic.to_be_bytes()));
        state.pending.push(PendingSend {
            hash,
            destination: destination.clone(),
        });
        state.sends.insert(
            hash,
            SendDetail {
                source: source.clone(),
                amount,
            },
        );
        hash
    }

    /// Make `work_generate` fail for one root.
    pub fn fail_work_for(&self, root: BlockHash) {
        lock(&self.state).failing_work.insert(root);
    }

    /// Make every call of `action` fail with `message`.
    pub fn fail_action(&self, action: &str, message: &str) {
        lock(&self.state)
            .failing_actions
            .insert(action.to_string(), message.to_string());
    }

    /// Make only the `nth` call (1-based) of `action` fail with `message`.
    pub fn fail_call(&self, action: &str, nth: usize, message: &str) {
        lock(&self.state)
            .failing_calls
            .insert((action.to_string(), nth), message.to_string());
    }

    /// Current state of an account, `None` while unopened.
    pub fn account(&self, account: &Account) -> Option<AccountInfo> {
        lock(&self.state).accounts.get(account).map(|a| AccountInfo {
            frontier: a.frontier,
            representative: a.representative.clone(),
            balance: a.balance.clone(),
            block_count: Some(a.block_count.to_string()),
        })
    }

    /// Hashes still pending for an account, oldest first.
    pub fn pending_for(&self, account: &Account) -> Vec<BlockHash> {
        lock(&self.state)
            .pending
            .iter()
            .filter(|p| &p.destination == account)
            .map(|p| p.hash)
            .collect()
    }

    /// Blocks accepted by `process`, in order.
    pub fn processed(&self) -> Vec<ProcessedBlock> {
        lock(&self.state).processed.clone()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self, action: &str) -> usize {
        lock(&self.calls).iter().filter(|c| c.action == action).count()
    }

    fn handle(&self, action: &str, params: &Value) -> Result<Value, GatewayError> {
        let mut state = lock(&self.state);
        let nth = {
            let count = state.call_counts.entry(action.to_string()).or_default();
            *count += 1;
            *count
        };
        if let Some(message) = state
            .failing_actions
            .get(action)
            .or_else(|| state.failing_calls.get(&(action.to_string(), nth)))
        {
            return Err(GatewayError::Node(message.clone()));
        }
        match action {
            "account_info" => state.account_info(params),
            "account_balance" => state.account_balance(params),
            "pending" => state.pending(params),
            "blocks_info" => state.blocks_info(params),
            "work_generate" => state.work_generate(params),
            "process" => state.process(params),
            _ => Err(node_error("Unknown command")),
        }
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Gateway for NullLedger {
    async fn call(&self, action: &str, params: Value) -> Result<Value, GatewayError> {
        let reply = self.handle(action, &params);
        lock(&self.calls).push(RecordedCall {
            action: action.to_string(),
            params,
        });
        reply
    }
}

fn node_error(message: &str) -> GatewayError {
    GatewayError::Node(message.to_string())
}

fn str_field<'a>(params: &'a Value, key: &str) -> Result<&'a str, GatewayError> {
    params
        .get(key)
        .and_then(Value::as_str)
        .ok_or_else(|| GatewayError::Node(format!("Missing field {key}")))
}

fn account_field(params: &Value, key: &str) -> Result<Account, GatewayError> {
    Account::new(str_field(params, key)?).map_err(|_| node_error("Bad account number"))
}

fn hash_field(params: &Value, key: &str) -> Result<BlockHash, GatewayError> {
    str_field(params, key)?
        .parse()
        .map_err(|_| GatewayError::Node(format!("Invalid {key}")))
}

fn flag(params: &Value, key: &str) -> bool {
    matches!(params.get(key), Some(Value::String(s)) if s == "true")
        || matches!(params.get(key), Some(Value::Bool(true)))
}

impl LedgerState {
    fn account_info(&self, params: &Value) -> Result<Value, GatewayError> {
        let account = account_field(params, "account")?;
        let info = self
            .accounts
            .get(&account)
            .ok_or_else(|| node_error("Account not found"))?;
        Ok(json!({
            "frontier": info.frontier,
            "representative": info.representative,
            "balance": info.balance,
            "block_count": info.block_count.to_string(),
            "confirmation_height": info.block_count.to_string(),
        }))
    }

    fn pending_total(&self, account: &Account) -> RawAmount {
        self.pending
            .iter()
            .filter(|p| &p.destination == account)
            .filter_map(|p| self.sends.get(&p.hash))
            .fold(RawAmount::zero(), |sum, s| sum + s.amount.clone())
    }

    fn account_balance(&self, params: &Value) -> Result<Value, GatewayError> {
        let account = account_field(params, "account")?;
        let balance = self
            .accounts
            .get(&account)
            .map(|a| a.balance.clone())
            .unwrap_or_default();
        let pending = self.pending_total(&account);
        Ok(json!({ "balance": balance, "pending": pending, "receivable": pending }))
    }

    fn pending(&self, params: &Value) -> Result<Value, GatewayError> {
        let account = account_field(params, "account")?;
        let count = match params.get("count") {
            Some(Value::String(s)) => s.parse().map_err(|_| node_error("Invalid count"))?,
            Some(Value::Number(n)) => n.as_u64().ok_or_else(|| node_error("Invalid count"))?,
            _ => u64::MAX,
        };
        let threshold: RawAmount = match params.get("threshold").and_then(Value::as_str) {
            Some(s) => s.parse().map_err(|_| node_error("Bad threshold number"))?,
            None => RawAmount::zero(),
        };
        let with_source = flag(params, "source");

        let mut blocks = Map::new();
        for pending in self.pending.iter().filter(|p| p.destination == account) {
            if blocks.len() as u64 >= count {
                break;
            }
            let Some(detail) = self.sends.get(&pending.hash) else {
                continue;
            };
            if detail.amount < threshold {
                continue;
            }
            let entry = if with_source {
                json!({ "amount": detail.amount, "source": detail.source })
            } else {
                json!(detail.amount)
            };
            blocks.insert(pending.hash.to_string(), entry);
        }

        if blocks.is_empty() {
            Ok(json!({ "blocks": "" }))
        } else {
            Ok(json!({ "blocks": blocks }))
        }
    }

    fn blocks_info(&self, params: &Value) -> Result<Value, GatewayError> {
        let hashes = params
            .get("hashes")
            .and_then(Value::as_array)
            .ok_or_else(|| node_error("Missing field hashes"))?;
        let mut blocks = Map::new();
        for raw in hashes {
            let hash: BlockHash = raw
                .as_str()
                .and_then(|s| s.parse().ok())
                .ok_or_else(|| node_error("Bad hash number"))?;
            let detail = self.sends.get(&hash).ok_or_else(|| node_error("Block not found"))?;
            blocks.insert(
                hash.to_string(),
                json!({
                    "block_account": detail.source,
                    "amount": detail.amount,
                    "subtype": "send",
                    "confirmed": "true",
                }),
            );
        }
        Ok(json!({ "blocks": blocks }))
    }

    fn work_generate(&self, params: &Value) -> Result<Value, GatewayError> {
        let root = hash_field(params, "hash")?;
        if self.failing_work.contains(&root) {
            return Err(node_error("Failed to generate work"));
        }
        let work = WorkGenerator
            .generate(&root, self.work_difficulty)
            .map_err(|e| GatewayError::Node(e.to_string()))?;
        Ok(json!({
            "work": work.to_string(),
            "difficulty": format_difficulty(self.work_difficulty),
            "hash": root,
        }))
    }

    fn process(&mut self, params: &Value) -> Result<Value, GatewayError> {
        let subtype = str_field(params, "subtype")?.to_string();
        let raw = params.get("block").ok_or_else(|| node_error("Missing field block"))?;
        if raw.get("type").and_then(Value::as_str) != Some("state") {
            return Err(node_error("Block is invalid"));
        }

        let block = StateBlock {
            account: account_field(raw, "account")?,
            previous: hash_field(raw, "previous")?,
            representative: account_field(raw, "representative")?,
            balance: str_field(raw, "balance")?
                .parse()
                .map_err(|_| node_error("Bad balance number"))?,
            link: hash_field(raw, "link")?,
        };
        let signature: Signature = str_field(raw, "signature")?
            .parse()
            .map_err(|_| node_error("Bad signature"))?;
        let work: WorkNonce = str_field(raw, "work")?
            .parse()
            .map_err(|_| node_error("Bad work"))?;

        let hash = hash_state_block(&block).map_err(|_| node_error("Block is invalid"))?;
        let public_key = account_public_key(&block.account).map_err(|_| node_error("Bad account number"))?;
        if !verify_signature(hash.as_bytes(), &signature, &public_key) {
            return Err(node_error("Bad signature"));
        }

        let current = self.accounts.get(&block.account).cloned();
        let frontier = current.as_ref().map(|a| a.frontier).unwrap_or(BlockHash::ZERO);
        if block.previous != frontier {
            return Err(node_error(if current.is_none() {
                "Gap previous block"
            } else {
                "Fork"
            }));
        }

        let root = if block.previous.is_zero() {
            BlockHash::new(public_key.0)
        } else {
            block.previous
        };
        if !validate_work(&root, work.0, self.work_difficulty) {
            return Err(node_error("Insufficient work"));
        }

        let old_balance = current.as_ref().map(|a| a.balance.clone()).unwrap_or_default();
        match (subtype.as_str(), block.previous.is_zero()) {
            ("open", true) | ("receive", false) => {
                let index = self
                    .pending
                    .iter()
                    .position(|p| p.hash == block.link && p.destination == block.account)
                    .ok_or_else(|| node_error("Unreceivable"))?;
                let amount = self
                    .sends
                    .get(&block.link)
                    .map(|s| s.amount.clone())
                    .ok_or_else(|| node_error("Unreceivable"))?;
                if block.balance != &old_balance + &amount {
                    return Err(node_error("Balance mismatch"));
                }
                self.pending.remove(index);
            }
            ("send", false) => {
                let amount = old_balance
                    .checked_sub(&block.balance)
                    .filter(|a| !a.is_zero())
                    .ok_or_else(|| node_error("Balance mismatch"))?;
                let destination = derive_address(&PublicKey(*block.link.as_bytes()));
                self.pending.push(PendingSend { hash, destination });
                self.sends.insert(
                    hash,
                    SendDetail {
                        source: block.account.clone(),
                        amount,
                    },
                );
            }
            _ => return Err(node_error("Invalid block subtype")),
        }

        self.accounts.insert(
            block.account.clone(),
            AccountState {
                frontier: hash,
                representative: block.representative.clone(),
                balance: block.balance.clone(),
                block_count: current.map(|a| a.block_count).unwrap_or(0) + 1,
            },
        );
        self.processed.push(ProcessedBlock {
            hash,
            subtype,
            block,
        });
        Ok(json!({ "hash": hash }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nano_mcp_crypto::{keypair_from_seed, sign_message};
    use nano_mcp_types::KeyPair;

    fn wallet(index: u32) -> (KeyPair, Account) {
        let pair = keypair_from_seed(&[7u8; 32], index);
        let account = derive_address(&pair.public);
        (pair, account)
    }

    fn signed_json(pair: &KeyPair, block: &StateBlock) -> Value {
        let hash = hash_state_block(block).unwrap();
        let signature = sign_message(hash.as_bytes(), &pair.private);
        json!({
            "type": "state",
            "account": block.account,
            "previous": block.previous,
            "representative": block.representative,
            "balance": block.balance,
            "link": block.link,
            "signature": signature.to_string(),
            "work": WorkNonce(0).to_string(),
        })
    }

    #[tokio::test]
    async fn unopened_account_is_not_found() {
        let ledger = NullLedger::new();
        let (_, account) = wallet(0);
        let err = ledger
            .call("account_info", json!({ "account": account }))
            .await
            .unwrap_err();
        assert!(err.is_account_not_found());
    }

    #[tokio::test]
    async fn empty_pending_is_empty_string() {
        let ledger = NullLedger::new();
        let (_, account) = wallet(0);
        let body = ledger
            .call("pending", json!({ "account": account, "count": "10" }))
            .await
            .unwrap();
        assert_eq!(body["blocks"], "");
    }

    #[tokio::test]
    async fn open_block_is_applied() {
        let ledger = NullLedger::new();
        let (pair, account) = wallet(0);
        let (_, sender) = wallet(1);
        let hash = ledger.add_pending(&account, &sender, RawAmount::from(500));

        let block = StateBlock {
            account: account.clone(),
            previous: BlockHash::ZERO,
            representative: account.clone(),
            balance: RawAmount::from(500),
            link: hash,
        };
        let body = ledger
            .call(
                "process",
                json!({ "subtype": "open", "json_block": "true", "block": signed_json(&pair, &block) }),
            )
            .await
            .unwrap();

        let info = ledger.account(&account).unwrap();
        assert_eq!(body["hash"], info.frontier.to_string());
        assert_eq!(info.balance, RawAmount::from(500));
        assert!(ledger.pending_for(&account).is_empty());
        assert_eq!(ledger.processed().len(), 1);
    }

    #[tokio::test]
    async fn rejects_wrong_balance_and_bad_signature() {
        let ledger = NullLedger::new();
        let (pair, account) = wallet(0);
        let (other, sender) = wallet(1);
        let hash = ledger.add_pending(&account, &sender, RawAmount::from(500));

        let mut block = StateBlock {
            account: account.clone(),
            previous: BlockHash::ZERO,
            representative: account.clone(),
            balance: RawAmount::from(501),
            link: hash,
        };
        let err = ledger
            .call("process", json!({ "subtype": "open", "block": signed_json(&pair, &block) }))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Node("Balance mismatch".into()));

        block.balance = RawAmount::from(500);
        let err = ledger
            .call("process", json!({ "subtype": "open", "block": signed_json(&other, &block) }))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Node("Bad signature".into()));
        assert!(ledger.processed().is_empty());
    }

    #[tokio::test]
    async fn work_generate_can_be_failed_per_root() {
        let ledger = NullLedger::new();
        let root = BlockHash::new([9; 32]);
        ledger.fail_work_for(root);
        assert!(ledger
            .call("work_generate", json!({ "hash": root }))
            .await
            .is_err());
        assert!(ledger
            .call("work_generate", json!({ "hash": BlockHash::new([8; 32]) }))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn fails_only_the_chosen_call() {
        let ledger = NullLedger::new();
        ledger.fail_call("work_generate", 2, "Failed to generate work");
        let params = json!({ "hash": BlockHash::new([1; 32]) });
        assert!(ledger.call("work_generate", params.clone()).await.is_ok());
        assert!(ledger.call("work_generate", params.clone()).await.is_err());
        assert!(ledger.call("work_generate", params).await.is_ok());
    }

    #[tokio::test]
    async fn enforces_configured_work_difficulty() {
        let ledger = NullLedger::new();
        ledger.set_work_difficulty(0xFF00_0000_0000_0000);
        let (pair, account) = wallet(0);
        let (_, sender) = wallet(1);
        let hash = ledger.add_pending(&account, &sender, RawAmount::from(1));
        let block = StateBlock {
            account: account.clone(),
            previous: BlockHash::ZERO,
            representative: account.clone(),
            balance: RawAmount::from(1),
            link: hash,
        };
        let mut body = signed_json(&pair, &block);

        let root = BlockHash::new(pair.public.0);
        let nonce = (0u64..).find(|n| !validate_work(&root, *n, 0xFF00_0000_0000_0000)).unwrap();
        body["work"] = json!(WorkNonce(nonce).to_string());
        let err = ledger
            .call("process", json!({ "subtype": "open", "block": body.clone() }))
            .await
            .unwrap_err();
        assert_eq!(err, GatewayError::Node("Insufficient work".into()));

        let work = ledger.call("work_generate", json!({ "hash": root })).await.unwrap();
        body["work"] = work["work"].clone();
        ledger
            .call("process", json!({ "subtype": "open", "block": body }))
            .await
            .unwrap();
    }
}
