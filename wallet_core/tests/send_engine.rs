mod common;

use std::sync::Arc;

use common::{account, signer, wallet};
use nano_mcp_nullables::NullLedger;
use nano_mcp_types::{BlockHash, RawAmount};
use nano_mcp_wallet::{EngineConfig, SendRequest, WalletError};

fn request(from: u32, to: u32, amount: u128) -> SendRequest {
    let (from_address, key) = account(from);
    let (to_address, _) = account(to);
    SendRequest::new(from_address.as_str(), &key, to_address.as_str(), RawAmount::from(amount)).unwrap()
}

#[tokio::test]
async fn send_builds_block_onto_frontier() {
    let ledger = Arc::new(NullLedger::new());
    let me = signer(0);
    let (representative, _) = account(3);
    let frontier = BlockHash::new([0xAB; 32]);
    ledger.open_account(&me.account, frontier, &representative, RawAmount::from(1000));

    let req = request(0, 1, 400);
    let result = wallet(&ledger, EngineConfig::default()).send(&req).await;

    assert!(result.success, "{result:?}");
    assert!(result.error.is_none());
    let processed = &ledger.processed()[0];
    assert_eq!(Some(processed.hash), result.hash);
    assert_eq!(processed.subtype, "send");
    assert_eq!(processed.block.previous, frontier);
    assert_eq!(processed.block.representative, representative);
    assert_eq!(processed.block.balance, RawAmount::from(600));
    assert_eq!(processed.block.link, BlockHash::new(req.to_public_key.0));

    let work_call = ledger
        .calls()
        .into_iter()
        .find(|c| c.action == "work_generate")
        .unwrap();
    assert_eq!(work_call.params["difficulty"], "fffffff800000000");
}

#[tokio::test]
async fn sent_funds_can_be_received() {
    let ledger = Arc::new(NullLedger::new());
    let me = signer(0);
    ledger.open_account(&me.account, BlockHash::new([1; 32]), &me.account, RawAmount::from(50));
    let w = wallet(&ledger, EngineConfig::default());

    assert!(w.send(&request(0, 1, 20)).await.success);

    let result = w.receive_all(&signer(1)).await;
    assert_eq!(result.received_count, 1);
    assert_eq!(result.processed[0].amount, RawAmount::from(20));
    assert_eq!(ledger.account(&signer(1).account).unwrap().balance, RawAmount::from(20));
}

#[tokio::test]
async fn insufficient_balance_fails_before_work_or_process() {
    let ledger = Arc::new(NullLedger::new());
    let me = signer(0);
    ledger.open_account(&me.account, BlockHash::new([1; 32]), &me.account, RawAmount::from(100));

    let result = wallet(&ledger, EngineConfig::default()).send(&request(0, 1, 101)).await;

    assert!(!result.success);
    assert!(result.hash.is_none());
    assert_eq!(
        result.error.as_deref(),
        Some("insufficient balance: need 101, have 100")
    );
    assert_eq!(ledger.call_count("work_generate"), 0);
    assert_eq!(ledger.call_count("process"), 0);
}

#[tokio::test]
async fn unopened_account_cannot_send() {
    let ledger = Arc::new(NullLedger::new());

    let result = wallet(&ledger, EngineConfig::default()).send(&request(0, 1, 1)).await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("account has no previous blocks"));
    assert_eq!(ledger.call_count("process"), 0);
}

#[tokio::test]
async fn ledger_rejection_is_surfaced() {
    let ledger = Arc::new(NullLedger::new());
    let me = signer(0);
    ledger.open_account(&me.account, BlockHash::new([1; 32]), &me.account, RawAmount::from(10));
    ledger.fail_action("process", "Fork");

    let result = wallet(&ledger, EngineConfig::default()).send(&request(0, 1, 1)).await;

    assert_eq!(result.error.as_deref(), Some("Fork"));
    assert_eq!(ledger.account(&me.account).unwrap().balance, RawAmount::from(10));
}

#[test]
fn request_validation() {
    let (from, key) = account(0);
    let (to, _) = account(1);
    let (_, other_key) = account(2);

    let err = SendRequest::new(from.as_str(), &other_key, to.as_str(), RawAmount::from(1)).unwrap_err();
    assert!(matches!(err, WalletError::KeyMismatch(_)));

    let err = SendRequest::new(from.as_str(), &key, "nano_1notanaddress", RawAmount::from(1)).unwrap_err();
    assert!(matches!(err, WalletError::InvalidAddress(_)));

    let err = SendRequest::new(from.as_str(), &key, to.as_str(), RawAmount::zero()).unwrap_err();
    assert!(matches!(err, WalletError::InvalidAmount(_)));
    assert!(err.is_validation());
}
