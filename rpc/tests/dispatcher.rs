mod common;

use std::sync::Arc;

use common::{account, dispatcher};
use nano_mcp_nullables::NullLedger;
use nano_mcp_rpc::error::{INTERNAL_ERROR, INVALID_PARAMS, METHOD_NOT_FOUND};
use nano_mcp_rpc::{Method, Request, RequestId};
use nano_mcp_types::{BlockHash, RawAmount};
use proptest::prelude::*;
use serde_json::{json, Value};

const ONE_NANO: &str = "1000000000000000000000000000000";

fn all_names() -> Vec<&'static str> {
    Method::ALL.iter().map(Method::name).collect()
}

#[tokio::test]
async fn unknown_method_lists_registered_methods() {
    let ledger = Arc::new(NullLedger::new());
    let d = dispatcher(&ledger, false);

    let response = d.handle_request(&Request::new("getBalanse", json!({}))).await;

    let error = response.error.unwrap();
    assert_eq!(error.code, METHOD_NOT_FOUND);
    assert_eq!(error.details.unwrap()["availableMethods"], json!(all_names()));
    assert!(ledger.calls().is_empty());
}

#[tokio::test]
async fn read_only_hides_mutating_methods() {
    let ledger = Arc::new(NullLedger::new());
    let d = dispatcher(&ledger, true);
    let (address, key) = account(0);

    let response = d
        .handle_request(&Request::new(
            "receiveAll",
            json!({ "address": address, "privateKey": key }),
        ))
        .await;

    let error = response.error.unwrap();
    assert_eq!(error.code, METHOD_NOT_FOUND);
    let available = error.details.unwrap()["availableMethods"].clone();
    assert!(!available.as_array().unwrap().contains(&json!("receiveAll")));
    assert!(!available.as_array().unwrap().contains(&json!("send")));
    assert!(!available.as_array().unwrap().contains(&json!("generateWallet")));
    assert!(available.as_array().unwrap().contains(&json!("getBalance")));
}

#[tokio::test]
async fn initialize_reports_server_and_methods() {
    let ledger = Arc::new(NullLedger::new());
    let result = dispatcher(&ledger, false)
        .handle("initialize", &Value::Null)
        .await
        .unwrap();
    assert_eq!(result["serverInfo"]["name"], "nano-mcp");
    assert_eq!(result["methods"], json!(all_names()));
}

#[tokio::test]
async fn id_is_echoed() {
    let ledger = Arc::new(NullLedger::new());
    let mut request = Request::new("convertToDisplayUnit", json!({ "amount": ONE_NANO }));
    request.id = Some(RequestId::String("abc".into()));

    let response = dispatcher(&ledger, false).handle_request(&request).await;

    assert_eq!(response.id, Some(RequestId::String("abc".into())));
    assert_eq!(response.result, Some(json!("1")));
}

#[tokio::test]
async fn conversions_are_exact() {
    let ledger = Arc::new(NullLedger::new());
    let d = dispatcher(&ledger, false);

    let raw = d.handle("convertFromDisplayUnit", &json!(["1.23"])).await.unwrap();
    assert_eq!(raw, json!("1230000000000000000000000000000"));
    let display = d.handle("convertToDisplayUnit", &json!([raw])).await.unwrap();
    assert_eq!(display, json!("1.23"));

    let err = d
        .handle("convertFromDisplayUnit", &json!({ "amount": "0.0000000000000000000000000000001" }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), INVALID_PARAMS);
}

#[tokio::test]
async fn missing_params_are_invalid_params() {
    let ledger = Arc::new(NullLedger::new());
    let response = dispatcher(&ledger, false)
        .handle_request(&Request::new("getBalance", json!({})))
        .await;
    let error = response.error.unwrap();
    assert_eq!(error.code, INVALID_PARAMS);
    assert_eq!(error.message, "missing parameter: address");
}

#[tokio::test]
async fn get_balance_returns_strings() {
    let ledger = Arc::new(NullLedger::new());
    let (address, _) = account(0);
    ledger.open_account(&address, BlockHash::new([1; 32]), &address, ONE_NANO.parse().unwrap());

    let result = dispatcher(&ledger, false)
        .handle("getBalance", &json!([address]))
        .await
        .unwrap();
    assert_eq!(result, json!({ "balance": ONE_NANO, "pending": "0", "receivable": "0" }));
}

#[tokio::test]
async fn account_not_found_is_internal_error() {
    let ledger = Arc::new(NullLedger::new());
    let (address, _) = account(0);

    let err = dispatcher(&ledger, false)
        .handle("getAccountInfo", &json!({ "address": address }))
        .await
        .unwrap_err();
    assert_eq!(err.code(), INTERNAL_ERROR);
    assert!(err.to_string().contains("account not found"));
}

#[tokio::test]
async fn receive_all_then_send_in_display_units() {
    let ledger = Arc::new(NullLedger::new());
    let d = dispatcher(&ledger, false);
    let (me, key) = account(0);
    let (other, _) = account(1);
    ledger.add_pending(&me, &other, ONE_NANO.parse().unwrap());

    let received = d
        .handle("receiveAll", &json!({ "address": me, "privateKey": key }))
        .await
        .unwrap();
    assert_eq!(received["success"], true);
    assert_eq!(received["receivedCount"], 1);
    assert_eq!(received["processed"][0]["result"]["subtype"], "open");

    let sent = d
        .handle(
            "send",
            &json!({
                "fromAddress": me,
                "privateKey": key,
                "toAddress": other,
                "amount": "0.25",
                "unit": "nano",
            }),
        )
        .await
        .unwrap();
    assert_eq!(sent["success"], true);
    assert_eq!(
        ledger.account(&me).unwrap().balance,
        RawAmount::from_display("0.75").unwrap()
    );

    let text = d.metrics().encode().unwrap();
    assert!(text.contains("nano_mcp_blocks_received_total 1"));
    assert!(text.contains("nano_mcp_blocks_sent_total 1"));
}

#[tokio::test]
async fn engine_failure_is_a_result_not_an_error() {
    let ledger = Arc::new(NullLedger::new());
    let (me, key) = account(0);
    let (other, _) = account(1);

    let result = dispatcher(&ledger, false)
        .handle("send", &json!([me, key, other, "5"]))
        .await
        .unwrap();
    assert_eq!(result, json!({ "success": false, "error": "account has no previous blocks" }));
}

#[tokio::test]
async fn wrong_key_is_rejected_before_the_node() {
    let ledger = Arc::new(NullLedger::new());
    let (me, _) = account(0);
    let (_, other_key) = account(1);

    let err = dispatcher(&ledger, false)
        .handle("receiveAll", &json!([me, other_key]))
        .await
        .unwrap_err();
    assert_eq!(err.code(), INVALID_PARAMS);
    assert!(ledger.calls().is_empty());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn unregistered_names_always_get_not_found(name in "[a-zA-Z_]{0,24}") {
        prop_assume!(Method::parse(&name).is_none());
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let ledger = Arc::new(NullLedger::new());
        let d = dispatcher(&ledger, false);

        let response = runtime.block_on(d.handle_request(&Request::new(name, json!([1, 2]))));

        let error = response.error.unwrap();
        prop_assert_eq!(error.code, METHOD_NOT_FOUND);
        prop_assert_eq!(error.details.unwrap()["availableMethods"].clone(), json!(all_names()));
        prop_assert!(ledger.calls().is_empty());
    }
}
