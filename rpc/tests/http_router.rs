mod common;

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use common::dispatcher;
use nano_mcp_nullables::NullLedger;
use nano_mcp_rpc::http::router;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn post_dispatches_envelope() {
    let app = router(Arc::new(dispatcher(&Arc::new(NullLedger::new()), false)));

    let response = app
        .oneshot(post(r#"{"jsonrpc":"2.0","id":1,"method":"convertFromDisplayUnit","params":{"amount":"1"}}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "jsonrpc": "2.0", "id": 1, "result": "1000000000000000000000000000000" })
    );
}

#[tokio::test]
async fn malformed_body_is_parse_error() {
    let app = router(Arc::new(dispatcher(&Arc::new(NullLedger::new()), false)));

    let response = app.oneshot(post("{oops")).await.unwrap();

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], -32700);
}

#[tokio::test]
async fn malformed_body_counts_as_a_request() {
    let d = Arc::new(dispatcher(&Arc::new(NullLedger::new()), false));
    let app = router(d.clone());

    app.oneshot(post("{oops")).await.unwrap();

    assert_eq!(d.metrics().requests.get(), 1);
    assert_eq!(d.metrics().request_errors.get(), 1);
}

#[tokio::test]
async fn health_and_metrics() {
    let app = router(Arc::new(dispatcher(&Arc::new(NullLedger::new()), false)));

    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "ok");

    app.clone()
        .oneshot(post(r#"{"method":"nope"}"#))
        .await
        .unwrap();

    let response = app
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("nano_mcp_requests_total 1"));
    assert!(text.contains("nano_mcp_request_errors_total 1"));
}

#[tokio::test]
async fn cors_preflight_is_allowed() {
    let app = router(Arc::new(dispatcher(&Arc::new(NullLedger::new()), false)));

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
