//! Axum-based HTTP transport.
//!
//! - `POST /` takes one request envelope and answers with one response
//!   envelope (always HTTP 200; failures live in the envelope)
//! - `GET /health` reports liveness
//! - `GET /metrics` serves the Prometheus text format

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::dispatcher::Dispatcher;
use crate::envelope::Response;
use crate::error::RpcError;

/// Build the router over a shared dispatcher.
pub fn router(dispatcher: Arc<Dispatcher>) -> Router {
    Router::new()
        .route("/", post(handle_envelope))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(CorsLayer::permissive())
        .with_state(dispatcher)
}

/// Serve until `shutdown` resolves.
pub async fn serve(
    dispatcher: Arc<Dispatcher>,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), RpcError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| RpcError::Server(format!("failed to bind {addr}: {e}")))?;
    info!(%addr, "HTTP transport listening");
    axum::serve(listener, router(dispatcher))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| RpcError::Server(e.to_string()))
}

async fn handle_envelope(State(dispatcher): State<Arc<Dispatcher>>, body: Bytes) -> Json<Response> {
    Json(dispatcher.handle_raw(&body).await)
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn metrics(State(dispatcher): State<Arc<Dispatcher>>) -> impl IntoResponse {
    match dispatcher.metrics().encode() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
