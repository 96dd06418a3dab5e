//! Method dispatcher and transports for the ledger MCP shim.
//!
//! A caller submits `{method, params}`; the [`Dispatcher`] routes it to the
//! wallet operation it names and answers `{result}` or
//! `{error: {code, message, details?}}`. Two transports carry envelopes:
//! - HTTP (axum): `POST /`, plus `/health` and `/metrics`
//! - stdio: newline-delimited JSON

pub mod dispatcher;
pub mod envelope;
pub mod error;
pub mod http;
pub mod methods;
pub mod metrics;
mod params;
pub mod stdio;

pub use dispatcher::Dispatcher;
pub use envelope::{ErrorObject, Request, RequestId, Response};
pub use error::RpcError;
pub use methods::Method;
pub use metrics::RpcMetrics;
