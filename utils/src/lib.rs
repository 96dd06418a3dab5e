//! Shared utilities for the ledger MCP shim.

pub mod logging;

pub use logging::{init_tracing, LogFormat};
