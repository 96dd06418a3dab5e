//! Nullable infrastructure for deterministic testing.
//!
//! Everything the shim talks to lives behind the `Gateway` trait. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record every call for assertions
//! - Never touch the network
//!
//! Usage: hand a nullable to `NodeClient::new` in place of `HttpGateway`.

pub mod gateway;
pub mod ledger;

pub use gateway::{NullGateway, RecordedCall};
pub use ledger::{NullLedger, ProcessedBlock};

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, ignoring poisoning. A panicking test thread must not hide
/// the state it left behind from the assertions that follow.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
