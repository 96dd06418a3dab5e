//! Proof-of-work for state blocks.
//!
//! Every block carries a nonce whose Blake2b-64 hash with the block's work
//! root clears a difficulty threshold. The root is the account's frontier, or
//! its public key for the first (open) block. Work is normally requested from
//! the node; [`WorkGenerator`] computes it locally when no work peer is
//! available.

pub mod error;
pub mod generator;
pub mod thresholds;
pub mod validator;

pub use error::WorkError;
pub use generator::WorkGenerator;
pub use thresholds::{
    format_difficulty, parse_difficulty, WorkBlockKind, WorkRequest, WorkThresholds,
    DEFAULT_OPEN_THRESHOLD, DEFAULT_SECURED_THRESHOLD,
};
pub use validator::{validate_work, work_value};
