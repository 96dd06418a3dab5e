//! Wallet core library for the ledger MCP shim.
//!
//! Provides everything the dispatcher needs to act on an account:
//! - Caller-supplied key validation and fresh wallet generation
//! - Block signing (Ed25519-Blake2b over the state-block hash)
//! - The pending-block receive engine (sequential, per-block failure isolation)
//! - The send engine
//! - Balance, account-info, and pending-block queries
//!
//! All node access goes through `nano_mcp_gateway::NodeClient`; nothing here
//! caches ledger state between calls.

pub mod config;
pub mod error;
pub mod keys;
mod pipeline;
pub mod receive;
pub mod results;
pub mod send;
pub mod signer;
pub mod wallet;

pub use config::{EngineConfig, WorkSource};
pub use error::WalletError;
pub use keys::{generate_wallet, GeneratedWallet, SigningAccount};
pub use receive::ReceiveEngine;
pub use results::{FailedEntry, ProcessedEntry, ReceiveBatchResult, ReceivedBlock, TransactionResult};
pub use send::{SendEngine, SendRequest};
pub use signer::sign_block;
pub use wallet::{PendingBlocks, Wallet};
