//! Fundamental types for the ledger MCP shim.
//!
//! This crate defines the value types shared across every other crate in the
//! workspace: account addresses, block hashes, keys and signatures, work
//! nonces, state blocks, and big-integer raw amounts with display-unit
//! conversion.

pub mod address;
pub mod amount;
pub mod block;
pub mod error;
pub mod hash;
pub mod keys;
pub mod work;

pub use address::Account;
pub use amount::{RawAmount, DISPLAY_DECIMALS};
pub use block::{BlockSubtype, SignedBlock, StateBlock};
pub use error::TypesError;
pub use hash::BlockHash;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use work::WorkNonce;
