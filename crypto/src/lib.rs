//! Cryptographic primitives for the ledger.
//!
//! - **Ed25519 with Blake2b-512** for keys and block signatures (the ledger's
//!   signature scheme differs from RFC 8032 only in the hash function)
//! - **Blake2b** for block hashes, address checksums, and seed derivation
//! - Address codec with `nano_` prefix and base32 encoding

pub mod address;
pub mod error;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{account_public_key, decode_address, derive_address, parse_account, validate_address};
pub use error::CryptoError;
pub use hash::{blake2b_256, blake2b_256_multi, hash_state_block};
pub use keys::{
    derive_private_key, generate_seed, keypair_from_private, keypair_from_seed,
    public_from_private,
};
pub use sign::{sign_message, verify_signature};
