//! PoW validation.

use blake2::digest::consts::U8;
use blake2::{Blake2b, Digest};
use nano_mcp_types::BlockHash;

/// The difficulty value a nonce achieves for a root:
/// `Blake2b-64(nonce as little-endian || root)` read as a little-endian u64.
pub fn work_value(root: &BlockHash, nonce: u64) -> u64 {
    let mut hasher = Blake2b::<U8>::new();
    hasher.update(nonce.to_le_bytes());
    hasher.update(root.as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&hasher.finalize());
    u64::from_le_bytes(out)
}

/// Validate that a work nonce meets the minimum difficulty for a root.
pub fn validate_work(root: &BlockHash, nonce: u64, min_difficulty: u64) -> bool {
    work_value(root, nonce) >= min_difficulty
}
