//! Key generation and derivation.
//!
//! Private keys are 32-byte seeds expanded with Blake2b-512 (not SHA-512), so
//! public keys are computed through the `hazmat` layer of `ed25519-dalek`.

use blake2::{Blake2b512, Digest};
use ed25519_dalek::hazmat::ExpandedSecretKey;
use ed25519_dalek::VerifyingKey;
use nano_mcp_types::{KeyPair, PrivateKey, PublicKey};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::blake2b_256_multi;

/// Expand a private key into the scalar and nonce prefix used for signing.
pub(crate) fn expand(private: &PrivateKey) -> ExpandedSecretKey {
    let mut hasher = Blake2b512::new();
    hasher.update(private.0);
    let mut wide = [0u8; 64];
    wide.copy_from_slice(&hasher.finalize());
    ExpandedSecretKey::from_bytes(&wide)
}

/// Generate a new 32-byte wallet seed from the OS random source.
pub fn generate_seed() -> [u8; 32] {
    let mut seed = [0u8; 32];
    OsRng.fill_bytes(&mut seed);
    seed
}

/// Derive the private key at `index` of a wallet seed:
/// `Blake2b-256(seed || index as big-endian u32)`.
pub fn derive_private_key(seed: &[u8; 32], index: u32) -> PrivateKey {
    PrivateKey(blake2b_256_multi(&[seed, &index.to_be_bytes()]))
}

/// Derive the public key from a private key.
pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    let expanded = expand(private);
    PublicKey(VerifyingKey::from(&expanded).to_bytes())
}

/// Reconstruct a full key pair from a private key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    let public = public_from_private(&private);
    KeyPair { public, private }
}

/// Derive the key pair at `index` of a wallet seed (deterministic).
pub fn keypair_from_seed(seed: &[u8; 32], index: u32) -> KeyPair {
    keypair_from_private(derive_private_key(seed, index))
}
