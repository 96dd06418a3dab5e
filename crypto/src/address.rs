//! Account address derivation from public keys.
//!
//! Address format: `nano_` + base32(4 zero bits ‖ public_key, 52 chars) +
//! base32(checksum, 8 chars).
//!
//! Checksum: Blake2b with a 5-byte digest over the public key, byte-reversed.
//! Base32 alphabet: `13456789abcdefghijkmnopqrstuwxyz` (avoids ambiguous chars).
//! Total address length: 5 (prefix) + 52 + 8 = 65 characters.

use blake2::digest::consts::U5;
use blake2::{Blake2b, Digest};
use nano_mcp_types::{Account, PublicKey};

use crate::CryptoError;

/// Base32 alphabet (32 chars, avoids visually ambiguous 0/O, 2/Z, l/I, v).
const BASE32_ALPHABET: &[u8; 32] = b"13456789abcdefghijkmnopqrstuwxyz";

/// Reverse lookup table: ASCII byte → 5-bit value (0xFF = invalid).
const BASE32_DECODE: [u8; 128] = {
    let mut table = [0xFFu8; 128];
    let alpha = BASE32_ALPHABET;
    let mut i = 0;
    while i < 32 {
        table[alpha[i] as usize] = i as u8;
        i += 1;
    }
    table
};

/// Expected length of the encoded part (after the prefix): 52 pubkey + 8 checksum.
const ENCODED_LEN: usize = 60;
/// Number of base32 characters for the public key (4 pad bits + 256 bits = 52 × 5).
const PUBKEY_CHARS: usize = 52;

/// Encode bytes as base32, left-padding with zero bits up to a whole number
/// of characters.
fn encode_base32(bytes: &[u8]) -> String {
    let total_bits = bytes.len() * 8;
    let num_chars = total_bits.div_ceil(5);
    let mut result = String::with_capacity(num_chars);

    let mut buffer: u32 = 0;
    let mut bits_in_buffer = num_chars * 5 - total_bits;

    for &byte in bytes {
        buffer = (buffer << 8) | byte as u32;
        bits_in_buffer += 8;
        while bits_in_buffer >= 5 {
            bits_in_buffer -= 5;
            let idx = ((buffer >> bits_in_buffer) & 0x1F) as usize;
            result.push(BASE32_ALPHABET[idx] as char);
        }
        buffer &= (1 << bits_in_buffer) - 1;
    }

    result
}

/// Decode a left-padded base32 string into a fixed-size byte array. Returns
/// `None` on invalid characters, wrong length, or non-zero padding bits.
fn decode_base32_fixed<const N: usize>(s: &str) -> Option<[u8; N]> {
    let total_bits = s.len() * 5;
    if total_bits < N * 8 || total_bits - N * 8 >= 5 {
        return None;
    }
    let mut pad = total_bits - N * 8;

    let mut buffer: u32 = 0;
    let mut bits_in_buffer = 0;
    let mut result = [0u8; N];
    let mut pos = 0;

    for c in s.bytes() {
        let val = *BASE32_DECODE.get(c as usize)?;
        if val == 0xFF {
            return None;
        }
        buffer = (buffer << 5) | val as u32;
        bits_in_buffer += 5;
        if pad > 0 {
            if buffer >> (bits_in_buffer - pad) != 0 {
                return None;
            }
            bits_in_buffer -= pad;
            pad = 0;
        }
        if bits_in_buffer >= 8 {
            bits_in_buffer -= 8;
            result[pos] = (buffer >> bits_in_buffer) as u8;
            pos += 1;
        }
        buffer &= (1 << bits_in_buffer) - 1;
    }

    (pos == N).then_some(result)
}

fn checksum(public_key: &[u8; 32]) -> [u8; 5] {
    let mut hasher = Blake2b::<U5>::new();
    hasher.update(public_key);
    let mut out = [0u8; 5];
    out.copy_from_slice(&hasher.finalize());
    out.reverse();
    out
}

/// Derive a `nano_`-prefixed account address from a public key.
pub fn derive_address(public_key: &PublicKey) -> Account {
    let body = format!(
        "{}{}",
        encode_base32(public_key.as_bytes()),
        encode_base32(&checksum(public_key.as_bytes()))
    );
    Account::from_encoded_body(&body)
}

/// Extract the public key from a valid address (`nano_` or `xrb_`).
///
/// Returns `None` if the address is malformed or has an invalid checksum.
pub fn decode_address(address: &str) -> Option<PublicKey> {
    let encoded = address
        .strip_prefix(Account::PREFIX)
        .or_else(|| address.strip_prefix(Account::LEGACY_PREFIX))?;
    if encoded.len() != ENCODED_LEN || !encoded.is_ascii() {
        return None;
    }

    let (pubkey_encoded, checksum_encoded) = encoded.split_at(PUBKEY_CHARS);
    let pubkey_bytes: [u8; 32] = decode_base32_fixed(pubkey_encoded)?;
    let checksum_bytes: [u8; 5] = decode_base32_fixed(checksum_encoded)?;

    (checksum_bytes == checksum(&pubkey_bytes)).then_some(PublicKey(pubkey_bytes))
}

/// Validate that an address string is well-formed and its checksum is correct.
pub fn validate_address(address: &str) -> bool {
    decode_address(address).is_some()
}

/// Fully validate an address string, returning the typed account and its key.
pub fn parse_account(address: &str) -> Result<(Account, PublicKey), CryptoError> {
    let address = address.trim();
    let public_key =
        decode_address(address).ok_or_else(|| CryptoError::InvalidAddress(address.to_string()))?;
    let account =
        Account::new(address).map_err(|_| CryptoError::InvalidAddress(address.to_string()))?;
    Ok((account, public_key))
}

/// The public key behind an already-typed account.
pub fn account_public_key(account: &Account) -> Result<PublicKey, CryptoError> {
    decode_address(account.as_str())
        .ok_or_else(|| CryptoError::InvalidAddress(account.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys::{keypair_from_seed, public_from_private};

    const GENESIS: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";
    const GENESIS_KEY: &str = "E89208DD038FBB269987689621D52292AE9C35941A7484756ECCED92A65093BA";

    #[test]
    fn known_address_vector() {
        let key: PublicKey = GENESIS_KEY.parse().unwrap();
        assert_eq!(derive_address(&key).as_str(), GENESIS);
        assert_eq!(decode_address(GENESIS), Some(key));
    }

    #[test]
    fn legacy_prefix_decodes_to_same_key() {
        let legacy = GENESIS.replacen("nano_", "xrb_", 1);
        assert_eq!(decode_address(&legacy), decode_address(GENESIS));
    }

    #[test]
    fn derive_and_validate() {
        let kp = keypair_from_seed(&[7u8; 32], 0);
        let addr = derive_address(&kp.public);
        assert!(addr.as_str().starts_with("nano_"));
        assert_eq!(addr.as_str().len(), 65);
        assert!(validate_address(addr.as_str()));
    }

    #[test]
    fn decode_roundtrip() {
        let kp = keypair_from_seed(&[3u8; 32], 5);
        let addr = derive_address(&kp.public);
        assert_eq!(decode_address(addr.as_str()), Some(public_from_private(&kp.private)));
    }

    #[test]
    fn invalid_prefix_rejected() {
        let foreign = GENESIS.replacen("nano_", "brst_", 1);
        assert!(!validate_address(&foreign));
    }

    #[test]
    fn invalid_checksum_rejected() {
        let mut bad = GENESIS.to_string();
        let last = bad.pop().unwrap();
        bad.push(if last == '1' { '3' } else { '1' });
        assert!(!validate_address(&bad));
    }

    #[test]
    fn nonzero_padding_rejected() {
        // The first character carries four padding bits, so only '1' or '3' are valid.
        let bad = format!("nano_4{}", &GENESIS[6..]);
        assert!(!validate_address(&bad));
    }

    #[test]
    fn wrong_length_and_characters_rejected() {
        assert!(!validate_address("nano_tooshort"));
        assert!(!validate_address("nano_"));
        let with_zero = GENESIS.replacen('3', "0", 2);
        assert!(!validate_address(&with_zero));
    }

    #[test]
    fn parse_account_reports_input() {
        let err = parse_account("nano_bogus").unwrap_err();
        assert!(err.to_string().contains("nano_bogus"));
        let (account, key) = parse_account(GENESIS).unwrap();
        assert_eq!(account.as_str(), GENESIS);
        assert_eq!(key.to_string(), GENESIS_KEY);
    }

    #[test]
    fn base32_encode_decode_roundtrip() {
        let data = [0xDE, 0xAD, 0xBE, 0xEF, 0x42];
        let encoded = encode_base32(&data);
        let decoded: [u8; 5] = decode_base32_fixed(&encoded).unwrap();
        assert_eq!(decoded, data);
    }
}
