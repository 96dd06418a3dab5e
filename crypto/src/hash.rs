//! Blake2b hashing for state blocks.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use nano_mcp_types::{BlockHash, StateBlock};

use crate::{account_public_key, CryptoError};

type Blake2b256 = Blake2b<U32>;

/// Every state block hash starts with this 32-byte preamble (value 6).
const STATE_BLOCK_PREAMBLE: [u8; 32] = {
    let mut p = [0u8; 32];
    p[31] = 6;
    p
};

/// Compute a 256-bit Blake2b hash of arbitrary data.
pub fn blake2b_256(data: &[u8]) -> [u8; 32] {
    blake2b_256_multi(&[data])
}

/// Hash multiple byte slices in sequence (avoids concatenation allocation).
pub fn blake2b_256_multi(parts: &[&[u8]]) -> [u8; 32] {
    let mut hasher = Blake2b256::new();
    for part in parts {
        hasher.update(part);
    }
    let result = hasher.finalize();
    let mut output = [0u8; 32];
    output.copy_from_slice(&result);
    output
}

/// Hash the unsigned fields of a state block.
///
/// `preamble || account || previous || representative || balance (u128 BE) || link`.
/// Fails if either address is malformed or the balance exceeds 128 bits.
pub fn hash_state_block(block: &StateBlock) -> Result<BlockHash, CryptoError> {
    let account = account_public_key(&block.account)?;
    let representative = account_public_key(&block.representative)?;
    let balance = block.balance.to_be_bytes_16()?;
    Ok(BlockHash::new(blake2b_256_multi(&[
        &STATE_BLOCK_PREAMBLE,
        account.as_bytes(),
        block.previous.as_bytes(),
        representative.as_bytes(),
        &balance,
        block.link.as_bytes(),
    ])))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nano_mcp_types::{Account, RawAmount};

    const GENESIS: &str = "nano_3t6k35gi95xu6tergt6p69ck76ogmitsa8mnijtpxm9fkcm736xtoncuohr3";

    fn block() -> StateBlock {
        let account = Account::new(GENESIS).unwrap();
        StateBlock {
            account: account.clone(),
            previous: BlockHash::new([0x01; 32]),
            representative: account,
            balance: RawAmount::from(1_000_000u128),
            link: BlockHash::new([0x02; 32]),
        }
    }

    #[test]
    fn blake2b_deterministic() {
        assert_eq!(blake2b_256(b"hello"), blake2b_256(b"hello"));
        assert_ne!(blake2b_256(b"hello"), blake2b_256(b"world"));
    }

    #[test]
    fn blake2b_multi_equivalent() {
        let single = blake2b_256(b"helloworld");
        let multi = blake2b_256_multi(&[b"hello", b"world"]);
        assert_eq!(single, multi);
    }

    #[test]
    fn state_block_hash_matches_reference() {
        let hash = hash_state_block(&block()).unwrap();
        assert_eq!(
            hash.to_string(),
            "44B9EBC0D4C111B7E0AEB684C32322C5B5AD732BD8354CB6F1ACAEE5BD421EAB"
        );
    }

    #[test]
    fn every_field_changes_the_hash() {
        let base = hash_state_block(&block()).unwrap();

        let mut b = block();
        b.previous = BlockHash::ZERO;
        assert_ne!(hash_state_block(&b).unwrap(), base);

        let mut b = block();
        b.balance = RawAmount::from(1_000_001u128);
        assert_ne!(hash_state_block(&b).unwrap(), base);

        let mut b = block();
        b.link = BlockHash::ZERO;
        assert_ne!(hash_state_block(&b).unwrap(), base);
    }

    #[test]
    fn oversized_balance_is_rejected() {
        let mut b = block();
        b.balance = &RawAmount::max_balance() + &RawAmount::from(1);
        assert!(matches!(
            hash_state_block(&b),
            Err(CryptoError::Types(_))
        ));
    }
}
