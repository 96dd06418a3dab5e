//! Block signing: hash the unsigned fields, sign the hash, attach work.

use nano_mcp_crypto::{hash_state_block, sign_message};
use nano_mcp_types::{BlockSubtype, SignedBlock, StateBlock, WorkNonce};

use crate::error::WalletError;
use crate::keys::SigningAccount;

/// Sign a state block for `signer`'s account.
///
/// Deterministic: the same fields, work, and key always give the same
/// signature. Fails if the block belongs to another account or its balance
/// does not fit the 128-bit field.
pub fn sign_block(
    block: StateBlock,
    work: WorkNonce,
    signer: &SigningAccount,
    subtype: BlockSubtype,
) -> Result<SignedBlock, WalletError> {
    if block.account != signer.account {
        return Err(WalletError::Signing(format!(
            "block account {} does not match signing account {}",
            block.account, signer.account
        )));
    }
    let hash = hash_state_block(&block)?;
    let signature = sign_message(hash.as_bytes(), &signer.private_key);
    Ok(SignedBlock {
        block,
        subtype,
        hash,
        signature,
        work,
    })
}
