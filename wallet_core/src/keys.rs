//! Account keys supplied by callers, and fresh wallet generation.

use std::fmt;

use nano_mcp_crypto::{
    derive_address, generate_seed, keypair_from_seed, parse_account, public_from_private,
};
use nano_mcp_types::{Account, PrivateKey, PublicKey};
use serde::Serialize;

use crate::error::WalletError;

/// An account together with the private key that controls it.
///
/// Construction checks that the key actually derives the account's public
/// key, so a mismatched pair is rejected before any network call.
pub struct SigningAccount {
    pub account: Account,
    pub public_key: PublicKey,
    pub(crate) private_key: PrivateKey,
}

impl SigningAccount {
    pub fn new(address: &str, private_key_hex: &str) -> Result<Self, WalletError> {
        let (account, public_key) = parse_account(address)?;
        let private_key: PrivateKey = private_key_hex
            .parse()
            .map_err(|e: nano_mcp_types::TypesError| WalletError::Key(e.to_string()))?;
        if public_from_private(&private_key) != public_key {
            return Err(WalletError::KeyMismatch(account.to_string()));
        }
        Ok(Self {
            account,
            public_key,
            private_key,
        })
    }
}

impl fmt::Debug for SigningAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningAccount")
            .field("account", &self.account)
            .finish_non_exhaustive()
    }
}

/// A freshly generated wallet, returned to its owner once.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedWallet {
    pub address: Account,
    pub public_key: String,
    pub private_key: String,
    pub seed: String,
}

impl fmt::Debug for GeneratedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedWallet")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Generate a random seed and derive its index-0 account.
pub fn generate_wallet() -> GeneratedWallet {
    let seed = generate_seed();
    let pair = keypair_from_seed(&seed, 0);
    GeneratedWallet {
        address: derive_address(&pair.public),
        public_key: pair.public.to_string(),
        private_key: pair.private.to_hex(),
        seed: hex::encode_upper(seed),
    }
}
