#![allow(dead_code)]

use std::sync::Arc;

use nano_mcp_crypto::{derive_address, keypair_from_seed};
use nano_mcp_gateway::NodeClient;
use nano_mcp_nullables::{NullGateway, NullLedger};
use nano_mcp_types::Account;
use nano_mcp_wallet::{EngineConfig, SigningAccount, Wallet};

pub const ONE_NANO: &str = "1000000000000000000000000000000";

/// Deterministic test account `index` with its hex private key.
pub fn account(index: u32) -> (Account, String) {
    let pair = keypair_from_seed(&[0x5E; 32], index);
    (derive_address(&pair.public), pair.private.to_hex())
}

pub fn signer(index: u32) -> SigningAccount {
    let (address, private_key) = account(index);
    SigningAccount::new(address.as_str(), &private_key).unwrap()
}

pub fn wallet(ledger: &Arc<NullLedger>, config: EngineConfig) -> Wallet {
    Wallet::new(NodeClient::new(ledger.clone()), config)
}

pub fn scripted_wallet(gateway: &Arc<NullGateway>) -> Wallet {
    Wallet::new(NodeClient::new(gateway.clone()), EngineConfig::default())
}
