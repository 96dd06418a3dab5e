#![allow(dead_code)]

use std::sync::Arc;

use nano_mcp_crypto::{derive_address, keypair_from_seed};
use nano_mcp_gateway::NodeClient;
use nano_mcp_nullables::NullLedger;
use nano_mcp_rpc::{Dispatcher, RpcMetrics};
use nano_mcp_types::Account;
use nano_mcp_wallet::{EngineConfig, Wallet};

pub fn account(index: u32) -> (Account, String) {
    let pair = keypair_from_seed(&[0x3C; 32], index);
    (derive_address(&pair.public), pair.private.to_hex())
}

pub fn dispatcher(ledger: &Arc<NullLedger>, read_only: bool) -> Dispatcher {
    let wallet = Wallet::new(NodeClient::new(ledger.clone()), EngineConfig::default());
    Dispatcher::new(wallet, read_only, Arc::new(RpcMetrics::new().unwrap()))
}
