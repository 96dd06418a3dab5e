//! The wallet facade: read operations plus the two engines, over one node.

use nano_mcp_crypto::parse_account;
use nano_mcp_gateway::{AccountBalance, NodeClient, PendingEntry};
use nano_mcp_types::RawAmount;
use serde::Serialize;

use crate::config::EngineConfig;
use crate::error::WalletError;
use crate::keys::SigningAccount;
use crate::receive::ReceiveEngine;
use crate::results::{ReceiveBatchResult, TransactionResult};
use crate::send::{SendEngine, SendRequest};

/// Pending blocks listed for an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PendingBlocks {
    pub blocks: Vec<PendingEntry>,
}

/// Every ledger operation the shim exposes.
///
/// Holds no account state. Each call reads what it needs from the node, so
/// one `Wallet` can serve concurrent calls for any number of accounts.
#[derive(Clone)]
pub struct Wallet {
    client: NodeClient,
    config: EngineConfig,
    receive: ReceiveEngine,
    send: SendEngine,
}

impl Wallet {
    pub fn new(client: NodeClient, config: EngineConfig) -> Self {
        Self {
            receive: ReceiveEngine::new(client.clone(), &config),
            send: SendEngine::new(client.clone(), &config),
            client,
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Confirmed balance, pending, and receivable totals in raw.
    pub async fn get_balance(&self, address: &str) -> Result<AccountBalance, WalletError> {
        let (account, _) = parse_account(address)?;
        Ok(self.client.account_balance(&account).await?)
    }

    /// The node's `account_info` body, unchanged.
    pub async fn get_account_info(&self, address: &str) -> Result<serde_json::Value, WalletError> {
        let (account, _) = parse_account(address)?;
        self.client
            .account_info_raw(&account)
            .await
            .map_err(|e| {
                if e.is_account_not_found() {
                    WalletError::AccountNotFound(account.to_string())
                } else {
                    e.into()
                }
            })
    }

    /// Pending blocks for an account, defaulting to the configured count and
    /// threshold.
    pub async fn get_pending_blocks(
        &self,
        address: &str,
        count: Option<u64>,
        threshold: Option<RawAmount>,
    ) -> Result<PendingBlocks, WalletError> {
        let (account, _) = parse_account(address)?;
        let threshold = threshold.unwrap_or_else(|| self.config.pending_threshold.clone());
        let blocks = self
            .client
            .pending(&account, count.unwrap_or(self.config.pending_count), &threshold)
            .await?;
        Ok(PendingBlocks { blocks })
    }

    pub async fn send(&self, request: &SendRequest) -> TransactionResult {
        self.send.send(request).await
    }

    pub async fn receive_all(&self, signer: &SigningAccount) -> ReceiveBatchResult {
        self.receive.receive_all(signer).await
    }
}
