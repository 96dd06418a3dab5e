//! Send engine: one send block from an opened account.

use nano_mcp_crypto::parse_account;
use nano_mcp_gateway::NodeClient;
use nano_mcp_types::{Account, BlockHash, BlockSubtype, PublicKey, RawAmount, StateBlock};
use nano_mcp_work::WorkThresholds;
use tracing::warn;

use crate::config::EngineConfig;
use crate::error::WalletError;
use crate::keys::SigningAccount;
use crate::pipeline::BlockPipeline;
use crate::results::TransactionResult;

/// A validated send: every field has been parsed and the key checked.
#[derive(Debug)]
pub struct SendRequest {
    pub from: SigningAccount,
    pub to: Account,
    pub to_public_key: PublicKey,
    pub amount: RawAmount,
}

impl SendRequest {
    pub fn new(
        from_address: &str,
        private_key: &str,
        to_address: &str,
        amount: RawAmount,
    ) -> Result<Self, WalletError> {
        let from = SigningAccount::new(from_address, private_key)?;
        let (to, to_public_key) = parse_account(to_address)?;
        if amount.is_zero() {
            return Err(WalletError::InvalidAmount("amount must be greater than zero".into()));
        }
        Ok(Self {
            from,
            to,
            to_public_key,
            amount,
        })
    }
}

#[derive(Clone)]
pub struct SendEngine {
    client: NodeClient,
    pipeline: BlockPipeline,
    thresholds: WorkThresholds,
}

impl SendEngine {
    pub fn new(client: NodeClient, config: &EngineConfig) -> Self {
        Self {
            pipeline: BlockPipeline::new(client.clone(), config.work_source),
            client,
            thresholds: config.thresholds,
        }
    }

    /// Send `request.amount` raw. Any failure after validation is reported in
    /// the result; nothing is partially applied.
    pub async fn send(&self, request: &SendRequest) -> TransactionResult {
        match self.try_send(request).await {
            Ok(hash) => TransactionResult::succeeded(hash),
            Err(e) => {
                warn!(
                    from = %request.from.account,
                    to = %request.to,
                    amount = %request.amount,
                    error = %e,
                    "send failed"
                );
                TransactionResult::failed(e)
            }
        }
    }

    async fn try_send(&self, request: &SendRequest) -> Result<BlockHash, WalletError> {
        let signer = &request.from;
        let info = self
            .client
            .account_info(&signer.account)
            .await?
            .ok_or(WalletError::NoPreviousBlocks)?;

        let new_balance = info.balance.checked_sub(&request.amount).ok_or_else(|| {
            WalletError::InsufficientBalance {
                needed: request.amount.clone(),
                available: info.balance.clone(),
            }
        })?;

        let work_request = self.thresholds.select(&info.frontier, &signer.public_key);
        let block = StateBlock {
            account: signer.account.clone(),
            previous: info.frontier,
            representative: info.representative,
            balance: new_balance,
            link: BlockHash::new(request.to_public_key.0),
        };
        let (hash, _) = self
            .pipeline
            .submit(signer, block, BlockSubtype::Send, work_request)
            .await?;
        Ok(hash)
    }
}
