//! Pending-block receive engine.
//!
//! One pass lists the account's confirmed pending blocks and pockets them one
//! at a time. Each block chains onto the frontier the previous one produced,
//! so the loop is strictly sequential and re-reads the account before every
//! block. A failure is recorded against its block and the loop moves on; only
//! failing to list the pending blocks aborts the pass.

use nano_mcp_gateway::{NodeClient, PendingEntry};
use nano_mcp_types::{BlockHash, BlockSubtype, RawAmount, StateBlock};
use nano_mcp_work::{WorkBlockKind, WorkThresholds};
use tracing::{info, warn};

use crate::config::EngineConfig;
use crate::error::WalletError;
use crate::keys::SigningAccount;
use crate::pipeline::BlockPipeline;
use crate::results::{FailedEntry, ProcessedEntry, ReceiveBatchResult, ReceivedBlock};

#[derive(Clone)]
pub struct ReceiveEngine {
    client: NodeClient,
    pipeline: BlockPipeline,
    thresholds: WorkThresholds,
    pending_count: u64,
    pending_threshold: RawAmount,
}

impl ReceiveEngine {
    pub fn new(client: NodeClient, config: &EngineConfig) -> Self {
        Self {
            pipeline: BlockPipeline::new(client.clone(), config.work_source),
            client,
            thresholds: config.thresholds,
            pending_count: config.pending_count,
            pending_threshold: config.pending_threshold.clone(),
        }
    }

    /// Receive every pending block for `signer`'s account.
    pub async fn receive_all(&self, signer: &SigningAccount) -> ReceiveBatchResult {
        let pending = match self
            .client
            .pending(&signer.account, self.pending_count, &self.pending_threshold)
            .await
        {
            Ok(pending) => pending,
            Err(e) => {
                warn!(account = %signer.account, error = %e, "failed to list pending blocks");
                return ReceiveBatchResult::aborted(e);
            }
        };

        let mut result = ReceiveBatchResult::empty();
        if pending.is_empty() {
            return result;
        }
        info!(account = %signer.account, count = pending.len(), "receiving pending blocks");

        for entry in pending {
            match self.receive_one(signer, &entry).await {
                Ok(processed) => {
                    result.received_count += 1;
                    result.processed.push(processed);
                }
                Err((amount, e)) => {
                    warn!(
                        account = %signer.account,
                        block = %entry.hash,
                        error = %e,
                        "failed to receive pending block"
                    );
                    result.failed.push(FailedEntry {
                        hash: entry.hash,
                        amount: amount.or(entry.amount),
                        error: e.to_string(),
                    });
                }
            }
        }
        result
    }

    /// Pocket one pending block. On failure, also returns the block's amount
    /// if it was learned before the failing step.
    async fn receive_one(
        &self,
        signer: &SigningAccount,
        entry: &PendingEntry,
    ) -> Result<ProcessedEntry, (Option<RawAmount>, WalletError)> {
        let detail = self
            .client
            .block_info(&entry.hash)
            .await
            .map_err(|e| (None, e.into()))?;
        let amount = detail.amount;
        let fail = |e: WalletError| (Some(amount.clone()), e);

        let (frontier, representative, balance) = match self
            .client
            .account_info(&signer.account)
            .await
            .map_err(|e| fail(e.into()))?
        {
            Some(info) => (info.frontier, info.representative, info.balance),
            // Unopened: open block, self-represented.
            None => (BlockHash::ZERO, signer.account.clone(), RawAmount::zero()),
        };

        let new_balance = &balance + &amount;
        let request = self.thresholds.select(&frontier, &signer.public_key);
        let subtype = match request.kind {
            WorkBlockKind::Open => BlockSubtype::Open,
            WorkBlockKind::Secured => BlockSubtype::Receive,
        };
        let block = StateBlock {
            account: signer.account.clone(),
            previous: frontier,
            representative,
            balance: new_balance.clone(),
            link: entry.hash,
        };

        let (hash, _) = self
            .pipeline
            .submit(signer, block, subtype, request)
            .await
            .map_err(fail)?;

        Ok(ProcessedEntry {
            hash: entry.hash,
            amount,
            result: ReceivedBlock {
                hash,
                subtype,
                balance: new_balance,
            },
        })
    }
}
