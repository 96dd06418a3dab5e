//! The tail every mutating operation shares: obtain work, sign, submit.

use nano_mcp_gateway::NodeClient;
use nano_mcp_types::{BlockHash, BlockSubtype, SignedBlock, StateBlock, WorkNonce};
use nano_mcp_work::{format_difficulty, WorkGenerator, WorkRequest};
use tracing::{debug, info};

use crate::config::WorkSource;
use crate::error::WalletError;
use crate::keys::SigningAccount;
use crate::signer::sign_block;

#[derive(Clone)]
pub(crate) struct BlockPipeline {
    client: NodeClient,
    work_source: WorkSource,
}

impl BlockPipeline {
    pub(crate) fn new(client: NodeClient, work_source: WorkSource) -> Self {
        Self {
            client,
            work_source,
        }
    }

    /// Proof-of-work for `request`, from the node or the local CPU.
    pub(crate) async fn work(&self, request: WorkRequest) -> Result<WorkNonce, WalletError> {
        debug!(
            root = %request.root,
            difficulty = %format_difficulty(request.difficulty),
            source = ?self.work_source,
            "requesting work"
        );
        match self.work_source {
            WorkSource::Node => Ok(self
                .client
                .work_generate(&request.root, request.difficulty)
                .await?),
            WorkSource::Local => {
                let root = request.root;
                tokio::task::spawn_blocking(move || {
                    WorkGenerator.generate(&root, request.difficulty)
                })
                .await
                .map_err(|e| WalletError::Other(format!("work task failed: {e}")))?
                .map_err(WalletError::from)
            }
        }
    }

    /// Obtain work for `request`, sign `block` as `subtype`, and submit it.
    pub(crate) async fn submit(
        &self,
        signer: &SigningAccount,
        block: StateBlock,
        subtype: BlockSubtype,
        request: WorkRequest,
    ) -> Result<(BlockHash, SignedBlock), WalletError> {
        let work = self.work(request).await?;
        let signed = sign_block(block, work, signer, subtype)?;
        let hash = self.client.process(&signed).await?;
        info!(
            account = %signed.block.account,
            %subtype,
            %hash,
            balance = %signed.block.balance,
            "block processed"
        );
        Ok((hash, signed))
    }
}
