//! Wave submission: Idle -> Pending -> Idle | IdleAfterError.

use std::rc::Rc;
use tracing::{error, info, warn};
use wp_api_types::TxReceipt;
use wp_chain_client::{ChainError, ChainResult, WavePortal};

use crate::state::Action;
use crate::store::Store;
use crate::sync::WaveListSync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    EmptyMessage,
    AlreadyPending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Rejected before anything was sent.
    Skipped(SkipReason),
    Confirmed(TxReceipt),
    Failed(ChainError),
}

#[derive(Clone)]
pub struct WaveSubmissionFlow {
    portal: Rc<dyn WavePortal>,
    sync: WaveListSync,
    store: Store,
}

impl WaveSubmissionFlow {
    pub fn new(portal: Rc<dyn WavePortal>, sync: WaveListSync, store: Store) -> Self {
        Self {
            portal,
            sync,
            store,
        }
    }

    /// Send `message` and wait for it to be mined, however long that takes.
    ///
    /// Disabling the submit control while pending is up to the caller; a
    /// second submit in that window is skipped.
    pub async fn submit(&self, message: &str) -> SubmitOutcome {
        let message = message.trim();
        if message.is_empty() {
            warn!("refusing to wave an empty message");
            return SubmitOutcome::Skipped(SkipReason::EmptyMessage);
        }
        if self.store.with(|s| s.submission.is_pending()) {
            warn!("a wave is already being mined");
            return SubmitOutcome::Skipped(SkipReason::AlreadyPending);
        }

        self.store.dispatch(Action::SubmissionStarted);

        match self.send_and_confirm(message).await {
            Ok(receipt) => {
                self.sync.refresh_total().await;
                self.sync.refresh().await;
                self.store.dispatch(Action::SubmissionConfirmed(message.to_owned()));
                SubmitOutcome::Confirmed(receipt)
            }
            Err(err) => {
                if err.is_user_rejection() {
                    warn!("user rejected the wave transaction");
                } else {
                    error!(%err, "wave failed");
                }
                self.store.dispatch(Action::SubmissionFailed);
                SubmitOutcome::Failed(err)
            }
        }
    }

    async fn send_and_confirm(&self, message: &str) -> ChainResult<TxReceipt> {
        let pending = self.portal.wave(message).await?;
        info!(tx_hash = %pending.tx_hash(), "mining");
        let receipt = pending.wait().await?;
        info!(tx_hash = %receipt.tx_hash, block = receipt.block_number, "mined");
        Ok(receipt)
    }
}
