//! Live `NewWave` delivery by log polling.

use std::cell::Cell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use tracing::{debug, warn};
use wp_api_types::RawWave;
use wp_chain_client::{ChainResult, Eip1193, Subscription, WaveEvents, WaveHandler};

use crate::contract::WavePortalContract;

pub type LocalFuture = Pin<Box<dyn Future<Output = ()>>>;

/// Runs a future on the current thread's executor.
pub type Spawner = Rc<dyn Fn(LocalFuture)>;

/// Tracks the next block whose `NewWave` logs have not been delivered.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NewWaveCursor {
    next_block: Option<u64>,
}

impl NewWaveCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_block(&self) -> Option<u64> {
        self.next_block
    }

    /// Fetch waves emitted since the previous poll.
    ///
    /// The first poll of a fresh cursor only records the chain head, so
    /// history already covered by a full refresh is not replayed.
    pub async fn poll<P: Eip1193 + 'static>(
        &mut self,
        contract: &WavePortalContract<P>,
    ) -> ChainResult<Vec<RawWave>> {
        let head = contract.block_number().await?;
        let Some(from) = self.next_block else {
            self.next_block = Some(head + 1);
            return Ok(Vec::new());
        };
        if head < from {
            return Ok(Vec::new());
        }

        let waves = contract.new_wave_logs(from, head).await?;
        self.next_block = Some(head + 1);
        Ok(waves)
    }
}

/// [`WaveEvents`] source that polls the contract's logs in a spawned task.
pub struct NewWaveWatcher<P> {
    contract: Rc<WavePortalContract<P>>,
    spawner: Spawner,
}

impl<P: Eip1193 + 'static> NewWaveWatcher<P> {
    pub fn new(contract: Rc<WavePortalContract<P>>, spawner: Spawner) -> Self {
        Self { contract, spawner }
    }
}

impl<P: Eip1193 + 'static> WaveEvents for NewWaveWatcher<P> {
    fn subscribe(&self, handler: WaveHandler) -> Subscription {
        let active = Rc::new(Cell::new(true));
        let task = watch(self.contract.clone(), handler, active.clone());
        (self.spawner)(Box::pin(task));
        Subscription::new(move || active.set(false))
    }
}

async fn watch<P: Eip1193 + 'static>(
    contract: Rc<WavePortalContract<P>>,
    handler: WaveHandler,
    active: Rc<Cell<bool>>,
) {
    let interval = contract.config().event_poll_interval;
    let mut cursor = NewWaveCursor::new();

    while active.get() {
        match cursor.poll(&contract).await {
            Ok(waves) => {
                for wave in waves {
                    // Unsubscribed while the request was in flight.
                    if !active.get() {
                        break;
                    }
                    handler(wave);
                }
            }
            Err(err) => warn!(%err, "NewWave poll failed"),
        }
        contract.provider().pause(interval).await;
    }
    debug!("NewWave watcher stopped");
}
