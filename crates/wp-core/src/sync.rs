//! Keeps the local wave list and counter in step with the contract.

use std::rc::Rc;
use tracing::{debug, error, warn};
use wp_api_types::{RawWave, WaveRecord};
use wp_chain_client::WavePortal;

use crate::state::Action;
use crate::store::Store;

#[derive(Clone)]
pub struct WaveListSync {
    portal: Rc<dyn WavePortal>,
    store: Store,
}

impl WaveListSync {
    pub fn new(portal: Rc<dyn WavePortal>, store: Store) -> Self {
        Self { portal, store }
    }

    /// Reload every wave and replace the local list wholesale.
    ///
    /// On failure the previous list stays on screen.
    pub async fn refresh(&self) {
        let raw = match self.portal.get_all_waves().await {
            Ok(raw) => raw,
            Err(err) => {
                error!(%err, "fetching waves failed");
                return;
            }
        };

        match raw.into_iter().map(WaveRecord::try_from).collect::<Result<Vec<_>, _>>() {
            Ok(waves) => {
                debug!(count = waves.len(), "waves loaded");
                self.store.dispatch(Action::WavesLoaded(waves));
            }
            Err(err) => error!(%err, "decoding waves failed"),
        }
    }

    pub async fn refresh_total(&self) {
        match self.portal.get_total_waves().await {
            Ok(total) => {
                debug!(total, "retrieved total wave count");
                self.store.dispatch(Action::TotalLoaded(total));
            }
            Err(err) => error!(%err, "fetching total wave count failed"),
        }
    }

    /// Append a pushed wave. Not checked against waves already listed.
    pub fn on_new_wave_event(&self, raw: RawWave) {
        match WaveRecord::try_from(raw) {
            Ok(wave) => self.store.dispatch(Action::WaveReceived(wave)),
            Err(err) => warn!(%err, "dropping undecodable NewWave event"),
        }
    }
}
