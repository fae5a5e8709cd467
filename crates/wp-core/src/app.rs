//! Top-level wiring of gateway, list sync, submission flow and the live
//! event subscription.

use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info};
use wp_api_types::{Account, RawWave};
use wp_chain_client::{Subscription, WalletProvider, WaveEvents, WavePortal};

use crate::gateway::WalletGateway;
use crate::state::Action;
use crate::store::Store;
use crate::submission::{SubmitOutcome, WaveSubmissionFlow};
use crate::sync::WaveListSync;

/// Everything the app needs from the outside world.
#[derive(Clone)]
pub struct Services {
    pub wallet: Rc<dyn WalletProvider>,
    pub portal: Rc<dyn WavePortal>,
    pub events: Rc<dyn WaveEvents>,
}

pub struct WavePortalApp {
    store: Store,
    gateway: WalletGateway,
    sync: WaveListSync,
    flow: WaveSubmissionFlow,
    events: Rc<dyn WaveEvents>,
    subscription: RefCell<Option<Subscription>>,
}

impl WavePortalApp {
    pub fn new(services: Services) -> Self {
        let store = Store::new();
        let gateway = WalletGateway::new(services.wallet, store.clone());
        let sync = WaveListSync::new(services.portal.clone(), store.clone());
        let flow = WaveSubmissionFlow::new(services.portal, sync.clone(), store.clone());
        Self {
            store,
            gateway,
            sync,
            flow,
            events: services.events,
            subscription: RefCell::new(None),
        }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn has_provider(&self) -> bool {
        self.gateway.has_provider()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.borrow().is_some()
    }

    /// Page load: reuse an authorized account or prompt for one.
    pub async fn mount(&self) {
        if let Some(account) = self.gateway.check_connection().await {
            self.on_connected(&account).await;
        }
    }

    /// Explicit connect intent from the user.
    pub async fn connect(&self) {
        if let Some(account) = self.gateway.connect().await {
            self.on_connected(&account).await;
        }
    }

    pub fn set_draft(&self, draft: impl Into<String>) {
        self.store.dispatch(Action::DraftChanged(draft.into()));
    }

    /// Wave with the current draft.
    pub async fn submit_wave(&self) -> SubmitOutcome {
        let draft = self.store.with(|s| s.draft.clone());
        self.flow.submit(&draft).await
    }

    pub async fn refresh(&self) {
        self.sync.refresh_total().await;
        self.sync.refresh().await;
    }

    /// Unregister the live subscription. Safe to call more than once.
    pub fn teardown(&self) {
        if self.subscription.borrow_mut().take().is_some() {
            info!("wave subscription closed");
        }
    }

    /// Page restored from the back/forward cache after a teardown: catch
    /// up on missed waves and listen again. No-op without an account.
    pub async fn resume(&self) {
        if self.is_subscribed() {
            return;
        }
        let Some(account) = self.store.with(|s| s.account.clone()) else {
            return;
        };
        info!(%account, "resuming after page restore");
        self.on_connected(&account).await;
    }

    async fn on_connected(&self, account: &Account) {
        debug!(%account, "loading waves for connected account");
        self.sync.refresh().await;
        self.sync.refresh_total().await;
        self.subscribe();
    }

    fn subscribe(&self) {
        // Old guard goes first so it cannot unregister the new handler.
        self.teardown();
        let sync = self.sync.clone();
        let subscription = self
            .events
            .subscribe(Rc::new(move |raw: RawWave| sync.on_new_wave_event(raw)));
        *self.subscription.borrow_mut() = Some(subscription);
        info!("subscribed to NewWave events");
    }
}

impl Drop for WavePortalApp {
    fn drop(&mut self) {
        self.teardown();
    }
}
