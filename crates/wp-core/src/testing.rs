//! In-memory wallet, contract and event source for core tests.

use async_trait::async_trait;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wp_api_types::{Account, RawWave, TxHash, TxReceipt};
use wp_chain_client::{
    ChainError, ChainResult, PendingWave, Subscription, WalletProvider, WaveEvents, WaveHandler,
    WavePortal,
};

pub(crate) fn raw(waver: &str, timestamp: u64, message: &str) -> RawWave {
    RawWave {
        waver: waver.to_owned(),
        timestamp,
        message: message.to_owned(),
    }
}

pub(crate) struct FakeWallet {
    present: bool,
    pub authorized: RefCell<Vec<Account>>,
    pub grant: RefCell<ChainResult<Vec<Account>>>,
    pub accounts_error: RefCell<Option<ChainError>>,
    pub account_reads: Cell<usize>,
    pub prompts: Cell<usize>,
}

impl FakeWallet {
    pub fn injected() -> Self {
        Self::with_presence(true)
    }

    pub fn absent() -> Self {
        Self::with_presence(false)
    }

    fn with_presence(present: bool) -> Self {
        Self {
            present,
            authorized: RefCell::new(Vec::new()),
            grant: RefCell::new(Ok(Vec::new())),
            accounts_error: RefCell::new(None),
            account_reads: Cell::new(0),
            prompts: Cell::new(0),
        }
    }

    pub fn requests(&self) -> usize {
        self.account_reads.get() + self.prompts.get()
    }
}

#[async_trait(?Send)]
impl WalletProvider for FakeWallet {
    fn is_present(&self) -> bool {
        self.present
    }

    async fn accounts(&self) -> ChainResult<Vec<Account>> {
        self.account_reads.set(self.account_reads.get() + 1);
        if !self.present {
            return Err(ChainError::MissingProvider);
        }
        if let Some(err) = self.accounts_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.authorized.borrow().clone())
    }

    async fn request_accounts(&self) -> ChainResult<Vec<Account>> {
        self.prompts.set(self.prompts.get() + 1);
        if !self.present {
            return Err(ChainError::MissingProvider);
        }
        self.grant.borrow().clone()
    }
}

/// Contract double. A successful `wave` appends to the stored list, like
/// the deployed contract does once the transaction is mined.
#[derive(Default)]
pub(crate) struct FakePortal {
    pub waves: Rc<RefCell<Vec<RawWave>>>,
    pub total_error: RefCell<Option<ChainError>>,
    pub list_error: RefCell<Option<ChainError>>,
    pub send_error: RefCell<Option<ChainError>>,
    pub mine_error: RefCell<Option<ChainError>>,
    pub total_reads: Cell<usize>,
    pub list_reads: Cell<usize>,
    pub sends: Cell<usize>,
}

impl FakePortal {
    pub fn with_waves(waves: Vec<RawWave>) -> Self {
        let portal = Self::default();
        *portal.waves.borrow_mut() = waves;
        portal
    }
}

#[async_trait(?Send)]
impl WavePortal for FakePortal {
    async fn get_total_waves(&self) -> ChainResult<u64> {
        self.total_reads.set(self.total_reads.get() + 1);
        if let Some(err) = self.total_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.waves.borrow().len() as u64)
    }

    async fn get_all_waves(&self) -> ChainResult<Vec<RawWave>> {
        self.list_reads.set(self.list_reads.get() + 1);
        if let Some(err) = self.list_error.borrow().clone() {
            return Err(err);
        }
        Ok(self.waves.borrow().clone())
    }

    async fn wave(&self, message: &str) -> ChainResult<Box<dyn PendingWave>> {
        self.sends.set(self.sends.get() + 1);
        if let Some(err) = self.send_error.borrow().clone() {
            return Err(err);
        }
        let tx_hash = TxHash(format!("0x{:04x}", self.sends.get()));
        Ok(Box::new(FakePending {
            tx_hash,
            outcome: self.mine_error.borrow().clone(),
            waves: self.waves.clone(),
            mined: raw("0xme", 1_700_000_500, message),
        }))
    }
}

struct FakePending {
    tx_hash: TxHash,
    outcome: Option<ChainError>,
    waves: Rc<RefCell<Vec<RawWave>>>,
    mined: RawWave,
}

#[async_trait(?Send)]
impl PendingWave for FakePending {
    fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    async fn wait(&self) -> ChainResult<TxReceipt> {
        if let Some(err) = self.outcome.clone() {
            return Err(err);
        }
        self.waves.borrow_mut().push(self.mined.clone());
        Ok(TxReceipt {
            tx_hash: self.tx_hash.clone(),
            block_number: 1,
            success: true,
        })
    }
}

#[derive(Default)]
pub(crate) struct FakeEvents {
    handler: Rc<RefCell<Option<WaveHandler>>>,
    pub subscribes: Cell<usize>,
}

impl FakeEvents {
    /// Deliver an event to the current subscriber, if any.
    pub fn emit(&self, wave: RawWave) {
        let handler = self.handler.borrow().clone();
        if let Some(handler) = handler {
            handler(wave);
        }
    }

    pub fn is_subscribed(&self) -> bool {
        self.handler.borrow().is_some()
    }
}

impl WaveEvents for FakeEvents {
    fn subscribe(&self, handler: WaveHandler) -> Subscription {
        self.subscribes.set(self.subscribes.get() + 1);
        *self.handler.borrow_mut() = Some(handler);
        let slot = self.handler.clone();
        Subscription::new(move || {
            slot.borrow_mut().take();
        })
    }
}
