//! Seams between the wave portal core and whatever chain sits behind it.
//!
//! Browser values are not `Send`, so every async trait here is declared
//! `?Send` and shared handles are `Rc`.

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;
use wp_api_types::{Account, RawWave, TxHash, TxReceipt};

/// EIP-1193 code for "user rejected the request".
pub const USER_REJECTED_CODE: i64 = 4001;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainError {
    #[error("no injected wallet provider")]
    MissingProvider,
    #[error("user rejected the request")]
    UserRejected,
    #[error("wallet exposes no authorized account")]
    NotConnected,
    #[error("transaction {tx_hash} reverted")]
    Reverted { tx_hash: TxHash },
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("transport: {0}")]
    Transport(String),
    #[error("decode: {0}")]
    Decode(String),
}

impl ChainError {
    /// Classify a JSON-RPC error object returned by the provider.
    pub fn from_rpc(code: i64, message: impl Into<String>) -> Self {
        if code == USER_REJECTED_CODE {
            Self::UserRejected
        } else {
            Self::Rpc {
                code,
                message: message.into(),
            }
        }
    }

    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::UserRejected)
    }
}

pub type ChainResult<T> = Result<T, ChainError>;

/// Request transport of an injected provider (`window.ethereum` in a browser).
#[async_trait(?Send)]
pub trait Eip1193 {
    /// Whether a provider object was actually injected.
    fn is_injected(&self) -> bool;

    async fn request(&self, method: &str, params: Value) -> ChainResult<Value>;

    /// Suspend the caller between two polls.
    async fn pause(&self, interval: Duration);
}

#[async_trait(?Send)]
impl<T: Eip1193 + ?Sized> Eip1193 for Rc<T> {
    fn is_injected(&self) -> bool {
        (**self).is_injected()
    }

    async fn request(&self, method: &str, params: Value) -> ChainResult<Value> {
        (**self).request(method, params).await
    }

    async fn pause(&self, interval: Duration) {
        (**self).pause(interval).await
    }
}

#[async_trait(?Send)]
pub trait WalletProvider {
    fn is_present(&self) -> bool;

    /// Accounts already authorized for this origin. Never prompts.
    async fn accounts(&self) -> ChainResult<Vec<Account>>;

    /// Ask the user to authorize an account. May prompt.
    async fn request_accounts(&self) -> ChainResult<Vec<Account>>;
}

/// A submitted wave transaction that has not been confirmed yet.
#[async_trait(?Send)]
pub trait PendingWave {
    fn tx_hash(&self) -> &TxHash;

    /// Block until the transaction is mined. Never times out.
    async fn wait(&self) -> ChainResult<TxReceipt>;
}

#[async_trait(?Send)]
pub trait WavePortal {
    async fn get_total_waves(&self) -> ChainResult<u64>;
    async fn get_all_waves(&self) -> ChainResult<Vec<RawWave>>;
    async fn wave(&self, message: &str) -> ChainResult<Box<dyn PendingWave>>;
}

pub type WaveHandler = Rc<dyn Fn(RawWave)>;

/// Push source of `NewWave` contract events.
pub trait WaveEvents {
    fn subscribe(&self, handler: WaveHandler) -> Subscription;
}

/// Registration guard for a [`WaveEvents`] handler.
///
/// Dropping the guard unregisters the handler.
#[must_use = "dropping a Subscription unregisters it immediately"]
pub struct Subscription {
    cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn new(cancel: impl FnOnce() + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    /// A guard with nothing to unregister.
    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.cancel.is_some())
            .finish()
    }
}
