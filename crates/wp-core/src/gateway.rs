//! Wallet detection and account authorization.

use std::rc::Rc;
use tracing::{error, info, warn};
use wp_api_types::Account;
use wp_chain_client::{ChainError, WalletProvider};

use crate::state::Action;
use crate::store::Store;

#[derive(Clone)]
pub struct WalletGateway {
    wallet: Rc<dyn WalletProvider>,
    store: Store,
}

impl WalletGateway {
    pub fn new(wallet: Rc<dyn WalletProvider>, store: Store) -> Self {
        Self { wallet, store }
    }

    pub fn has_provider(&self) -> bool {
        self.wallet.is_present()
    }

    /// Pick up an already-authorized account, prompting only when there is none.
    pub async fn check_connection(&self) -> Option<Account> {
        if !self.wallet.is_present() {
            warn!("no injected wallet provider; install MetaMask to continue");
            return None;
        }

        match self.wallet.accounts().await {
            Ok(accounts) => {
                if let Some(account) = accounts.into_iter().next() {
                    info!(%account, "found an authorized account");
                    self.store.dispatch(Action::AccountConnected(account.clone()));
                    return Some(account);
                }
                info!("no authorized account found");
            }
            Err(err) => {
                error!(%err, "reading authorized accounts failed");
                return None;
            }
        }

        self.connect().await
    }

    /// Ask the wallet to authorize an account. Failures are logged, never retried.
    pub async fn connect(&self) -> Option<Account> {
        if !self.wallet.is_present() {
            warn!("cannot connect: no injected wallet provider");
            return None;
        }

        match self.wallet.request_accounts().await {
            Ok(accounts) => match accounts.into_iter().next() {
                Some(account) => {
                    info!(%account, "wallet connected");
                    self.store.dispatch(Action::AccountConnected(account.clone()));
                    Some(account)
                }
                None => {
                    warn!("wallet granted access but returned no account");
                    None
                }
            },
            Err(ChainError::UserRejected) => {
                warn!("user rejected the connection request");
                None
            }
            Err(err) => {
                error!(%err, "connecting wallet failed");
                None
            }
        }
    }
}
