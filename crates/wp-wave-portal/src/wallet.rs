use async_trait::async_trait;
use serde_json::Value;
use wp_api_types::Account;
use wp_chain_client::{ChainError, ChainResult, Eip1193, WalletProvider};

use crate::rpc;

/// [`WalletProvider`] backed by the account methods of an EIP-1193 provider.
pub struct Eip1193Wallet<P> {
    provider: P,
}

impl<P: Eip1193> Eip1193Wallet<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    async fn account_list(&self, method: &str) -> ChainResult<Vec<Account>> {
        if !self.provider.is_injected() {
            return Err(ChainError::MissingProvider);
        }
        let value = self.provider.request(method, Value::Array(Vec::new())).await?;
        let addresses: Vec<String> = rpc::decode(method, value)?;
        Ok(addresses.into_iter().map(Account).collect())
    }
}

#[async_trait(?Send)]
impl<P: Eip1193> WalletProvider for Eip1193Wallet<P> {
    fn is_present(&self) -> bool {
        self.provider.is_injected()
    }

    async fn accounts(&self) -> ChainResult<Vec<Account>> {
        self.account_list("eth_accounts").await
    }

    async fn request_accounts(&self) -> ChainResult<Vec<Account>> {
        self.account_list("eth_requestAccounts").await
    }
}
