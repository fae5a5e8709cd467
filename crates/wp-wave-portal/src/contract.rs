use alloy_primitives::hex;
use alloy_sol_types::{SolCall, SolEvent};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info, warn};
use wp_api_types::{RawWave, TxHash, TxReceipt};
use wp_chain_client::{ChainError, ChainResult, Eip1193, PendingWave, WavePortal};

use crate::abi::{self, NewWave, getAllWavesCall, getTotalWavesCall, waveCall};
use crate::config::PortalConfig;
use crate::rpc::{self, RpcLog, RpcReceipt};

/// Typed handle to the WavePortal contract.
///
/// Reads go through `eth_call`; `wave` is signed and broadcast by the
/// provider itself via `eth_sendTransaction`.
pub struct WavePortalContract<P> {
    provider: Rc<P>,
    config: PortalConfig,
}

impl<P: Eip1193 + 'static> WavePortalContract<P> {
    pub fn new(provider: Rc<P>, config: PortalConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub(crate) fn provider(&self) -> &P {
        &self.provider
    }

    fn ensure_provider(&self) -> ChainResult<()> {
        if self.provider.is_injected() {
            Ok(())
        } else {
            Err(ChainError::MissingProvider)
        }
    }

    async fn call<C: SolCall>(&self, call: C) -> ChainResult<C::Return> {
        self.ensure_provider()?;
        let params = json!([
            {
                "to": self.config.contract_address,
                "data": hex::encode_prefixed(call.abi_encode()),
            },
            "latest"
        ]);
        let value = self.provider.request("eth_call", params).await?;
        let raw: String = rpc::decode("eth_call", value)?;
        let bytes = rpc::parse_bytes(&raw)?;
        C::abi_decode_returns(&bytes, true)
            .map_err(|e| ChainError::Decode(format!("{}: {e}", C::SIGNATURE)))
    }

    /// First authorized account; the provider signs with it.
    async fn sender(&self) -> ChainResult<String> {
        let value = self
            .provider
            .request("eth_accounts", Value::Array(Vec::new()))
            .await?;
        let accounts: Vec<String> = rpc::decode("eth_accounts", value)?;
        accounts.into_iter().next().ok_or(ChainError::NotConnected)
    }

    pub async fn block_number(&self) -> ChainResult<u64> {
        self.ensure_provider()?;
        let value = self
            .provider
            .request("eth_blockNumber", Value::Array(Vec::new()))
            .await?;
        let raw: String = rpc::decode("eth_blockNumber", value)?;
        rpc::parse_quantity(&raw)
    }

    /// `NewWave` events emitted in `from..=to`, in log order.
    pub async fn new_wave_logs(&self, from: u64, to: u64) -> ChainResult<Vec<RawWave>> {
        self.ensure_provider()?;
        let params = json!([{
            "address": self.config.contract_address,
            "topics": [NewWave::SIGNATURE_HASH],
            "fromBlock": rpc::quantity(from),
            "toBlock": rpc::quantity(to),
        }]);
        let value = self.provider.request("eth_getLogs", params).await?;
        let logs: Vec<RpcLog> = rpc::decode("eth_getLogs", value)?;

        let mut waves = Vec::with_capacity(logs.len());
        for log in logs {
            match decode_new_wave(&log) {
                Ok(wave) => waves.push(wave),
                Err(err) => warn!(%err, "skipping undecodable NewWave log"),
            }
        }
        Ok(waves)
    }
}

fn decode_new_wave(log: &RpcLog) -> ChainResult<RawWave> {
    let data = rpc::parse_bytes(&log.data)?;
    let event = NewWave::decode_raw_log(log.topics.iter().copied(), &data, true)
        .map_err(|e| ChainError::Decode(format!("NewWave: {e}")))?;
    RawWave::try_from(event)
}

#[async_trait(?Send)]
impl<P: Eip1193 + 'static> WavePortal for WavePortalContract<P> {
    async fn get_total_waves(&self) -> ChainResult<u64> {
        let total = self.call(getTotalWavesCall {}).await?;
        abi::to_u64(total._0, "total waves")
    }

    async fn get_all_waves(&self) -> ChainResult<Vec<RawWave>> {
        let waves = self.call(getAllWavesCall {}).await?;
        waves._0.into_iter().map(RawWave::try_from).collect()
    }

    async fn wave(&self, message: &str) -> ChainResult<Box<dyn PendingWave>> {
        self.ensure_provider()?;
        let from = self.sender().await?;
        let call = waveCall {
            message: message.to_owned(),
        };
        let params = json!([{
            "from": from,
            "to": self.config.contract_address,
            "data": hex::encode_prefixed(call.abi_encode()),
        }]);
        let value = self.provider.request("eth_sendTransaction", params).await?;
        let tx_hash = TxHash(rpc::decode("eth_sendTransaction", value)?);
        info!(%tx_hash, "wave transaction broadcast");

        Ok(Box::new(PendingWaveTx {
            provider: self.provider.clone(),
            tx_hash,
            poll_interval: self.config.receipt_poll_interval,
        }))
    }
}

/// A broadcast `wave` transaction awaiting its receipt.
pub struct PendingWaveTx<P> {
    provider: Rc<P>,
    tx_hash: TxHash,
    poll_interval: Duration,
}

#[async_trait(?Send)]
impl<P: Eip1193> PendingWave for PendingWaveTx<P> {
    fn tx_hash(&self) -> &TxHash {
        &self.tx_hash
    }

    async fn wait(&self) -> ChainResult<TxReceipt> {
        loop {
            let value = self
                .provider
                .request("eth_getTransactionReceipt", json!([self.tx_hash.0]))
                .await?;
            if !value.is_null() {
                let receipt: RpcReceipt = rpc::decode("eth_getTransactionReceipt", value)?;
                if let Some(block) = receipt.block_number.as_deref() {
                    let block_number = rpc::parse_quantity(block)?;
                    let success = receipt.status.as_deref() == Some("0x1");
                    if !success {
                        return Err(ChainError::Reverted {
                            tx_hash: self.tx_hash.clone(),
                        });
                    }
                    info!(tx_hash = %self.tx_hash, block_number, "wave transaction mined");
                    return Ok(TxReceipt {
                        tx_hash: self.tx_hash.clone(),
                        block_number,
                        success,
                    });
                }
            }
            debug!(tx_hash = %self.tx_hash, "receipt not available yet");
            self.provider.pause(self.poll_interval).await;
        }
    }
}
