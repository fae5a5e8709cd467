use alloy_primitives::{Address, address};
use anyhow::{Context, Result};
use std::time::Duration;

/// Address of the deployed WavePortal contract.
pub const WAVE_PORTAL_ADDRESS: Address = address!("473a62c4c93D70FDdCE91eCDB48aFA008A4eB836");

const RECEIPT_POLL_MS: u64 = 1_500;
const EVENT_POLL_MS: u64 = 4_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    pub contract_address: Address,
    /// Delay between two `eth_getTransactionReceipt` polls.
    pub receipt_poll_interval: Duration,
    /// Delay between two `NewWave` log polls.
    pub event_poll_interval: Duration,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            contract_address: WAVE_PORTAL_ADDRESS,
            receipt_poll_interval: Duration::from_millis(RECEIPT_POLL_MS),
            event_poll_interval: Duration::from_millis(EVENT_POLL_MS),
        }
    }
}

impl PortalConfig {
    /// Point the adapter at another deployment, e.g. a local devnet.
    pub fn with_contract(mut self, address: &str) -> Result<Self> {
        self.contract_address = address
            .trim()
            .parse()
            .with_context(|| format!("invalid contract address {address:?}"))?;
        Ok(self)
    }
}
