//! WavePortal contract adapter.
//!
//! Talks to the deployed WavePortal contract through any [`Eip1193`]
//! transport: the injected browser wallet in production, a scripted
//! provider in tests.
//!
//! [`Eip1193`]: wp_chain_client::Eip1193

pub mod abi;
pub mod config;
pub mod contract;
pub mod events;
pub mod rpc;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{PortalConfig, WAVE_PORTAL_ADDRESS};
pub use contract::{PendingWaveTx, WavePortalContract};
pub use events::{LocalFuture, NewWaveCursor, NewWaveWatcher, Spawner};
pub use wallet::Eip1193Wallet;
