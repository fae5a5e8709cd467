//! Platform-neutral core of the wave portal front-end.
//!
//! Owns the application state and the three flows that change it:
//! wallet connection, wave list sync and wave submission. Rendering and
//! the concrete chain transport live elsewhere.

pub mod app;
pub mod gateway;
pub mod state;
pub mod store;
pub mod submission;
pub mod sync;

#[cfg(test)]
pub(crate) mod testing;

pub use app::{Services, WavePortalApp};
pub use state::{Action, AppState, reduce};
pub use store::Store;
pub use submission::{SkipReason, SubmitOutcome};
