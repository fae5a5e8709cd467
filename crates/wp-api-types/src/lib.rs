use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Address of an account authorized by the injected wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Account(pub String);

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TxHash(pub String);

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A wave as stored by the contract, before any local normalization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RawWave {
    pub waver: String,
    /// Block time in epoch seconds.
    pub timestamp: u64,
    pub message: String,
}

/// A wave ready for display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WaveRecord {
    pub sender_address: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampOutOfRange(pub u64);

impl fmt::Display for TimestampOutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch seconds {} out of range", self.0)
    }
}

impl std::error::Error for TimestampOutOfRange {}

impl TryFrom<RawWave> for WaveRecord {
    type Error = TimestampOutOfRange;

    fn try_from(raw: RawWave) -> Result<Self, Self::Error> {
        let secs = i64::try_from(raw.timestamp).map_err(|_| TimestampOutOfRange(raw.timestamp))?;
        let timestamp =
            DateTime::<Utc>::from_timestamp(secs, 0).ok_or(TimestampOutOfRange(raw.timestamp))?;
        Ok(Self {
            sender_address: raw.waver,
            timestamp,
            message: raw.message,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: TxHash,
    pub block_number: u64,
    pub success: bool,
}

/// Lifecycle of a wave submission.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    /// Idle again after the last submission failed.
    IdleAfterError,
}

impl SubmissionState {
    pub fn is_idle(self) -> bool {
        !self.is_pending()
    }

    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending)
    }
}
