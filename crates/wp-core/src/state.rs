//! Application state and its reducer.
//!
//! `AppState` is never mutated in place: every change goes through
//! [`reduce`], which returns the next snapshot.

use wp_api_types::{Account, SubmissionState, WaveRecord};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppState {
    pub account: Option<Account>,
    pub waves: Vec<WaveRecord>,
    /// Mirrors the contract counter. Never below `waves.len()`.
    pub total_waves: u64,
    pub submission: SubmissionState,
    /// Current contents of the message input.
    pub draft: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    AccountConnected(Account),
    /// Full list reload; replaces whatever was there.
    WavesLoaded(Vec<WaveRecord>),
    /// One wave pushed by the event stream.
    WaveReceived(WaveRecord),
    TotalLoaded(u64),
    DraftChanged(String),
    SubmissionStarted,
    /// Carries the message that was mined.
    SubmissionConfirmed(String),
    SubmissionFailed,
}

pub fn reduce(state: &AppState, action: Action) -> AppState {
    let mut next = state.clone();
    match action {
        Action::AccountConnected(account) => next.account = Some(account),
        Action::WavesLoaded(waves) => next.waves = waves,
        Action::WaveReceived(wave) => next.waves.push(wave),
        Action::TotalLoaded(total) => next.total_waves = total,
        Action::DraftChanged(draft) => next.draft = draft,
        Action::SubmissionStarted => {
            if state.submission.is_idle() {
                next.submission = SubmissionState::Pending;
            }
        }
        Action::SubmissionConfirmed(message) => {
            if state.submission.is_pending() {
                next.submission = SubmissionState::Idle;
                // Text typed while mining is a new draft.
                if next.draft.trim() == message {
                    next.draft.clear();
                }
            }
        }
        Action::SubmissionFailed => {
            if state.submission.is_pending() {
                next.submission = SubmissionState::IdleAfterError;
            }
        }
    }
    // The list can run ahead of the counter (push events, duplicates).
    next.total_waves = next.total_waves.max(next.waves.len() as u64);
    next
}
