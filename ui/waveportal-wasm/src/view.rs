//! Rendering.
//!
//! [`ViewModel::from`] is a pure projection of the app state; [`Renderer`]
//! writes it into the bound elements.

use std::cell::RefCell;
use wp_api_types::WaveRecord;
use wp_core::AppState;

use crate::dom::{self, Elements};

const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S UTC";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveEntry {
    pub address: String,
    pub time: String,
    pub message: String,
}

impl From<&WaveRecord> for WaveEntry {
    fn from(wave: &WaveRecord) -> Self {
        Self {
            address: wave.sender_address.clone(),
            time: wave.timestamp.format(TIME_FORMAT).to_string(),
            message: wave.message.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub show_connect: bool,
    pub account_label: String,
    pub total_label: String,
    pub draft: String,
    pub wave_disabled: bool,
    pub loader_visible: bool,
    pub entries: Vec<WaveEntry>,
}

impl From<&AppState> for ViewModel {
    fn from(state: &AppState) -> Self {
        let pending = state.submission.is_pending();
        Self {
            show_connect: state.account.is_none(),
            account_label: match &state.account {
                Some(account) => format!("Connected: {}", shorten(&account.0, 6, 4)),
                None => "Not connected".to_owned(),
            },
            total_label: format!("Total Waves: {}", state.total_waves),
            draft: state.draft.clone(),
            wave_disabled: pending || state.account.is_none(),
            loader_visible: pending,
            entries: state.waves.iter().map(WaveEntry::from).collect(),
        }
    }
}

pub fn shorten(s: &str, head: usize, tail: usize) -> String {
    if s.len() <= head + tail + 3 || !s.is_ascii() {
        return s.to_owned();
    }
    format!("{}...{}", &s[..head], &s[s.len() - tail..])
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn wave_list_html(entries: &[WaveEntry]) -> String {
    entries
        .iter()
        .map(|entry| {
            format!(
                r#"<div class="wave-card"><div>Address: {}</div><div>Time: {}</div><div>Message: {}</div></div>"#,
                escape_html(&entry.address),
                escape_html(&entry.time),
                escape_html(&entry.message),
            )
        })
        .collect()
}

/// Whether the wave list markup must be rebuilt for `next`.
pub fn list_changed(prev: Option<&ViewModel>, next: &ViewModel) -> bool {
    prev.is_none_or(|prev| prev.entries != next.entries)
}

/// Applies view models to the DOM, remembering the last one so the wave
/// list is only rewritten when its entries change.
pub struct Renderer {
    els: Elements,
    last: RefCell<Option<ViewModel>>,
}

impl Renderer {
    pub fn new(els: Elements) -> Self {
        Self {
            els,
            last: RefCell::new(None),
        }
    }

    /// Bring the DOM in line with `state`.
    pub fn render(&self, state: &AppState) {
        let vm = ViewModel::from(state);
        let els = &self.els;

        dom::toggle_class(&els.loader, "hidden", !vm.loader_visible);
        dom::toggle_class(&els.connect_btn, "hidden", !vm.show_connect);
        dom::set_text(&els.account_label, &vm.account_label);
        dom::set_text(&els.total_waves, &vm.total_label);
        dom::sync_input_value(&els.message_input, &vm.draft);
        els.wave_btn.set_disabled(vm.wave_disabled);

        let mut last = self.last.borrow_mut();
        if list_changed(last.as_ref(), &vm) {
            dom::set_inner_html(&els.wave_list, &wave_list_html(&vm.entries));
        }
        *last = Some(vm);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use wp_api_types::{Account, SubmissionState};

    fn record(message: &str) -> WaveRecord {
        WaveRecord {
            sender_address: "0xabc".to_owned(),
            timestamp: DateTime::from_timestamp(1_700_000_000, 0).expect("valid"),
            message: message.to_owned(),
        }
    }

    #[test]
    fn disconnected_state_offers_connect_and_blocks_waving() {
        let vm = ViewModel::from(&AppState::default());

        assert!(vm.show_connect);
        assert!(vm.wave_disabled);
        assert!(!vm.loader_visible);
        assert_eq!(vm.total_label, "Total Waves: 0");
    }

    #[test]
    fn pending_submission_shows_loader_and_disables_button() {
        let state = AppState {
            account: Some(Account("0x473a62c4c93D70FDdCE91eCDB48aFA008A4eB836".into())),
            submission: SubmissionState::Pending,
            waves: vec![record("hi")],
            total_waves: 1,
            ..AppState::default()
        };

        let vm = ViewModel::from(&state);

        assert!(!vm.show_connect);
        assert!(vm.wave_disabled);
        assert!(vm.loader_visible);
        assert_eq!(vm.account_label, "Connected: 0x473a...B836");
        assert_eq!(
            vm.entries,
            vec![WaveEntry {
                address: "0xabc".to_owned(),
                time: "Tue Nov 14 2023 22:13:20 UTC".to_owned(),
                message: "hi".to_owned(),
            }]
        );
    }

    #[test]
    fn list_markup_escapes_user_text() {
        let entries = vec![WaveEntry::from(&record("<img src=x onerror=alert(1)>"))];

        let html = wave_list_html(&entries);

        assert!(html.contains("Message: &lt;img src=x onerror=alert(1)&gt;"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn short_values_are_not_shortened() {
        assert_eq!(shorten("0xabc", 6, 4), "0xabc");
    }

    #[test]
    fn typing_does_not_rebuild_the_list() {
        let state = AppState {
            waves: vec![record("hi")],
            ..AppState::default()
        };
        let before = ViewModel::from(&state);
        let typed = ViewModel::from(&AppState {
            draft: "g".to_owned(),
            ..state.clone()
        });
        let pushed = ViewModel::from(&AppState {
            waves: vec![record("hi"), record("yo")],
            ..state
        });

        assert!(list_changed(None, &before));
        assert!(!list_changed(Some(&before), &typed));
        assert!(list_changed(Some(&typed), &pushed));
    }
}
