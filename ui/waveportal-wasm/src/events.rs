//! Event binding.
//!
//! Turns user gestures into app intents. Async intents are spawned with
//! `wasm_bindgen_futures::spawn_local`.

use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, PageTransitionEvent};
use wp_core::WavePortalApp;

use crate::dom::{self, Elements};

fn listen(
    target: &EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let cb = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref())?;
    // Listeners live as long as the page.
    cb.forget();
    Ok(())
}

/// Helper: attach an async click handler that runs an app intent.
macro_rules! on_click_async {
    ($el:expr, $app:expr, $intent:ident) => {{
        let app = $app.clone();
        listen(&$el, "click", move |_: Event| {
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                app.$intent().await;
            });
        })
    }};
}

/// Bind all UI event listeners. Call once after init.
pub fn bind_events(els: &Elements, app: &Rc<WavePortalApp>) -> Result<(), JsValue> {
    // ── Connect ──
    {
        let app = app.clone();
        listen(&els.connect_btn, "click", move |_: Event| {
            if !app.has_provider() {
                let _ = gloo_utils::window().alert_with_message("Get MetaMask!");
                return;
            }
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                app.connect().await;
            });
        })?;
    }

    // ── Message input ──
    {
        let app = app.clone();
        let input = els.message_input.clone();
        listen(&els.message_input, "input", move |_: Event| {
            app.set_draft(dom::get_input_value(&input));
        })?;
    }

    // ── Wave ──
    on_click_async!(els.wave_btn, app, submit_wave)?;

    // ── Teardown ──
    {
        let app = app.clone();
        listen(&gloo_utils::window(), "pagehide", move |_: Event| {
            debug!("page hidden; closing subscription");
            app.teardown();
        })?;
    }

    // ── Back/forward cache restore ──
    {
        let app = app.clone();
        listen(&gloo_utils::window(), "pageshow", move |event: Event| {
            let restored = event
                .dyn_ref::<PageTransitionEvent>()
                .is_some_and(PageTransitionEvent::persisted);
            if !restored {
                return;
            }
            let app = app.clone();
            wasm_bindgen_futures::spawn_local(async move {
                app.resume().await;
            });
        })?;
    }

    Ok(())
}
