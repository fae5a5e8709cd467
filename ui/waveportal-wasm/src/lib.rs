//! WavePortal WASM Frontend
//!
//! Connects the injected wallet, lists every wave stored on the portal
//! contract and lets the connected account send new ones.

pub mod config;
pub mod dom;
pub mod ethereum;
pub mod events;
pub mod logging;
pub mod view;

use std::rc::Rc;
use tracing::{info, warn};
use wasm_bindgen::prelude::*;
use wp_core::{Services, WavePortalApp};
use wp_wave_portal::{Eip1193Wallet, LocalFuture, NewWaveWatcher, Spawner, WavePortalContract};

use crate::config::UiConfig;
use crate::ethereum::InjectedProvider;

/// WASM entry point – called automatically when the module is instantiated.
#[wasm_bindgen(start)]
pub async fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    init().await
}

async fn init() -> Result<(), JsValue> {
    let search = gloo_utils::window().location().search().unwrap_or_default();
    let (config, config_err) = match UiConfig::from_query(&search) {
        Ok(config) => (config, None),
        Err(err) => (UiConfig::default(), Some(err)),
    };
    logging::init(&config.log_filter);
    if let Some(err) = config_err {
        warn!("ignoring page parameters: {err:#}");
    }

    let els = dom::Elements::bind()?;

    let provider = Rc::new(InjectedProvider::detect());
    let contract = Rc::new(WavePortalContract::new(
        provider.clone(),
        config.portal.clone(),
    ));
    let spawner: Spawner = Rc::new(|task: LocalFuture| wasm_bindgen_futures::spawn_local(task));
    let app = Rc::new(WavePortalApp::new(Services {
        wallet: Rc::new(Eip1193Wallet::new(provider)),
        portal: contract.clone(),
        events: Rc::new(NewWaveWatcher::new(contract, spawner)),
    }));
    info!(contract = %config.portal.contract_address, "wave portal ready");

    let renderer = Rc::new(view::Renderer::new(els.clone()));
    {
        let renderer = renderer.clone();
        app.store().listen(move |state| renderer.render(state));
    }
    renderer.render(&app.store().snapshot());

    events::bind_events(&els, &app)?;

    app.mount().await;

    Ok(())
}
