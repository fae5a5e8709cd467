//! EIP-1193 transport over the `window.ethereum` object injected by the
//! wallet extension.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::{Value, json};
use std::time::Duration;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use wp_chain_client::{ChainError, ChainResult, Eip1193};

#[wasm_bindgen]
extern "C" {
    /// The injected provider object.
    #[derive(Clone, Debug)]
    pub type EthereumProvider;

    #[wasm_bindgen(method, catch)]
    fn request(this: &EthereumProvider, args: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

pub struct InjectedProvider {
    inner: Option<EthereumProvider>,
}

impl InjectedProvider {
    /// Look up `window.ethereum`. A missing object is not an error here;
    /// every request then fails with `MissingProvider`.
    pub fn detect() -> Self {
        let window = gloo_utils::window();
        let inner = js_sys::Reflect::get(&window, &JsValue::from_str("ethereum"))
            .ok()
            .filter(|value| !value.is_undefined() && !value.is_null())
            .map(|value| value.unchecked_into::<EthereumProvider>());
        Self { inner }
    }
}

fn to_js(value: &Value) -> ChainResult<JsValue> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| ChainError::Transport(format!("encoding request: {e}")))
}

fn provider_error(err: JsValue) -> ChainError {
    let field = |name: &str| js_sys::Reflect::get(&err, &JsValue::from_str(name)).ok();
    let code = field("code").and_then(|v| v.as_f64());
    let message = field("message")
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));
    match code {
        Some(code) => ChainError::from_rpc(code as i64, message),
        None => ChainError::Transport(message),
    }
}

#[async_trait(?Send)]
impl Eip1193 for InjectedProvider {
    fn is_injected(&self) -> bool {
        self.inner.is_some()
    }

    async fn request(&self, method: &str, params: Value) -> ChainResult<Value> {
        let provider = self.inner.as_ref().ok_or(ChainError::MissingProvider)?;
        let args = to_js(&json!({ "method": method, "params": params }))?;
        let promise = provider.request(&args).map_err(provider_error)?;
        let result = JsFuture::from(promise).await.map_err(provider_error)?;
        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ChainError::Decode(format!("{method} result: {e}")))
    }

    async fn pause(&self, interval: Duration) {
        gloo_timers::future::sleep(interval).await;
    }
}
