//! DOM element bindings.
//!
//! All fields are resolved once at startup from the static page markup.

use wasm_bindgen::prelude::*;
use web_sys::{Element, HtmlButtonElement, HtmlInputElement};

// ── Helpers ──

pub fn by_id(id: &str) -> Option<Element> {
    gloo_utils::document().get_element_by_id(id)
}

pub fn by_id_typed<T: JsCast>(id: &str) -> Option<T> {
    by_id(id).and_then(|e| e.dyn_into::<T>().ok())
}

pub fn set_text(el: &Element, text: &str) {
    if el.text_content().as_deref() != Some(text) {
        el.set_text_content(Some(text));
    }
}

pub fn set_inner_html(el: &Element, html: &str) {
    el.set_inner_html(html);
}

pub fn toggle_class(el: &Element, cls: &str, force: bool) {
    let _ = el.class_list().toggle_with_force(cls, force);
}

pub fn get_input_value(el: &HtmlInputElement) -> String {
    el.value()
}

/// Only writes when the value differs, so typing does not move the caret.
pub fn sync_input_value(el: &HtmlInputElement, val: &str) {
    if el.value() != val {
        el.set_value(val);
    }
}

// ── Elements struct ──

/// Clone-friendly (all inner types are reference-counted via JS GC).
#[derive(Clone)]
pub struct Elements {
    pub loader: Element,
    pub connect_btn: HtmlButtonElement,
    pub account_label: Element,
    pub total_waves: Element,
    pub message_input: HtmlInputElement,
    pub wave_btn: HtmlButtonElement,
    pub wave_list: Element,
}

macro_rules! get_el {
    ($id:expr) => {
        by_id($id).ok_or_else(|| JsValue::from_str(&format!("missing element #{}", $id)))?
    };
}

macro_rules! get_typed {
    ($ty:ty, $id:expr) => {
        by_id_typed::<$ty>($id).ok_or_else(|| {
            JsValue::from_str(&format!("missing {} #{}", stringify!($ty), $id))
        })?
    };
}

impl Elements {
    /// Resolve all DOM references. Call once after the document is parsed.
    pub fn bind() -> Result<Elements, JsValue> {
        Ok(Elements {
            loader: get_el!("loader"),
            connect_btn: get_typed!(HtmlButtonElement, "connectBtn"),
            account_label: get_el!("accountLabel"),
            total_waves: get_el!("totalWaves"),
            message_input: get_typed!(HtmlInputElement, "messageInput"),
            wave_btn: get_typed!(HtmlButtonElement, "waveBtn"),
            wave_list: get_el!("waveList"),
        })
    }
}
