//! WASM bindings for running the reading aids inside a browser.
//!
//! Pages go in and come out as HTML strings; settings and messages use the
//! same JSON the extension stores and sends.

use wasm_bindgen::prelude::*;

use crate::dom::{Scope, parse_html};
use crate::message::Message;
use crate::session::Session;
use crate::settings::{Config, Settings};
use crate::transform::{Mode, Transformer, transform, transform_scoped};

/// Install the panic hook and route `log` output to the browser console.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // Fails only when a logger is already installed.
    let _ = console_log::init_with_level(log::Level::Info);
}

fn js_err(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Run one text transform (`"bionic"` or `"syllable"`) over an HTML page.
///
/// With a `selector`, only matching elements are rewritten.
#[wasm_bindgen]
pub fn transform_html(html: &str, mode: &str, selector: Option<String>) -> Result<String, JsValue> {
    let mode: Mode = mode.parse().map_err(js_err)?;
    let mut doc = parse_html(html);
    let transformer = Transformer::default();

    match selector {
        Some(selector) => {
            let scope = Scope::parse(&selector).map_err(js_err)?;
            transform_scoped(&mut doc, &scope, mode, &transformer);
        }
        None => {
            let body = doc.body().ok_or_else(|| js_err("document has no body"))?;
            transform(&mut doc, body, mode, &transformer);
        }
    }

    doc.to_html().map_err(js_err)
}

/// Restore stored settings, then apply a JSON array of messages in order.
///
/// Messages that fail to decode or apply are logged and skipped. Returns the
/// resulting page.
#[wasm_bindgen]
pub fn apply_messages(
    html: &str,
    settings_json: &str,
    messages_json: &str,
    hostname: Option<String>,
) -> Result<String, JsValue> {
    let settings = Settings::from_json(settings_json).map_err(js_err)?;
    let messages: Vec<serde_json::Value> = serde_json::from_str(messages_json).map_err(js_err)?;

    let mut session = Session::new(parse_html(html), Config::default());
    if let Some(hostname) = hostname {
        session = session.with_hostname(hostname);
    }
    session.restore(&settings);

    for value in messages {
        let applied = serde_json::from_value::<Message>(value)
            .map_err(|e| crate::Error::Message(e.to_string()))
            .and_then(|message| session.apply(message));
        if let Err(e) = applied {
            log::warn!("ignoring message: {e}");
        }
    }

    session.to_html().map_err(js_err)
}
