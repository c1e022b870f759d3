//! Browser WebSocket greeting client
//!
//! Connects once, on page load, to `ws://<page-host>:<page-port>`, sends a
//! single `"Hello?"` greeting, and keeps the hosting page's two views in
//! sync with the connection: the content view while connected, the error
//! view otherwise. Server messages render as the page's sole heading.
//!
//! No reconnection: a dropped connection leaves the error view showing
//! until the page is reloaded.

#[cfg(target_arch = "wasm32")]
use std::cell::RefCell;
#[cfg(target_arch = "wasm32")]
use std::rc::Rc;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod core;
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod websocket_wasm;
mod ws_state;

#[cfg(target_arch = "wasm32")]
use crate::core::Session;
#[cfg(target_arch = "wasm32")]
use dom::DomPanel;
#[cfg(target_arch = "wasm32")]
use websocket_wasm::WsClient;

#[cfg(target_arch = "wasm32")]
thread_local! {
    /// Page-lifetime slot keeping the socket and its callbacks alive.
    static APP: RefCell<Option<WsClient>> = RefCell::new(None);
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    // Route tracing to the browser console
    tracing_wasm::set_as_global_default();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let url = page_socket_url(&window.location())?;

    let panel = Rc::new(RefCell::new(DomPanel::new(document)?));
    let session = Rc::new(RefCell::new(Session::new()));
    let client = WsClient::connect(&url, session, panel)?;

    APP.with(|slot| *slot.borrow_mut() = Some(client));
    Ok(())
}

/// Derive the socket URL from the hosting page: scheme fixed to `ws://`,
/// hostname and port inherited. There is no configuration surface.
#[cfg(target_arch = "wasm32")]
fn page_socket_url(location: &web_sys::Location) -> Result<String, JsValue> {
    Ok(format!("ws://{}:{}", location.hostname()?, location.port()?))
}
