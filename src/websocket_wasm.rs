//! WASM WebSocket client
//!
//! Wraps a browser WebSocket and forwards its four events into the shared
//! [`Session`], performing whatever socket action the session asks for.

use crate::core::{Action, Panel, Session, SocketEvent};
use crate::ws_state::WsState;
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{error, info, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CloseEvent, ErrorEvent, MessageEvent, WebSocket};

/// Browser WebSocket client. Created once on page load, never recreated.
pub struct WsClient {
    #[allow(dead_code)]
    ws: WebSocket,
    session: Rc<RefCell<Session>>,
}

impl WsClient {
    /// Connect to a WebSocket endpoint.
    ///
    /// Registers the four event callbacks; each runs on the page's event
    /// loop, one at a time in arrival order, and feeds the session.
    pub fn connect<P: Panel + 'static>(
        url: &str,
        session: Rc<RefCell<Session>>,
        panel: Rc<RefCell<P>>,
    ) -> Result<Self, JsValue> {
        info!(url, "Connecting to WebSocket");

        let ws = WebSocket::new(url)?;

        // On open - show the content view and send the greeting
        let ws_clone = ws.clone();
        let session_clone = session.clone();
        let panel_clone = panel.clone();
        let on_open = Closure::wrap(Box::new(move |_| {
            dispatch(&ws_clone, &session_clone, &panel_clone, SocketEvent::Open);
        }) as Box<dyn Fn(JsValue)>);
        ws.set_onopen(Some(on_open.as_ref().unchecked_ref()));
        on_open.forget();

        // On message - classify and render
        let ws_clone = ws.clone();
        let session_clone = session.clone();
        let panel_clone = panel.clone();
        let on_msg = Closure::wrap(Box::new(move |e: MessageEvent| {
            if let Ok(txt) = e.data().dyn_into::<js_sys::JsString>() {
                let raw: String = txt.into();
                dispatch(
                    &ws_clone,
                    &session_clone,
                    &panel_clone,
                    SocketEvent::Message(raw),
                );
            }
        }) as Box<dyn Fn(MessageEvent)>);
        ws.set_onmessage(Some(on_msg.as_ref().unchecked_ref()));
        on_msg.forget();

        // On error - the session asks for a close, which in turn fires
        // the close callback below
        let ws_clone = ws.clone();
        let session_clone = session.clone();
        let panel_clone = panel.clone();
        let on_err = Closure::wrap(Box::new(move |e: ErrorEvent| {
            dispatch(
                &ws_clone,
                &session_clone,
                &panel_clone,
                SocketEvent::Error(e.message()),
            );
        }) as Box<dyn Fn(ErrorEvent)>);
        ws.set_onerror(Some(on_err.as_ref().unchecked_ref()));
        on_err.forget();

        // On close - show the error view, no retry
        let ws_clone = ws.clone();
        let session_clone = session.clone();
        let panel_clone = panel.clone();
        let on_close = Closure::wrap(Box::new(move |e: CloseEvent| {
            warn!(code = e.code(), reason = %e.reason(), "WebSocket closed");
            dispatch(&ws_clone, &session_clone, &panel_clone, SocketEvent::Close);
        }) as Box<dyn Fn(CloseEvent)>);
        ws.set_onclose(Some(on_close.as_ref().unchecked_ref()));
        on_close.forget();

        Ok(Self { ws, session })
    }

    /// Get the current connection state
    #[allow(dead_code)]
    pub fn state(&self) -> WsState {
        self.session.borrow().state().clone()
    }
}

/// Feed one event to the session and perform the requested socket action.
fn dispatch<P: Panel>(
    ws: &WebSocket,
    session: &Rc<RefCell<Session>>,
    panel: &Rc<RefCell<P>>,
    event: SocketEvent,
) {
    let action = session.borrow_mut().handle(event, &mut *panel.borrow_mut());
    match action {
        Some(Action::Send(text)) => {
            if let Err(e) = ws.send_with_str(text) {
                error!(?e, "Failed to send frame");
            }
        }
        Some(Action::Close) => {
            if let Err(e) = ws.close() {
                error!(?e, "Failed to close WebSocket");
            }
        }
        None => {}
    }
}
