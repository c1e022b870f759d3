//! Shared WebSocket connection state
//!
//! Used by both the WASM browser client and the native CLI.

use std::fmt;

/// WebSocket connection state
///
/// A connection starts in `Connecting` and moves to `Connected` on open.
/// A close lands in `Disconnected`; an error lands in `Error` (the close
/// that follows an error-induced shutdown still ends in `Disconnected`).
/// There is no reconnect: a session never leaves `Disconnected`.
#[derive(Clone, Debug)]
pub enum WsState {
    Connecting,
    Connected,
    Disconnected,
    Error(String),
}

impl WsState {
    #[allow(dead_code)]
    pub fn is_connected(&self) -> bool {
        matches!(self, WsState::Connected)
    }
}

impl fmt::Display for WsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WsState::Connecting => write!(f, "connecting"),
            WsState::Connected => write!(f, "connected"),
            WsState::Disconnected => write!(f, "disconnected"),
            WsState::Error(e) => write!(f, "error: {e}"),
        }
    }
}
