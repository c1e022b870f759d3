//! Inbound frame parser
//!
//! The server speaks two kinds of text frame: the literal keepalive reply
//! `"PONG"`, and a JSON object carrying display text in its `message` field.
//! Anything else is dropped with a warning; a bad frame never affects the
//! connection or the frames after it.

use serde::Deserialize;
use tracing::{debug, warn};

/// Keepalive reply literal. Logged, otherwise ignored.
pub const PONG: &str = "PONG";

/// JSON payload carrying the text to render.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerMessage {
    /// Display text. A payload without the field renders an empty heading.
    #[serde(default)]
    pub message: String,
}

/// A classified inbound frame.
#[derive(Clone, Debug)]
pub enum Incoming {
    Pong,
    Server(ServerMessage),
}

/// Classify a raw text frame.
///
/// Returns `None` if the frame is neither `"PONG"` nor parseable JSON.
pub fn parse_message(raw: &str) -> Option<Incoming> {
    if raw == PONG {
        debug!(raw, "Keepalive reply");
        return Some(Incoming::Pong);
    }

    match serde_json::from_str::<ServerMessage>(raw) {
        Ok(msg) => {
            debug!(message = %msg.message, "Server message");
            Some(Incoming::Server(msg))
        }
        Err(e) => {
            warn!(error = %e, "Failed to parse message JSON");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pong() {
        assert!(matches!(parse_message("PONG"), Some(Incoming::Pong)));
    }

    #[test]
    fn test_parse_server_message() {
        let parsed = parse_message(r#"{"message": "Hi!"}"#);
        match parsed {
            Some(Incoming::Server(msg)) => assert_eq!(msg.message, "Hi!"),
            other => panic!("expected server message, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_field_defaults_empty() {
        let parsed = parse_message("{}");
        match parsed {
            Some(Incoming::Server(msg)) => assert_eq!(msg.message, ""),
            other => panic!("expected server message, got {other:?}"),
        }
    }

    #[test]
    fn test_extra_fields_ignored() {
        let parsed = parse_message(r#"{"message": "a", "ts": 12345}"#);
        match parsed {
            Some(Incoming::Server(msg)) => assert_eq!(msg.message, "a"),
            other => panic!("expected server message, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_json_dropped() {
        assert!(parse_message("{not json").is_none());
    }

    #[test]
    fn test_bare_string_dropped() {
        // Not PONG and not an object, so it cannot deserialize
        assert!(parse_message("\"hello\"").is_none());
        assert!(parse_message("pong").is_none());
    }
}
