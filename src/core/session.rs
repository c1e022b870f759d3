//! Connection manager state machine
//!
//! One `Session` per socket, fed the four socket events in arrival order.
//! The session mutates the panel and tells the caller what to do with the
//! socket; it never touches the socket handle itself, so the browser
//! client, the CLI and the tests all drive identical logic.

use crate::core::parser::{parse_message, Incoming};
use crate::core::view::Panel;
use crate::ws_state::WsState;
use tracing::{error, info, warn};

/// Greeting sent once on open. Fire-and-forget: no response handler exists,
/// any reply arrives as an ordinary message.
pub const GREETING: &str = "Hello?";

/// The four socket events, in the shape both targets deliver them.
#[derive(Clone, Debug)]
pub enum SocketEvent {
    Open,
    Close,
    Error(String),
    Message(String),
}

/// Socket side effect requested by the session, performed by the caller.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Send a text frame.
    Send(&'static str),
    /// Close the socket. Requested at most once per session.
    Close,
}

/// State for a single connection. Never reused: there is no reconnect,
/// a new session only exists after a full page reload.
#[derive(Debug)]
pub struct Session {
    state: WsState,
    close_requested: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: WsState::Connecting,
            close_requested: false,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> &WsState {
        &self.state
    }

    /// React to one socket event.
    ///
    /// Events are handled strictly one at a time in arrival order; the
    /// browser event loop and the CLI read loop both guarantee that.
    pub fn handle(&mut self, event: SocketEvent, panel: &mut impl Panel) -> Option<Action> {
        match event {
            SocketEvent::Open => {
                info!("WebSocket connected");
                self.state = WsState::Connected;
                panel.show_content();
                Some(Action::Send(GREETING))
            }
            SocketEvent::Close => {
                warn!("WebSocket closed");
                self.state = WsState::Disconnected;
                panel.show_error();
                // No retry is scheduled: the UI stays on the error view
                // until a page reload.
                None
            }
            SocketEvent::Error(msg) => {
                error!(error = %msg, "WebSocket error");
                self.state = WsState::Error(msg);
                // The error itself does not flip the views; the close it
                // triggers does. Request the close once only.
                if self.close_requested {
                    None
                } else {
                    self.close_requested = true;
                    Some(Action::Close)
                }
            }
            SocketEvent::Message(raw) => {
                match parse_message(&raw) {
                    Some(Incoming::Pong) => {}
                    Some(Incoming::Server(msg)) => panel.render_heading(&msg.message),
                    // Unparseable frame: already logged, this message just
                    // fails to render.
                    None => {}
                }
                None
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records panel mutations so event sequences can be asserted on.
    #[derive(Default)]
    struct RecordingPanel {
        error_hidden: Option<bool>,
        content_hidden: Option<bool>,
        heading: Option<String>,
        renders: usize,
    }

    impl Panel for RecordingPanel {
        fn show_content(&mut self) {
            self.error_hidden = Some(true);
            self.content_hidden = Some(false);
        }

        fn show_error(&mut self) {
            self.error_hidden = Some(false);
            self.content_hidden = Some(true);
        }

        fn render_heading(&mut self, text: &str) {
            self.heading = Some(text.to_string());
            self.renders += 1;
        }
    }

    impl RecordingPanel {
        fn assert_complementary(&self) {
            let (e, c) = (self.error_hidden, self.content_hidden);
            assert_eq!(e.map(|h| !h), c, "views must stay complementary");
        }
    }

    fn msg(raw: &str) -> SocketEvent {
        SocketEvent::Message(raw.to_string())
    }

    #[test]
    fn test_open_shows_content_and_greets() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        let action = session.handle(SocketEvent::Open, &mut panel);
        assert_eq!(action, Some(Action::Send("Hello?")));
        assert_eq!(panel.error_hidden, Some(true));
        assert_eq!(panel.content_hidden, Some(false));
        assert!(session.state().is_connected());
        panel.assert_complementary();
    }

    #[test]
    fn test_close_shows_error_view() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Open, &mut panel);
        let action = session.handle(SocketEvent::Close, &mut panel);
        assert_eq!(action, None);
        assert_eq!(panel.error_hidden, Some(false));
        assert_eq!(panel.content_hidden, Some(true));
        assert!(!session.state().is_connected());
        panel.assert_complementary();
    }

    #[test]
    fn test_untouched_before_first_event() {
        let session = Session::new();
        let panel = RecordingPanel::default();
        // Initial visibility belongs to the markup, not to us.
        assert_eq!(panel.error_hidden, None);
        assert_eq!(panel.content_hidden, None);
        assert!(matches!(session.state(), WsState::Connecting));
    }

    #[test]
    fn test_error_requests_close_exactly_once() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Open, &mut panel);
        let first = session.handle(SocketEvent::Error("refused".into()), &mut panel);
        assert_eq!(first, Some(Action::Close));

        let second = session.handle(SocketEvent::Error("again".into()), &mut panel);
        assert_eq!(second, None);
    }

    #[test]
    fn test_error_alone_leaves_views_untouched() {
        // The error handler only logs and closes; the close event that
        // follows is what flips the views.
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Error("refused".into()), &mut panel);
        assert_eq!(panel.error_hidden, None);
        assert_eq!(panel.content_hidden, None);

        session.handle(SocketEvent::Close, &mut panel);
        assert_eq!(panel.error_hidden, Some(false));
        assert_eq!(panel.content_hidden, Some(true));
        assert_eq!(panel.heading, None);
        panel.assert_complementary();
    }

    #[test]
    fn test_pong_never_touches_content() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Open, &mut panel);
        session.handle(msg("PONG"), &mut panel);
        assert_eq!(panel.renders, 0);
        assert_eq!(panel.heading, None);
    }

    #[test]
    fn test_message_renders_heading() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Open, &mut panel);
        session.handle(msg(r#"{"message": "hi"}"#), &mut panel);
        assert_eq!(panel.renders, 1);
        assert_eq!(panel.heading.as_deref(), Some("hi"));
    }

    #[test]
    fn test_second_message_replaces_heading() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Open, &mut panel);
        session.handle(msg(r#"{"message": "a"}"#), &mut panel);
        session.handle(msg(r#"{"message": "b"}"#), &mut panel);
        // One heading slot, latest text wins.
        assert_eq!(panel.heading.as_deref(), Some("b"));
        assert_eq!(panel.renders, 2);
    }

    #[test]
    fn test_malformed_message_skipped_later_ones_render() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Open, &mut panel);
        session.handle(msg("{broken"), &mut panel);
        assert_eq!(panel.renders, 0);
        assert!(session.state().is_connected());

        session.handle(msg(r#"{"message": "ok"}"#), &mut panel);
        assert_eq!(panel.heading.as_deref(), Some("ok"));
    }

    #[test]
    fn test_missing_field_renders_empty_heading() {
        let mut session = Session::new();
        let mut panel = RecordingPanel::default();

        session.handle(SocketEvent::Open, &mut panel);
        session.handle(msg("{}"), &mut panel);
        assert_eq!(panel.heading.as_deref(), Some(""));
    }

    #[test]
    fn test_event_sequences_keep_views_complementary() {
        let sequences: &[&[SocketEvent]] = &[
            &[SocketEvent::Open, SocketEvent::Close],
            &[SocketEvent::Open, SocketEvent::Error(String::new()), SocketEvent::Close],
            &[SocketEvent::Open, SocketEvent::Close, SocketEvent::Open],
            &[SocketEvent::Error(String::new()), SocketEvent::Close],
        ];

        for seq in sequences {
            let mut session = Session::new();
            let mut panel = RecordingPanel::default();
            for ev in seq.iter() {
                session.handle(ev.clone(), &mut panel);
                panel.assert_complementary();
            }
        }
    }
}
