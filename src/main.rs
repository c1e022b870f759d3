//! Standalone CLI for exercising the greeting session against a real server
//!
//! Run with: cargo run --features cli --bin hello-cli

#[cfg(not(target_arch = "wasm32"))]
mod core;
#[cfg(not(target_arch = "wasm32"))]
mod ws_state;

#[cfg(not(target_arch = "wasm32"))]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use crate::core::{Action, Panel, Session, SocketEvent};
    use futures_util::{SinkExt, StreamExt};
    use tokio_tungstenite::{connect_async, tungstenite::Message};
    use tracing::info;
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,hello_panel=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    // Stand-in for the browser's two containers: log the view flips,
    // print the heading text.
    struct TerminalPanel;

    impl Panel for TerminalPanel {
        fn show_content(&mut self) {
            info!("view: content");
        }

        fn show_error(&mut self) {
            info!("view: error");
        }

        fn render_heading(&mut self, text: &str) {
            println!("{text}");
        }
    }

    let url =
        std::env::var("HELLO_WS").unwrap_or_else(|_| "ws://127.0.0.1:80".to_string());

    info!(url = %url, "Connecting to server");
    let (ws_stream, _) = connect_async(&url).await?;
    let (mut write, mut read) = ws_stream.split();

    let mut session = Session::new();
    let mut panel = TerminalPanel;

    // The successful connect is the open event; the session replies with
    // the one-and-only outbound frame.
    if let Some(Action::Send(text)) = session.handle(SocketEvent::Open, &mut panel) {
        write.send(Message::Text(text.into())).await?;
    }

    while let Some(msg) = read.next().await {
        match msg {
            Ok(Message::Text(text)) => {
                session.handle(SocketEvent::Message(text), &mut panel);
            }
            Ok(Message::Close(_)) => {
                session.handle(SocketEvent::Close, &mut panel);
                break;
            }
            Err(e) => {
                let event = SocketEvent::Error(e.to_string());
                if let Some(Action::Close) = session.handle(event, &mut panel) {
                    write.close().await.ok();
                }
            }
            _ => {}
        }
    }

    // Stream ended without a close frame counts as a close too
    if !matches!(session.state(), crate::ws_state::WsState::Disconnected) {
        session.handle(SocketEvent::Close, &mut panel);
    }

    info!(state = %session.state(), "Session ended");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
