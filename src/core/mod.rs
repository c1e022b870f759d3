//! Platform-agnostic core module - shared between the WASM client and the CLI

pub mod parser;
pub mod session;
pub mod view;

#[allow(unused_imports)]
pub use parser::{parse_message, Incoming, ServerMessage, PONG};
#[allow(unused_imports)]
pub use session::{Action, Session, SocketEvent, GREETING};
pub use view::Panel;
