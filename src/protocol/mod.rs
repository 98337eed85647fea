mod messages;

pub use messages::{ClientMessage, ServerMessage, SessionView, DEFAULT_PORT};
