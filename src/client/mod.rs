//! Quiz client module.
//!
//! Line-oriented WebSocket client for a hosted quiz session.

mod client;
mod commands;
mod render;

pub use client::run;
pub use commands::{parse_command, LineCommand};
pub use render::format_message;
