//! Quiz server module.
//!
//! Hosts a single quiz session over WebSocket for one remote client.

mod host;
mod server;

pub use host::Host;
pub use server::run;
