//! Event bridge — relays filtered Docker lifecycle events to the chat
//! channel, decoupled from command handling.

pub mod filter;
pub mod forward;
pub mod relay;

pub use forward::run;
