// Domain-driven module structure for the Dockhand bot.

// Core infrastructure
pub mod client;
pub mod docker;
pub mod state;

// Domain modules
pub mod auth;
pub mod bridge;
pub mod chunk;
pub mod commands;
pub mod conf;
pub mod runtime;
pub mod suggest;
