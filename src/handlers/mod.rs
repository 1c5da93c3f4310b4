//! Command Handlers module
//!
//! Slash command parsing and execution.
//! The handler coordinates authorization, the allow-list store and the REST API.

mod commands;
mod role_handler;


pub use commands::*;
pub use role_handler::CommandHandler;
