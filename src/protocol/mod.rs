//! Command protocol
//!
//! Handles command line parsing, dispatch, and response text.

pub mod commands;
pub mod handlers;
pub mod responses;

pub use commands::{Command, CommandResult, CommandStatus, parse_command};
pub use handlers::{Dispatch, PendingOperation, handle_command};
