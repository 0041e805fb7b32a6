//! Session management
//!
//! Owns the working directory, console output and the command loop
//! lifecycle from greeting to farewell.

pub mod console;
pub mod core;
pub mod input;
pub mod signals;
pub mod state;

pub use console::Console;
pub use core::{Session, SessionReport, Termination};
pub use signals::shutdown_signal;
pub use state::WorkingDirectory;
