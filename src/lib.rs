//! RAX File Manager
//!
//! An interactive shell for navigating the filesystem and running basic
//! file operations against a single working directory.

pub mod config;
pub mod error;
pub mod navigate;
pub mod protocol;
pub mod session;
pub mod storage;
pub mod system;
pub mod transfer;

pub use config::FileManagerConfig;
pub use session::{Console, Session, SessionReport, Termination};
