//! Error handlers
//!
//! Converts errors into the single user-facing outcome line.

use crate::error::types::FileManagerError;
use crate::protocol::responses::{INVALID_INPUT, OPERATION_FAILED};
use log::{error, warn};

/// Log a file manager error with its detailed cause
pub fn handle_error(err: &FileManagerError) {
    match err {
        FileManagerError::Command(_) => warn!("Rejected command: {}", err),
        _ => error!("File manager error: {}", err),
    }
}

/// Convert error to the message shown to the user
pub fn error_to_message(err: &FileManagerError) -> &'static str {
    match err {
        FileManagerError::Command(_) => INVALID_INPUT,
        FileManagerError::Navigate(_) => OPERATION_FAILED,
        FileManagerError::Storage(_) => OPERATION_FAILED,
        FileManagerError::Transfer(_) => OPERATION_FAILED,
    }
}
