//! User-facing response text
//!
//! Fixed messages and formatters for the lines printed by the session.

use std::path::Path;

pub const INVALID_INPUT: &str = "Invalid input";
pub const OPERATION_FAILED: &str = "Operation failed";

pub fn greeting(username: &str) -> String {
    format!("Welcome to the File Manager, {}!", username)
}

pub fn farewell(username: &str) -> String {
    format!("Thank you for using File Manager, {}, goodbye!", username)
}

pub fn current_directory(dir: &Path) -> String {
    format!("You are currently in {}", dir.display())
}
