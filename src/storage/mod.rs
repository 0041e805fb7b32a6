//! File system storage management
//!
//! Handles directory listing, deletion and renames.

pub mod operations;
pub mod results;

pub use operations::{delete_file, list_directory, rename_entry};
pub use results::ListResult;
