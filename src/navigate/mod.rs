//! Navigate module
//!
//! Handles path resolution against the working directory and the
//! existence checks behind `cd`.

mod operations;
mod resolver;

// Re-export public types and functions
pub use operations::change_directory;
pub use resolver::{normalize, parent_of, resolve_path};
