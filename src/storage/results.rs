//! Storage result types
//!
//! Defines result structures returned by storage operations.

/// Result of a directory listing operation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListResult {
    pub directories: Vec<String>,
    pub files: Vec<String>,
}

impl ListResult {
    /// Directories first, then files, each group already sorted.
    pub fn entries(&self) -> impl Iterator<Item = &str> {
        self.directories
            .iter()
            .chain(self.files.iter())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty() && self.files.is_empty()
    }
}
