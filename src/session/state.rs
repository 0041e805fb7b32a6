//! Module `state`
//!
//! Defines the `WorkingDirectory` cursor every command resolves paths against.

use std::path::{Path, PathBuf};

use crate::navigate::{normalize, parent_of, resolve_path};

/// The session's current directory.
///
/// Always absolute. It names a directory that existed at the last
/// successful `cd`; `up` may move it somewhere that does not exist, in which
/// case later operations simply fail.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkingDirectory {
    current: PathBuf,
}

impl WorkingDirectory {
    /// Starts at `start`, which must be absolute.
    pub fn new(start: impl Into<PathBuf>) -> Self {
        let start = start.into();
        debug_assert!(start.is_absolute(), "working directory must be absolute");
        Self {
            current: normalize(&start),
        }
    }

    /// Returns the present working directory.
    pub fn current(&self) -> &Path {
        &self.current
    }

    /// Resolves user input against the current directory.
    pub fn resolve(&self, input: &str) -> PathBuf {
        resolve_path(&self.current, input)
    }

    /// Moves to the lexical parent. A no-op at the root.
    pub fn move_to_parent(&mut self) {
        self.current = parent_of(&self.current);
    }

    /// Unconditionally replaces the current directory.
    ///
    /// Callers verify the target is an existing directory first.
    pub fn set_to(&mut self, path: PathBuf) {
        self.current = path;
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn up_moves_to_parent() {
        let mut cwd = WorkingDirectory::new("/home/alice");
        cwd.move_to_parent();
        assert_eq!(cwd.current(), Path::new("/home"));
        cwd.move_to_parent();
        assert_eq!(cwd.current(), Path::new("/"));
    }

    #[test]
    fn up_at_root_is_idempotent() {
        let mut cwd = WorkingDirectory::new("/");
        cwd.move_to_parent();
        cwd.move_to_parent();
        assert_eq!(cwd.current(), Path::new("/"));
    }

    #[test]
    fn resolve_uses_current_directory() {
        let mut cwd = WorkingDirectory::new("/srv/data");
        assert_eq!(cwd.resolve("a.txt"), PathBuf::from("/srv/data/a.txt"));

        cwd.set_to(PathBuf::from("/tmp"));
        assert_eq!(cwd.resolve("a.txt"), PathBuf::from("/tmp/a.txt"));
        assert_eq!(cwd.resolve("/etc/hosts"), PathBuf::from("/etc/hosts"));
    }

    #[test]
    fn start_path_is_normalized() {
        let cwd = WorkingDirectory::new("/home/alice/../bob/.");
        assert_eq!(cwd.current(), Path::new("/home/bob"));
    }
}
