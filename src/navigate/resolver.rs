//! Lexical path resolution
//!
//! Pure functions: nothing here touches the filesystem.

use std::path::{Component, Path, PathBuf};

/// Resolves user input against `base`.
///
/// Absolute input is normalized and returned; relative input is joined to
/// `base` first. `..` never climbs above the root.
pub fn resolve_path(base: &Path, input: &str) -> PathBuf {
    let candidate = Path::new(input);
    if candidate.is_absolute() {
        normalize(candidate)
    } else {
        normalize(&base.join(candidate))
    }
}

/// Collapses `.` and `..` components without consulting the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => {
                normalized.push(component.as_os_str())
            }
            Component::CurDir => {}
            Component::ParentDir => {
                // At the root this is a no-op
                normalized.pop();
            }
            Component::Normal(part) => normalized.push(part),
        }
    }
    normalized
}

/// Lexical parent of `path`; a root is its own parent.
pub fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn relative_input_is_joined_to_base() {
        let base = Path::new("/home/alice");
        assert_eq!(
            resolve_path(base, "docs/notes.txt"),
            PathBuf::from("/home/alice/docs/notes.txt")
        );
        assert_eq!(resolve_path(base, "."), PathBuf::from("/home/alice"));
    }

    #[test]
    fn absolute_input_ignores_base() {
        let base = Path::new("/home/alice");
        assert_eq!(resolve_path(base, "/etc/hosts"), PathBuf::from("/etc/hosts"));
        assert_eq!(
            resolve_path(base, "/var/./log/../tmp"),
            PathBuf::from("/var/tmp")
        );
    }

    #[test]
    fn dot_segments_collapse() {
        let base = Path::new("/home/alice");
        assert_eq!(
            resolve_path(base, "./a/./b/../c"),
            PathBuf::from("/home/alice/a/c")
        );
        assert_eq!(resolve_path(base, "../bob"), PathBuf::from("/home/bob"));
        assert_eq!(resolve_path(base, "a//b/"), PathBuf::from("/home/alice/a/b"));
    }

    #[test]
    fn parent_segments_stop_at_root() {
        let base = Path::new("/home");
        assert_eq!(resolve_path(base, "../../../.."), PathBuf::from("/"));
        assert_eq!(resolve_path(base, "../../etc"), PathBuf::from("/etc"));
    }

    #[test]
    fn resolved_paths_are_absolute() {
        let base = Path::new("/srv/data");
        for input in ["x", "../y", "./z/..", "a/b/c", ".."] {
            assert!(resolve_path(base, input).is_absolute(), "{input}");
        }
    }

    #[test]
    fn parent_of_root_is_root() {
        assert_eq!(parent_of(Path::new("/")), PathBuf::from("/"));
        assert_eq!(parent_of(Path::new("/home")), PathBuf::from("/"));
        assert_eq!(parent_of(Path::new("/home/alice")), PathBuf::from("/home"));
    }
}
