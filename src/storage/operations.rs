//! Storage operations
//!
//! Handles file system operations for the `ls`, `rm`, `move` and `rn` commands.

use log::{debug, error, info};
use std::path::Path;
use tokio::fs;

use crate::error::StorageError;
use crate::storage::results::ListResult;

/// Lists the contents of a directory
///
/// Only directories and regular files are reported. Symbolic links and
/// special files are skipped. Each group is sorted byte-wise.
pub async fn list_directory(dir: &Path) -> Result<ListResult, StorageError> {
    let list_failed = |e| StorageError::ListFailed(dir.to_path_buf(), e);

    let mut entries = fs::read_dir(dir).await.map_err(|e| {
        error!("Failed to list directory {}: {}", dir.display(), e);
        list_failed(e)
    })?;

    let mut result = ListResult::default();
    while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
        let name = entry.file_name().to_string_lossy().to_string();
        match entry.file_type().await {
            Ok(file_type) if file_type.is_dir() => result.directories.push(name),
            Ok(file_type) if file_type.is_file() => result.files.push(name),
            Ok(_) => debug!("Skipping special entry {}", name),
            Err(e) => debug!("Skipping {} (no file type: {})", name, e),
        }
    }

    result.directories.sort();
    result.files.sort();

    info!(
        "Listed directory {} - {} directories, {} files",
        dir.display(),
        result.directories.len(),
        result.files.len()
    );

    Ok(result)
}

/// Deletes a file
pub async fn delete_file(file_path: &Path) -> Result<(), StorageError> {
    match fs::remove_file(file_path).await {
        Ok(()) => {
            info!("Deleted file {}", file_path.display());
            Ok(())
        }
        Err(e) => {
            error!("Failed to delete file {}: {}", file_path.display(), e);
            Err(StorageError::DeleteFailed(file_path.to_path_buf(), e))
        }
    }
}

/// Renames `from` to `to`; backs both `move` and `rn`.
pub async fn rename_entry(from: &Path, to: &Path) -> Result<(), StorageError> {
    match fs::rename(from, to).await {
        Ok(()) => {
            info!("Renamed {} to {}", from.display(), to.display());
            Ok(())
        }
        Err(e) => {
            error!(
                "Failed to rename {} to {}: {}",
                from.display(),
                to.display(),
                e
            );
            Err(StorageError::RenameFailed {
                from: from.to_path_buf(),
                to: to.to_path_buf(),
                source: e,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as stdfs;

    #[tokio::test]
    async fn lists_directories_before_files_each_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["zeta", "Alpha", "beta"] {
            stdfs::create_dir(dir.path().join(name)).unwrap();
        }
        for name in ["b.txt", "A.txt", "a.txt"] {
            stdfs::write(dir.path().join(name), "x").unwrap();
        }

        let listing = list_directory(dir.path()).await.unwrap();

        assert_eq!(listing.directories, vec!["Alpha", "beta", "zeta"]);
        assert_eq!(listing.files, vec!["A.txt", "a.txt", "b.txt"]);
        let all: Vec<&str> = listing.entries().collect();
        assert_eq!(
            all,
            vec!["Alpha", "beta", "zeta", "A.txt", "a.txt", "b.txt"]
        );
    }

    #[tokio::test]
    async fn listing_empty_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let listing = list_directory(dir.path()).await.unwrap();
        assert!(listing.is_empty());
    }

    #[tokio::test]
    async fn listing_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("plain.txt");
        stdfs::write(&file, "x").unwrap();
        assert!(matches!(
            list_directory(&file).await,
            Err(StorageError::ListFailed(..))
        ));
    }

    #[tokio::test]
    async fn delete_removes_file_and_rejects_directories() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("gone.txt");
        stdfs::write(&file, "x").unwrap();

        delete_file(&file).await.unwrap();
        assert!(!file.exists());

        assert!(delete_file(&file).await.is_err());
        assert!(delete_file(dir.path()).await.is_err());
    }

    #[tokio::test]
    async fn rename_moves_contents() {
        let dir = tempfile::tempdir().unwrap();
        let from = dir.path().join("old.txt");
        let to = dir.path().join("new.txt");
        stdfs::write(&from, "payload").unwrap();

        rename_entry(&from, &to).await.unwrap();

        assert!(!from.exists());
        assert_eq!(stdfs::read_to_string(&to).unwrap(), "payload");
        assert!(matches!(
            rename_entry(&from, &to).await,
            Err(StorageError::RenameFailed { .. })
        ));
    }
}
