//! Navigation operations implementation

use crate::error::NavigateError;
use log::info;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Verifies that `target` is an existing directory and returns it.
///
/// `target` must already be resolved; the caller commits it to the
/// working directory only on success.
pub async fn change_directory(target: &Path) -> Result<PathBuf, NavigateError> {
    let metadata = fs::metadata(target)
        .await
        .map_err(|e| NavigateError::from_io(target.to_path_buf(), e))?;

    if !metadata.is_dir() {
        return Err(NavigateError::NotADirectory(target.to_path_buf()));
    }

    info!("Changed directory to {}", target.display());
    Ok(target.to_path_buf())
}
