//! Error types
//!
//! Defines domain-specific error types for each area of the file manager.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Command line parsing errors
#[derive(Debug)]
pub enum CommandError {
    UnknownCommand(String),
    MissingArgument { command: &'static str, expected: usize },
    LineTooLong(usize),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::UnknownCommand(c) => write!(f, "Unknown command: {}", c),
            CommandError::MissingArgument { command, expected } => {
                write!(f, "{} expects {} argument(s)", command, expected)
            }
            CommandError::LineTooLong(len) => write!(f, "Command line too long: {} bytes", len),
        }
    }
}

impl std::error::Error for CommandError {}

/// Navigate module errors
#[derive(Debug)]
pub enum NavigateError {
    DirectoryNotFound(PathBuf),
    NotADirectory(PathBuf),
    PermissionDenied(PathBuf),
    IoError(io::Error),
}

impl fmt::Display for NavigateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigateError::DirectoryNotFound(p) => {
                write!(f, "Directory not found: {}", p.display())
            }
            NavigateError::NotADirectory(p) => write!(f, "Not a directory: {}", p.display()),
            NavigateError::PermissionDenied(p) => {
                write!(f, "Permission denied: {}", p.display())
            }
            NavigateError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for NavigateError {}

impl NavigateError {
    /// Classifies a metadata lookup failure for `path`.
    pub fn from_io(path: PathBuf, error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => NavigateError::DirectoryNotFound(path),
            io::ErrorKind::PermissionDenied => NavigateError::PermissionDenied(path),
            _ => NavigateError::IoError(error),
        }
    }
}

/// Storage module errors
#[derive(Debug)]
pub enum StorageError {
    ListFailed(PathBuf, io::Error),
    DeleteFailed(PathBuf, io::Error),
    RenameFailed {
        from: PathBuf,
        to: PathBuf,
        source: io::Error,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::ListFailed(p, e) => {
                write!(f, "Failed to list {}: {}", p.display(), e)
            }
            StorageError::DeleteFailed(p, e) => {
                write!(f, "Failed to delete {}: {}", p.display(), e)
            }
            StorageError::RenameFailed { from, to, source } => write!(
                f,
                "Failed to rename {} to {}: {}",
                from.display(),
                to.display(),
                source
            ),
        }
    }
}

impl std::error::Error for StorageError {}

/// Transfer module errors (stream-based copy, codec and digest operations)
#[derive(Debug)]
pub enum TransferError {
    OpenSource(PathBuf, io::Error),
    CreateDestination(PathBuf, io::Error),
    StreamFailed(io::Error),
    MalformedArchive(PathBuf, io::Error),
    WorkerPanicked(String),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::OpenSource(p, e) => {
                write!(f, "Cannot open source {}: {}", p.display(), e)
            }
            TransferError::CreateDestination(p, e) => {
                write!(f, "Cannot create destination {}: {}", p.display(), e)
            }
            TransferError::StreamFailed(e) => write!(f, "Stream failed: {}", e),
            TransferError::MalformedArchive(p, e) => {
                write!(f, "Malformed gzip stream in {}: {}", p.display(), e)
            }
            TransferError::WorkerPanicked(msg) => write!(f, "Worker task failed: {}", msg),
        }
    }
}

impl std::error::Error for TransferError {}

impl From<io::Error> for TransferError {
    fn from(error: io::Error) -> Self {
        TransferError::StreamFailed(error)
    }
}

/// General file manager error that encompasses all error types
#[derive(Debug)]
pub enum FileManagerError {
    Command(CommandError),
    Navigate(NavigateError),
    Storage(StorageError),
    Transfer(TransferError),
}

impl fmt::Display for FileManagerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileManagerError::Command(e) => write!(f, "Command error: {}", e),
            FileManagerError::Navigate(e) => write!(f, "Navigate error: {}", e),
            FileManagerError::Storage(e) => write!(f, "Storage error: {}", e),
            FileManagerError::Transfer(e) => write!(f, "Transfer error: {}", e),
        }
    }
}

impl std::error::Error for FileManagerError {}

impl From<CommandError> for FileManagerError {
    fn from(error: CommandError) -> Self {
        FileManagerError::Command(error)
    }
}

impl From<NavigateError> for FileManagerError {
    fn from(error: NavigateError) -> Self {
        FileManagerError::Navigate(error)
    }
}

impl From<StorageError> for FileManagerError {
    fn from(error: StorageError) -> Self {
        FileManagerError::Storage(error)
    }
}

impl From<TransferError> for FileManagerError {
    fn from(error: TransferError) -> Self {
        FileManagerError::Transfer(error)
    }
}
