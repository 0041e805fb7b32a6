//! Command handlers module for the RAX file manager.
//!
//! One handler per command. Path arguments are resolved against the working
//! directory here, at dispatch time, so an operation keeps its absolute
//! paths even if the directory changes while it is still running.

use log::{debug, info};
use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;

use crate::navigate::change_directory;
use crate::protocol::responses::current_directory;
use crate::protocol::{Command, CommandResult, CommandStatus};
use crate::session::WorkingDirectory;
use crate::storage::{delete_file, list_directory, rename_entry};
use crate::system::OsInfo;
use crate::transfer::{TransferSettings, compress_file, copy_file, decompress_file, hash_file};

/// A filesystem operation whose paths are already resolved.
pub type PendingOperation = Pin<Box<dyn Future<Output = CommandResult> + Send + 'static>>;

/// What the session should do with a dispatched command.
pub enum Dispatch {
    /// The command finished during dispatch.
    Done(CommandResult),
    /// The command must be driven to completion off the command loop.
    Pending(PendingOperation),
}

/// Dispatches a parsed command to its handler.
///
/// `cd` is awaited here because it mutates the working directory; every
/// other filesystem command comes back as `Dispatch::Pending`.
pub async fn handle_command(
    cwd: &mut WorkingDirectory,
    command: Command,
    settings: TransferSettings,
) -> Dispatch {
    debug!("Dispatching {:?} in {}", command, cwd.current().display());

    match command {
        Command::Exit => Dispatch::Done(CommandResult {
            status: CommandStatus::Exit,
            message: None,
        }),
        Command::Empty => Dispatch::Done(CommandResult::silent()),
        Command::Up => Dispatch::Done(handle_cmd_up(cwd)),
        Command::Cd(dir) => Dispatch::Done(handle_cmd_cd(cwd, &dir).await),
        Command::OsInfo => Dispatch::Done(handle_cmd_os_info()),
        Command::Ls => pending(handle_cmd_ls(cwd.current().to_path_buf())),
        Command::Copy(src, dest) => {
            let paths = (cwd.resolve(&src), cwd.resolve(&dest));
            pending(handle_cmd_copy(paths, src, dest, settings))
        }
        Command::Move(src, dest) => {
            let paths = (cwd.resolve(&src), cwd.resolve(&dest));
            pending(handle_cmd_move(paths, src, dest))
        }
        Command::Rm(file) => pending(handle_cmd_rm(cwd.resolve(&file), file)),
        Command::Rn(old, new) => {
            let paths = (cwd.resolve(&old), cwd.resolve(&new));
            pending(handle_cmd_rn(paths, old, new))
        }
        Command::Compress(src, dest) => {
            let paths = (cwd.resolve(&src), cwd.resolve(&dest));
            pending(handle_cmd_compress(paths, src, dest, settings))
        }
        Command::Decompress(src, dest) => {
            let paths = (cwd.resolve(&src), cwd.resolve(&dest));
            pending(handle_cmd_decompress(paths, src, dest, settings))
        }
        Command::Hash(file) => pending(handle_cmd_hash(cwd.resolve(&file), file, settings)),
    }
}

fn pending<F>(operation: F) -> Dispatch
where
    F: Future<Output = CommandResult> + Send + 'static,
{
    Dispatch::Pending(Box::pin(operation))
}

/// Handles `up`: never fails and never touches the filesystem.
fn handle_cmd_up(cwd: &mut WorkingDirectory) -> CommandResult {
    cwd.move_to_parent();
    info!("Moved up to {}", cwd.current().display());
    CommandResult::success(current_directory(cwd.current()))
}

/// Handles `cd`: commits the new directory only after it checks out.
async fn handle_cmd_cd(cwd: &mut WorkingDirectory, dir: &str) -> CommandResult {
    let target = cwd.resolve(dir);
    match change_directory(&target).await {
        Ok(new_dir) => {
            cwd.set_to(new_dir);
            CommandResult::success(current_directory(cwd.current()))
        }
        Err(e) => CommandResult::from_error(e),
    }
}

fn handle_cmd_os_info() -> CommandResult {
    CommandResult::success(OsInfo::collect().render())
}

async fn handle_cmd_ls(dir: PathBuf) -> CommandResult {
    match list_directory(&dir).await {
        Ok(listing) if listing.is_empty() => CommandResult::silent(),
        Ok(listing) => CommandResult::success(listing.entries().collect::<Vec<_>>().join("\n")),
        Err(e) => CommandResult::from_error(e),
    }
}

async fn handle_cmd_copy(
    (src_path, dest_path): (PathBuf, PathBuf),
    src: String,
    dest: String,
    settings: TransferSettings,
) -> CommandResult {
    match copy_file(&src_path, &dest_path, settings).await {
        Ok(_) => CommandResult::success(format!("File copied from {} to {}", src, dest)),
        Err(e) => CommandResult::from_error(e),
    }
}

async fn handle_cmd_move(
    (src_path, dest_path): (PathBuf, PathBuf),
    src: String,
    dest: String,
) -> CommandResult {
    match rename_entry(&src_path, &dest_path).await {
        Ok(()) => CommandResult::success(format!("File moved from {} to {}", src, dest)),
        Err(e) => CommandResult::from_error(e),
    }
}

async fn handle_cmd_rm(path: PathBuf, file: String) -> CommandResult {
    match delete_file(&path).await {
        Ok(()) => CommandResult::success(format!("File {} deleted", file)),
        Err(e) => CommandResult::from_error(e),
    }
}

async fn handle_cmd_rn(
    (old_path, new_path): (PathBuf, PathBuf),
    old: String,
    new: String,
) -> CommandResult {
    match rename_entry(&old_path, &new_path).await {
        Ok(()) => CommandResult::success(format!("File renamed from {} to {}", old, new)),
        Err(e) => CommandResult::from_error(e),
    }
}

async fn handle_cmd_compress(
    (src_path, dest_path): (PathBuf, PathBuf),
    src: String,
    dest: String,
    settings: TransferSettings,
) -> CommandResult {
    match compress_file(&src_path, &dest_path, settings).await {
        Ok(_) => CommandResult::success(format!("File {} compressed to {}", src, dest)),
        Err(e) => CommandResult::from_error(e),
    }
}

async fn handle_cmd_decompress(
    (src_path, dest_path): (PathBuf, PathBuf),
    src: String,
    dest: String,
    settings: TransferSettings,
) -> CommandResult {
    match decompress_file(&src_path, &dest_path, settings).await {
        Ok(_) => CommandResult::success(format!("File {} decompressed to {}", src, dest)),
        Err(e) => CommandResult::from_error(e),
    }
}

async fn handle_cmd_hash(path: PathBuf, file: String, settings: TransferSettings) -> CommandResult {
    match hash_file(&path, settings).await {
        Ok(digest) => CommandResult::success(format!("SHA-256 hash of {}: {}", file, digest)),
        Err(e) => CommandResult::from_error(e),
    }
}
