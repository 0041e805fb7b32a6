//! Module `file_ops`
//!
//! Handles the streaming operations behind `copy`, `compress`, `decompress`
//! and `hash`. Sources are read in fixed-size chunks so large files never
//! have to fit in memory. A failed operation leaves whatever was already
//! written to the destination in place.

use flate2::Compression;
use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use log::{error, info};
use sha2::{Digest, Sha256};
use std::io::{self, BufReader, BufWriter, Write};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::error::TransferError;

const DEFAULT_BUFFER_SIZE: usize = 8192; // 8KB chunks
const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Tunables shared by every transfer.
#[derive(Debug, Clone, Copy)]
pub struct TransferSettings {
    pub buffer_size: usize,
    pub compression_level: u32,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }
}

/// Copies `src` to `dest` byte for byte, returning the number of bytes written.
pub async fn copy_file(
    src: &Path,
    dest: &Path,
    settings: TransferSettings,
) -> Result<u64, TransferError> {
    info!("Starting copy: {} -> {}", src.display(), dest.display());

    let mut source = File::open(src)
        .await
        .map_err(|e| TransferError::OpenSource(src.to_path_buf(), e))?;
    let mut destination = File::create(dest)
        .await
        .map_err(|e| TransferError::CreateDestination(dest.to_path_buf(), e))?;

    let mut buffer = vec![0u8; settings.buffer_size];
    let mut total_bytes = 0u64;

    loop {
        let n = source.read(&mut buffer).await.map_err(|e| {
            error!("Read error on {}: {}", src.display(), e);
            TransferError::StreamFailed(e)
        })?;
        if n == 0 {
            break;
        }
        destination.write_all(&buffer[..n]).await.map_err(|e| {
            error!("Write error on {}: {}", dest.display(), e);
            TransferError::StreamFailed(e)
        })?;
        total_bytes += n as u64;
    }

    destination.flush().await?;

    info!(
        "Copy completed: {} -> {} ({} bytes)",
        src.display(),
        dest.display(),
        total_bytes
    );
    Ok(total_bytes)
}

/// Streams `src` through a gzip encoder into `dest`.
///
/// Returns the number of uncompressed bytes consumed.
pub async fn compress_file(
    src: &Path,
    dest: &Path,
    settings: TransferSettings,
) -> Result<u64, TransferError> {
    let (src, dest) = (src.to_path_buf(), dest.to_path_buf());

    run_blocking(move || {
        info!("Starting compression: {} -> {}", src.display(), dest.display());

        let input = open_source(&src)?;
        let output = create_destination(&dest)?;

        let mut reader = BufReader::with_capacity(settings.buffer_size, input);
        let mut encoder = GzEncoder::new(
            BufWriter::with_capacity(settings.buffer_size, output),
            Compression::new(settings.compression_level),
        );

        let total_bytes = io::copy(&mut reader, &mut encoder)?;
        encoder.finish()?.flush()?;

        info!(
            "Compression completed: {} -> {} ({} bytes in)",
            src.display(),
            dest.display(),
            total_bytes
        );
        Ok(total_bytes)
    })
    .await
}

/// Streams `src` through a gzip decoder into `dest`.
///
/// Concatenated gzip members are decoded in sequence, as `gzip -d` does.
/// Returns the number of decompressed bytes written.
pub async fn decompress_file(
    src: &Path,
    dest: &Path,
    settings: TransferSettings,
) -> Result<u64, TransferError> {
    let (src, dest) = (src.to_path_buf(), dest.to_path_buf());

    run_blocking(move || {
        info!(
            "Starting decompression: {} -> {}",
            src.display(),
            dest.display()
        );

        let input = open_source(&src)?;
        let output = create_destination(&dest)?;

        let mut decoder =
            MultiGzDecoder::new(BufReader::with_capacity(settings.buffer_size, input));
        let mut writer = BufWriter::with_capacity(settings.buffer_size, output);

        let total_bytes = io::copy(&mut decoder, &mut writer).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidInput
            | io::ErrorKind::InvalidData
            | io::ErrorKind::UnexpectedEof => TransferError::MalformedArchive(src.clone(), e),
            _ => TransferError::StreamFailed(e),
        })?;
        writer.flush()?;

        info!(
            "Decompression completed: {} -> {} ({} bytes out)",
            src.display(),
            dest.display(),
            total_bytes
        );
        Ok(total_bytes)
    })
    .await
}

/// Computes the SHA-256 digest of `path` as lowercase hex.
pub async fn hash_file(path: &Path, settings: TransferSettings) -> Result<String, TransferError> {
    let mut file = File::open(path)
        .await
        .map_err(|e| TransferError::OpenSource(path.to_path_buf(), e))?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; settings.buffer_size];
    let mut total_bytes = 0u64;

    loop {
        let n = file.read(&mut buffer).await.map_err(|e| {
            error!("Read error on {}: {}", path.display(), e);
            TransferError::StreamFailed(e)
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
        total_bytes += n as u64;
    }

    let digest = format!("{:x}", hasher.finalize());
    info!(
        "Hashed {} ({} bytes): {}",
        path.display(),
        total_bytes,
        digest
    );
    Ok(digest)
}

fn open_source(path: &Path) -> Result<std::fs::File, TransferError> {
    std::fs::File::open(path).map_err(|e| {
        error!("Failed to open {}: {}", path.display(), e);
        TransferError::OpenSource(path.to_path_buf(), e)
    })
}

fn create_destination(path: &Path) -> Result<std::fs::File, TransferError> {
    std::fs::File::create(path).map_err(|e| {
        error!("Failed to create {}: {}", path.display(), e);
        TransferError::CreateDestination(path.to_path_buf(), e)
    })
}

/// Runs synchronous codec work on the blocking pool.
async fn run_blocking<T, F>(work: F) -> Result<T, TransferError>
where
    F: FnOnce() -> Result<T, TransferError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| TransferError::WorkerPanicked(e.to_string()))?
}
