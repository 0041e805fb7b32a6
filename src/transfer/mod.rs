//! Transfer module
//!
//! Stream-based file operations: byte copies, gzip compression and
//! decompression, and SHA-256 digests.

pub mod file_ops;

// Re-export key types and functions
pub use file_ops::{TransferSettings, compress_file, copy_file, decompress_file, hash_file};
