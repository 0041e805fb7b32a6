//! Host information
//!
//! Read-only queries behind the `os-info` command.

pub mod os_info;

pub use os_info::{OsInfo, UserInfo};
