//! Module `os_info`
//!
//! Gathers architecture, memory and current-user details for `os-info`.

use serde::Serialize;
use std::env;
use sysinfo::System;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Snapshot of the host taken when `os-info` runs.
#[derive(Debug, Clone)]
pub struct OsInfo {
    pub architecture: &'static str,
    pub total_memory_bytes: u64,
    pub free_memory_bytes: u64,
    pub user: UserInfo,
}

/// Descriptor of the user running the session, printed as JSON.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UserInfo {
    pub uid: i64,
    pub gid: i64,
    pub username: String,
    pub homedir: String,
    pub shell: Option<String>,
}

impl OsInfo {
    pub fn collect() -> Self {
        let mut system = System::new();
        system.refresh_memory();

        Self {
            architecture: env::consts::ARCH,
            total_memory_bytes: system.total_memory(),
            free_memory_bytes: system.free_memory(),
            user: UserInfo::current(),
        }
    }

    /// Renders the report, one line per field.
    pub fn render(&self) -> String {
        let user = serde_json::to_string(&self.user).unwrap_or_else(|_| "{}".to_string());
        [
            "Operating System Info:".to_string(),
            format!("Architecture: {}", self.architecture),
            format!("Total Memory: {} MB", to_megabytes(self.total_memory_bytes)),
            format!("Free Memory: {} MB", to_megabytes(self.free_memory_bytes)),
            format!("User Info: {}", user),
        ]
        .join("\n")
    }
}

impl UserInfo {
    /// Describes the user the process runs as.
    ///
    /// On unix the name, home directory and shell come from the passwd
    /// entry of the real uid. `$USER`/`$USERNAME`, the home directory
    /// lookup and `$SHELL` are used only when there is no entry, and on
    /// other platforms.
    pub fn current() -> Self {
        let (uid, gid) = process_ids();
        match passwd_entry(uid) {
            Some(entry) => Self {
                uid,
                gid,
                username: entry.name,
                homedir: entry.home,
                shell: entry.shell,
            },
            None => Self {
                uid,
                gid,
                username: env::var("USER")
                    .or_else(|_| env::var("USERNAME"))
                    .unwrap_or_else(|_| "unknown".to_string()),
                homedir: dirs::home_dir()
                    .map(|p| p.to_string_lossy().to_string())
                    .unwrap_or_default(),
                shell: env::var("SHELL").ok(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PasswdEntry {
    name: String,
    home: String,
    shell: Option<String>,
}

/// Formats a byte count as megabytes with two decimals.
pub fn to_megabytes(bytes: u64) -> String {
    format!("{:.2}", bytes as f64 / BYTES_PER_MB)
}

#[cfg(unix)]
fn process_ids() -> (i64, i64) {
    // SAFETY: getuid/getgid take no arguments and cannot fail.
    let ids = unsafe { (libc::getuid(), libc::getgid()) };
    (i64::from(ids.0), i64::from(ids.1))
}

#[cfg(not(unix))]
fn process_ids() -> (i64, i64) {
    (-1, -1)
}

#[cfg(unix)]
fn passwd_entry(uid: i64) -> Option<PasswdEntry> {
    use std::ffi::CStr;

    let uid = libc::uid_t::try_from(uid).ok()?;
    let mut buf: Vec<libc::c_char> = vec![0; 1024];

    loop {
        // SAFETY: an all-zero passwd is a valid value for getpwuid_r to fill.
        let mut pwd: libc::passwd = unsafe { std::mem::zeroed() };
        let mut found: *mut libc::passwd = std::ptr::null_mut();
        // SAFETY: every pointer refers to a live local, and `buf.len()` is
        // the size of the buffer behind `buf.as_mut_ptr()`.
        let rc = unsafe {
            libc::getpwuid_r(uid, &mut pwd, buf.as_mut_ptr(), buf.len(), &mut found)
        };

        if rc == libc::ERANGE && buf.len() < 1 << 20 {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if rc != 0 || found.is_null() {
            return None;
        }

        let field = |ptr: *const libc::c_char| {
            if ptr.is_null() {
                None
            } else {
                // SAFETY: non-null fields point into `buf` as NUL-terminated
                // strings and `buf` outlives this closure.
                Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
            }
        };

        return Some(PasswdEntry {
            name: field(pwd.pw_name)?,
            home: field(pwd.pw_dir)?,
            shell: field(pwd.pw_shell).filter(|shell| !shell.is_empty()),
        });
    }
}

#[cfg(not(unix))]
fn passwd_entry(_uid: i64) -> Option<PasswdEntry> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn megabytes_use_two_decimals() {
        assert_eq!(to_megabytes(0), "0.00");
        assert_eq!(to_megabytes(1024 * 1024), "1.00");
        assert_eq!(to_megabytes(1536 * 1024), "1.50");
        assert_eq!(to_megabytes(8 * 1024 * 1024 * 1024), "8192.00");
    }

    #[test]
    fn render_lists_every_field() {
        let info = OsInfo {
            architecture: "x86_64",
            total_memory_bytes: 2 * 1024 * 1024,
            free_memory_bytes: 512 * 1024,
            user: UserInfo {
                uid: 1000,
                gid: 1000,
                username: "alice".into(),
                homedir: "/home/alice".into(),
                shell: None,
            },
        };

        let lines: Vec<String> = info.render().lines().map(String::from).collect();
        assert_eq!(
            lines,
            vec![
                "Operating System Info:",
                "Architecture: x86_64",
                "Total Memory: 2.00 MB",
                "Free Memory: 0.50 MB",
                r#"User Info: {"uid":1000,"gid":1000,"username":"alice","homedir":"/home/alice","shell":null}"#,
            ]
        );
    }

    #[cfg(unix)]
    #[test]
    fn root_passwd_entry_is_found() {
        let entry = passwd_entry(0).unwrap();
        assert_eq!(entry.name, "root");
        assert!(entry.home.starts_with('/'));
    }

    #[cfg(unix)]
    #[test]
    fn current_user_comes_from_passwd() {
        let info = UserInfo::current();
        if let Some(entry) = passwd_entry(info.uid) {
            assert_eq!(info.username, entry.name);
            assert_eq!(info.homedir, entry.home);
        }
        assert!(info.uid >= 0);
    }

    #[test]
    fn collect_reports_host_architecture() {
        let info = OsInfo::collect();
        assert_eq!(info.architecture, env::consts::ARCH);
        assert!(info.free_memory_bytes <= info.total_memory_bytes);
    }
}
