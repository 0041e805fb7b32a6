//! Configuration management for the RAX file manager
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `FILE_MANAGER_*` environment variables, then command-line flags.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::navigate::resolve_path;
use crate::transfer::TransferSettings;

const DEFAULT_CONFIG_NAME: &str = "file_manager";
const ENV_PREFIX: &str = "FILE_MANAGER";

pub const DEFAULT_USERNAME: &str = "User";
const DEFAULT_PROMPT: &str = ">";
const DEFAULT_BUFFER_SIZE: i64 = 8192;
const DEFAULT_MAX_COMMAND_LENGTH: i64 = 512;
const DEFAULT_COMPRESSION_LEVEL: i64 = 6;
const MAX_COMPRESSION_LEVEL: u32 = 9;

/// Complete session configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct FileManagerConfig {
    /// Display name used in the greeting and farewell
    /// Environment: FILE_MANAGER_USERNAME
    pub username: String,

    /// Directory the session starts in; home directory when unset
    #[serde(default)]
    pub start_dir: Option<String>,

    /// Prompt printed before each line is read
    pub prompt: String,

    /// Chunk size for stream-based file operations
    pub buffer_size: usize,

    /// Longest accepted input line, in bytes
    pub max_command_length: usize,

    /// gzip level used by `compress` (0-9)
    pub compression_level: u32,
}

impl Default for FileManagerConfig {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            start_dir: None,
            prompt: DEFAULT_PROMPT.to_string(),
            buffer_size: DEFAULT_BUFFER_SIZE as usize,
            max_command_length: DEFAULT_MAX_COMMAND_LENGTH as usize,
            compression_level: DEFAULT_COMPRESSION_LEVEL as u32,
        }
    }
}

impl FileManagerConfig {
    /// Load configuration with environment overrides.
    ///
    /// An explicit `config_file` must exist; otherwise `file_manager.toml`
    /// in the working directory is read if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let file_source = match config_file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_NAME).required(false),
        };

        let settings = Config::builder()
            .set_default("username", DEFAULT_USERNAME)?
            .set_default("prompt", DEFAULT_PROMPT)?
            .set_default("buffer_size", DEFAULT_BUFFER_SIZE)?
            .set_default("max_command_length", DEFAULT_MAX_COMMAND_LENGTH)?
            .set_default("compression_level", DEFAULT_COMPRESSION_LEVEL)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?;

        let config: FileManagerConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line flags on top of the loaded values.
    pub fn with_overrides(
        mut self,
        username: Option<String>,
        start_dir: Option<String>,
    ) -> Result<Self, ConfigError> {
        if let Some(username) = username {
            self.username = username;
        }
        if start_dir.is_some() {
            self.start_dir = start_dir;
        }
        self.validate()?;
        Ok(self)
    }

    /// Absolute directory the session starts in.
    ///
    /// A relative `start_dir` is taken relative to the process working
    /// directory. Without one, the home directory is used.
    pub fn start_directory(&self) -> PathBuf {
        let process_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("/"));
        match &self.start_dir {
            Some(dir) => resolve_path(&process_dir, dir),
            None => dirs::home_dir().unwrap_or(process_dir),
        }
    }

    pub fn transfer_settings(&self) -> TransferSettings {
        TransferSettings {
            buffer_size: self.buffer_size,
            compression_level: self.compression_level,
        }
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::Message("username cannot be empty".into()));
        }

        if self.buffer_size == 0 {
            return Err(ConfigError::Message(
                "buffer_size must be greater than 0".into(),
            ));
        }

        if self.max_command_length == 0 {
            return Err(ConfigError::Message(
                "max_command_length must be greater than 0".into(),
            ));
        }

        if self.compression_level > MAX_COMPRESSION_LEVEL {
            return Err(ConfigError::Message(format!(
                "compression_level must be between 0 and {}",
                MAX_COMPRESSION_LEVEL
            )));
        }

        if matches!(&self.start_dir, Some(dir) if dir.trim().is_empty()) {
            return Err(ConfigError::Message("start_dir cannot be empty".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults_match_builtin_values() {
        let config = FileManagerConfig::default();
        assert_eq!(config.username, "User");
        assert_eq!(config.prompt, ">");
        assert_eq!(config.buffer_size, 8192);
        assert_eq!(config.max_command_length, 512);
        assert_eq!(config.compression_level, 6);
        assert!(config.start_dir.is_none());
    }

    #[test]
    fn loads_values_from_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(
            &path,
            "username = \"alice\"\nbuffer_size = 1024\ncompression_level = 9\n",
        )
        .unwrap();

        let config = FileManagerConfig::load(Some(&path)).unwrap();

        assert_eq!(config.username, "alice");
        assert_eq!(config.buffer_size, 1024);
        assert_eq!(config.compression_level, 9);
        assert_eq!(config.prompt, ">");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(FileManagerConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "compression_level = 12\n").unwrap();
        assert!(FileManagerConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn overrides_take_precedence() {
        let config = FileManagerConfig::default()
            .with_overrides(Some("bob".into()), Some("/tmp".into()))
            .unwrap();
        assert_eq!(config.username, "bob");
        assert_eq!(config.start_dir.as_deref(), Some("/tmp"));

        let unchanged = FileManagerConfig::default()
            .with_overrides(None, None)
            .unwrap();
        assert_eq!(unchanged, FileManagerConfig::default());

        assert!(
            FileManagerConfig::default()
                .with_overrides(Some("  ".into()), None)
                .is_err()
        );
    }

    #[cfg(unix)]
    #[test]
    fn start_directory_is_absolute() {
        let config = FileManagerConfig {
            start_dir: Some("/var/../tmp".into()),
            ..FileManagerConfig::default()
        };
        assert_eq!(config.start_directory(), PathBuf::from("/tmp"));
        assert!(FileManagerConfig::default().start_directory().is_absolute());
    }
}
