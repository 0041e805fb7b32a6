//! Module `commands`
//!
//! Defines the command line parsing logic and the data structures used to
//! represent commands, their status, and results.

use crate::error::handlers::{error_to_message, handle_error};
use crate::error::{CommandError, FileManagerError};

/// Represents a command parsed from one line of user input.
///
/// Commands that take paths store them exactly as the user typed them;
/// resolution against the working directory happens at dispatch.
#[derive(Debug, PartialEq)]
pub enum Command {
    Exit,
    Up,
    Ls,
    OsInfo,
    Cd(String),
    Copy(String, String),
    Move(String, String),
    Rm(String),
    Rn(String, String),
    Compress(String, String),
    Decompress(String, String),
    Hash(String),
    /// Blank line: nothing to dispatch.
    Empty,
}

/// Represents the outcome status of executing a command.
#[derive(Debug, PartialEq)]
pub enum CommandStatus {
    Success,
    Failure(String),
    Exit,
}

/// Struct encapsulating the full result of a command execution.
#[derive(Debug)]
pub struct CommandResult {
    pub status: CommandStatus,
    pub message: Option<String>,
}

impl CommandResult {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: CommandStatus::Success,
            message: Some(message.into()),
        }
    }

    /// Success with nothing to print (e.g. listing an empty directory).
    pub fn silent() -> Self {
        Self {
            status: CommandStatus::Success,
            message: None,
        }
    }

    /// Logs the error and collapses it into the generic user-facing message.
    pub fn from_error(err: impl Into<FileManagerError>) -> Self {
        let err = err.into();
        handle_error(&err);
        Self {
            status: CommandStatus::Failure(err.to_string()),
            message: Some(error_to_message(&err).to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == CommandStatus::Success
    }
}

/// Parses a raw input line into a `Command`.
///
/// Tokens are whitespace-delimited and the command name is case-sensitive.
/// Arguments beyond the ones a command needs are ignored.
pub fn parse_command(raw: &str) -> Result<Command, CommandError> {
    let mut parts = raw.split_whitespace();
    let Some(name) = parts.next() else {
        return Ok(Command::Empty);
    };
    let args: Vec<&str> = parts.collect();

    let one = |command: &'static str| -> Result<String, CommandError> {
        args.first()
            .map(|a| a.to_string())
            .ok_or(CommandError::MissingArgument {
                command,
                expected: 1,
            })
    };
    let two = |command: &'static str| -> Result<(String, String), CommandError> {
        match (args.first(), args.get(1)) {
            (Some(a), Some(b)) => Ok((a.to_string(), b.to_string())),
            _ => Err(CommandError::MissingArgument {
                command,
                expected: 2,
            }),
        }
    };

    let command = match name {
        ".exit" => Command::Exit,
        "up" => Command::Up,
        "ls" => Command::Ls,
        "os-info" => Command::OsInfo,
        "cd" => Command::Cd(one("cd")?),
        "rm" => Command::Rm(one("rm")?),
        "hash" => Command::Hash(one("hash")?),
        "copy" => {
            let (src, dest) = two("copy")?;
            Command::Copy(src, dest)
        }
        "move" => {
            let (src, dest) = two("move")?;
            Command::Move(src, dest)
        }
        "rn" => {
            let (old, new) = two("rn")?;
            Command::Rn(old, new)
        }
        "compress" => {
            let (src, dest) = two("compress")?;
            Command::Compress(src, dest)
        }
        "decompress" => {
            let (src, dest) = two("decompress")?;
            Command::Decompress(src, dest)
        }
        other => return Err(CommandError::UnknownCommand(other.to_string())),
    };

    Ok(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_without_arguments() {
        assert_eq!(parse_command("up").unwrap(), Command::Up);
        assert_eq!(parse_command("  ls  ").unwrap(), Command::Ls);
        assert_eq!(parse_command(".exit").unwrap(), Command::Exit);
        assert_eq!(parse_command("os-info").unwrap(), Command::OsInfo);
    }

    #[test]
    fn parses_path_arguments_verbatim() {
        assert_eq!(
            parse_command("copy ../a.txt /tmp/b.txt").unwrap(),
            Command::Copy("../a.txt".into(), "/tmp/b.txt".into())
        );
        assert_eq!(
            parse_command("cd\tdocs").unwrap(),
            Command::Cd("docs".into())
        );
        assert_eq!(
            parse_command("hash a.txt extra").unwrap(),
            Command::Hash("a.txt".into())
        );
    }

    #[test]
    fn blank_line_is_empty() {
        assert_eq!(parse_command("").unwrap(), Command::Empty);
        assert_eq!(parse_command("   \t ").unwrap(), Command::Empty);
    }

    #[test]
    fn missing_arguments_are_rejected() {
        assert!(matches!(
            parse_command("cd"),
            Err(CommandError::MissingArgument { command: "cd", .. })
        ));
        assert!(matches!(
            parse_command("copy a.txt"),
            Err(CommandError::MissingArgument {
                command: "copy",
                expected: 2
            })
        ));
        assert!(parse_command("rn only").is_err());
        assert!(parse_command("decompress").is_err());
    }

    #[test]
    fn unknown_and_case_mismatched_names_are_rejected() {
        assert!(matches!(
            parse_command("dance"),
            Err(CommandError::UnknownCommand(name)) if name == "dance"
        ));
        assert!(parse_command("LS").is_err());
        assert!(parse_command("exit").is_err());
    }
}
