use log::{error, info, warn};
use std::future::Future;
use std::path::PathBuf;
use tokio::io::AsyncBufRead;
use tokio::task::JoinSet;

use crate::config::FileManagerConfig;
use crate::error::CommandError;
use crate::protocol::responses::{current_directory, farewell, greeting};
use crate::protocol::{CommandResult, CommandStatus, Dispatch, handle_command, parse_command};
use crate::session::input::{InputLine, LineReader};
use crate::session::{Console, WorkingDirectory};
use crate::transfer::TransferSettings;

/// Why the session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    ExitCommand,
    EndOfInput,
    Interrupted,
}

/// Final state handed back once the farewell has been printed.
#[derive(Debug)]
pub struct SessionReport {
    pub termination: Termination,
    pub working_directory: PathBuf,
}

/// An interactive file manager session.
///
/// Owns the working directory and the display name. Lines are read and
/// dispatched one at a time; filesystem operations run as tasks, so the
/// prompt comes back before they finish.
pub struct Session {
    config: FileManagerConfig,
    settings: TransferSettings,
    cwd: WorkingDirectory,
    console: Console,
    in_flight: JoinSet<()>,
}

impl Session {
    pub fn new(config: FileManagerConfig, console: Console) -> Self {
        let cwd = WorkingDirectory::new(config.start_directory());
        Self {
            settings: config.transfer_settings(),
            config,
            cwd,
            console,
            in_flight: JoinSet::new(),
        }
    }

    pub fn working_directory(&self) -> &WorkingDirectory {
        &self.cwd
    }

    /// Runs the command loop until `.exit`, end of input, or `shutdown`.
    ///
    /// On `.exit` and end of input, operations still in flight are awaited
    /// before the farewell. An interrupt says goodbye right away and leaves
    /// them behind.
    pub async fn run<R, F>(mut self, input: R, shutdown: F) -> SessionReport
    where
        R: AsyncBufRead + Unpin,
        F: Future<Output = ()>,
    {
        let username = self.config.username.clone();
        info!(
            "Starting session for {} in {}",
            username,
            self.cwd.current().display()
        );

        self.console.print_line(&greeting(&username)).await;
        self.console
            .print_line(&current_directory(self.cwd.current()))
            .await;

        tokio::pin!(shutdown);
        let mut lines = LineReader::new(input, self.config.max_command_length);

        let mut termination = loop {
            self.console.print_prompt(&self.config.prompt).await;

            let line = loop {
                tokio::select! {
                    _ = &mut shutdown => break None,
                    Some(joined) = self.in_flight.join_next() => {
                        if let Err(e) = joined {
                            error!("Operation task failed: {}", e);
                        }
                    }
                    line = lines.next_line() => break Some(line),
                }
            };

            match line {
                None => break Termination::Interrupted,
                Some(Ok(InputLine::Line(line))) => {
                    if !self.process_line(&line).await {
                        break Termination::ExitCommand;
                    }
                }
                Some(Ok(InputLine::TooLong(length))) => {
                    let result = CommandResult::from_error(CommandError::LineTooLong(length));
                    self.console.report(&result).await;
                }
                Some(Ok(InputLine::Eof)) => break Termination::EndOfInput,
                Some(Err(e)) => {
                    error!("Failed to read input: {}", e);
                    break Termination::EndOfInput;
                }
            }
        };

        if termination != Termination::Interrupted {
            let drained = tokio::select! {
                _ = &mut shutdown => false,
                _ = drain(&mut self.in_flight) => true,
            };
            if !drained {
                termination = Termination::Interrupted;
            }
        }

        if termination == Termination::Interrupted {
            if !self.in_flight.is_empty() {
                warn!(
                    "Leaving {} operation(s) unfinished on interrupt",
                    self.in_flight.len()
                );
            }
            self.in_flight.detach_all();
            self.console.print_line("").await;
        }

        self.console.print_line(&farewell(&username)).await;
        info!("Session ended: {:?}", termination);

        SessionReport {
            termination,
            working_directory: self.cwd.current().to_path_buf(),
        }
    }

    /// Parses and dispatches one line. Returns `false` once the session
    /// should end.
    async fn process_line(&mut self, line: &str) -> bool {
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(e) => {
                self.console.report(&CommandResult::from_error(e)).await;
                return true;
            }
        };
        info!("Received command: {:?}", command);

        match handle_command(&mut self.cwd, command, self.settings).await {
            Dispatch::Done(result) => {
                if result.status == CommandStatus::Exit {
                    return false;
                }
                self.console.report(&result).await;
            }
            Dispatch::Pending(operation) => {
                let console = self.console.clone();
                self.in_flight.spawn(async move {
                    let result = operation.await;
                    console.report(&result).await;
                });
            }
        }
        true
    }
}

async fn drain(in_flight: &mut JoinSet<()>) {
    while let Some(joined) = in_flight.join_next().await {
        if let Err(e) = joined {
            error!("Operation task failed: {}", e);
        }
    }
}
