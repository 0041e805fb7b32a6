//! Shared console output
//!
//! The command loop and every in-flight operation write through the same
//! `Console`. Each line is written under the lock so outcomes from
//! concurrent operations never interleave mid-line.

use log::warn;
use std::pin::Pin;
use std::sync::Arc;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::protocol::CommandResult;

type SharedWriter = Arc<Mutex<Pin<Box<dyn AsyncWrite + Send>>>>;

#[derive(Clone)]
pub struct Console {
    out: SharedWriter,
}

impl Console {
    pub fn new<W>(writer: W) -> Self
    where
        W: AsyncWrite + Send + 'static,
    {
        Self {
            out: Arc::new(Mutex::new(Box::pin(writer))),
        }
    }

    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }

    /// Writes `line` followed by a newline.
    pub async fn print_line(&self, line: &str) {
        self.write(format!("{}\n", line).as_bytes()).await;
    }

    /// Writes the prompt without a trailing newline.
    pub async fn print_prompt(&self, prompt: &str) {
        self.write(prompt.as_bytes()).await;
    }

    /// Prints the message of a finished command, if it has one.
    pub async fn report(&self, result: &CommandResult) {
        if let Some(message) = &result.message {
            self.print_line(message).await;
        }
    }

    async fn write(&self, bytes: &[u8]) {
        let mut out = self.out.lock().await;
        if let Err(e) = out.write_all(bytes).await {
            warn!("Failed to write to console: {}", e);
            return;
        }
        if let Err(e) = out.flush().await {
            warn!("Failed to flush console: {}", e);
        }
    }
}
