//! Module `input`
//!
//! Reads command lines from the session input. Lines are raw bytes until
//! they are complete, so a byte sequence that is not UTF-8 never ends the
//! session, and a line that outgrows the limit is skipped without being
//! buffered whole.

use log::warn;
use std::io;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

/// One unit of input handed to the command loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLine {
    /// A complete line without its terminator, decoded lossily.
    Line(String),
    /// A line longer than the limit; carries its length in bytes.
    TooLong(usize),
    /// The input is exhausted.
    Eof,
}

/// Line reader with a per-line byte limit.
///
/// Partial lines stay in the reader between calls, so `next_line` can be
/// raced in `select!` and dropped without losing input.
pub struct LineReader<R> {
    input: R,
    buf: Vec<u8>,
    max_line_length: usize,
    overflow: Option<usize>,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(input: R, max_line_length: usize) -> Self {
        Self {
            input,
            buf: Vec::new(),
            max_line_length,
            overflow: None,
        }
    }

    pub async fn next_line(&mut self) -> io::Result<InputLine> {
        // room for the line plus a "\r\n" terminator
        let capacity = self.max_line_length + 2;

        loop {
            let limit = capacity.saturating_sub(self.buf.len()) as u64;
            let read = (&mut self.input)
                .take(limit)
                .read_until(b'\n', &mut self.buf)
                .await?;

            if self.buf.last() == Some(&b'\n') {
                return Ok(self.finish_line());
            }

            if self.buf.len() >= capacity {
                let skipped = self.overflow.unwrap_or(0) + self.buf.len();
                if self.overflow.is_none() {
                    warn!("Discarding input line longer than {} bytes", self.max_line_length);
                }
                self.overflow = Some(skipped);
                self.buf.clear();
                continue;
            }

            if read == 0 {
                if self.buf.is_empty() && self.overflow.is_none() {
                    return Ok(InputLine::Eof);
                }
                // last line without a terminator
                return Ok(self.finish_line());
            }
        }
    }

    fn finish_line(&mut self) -> InputLine {
        let mut line = std::mem::take(&mut self.buf);
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }

        if let Some(skipped) = self.overflow.take() {
            return InputLine::TooLong(skipped + line.len());
        }
        if line.len() > self.max_line_length {
            return InputLine::TooLong(line.len());
        }
        InputLine::Line(String::from_utf8_lossy(&line).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn read_all(input: &[u8], max: usize) -> Vec<InputLine> {
        let mut reader = LineReader::new(input, max);
        let mut lines = Vec::new();
        loop {
            let line = reader.next_line().await.unwrap();
            if line == InputLine::Eof {
                return lines;
            }
            lines.push(line);
        }
    }

    fn line(s: &str) -> InputLine {
        InputLine::Line(s.to_string())
    }

    #[tokio::test]
    async fn splits_on_newlines_and_strips_carriage_returns() {
        let lines = read_all(b"ls\r\ncd docs\n\nup", 512).await;
        assert_eq!(lines, vec![line("ls"), line("cd docs"), line(""), line("up")]);
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        let lines = read_all(b"rm caf\xe9.txt\nhash a.txt\n", 512).await;
        assert_eq!(lines, vec![line("rm caf\u{fffd}.txt"), line("hash a.txt")]);
    }

    #[tokio::test]
    async fn line_at_the_limit_is_accepted() {
        let lines = read_all(b"abcd\r\nabcde\n", 4).await;
        assert_eq!(lines, vec![line("abcd"), InputLine::TooLong(5)]);
    }

    #[tokio::test]
    async fn overlong_line_is_skipped_up_to_its_newline() {
        let mut input = vec![b'x'; 10_000];
        input.extend_from_slice(b"\nup\n");

        let mut reader = LineReader::new(&input[..], 16);
        assert_eq!(reader.next_line().await.unwrap(), InputLine::TooLong(10_000));
        assert!(reader.buf.capacity() <= 64);
        assert_eq!(reader.next_line().await.unwrap(), line("up"));
        assert_eq!(reader.next_line().await.unwrap(), InputLine::Eof);
    }

    #[tokio::test]
    async fn overlong_line_without_newline_ends_in_too_long() {
        let input = vec![b'y'; 5_000];
        let lines = read_all(&input, 16).await;
        assert_eq!(lines, vec![InputLine::TooLong(5_000)]);
    }
}
