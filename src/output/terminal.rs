//! Console output. Locks the standard stream for each line so entries from
//! the dispatch worker never interleave with other writers mid-line.

use super::Output;
use std::io::{self, Write};

/// Which standard stream a [`TerminalOutput`] writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Stream {
    #[default]
    Stdout,
    Stderr,
}

#[derive(Debug, Clone, Default)]
pub struct TerminalOutput {
    stream: Stream,
}

impl TerminalOutput {
    #[must_use]
    pub const fn new(stream: Stream) -> Self {
        Self { stream }
    }

    #[must_use]
    pub const fn stdout() -> Self {
        Self::new(Stream::Stdout)
    }

    /// Default fallback for [`Logger::new`](crate::Logger::new).
    #[must_use]
    pub const fn stderr() -> Self {
        Self::new(Stream::Stderr)
    }

    #[must_use]
    pub const fn stream(&self) -> Stream {
        self.stream
    }
}

impl Output for TerminalOutput {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        match self.stream {
            Stream::Stdout => io::stdout().lock().write_all(buf)?,
            Stream::Stderr => io::stderr().lock().write_all(buf)?,
        }
        Ok(buf.len())
    }

    fn flush(&self) -> io::Result<()> {
        match self.stream {
            Stream::Stdout => io::stdout().flush(),
            Stream::Stderr => io::stderr().flush(),
        }
    }

    fn name(&self) -> &str {
        match self.stream {
            Stream::Stdout => "stdout",
            Stream::Stderr => "stderr",
        }
    }
}
