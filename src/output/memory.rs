//! In-memory capture. Useful as a test sink and for callers that want to
//! inspect or forward formatted lines themselves.

use super::Output;
use parking_lot::Mutex;
use std::io;

#[derive(Debug)]
pub struct MemoryOutput {
    name: String,
    buffer: Mutex<Vec<u8>>,
}

impl Default for MemoryOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryOutput {
    #[must_use]
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// A named buffer; the name shows up in fault reports.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            buffer: Mutex::new(Vec::new()),
        }
    }

    /// Copy of everything written so far.
    #[must_use]
    pub fn contents(&self) -> Vec<u8> {
        self.buffer.lock().clone()
    }

    /// Contents decoded lossily as UTF-8.
    #[must_use]
    pub fn contents_string(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }

    /// Contents split on `\n`, without the terminators.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents_string().lines().map(str::to_string).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.lock().is_empty()
    }

    pub fn clear(&self) {
        self.buffer.lock().clear();
    }
}

impl Output for MemoryOutput {
    fn write(&self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
