//! The `Output` trait is the only thing the engine knows about a log
//! destination: it accepts a byte buffer and reports how much was written.
//! Built-in backends cover the console, files, in-memory capture and a
//! discarding sink used as the default fallback.

mod context;
mod discard;
mod file;
mod memory;
mod terminal;

pub use context::OutputContext;
pub use discard::DiscardOutput;
pub use file::FileOutput;
pub use memory::MemoryOutput;
pub use terminal::{Stream, TerminalOutput};

use std::io;
use std::sync::Arc;

/// A log destination.
///
/// Only the dispatch worker writes to registered outputs, so implementations
/// never see concurrent `write` calls from the engine. `Send + Sync` is still
/// required because the same output may be shared with other code.
///
/// A `write` that panics is treated as fatal for that output: the engine
/// disables it and reports the fault to the fallback. An `Err` is transient
/// and the output stays enabled.
pub trait Output: Send + Sync {
    /// Writes one fully formatted line.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn write(&self, buf: &[u8]) -> io::Result<usize>;

    /// Called once when the dispatch worker exits.
    ///
    /// # Errors
    /// I/O errors from the underlying sink.
    fn flush(&self) -> io::Result<()> {
        Ok(())
    }

    /// Shown in fault reports.
    fn name(&self) -> &str {
        "output"
    }
}

/// Outputs are shared between the caller and the engine's registry.
pub type SharedOutput = Arc<dyn Output>;

/// Data address of an output; the registry keys on identity, not value.
pub(crate) fn output_addr<O: ?Sized>(output: &Arc<O>) -> *const () {
    Arc::as_ptr(output).cast::<()>()
}
