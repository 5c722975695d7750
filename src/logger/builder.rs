//! Stepwise construction of a [`Logger`] with per-output settings.
//!
//! ```
//! use lgr::{Level, LevelMap, Logger};
//!
//! let logger = Logger::builder()
//!     .level(Level::Info)
//!     .stderr()
//!     .prefixes(LevelMap::SHORT_NAMES)
//!     .colors(LevelMap::COLOR_ON_BLACK)
//!     .done()
//!     .build();
//! assert_eq!(logger.output_count(), 1);
//! ```

use super::{DEFAULT_LOG_LEVEL, Logger};
use crate::fmt::LevelMap;
use crate::level::Level;
use crate::output::{FileOutput, OutputContext, SharedOutput, TerminalOutput, output_addr};
use std::path::Path;
use std::sync::Arc;

/// Collects the level, fallback and outputs; [`LoggerBuilder::build`] returns
/// a stopped logger.
pub struct LoggerBuilder {
    min_level: Level,
    fallback: Option<SharedOutput>,
    discard_fallback: bool,
    outputs: Vec<(SharedOutput, OutputContext)>,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggerBuilder {
    /// [`DEFAULT_LOG_LEVEL`], stderr fallback, no outputs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            min_level: DEFAULT_LOG_LEVEL,
            fallback: None,
            discard_fallback: false,
            outputs: Vec::new(),
        }
    }

    #[must_use]
    pub const fn level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    /// Output for the engine's own fault reports.
    #[must_use]
    pub fn fallback(mut self, fallback: SharedOutput) -> Self {
        self.fallback = Some(fallback);
        self.discard_fallback = false;
        self
    }

    /// Drops fault reports instead of writing them to stderr.
    #[must_use]
    pub fn discard_fallback(mut self) -> Self {
        self.fallback = None;
        self.discard_fallback = true;
        self
    }

    /// Adds an output with default settings.
    #[must_use]
    pub fn output(self, output: SharedOutput) -> Self {
        self.output_with_context(output, OutputContext::default())
    }

    /// Adds an output with explicit settings. A later call for the same
    /// output replaces its settings.
    #[must_use]
    pub fn output_with_context(mut self, output: SharedOutput, context: OutputContext) -> Self {
        let addr = output_addr(&output);
        if let Some(entry) = self.outputs.iter_mut().find(|entry| output_addr(&entry.0) == addr) {
            entry.1 = context;
        } else {
            self.outputs.push((output, context));
        }
        self
    }

    #[must_use]
    pub fn stdout(self) -> OutputBuilder {
        self.configure(Arc::new(TerminalOutput::stdout()))
    }

    #[must_use]
    pub fn stderr(self) -> OutputBuilder {
        self.configure(Arc::new(TerminalOutput::stderr()))
    }

    #[must_use]
    pub fn file(self, path: impl AsRef<Path>) -> OutputBuilder {
        self.configure(Arc::new(FileOutput::new(path)))
    }

    /// Opens a sub-builder for `output`'s settings; `.done()` returns here.
    #[must_use]
    pub fn configure(self, output: SharedOutput) -> OutputBuilder {
        OutputBuilder {
            parent: self,
            output,
            context: OutputContext::default(),
        }
    }

    #[must_use]
    pub fn build(self) -> Logger {
        let fallback = if self.discard_fallback {
            None
        } else {
            let stderr = || -> SharedOutput { Arc::new(TerminalOutput::stderr()) };
            Some(self.fallback.unwrap_or_else(stderr))
        };
        let logger = Logger::with_params(self.min_level, fallback, []);
        for (output, context) in self.outputs {
            logger.add_output_with_context(output, context);
        }
        logger
    }
}

/// Settings for one output. Every setter mirrors an [`OutputContext`] setter.
pub struct OutputBuilder {
    parent: LoggerBuilder,
    output: SharedOutput,
    context: OutputContext,
}

impl OutputBuilder {
    /// Level prefixes, separated from the rest of the line by the current
    /// delimiter.
    #[must_use]
    pub fn prefixes(mut self, prefixes: LevelMap) -> Self {
        let delimiter = self.context.delimiter.clone();
        self.context = self.context.level_prefix(Some(prefixes), delimiter);
        self
    }

    #[must_use]
    pub fn delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.context.delimiter = delimiter.into();
        self
    }

    #[must_use]
    pub fn colors(mut self, colors: LevelMap) -> Self {
        self.context = self.context.level_color(Some(colors));
        self
    }

    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>, delimiter: impl Into<String>) -> Self {
        self.context = self.context.time_format(format, delimiter);
        self
    }

    #[must_use]
    pub fn show_level_id(mut self, show: bool) -> Self {
        self.context = self.context.show_level_id(show);
        self
    }

    #[must_use]
    pub fn min_level(mut self, level: Level) -> Self {
        self.context = self.context.min_level(level);
        self
    }

    #[must_use]
    pub fn done(self) -> LoggerBuilder {
        self.parent.output_with_context(self.output, self.context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::MemoryOutput;

    #[test]
    fn sub_builder_settings_reach_the_registry() {
        let out = Arc::new(MemoryOutput::new());
        let logger = LoggerBuilder::new()
            .level(Level::Debug)
            .discard_fallback()
            .configure(out.clone())
            .prefixes(LevelMap::FULL_NAMES)
            .delimiter(" | ")
            .min_level(Level::Warn)
            .done()
            .build();

        assert_eq!(logger.min_level(), Level::Debug);
        let context = logger.output_context(&out).unwrap();
        assert_eq!(context.delimiter(), " | ");
        assert_eq!(context.minimum_level(), Level::Warn);
        assert_eq!(context.prefixes(), Some(&LevelMap::FULL_NAMES));
    }

    #[test]
    fn repeated_output_keeps_last_context() {
        let out: SharedOutput = Arc::new(MemoryOutput::new());
        let logger = LoggerBuilder::new()
            .output(out.clone())
            .output_with_context(out.clone(), OutputContext::new().show_level_id(true))
            .build();
        assert_eq!(logger.output_count(), 1);
        assert!(logger.output_context(&out).unwrap().shows_level_id());
    }
}
