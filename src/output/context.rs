//! Per-output formatting and filtering settings.

use crate::fmt::LevelMap;
use crate::level::Level;
use crate::logger::DEFAULT_DELIMITER;

/// One instance per registered output.
///
/// A freshly registered output gets [`OutputContext::default`]: enabled,
/// `":"` delimiter, no timestamp, no prefixes, no colors, minimum level
/// [`Level::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputContext {
    pub(crate) color_map: Option<LevelMap>,
    pub(crate) prefix_map: Option<LevelMap>,
    pub(crate) delimiter: String,
    /// chrono strftime layout; empty means no timestamp.
    pub(crate) time_format: String,
    pub(crate) time_delimiter: String,
    pub(crate) show_level_id: bool,
    /// Flipped to `false` for good after a panicking write.
    pub(crate) enabled: bool,
    pub(crate) min_level: Level,
}

impl Default for OutputContext {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            color_map: None,
            prefix_map: None,
            delimiter: DEFAULT_DELIMITER.to_string(),
            time_format: String::new(),
            time_delimiter: String::new(),
            show_level_id: false,
            enabled: true,
            min_level: Level::Unknown,
        }
    }

    /// Per-level prefix table and the delimiter written after the prefix and
    /// after the client name.
    #[must_use]
    pub fn level_prefix(mut self, prefixes: Option<LevelMap>, delimiter: impl Into<String>) -> Self {
        self.prefix_map = prefixes;
        self.delimiter = delimiter.into();
        self
    }

    /// Per-level ANSI SGR specs; `None` writes no escape sequences.
    #[must_use]
    pub fn level_color(mut self, colors: Option<LevelMap>) -> Self {
        self.color_map = colors;
        self
    }

    /// Timestamp layout (chrono strftime, e.g. `%Y-%m-%d %H:%M:%S`) and the
    /// text written right after it. An empty layout disables the timestamp.
    #[must_use]
    pub fn time_format(mut self, format: impl Into<String>, delimiter: impl Into<String>) -> Self {
        self.time_format = format.into();
        self.time_delimiter = delimiter.into();
        self
    }

    /// Writes the numeric level id (`[3]`) before the other decorations.
    #[must_use]
    pub const fn show_level_id(mut self, show: bool) -> Self {
        self.show_level_id = show;
        self
    }

    #[must_use]
    pub const fn min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn minimum_level(&self) -> Level {
        self.min_level
    }

    #[must_use]
    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    #[must_use]
    pub fn timestamp_format(&self) -> &str {
        &self.time_format
    }

    #[must_use]
    pub const fn prefixes(&self) -> Option<&LevelMap> {
        self.prefix_map.as_ref()
    }

    #[must_use]
    pub const fn colors(&self) -> Option<&LevelMap> {
        self.color_map.as_ref()
    }

    #[must_use]
    pub const fn shows_level_id(&self) -> bool {
        self.show_level_id
    }
}
