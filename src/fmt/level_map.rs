//! One string per level, used both for textual prefixes (`INF`, `WARN`) and
//! for ANSI color specs.

use crate::level::Level;
use std::borrow::Cow;

/// Fixed-size table indexed by [`Level`].
///
/// The predefined tables are `const` so they cost nothing until an output
/// actually asks for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelMap([Cow<'static, str>; Level::COUNT]);

impl LevelMap {
    /// `???`, `TRC`, `DBG`, `INF`, `WRN`, `ERR`, `FTL`, `!!!`.
    pub const SHORT_NAMES: Self = Self::from_static([
        "???", "TRC", "DBG", "INF", "WRN", "ERR", "FTL", "!!!",
    ]);

    /// Upper-case full level names.
    pub const FULL_NAMES: Self = Self::from_static([
        "UNKNOWN",
        "TRACE",
        "DEBUG",
        "INFO",
        "WARN",
        "ERROR",
        "FATAL",
        "UNMASKABLE",
    ]);

    /// SGR specs tuned for a black terminal background.
    pub const COLOR_ON_BLACK: Self = Self::from_static([
        "9;90", "2;90", "0;90", "0;97", "0;33", "0;91", "101;1;33", "107;1;31",
    ]);

    #[must_use]
    pub const fn from_static(entries: [&'static str; Level::COUNT]) -> Self {
        Self([
            Cow::Borrowed(entries[0]),
            Cow::Borrowed(entries[1]),
            Cow::Borrowed(entries[2]),
            Cow::Borrowed(entries[3]),
            Cow::Borrowed(entries[4]),
            Cow::Borrowed(entries[5]),
            Cow::Borrowed(entries[6]),
            Cow::Borrowed(entries[7]),
        ])
    }

    #[must_use]
    pub fn get(&self, level: Level) -> &str {
        &self.0[level.index()]
    }

    /// Replaces a single entry, leaving the rest of the table untouched.
    #[must_use]
    pub fn with(mut self, level: Level, value: impl Into<String>) -> Self {
        self.0[level.index()] = Cow::Owned(value.into());
        self
    }
}
