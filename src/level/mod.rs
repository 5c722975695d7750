//! Severity levels that gate which entries reach which outputs, and the
//! lifecycle states of a [`Logger`](crate::Logger).
//!
//! Both enums are byte-sized. Raw bytes coming from outside the type system
//! (command payloads, config) pass through
//! [`Level::normalize`] / [`State::normalize`] before they are used.

use std::fmt;
use std::str::FromStr;

/// Ordered severity. Lower discriminant = less severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Also the collapse target for out-of-range raw values.
    #[default]
    Unknown = 0,
    Trace = 1,
    Debug = 2,
    Info = 3,
    Warn = 4,
    Error = 5,
    Fatal = 6,
    /// Above every level an output or client can reasonably mask.
    Unmaskable = 7,
}

impl Level {
    /// Exclusive upper bound of valid raw level values.
    pub const SENTINEL: u8 = 8;

    /// Number of levels, i.e. the length of a [`LevelMap`](crate::fmt::LevelMap).
    pub const COUNT: usize = Self::SENTINEL as usize;

    /// Returns the level for `raw` if it is below [`Level::SENTINEL`], otherwise
    /// [`Level::Unknown`].
    #[must_use]
    pub const fn normalize(raw: u8) -> Self {
        match raw {
            1 => Self::Trace,
            2 => Self::Debug,
            3 => Self::Info,
            4 => Self::Warn,
            5 => Self::Error,
            6 => Self::Fatal,
            7 => Self::Unmaskable,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Index into per-level tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase because config files and CLI args use lowercase level strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Unmaskable => "unmaskable",
        }
    }

    /// All levels in ascending order.
    #[must_use]
    pub const fn all() -> [Self; Self::COUNT] {
        [
            Self::Unknown,
            Self::Trace,
            Self::Debug,
            Self::Info,
            Self::Warn,
            Self::Error,
            Self::Fatal,
            Self::Unmaskable,
        ]
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.as_u8()
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned by `FromStr` so callers can distinguish "unknown level" from other parse failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLevelError(String);

impl fmt::Display for ParseLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: '{}'", self.0)
    }
}

impl std::error::Error for ParseLevelError {}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "unknown" | "all" => Ok(Self::Unknown),
            "trace" | "trc" => Ok(Self::Trace),
            "debug" | "dbg" => Ok(Self::Debug),
            "info" | "inf" => Ok(Self::Info),
            "warn" | "warning" | "wrn" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            "fatal" | "ftl" => Ok(Self::Fatal),
            "unmaskable" => Ok(Self::Unmaskable),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}

/// Engine lifecycle.
///
/// `Stopped -> Active` on start, `Active -> Stopping` on stop,
/// `Stopping -> Stopped` once the dispatch worker has drained the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum State {
    /// Never a chosen target; only what a corrupted raw value decodes to.
    #[default]
    Unknown = 0,
    Active = 1,
    Stopping = 2,
    Stopped = 3,
}

impl State {
    /// Exclusive upper bound of valid raw state values.
    pub const SENTINEL: u8 = 4;

    /// Same contract as [`Level::normalize`].
    #[must_use]
    pub const fn normalize(raw: u8) -> Self {
        match raw {
            1 => Self::Active,
            2 => Self::Stopping,
            3 => Self::Stopped,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Active => "active",
            Self::Stopping => "stopping",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
