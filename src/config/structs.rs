//! Configuration struct definitions.

use serde::Deserialize;

/// `[general]` section.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GeneralConfig {
    /// Global minimum level.
    pub level: String,
    /// Queue capacity; `0` means the built-in default.
    pub buffer_size: usize,
    /// Destination of fault reports: `stderr`, `stdout` or `discard`.
    pub fallback: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            buffer_size: 0,
            fallback: "stderr".to_string(),
        }
    }
}

/// One `[[outputs]]` entry.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// `stdout`, `stderr` or `file`.
    pub kind: String,
    /// File outputs only.
    pub path: Option<String>,
    /// chrono strftime layout; empty disables the timestamp.
    pub time_format: String,
    pub time_delimiter: String,
    /// `short`, `full` or `none`.
    pub prefix: String,
    pub delimiter: String,
    pub color: bool,
    pub show_level_id: bool,
    pub min_level: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            kind: "stderr".to_string(),
            path: None,
            time_format: String::new(),
            time_delimiter: " ".to_string(),
            prefix: "short".to_string(),
            delimiter: ":".to_string(),
            color: false,
            show_level_id: false,
            min_level: "unknown".to_string(),
        }
    }
}
