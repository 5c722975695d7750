//! Unified error type for all lgr operations.

use std::io;

/// Error type for lgr operations.
#[derive(Debug)]
pub enum Error {
    /// The client's logger has been dropped.
    LoggerNil,
    /// `start` called on an active logger.
    AlreadyStarted,
    /// Push attempted while the logger is not active.
    Inactive,
    /// The logger is active but has no queue (should not happen).
    ChannelNil,
    /// The client belongs to another logger.
    ClientAlien,
    /// Command id outside the client-command range.
    NonClientCommand,
    /// A client command arrived without payload.
    CommandEmptyData,
    /// A client command arrived without a client.
    CommandNilClient,
    /// Command id not recognized by the dispatcher.
    UnknownCommand(String),
    /// Queue item kind not recognized by the dispatcher.
    UnknownKind(String),
    /// An output returned an error; it stays enabled.
    Write { written: usize, source: io::Error },
    /// A caught panic, converted into an error value.
    Panic(String),
    /// I/O error outside the write path (config files, file outputs).
    Io(io::Error),
    /// TOML config parsing error.
    ConfigParse(toml::de::Error),
    /// Config directory not found.
    ConfigDirNotFound,
    /// Invalid log level string.
    InvalidLevel(String),
    /// A config value outside its allowed set.
    InvalidConfig(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LoggerNil => write!(f, "logger is nil"),
            Self::AlreadyStarted => write!(f, "logger is already started"),
            Self::Inactive => write!(f, "logger is not active"),
            Self::ChannelNil => write!(f, "logger channel is nil"),
            Self::ClientAlien => {
                write!(f, "logger client is alien (belongs to another logger)")
            }
            Self::NonClientCommand => write!(f, "non-client command"),
            Self::CommandEmptyData => write!(f, "no data in command message"),
            Self::CommandNilClient => write!(f, "nil client in command message"),
            Self::UnknownCommand(desc) => write!(f, "unknown command: {desc}"),
            Self::UnknownKind(desc) => write!(f, "unknown message type: {desc}"),
            Self::Write { written, source } => write!(
                f,
                "error writing log to output ({written} bytes written): {source}"
            ),
            Self::Panic(desc) => write!(f, "panic{desc}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::ConfigParse(e) => write!(f, "parse error: {e}"),
            Self::ConfigDirNotFound => write!(f, "config directory not found"),
            Self::InvalidLevel(level) => write!(f, "invalid level: {level}"),
            Self::InvalidConfig(desc) => write!(f, "invalid config: {desc}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Write { source, .. } | Self::Io(source) => Some(source),
            Self::ConfigParse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Self::ConfigParse(e)
    }
}

/// Renders a caught panic payload as a compact suffix: ``: `text` `` for
/// string payloads, `: (error) `text`` for error payloads.
#[must_use]
pub fn panic_desc(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!(": `{s}`")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!(": `{s}`")
    } else if let Some(e) = payload.downcast_ref::<io::Error>() {
        format!(": (error) `{e}`")
    } else if let Some(e) = payload.downcast_ref::<Error>() {
        format!(": (error) `{e}`")
    } else {
        " [no panic description]".to_string()
    }
}

impl Error {
    /// Wraps a caught panic payload.
    #[must_use]
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        Self::Panic(panic_desc(payload))
    }
}
