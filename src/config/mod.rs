//! TOML configuration: global level, queue size, fallback and a list of
//! outputs with their formatting settings.
//!
//! Separated from struct definitions so that the loading logic (file I/O,
//! path resolution) stays independent of the serde schema.

mod structs;

pub use structs::{GeneralConfig, OutputConfig};

use crate::error::Error;
use crate::fmt::LevelMap;
use crate::internal;
use crate::level::Level;
use crate::output::{DiscardOutput, FileOutput, OutputContext, SharedOutput, TerminalOutput};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// A completely empty file still yields a working config: every field has a
/// default.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub outputs: Vec<OutputConfig>,
}

impl Config {
    /// Reads `<config_dir>/lgr/lgr.toml`. A missing file yields defaults.
    ///
    /// # Errors
    /// Fails if the config directory can't be determined, the file can't be
    /// read, or the TOML is malformed.
    pub fn load() -> Result<Self, Error> {
        internal::debug("CONFIG", "Loading config from default location");
        let path = Self::get_config_path()?;
        if !path.exists() {
            internal::debug("CONFIG", "Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config = Self::load_from(&path)?;
        internal::info("CONFIG", &format!("Config loaded from {}", path.display()));
        Ok(config)
    }

    /// Reads an explicit file; `~` is expanded.
    ///
    /// # Errors
    /// Fails if the file can't be read or the TOML is malformed.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Error> {
        let raw = path.as_ref().to_string_lossy();
        let expanded = PathBuf::from(shellexpand::tilde(&raw).as_ref());
        let content = fs::read_to_string(&expanded)?;
        content.parse()
    }

    /// `<config_dir>/lgr/lgr.toml`, following the platform's conventions.
    ///
    /// # Errors
    /// [`Error::ConfigDirNotFound`] when the platform has no config directory.
    pub fn get_config_path() -> Result<PathBuf, Error> {
        directories::BaseDirs::new()
            .map(|dirs| dirs.config_dir().join("lgr").join("lgr.toml"))
            .ok_or(Error::ConfigDirNotFound)
    }

    /// Global minimum level.
    ///
    /// # Errors
    /// [`Error::InvalidLevel`] for an unrecognized level name.
    pub fn parse_level(&self) -> Result<Level, Error> {
        parse_level(&self.general.level)
    }

    /// Fallback output named by `general.fallback`. `None` for `discard`.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for an unrecognized name.
    pub fn build_fallback(&self) -> Result<Option<SharedOutput>, Error> {
        let fallback: SharedOutput = match self.general.fallback.to_lowercase().as_str() {
            "stderr" | "" => Arc::new(TerminalOutput::stderr()),
            "stdout" => Arc::new(TerminalOutput::stdout()),
            "discard" | "none" => return Ok(None),
            other => return Err(Error::InvalidConfig(format!("unknown fallback `{other}`"))),
        };
        Ok(Some(fallback))
    }
}

impl FromStr for Config {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(toml::from_str(s)?)
    }
}

impl OutputConfig {
    /// Settings for this output.
    ///
    /// # Errors
    /// [`Error::InvalidLevel`] for a bad `min_level`, [`Error::InvalidConfig`]
    /// for a bad `prefix`.
    pub fn context(&self) -> Result<OutputContext, Error> {
        let prefixes = match self.prefix.to_lowercase().as_str() {
            "short" => Some(LevelMap::SHORT_NAMES),
            "full" => Some(LevelMap::FULL_NAMES),
            "none" | "" => None,
            other => return Err(Error::InvalidConfig(format!("unknown prefix `{other}`"))),
        };
        let colors = self.color.then_some(LevelMap::COLOR_ON_BLACK);
        Ok(OutputContext::new()
            .level_prefix(prefixes, self.delimiter.clone())
            .level_color(colors)
            .time_format(self.time_format.clone(), self.time_delimiter.clone())
            .show_level_id(self.show_level_id)
            .min_level(parse_level(&self.min_level)?))
    }

    /// Constructs the output itself.
    ///
    /// # Errors
    /// [`Error::InvalidConfig`] for an unrecognized kind or a `file` output
    /// without `path`.
    pub fn build_output(&self) -> Result<SharedOutput, Error> {
        let output: SharedOutput = match self.kind.to_lowercase().as_str() {
            "stdout" => Arc::new(TerminalOutput::stdout()),
            "stderr" => Arc::new(TerminalOutput::stderr()),
            "discard" => Arc::new(DiscardOutput),
            "file" => {
                let path = self
                    .path
                    .as_deref()
                    .ok_or_else(|| Error::InvalidConfig("file output without `path`".to_string()))?;
                Arc::new(FileOutput::new(path))
            }
            other => return Err(Error::InvalidConfig(format!("unknown output kind `{other}`"))),
        };
        Ok(output)
    }
}

/// Case-insensitive level name, with the usual abbreviations.
///
/// # Errors
/// [`Error::InvalidLevel`] for an unrecognized name.
pub fn parse_level(raw: &str) -> Result<Level, Error> {
    raw.parse()
        .map_err(|_| Error::InvalidLevel(raw.to_string()))
}
