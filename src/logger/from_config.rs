//! Logger construction from a [`Config`].

use super::{Logger, LoggerBuilder};
use crate::config::Config;
use crate::error::Error;
use crate::internal;

impl Logger {
    /// Builds a stopped logger with the configured level, fallback and
    /// outputs.
    ///
    /// # Errors
    /// Invalid level names, unknown output kinds or prefix names.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        internal::debug("LOGGER", "Building logger from config");
        internal::debug("LOGGER", &format!("Log level: {}", config.general.level));

        let mut builder = LoggerBuilder::new().level(config.parse_level()?);
        builder = match config.build_fallback()? {
            Some(fallback) => builder.fallback(fallback),
            None => builder.discard_fallback(),
        };

        let mut names = Vec::with_capacity(config.outputs.len());
        for output_config in &config.outputs {
            let output = output_config.build_output()?;
            names.push(output.name().to_string());
            builder = builder.output_with_context(output, output_config.context()?);
        }

        if names.is_empty() {
            internal::warn("LOGGER", "No outputs configured");
        } else {
            internal::debug("LOGGER", &format!("Outputs: [{}]", names.join(", ")));
        }
        Ok(builder.build())
    }

    /// [`Logger::from_config`] followed by [`Logger::start`] with
    /// `general.buffer_size`.
    ///
    /// # Errors
    /// See [`Logger::from_config`] and [`Logger::start`].
    pub fn start_from_config(config: &Config) -> Result<Self, Error> {
        let logger = Self::from_config(config)?;
        logger.start(config.general.buffer_size)?;
        Ok(logger)
    }
}
