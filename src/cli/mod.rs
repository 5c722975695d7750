//! Command-line front end: pipes stdin through one client.
//!
//! Each input line becomes one entry. Outputs come from the config file and
//! `--file`; with neither, lines go to stdout.

use crate::config::Config;
use crate::error::Error;
use crate::fmt::LevelMap;
use crate::internal;
use crate::level::Level;
use crate::logger::Logger;
use crate::output::{FileOutput, OutputContext, SharedOutput, TerminalOutput};
use clap::Parser;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::sync::Arc;

/// Log level for CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Unknown,
    Trace,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Unmaskable,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Unknown => Self::Unknown,
            LogLevel::Trace => Self::Trace,
            LogLevel::Debug => Self::Debug,
            LogLevel::Info => Self::Info,
            LogLevel::Warn => Self::Warn,
            LogLevel::Error => Self::Error,
            LogLevel::Fatal => Self::Fatal,
            LogLevel::Unmaskable => Self::Unmaskable,
        }
    }
}

/// Level prefix style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PrefixStyle {
    #[default]
    Short,
    Full,
    None,
}

impl PrefixStyle {
    #[must_use]
    pub const fn table(self) -> Option<LevelMap> {
        match self {
            Self::Short => Some(LevelMap::SHORT_NAMES),
            Self::Full => Some(LevelMap::FULL_NAMES),
            Self::None => None,
        }
    }
}

/// lgr - log stdin lines through an asynchronous logger.
#[derive(Debug, Parser)]
#[command(name = "lgr", version, about = "Log stdin lines through an asynchronous logger")]
pub struct Cli {
    /// Level each line is logged at
    #[arg(short, long, value_enum, default_value = "info")]
    pub level: LogLevel,
    /// Global minimum level (overrides the config file)
    #[arg(long, value_enum)]
    pub min_level: Option<LogLevel>,
    /// Client name written before each line
    #[arg(short, long, default_value = "lgr")]
    pub name: String,
    /// Timestamp layout (chrono strftime); omitted means no timestamp
    #[arg(short, long, value_name = "FORMAT")]
    pub time_format: Option<String>,
    /// Level prefix style
    #[arg(short, long, value_enum, default_value = "short")]
    pub prefix: PrefixStyle,
    /// Colorize lines with ANSI escapes
    #[arg(short, long)]
    pub color: bool,
    /// Write the numeric level id before each line
    #[arg(long)]
    pub show_level_id: bool,
    /// Append to this file instead of writing to stdout
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
    /// Config file (default: `<config_dir>/lgr/lgr.toml`)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Queue capacity (0 = default)
    #[arg(short, long, value_name = "N")]
    pub buffer: Option<usize>,
    /// Print lgr's own diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Settings for outputs created from command-line flags.
    #[must_use]
    pub fn context(&self) -> OutputContext {
        OutputContext::new()
            .level_prefix(self.prefix.table(), crate::logger::DEFAULT_DELIMITER)
            .level_color(self.color.then_some(LevelMap::COLOR_ON_BLACK))
            .time_format(self.time_format.clone().unwrap_or_default(), " ")
            .show_level_id(self.show_level_id)
    }

    fn load_config(&self) -> Result<Config, Error> {
        match &self.config {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }
}

/// Builds the logger, pipes `input` through it and drains the queue.
///
/// # Errors
/// Config errors, a failed start, or a failed push.
pub fn run(cli: &Cli, input: impl BufRead) -> Result<(), Error> {
    if cli.verbose {
        internal::init(Level::Debug);
    }
    let config = cli.load_config()?;
    let logger = Logger::from_config(&config)?;
    if let Some(level) = cli.min_level {
        logger.set_min_level(level.into());
    }

    if let Some(path) = &cli.file {
        let output: SharedOutput = Arc::new(FileOutput::new(path));
        logger.add_output_with_context(output, cli.context());
    } else if config.outputs.is_empty() {
        let output: SharedOutput = Arc::new(TerminalOutput::stdout());
        logger.add_output_with_context(output, cli.context());
    }

    logger.start(cli.buffer.unwrap_or(config.general.buffer_size))?;
    let client = logger.new_client_default(&cli.name);
    let level = Level::from(cli.level);
    for line in input.lines() {
        client.log_with_err(level, &line?)?;
    }
    logger.stop_and_wait();
    Ok(())
}

/// Runs against the process's stdin.
///
/// # Errors
/// See [`run`].
pub fn run_stdin(cli: &Cli) -> Result<(), Error> {
    run(cli, io::stdin().lock())
}
