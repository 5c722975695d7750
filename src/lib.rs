#![forbid(unsafe_code)]

//! `lgr` - asynchronous multi-producer logger with per-output fault isolation.
//!
//! Any number of [`Client`]s push entries into one bounded queue; a single
//! dispatch worker pops them in FIFO order and writes each to every enabled
//! [`Output`]. A sink that panics is disabled for good, a sink that returns
//! an error is reported and kept; neither affects the other sinks. Faults
//! are reported to a separate fallback output.
//!
//! Client renames and level changes travel through the same queue as
//! commands, so entries pushed before a rename keep the old name.
//!
//! # Example
//!
//! ```
//! use lgr::{Level, LevelMap, Logger, MemoryOutput, SharedOutput};
//! use std::sync::Arc;
//!
//! let out = Arc::new(MemoryOutput::new());
//! let logger = Logger::with_params(Level::Trace, None, [out.clone() as SharedOutput]);
//! logger.set_output_level_prefix(&out, Some(LevelMap::SHORT_NAMES), ":");
//! logger.start(0).unwrap();
//!
//! let net = logger.new_client("net", Level::Unknown);
//! net.info("connected");
//! logger.set_client_name(&net, "net2").unwrap();
//! net.warn("slow");
//!
//! logger.stop_and_wait();
//! assert_eq!(
//!     out.lines(),
//!     [
//!         "INF:net:connected",
//!         "TRC:net2:<COMMAND: set_name name=`net2`>",
//!         "WRN:net2:slow",
//!     ]
//! );
//! ```
//!
//! # Features
//!
//! - `cli` (default): the `lgr` binary, which logs stdin lines

mod client;
pub mod config;
mod error;
pub mod fmt;
pub mod internal;
pub mod level;
mod logger;
pub mod output;
mod queue;

#[cfg(feature = "cli")]
pub mod cli;

pub use client::Client;
pub use config::Config;
pub use error::{Error, panic_desc};
pub use fmt::{LevelMap, LineParts, build_line};
pub use level::{Level, ParseLevelError, State};
pub use logger::{
    DEFAULT_BUFFER_SIZE, DEFAULT_DELIMITER, DEFAULT_FATAL_NAME, DEFAULT_LOG_LEVEL,
    DEFAULT_OUT_BUFFER, Logger, LoggerBuilder, OutputBuilder, PING_MESSAGE,
};
pub use output::{
    DiscardOutput, FileOutput, MemoryOutput, Output, OutputContext, SharedOutput, Stream,
    TerminalOutput,
};
