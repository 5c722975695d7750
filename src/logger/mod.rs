//! The engine: a bounded queue, one dispatch worker, a registry of outputs
//! and a fallback for the engine's own faults.
//!
//! Producers ([`Client`]s) push items into the queue; the worker pops them in
//! FIFO order, applies commands and writes text entries to every enabled
//! output. Each independent concern has its own lock so that producers
//! checking the global level never wait on output registration, and so on.

mod builder;
mod commands;
mod dispatch;
mod from_config;
mod outputs;

pub use builder::{LoggerBuilder, OutputBuilder};
pub use dispatch::PING_MESSAGE;

use crate::client::Client;
use crate::error::Error;
use crate::internal;
use crate::level::{Level, State};
use crate::output::{DiscardOutput, OutputContext, SharedOutput, TerminalOutput};
use crate::queue::QueueItem;
use chrono::{DateTime, Local};
use crossbeam_channel::Sender;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Global minimum level used by [`Logger::new`].
pub const DEFAULT_LOG_LEVEL: Level = Level::Error;
/// Queue capacity used when `start` is given `0`.
pub const DEFAULT_BUFFER_SIZE: usize = 32;
/// Initial capacity of the worker's formatting buffer.
pub const DEFAULT_OUT_BUFFER: usize = 256;
/// Delimiter written after level prefixes and client names.
pub const DEFAULT_DELIMITER: &str = ":";
/// Client name used by [`Logger::fatal`].
pub const DEFAULT_FATAL_NAME: &str = "EXIT(1)";

/// State and the queue's sending half always change together.
struct Lifecycle {
    state: State,
    sender: Option<Sender<QueueItem>>,
}

/// A registered output and its settings.
pub(crate) struct OutputSlot {
    pub(crate) output: SharedOutput,
    pub(crate) context: OutputContext,
}

/// Everything the worker and the clients share with the [`Logger`] handle.
pub(crate) struct Shared {
    lifecycle: RwLock<Lifecycle>,
    outputs: RwLock<Vec<OutputSlot>>,
    fallback: RwLock<SharedOutput>,
    /// Raw so that an out-of-range value is representable and detectable.
    level: RwLock<u8>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl Shared {
    pub(crate) fn raw_level(&self) -> u8 {
        *self.level.read()
    }

    fn state(&self) -> State {
        self.lifecycle.read().state
    }

    /// Enqueues `item`, blocking while the queue is full.
    ///
    /// Returns the push time stamped on the item.
    pub(crate) fn push(&self, mut item: QueueItem) -> Result<DateTime<Local>, Error> {
        let lifecycle = self.lifecycle.read();
        if lifecycle.state != State::Active {
            return Err(Error::Inactive);
        }
        let sender = lifecycle.sender.as_ref().ok_or(Error::ChannelNil)?;
        let pushed = Local::now();
        item.pushed = Some(pushed);
        // Fails only if the worker died and dropped the receiving half.
        sender
            .send(item)
            .map_err(|_| Error::Panic(": `send on closed channel`".to_string()))?;
        Ok(pushed)
    }

    /// Called by the worker on its way out.
    fn set_stopped(&self) {
        let mut lifecycle = self.lifecycle.write();
        lifecycle.state = State::Stopped;
        lifecycle.sender = None;
    }
}

/// Asynchronous multi-producer logger.
///
/// Created stopped; [`Logger::start`] spawns the dispatch worker. Dropping
/// the logger stops it and waits for queued entries to be written.
///
/// ```
/// use lgr::{Level, Logger, MemoryOutput, SharedOutput};
/// use std::sync::Arc;
///
/// let out = Arc::new(MemoryOutput::new());
/// let logger = Logger::with_params(Level::Info, None, [out.clone() as SharedOutput]);
/// logger.start(0).unwrap();
///
/// let client = logger.new_client("main", Level::Unknown);
/// client.info("started");
/// client.debug("filtered out");
///
/// logger.stop_and_wait();
/// assert_eq!(out.contents_string(), "main:started\n");
/// ```
pub struct Logger {
    shared: Arc<Shared>,
}

impl Logger {
    /// Stopped logger with [`DEFAULT_LOG_LEVEL`] and stderr as the fallback.
    #[must_use]
    pub fn new(outputs: impl IntoIterator<Item = SharedOutput>) -> Self {
        let fallback: SharedOutput = Arc::new(TerminalOutput::stderr());
        Self::with_params(DEFAULT_LOG_LEVEL, Some(fallback), outputs)
    }

    /// Stopped logger with explicit level and fallback. A `None` fallback
    /// discards fault reports.
    #[must_use]
    pub fn with_params(
        level: Level,
        fallback: Option<SharedOutput>,
        outputs: impl IntoIterator<Item = SharedOutput>,
    ) -> Self {
        let logger = Self {
            shared: Arc::new(Shared {
                lifecycle: RwLock::new(Lifecycle {
                    state: State::Stopped,
                    sender: None,
                }),
                outputs: RwLock::new(Vec::new()),
                fallback: RwLock::new(Arc::new(DiscardOutput)),
                level: RwLock::new(level.as_u8()),
                worker: Mutex::new(None),
            }),
        };
        logger.set_fallback(fallback);
        logger.add_outputs(outputs);
        logger
    }

    /// [`Logger::new`] followed by [`Logger::start`].
    ///
    /// # Errors
    /// If the dispatch worker cannot be spawned.
    pub fn init_and_start(
        buffer_size: usize,
        outputs: impl IntoIterator<Item = SharedOutput>,
    ) -> Result<Self, Error> {
        let logger = Self::new(outputs);
        logger.start(buffer_size)?;
        Ok(logger)
    }

    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    /// Allocates a queue of `buffer_size` items ([`DEFAULT_BUFFER_SIZE`] for
    /// `0`) and spawns the dispatch worker.
    ///
    /// A worker left over from a previous run is joined first, so starting
    /// right after [`Logger::stop`] waits for the old queue to drain.
    ///
    /// # Errors
    /// [`Error::AlreadyStarted`] if active, [`Error::Io`] if the thread
    /// cannot be spawned.
    pub fn start(&self, buffer_size: usize) -> Result<(), Error> {
        let mut worker = self.shared.worker.lock();
        if self.shared.state() == State::Active {
            return Err(Error::AlreadyStarted);
        }
        if let Some(previous) = worker.take() {
            let _ = previous.join();
        }

        let capacity = if buffer_size == 0 {
            DEFAULT_BUFFER_SIZE
        } else {
            buffer_size
        };
        let (sender, receiver) = crossbeam_channel::bounded(capacity);
        let shared = Arc::clone(&self.shared);
        let handle = thread::Builder::new()
            .name("lgr-dispatch".to_string())
            .spawn(move || shared.run(receiver))?;

        let mut lifecycle = self.shared.lifecycle.write();
        lifecycle.state = State::Active;
        lifecycle.sender = Some(sender);
        drop(lifecycle);
        *worker = Some(handle);

        internal::debug("LOGGER", &format!("Started with queue capacity {capacity}"));
        Ok(())
    }

    /// Stops accepting pushes and closes the queue. The worker keeps running
    /// until everything already queued has been written. No-op unless active.
    pub fn stop(&self) {
        let mut lifecycle = self.shared.lifecycle.write();
        if lifecycle.state == State::Active {
            lifecycle.state = State::Stopping;
            lifecycle.sender = None;
            internal::debug("LOGGER", "Stopping");
        }
    }

    /// Blocks until the dispatch worker has exited. Returns immediately if no
    /// worker was started. Blocks indefinitely on an active logger that
    /// nobody stops.
    pub fn wait(&self) {
        let mut worker = self.shared.worker.lock();
        if let Some(handle) = worker.take() {
            let _ = handle.join();
        }
    }

    /// [`Logger::stop`] then [`Logger::wait`].
    pub fn stop_and_wait(&self) {
        self.stop();
        self.wait();
    }

    #[must_use]
    pub fn state(&self) -> State {
        self.shared.state()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state() == State::Active
    }

    /// Sets the global minimum level. Applies to future pushes and to the
    /// dispatch of items still in the queue.
    pub fn set_min_level(&self, level: Level) -> &Self {
        *self.shared.level.write() = level.as_u8();
        self
    }

    #[must_use]
    pub fn min_level(&self) -> Level {
        Level::normalize(self.shared.raw_level())
    }

    /// Sets the output for the engine's own fault reports. `None` discards them.
    pub fn set_fallback(&self, fallback: Option<SharedOutput>) -> &Self {
        let fallback = fallback.unwrap_or_else(|| -> SharedOutput { Arc::new(DiscardOutput) });
        *self.shared.fallback.write() = fallback;
        self
    }

    /// Creates a client owned by this logger.
    #[must_use]
    pub fn new_client(&self, name: &str, min_level: Level) -> Client {
        Client::new(&self.shared, name, min_level)
    }

    /// Client with minimum level [`Level::Unknown`].
    #[must_use]
    pub fn new_client_default(&self, name: &str) -> Client {
        self.new_client(name, Level::Unknown)
    }

    #[must_use]
    pub fn is_own_client(&self, client: &Client) -> bool {
        std::ptr::eq(client.logger.as_ptr(), Arc::as_ptr(&self.shared))
    }

    pub(crate) fn check_client(&self, client: &Client) -> Result<(), Error> {
        if self.is_own_client(client) {
            Ok(())
        } else {
            Err(Error::ClientAlien)
        }
    }

    /// Logs `err` at [`Level::Fatal`] under the name [`DEFAULT_FATAL_NAME`],
    /// drains the queue and exits the process with status 1.
    pub fn fatal(&self, err: &dyn std::error::Error) -> ! {
        let client = self.new_client(DEFAULT_FATAL_NAME, Level::Unknown);
        if let Err(e) = client.log_with_err(Level::Fatal, &err.to_string()) {
            self.shared.report(&e.to_string());
        }
        self.stop_and_wait();
        std::process::exit(1)
    }

    #[cfg(test)]
    pub(crate) const fn shared(&self) -> &Arc<Shared> {
        &self.shared
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.stop_and_wait();
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("state", &self.state())
            .field("min_level", &self.min_level())
            .field("outputs", &self.output_count())
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for Shared {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shared")
            .field("state", &self.state())
            .field("level", &self.raw_level())
            .finish_non_exhaustive()
    }
}
