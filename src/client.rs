//! Producer handles.
//!
//! All entries are written by clients, never by the logger itself. A client
//! has its own name, minimum level and enabled flag. Name and minimum level
//! change only through queued commands issued by the owning [`Logger`], so
//! entries already in the queue keep rendering with the values they were
//! submitted under. The enabled flag only gates future calls and is flipped
//! directly.
//!
//! Every `*_with_err` method returns the push time, `None` when the entry
//! was filtered out, or the error that prevented queuing. The plain methods
//! return only the push time and send errors to the logger's fallback.

use crate::error::Error;
use crate::level::Level;
use crate::logger::{Logger, Shared};
use crate::queue::QueueItem;
use chrono::{DateTime, Local};
use parking_lot::RwLock;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Weak};

/// Client fields shared between producers and the dispatch worker.
#[derive(Debug)]
pub(crate) struct ClientState {
    name: RwLock<Vec<u8>>,
    min_level: AtomicU8,
    /// Level used by the `io::Write` surface.
    cur_level: AtomicU8,
    enabled: AtomicBool,
}

impl ClientState {
    pub(crate) fn new(name: &str, min_level: Level) -> Self {
        Self {
            name: RwLock::new(name.as_bytes().to_vec()),
            min_level: AtomicU8::new(min_level.as_u8()),
            cur_level: AtomicU8::new(Level::Unknown.as_u8()),
            enabled: AtomicBool::new(true),
        }
    }

    pub(crate) fn name(&self) -> parking_lot::RwLockReadGuard<'_, Vec<u8>> {
        self.name.read()
    }

    pub(crate) fn set_name(&self, name: Vec<u8>) {
        *self.name.write() = name;
    }

    pub(crate) fn min_level(&self) -> Level {
        Level::normalize(self.min_level.load(Ordering::Acquire))
    }

    pub(crate) fn set_min_level(&self, level: Level) {
        self.min_level.store(level.as_u8(), Ordering::Release);
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Acquire)
    }

    pub(crate) fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Release);
    }
}

/// A named producer bound to exactly one [`Logger`].
///
/// The client holds a weak reference: it never keeps the logger alive, and
/// logging through a client whose logger has been dropped fails with
/// [`Error::LoggerNil`]. Cloning yields another handle to the same client.
#[derive(Debug, Clone)]
pub struct Client {
    pub(crate) logger: Weak<Shared>,
    pub(crate) state: Arc<ClientState>,
}

impl Client {
    pub(crate) fn new(logger: &Arc<Shared>, name: &str, min_level: Level) -> Self {
        Self {
            logger: Arc::downgrade(logger),
            state: Arc::new(ClientState::new(name, min_level)),
        }
    }

    /// Current name, as last applied by the dispatch worker.
    #[must_use]
    pub fn name(&self) -> String {
        String::from_utf8_lossy(&self.state.name()).into_owned()
    }

    /// Current minimum level, as last applied by the dispatch worker.
    #[must_use]
    pub fn min_level(&self) -> Level {
        self.state.min_level()
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.state.is_enabled()
    }

    /// Queues `data` at `level`.
    ///
    /// Returns `Ok(None)` without queuing anything when the client is
    /// disabled or `level` is below the client's or the logger's minimum.
    ///
    /// # Errors
    /// [`Error::LoggerNil`] if the logger is gone, otherwise whatever the
    /// push primitive reports ([`Error::Inactive`], ...).
    ///
    /// # Panics
    /// If the logger's global level is out of range. That can only happen
    /// through memory corruption or a bug in this crate.
    pub fn log_bytes_with_err(&self, level: Level, data: &[u8]) -> Result<Option<DateTime<Local>>, Error> {
        let shared = self.logger.upgrade().ok_or(Error::LoggerNil)?;
        let global = shared.raw_level();
        assert!(
            global < Level::SENTINEL,
            "panic on forbidden log level: {global}"
        );
        if !self.state.is_enabled() || level < self.state.min_level() || level.as_u8() < global {
            return Ok(None);
        }
        let item = QueueItem::text(Some(Arc::clone(&self.state)), level, data.to_vec());
        shared.push(item).map(Some)
    }

    /// String variant of [`Client::log_bytes_with_err`].
    ///
    /// # Errors
    /// See [`Client::log_bytes_with_err`].
    pub fn log_with_err(&self, level: Level, text: &str) -> Result<Option<DateTime<Local>>, Error> {
        self.log_bytes_with_err(level, text.as_bytes())
    }

    /// Like [`Client::log_bytes_with_err`], but a failure is written to the
    /// logger's fallback and `None` is returned.
    pub fn log_bytes(&self, level: Level, data: &[u8]) -> Option<DateTime<Local>> {
        match self.log_bytes_with_err(level, data) {
            Ok(pushed) => pushed,
            Err(e) => {
                if let Some(shared) = self.logger.upgrade() {
                    shared.report(&e.to_string());
                }
                None
            }
        }
    }

    pub fn log(&self, level: Level, text: &str) -> Option<DateTime<Local>> {
        self.log_bytes(level, text.as_bytes())
    }

    /// Very verbose diagnostics. Executed commands are echoed at this level.
    pub fn trace(&self, text: &str) -> Option<DateTime<Local>> {
        self.log(Level::Trace, text)
    }

    pub fn debug(&self, text: &str) -> Option<DateTime<Local>> {
        self.log(Level::Debug, text)
    }

    pub fn info(&self, text: &str) -> Option<DateTime<Local>> {
        self.log(Level::Info, text)
    }

    pub fn warn(&self, text: &str) -> Option<DateTime<Local>> {
        self.log(Level::Warn, text)
    }

    pub fn error(&self, text: &str) -> Option<DateTime<Local>> {
        self.log(Level::Error, text)
    }

    /// Logs at [`Level::Fatal`]. Does not stop anything; see [`Logger::fatal`].
    pub fn fatal(&self, text: &str) -> Option<DateTime<Local>> {
        self.log(Level::Fatal, text)
    }

    /// Logs the error's `Display` text at [`Level::Error`].
    pub fn log_err(&self, err: &dyn std::error::Error) -> Option<DateTime<Local>> {
        self.log(Level::Error, &err.to_string())
    }

    /// Sets the level used by the `io::Write` surface and returns the client
    /// for chaining:
    ///
    /// ```
    /// use std::io::Write;
    /// # use lgr::{Level, Logger};
    /// # let logger = Logger::with_params(Level::Unknown, None, []);
    /// # let client = logger.new_client("disk", Level::Unknown);
    /// let _ = (&client).lvl(Level::Warn).write(b"disk low");
    /// ```
    ///
    /// Every `write` call becomes one entry, so `write!` with several
    /// format arguments produces several entries. Format into a `String`
    /// first when one line is wanted.
    pub fn lvl(&self, level: Level) -> &Self {
        self.state.cur_level.store(level.as_u8(), Ordering::Release);
        self
    }

    fn current_level(&self) -> Level {
        Level::normalize(self.state.cur_level.load(Ordering::Acquire))
    }

    /// Whether `logger` owns this client.
    #[must_use]
    pub fn belongs_to(&self, logger: &Logger) -> bool {
        logger.is_own_client(self)
    }
}

impl io::Write for &Client {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.log_bytes_with_err(self.current_level(), buf) {
            Ok(_) => Ok(buf.len()),
            Err(e) => Err(io::Error::other(e)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl io::Write for Client {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut &*self, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
