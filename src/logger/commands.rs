//! Administrative operations on clients.
//!
//! Name and minimum level are changed through the queue: the worker applies
//! the change when it pops the command, so entries pushed earlier still
//! render with the old values. Enabling is immediate.

use super::Logger;
use crate::client::Client;
use crate::error::Error;
use crate::level::Level;
use crate::queue::{CommandId, QueueItem};
use chrono::{DateTime, Local};
use std::sync::Arc;

impl Logger {
    /// Queues a minimum level change for `client`.
    ///
    /// # Errors
    /// [`Error::ClientAlien`] for a client of another logger, otherwise the
    /// push errors ([`Error::Inactive`], ...).
    pub fn set_client_min_level(&self, client: &Client, level: Level) -> Result<DateTime<Local>, Error> {
        self.run_client_command(client, CommandId::ClientSetLevel.into(), vec![level.as_u8()])
    }

    /// Queues a rename of `client`.
    ///
    /// # Errors
    /// Same as [`Logger::set_client_min_level`]. An empty `name` is queued
    /// but rejected by the worker with [`Error::CommandEmptyData`].
    pub fn set_client_name(&self, client: &Client, name: &str) -> Result<DateTime<Local>, Error> {
        self.run_client_command(client, CommandId::ClientSetName.into(), name.as_bytes().to_vec())
    }

    /// Enables or disables `client` right away. Entries already queued are
    /// still written.
    ///
    /// # Errors
    /// [`Error::ClientAlien`] for a client of another logger.
    pub fn set_client_enabled(&self, client: &Client, enabled: bool) -> Result<(), Error> {
        self.check_client(client)?;
        client.state.set_enabled(enabled);
        Ok(())
    }

    /// Queues a command that writes [`PING_MESSAGE`](super::PING_MESSAGE)
    /// to the fallback once the worker reaches it.
    ///
    /// # Errors
    /// The push errors ([`Error::Inactive`], ...).
    pub fn ping_fallback(&self) -> Result<DateTime<Local>, Error> {
        self.shared
            .push(QueueItem::command(None, CommandId::PingFallback, vec![0]))
    }

    pub(crate) fn run_client_command(&self, client: &Client, id: u8, data: Vec<u8>) -> Result<DateTime<Local>, Error> {
        self.check_client(client)?;
        if !CommandId::is_client_command(id) {
            return Err(Error::NonClientCommand);
        }
        let item = QueueItem::command(Some(Arc::clone(&client.state)), id, data);
        self.shared.push(item)
    }
}
