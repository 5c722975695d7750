//! The dispatch worker: the only consumer of the queue and the only thread
//! that writes to outputs.

use super::{DEFAULT_OUT_BUFFER, Shared};
use crate::client::ClientState;
use crate::error::{Error, panic_desc};
use crate::fmt::{LineParts, build_line};
use crate::internal;
use crate::level::Level;
use crate::output::{OutputContext, SharedOutput, output_addr};
use crate::queue::{CommandId, ItemKind, QueueItem};
use crossbeam_channel::Receiver;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

/// Written to the fallback by a dispatched ping command.
pub const PING_MESSAGE: &str = "<ping>";

/// Outcome of one write that did not succeed.
enum WriteFault {
    /// The output stays enabled.
    Transient(Error),
    /// The output panicked and gets disabled.
    Fatal(Error),
}

impl Shared {
    /// Worker entry point. Returns once the queue is closed and drained, or
    /// after a panic escaped item processing.
    pub(super) fn run(self: Arc<Self>, receiver: Receiver<QueueItem>) {
        internal::debug("DISPATCH", "Worker started");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.drain(&receiver)));
        // Producers blocked on a full queue must see the disconnect before
        // `set_stopped` asks for the lifecycle write lock.
        drop(receiver);
        match outcome {
            Ok(()) => internal::debug("DISPATCH", "Queue drained"),
            Err(payload) => {
                self.report(&format!("panic proceeding log{}", panic_desc(&*payload)));
                internal::error("DISPATCH", "Worker stopped by a panic");
            }
        }
        self.flush_outputs();
        self.set_stopped();
    }

    fn drain(&self, receiver: &Receiver<QueueItem>) {
        let mut buf = Vec::with_capacity(DEFAULT_OUT_BUFFER);
        for mut item in receiver {
            if let Err(e) = self.process(&mut item, &mut buf) {
                self.report(&format!("error proceeding message: {e}"));
            }
        }
    }

    /// Dispatches a single item. A successfully applied command is rewritten
    /// into a trace-level text entry so it shows up in the log stream.
    fn process(&self, item: &mut QueueItem, buf: &mut Vec<u8>) -> Result<(), Error> {
        match item.kind {
            ItemKind::Command(id) => {
                let Some(audit) = self.apply_command(id, item)? else {
                    return Ok(());
                };
                item.kind = ItemKind::Text(Level::Trace);
                item.data = audit.into_bytes();
                self.write_text(item, buf);
            }
            ItemKind::Text(_) => self.write_text(item, buf),
            ItemKind::Forbidden => {
                panic!("panic on forbidden message type: {}", item.describe())
            }
            ItemKind::Unrecognized(_) => return Err(Error::UnknownKind(item.describe())),
        }
        Ok(())
    }

    /// Applies a command. Returns the audit text to echo, or `None` for
    /// commands that are not echoed.
    fn apply_command(&self, id: u8, item: &QueueItem) -> Result<Option<String>, Error> {
        let command = CommandId::from_raw(id).ok_or_else(|| Error::UnknownCommand(item.describe()))?;
        match command {
            CommandId::ClientSetLevel => {
                let client = command_client(item)?;
                let level = Level::normalize(item.data[0]);
                client.set_min_level(level);
                Ok(Some(format!("<COMMAND: {} level={level}>", command.as_str())))
            }
            CommandId::ClientSetName => {
                let client = command_client(item)?;
                client.set_name(item.data.clone());
                Ok(Some(format!(
                    "<COMMAND: {} name=`{}`>",
                    command.as_str(),
                    String::from_utf8_lossy(&item.data)
                )))
            }
            CommandId::Dummy | CommandId::ClientDummy => {
                Ok(Some(format!("<COMMAND: {}>", command.as_str())))
            }
            CommandId::PingFallback => {
                self.report(PING_MESSAGE);
                Ok(None)
            }
        }
    }

    /// Writes a text item to every enabled output whose minimum level and the
    /// global minimum level both admit it.
    fn write_text(&self, item: &QueueItem, buf: &mut Vec<u8>) {
        let ItemKind::Text(level) = item.kind else {
            return;
        };
        if level.as_u8() < self.raw_level() {
            return;
        }
        let name = item.client.as_ref().map(|client| client.name());
        let parts = LineParts {
            level,
            pushed: item.pushed,
            client: name.as_ref().map(|name| name.as_slice()),
            payload: &item.data,
        };

        // Sink I/O happens without holding the registry lock.
        let targets: Vec<(SharedOutput, OutputContext)> = self
            .outputs
            .read()
            .iter()
            .filter(|slot| slot.context.enabled && level >= slot.context.min_level)
            .map(|slot| (Arc::clone(&slot.output), slot.context.clone()))
            .collect();

        for (output, context) in &targets {
            match write_output(output, context, &parts, buf) {
                Ok(()) => {}
                Err(WriteFault::Transient(e)) => self.report(&e.to_string()),
                Err(WriteFault::Fatal(e)) => {
                    self.disable_output(output);
                    internal::warn(
                        "DISPATCH",
                        &format!("Output `{}` disabled after a panic", output.name()),
                    );
                    self.report(&e.to_string());
                }
            }
        }
    }

    fn disable_output(&self, output: &SharedOutput) {
        let addr = output_addr(output);
        if let Some(slot) = self
            .outputs
            .write()
            .iter_mut()
            .find(|slot| output_addr(&slot.output) == addr)
        {
            slot.context.enabled = false;
        }
    }

    /// Writes one line to the fallback. A panicking fallback is ignored.
    pub(crate) fn report(&self, text: &str) {
        let fallback = Arc::clone(&*self.fallback.read());
        let mut line = Vec::with_capacity(text.len() + 1);
        line.extend_from_slice(text.as_bytes());
        line.push(b'\n');
        let _ = panic::catch_unwind(AssertUnwindSafe(|| fallback.write(&line)));
    }

    fn flush_outputs(&self) {
        let outputs: Vec<SharedOutput> = self
            .outputs
            .read()
            .iter()
            .filter(|slot| slot.context.enabled)
            .map(|slot| Arc::clone(&slot.output))
            .collect();
        for output in &outputs {
            match panic::catch_unwind(AssertUnwindSafe(|| output.flush())) {
                Ok(Ok(())) | Err(_) => {}
                Ok(Err(e)) => self.report(&format!("error flushing output `{}`: {e}", output.name())),
            }
        }
        let fallback = Arc::clone(&*self.fallback.read());
        let _ = panic::catch_unwind(AssertUnwindSafe(|| fallback.flush()));
    }
}

fn command_client(item: &QueueItem) -> Result<&Arc<ClientState>, Error> {
    if item.data.is_empty() {
        return Err(Error::CommandEmptyData);
    }
    item.client.as_ref().ok_or(Error::CommandNilClient)
}

/// Formats and writes one line. A panic in either step is fatal for the
/// output.
fn write_output(
    output: &SharedOutput,
    context: &OutputContext,
    parts: &LineParts<'_>,
    buf: &mut Vec<u8>,
) -> Result<(), WriteFault> {
    let attempt = panic::catch_unwind(AssertUnwindSafe(|| -> Result<(), (usize, io::Error)> {
        build_line(buf, context, parts).map_err(|source| (0, source))?;
        let line = buf.as_slice();
        match output.write(line) {
            Err(source) => Err((0, source)),
            Ok(written) if written < line.len() => Err((
                written,
                io::Error::new(io::ErrorKind::WriteZero, "short write"),
            )),
            Ok(_) => Ok(()),
        }
    }));
    match attempt {
        Ok(Ok(())) => Ok(()),
        Ok(Err((written, source))) => Err(WriteFault::Transient(Error::Write { written, source })),
        Err(payload) => Err(WriteFault::Fatal(Error::Panic(format!(
            " writing log to output `{}`{}",
            output.name(),
            panic_desc(&*payload)
        )))),
    }
}
