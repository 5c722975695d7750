//! Output registry. Outputs are keyed by identity: registering the same `Arc`
//! twice is a no-op, and per-output setters silently ignore outputs that are
//! not registered.

use super::{Logger, OutputSlot};
use crate::fmt::LevelMap;
use crate::internal;
use crate::level::Level;
use crate::output::{OutputContext, SharedOutput, output_addr};
use std::sync::Arc;

impl Logger {
    /// Registers outputs with a default [`OutputContext`]. Already registered
    /// outputs are skipped.
    pub fn add_outputs(&self, outputs: impl IntoIterator<Item = SharedOutput>) -> &Self {
        let mut slots = self.shared.outputs.write();
        for output in outputs {
            let addr = output_addr(&output);
            if slots.iter().any(|slot| output_addr(&slot.output) == addr) {
                continue;
            }
            internal::trace("LOGGER", &format!("Added output `{}`", output.name()));
            slots.push(OutputSlot {
                output,
                context: OutputContext::default(),
            });
        }
        self
    }

    /// Registers one output with the given context, or replaces the context
    /// of an output already registered.
    pub fn add_output_with_context(&self, output: SharedOutput, context: OutputContext) -> &Self {
        let mut slots = self.shared.outputs.write();
        let addr = output_addr(&output);
        if let Some(slot) = slots.iter_mut().find(|slot| output_addr(&slot.output) == addr) {
            slot.context = context;
        } else {
            slots.push(OutputSlot { output, context });
        }
        self
    }

    /// Unregisters `output`. Does nothing if it is not registered.
    pub fn remove_output<O: ?Sized>(&self, output: &Arc<O>) -> &Self {
        let addr = output_addr(output);
        self.shared
            .outputs
            .write()
            .retain(|slot| output_addr(&slot.output) != addr);
        self
    }

    pub fn remove_outputs<'a>(&self, outputs: impl IntoIterator<Item = &'a SharedOutput>) -> &Self {
        for output in outputs {
            self.remove_output(output);
        }
        self
    }

    pub fn clear_outputs(&self) -> &Self {
        self.shared.outputs.write().clear();
        self
    }

    #[must_use]
    pub fn has_output<O: ?Sized>(&self, output: &Arc<O>) -> bool {
        let addr = output_addr(output);
        self.shared
            .outputs
            .read()
            .iter()
            .any(|slot| output_addr(&slot.output) == addr)
    }

    /// `false` for unregistered outputs and for outputs disabled after a
    /// panicking write.
    #[must_use]
    pub fn is_output_enabled<O: ?Sized>(&self, output: &Arc<O>) -> bool {
        self.output_context(output).is_some_and(|context| context.enabled)
    }

    /// Snapshot of the settings of a registered output.
    #[must_use]
    pub fn output_context<O: ?Sized>(&self, output: &Arc<O>) -> Option<OutputContext> {
        let addr = output_addr(output);
        self.shared
            .outputs
            .read()
            .iter()
            .find(|slot| output_addr(&slot.output) == addr)
            .map(|slot| slot.context.clone())
    }

    #[must_use]
    pub fn output_count(&self) -> usize {
        self.shared.outputs.read().len()
    }

    /// Sets the prefix table and delimiter of a registered output.
    pub fn set_output_level_prefix<O: ?Sized>(
        &self,
        output: &Arc<O>,
        prefixes: Option<LevelMap>,
        delimiter: &str,
    ) -> &Self {
        self.update_context(output, |context| {
            context.prefix_map = prefixes;
            context.delimiter = delimiter.to_string();
        })
    }

    pub fn set_output_level_color<O: ?Sized>(&self, output: &Arc<O>, colors: Option<LevelMap>) -> &Self {
        self.update_context(output, |context| context.color_map = colors)
    }

    /// Sets the timestamp layout of a registered output. An empty `format`
    /// disables timestamps.
    pub fn set_output_time_format<O: ?Sized>(&self, output: &Arc<O>, format: &str, delimiter: &str) -> &Self {
        self.update_context(output, |context| {
            context.time_format = format.to_string();
            context.time_delimiter = delimiter.to_string();
        })
    }

    pub fn show_output_level_code<O: ?Sized>(&self, output: &Arc<O>, show: bool) -> &Self {
        self.update_context(output, |context| context.show_level_id = show)
    }

    pub fn set_output_min_level<O: ?Sized>(&self, output: &Arc<O>, level: Level) -> &Self {
        self.update_context(output, |context| context.min_level = level)
    }

    fn update_context<O: ?Sized>(&self, output: &Arc<O>, apply: impl FnOnce(&mut OutputContext)) -> &Self {
        let addr = output_addr(output);
        if let Some(slot) = self
            .shared
            .outputs
            .write()
            .iter_mut()
            .find(|slot| output_addr(&slot.output) == addr)
        {
            apply(&mut slot.context);
        }
        self
    }
}
