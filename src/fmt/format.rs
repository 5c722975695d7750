//! Line builder for text entries.
//!
//! Segment order is fixed: timestamp, `[level id]`, level prefix + delimiter,
//! color open, client name + delimiter, payload, color reset, newline.

use super::color::{ANSI_COLOR_PREFIX, ANSI_COLOR_RESET, ANSI_COLOR_SUFFIX};
use crate::level::Level;
use crate::output::OutputContext;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::io::{self, Write};

/// Borrowed view of one text entry.
#[derive(Debug, Clone, Copy)]
pub struct LineParts<'a> {
    pub level: Level,
    /// Push time; `None` falls back to the time of formatting.
    pub pushed: Option<DateTime<Local>>,
    /// Absent for engine-internal entries.
    pub client: Option<&'a [u8]>,
    pub payload: &'a [u8],
}

/// Renders `parts` into `buf` (cleared first) according to `context`.
///
/// # Errors
/// Fails only when the context's time format contains an invalid specifier.
pub fn build_line(buf: &mut Vec<u8>, context: &OutputContext, parts: &LineParts<'_>) -> io::Result<()> {
    buf.clear();
    let level = parts.level;

    if !context.time_format.is_empty() {
        let invalid = || {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid time format `{}`", context.time_format),
            )
        };
        let items = StrftimeItems::new(&context.time_format);
        if items.clone().any(|item| matches!(item, Item::Error)) {
            return Err(invalid());
        }
        // Some layouts parse but fail while formatting (`%#z`); `io::Write`
        // would turn that failure into a panic.
        let pushed = parts.pushed.unwrap_or_else(Local::now);
        let mut stamp = String::new();
        write!(stamp, "{}", pushed.format_with_items(items)).map_err(|_| invalid())?;
        buf.extend_from_slice(stamp.as_bytes());
        buf.extend_from_slice(context.time_delimiter.as_bytes());
    }

    if context.show_level_id {
        write!(buf, "[{}]", level.as_u8())?;
    }

    if let Some(prefixes) = &context.prefix_map {
        buf.extend_from_slice(prefixes.get(level).as_bytes());
        buf.extend_from_slice(context.delimiter.as_bytes());
    }

    let colored = if let Some(colors) = &context.color_map {
        buf.extend_from_slice(ANSI_COLOR_PREFIX.as_bytes());
        buf.extend_from_slice(colors.get(level).as_bytes());
        buf.extend_from_slice(ANSI_COLOR_SUFFIX.as_bytes());
        true
    } else {
        false
    };

    if let Some(name) = parts.client {
        buf.extend_from_slice(name);
        buf.extend_from_slice(context.delimiter.as_bytes());
    }

    buf.extend_from_slice(parts.payload);
    if colored {
        buf.extend_from_slice(ANSI_COLOR_RESET.as_bytes());
    }
    buf.push(b'\n');
    Ok(())
}
