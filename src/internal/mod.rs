//! lgr's own diagnostic trace: worker start/stop, outputs created or
//! disabled, config resolution.
//!
//! Written synchronously to stderr with the same line builder the engine
//! uses, never through a `Logger`, so the worker can report about itself
//! without feeding its own queue. Uses `OnceLock` so the first `init` wins
//! even if several entry points (CLI, tests) race to call it.

use crate::fmt::{LevelMap, LineParts, build_line};
use crate::level::Level;
use crate::output::{Output, OutputContext, TerminalOutput};
use std::sync::OnceLock;

/// Environment variable read by [`init_from_env`].
pub const ENV_LEVEL: &str = "LGR_INTERNAL_LEVEL";

struct InternalLog {
    level: Level,
    output: TerminalOutput,
    context: OutputContext,
}

static INTERNAL_LOG: OnceLock<InternalLog> = OnceLock::new();

/// Enables the trace at `level`. Only the first call takes effect.
pub fn init(level: Level) {
    let was_init = INTERNAL_LOG.get().is_some();
    INTERNAL_LOG.get_or_init(|| InternalLog {
        level,
        output: TerminalOutput::stderr(),
        context: OutputContext::new()
            .time_format("%H:%M:%S%.3f", " ")
            .level_prefix(Some(LevelMap::SHORT_NAMES), ":"),
    });
    if !was_init {
        debug("INTERNAL", &format!("Internal log level: {level}"));
    }
}

/// Calls [`init`] with the level named by `LGR_INTERNAL_LEVEL`, if set and
/// valid. Returns whether the trace is now enabled.
pub fn init_from_env() -> bool {
    if let Ok(raw) = std::env::var(ENV_LEVEL)
        && let Ok(level) = raw.parse::<Level>()
    {
        init(level);
    }
    INTERNAL_LOG.get().is_some()
}

/// Pre-init calls silently vanish.
fn log(level: Level, scope: &str, msg: &str) {
    let Some(internal) = INTERNAL_LOG.get() else {
        return;
    };
    if level < internal.level {
        return;
    }
    let mut buf = Vec::with_capacity(scope.len() + msg.len() + 32);
    let parts = LineParts {
        level,
        pushed: None,
        client: Some(scope.as_bytes()),
        payload: msg.as_bytes(),
    };
    if build_line(&mut buf, &internal.context, &parts).is_ok() {
        let _ = internal.output.write(&buf);
    }
}

pub fn trace(scope: &str, msg: &str) {
    log(Level::Trace, scope, msg);
}

pub fn debug(scope: &str, msg: &str) {
    log(Level::Debug, scope, msg);
}

pub fn info(scope: &str, msg: &str) {
    log(Level::Info, scope, msg);
}

pub fn warn(scope: &str, msg: &str) {
    log(Level::Warn, scope, msg);
}

pub fn error(scope: &str, msg: &str) {
    log(Level::Error, scope, msg);
}
