//! Tests for logger construction, lifecycle and output registry.

use lgr::{
    DEFAULT_LOG_LEVEL, DiscardOutput, Error, Level, LevelMap, Logger, MemoryOutput, OutputContext,
    SharedOutput, State,
};
use std::sync::Arc;

fn memory() -> (Arc<MemoryOutput>, SharedOutput) {
    let out = Arc::new(MemoryOutput::new());
    let shared: SharedOutput = out.clone();
    (out, shared)
}

#[test]
fn new_logger_is_stopped() {
    let logger = Logger::new([]);
    assert_eq!(logger.state(), State::Stopped);
    assert!(!logger.is_active());
    assert_eq!(logger.min_level(), DEFAULT_LOG_LEVEL);
    assert_eq!(logger.output_count(), 0);
}

#[test]
fn builder_default() {
    let logger = Logger::builder().build();
    assert_eq!(logger.min_level(), Level::Error);
    assert_eq!(logger.output_count(), 0);
}

#[test]
fn builder_multiple_outputs() {
    let logger = Logger::builder()
        .level(Level::Trace)
        .stderr()
        .done()
        .output(Arc::new(DiscardOutput))
        .build();
    assert_eq!(logger.output_count(), 2);
    assert_eq!(logger.min_level(), Level::Trace);
}

#[test]
fn start_twice_fails() {
    let logger = Logger::with_params(Level::Unknown, None, []);
    logger.start(0).unwrap();
    assert!(matches!(logger.start(0), Err(Error::AlreadyStarted)));
    logger.stop_and_wait();
    assert_eq!(logger.state(), State::Stopped);
}

#[test]
fn wait_before_start_returns() {
    let logger = Logger::with_params(Level::Unknown, None, []);
    logger.wait();
    logger.stop();
    logger.stop_and_wait();
    assert_eq!(logger.state(), State::Stopped);
}

#[test]
fn stop_is_idempotent() {
    let logger = Logger::with_params(Level::Unknown, None, []);
    logger.start(1).unwrap();
    logger.stop();
    logger.stop();
    logger.wait();
    logger.wait();
    assert_eq!(logger.state(), State::Stopped);
}

#[test]
fn restart_after_stop() {
    let (out, shared) = memory();
    let logger = Logger::with_params(Level::Unknown, None, [shared]);
    let client = logger.new_client_default("c");

    logger.start(0).unwrap();
    client.info("one");
    logger.stop();
    logger.start(0).unwrap();
    client.info("two");
    logger.stop_and_wait();

    assert_eq!(out.lines(), ["c:one", "c:two"]);
}

#[test]
fn push_after_stop_is_inactive() {
    let logger = Logger::with_params(Level::Unknown, None, []);
    let client = logger.new_client_default("c");
    logger.start(0).unwrap();
    logger.stop();
    assert!(matches!(
        client.log_with_err(Level::Info, "late"),
        Err(Error::Inactive)
    ));
    logger.wait();
}

#[test]
fn push_before_start_is_inactive() {
    let logger = Logger::with_params(Level::Unknown, None, []);
    let client = logger.new_client_default("c");
    assert!(matches!(
        client.log_with_err(Level::Info, "early"),
        Err(Error::Inactive)
    ));
}

#[test]
fn drop_drains_the_queue() {
    let (out, shared) = memory();
    {
        let logger = Logger::init_and_start(4, [shared]).unwrap();
        let client = logger.new_client_default("c");
        for i in 0..20 {
            client.error(&format!("line {i}"));
        }
    }
    assert_eq!(out.lines().len(), 20);
    assert_eq!(out.lines()[19], "c:line 19");
}

#[test]
fn global_level_filters_at_push_time() {
    let (out, shared) = memory();
    let logger = Logger::with_params(Level::Warn, None, [shared]);
    logger.start(0).unwrap();
    let client = logger.new_client_default("c");

    assert_eq!(client.log_with_err(Level::Info, "dropped").unwrap(), None);
    assert!(client.log_with_err(Level::Warn, "kept").unwrap().is_some());
    logger.set_min_level(Level::Trace);
    assert!(client.log_with_err(Level::Debug, "kept too").unwrap().is_some());
    logger.stop_and_wait();

    assert_eq!(out.lines(), ["c:kept", "c:kept too"]);
}

#[test]
fn per_output_settings() {
    let (terse, terse_shared) = memory();
    let (verbose, verbose_shared) = memory();
    let logger = Logger::with_params(Level::Unknown, None, [terse_shared, verbose_shared]);
    logger
        .set_output_min_level(&terse, Level::Warn)
        .set_output_level_prefix(&verbose, Some(LevelMap::SHORT_NAMES), ":")
        .show_output_level_code(&verbose, true);
    logger.start(0).unwrap();

    let client = logger.new_client_default("c");
    client.info("info");
    client.error("error");
    logger.stop_and_wait();

    assert_eq!(terse.lines(), ["c:error"]);
    assert_eq!(verbose.lines(), ["[3]INF:c:info", "[5]ERR:c:error"]);
}

#[test]
fn time_format_applies_per_output() {
    let (out, shared) = memory();
    let logger = Logger::with_params(Level::Unknown, None, [shared]);
    logger.set_output_time_format(&out, "%Y", "|");
    logger.start(0).unwrap();
    let client = logger.new_client_default("c");
    let pushed = client.info("x").unwrap();
    logger.stop_and_wait();

    assert_eq!(out.lines(), [format!("{}|c:x", pushed.format("%Y"))]);
}

#[test]
fn registry_operations() {
    let (a, a_shared) = memory();
    let (b, b_shared) = memory();
    let logger = Logger::with_params(Level::Unknown, None, []);

    logger.add_outputs([a_shared.clone(), b_shared.clone(), a_shared.clone()]);
    assert_eq!(logger.output_count(), 2);
    assert!(logger.has_output(&a));
    assert!(logger.is_output_enabled(&b));

    logger.remove_outputs([&a_shared]);
    assert!(!logger.has_output(&a));
    assert_eq!(logger.output_count(), 1);

    logger.clear_outputs();
    assert_eq!(logger.output_count(), 0);
    assert!(!logger.has_output(&b));
}

#[test]
fn add_output_with_context_replaces_settings() {
    let (out, shared) = memory();
    let logger = Logger::with_params(Level::Unknown, None, [shared.clone()]);
    logger.add_output_with_context(shared, OutputContext::new().min_level(Level::Fatal));
    assert_eq!(logger.output_count(), 1);
    assert_eq!(
        logger.output_context(&out).unwrap().minimum_level(),
        Level::Fatal
    );
}

#[test]
fn removed_output_receives_nothing_more() {
    let (out, shared) = memory();
    let logger = Logger::with_params(Level::Unknown, None, [shared]);
    logger.start(0).unwrap();
    let client = logger.new_client_default("c");
    client.info("before");
    logger.stop_and_wait();
    logger.remove_output(&out);
    logger.start(0).unwrap();
    client.info("after");
    logger.stop_and_wait();
    assert_eq!(out.lines(), ["c:before"]);
}

#[test]
fn ping_reaches_the_fallback() {
    let fallback = Arc::new(MemoryOutput::new());
    let (out, shared) = memory();
    let logger = Logger::with_params(Level::Unknown, Some(fallback.clone() as SharedOutput), [shared]);
    logger.start(0).unwrap();
    logger.ping_fallback().unwrap();
    logger.stop_and_wait();

    assert_eq!(fallback.contents_string(), format!("{}\n", lgr::PING_MESSAGE));
    assert!(out.is_empty());
}

#[test]
fn debug_shows_state() {
    let logger = Logger::with_params(Level::Info, None, []);
    let text = format!("{logger:?}");
    assert!(text.contains("Stopped"));
    assert!(text.contains("Info"));
}
