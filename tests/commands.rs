//! Tests for queued client commands and their ordering guarantees.

use lgr::{Error, Level, LevelMap, Logger, MemoryOutput, SharedOutput};
use std::sync::Arc;

fn started() -> (Logger, Arc<MemoryOutput>, Arc<MemoryOutput>) {
    let out = Arc::new(MemoryOutput::new());
    let fallback = Arc::new(MemoryOutput::named("fallback"));
    let logger = Logger::with_params(
        Level::Unknown,
        Some(fallback.clone() as SharedOutput),
        [out.clone() as SharedOutput],
    );
    logger.start(0).unwrap();
    (logger, out, fallback)
}

#[test]
fn rename_applies_in_queue_order() {
    let (logger, out, _) = started();
    let client = logger.new_client_default("N");

    client.info("a");
    logger.set_client_name(&client, "M").unwrap();
    client.info("b");
    logger.stop_and_wait();

    assert_eq!(
        out.lines(),
        ["N:a", "M:<COMMAND: set_name name=`M`>", "M:b"]
    );
    assert_eq!(client.name(), "M");
}

#[test]
fn queued_entries_keep_the_old_name_even_when_the_worker_lags() {
    let (logger, out, _) = started();
    let client = logger.new_client_default("old");
    for i in 0..10 {
        client.info(&i.to_string());
    }
    logger.set_client_name(&client, "new").unwrap();
    client.info("last");
    logger.stop_and_wait();

    let lines = out.lines();
    assert_eq!(lines.len(), 12);
    assert!(lines[..10].iter().all(|line| line.starts_with("old:")));
    assert_eq!(lines[11], "new:last");
}

#[test]
fn level_change_is_echoed_at_trace() {
    let (logger, out, _) = started();
    logger.set_output_level_prefix(&out, Some(LevelMap::SHORT_NAMES), ":");
    let client = logger.new_client_default("c");

    logger.set_client_min_level(&client, Level::Warn).unwrap();
    logger.stop_and_wait();

    assert_eq!(out.lines(), ["TRC:c:<COMMAND: set_level level=warn>"]);
    assert_eq!(client.min_level(), Level::Warn);
}

#[test]
fn level_change_filters_later_calls() {
    let (logger, out, _) = started();
    let client = logger.new_client_default("c");
    logger.set_client_min_level(&client, Level::Error).unwrap();
    // Not applied until the worker pops the command.
    logger.stop_and_wait();
    logger.start(0).unwrap();

    assert!(client.info("hidden").is_none());
    assert!(client.error("shown").is_some());
    logger.stop_and_wait();
    assert_eq!(
        out.lines(),
        ["c:<COMMAND: set_level level=error>", "c:shown"]
    );
}

#[test]
fn audit_line_respects_global_level() {
    let (logger, out, _) = started();
    logger.set_min_level(Level::Info);
    let client = logger.new_client_default("c");
    logger.set_client_name(&client, "d").unwrap();
    client.info("x");
    logger.stop_and_wait();

    assert_eq!(out.lines(), ["d:x"]);
    assert_eq!(client.name(), "d");
}

#[test]
fn empty_name_is_rejected_by_the_worker() {
    let (logger, out, fallback) = started();
    let client = logger.new_client_default("keep");
    assert!(logger.set_client_name(&client, "").is_ok());
    client.info("x");
    logger.stop_and_wait();

    assert_eq!(out.lines(), ["keep:x"]);
    assert_eq!(
        fallback.lines(),
        ["error proceeding message: no data in command message"]
    );
}

#[test]
fn commands_need_an_active_logger() {
    let (logger, _, _) = started();
    let client = logger.new_client_default("c");
    logger.stop_and_wait();

    assert!(matches!(
        logger.set_client_name(&client, "x"),
        Err(Error::Inactive)
    ));
    assert!(matches!(
        logger.set_client_min_level(&client, Level::Info),
        Err(Error::Inactive)
    ));
    assert!(matches!(logger.ping_fallback(), Err(Error::Inactive)));
    assert_eq!(client.name(), "c");
}

#[test]
fn disabling_does_not_drop_queued_entries() {
    let (logger, out, _) = started();
    let client = logger.new_client_default("c");
    client.info("queued");
    logger.set_client_enabled(&client, false).unwrap();
    assert!(client.info("dropped").is_none());
    logger.set_client_enabled(&client, true).unwrap();
    client.info("back");
    logger.stop_and_wait();

    assert_eq!(out.lines(), ["c:queued", "c:back"]);
}
