#![no_main]
use libfuzzer_sys::fuzz_target;
use lgr::{Level, LevelMap, LineParts, OutputContext, build_line};

fuzz_target!(|data: &str| {
    // Must not panic on any user-supplied time layout
    let (format, payload) = data.split_once('\n').unwrap_or((data, ""));
    let context = OutputContext::new()
        .time_format(format, " ")
        .level_prefix(Some(LevelMap::SHORT_NAMES), ":");
    let parts = LineParts {
        level: Level::Info,
        pushed: None,
        client: Some(b"fuzz".as_slice()),
        payload: payload.as_bytes(),
    };
    let mut buf = Vec::new();
    let _ = build_line(&mut buf, &context, &parts);
});
