#![no_main]
use libfuzzer_sys::fuzz_target;
use lgr::Level;

fuzz_target!(|data: &[u8]| {
    // Must not panic on any level string or raw byte
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<Level>();
    }
    for &raw in data {
        let _ = Level::normalize(raw);
    }
});
