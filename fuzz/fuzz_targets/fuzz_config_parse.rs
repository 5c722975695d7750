#![no_main]
use libfuzzer_sys::fuzz_target;
use lgr::Config;

fuzz_target!(|data: &str| {
    // Must not panic on any config content
    let Ok(config) = data.parse::<Config>() else {
        return;
    };
    let _ = config.parse_level();
    let _ = config.build_fallback();
    for output in &config.outputs {
        let _ = output.context();
    }
});
