//! Tests for TOML configuration and logger construction from it.

use lgr::config::{OutputConfig, parse_level};
use lgr::{Config, Error, Level, LevelMap, Logger};
use std::fs;
use tempfile::TempDir;

const FULL: &str = r#"
[general]
level = "warning"
buffer_size = 8
fallback = "discard"

[[outputs]]
kind = "stdout"
time_format = "%H:%M:%S"
time_delimiter = " | "
prefix = "full"
delimiter = " "
color = true
show_level_id = true
min_level = "err"

[[outputs]]
kind = "file"
path = "/tmp/lgr-config-test.log"
"#;

#[test]
fn parse_full_document() {
    let config: Config = FULL.parse().unwrap();
    assert_eq!(config.parse_level().unwrap(), Level::Warn);
    assert_eq!(config.general.buffer_size, 8);
    assert!(config.build_fallback().unwrap().is_none());
    assert_eq!(config.outputs.len(), 2);

    let context = config.outputs[0].context().unwrap();
    assert_eq!(context.timestamp_format(), "%H:%M:%S");
    assert_eq!(context.delimiter(), " ");
    assert_eq!(context.prefixes(), Some(&LevelMap::FULL_NAMES));
    assert_eq!(context.colors(), Some(&LevelMap::COLOR_ON_BLACK));
    assert!(context.shows_level_id());
    assert_eq!(context.minimum_level(), Level::Error);

    let file = &config.outputs[1];
    assert_eq!(file.path.as_deref(), Some("/tmp/lgr-config-test.log"));
    assert_eq!(file.prefix, "short");
    assert_eq!(file.build_output().unwrap().name(), "/tmp/lgr-config-test.log");
}

#[test]
fn logger_from_config() {
    let config: Config = FULL.parse().unwrap();
    let logger = Logger::from_config(&config).unwrap();
    assert_eq!(logger.min_level(), Level::Warn);
    assert_eq!(logger.output_count(), 2);
    assert!(!logger.is_active());
}

#[test]
fn start_from_config_uses_buffer_size() {
    let config: Config = "[general]\nbuffer_size = 2\n".parse().unwrap();
    let logger = Logger::start_from_config(&config).unwrap();
    assert!(logger.is_active());
    logger.stop_and_wait();
}

#[test]
fn invalid_level_is_rejected() {
    let config: Config = "[general]\nlevel = \"loud\"\n".parse().unwrap();
    assert!(matches!(config.parse_level(), Err(Error::InvalidLevel(ref s)) if s == "loud"));
    assert!(Logger::from_config(&config).is_err());
    assert!(matches!(parse_level("TRC"), Ok(Level::Trace)));
}

#[test]
fn unknown_output_kind_is_rejected() {
    let output = OutputConfig {
        kind: "syslog".to_string(),
        ..OutputConfig::default()
    };
    let err = output.build_output().err().unwrap();
    assert!(matches!(err, Error::InvalidConfig(_)));
    assert_eq!(err.to_string(), "invalid config: unknown output kind `syslog`");

    let config: Config = "[general]\nfallback = \"pager\"\n".parse().unwrap();
    let err = config.build_fallback().err().unwrap();
    assert_eq!(err.to_string(), "invalid config: unknown fallback `pager`");
}

#[test]
fn malformed_toml_is_a_parse_error() {
    let err = "[general\nlevel =".parse::<Config>().unwrap_err();
    assert!(matches!(err, Error::ConfigParse(_)));
}

#[test]
fn load_from_file() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("lgr.toml");
    fs::write(&path, "[general]\nlevel = \"debug\"\nfallback = \"stdout\"\n").unwrap();

    let config = Config::load_from(&path).unwrap();
    assert_eq!(config.parse_level().unwrap(), Level::Debug);
    assert_eq!(config.build_fallback().unwrap().unwrap().name(), "stdout");
}

#[test]
fn load_from_missing_file_is_io_error() {
    let tmp = TempDir::new().unwrap();
    let err = Config::load_from(tmp.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn config_path_ends_in_lgr_toml() {
    let path = Config::get_config_path().unwrap();
    assert!(path.ends_with("lgr/lgr.toml"));
}
