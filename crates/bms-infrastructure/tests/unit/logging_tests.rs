//! Logging Tests

use bms_infrastructure::config::LoggingConfig;
use bms_infrastructure::logging::{init_logging, level_filter, parse_log_level};
use tracing::Level;
use tracing_subscriber::filter::LevelFilter;

#[test]
fn test_parse_log_level() {
    assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
    assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
    assert_eq!(parse_log_level("warning").unwrap(), Level::WARN);
    assert!(parse_log_level("verbose").is_err());
}

#[test]
fn test_level_alias_filters_by_level() {
    let level = parse_log_level("warning").unwrap();
    let filter = level_filter(level);
    assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
}

#[test]
fn test_init_logging_rejects_bad_level() {
    let config = LoggingConfig {
        level: "loud".to_string(),
        ..LoggingConfig::default()
    };
    assert!(init_logging(&config).is_err());
}

#[test]
fn test_second_init_fails_instead_of_panicking() {
    let config = LoggingConfig::default();
    // The first call may lose the race with another test in this binary.
    let _ = init_logging(&config);
    assert!(init_logging(&config).is_err());
}
