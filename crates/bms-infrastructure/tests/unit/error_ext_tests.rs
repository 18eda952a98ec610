//! Error Extension Tests

use std::io;

use bms_domain::error::Error;
use bms_infrastructure::error_ext::ErrorContext;

fn not_found() -> Result<(), io::Error> {
    Err(io::Error::new(io::ErrorKind::NotFound, "bms.toml missing"))
}

#[test]
fn test_io_context_keeps_source() {
    let err = not_found().io_context("Failed to read config").unwrap_err();
    match err {
        Error::Io { message, source } => {
            assert!(message.starts_with("Failed to read config: "));
            assert!(source.is_some());
        }
        other => panic!("expected Io error, got {other:?}"),
    }
}

#[test]
fn test_config_context_maps_to_configuration() {
    let err = not_found().config_context("Bad config").unwrap_err();
    assert!(matches!(err, Error::Configuration { source: Some(_), .. }));
    assert!(err.to_string().contains("Bad config"));
}

#[test]
fn test_context_passes_success_through() {
    let ok: Result<u8, io::Error> = Ok(7);
    assert_eq!(ok.io_context("unused").unwrap(), 7);
}
