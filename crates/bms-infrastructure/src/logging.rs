//! Structured logging with tracing
//!
//! Subscriber setup plus the few log helpers shared by the loader, the
//! health report and the CLI.

use std::ffi::OsStr;
use std::path::Path;

use bms_domain::error::{Error, Result};
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub use crate::config::LoggingConfig;
use crate::constants::LOG_FILTER_ENV;
use crate::error_ext::ErrorContext;

/// Initialize the global subscriber from the provided configuration
///
/// `BMS_LOG` (an `EnvFilter` directive) overrides the configured level.
/// Fails instead of panicking when a global subscriber is already set.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let level = parse_log_level(&config.level)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| level_filter(level));

    let file_appender = config.file_output.as_ref().map(|path| {
        tracing_appender::rolling::daily(
            path.parent().unwrap_or_else(|| Path::new(".")),
            path.file_stem().unwrap_or_else(|| OsStr::new("bms")),
        )
    });

    // Layer types differ between the JSON and text formats, hence two branches.
    let registry = Registry::default().with(filter);
    if config.json_format {
        let stdout = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .json()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
        });
        registry
            .with(stdout)
            .with(file)
            .try_init()
            .config_context("Failed to install log subscriber")?;
    } else {
        let stdout = fmt::layer().with_writer(std::io::stderr).with_target(true);
        let file = file_appender.map(|appender| {
            fmt::layer()
                .with_writer(appender)
                .with_ansi(false)
                .with_target(true)
        });
        registry
            .with(stdout)
            .with(file)
            .try_init()
            .config_context("Failed to install log subscriber")?;
    }

    info!(%level, json = config.json_format, "Logging initialized");
    Ok(())
}

/// Parse log level string to tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

/// Filter admitting `level` and above for every target
///
/// Built from the parsed level so aliases like `"warning"` are not
/// mistaken for a target directive.
pub fn level_filter(level: Level) -> EnvFilter {
    EnvFilter::default().add_directive(LevelFilter::from_level(level).into())
}

/// Log configuration loading status
pub fn log_config_loaded(config_path: &Path, success: bool) {
    if success {
        info!(path = %config_path.display(), "Configuration loaded");
    } else {
        warn!(path = %config_path.display(), "Configuration file not found");
    }
}

/// Log health check result
pub fn log_health_check(component: &str, healthy: bool, details: Option<&str>) {
    if healthy {
        debug!(component, "Health check passed");
    } else {
        error!(
            component,
            details = details.unwrap_or("Unknown failure"),
            "Health check failed"
        );
    }
}
