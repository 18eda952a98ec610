//! Error extension utilities
//!
//! Context extension methods that convert foreign errors (I/O, figment,
//! TOML, subscriber setup) into the domain [`Error`].

use std::fmt;

use bms_domain::error::{Error, Result};

/// Extension trait for adding context to errors
///
/// # Example
///
/// ```no_run
/// use bms_infrastructure::error_ext::ErrorContext;
///
/// # fn run() -> bms_domain::Result<()> {
/// let path = std::path::Path::new("bms.toml");
/// let content = std::fs::read_to_string(path)
///     .io_context(format!("Failed to read config file: {}", path.display()))?;
/// # let _ = content;
/// # Ok(())
/// # }
/// ```
pub trait ErrorContext<T> {
    /// Add context for I/O operations
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context for configuration operations
    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn io_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|err| Error::Io {
            message: format!("{context}: {err}"),
            source: Some(Box::new(err)),
        })
    }

    fn config_context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|err| Error::Configuration {
            message: format!("{context}: {err}"),
            source: Some(Box::new(err)),
        })
    }
}
