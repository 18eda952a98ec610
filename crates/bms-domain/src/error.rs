//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the business management backend
#[derive(Error, Debug)]
pub enum Error {
    /// No provider or repository factory is registered under the requested name
    #[error("{category} provider '{name}' is not registered")]
    NotRegistered {
        /// Category the lookup was made in (e.g. "database", "repository")
        category: String,
        /// Requested provider name or composite key
        name: String,
    },

    /// A config transformer rejected the raw configuration
    #[error("Failed to transform {category} config for provider '{provider}': {source}")]
    Transform {
        /// Provider category
        category: String,
        /// Provider whose transformer failed
        provider: String,
        /// The transformer's own error
        #[source]
        source: Box<Error>,
    },

    /// A registered env builder ran and failed
    #[error("Failed to build {category} provider '{provider}': {source}")]
    Build {
        /// Provider category
        category: String,
        /// Provider whose builder failed
        provider: String,
        /// The builder's own error, unmodified
        #[source]
        source: Box<Error>,
    },

    /// A type-erased handle held a different concrete type than requested
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        /// Requested concrete type
        expected: String,
        /// Concrete type actually stored
        actual: String,
    },

    /// A live instance reported itself unhealthy
    #[error("Health check failed for '{name}': {source}")]
    HealthCheck {
        /// Instance name
        name: String,
        /// The probe's error
        #[source]
        source: Box<Error>,
    },

    /// The caller cancelled the operation before the instance answered
    #[error("Operation cancelled for '{name}'")]
    Cancelled {
        /// Instance name
        name: String,
    },

    /// The caller's deadline passed before the instance answered
    #[error("Deadline exceeded for '{name}'")]
    DeadlineExceeded {
        /// Instance name
        name: String,
    },

    /// One or more instances failed to close
    #[error("{}", summarize_close_failures(.failures))]
    Close {
        /// Failed instances with their errors, in close order
        failures: Vec<(String, Error)>,
    },

    /// A live instance was offered to a registry that is already closed
    #[error("{category} registry is closed, '{name}' was not registered")]
    RegistryClosed {
        /// Category of the closed registry
        category: String,
        /// Rejected instance name
        name: String,
    },

    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Configuration-related error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Authentication-related error
    #[error("Authentication error: {message}")]
    Authentication {
        /// Description of the authentication error
        message: String,
    },

    /// Network-related error
    #[error("Network error: {message}")]
    Network {
        /// Description of the network error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Database-related error
    #[error("Database error: {message}")]
    Database {
        /// Description of the database error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Object storage error
    #[error("Storage error: {message}")]
    Storage {
        /// Description of the storage error
        message: String,
    },

    /// Payment processing error
    #[error("Payment error: {message}")]
    Payment {
        /// Description of the payment error
        message: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

fn summarize_close_failures(failures: &[(String, Error)]) -> String {
    let details: Vec<String> = failures
        .iter()
        .map(|(name, err)| format!("{name} ({err})"))
        .collect();
    format!(
        "Failed to close {} instance(s): {}",
        failures.len(),
        details.join("; ")
    )
}

// Registry error creation methods
impl Error {
    /// Create a not-registered error
    pub fn not_registered<C: Into<String>, N: Into<String>>(category: C, name: N) -> Self {
        Self::NotRegistered {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Wrap a config transformer failure with its provider name
    pub fn transform<C: Into<String>, P: Into<String>>(
        category: C,
        provider: P,
        source: Error,
    ) -> Self {
        Self::Transform {
            category: category.into(),
            provider: provider.into(),
            source: Box::new(source),
        }
    }

    /// Wrap an env builder failure with its provider name
    pub fn build<C: Into<String>, P: Into<String>>(
        category: C,
        provider: P,
        source: Error,
    ) -> Self {
        Self::Build {
            category: category.into(),
            provider: provider.into(),
            source: Box::new(source),
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch<E: Into<String>, A: Into<String>>(expected: E, actual: A) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

// Lifecycle error creation methods
impl Error {
    /// Wrap a health probe failure with the instance name
    pub fn health_check<S: Into<String>>(name: S, source: Error) -> Self {
        Self::HealthCheck {
            name: name.into(),
            source: Box::new(source),
        }
    }

    /// Create a cancellation error
    pub fn cancelled<S: Into<String>>(name: S) -> Self {
        Self::Cancelled { name: name.into() }
    }

    /// Create a deadline-exceeded error
    pub fn deadline_exceeded<S: Into<String>>(name: S) -> Self {
        Self::DeadlineExceeded { name: name.into() }
    }

    /// Create a registry-closed error
    pub fn registry_closed<C: Into<String>, N: Into<String>>(category: C, name: N) -> Self {
        Self::RegistryClosed {
            category: category.into(),
            name: name.into(),
        }
    }

    /// Aggregate close failures; `None` when nothing failed
    pub fn close(failures: Vec<(String, Error)>) -> Option<Self> {
        if failures.is_empty() {
            None
        } else {
            Some(Self::Close { failures })
        }
    }
}

// Basic error creation methods
impl Error {
    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an authentication error
    pub fn authentication<S: Into<String>>(message: S) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network<S: Into<String>>(message: S) -> Self {
        Self::Network {
            message: message.into(),
            source: None,
        }
    }

    /// Create a database error
    pub fn database<S: Into<String>>(message: S) -> Self {
        Self::Database {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage error
    pub fn storage<S: Into<String>>(message: S) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Create a payment error
    pub fn payment<S: Into<String>>(message: S) -> Self {
        Self::Payment {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// Classification helpers
impl Error {
    /// True for unknown-name lookups (a wiring/configuration mistake)
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered { .. })
    }

    /// True when a type-erased handle held the wrong concrete type
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// True when the caller's context cancelled or timed out the operation
    pub fn is_cancellation(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::DeadlineExceeded { .. })
    }

    /// Names of the instances that failed to close, if this is a close error
    pub fn failed_instances(&self) -> Vec<&str> {
        match self {
            Self::Close { failures } => failures.iter().map(|(name, _)| name.as_str()).collect(),
            _ => Vec::new(),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }
}
