//! Infrastructure layer constants
//!
//! Domain-level labels (provider categories, key separators) live in
//! `bms_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "bms.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "bms";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "BMS";

/// Separator between nested keys in environment variable names
/// (`BMS_PROVIDERS__DATABASE` → `providers.database`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_FILTER_ENV: &str = "BMS_LOG";

// ============================================================================
// HEALTH CONSTANTS
// ============================================================================

/// Default deadline for one health sweep, in milliseconds
pub const DEFAULT_HEALTH_TIMEOUT_MS: u64 = 5_000;

/// Default time one instance gets to close, in milliseconds
pub const DEFAULT_CLOSE_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// REPOSITORY CONSTANTS
// ============================================================================

/// Suffix appended to an entity name to form its table name
pub const TABLE_NAME_SUFFIX: &str = "s";
