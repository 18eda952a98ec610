//! Provider-specific constants

// ============================================================================
// PROVIDER NAMES
// ============================================================================

pub const MOCK_DATABASE_PROVIDER: &str = "mock_db";
pub const MOCK_AUTH_PROVIDER: &str = "mock_auth";
pub const MOCK_STORAGE_PROVIDER: &str = "mock_storage";
pub const MOCK_EMAIL_PROVIDER: &str = "mock_email";
pub const MOCK_PAYMENT_PROVIDER: &str = "mock_payment";
pub const UUID_ID_PROVIDER: &str = "uuid";
pub const SEQUENTIAL_ID_PROVIDER: &str = "sequential";
pub const MOCK_TRANSLATION_PROVIDER: &str = "mock_translation";

// ============================================================================
// ENVIRONMENT PREFIXES
// ============================================================================

/// `BMS_MOCK_DB_NAME`, `BMS_MOCK_DB_FAIL_HEALTH`
pub const MOCK_DATABASE_ENV_PREFIX: &str = "BMS_MOCK_DB_";

/// `BMS_MOCK_AUTH_TOKENS={token="subject"}`, `BMS_MOCK_AUTH_TENANT_ID`
pub const MOCK_AUTH_ENV_PREFIX: &str = "BMS_MOCK_AUTH_";

/// `BMS_MOCK_STORAGE_BUCKET`
pub const MOCK_STORAGE_ENV_PREFIX: &str = "BMS_MOCK_STORAGE_";

/// `BMS_MOCK_EMAIL_SENDER`
pub const MOCK_EMAIL_ENV_PREFIX: &str = "BMS_MOCK_EMAIL_";

/// `BMS_MOCK_PAYMENT_CURRENCY`
pub const MOCK_PAYMENT_ENV_PREFIX: &str = "BMS_MOCK_PAYMENT_";

/// `BMS_ID_PREFIX`, shared by both id providers
pub const ID_ENV_PREFIX: &str = "BMS_ID_";

/// `BMS_MOCK_TRANSLATION_DEFAULT_LOCALE`
pub const MOCK_TRANSLATION_ENV_PREFIX: &str = "BMS_MOCK_TRANSLATION_";

// ============================================================================
// DEFAULTS
// ============================================================================

pub const MOCK_DATABASE_DEFAULT_NAME: &str = "bms";
pub const MOCK_STORAGE_DEFAULT_BUCKET: &str = "bms-mock";
pub const MOCK_EMAIL_DEFAULT_SENDER: &str = "noreply@bms.local";
pub const MOCK_PAYMENT_DEFAULT_CURRENCY: &str = "USD";
pub const MOCK_TRANSLATION_DEFAULT_LOCALE: &str = "en";

/// Entities the mock database serves repositories for
pub const MOCK_ENTITIES: &[&str] = &["client", "staff", "role", "product"];
