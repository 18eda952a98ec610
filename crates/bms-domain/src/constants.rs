//! Domain constants
//!
//! Category labels used in error messages, log fields and qualified
//! health-check keys (`"database:firestore"`).

/// Database provider category
pub const DATABASE_CATEGORY: &str = "database";

/// Authentication provider category
pub const AUTH_CATEGORY: &str = "auth";

/// Object storage provider category
pub const STORAGE_CATEGORY: &str = "storage";

/// Email delivery provider category
pub const EMAIL_CATEGORY: &str = "email";

/// Payment provider category
pub const PAYMENT_CATEGORY: &str = "payment";

/// Identifier generation provider category
pub const ID_CATEGORY: &str = "id";

/// Translation provider category
pub const TRANSLATION_CATEGORY: &str = "translation";

/// Per-entity repository factory table
pub const REPOSITORY_CATEGORY: &str = "repository";

/// Separator between provider and entity in repository keys,
/// and between category and instance name in health-check keys
pub const KEY_SEPARATOR: &str = ":";
