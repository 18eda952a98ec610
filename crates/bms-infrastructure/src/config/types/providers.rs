//! Provider selection configuration

use bms_domain::constants::{
    AUTH_CATEGORY, DATABASE_CATEGORY, EMAIL_CATEGORY, ID_CATEGORY, PAYMENT_CATEGORY,
    STORAGE_CATEGORY, TRANSLATION_CATEGORY,
};
use serde::{Deserialize, Serialize};

/// Which registered provider serves each category
///
/// Every field holds a provider name as registered in `ProviderFactories`
/// (e.g. `"mock_db"`). Unset categories are not built at all.
///
/// ```toml
/// [providers]
/// database = "mock_db"
/// auth = "mock_auth"
/// id = "uuid"
/// disabled = ["mock_auth"]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    pub database: Option<String>,
    pub auth: Option<String>,
    pub storage: Option<String>,
    pub email: Option<String>,
    pub payment: Option<String>,
    pub id: Option<String>,
    pub translation: Option<String>,

    /// Provider names registered disabled (built, but skipped by health sweeps)
    pub disabled: Vec<String>,
}

impl ProvidersConfig {
    /// Whether `name` should start enabled
    pub fn is_enabled(&self, name: &str) -> bool {
        !self.disabled.iter().any(|disabled| disabled == name)
    }

    /// Configured `(category, provider)` pairs, in category order
    pub fn selected(&self) -> Vec<(&'static str, &str)> {
        [
            (DATABASE_CATEGORY, &self.database),
            (AUTH_CATEGORY, &self.auth),
            (STORAGE_CATEGORY, &self.storage),
            (EMAIL_CATEGORY, &self.email),
            (PAYMENT_CATEGORY, &self.payment),
            (ID_CATEGORY, &self.id),
            (TRANSLATION_CATEGORY, &self.translation),
        ]
        .into_iter()
        .filter_map(|(category, name)| name.as_deref().map(|name| (category, name)))
        .collect()
    }
}
