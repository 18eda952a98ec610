//! Translation Provider Registry

use std::collections::HashMap;
use std::path::PathBuf;

use bms_domain::ports::TranslationProvider;
use serde::{Deserialize, Serialize};

/// Configuration for translation provider creation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationProviderConfig {
    /// Provider name (e.g., "lyngua", "mock_translation")
    pub provider: String,
    /// Fallback locale
    pub default_locale: Option<String>,
    /// Directory holding message catalogs
    pub resources_path: Option<PathBuf>,
    /// Additional provider-specific configuration
    pub extra: HashMap<String, String>,
}

impl TranslationProviderConfig {
    /// Create a new config with the given provider name
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            ..Default::default()
        }
    }

    /// Set the fallback locale
    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = Some(locale.into());
        self
    }
}

provider_facade! {
    label: "translation",
    port: TranslationProvider,
    config: TranslationProviderConfig,
    registry: TranslationProviderRegistry,
    accessor: translation,
    register_factory: register_translation_provider_factory,
    get_factory: get_translation_provider_factory,
    list_factories: list_available_translation_provider_factories,
    register_transformer: register_translation_config_transformer,
    get_transformer: get_translation_config_transformer,
    transform: transform_translation_config,
    register_builder: register_translation_build_from_env,
    get_builder: get_translation_build_from_env,
    build: build_translation_provider_from_env,
    list_builders: list_available_translation_build_from_env,
}
