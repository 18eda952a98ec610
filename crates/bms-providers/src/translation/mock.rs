//! In-memory message catalog
//!
//! Lookups fall back to the default locale when the requested locale has no
//! entry for the key.

use std::collections::HashMap;
use std::sync::Arc;

use bms_application::ports::registry::translation::{
    TranslationProviderConfig, register_translation_build_from_env,
    register_translation_config_transformer, register_translation_provider_factory,
};
use bms_application::ports::registry::{ProviderFactories, serde_transformer};
use bms_domain::error::Result;
use bms_domain::ports::{ProviderLifecycle, TranslationProvider};
use serde::{Deserialize, Serialize};

use crate::constants::{
    MOCK_TRANSLATION_DEFAULT_LOCALE, MOCK_TRANSLATION_ENV_PREFIX, MOCK_TRANSLATION_PROVIDER,
};
use crate::env::from_env;

/// Mock translation settings, read from `BMS_MOCK_TRANSLATION_*`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MockTranslationConfig {
    pub default_locale: String,
    /// `locale → key → text`
    pub messages: HashMap<String, HashMap<String, String>>,
}

impl Default for MockTranslationConfig {
    fn default() -> Self {
        Self {
            default_locale: MOCK_TRANSLATION_DEFAULT_LOCALE.to_string(),
            messages: HashMap::new(),
        }
    }
}

#[derive(Debug, Default)]
pub struct MockTranslationProvider {
    config: MockTranslationConfig,
}

impl MockTranslationProvider {
    pub fn new(config: MockTranslationConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Result<Self> {
        from_env::<MockTranslationConfig>(MOCK_TRANSLATION_ENV_PREFIX).map(Self::new)
    }

    /// Add one catalog entry
    #[must_use]
    pub fn with_message(
        mut self,
        locale: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.config
            .messages
            .entry(locale.into())
            .or_default()
            .insert(key.into(), text.into());
        self
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<&String> {
        self.config.messages.get(locale)?.get(key)
    }
}

#[async_trait::async_trait]
impl ProviderLifecycle for MockTranslationProvider {
    fn provider_name(&self) -> &str {
        MOCK_TRANSLATION_PROVIDER
    }
}

impl TranslationProvider for MockTranslationProvider {
    fn default_locale(&self) -> &str {
        &self.config.default_locale
    }

    fn translate(&self, locale: &str, key: &str) -> Option<String> {
        self.lookup(locale, key)
            .or_else(|| self.lookup(&self.config.default_locale, key))
            .cloned()
    }
}

/// Register `mock_translation`
pub fn register(factories: &ProviderFactories) {
    register_translation_provider_factory(factories, MOCK_TRANSLATION_PROVIDER, || {
        Arc::new(MockTranslationProvider::default())
    });
    register_translation_config_transformer(
        factories,
        MOCK_TRANSLATION_PROVIDER,
        serde_transformer::<TranslationProviderConfig>(),
    );
    register_translation_build_from_env(factories, MOCK_TRANSLATION_PROVIDER, || {
        Ok(Arc::new(MockTranslationProvider::from_env()?))
    });
}
