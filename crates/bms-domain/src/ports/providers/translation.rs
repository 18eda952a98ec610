//! Translation Provider Port

use crate::ports::lifecycle::ProviderLifecycle;

/// Looks up localized message strings
pub trait TranslationProvider: ProviderLifecycle {
    /// Locale used when a lookup misses in the requested one
    fn default_locale(&self) -> &str;

    /// Translate `key` into `locale`, falling back to the default locale
    fn translate(&self, locale: &str, key: &str) -> Option<String>;
}
