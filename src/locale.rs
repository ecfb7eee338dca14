//! Locale selection for decode-time resolution of localized fields.
//!
//! Every user-facing field in a raw CMS record is a mapping from locale key
//! to value. Decoding resolves each field to a single configured locale, so
//! the rest of the system works with plain values. Switching locale at
//! runtime therefore requires re-decoding the payload.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Locale used when none is configured.
pub const DEFAULT_LOCALE: &str = "en-GB";

/// Environment variable consulted by [`Locale::from_env`].
pub const LOCALE_ENV_VAR: &str = "CMSLOAD_LOCALE";

/// A locale key selecting one value from a localized field's mapping.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Create a locale from a key such as `"en-GB"`.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Read the locale from `CMSLOAD_LOCALE`, falling back to the default.
    ///
    /// The CLI loads `.env` via dotenvy before calling this.
    pub fn from_env() -> Self {
        std::env::var(LOCALE_ENV_VAR)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .map(Self)
            .unwrap_or_default()
    }

    /// The raw locale key.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self(DEFAULT_LOCALE.to_string())
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Locale {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_locale() {
        assert_eq!(Locale::default().as_str(), "en-GB");
    }

    #[test]
    fn test_locale_display() {
        let locale = Locale::new("de-DE");
        assert_eq!(locale.to_string(), "de-DE");
    }

    #[test]
    fn test_locale_serde_transparent() {
        let locale: Locale = serde_json::from_str("\"fr-FR\"").unwrap();
        assert_eq!(locale, Locale::new("fr-FR"));
        assert_eq!(serde_json::to_string(&locale).unwrap(), "\"fr-FR\"");
    }
}
