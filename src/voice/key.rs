//! Cache key derivation

use std::fmt;

use crate::game::Language;

/// Identifies one audio asset in both cache tiers
///
/// Rendered as `{languageTag}:{lowercasedPhrase}`. Only case is folded;
/// accents and punctuation stay significant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    /// Derive the key for a phrase in a language
    #[must_use]
    pub fn new(text: &str, language: Language) -> Self {
        Self(format!("{}:{}", language.tag(), text.to_lowercase()))
    }

    /// Key as stored in the persistent tier
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CacheKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
