//! Translation catalog implementations

use std::collections::HashMap;

use crate::domain::mail::Translator;

/// In-memory translation catalog. Unknown keys pass through unchanged.
#[derive(Debug, Default, Clone)]
pub struct Catalog {
    entries: HashMap<String, String>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one translation entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), value.into());

        self
    }
}

impl FromIterator<(String, String)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(entries: I) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }
}

impl Translator for Catalog {
    fn translate(&self, key: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| key.to_string())
    }
}

/// Identity translator for callers that do not localize.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTranslation;

impl Translator for NoTranslation {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_key_is_translated() {
        let mut catalog = Catalog::new();
        catalog.insert("sender.name", "Example Co");

        assert_eq!(catalog.translate("sender.name"), "Example Co");
    }

    #[test]
    fn test_unknown_key_passes_through() {
        assert_eq!(Catalog::new().translate("no-reply@example.com"), "no-reply@example.com");
    }

    #[test]
    fn test_no_translation_is_identity() {
        assert_eq!(NoTranslation.translate("anything"), "anything");
    }
}
