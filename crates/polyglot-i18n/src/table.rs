//! Key → template tables for a single language.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, Result};

/// Template strings for one language, keyed by localization key.
///
/// Keys are kept sorted so iteration, serialization and error reports are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTable {
    strings: BTreeMap<String, String>,
}

impl LanguageTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template, returning the previous one for that key.
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) -> Option<String> {
        self.strings.insert(key.into(), template.into())
    }

    /// Look up a template by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.strings.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.strings.contains_key(key)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Whether the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    /// Iterate over `(key, template)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.strings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a flat JSON object of `"key": "template"` members.
    ///
    /// Any member whose value is not a string fails with
    /// [`I18nError::InvalidTemplate`]; the first such key (in key order) is
    /// reported.
    ///
    /// ```
    /// use polyglot_i18n::LanguageTable;
    ///
    /// let table = LanguageTable::from_json(r#"{"title": "Playground"}"#).unwrap();
    /// assert_eq!(table.get("title"), Some("Playground"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| I18nError::Parse(e.to_string()))?;
        raw.into_iter()
            .map(|(key, value)| match value {
                serde_json::Value::String(template) => Ok((key, template)),
                _ => Err(I18nError::InvalidTemplate { key }),
            })
            .collect()
    }

    /// Serialize to a pretty-printed JSON object.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| I18nError::Parse(e.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for LanguageTable {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            strings: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for LanguageTable {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}
