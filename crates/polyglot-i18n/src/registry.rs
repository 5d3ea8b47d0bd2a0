//! Schema-constrained language registry with fallback completion.
//!
//! # Invariants
//!
//! 1. **Schema is fixed**: the key set comes from the reference table given
//!    at construction and never changes afterwards.
//!
//! 2. **Every stored table is complete**: its key count equals the schema's
//!    (and, in strict mode, its key names equal the schema's). Partial
//!    tables are completed from a fallback language before storage.
//!
//! 3. **Active language exists**: the active pointer starts at the
//!    reference language and only moves through
//!    [`Registry::set_active_language`], which checks the target.
//!
//! 4. **Mutations are atomic**: a failed validation leaves the registry
//!    exactly as it was.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Error |
//! |---------|-------|-------|
//! | Empty schema | Reference table has no keys | `InvalidSchema` |
//! | Wrong size | Table key count differs from schema | `KeyCountMismatch` |
//! | Foreign key | Strict mode, key not in schema | `UnknownKey` |
//! | Bad fallback | Fallback language not registered | `FallbackNotFound` |
//! | Bad switch | Target language not registered | `LanguageNotFound` |
//! | Bad lookup | Key not in active table | `KeyNotFound` |

use std::collections::{BTreeSet, HashMap};

use crate::config::RegistryConfig;
use crate::error::{I18nError, Result};
use crate::table::LanguageTable;

#[derive(Debug, Clone)]
struct LanguageEntry {
    table: LanguageTable,
    /// Fallback this table was completed from, if any.
    fallback: Option<String>,
    /// Keys whose value was taken from the fallback.
    inherited: BTreeSet<String>,
}

impl LanguageEntry {
    fn complete(table: LanguageTable) -> Self {
        Self {
            table,
            fallback: None,
            inherited: BTreeSet::new(),
        }
    }
}

/// Language tables keyed by language tag, plus the active-language pointer.
///
/// # Example
///
/// ```
/// use polyglot_i18n::Registry;
///
/// let mut registry = Registry::new(
///     "en",
///     [
///         ("title", "Playground"),
///         ("description", "A playground for the library."),
///     ],
/// )
/// .unwrap();
/// registry
///     .add_incomplete("cn", "en", [("title", "Nihao")])
///     .unwrap()
///     .set_active_language("cn")
///     .unwrap();
///
/// assert_eq!(registry.resolve_raw("title"), Ok("Nihao"));
/// assert_eq!(
///     registry.resolve_raw("description"),
///     Ok("A playground for the library.")
/// );
/// ```
#[derive(Debug, Clone)]
pub struct Registry {
    reference: String,
    schema: BTreeSet<String>,
    languages: HashMap<String, LanguageEntry>,
    active: String,
    config: RegistryConfig,
}

impl Registry {
    /// Create a registry whose schema and reference table are `schema`.
    pub fn new(reference: impl Into<String>, schema: impl Into<LanguageTable>) -> Result<Self> {
        Self::with_config(reference, schema, RegistryConfig::default())
    }

    /// Create a registry with explicit validation settings.
    pub fn with_config(
        reference: impl Into<String>,
        schema: impl Into<LanguageTable>,
        config: RegistryConfig,
    ) -> Result<Self> {
        let reference = reference.into();
        let table = schema.into();
        if table.is_empty() {
            tracing::warn!(language = %reference, "rejected empty localization schema");
            return Err(I18nError::InvalidSchema);
        }

        let schema: BTreeSet<String> = table.keys().map(String::from).collect();
        tracing::debug!(
            language = %reference,
            keys = schema.len(),
            strict_keys = config.strict_keys,
            "created localization registry"
        );

        let mut languages = HashMap::new();
        languages.insert(reference.clone(), LanguageEntry::complete(table));
        Ok(Self {
            active: reference.clone(),
            reference,
            schema,
            languages,
            config,
        })
    }

    /// Create a registry from a JSON object holding the reference table.
    pub fn from_json(reference: impl Into<String>, json: &str) -> Result<Self> {
        Self::new(reference, LanguageTable::from_json(json)?)
    }

    /// Register a complete table for `language`, replacing any previous one.
    pub fn add_complete(
        &mut self,
        language: impl Into<String>,
        table: impl Into<LanguageTable>,
    ) -> Result<&mut Self> {
        let language = language.into();
        let table = table.into();
        if let Err(err) = self.validate_complete(&language, &table) {
            return Err(rejected(&language, err));
        }

        tracing::debug!(language = %language, keys = table.len(), "registered language");
        let entry = LanguageEntry::complete(table);
        self.languages.insert(language, entry);
        Ok(self)
    }

    /// Register `partial` for `language`, taking every key it lacks from
    /// `fallback`'s table.
    pub fn add_incomplete(
        &mut self,
        language: impl Into<String>,
        fallback: &str,
        partial: impl Into<LanguageTable>,
    ) -> Result<&mut Self> {
        let language = language.into();
        let partial = partial.into();
        let entry = match self.complete_from_fallback(&language, fallback, &partial) {
            Ok(entry) => entry,
            Err(err) => return Err(rejected(&language, err)),
        };

        tracing::debug!(
            language = %language,
            fallback,
            translated = self.schema.len() - entry.inherited.len(),
            inherited = entry.inherited.len(),
            "registered language with fallback"
        );
        self.languages.insert(language, entry);
        Ok(self)
    }

    /// Register several complete tables at once.
    ///
    /// Every table is validated before any is stored; if one fails, none
    /// are stored.
    pub fn add_many<L, T, I>(&mut self, tables: I) -> Result<&mut Self>
    where
        L: Into<String>,
        T: Into<LanguageTable>,
        I: IntoIterator<Item = (L, T)>,
    {
        let batch: Vec<(String, LanguageTable)> = tables
            .into_iter()
            .map(|(language, table)| (language.into(), table.into()))
            .collect();

        for (language, table) in &batch {
            if let Err(err) = self.validate_complete(language, table) {
                return Err(rejected(language, err));
            }
        }

        tracing::debug!(count = batch.len(), "registered language batch");
        for (language, table) in batch {
            let entry = LanguageEntry::complete(table);
            self.languages.insert(language, entry);
        }
        Ok(self)
    }

    /// Switch the active language.
    pub fn set_active_language(&mut self, language: &str) -> Result<&mut Self> {
        if !self.languages.contains_key(language) {
            return Err(rejected(language, I18nError::language_not_found(language)));
        }
        if self.active != language {
            tracing::debug!(from = %self.active, to = language, "switched active language");
            self.active = language.to_string();
        }
        Ok(self)
    }

    /// The active language tag.
    #[must_use]
    pub fn active_language(&self) -> &str {
        &self.active
    }

    /// Look up the raw (uninterpolated) template for `key` in the active
    /// language.
    pub fn resolve_raw(&self, key: &str) -> Result<&str> {
        let entry = self
            .languages
            .get(&self.active)
            .ok_or_else(|| I18nError::language_not_found(&self.active))?;
        entry
            .table
            .get(key)
            .ok_or_else(|| I18nError::key_not_found(&self.active, key))
    }

    /// The language the schema was taken from.
    #[must_use]
    pub fn reference_language(&self) -> &str {
        &self.reference
    }

    /// Schema keys in sorted order.
    pub fn schema(&self) -> impl Iterator<Item = &str> {
        self.schema.iter().map(String::as_str)
    }

    /// Number of schema keys.
    #[must_use]
    pub fn schema_len(&self) -> usize {
        self.schema.len()
    }

    /// All registered language tags, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.languages.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }

    #[must_use]
    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.contains_key(language)
    }

    /// The stored (always complete) table for `language`.
    #[must_use]
    pub fn table(&self, language: &str) -> Option<&LanguageTable> {
        self.languages.get(language).map(|entry| &entry.table)
    }

    #[must_use]
    pub fn config(&self) -> RegistryConfig {
        self.config
    }

    /// Per-language breakdown of translated vs fallback-inherited keys.
    ///
    /// Languages are listed in sorted order.
    #[must_use]
    pub fn coverage_report(&self) -> CoverageReport {
        let total = self.schema.len();
        let languages = self
            .languages()
            .into_iter()
            .filter_map(|tag| self.languages.get(tag).map(|entry| (tag, entry)))
            .map(|(tag, entry)| {
                let inherited: Vec<String> = entry.inherited.iter().cloned().collect();
                let translated = total.saturating_sub(inherited.len());
                #[allow(clippy::cast_precision_loss)]
                let coverage_percent = (translated as f32 / total as f32) * 100.0;
                LanguageCoverage {
                    language: tag.to_string(),
                    fallback: entry.fallback.clone(),
                    translated,
                    inherited,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            total_keys: total,
            languages,
        }
    }

    fn validate_complete(&self, language: &str, table: &LanguageTable) -> Result<()> {
        if table.len() != self.schema.len() {
            return Err(I18nError::KeyCountMismatch {
                language: language.to_string(),
                expected: self.schema.len(),
                actual: table.len(),
            });
        }
        if self.config.strict_keys {
            self.check_known_keys(language, table)?;
        }
        Ok(())
    }

    fn check_known_keys(&self, language: &str, table: &LanguageTable) -> Result<()> {
        match table.keys().find(|key| !self.schema.contains(*key)) {
            Some(key) => Err(I18nError::UnknownKey {
                language: language.to_string(),
                key: key.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn complete_from_fallback(
        &self,
        language: &str,
        fallback: &str,
        partial: &LanguageTable,
    ) -> Result<LanguageEntry> {
        let fallback_table = self
            .table(fallback)
            .ok_or_else(|| I18nError::FallbackNotFound {
                fallback: fallback.to_string(),
            })?;
        if self.config.strict_keys {
            self.check_known_keys(language, partial)?;
        }

        let mut table = LanguageTable::new();
        let mut inherited = BTreeSet::new();
        for key in &self.schema {
            if let Some(value) = partial.get(key) {
                table.insert(key.as_str(), value);
            } else if let Some(value) = fallback_table.get(key) {
                table.insert(key.as_str(), value);
                inherited.insert(key.clone());
            }
        }

        // Only reachable when a lenient-mode table under the fallback
        // carries the right count but the wrong names.
        if table.len() != self.schema.len() {
            return Err(I18nError::KeyCountMismatch {
                language: language.to_string(),
                expected: self.schema.len(),
                actual: table.len(),
            });
        }

        Ok(LanguageEntry {
            table,
            fallback: Some(fallback.to_string()),
            inherited,
        })
    }
}

fn rejected(language: &str, err: I18nError) -> I18nError {
    tracing::warn!(language, error = %err, "rejected localization change");
    err
}

/// Coverage report for a registry.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageReport {
    /// Number of schema keys.
    pub total_keys: usize,
    /// Per-language coverage data, sorted by language tag.
    pub languages: Vec<LanguageCoverage>,
}

/// Per-language coverage statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageCoverage {
    pub language: String,
    /// Fallback language used to complete the table, if any.
    pub fallback: Option<String>,
    /// Keys supplied directly for this language.
    pub translated: usize,
    /// Keys taken from the fallback, sorted.
    pub inherited: Vec<String>,
    /// Translated share as a percentage (0.0–100.0).
    pub coverage_percent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn playground() -> Registry {
        Registry::new(
            "en",
            [
                ("title", "Playground"),
                ("description", "This is a playground."),
                ("greeting", "Hi {name}"),
            ],
        )
        .unwrap()
    }

    fn playground_with_cn() -> Registry {
        let mut registry = playground();
        let cn = [("title", "Nihao")];
        registry.add_incomplete("cn", "en", cn).unwrap();
        registry
    }

    #[test]
    fn reference_language_is_active_and_complete() {
        let registry = playground();
        assert_eq!(registry.active_language(), "en");
        assert_eq!(registry.reference_language(), "en");
        assert_eq!(registry.schema_len(), 3);
        assert_eq!(registry.resolve_raw("title"), Ok("Playground"));
        assert_eq!(registry.languages(), vec!["en"]);
    }

    #[test]
    fn empty_schema_is_rejected() {
        let err = Registry::new("en", LanguageTable::new()).unwrap_err();
        assert_eq!(err, I18nError::InvalidSchema);
    }

    #[test]
    fn add_complete_accepts_matching_table() {
        let mut registry = playground();
        registry
            .add_complete(
                "de",
                [
                    ("title", "Spielplatz"),
                    ("description", "Ein Spielplatz."),
                    ("greeting", "Hallo {name}"),
                ],
            )
            .unwrap();
        assert!(registry.contains_language("de"));
        assert_eq!(registry.table("de").unwrap().get("title"), Some("Spielplatz"));
        // Registration alone does not switch languages.
        assert_eq!(registry.active_language(), "en");
    }

    #[test]
    fn add_complete_rejects_wrong_count() {
        let mut registry = playground();
        let err = registry
            .add_complete("de", [("title", "Spielplatz")])
            .unwrap_err();
        assert_eq!(
            err,
            I18nError::KeyCountMismatch {
                language: "de".into(),
                expected: 3,
                actual: 1,
            }
        );
        assert!(!registry.contains_language("de"));
    }

    #[test]
    fn strict_mode_rejects_foreign_keys_at_right_count() {
        let mut registry = playground();
        let err = registry
            .add_complete("de", [("title", "T"), ("description", "D"), ("oops", "O")])
            .unwrap_err();
        assert_eq!(
            err,
            I18nError::UnknownKey {
                language: "de".into(),
                key: "oops".into(),
            }
        );
        assert!(!registry.contains_language("de"));
    }

    #[test]
    fn lenient_mode_checks_count_only() {
        let mut registry = Registry::with_config(
            "en",
            [("a", "A"), ("b", "B")],
            RegistryConfig::lenient(),
        )
        .unwrap();
        registry.add_complete("xx", [("a", "a"), ("z", "z")]).unwrap();
        assert_eq!(registry.table("xx").unwrap().get("z"), Some("z"));

        // Completing from the wrongly-keyed table cannot produce a full set.
        let err = registry.add_incomplete("yy", "xx", [("a", "ya")]).unwrap_err();
        assert_eq!(
            err,
            I18nError::KeyCountMismatch {
                language: "yy".into(),
                expected: 2,
                actual: 1,
            }
        );
        assert!(!registry.contains_language("yy"));
    }

    #[test]
    fn add_incomplete_layers_partial_over_fallback() {
        let registry = playground_with_cn();
        let cn = registry.table("cn").unwrap();
        assert_eq!(cn.len(), 3);
        assert_eq!(cn.get("title"), Some("Nihao"));
        assert_eq!(cn.get("description"), Some("This is a playground."));
        assert_eq!(cn.get("greeting"), Some("Hi {name}"));
    }

    #[test]
    fn add_incomplete_chains_through_incomplete_fallback() {
        let mut registry = playground();
        registry
            .add_incomplete("es", "en", [("title", "Patio")])
            .unwrap()
            .add_incomplete("es-MX", "es", [("greeting", "Qué onda {name}")])
            .unwrap();
        let mx = registry.table("es-MX").unwrap();
        assert_eq!(mx.get("title"), Some("Patio"));
        assert_eq!(mx.get("greeting"), Some("Qué onda {name}"));
        assert_eq!(mx.get("description"), Some("This is a playground."));
    }

    #[test]
    fn add_incomplete_requires_existing_fallback() {
        let mut registry = playground();
        let err = registry
            .add_incomplete("cn", "fr", [("title", "Nihao")])
            .unwrap_err();
        assert_eq!(
            err,
            I18nError::FallbackNotFound {
                fallback: "fr".into()
            }
        );
        assert!(!registry.contains_language("cn"));
    }

    #[test]
    fn add_incomplete_unknown_partial_key() {
        let mut strict = playground();
        assert!(matches!(
            strict.add_incomplete("cn", "en", [("nope", "x")]),
            Err(I18nError::UnknownKey { .. })
        ));

        let mut lenient =
            Registry::with_config("en", [("title", "T")], RegistryConfig::lenient()).unwrap();
        lenient.add_incomplete("cn", "en", [("nope", "x")]).unwrap();
        let cn = lenient.table("cn").unwrap();
        assert_eq!(cn.len(), 1);
        assert_eq!(cn.get("title"), Some("T"));
        assert_eq!(cn.get("nope"), None);
    }

    #[test]
    fn re_registration_overwrites() {
        let mut registry = playground();
        registry
            .add_incomplete("cn", "en", [("title", "one")])
            .unwrap()
            .add_incomplete("cn", "en", [("title", "two")])
            .unwrap();
        assert_eq!(registry.table("cn").unwrap().get("title"), Some("two"));
        assert_eq!(registry.languages(), vec!["cn", "en"]);
    }

    #[test]
    fn add_many_is_all_or_nothing() {
        let mut registry = Registry::new("en", [("a", "A")]).unwrap();
        let err = registry
            .add_many([
                ("de", LanguageTable::from([("a", "Ä")])),
                ("fr", LanguageTable::from([("a", "À"), ("b", "B")])),
            ])
            .unwrap_err();
        assert!(matches!(err, I18nError::KeyCountMismatch { .. }));
        assert_eq!(registry.languages(), vec!["en"]);

        registry
            .add_many([("de", [("a", "Ä")]), ("fr", [("a", "À")])])
            .unwrap();
        assert_eq!(registry.languages(), vec!["de", "en", "fr"]);
    }

    #[test]
    fn set_active_language_round_trip() {
        let mut registry = playground_with_cn();
        registry.set_active_language("cn").unwrap();
        assert_eq!(registry.active_language(), "cn");
        assert_eq!(registry.resolve_raw("title"), Ok("Nihao"));
    }

    #[test]
    fn set_unknown_language_keeps_previous() {
        let mut registry = playground();
        let err = registry.set_active_language("fr").unwrap_err();
        assert_eq!(err, I18nError::language_not_found("fr"));
        assert_eq!(registry.active_language(), "en");
        assert_eq!(registry.resolve_raw("title"), Ok("Playground"));
    }

    #[test]
    fn resolve_raw_missing_key() {
        let registry = playground();
        assert_eq!(
            registry.resolve_raw("nonexistent"),
            Err(I18nError::key_not_found("en", "nonexistent"))
        );
    }

    #[test]
    fn from_json_builds_reference_table() {
        let registry = Registry::from_json("en", r#"{"title": "Playground"}"#).unwrap();
        assert_eq!(registry.resolve_raw("title"), Ok("Playground"));

        let err = Registry::from_json("en", "{}").unwrap_err();
        assert_eq!(err, I18nError::InvalidSchema);
    }

    #[test]
    fn schema_is_sorted() {
        let registry = playground();
        let keys: Vec<&str> = registry.schema().collect();
        assert_eq!(keys, vec!["description", "greeting", "title"]);
    }

    #[test]
    fn coverage_report_counts_inherited_keys() {
        let registry = playground_with_cn();
        let report = registry.coverage_report();
        assert_eq!(report.total_keys, 3);
        assert_eq!(report.languages.len(), 2);

        let cn = &report.languages[0];
        assert_eq!(cn.language, "cn");
        assert_eq!(cn.fallback.as_deref(), Some("en"));
        assert_eq!(cn.translated, 1);
        assert_eq!(cn.inherited, vec!["description", "greeting"]);
        assert!((cn.coverage_percent - 33.333_332).abs() < 0.01);

        let en = &report.languages[1];
        assert_eq!(en.fallback, None);
        assert!(en.inherited.is_empty());
        assert!((en.coverage_percent - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    #[traced_test]
    fn rejected_changes_are_logged() {
        let mut registry = playground();
        let _ = registry.set_active_language("fr");
        assert!(logs_contain("rejected localization change"));
        assert!(logs_contain("not found in localizations"));
    }

    #[test]
    #[traced_test]
    fn language_switch_is_logged() {
        let mut registry = playground_with_cn();
        registry.set_active_language("cn").unwrap();
        assert!(logs_contain("registered language with fallback"));
        assert!(logs_contain("switched active language"));
    }
}
