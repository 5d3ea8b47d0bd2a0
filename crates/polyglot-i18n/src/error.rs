//! Error taxonomy for registry configuration and key resolution.
//!
//! Every variant is a configuration or calling-convention failure. The
//! template engine never produces one of these: malformed directive usage
//! degrades to documented fallback output instead.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, I18nError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum I18nError {
    #[error("localization schema must contain at least one key")]
    InvalidSchema,

    #[error("Localization for {language} must have exactly {expected} keys, got {actual}.")]
    KeyCountMismatch {
        language: String,
        expected: usize,
        actual: usize,
    },

    #[error("Localization for {language} contains key \"{key}\" which is not in the schema.")]
    UnknownKey { language: String, key: String },

    #[error("Fallback language {fallback} not found.")]
    FallbackNotFound { fallback: String },

    #[error("Language \"{language}\" not found in localizations.")]
    LanguageNotFound { language: String },

    #[error("Localization key \"{key}\" not found for language \"{language}\".")]
    KeyNotFound { language: String, key: String },

    #[error("\"{token}\" must start with \"i18n:\" to localize.")]
    InvalidKeyFormat { token: String },

    #[error("Localization value for key \"{key}\" is not a string.")]
    InvalidTemplate { key: String },

    #[error("Property {property} must be a string to localize.")]
    NonStringLocalizationTarget { property: String },

    #[error("failed to parse language table: {0}")]
    Parse(String),
}

impl I18nError {
    #[must_use]
    pub fn language_not_found(language: impl Into<String>) -> Self {
        Self::LanguageNotFound {
            language: language.into(),
        }
    }

    #[must_use]
    pub fn key_not_found(language: impl Into<String>, key: impl Into<String>) -> Self {
        Self::KeyNotFound {
            language: language.into(),
            key: key.into(),
        }
    }

    /// Whether this error stems from registry configuration rather than
    /// from a caller passing a bad token or property.
    #[must_use]
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidSchema
                | Self::KeyCountMismatch { .. }
                | Self::UnknownKey { .. }
                | Self::FallbackNotFound { .. }
                | Self::InvalidTemplate { .. }
                | Self::Parse(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::I18nError;

    #[test]
    fn key_count_message_names_language_and_expected_count() {
        let error = I18nError::KeyCountMismatch {
            language: "de".to_string(),
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            error.to_string(),
            "Localization for de must have exactly 3 keys, got 2."
        );
    }

    #[test]
    fn constructors_fill_fields() {
        assert_eq!(
            I18nError::key_not_found("en", "title"),
            I18nError::KeyNotFound {
                language: "en".to_string(),
                key: "title".to_string(),
            }
        );
        assert_eq!(
            I18nError::language_not_found("fr").to_string(),
            "Language \"fr\" not found in localizations."
        );
    }

    #[test]
    fn configuration_errors_are_classified() {
        assert!(I18nError::InvalidSchema.is_configuration_error());
        assert!(
            !I18nError::InvalidKeyFormat {
                token: "title".to_string()
            }
            .is_configuration_error()
        );
        assert!(!I18nError::language_not_found("fr").is_configuration_error());
    }
}
