//! Key resolution: registry lookup followed by template evaluation.

use crate::error::{I18nError, Result};
use crate::plural::Inflector;
use crate::registry::Registry;
use crate::template::TemplateEngine;
use crate::value::Values;

/// Marker that turns an input string into a localization reference.
pub const KEY_PREFIX: &str = "i18n:";

/// Strip [`KEY_PREFIX`] from a localization reference.
///
/// ```
/// use polyglot_i18n::parse_key_token;
///
/// assert_eq!(parse_key_token("i18n:title"), Ok("title"));
/// assert!(parse_key_token("title").is_err());
/// ```
pub fn parse_key_token(token: &str) -> Result<&str> {
    token
        .strip_prefix(KEY_PREFIX)
        .ok_or_else(|| I18nError::InvalidKeyFormat {
            token: token.to_string(),
        })
}

/// Whether `input` is written as a localization reference.
#[must_use]
pub fn is_key_token(input: &str) -> bool {
    input.starts_with(KEY_PREFIX)
}

/// Resolve `key` in the active language and evaluate it against `values`.
pub fn resolve(registry: &Registry, key: &str, values: &Values) -> Result<String> {
    resolve_with(&TemplateEngine::new(), registry, key, values)
}

/// [`resolve`] with a caller-supplied engine.
pub fn resolve_with<I: Inflector>(
    engine: &TemplateEngine<I>,
    registry: &Registry,
    key: &str,
    values: &Values,
) -> Result<String> {
    let template = registry.resolve_raw(key)?;
    Ok(engine.interpolate(template, values))
}

/// Resolve an `i18n:`-prefixed token.
pub fn resolve_token(registry: &Registry, token: &str, values: &Values) -> Result<String> {
    resolve(registry, parse_key_token(token)?, values)
}
