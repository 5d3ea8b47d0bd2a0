//! Property-bag localization.
//!
//! A UI layer hands over a component's inputs as a [`Values`] bag and names
//! which of them are translatable. Each target holding an `i18n:` reference
//! is replaced by its resolved string, evaluated against the same bag; every
//! other input passes through untouched.

use crate::error::{I18nError, Result};
use crate::registry::Registry;
use crate::resolve::{parse_key_token, resolve};
use crate::value::{Value, Values};

/// Target used when none is configured.
pub const DEFAULT_TARGET: &str = "children";

/// Rewrites translatable inputs of a property bag.
///
/// ```
/// use polyglot_i18n::{Localizer, Registry, Values};
///
/// let registry = Registry::new("en", [("cta", "Buy ($n)->ticket")]).unwrap();
/// let props = Values::new().with("label", "i18n:cta").with("n", 2);
///
/// let out = Localizer::new(["label"]).localize(&registry, &props).unwrap();
/// assert_eq!(out.get("label").and_then(|v| v.as_str()), Some("Buy tickets"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localizer {
    targets: Vec<String>,
}

impl Default for Localizer {
    fn default() -> Self {
        Self {
            targets: vec![DEFAULT_TARGET.to_string()],
        }
    }
}

impl Localizer {
    /// Localize the named properties.
    pub fn new<I, S>(targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            targets: targets.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Return `props` with every present target resolved.
    ///
    /// Absent targets are skipped. A target that is not a string fails with
    /// [`I18nError::NonStringLocalizationTarget`]; one without the `i18n:`
    /// prefix fails with [`I18nError::InvalidKeyFormat`]. Lookup errors from
    /// the registry propagate unchanged. On error nothing is returned, so a
    /// caller never sees a half-localized bag.
    pub fn localize(&self, registry: &Registry, props: &Values) -> Result<Values> {
        let mut out = props.clone();
        for target in &self.targets {
            let Some(value) = props.get(target) else {
                continue;
            };
            let Value::Str(token) = value else {
                tracing::warn!(
                    property = %target,
                    kind = value.type_name(),
                    "refusing to localize non-string property"
                );
                return Err(I18nError::NonStringLocalizationTarget {
                    property: target.clone(),
                });
            };
            let key = parse_key_token(token)?;
            out.insert(target.as_str(), resolve(registry, key, props)?);
        }
        Ok(out)
    }
}
