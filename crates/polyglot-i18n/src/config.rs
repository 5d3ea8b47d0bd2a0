//! Registry validation settings.

/// Environment variable read by [`RegistryConfig::from_env`].
pub const STRICT_KEYS_ENV: &str = "POLYGLOT_STRICT_KEYS";

/// How strictly registered tables are checked against the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Require every registered key to be a schema key.
    ///
    /// When false, complete tables are checked by key count only and
    /// unknown keys in partial tables are ignored.
    /// Default: true.
    pub strict_keys: bool,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self { strict_keys: true }
    }
}

impl RegistryConfig {
    /// Set key-set strictness.
    #[must_use]
    pub fn with_strict_keys(mut self, strict: bool) -> Self {
        self.strict_keys = strict;
        self
    }

    /// Count-only checking, as older callers expect.
    #[must_use]
    pub fn lenient() -> Self {
        Self::default().with_strict_keys(false)
    }

    /// Load config from environment variables.
    ///
    /// Reads:
    /// - `POLYGLOT_STRICT_KEYS`: `"0"` or `"false"` selects count-only
    ///   checking, `"1"` or `"true"` the default strict mode. Other values
    ///   are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_value(std::env::var(STRICT_KEYS_ENV).ok().as_deref())
    }

    fn with_env_value(mut self, value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v == "0" || v.eq_ignore_ascii_case("false") => self.strict_keys = false,
            Some(v) if v == "1" || v.eq_ignore_ascii_case("true") => self.strict_keys = true,
            Some(other) => {
                tracing::warn!(
                    variable = STRICT_KEYS_ENV,
                    value = other,
                    "ignoring unrecognized value"
                );
            }
            None => {}
        }
        self
    }
}
