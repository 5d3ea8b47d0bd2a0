//! Runtime values supplied per resolution call.
//!
//! A [`Values`] bag maps names to strings, numbers, or booleans. The
//! template engine reads from it; nothing in the crate retains it.
//!
//! Comparisons follow the coercion rules templates were authored against:
//! strings and booleans convert to numbers for ordering, `==` coerces,
//! `===` does not.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// A single runtime value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Value {
    /// Truthiness: `0`, `NaN`, `""` and `false` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Str(s) => !s.is_empty(),
        }
    }

    /// Numeric coercion (`true` → 1, `"  12 "` → 12, `"abc"` → NaN).
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Number(n) => *n,
            Self::Str(s) => coerce_number(s),
        }
    }

    /// Coercing equality against a string literal.
    #[must_use]
    pub fn loose_eq_str(&self, literal: &str) -> bool {
        match self {
            Self::Str(s) => s == literal,
            Self::Number(n) => *n == coerce_number(literal),
            Self::Bool(_) => self.to_number() == coerce_number(literal),
        }
    }

    /// Non-coercing equality against a string literal: only strings match.
    #[must_use]
    pub fn strict_eq_str(&self, literal: &str) -> bool {
        matches!(self, Self::Str(s) if s == literal)
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Str(_) => "string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
            Self::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            // -0 prints as 0
            Self::Number(n) if *n == 0.0 => f.write_str("0"),
            // Exponent form outside [1e-6, 1e21), with an explicit `+`.
            Self::Number(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => {
                let exponential = format!("{n:e}");
                match exponential.split_once('e') {
                    Some((mantissa, power)) if !power.starts_with('-') => {
                        write!(f, "{mantissa}e+{power}")
                    }
                    _ => f.write_str(&exponential),
                }
            }
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_lossless,
                    clippy::unnecessary_cast
                )]
                fn from(value: $ty) -> Self {
                    Self::Number(value as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64, usize, isize);

/// Named runtime values for one resolution call.
///
/// ```
/// use polyglot_i18n::Values;
///
/// let values = Values::new().with("name", "Ada").with("count", 3);
/// assert_eq!(values.get("name").and_then(|v| v.as_str()), Some("Ada"));
/// assert_eq!(values.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Values {
    entries: HashMap<String, Value>,
}

impl Values {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert a value, returning the previous one for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(name.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Values {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>, const N: usize> From<[(K, V); N]> for Values {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Whole-string numeric coercion. Empty or blank text is 0. Unsigned `0x`,
/// `0o` and `0b` literals are read in their radix; anything else that is not
/// entirely a decimal literal is NaN.
pub(crate) fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if let Some(n) = parse_radix_literal(trimmed) {
        return n;
    }
    match trimmed {
        "Infinity" | "+Infinity" => f64::INFINITY,
        "-Infinity" => f64::NEG_INFINITY,
        // Rust's float parser also accepts "inf" and "nan" spellings.
        _ if trimmed
            .bytes()
            .any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) =>
        {
            f64::NAN
        }
        _ => trimmed.parse().unwrap_or(f64::NAN),
    }
}

/// `0x1F`, `0o17`, `0b101`. `None` when `text` has no radix prefix; NaN
/// when the digits are missing or out of range.
fn parse_radix_literal(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }
    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc * f64::from(radix) + f64::from(d))
    });
    Some(value.unwrap_or(f64::NAN))
}

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix regex")
});

/// Leading-prefix float parse: `"3px"` → 3, `"abc"` → NaN.
pub(crate) fn parse_float_prefix(text: &str) -> f64 {
    let Some(found) = FLOAT_PREFIX.find(text.trim_start()) else {
        return f64::NAN;
    };
    let literal = found.as_str();
    match literal.trim_start_matches(['+', '-']) {
        "Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
        "Infinity" => f64::INFINITY,
        _ => literal.parse().unwrap_or(f64::NAN),
    }
}
