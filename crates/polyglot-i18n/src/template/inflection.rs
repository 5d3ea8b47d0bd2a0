//! `($name)->word`: inflect `word` for the count held in `name`.
//!
//! Numbers are used as the count. Booleans stand for a count: `true` is
//! plural (2), `false` singular (1). Anything else leaves `word` as written.
//!
//! `word` is the longest run of Unicode letters, digits, combining marks and
//! underscores after `->`, so `café` and `Äpfel` are inflected whole.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::{Segment, render, scan};
use crate::plural::Inflector;
use crate::value::{Value, Values};

static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(\$(\w+)\)->").expect("inflection directive regex"));

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || matches!(c, '\u{300}'..='\u{36f}')
}

/// Byte length of the word at the start of `text`.
fn word_len(text: &str) -> usize {
    text.char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map_or(text.len(), |(i, _)| i)
}

/// A parsed inflection directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inflection<'a> {
    pub name: &'a str,
    pub word: &'a str,
}

impl Inflection<'_> {
    /// The count this directive inflects for, if `values` supplies one.
    #[must_use]
    pub fn count(&self, values: &Values) -> Option<f64> {
        match values.get(self.name)? {
            Value::Number(n) => Some(*n),
            Value::Bool(true) => Some(2.0),
            Value::Bool(false) => Some(1.0),
            Value::Str(_) => None,
        }
    }

    #[must_use]
    pub fn evaluate(&self, values: &Values, inflector: &impl Inflector) -> String {
        match self.count(values) {
            Some(count) => inflector.inflect(self.word, count),
            None => {
                tracing::trace!(
                    name = self.name,
                    word = self.word,
                    "no count for inflection, leaving word as written"
                );
                self.word.to_string()
            }
        }
    }
}

/// Parse every inflection directive in `template`.
#[must_use]
pub fn parse(template: &str) -> Vec<Segment<'_, Inflection<'_>>> {
    scan(template, &PATTERN, |caps| {
        let arrow = caps.get(0)?;
        let name = caps.get(1)?.as_str();
        let end = arrow.end() + word_len(&template[arrow.end()..]);
        if end == arrow.end() {
            return None;
        }
        let word = &template[arrow.end()..end];
        Some((Inflection { name, word }, end))
    })
}

/// Replace every inflection directive with the inflected word.
#[must_use]
pub fn apply(template: &str, values: &Values, inflector: &impl Inflector) -> String {
    render(&parse(template), |directive, out| {
        out.push_str(&directive.evaluate(values, inflector));
    })
}
