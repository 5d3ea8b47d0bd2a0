//! `{name}`: replace with the string form of a runtime value.
//!
//! Single pass. Unmatched names, empty braces and unclosed braces are left
//! exactly as written so callers can spot unresolved placeholders.

use super::{Segment, render};
use crate::value::Values;

/// A parsed `{name}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Injection<'a> {
    pub name: &'a str,
    /// The placeholder including braces, emitted when `name` is missing.
    pub raw: &'a str,
}

impl Injection<'_> {
    pub fn evaluate(&self, values: &Values, out: &mut String) {
        match values.get(self.name) {
            Some(value) => out.push_str(&value.to_string()),
            None => {
                tracing::trace!(name = self.name, "unresolved placeholder left in output");
                out.push_str(self.raw);
            }
        }
    }
}

/// Parse every `{name}` placeholder in `template`.
///
/// A name is a non-empty run of characters other than `{` and `}`. On
/// `{{name}`, the first brace is literal text.
#[must_use]
pub fn parse(template: &str) -> Vec<Segment<'_, Injection<'_>>> {
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut cursor = 0;

    while let Some(offset) = template[cursor..].find('{') {
        let open = cursor + offset;
        let after = open + 1;
        let Some(end) = template[after..].find(['{', '}']).map(|i| after + i) else {
            // Unclosed brace: rest is literal.
            break;
        };
        if template.as_bytes()[end] == b'{' {
            // Another opening brace: restart from it.
            cursor = end;
            continue;
        }
        if end == after {
            // `{}` is literal.
            cursor = end + 1;
            continue;
        }

        if open > literal_start {
            segments.push(Segment::Literal(&template[literal_start..open]));
        }
        segments.push(Segment::Directive(Injection {
            name: &template[after..end],
            raw: &template[open..=end],
        }));
        cursor = end + 1;
        literal_start = cursor;
    }

    if literal_start < template.len() {
        segments.push(Segment::Literal(&template[literal_start..]));
    }
    segments
}

/// Replace every resolvable placeholder with its value.
#[must_use]
pub fn apply(template: &str, values: &Values) -> String {
    render(&parse(template), |directive, out| {
        directive.evaluate(values, out);
    })
}
