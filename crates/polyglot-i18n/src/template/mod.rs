//! Template micro-language evaluation.
//!
//! A template may embed three kinds of directive, evaluated in fixed order:
//!
//! 1. [`conditional`]: `$[name]->'yes'|'no'` and
//!    `$[name OP value]->'yes'|'no'`
//! 2. [`inflection`]: `($name)->word`
//! 3. [`injection`]: `{name}`
//!
//! Each pass parses its directives into a typed segment list, evaluates the
//! list, and hands the result to the next pass. Text produced by a pass is
//! not rescanned by later passes, with one exception: injection runs last
//! and fills `{name}` placeholders wherever they appear, including inside a
//! selected conditional branch or an inflected word. Injected values
//! themselves are never rescanned.
//!
//! # Failure Modes
//!
//! The engine has no error path. Missing or mistyped runtime values degrade:
//!
//! | Directive | Degradation |
//! |-----------|-------------|
//! | Conditional, value missing or unknown operator | false branch |
//! | Inflection, value not a number or boolean | bare word |
//! | Injection, value missing | `{name}` left verbatim |

pub mod conditional;
pub mod inflection;
pub mod injection;

use regex_lite::{Captures, Regex};

use crate::plural::{EnglishInflector, Inflector};
use crate::value::Values;

/// One piece of a parsed template: literal text or a directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<'a, D> {
    Literal(&'a str),
    Directive(D),
}

/// Split `template` around the directives found at matches of `pattern`.
///
/// `build` turns a match into a directive and the byte offset where the
/// directive ends, or rejects it by returning `None`. A directive may end
/// past its match; matches starting before that end are skipped.
fn scan<'a, D>(
    template: &'a str,
    pattern: &Regex,
    mut build: impl FnMut(&Captures<'a>) -> Option<(D, usize)>,
) -> Vec<Segment<'a, D>> {
    let mut segments = Vec::new();
    let mut last = 0;
    for caps in pattern.captures_iter(template) {
        let Some(start) = caps.get(0).map(|m| m.start()) else {
            continue;
        };
        if start < last {
            continue;
        }
        let Some((directive, end)) = build(&caps) else {
            continue;
        };
        if start > last {
            segments.push(Segment::Literal(&template[last..start]));
        }
        segments.push(Segment::Directive(directive));
        last = end;
    }
    if last < template.len() {
        segments.push(Segment::Literal(&template[last..]));
    }
    segments
}

/// Concatenate segments, rendering each directive with `eval`.
fn render<D>(segments: &[Segment<'_, D>], mut eval: impl FnMut(&D, &mut String)) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(text),
            Segment::Directive(directive) => eval(directive, &mut out),
        }
    }
    out
}

/// Evaluates templates with a pluggable inflector.
///
/// ```
/// use polyglot_i18n::{TemplateEngine, Values};
///
/// let engine = TemplateEngine::new();
/// let values = Values::new().with("count", 3).with("who", "Ada");
/// assert_eq!(
///     engine.interpolate("{who} has {count} ($count)->cat", &values),
///     "Ada has 3 cats"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct TemplateEngine<I = EnglishInflector> {
    inflector: I,
}

impl TemplateEngine {
    /// Engine with English inflection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<I: Inflector> TemplateEngine<I> {
    /// Engine using `inflector` for `($name)->word` directives.
    #[must_use]
    pub fn with_inflector(inflector: I) -> Self {
        Self { inflector }
    }

    #[must_use]
    pub fn inflector(&self) -> &I {
        &self.inflector
    }

    /// Run the conditional, inflection and injection passes in order.
    ///
    /// Inflection only scans the template's own text; selected conditional
    /// branches pass through it untouched.
    #[must_use]
    pub fn interpolate(&self, template: &str, values: &Values) -> String {
        let mut inflected = String::with_capacity(template.len());
        for segment in conditional::select(template, values) {
            match segment {
                Segment::Literal(text) => {
                    inflected.push_str(&inflection::apply(text, values, &self.inflector));
                }
                Segment::Directive(branch) => inflected.push_str(branch),
            }
        }
        injection::apply(&inflected, values)
    }
}

/// [`TemplateEngine::interpolate`] with English inflection.
#[must_use]
pub fn interpolate(template: &str, values: &Values) -> String {
    TemplateEngine::new().interpolate(template, values)
}
