//! `$[name]->'yes'|'no'` and `$[name OP value]->'yes'|'no'`.
//!
//! Without an operator the truthiness of `name` picks the branch. With one:
//!
//! | Operator | Comparison |
//! |----------|------------|
//! | `<` `>` `<=` `>=` | numeric; `value` is read as a leading float |
//! | `==` `!=` | coercing equality against the literal `value` |
//! | `===` | non-coercing equality: only a string equal to `value` |
//!
//! Any other operator spelling selects the false branch. A missing `name`
//! compares false under every operator except `!=`.

use std::sync::LazyLock;

use regex_lite::Regex;

use super::{Segment, render, scan};
use crate::value::{Value, Values, parse_float_prefix};

static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\[\s*(\w+)\s*(?:([<>=!]+)\s*([^\]]*?)\s*)?\]->'(.*?)'\|'(.*?)'")
        .expect("conditional directive regex")
});

/// Comparison operator in `$[name OP value]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Lt,
    Gt,
    Le,
    Ge,
    LooseEq,
    StrictEq,
    NotEq,
    /// Unrecognized spelling; always false.
    Unknown,
}

impl Operator {
    #[must_use]
    pub fn parse(spelling: &str) -> Self {
        match spelling {
            "<" => Self::Lt,
            ">" => Self::Gt,
            "<=" => Self::Le,
            ">=" => Self::Ge,
            "==" => Self::LooseEq,
            "===" => Self::StrictEq,
            "!=" => Self::NotEq,
            _ => Self::Unknown,
        }
    }
}

/// What a conditional tests.
#[derive(Debug, Clone, PartialEq)]
pub enum Test<'a> {
    Truthy,
    Compare { op: Operator, operand: &'a str },
}

/// A parsed conditional directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Conditional<'a> {
    pub name: &'a str,
    pub test: Test<'a>,
    pub if_true: &'a str,
    pub if_false: &'a str,
}

impl<'a> Conditional<'a> {
    /// Whether the true branch is selected for `values`.
    #[must_use]
    pub fn holds(&self, values: &Values) -> bool {
        let value = values.get(self.name);
        match self.test {
            Test::Truthy => value.is_some_and(Value::is_truthy),
            Test::Compare { op, operand } => compare(value, op, operand),
        }
    }

    #[must_use]
    pub fn evaluate(&self, values: &Values) -> &'a str {
        if self.holds(values) {
            self.if_true
        } else {
            self.if_false
        }
    }
}

fn compare(value: Option<&Value>, op: Operator, operand: &str) -> bool {
    match op {
        Operator::Lt | Operator::Gt | Operator::Le | Operator::Ge => {
            let lhs = value.map_or(f64::NAN, Value::to_number);
            let rhs = parse_float_prefix(operand);
            match op {
                Operator::Lt => lhs < rhs,
                Operator::Gt => lhs > rhs,
                Operator::Le => lhs <= rhs,
                _ => lhs >= rhs,
            }
        }
        Operator::LooseEq => value.is_some_and(|v| v.loose_eq_str(operand)),
        Operator::StrictEq => value.is_some_and(|v| v.strict_eq_str(operand)),
        Operator::NotEq => !value.is_some_and(|v| v.loose_eq_str(operand)),
        Operator::Unknown => {
            tracing::trace!(operand, "unknown conditional operator, taking false branch");
            false
        }
    }
}

/// Parse every conditional directive in `template`.
#[must_use]
pub fn parse(template: &str) -> Vec<Segment<'_, Conditional<'_>>> {
    scan(template, &PATTERN, |caps| {
        let whole = caps.get(0)?;
        let group = |i| caps.get(i).map_or("", |m| m.as_str());
        let test = match caps.get(2) {
            Some(op) => Test::Compare {
                op: Operator::parse(op.as_str()),
                operand: group(3),
            },
            None => Test::Truthy,
        };
        let conditional = Conditional {
            name: group(1),
            test,
            if_true: group(4),
            if_false: group(5),
        };
        Some((conditional, whole.end()))
    })
}

/// Evaluate every conditional, keeping the selected branch text apart from
/// the surrounding source text. Later passes other than injection must not
/// rescan branch text.
#[must_use]
pub fn select<'a>(template: &'a str, values: &Values) -> Vec<Segment<'a, &'a str>> {
    parse(template)
        .into_iter()
        .map(|segment| match segment {
            Segment::Literal(text) => Segment::Literal(text),
            Segment::Directive(directive) => Segment::Directive(directive.evaluate(values)),
        })
        .collect()
}

/// Replace every conditional directive with its selected branch.
#[must_use]
pub fn apply(template: &str, values: &Values) -> String {
    render(&select(template, values), |branch, out| out.push_str(branch))
}
