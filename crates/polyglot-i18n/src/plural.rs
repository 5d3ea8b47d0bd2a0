//! Count-driven word inflection.
//!
//! The template engine only needs one capability from a language's
//! pluralization rules: turn a word into the form matching a count. That
//! capability is the [`Inflector`] trait; [`EnglishInflector`] is the
//! built-in implementation.
//!
//! # English rules
//!
//! - Singular when `|count| == 1`, plural otherwise (including 0 and NaN).
//! - Uncountable nouns (`sheep`, `information`, ...) never change.
//! - Irregular nouns map in both directions (`person` ↔ `people`).
//! - Everything else goes through ordered suffix rules; the first matching
//!   rule wins.
//! - The input's case is restored on the output (`Cat` → `Cats`,
//!   `CAT` → `CATS`).

use std::sync::LazyLock;

use regex_lite::Regex;

/// Inflects a word for a count.
pub trait Inflector {
    /// Return `word` in the form matching `count`.
    fn inflect(&self, word: &str, count: f64) -> String;
}

impl<F> Inflector for F
where
    F: Fn(&str, f64) -> String,
{
    fn inflect(&self, word: &str, count: f64) -> String {
        self(word, count)
    }
}

/// English singular/plural inflection.
///
/// ```
/// use polyglot_i18n::plural::{EnglishInflector, Inflector};
///
/// let english = EnglishInflector;
/// assert_eq!(english.inflect("cat", 1.0), "cat");
/// assert_eq!(english.inflect("cat", 3.0), "cats");
/// assert_eq!(english.inflect("person", 2.0), "people");
/// assert_eq!(english.inflect("Boxes", 1.0), "Box");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnglishInflector;

impl EnglishInflector {
    /// Whether `count` selects the singular form.
    #[must_use]
    pub fn is_singular(count: f64) -> bool {
        count.abs() == 1.0
    }

    /// Plural form of `word`. Words already in plural form are kept.
    #[must_use]
    pub fn pluralize(&self, word: &str) -> String {
        let irregular = |lower: &str| {
            IRREGULAR
                .iter()
                .find(|(singular, _)| *singular == lower)
                .map(|(_, plural)| *plural)
        };
        inflect_with(word, irregular, &IRREGULAR_PLURALS, &PLURAL_RULES)
    }

    /// Singular form of `word`. Words already in singular form are kept.
    #[must_use]
    pub fn singularize(&self, word: &str) -> String {
        let irregular = |lower: &str| {
            IRREGULAR
                .iter()
                .find(|(_, plural)| *plural == lower)
                .map(|(singular, _)| *singular)
        };
        inflect_with(word, irregular, &IRREGULAR_SINGULARS, &SINGULAR_RULES)
    }
}

impl Inflector for EnglishInflector {
    fn inflect(&self, word: &str, count: f64) -> String {
        if Self::is_singular(count) {
            self.singularize(word)
        } else {
            self.pluralize(word)
        }
    }
}

/// Irregular nouns as `(singular, plural)`.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("die", "dice"),
    ("criterion", "criteria"),
    ("phenomenon", "phenomena"),
    ("cookie", "cookies"),
    ("movie", "movies"),
    ("zombie", "zombies"),
];

/// Plural spellings that are already in the target form when pluralizing.
static IRREGULAR_PLURALS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| IRREGULAR.iter().map(|(_, p)| *p).collect());

/// Singular spellings that are already in the target form when singularizing.
static IRREGULAR_SINGULARS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| IRREGULAR.iter().map(|(s, _)| *s).collect());

const UNCOUNTABLE: &[&str] = &[
    "advice",
    "aircraft",
    "bison",
    "deer",
    "equipment",
    "feedback",
    "fish",
    "furniture",
    "information",
    "luggage",
    "money",
    "moose",
    "news",
    "police",
    "rice",
    "salmon",
    "series",
    "sheep",
    "software",
    "species",
    "trout",
];

type Rule = (Regex, &'static str);

fn compile(rules: &[(&str, &'static str)]) -> Vec<Rule> {
    rules
        .iter()
        .map(|&(pattern, replacement)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("inflection rule regex");
            (re, replacement)
        })
        .collect()
}

static PLURAL_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    compile(&[
        (r"(quiz)$", "${1}zes"),
        (r"^(ox)$", "${1}en"),
        (r"([ml])ouse$", "${1}ice"),
        (r"(matr)ix$", "${1}ices"),
        (r"(vert|ind|append)ex$", "${1}ices"),
        (r"(x|ch|ss|sh|zz)$", "${1}es"),
        (r"([^aeiouy]|qu)y$", "${1}ies"),
        (r"(lea|loa|thie|shea)f$", "${1}ves"),
        (r"(?:([^f])fe|([lr])f)$", "${1}${2}ves"),
        (r"(analy|ba|diagno|parenthe|progno|synop|the|cri)sis$", "${1}ses"),
        (r"(alumn|bacill|cact|foc|fung|nucle|radi|stimul|syllab|termin|vir)us$", "${1}i"),
        (r"(alias|[^aou]us|t[lm]as|gas|ris)$", "${1}es"),
        (r"(buffal|tomat|potat|her|ech|torped|vet)o$", "${1}oes"),
        // Already plural.
        (r"s$", "s"),
        (r"$", "s"),
    ])
});

static SINGULAR_RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    compile(&[
        (r"(quiz)zes$", "${1}"),
        (r"(matr)ices$", "${1}ix"),
        (r"(vert|ind|append)ices$", "${1}ex"),
        (r"^(ox)en$", "${1}"),
        (r"([ml])ice$", "${1}ouse"),
        (r"(analy|ba|diagno|parenthe|progno|synop|the|cri)ses$", "${1}sis"),
        (r"(alias|[^aou]us|t[lm]as|gas|ris)es$", "${1}"),
        (r"(alumn|bacill|cact|foc|fung|nucle|radi|stimul|syllab|termin|vir)i$", "${1}us"),
        (r"(buffal|tomat|potat|her|ech|torped|vet)oes$", "${1}o"),
        (r"(x|ch|ss|sh|zz)es$", "${1}"),
        (r"([^aeiouy]|qu)ies$", "${1}y"),
        (r"(lea|loa|thie|shea)ves$", "${1}f"),
        (r"([lr])ves$", "${1}f"),
        (r"([^f])ves$", "${1}fe"),
        // Already singular.
        (r"(ss|us|is|alias|atlas|gas)$", "${1}"),
        (r"s$", ""),
    ])
});

fn inflect_with(
    word: &str,
    irregular: impl Fn(&str) -> Option<&'static str>,
    already: &[&str],
    rules: &[Rule],
) -> String {
    if word.is_empty() {
        return String::new();
    }
    let lower = word.to_lowercase();
    if UNCOUNTABLE.contains(&lower.as_str()) || already.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some(form) = irregular(&lower) {
        return restore_case(word, form);
    }
    match rules.iter().find(|(re, _)| re.is_match(word)) {
        Some((re, replacement)) => restore_case(word, &re.replace(word, *replacement)),
        None => word.to_string(),
    }
}

/// Apply `original`'s casing pattern to `inflected`.
fn restore_case(original: &str, inflected: &str) -> String {
    let has_letters = original.chars().any(char::is_alphabetic);
    if has_letters && original.chars().count() > 1 && original == original.to_uppercase() {
        return inflected.to_uppercase();
    }
    let mut rest = inflected.chars();
    match (original.chars().next(), rest.next()) {
        (Some(first), Some(head)) if first.is_uppercase() => {
            head.to_uppercase().chain(rest).collect()
        }
        _ => inflected.to_string(),
    }
}
