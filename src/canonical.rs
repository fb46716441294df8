//! Rewriting of shorthand expressions into canonical `type:arg:arg` form.
//!
//! | Shorthand       | Example         | Canonical              |
//! |-----------------|-----------------|------------------------|
//! | multiplier      | `12*(char:a-z)` | `repeat:12:(char:a-z)` |
//! | numeric range   | `-5--1`         | `number:-5--1`         |
//! | character range | `a-z`           | `char:a-z`             |
//! | quoted literal  | `"hello"`       | `literal:"hello"`      |

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

// ASCII classes only; `\d` and `(?i)[a-z]` would also admit other scripts.
static MULTIPLIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([0-9]+)\*(\(.+\))$").unwrap());
static NUMERIC_RANGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^-?[0-9.]+--?[0-9.]+$").unwrap());
static CHAR_RANGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z]-[A-Za-z]$").unwrap());
static QUOTED: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^".*"$"#).unwrap());

/// A recognised shorthand form, borrowing its pieces from the input.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Shorthand<'a> {
    Multiplier { count: &'a str, payload: &'a str },
    NumericRange(&'a str),
    CharRange(&'a str),
    Quoted(&'a str),
}

impl Shorthand<'_> {
    pub fn to_canonical(&self) -> String {
        match self {
            Shorthand::Multiplier { count, payload } => format!("repeat:{count}:{payload}"),
            Shorthand::NumericRange(range) => format!("number:{range}"),
            Shorthand::CharRange(range) => format!("char:{range}"),
            Shorthand::Quoted(text) => format!("literal:{text}"),
        }
    }
}

/// Detects a shorthand form. Patterns are tried in precedence order and must
/// match the whole input.
pub fn classify(expression: &str) -> Option<Shorthand<'_>> {
    if let Some(caps) = MULTIPLIER.captures(expression) {
        let count = caps.get(1)?.as_str();
        let payload = caps.get(2)?.as_str();
        return Some(Shorthand::Multiplier { count, payload });
    }
    if NUMERIC_RANGE.is_match(expression) {
        return Some(Shorthand::NumericRange(expression));
    }
    if CHAR_RANGE.is_match(expression) {
        return Some(Shorthand::CharRange(expression));
    }
    if QUOTED.is_match(expression) {
        return Some(Shorthand::Quoted(expression));
    }
    None
}

/// Returns the canonical form of `expression`.
///
/// A canonical rewrite starts with a type name and a colon, which none of the
/// shorthand patterns accept, so a single pass is a fixed point.
pub fn canonicalize(expression: &str) -> Cow<'_, str> {
    match classify(expression) {
        Some(shorthand) => {
            let canonical = shorthand.to_canonical();
            log::debug!("rewrote shorthand {expression:?} to {canonical:?}");
            Cow::Owned(canonical)
        }
        None => Cow::Borrowed(expression),
    }
}
