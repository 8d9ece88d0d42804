//! Expression extraction from free text.
//!
//! Two patterns are matched independently against the same text:
//!
//! - the generic pattern `${...}` whose body is ASCII word characters plus
//!   `-`, `.`, `"`, `(` and `)`
//! - the secret pattern `${secrets.getValue(...)}` whose argument may hold
//!   anything except braces (spaces included)
//!
//! Results are unioned and de-duplicated, keeping first-seen order.

use std::sync::LazyLock;

use indexmap::IndexSet;
use regex::Regex;

pub const EXPRESSION_OPEN: &str = "${";
pub const EXPRESSION_CLOSE: &str = "}";

static EXPRESSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\$\{[A-Za-z0-9_.\-"()]+\}"#).unwrap());

static SECRET_EXPRESSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{secrets\.getValue\([^{}]+\)\}").unwrap());

/// Find every expression token in `text`, delimiters included.
///
/// # Examples
///
/// ```
/// use exprmig::core::extract_expressions;
///
/// let found = extract_expressions("image: ${artifact.metadata.image} tag: ${artifact.buildNo}");
/// assert_eq!(
///     found.into_iter().collect::<Vec<_>>(),
///     vec!["${artifact.metadata.image}", "${artifact.buildNo}"]
/// );
/// ```
pub fn extract_expressions(text: &str) -> IndexSet<String> {
    EXPRESSION_REGEX
        .find_iter(text)
        .chain(SECRET_EXPRESSION_REGEX.find_iter(text))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Strip the `${` and `}` delimiters from a token.
///
/// Input that is not delimited is returned unchanged, so bare keys pass through.
pub fn expression_key(token: &str) -> &str {
    token
        .strip_prefix(EXPRESSION_OPEN)
        .and_then(|rest| rest.strip_suffix(EXPRESSION_CLOSE))
        .unwrap_or(token)
}
