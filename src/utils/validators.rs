//! Format validators
//!
//! Purely syntactic checks over strings. Each validator accepts a value of
//! any shape and answers `false` for anything that is not a string.

use regex::Regex;
use std::sync::LazyLock;

use crate::types::Value;

/// Compile a built-in pattern
///
/// A pattern that fails to compile leaves its validator rejecting
/// everything instead of panicking.
fn compile(pattern: &str) -> Option<Regex> {
    Regex::new(pattern)
        .map_err(|e| tracing::error!("Built-in pattern {} failed to compile: {}", pattern, e))
        .ok()
}

static NUMBER: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"^[0-9]+$"));

static SHA2: LazyLock<Option<Regex>> = LazyLock::new(|| compile(r"^(?i:[0-9a-f]{64})$"));

static UUID: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(r"^(?i:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12})$")
});

// https://html.spec.whatwg.org/multipage/input.html#valid-e-mail-address
static EMAIL: LazyLock<Option<Regex>> = LazyLock::new(|| {
    compile(concat!(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+",
        r"@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?",
        r"(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    ))
});

fn string_matches(pattern: &LazyLock<Option<Regex>>, value: &Value) -> bool {
    match (value, pattern.as_ref()) {
        (Value::String(s), Some(re)) => re.is_match(s),
        _ => false,
    }
}

/// Check if a value is an unsigned decimal integer literal
///
/// Only ASCII digits are allowed: no sign, no whitespace, no fraction.
///
/// # Example
///
/// ```rust
/// use valkit::utils::validators::test_number;
/// use serde_json::json;
///
/// assert!(test_number(&json!("123123123")));
/// assert!(!test_number(&json!("+123123123")));
/// assert!(!test_number(&json!(123)));
/// ```
pub fn test_number(value: &Value) -> bool {
    string_matches(&NUMBER, value)
}

/// Check if a value is a SHA-256 digest in hexadecimal notation
///
/// Exactly 64 hexadecimal characters, in any letter case.
pub fn test_sha2(value: &Value) -> bool {
    string_matches(&SHA2, value)
}

/// Check if a value is a UUID in canonical 8-4-4-4-12 notation
///
/// Hex digits may be in any letter case. The version and variant nibbles
/// are not inspected.
pub fn test_uuid(value: &Value) -> bool {
    string_matches(&UUID, value)
}

/// Check if a value is a formally valid e-mail address
///
/// Uses the grammar HTML forms apply to `<input type="email">`. This is a
/// practical subset of RFC 5322 and says nothing about deliverability.
///
/// # Example
///
/// ```rust
/// use valkit::utils::validators::test_email;
/// use serde_json::json;
///
/// assert!(test_email(&json!("NOBODY@no.net")));
/// assert!(!test_email(&json!("nobody.no.net")));
/// ```
pub fn test_email(value: &Value) -> bool {
    string_matches(&EMAIL, value)
}
