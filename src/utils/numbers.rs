//! Leading-prefix number parsing
//!
//! Dynamic runtimes parse numbers from the front of a string and stop at the
//! first character that cannot continue the literal, so `"42abc"` reads as
//! `42`. Rust's `str::parse` insists on the whole string. The functions here
//! implement the prefix behaviour the coercion helpers rely on.

use crate::types::{to_js_string, Value};

/// Whitespace a numeric literal may be preceded by
///
/// Unicode `White_Space` minus NEL (U+0085), plus the byte order mark.
fn is_number_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Skip leading whitespace, including the byte order mark
fn trim_leading(input: &str) -> &str {
    input.trim_start_matches(is_number_space)
}

/// Split an optional sign off the front of a string
fn split_sign(input: &str) -> (bool, &str) {
    input.strip_prefix('-').map_or_else(
        || (false, input.strip_prefix('+').unwrap_or(input)),
        |rest| (true, rest),
    )
}

/// Parse the leading integer of a string
///
/// Accepts leading whitespace, an optional sign, an optional `0x`/`0X`
/// prefix selecting hexadecimal, then as many digits as follow. Anything
/// after the digits is ignored.
///
/// # Returns
///
/// The parsed integer, or `None` when no digits follow, or when the value
/// does not fit an `i64`.
///
/// # Example
///
/// ```rust
/// use valkit::utils::numbers::parse_int;
///
/// assert_eq!(parse_int("42abc"), Some(42));
/// assert_eq!(parse_int("  -17"), Some(-17));
/// assert_eq!(parse_int("0x1A"), Some(26));
/// assert_eq!(parse_int("abc"), None);
/// ```
pub fn parse_int(input: &str) -> Option<i64> {
    let (negative, rest) = split_sign(trim_leading(input));
    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i128::from_str_radix(&digits[..end], radix).ok()?;
    i64::try_from(if negative { -magnitude } else { magnitude }).ok()
}

/// Parse the leading floating point number of a string
///
/// Accepts leading whitespace, an optional sign, then either `Infinity` or
/// a decimal literal with optional fraction and exponent. The longest valid
/// prefix is used, so `"1e"` reads as `1` and `"2.75abc"` as `2.75`.
///
/// # Example
///
/// ```rust
/// use valkit::utils::numbers::parse_float;
///
/// assert_eq!(parse_float("2.75abc"), Some(2.75));
/// assert_eq!(parse_float(".5"), Some(0.5));
/// assert_eq!(parse_float("-2.5e3 meters"), Some(-2500.0));
/// assert_eq!(parse_float("."), None);
/// ```
pub fn parse_float(input: &str) -> Option<f64> {
    let text = trim_leading(input);
    let (negative, rest) = split_sign(text);

    if rest.starts_with("Infinity") {
        return Some(if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        });
    }

    let bytes = text.as_bytes();
    let count_digits = |from: usize| {
        bytes[from..]
            .iter()
            .take_while(|b| b.is_ascii_digit())
            .count()
    };

    let mut end = text.len() - rest.len();
    let int_digits = count_digits(end);
    end += int_digits;

    let mut mantissa_digits = int_digits;
    if bytes.get(end) == Some(&b'.') {
        let frac_digits = count_digits(end + 1);
        mantissa_digits += frac_digits;
        if mantissa_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = count_digits(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }

    text[..end].parse::<f64>().ok()
}

/// Convert a finite float to an integer, truncating toward zero
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn truncate_to_i64(value: f64) -> Option<i64> {
    const LIMIT: f64 = i64::MAX as f64;
    let truncated = value.trunc();
    (truncated.is_finite() && truncated >= -LIMIT && truncated < LIMIT)
        .then_some(truncated as i64)
}

/// Read an integer out of any value
///
/// Numbers are truncated toward zero; every other value is coerced to text
/// and run through [`parse_int`].
///
/// Truncation differs from parsing the number's printed form when that form
/// uses exponent notation: `1e-7` reads as `0` here, not `1`, and magnitudes
/// of `1e21` and beyond give `None` instead of their leading digit.
pub fn value_to_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().and_then(truncate_to_i64)),
        other => parse_int(&to_js_string(other)),
    }
}

/// Read a float out of any value
///
/// Numbers are taken as they are; every other value is coerced to text and
/// run through [`parse_float`].
pub fn value_to_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        other => parse_float(&to_js_string(other)),
    }
}
