//! Coercion helpers with caller-supplied defaults
//!
//! Every function here takes a value of unknown shape and either hands back
//! the value (borrowed, or parsed into the requested type) or the default the
//! caller supplied. They never fail.
//!
//! Defaults are generic over `D: From<T>` where `T` is the success type (or
//! [`IntegerTarget`] for integers), so the caller picks the return type:
//!
//! ```rust
//! use valkit::utils::coerce::get_valid_int;
//! use serde_json::json;
//!
//! // Plain default
//! assert_eq!(get_valid_int(&json!("42abc"), -1), 42);
//! // "No default" sentinel
//! assert_eq!(get_valid_int(&json!("abc"), None::<i64>), None);
//! ```

use regex::Regex;

use crate::types::{is_structured, IntegerTarget, Value, ValueKind};
use crate::utils::numbers::{parse_float, parse_int, value_to_float, value_to_int};

/// Separator of token lists given as a single string
pub const TOKEN_SEPARATOR: char = ',';

/// Returns the value if it is a non-empty string
pub fn get_specified_str<'a, D: From<&'a str>>(value: &'a Value, default_value: D) -> D {
    match value {
        Value::String(s) if !s.is_empty() => D::from(s.as_str()),
        _ => default_value,
    }
}

/// Returns the value if it is an array
pub fn get_valid_arr<'a, D: From<&'a Vec<Value>>>(value: &'a Value, default_value: D) -> D {
    match value {
        Value::Array(items) => D::from(items),
        _ => default_value,
    }
}

/// Returns the value if it is structured
///
/// Both objects and arrays qualify; scalars and `Null` do not.
pub fn get_valid_obj<'a, D: From<&'a Value>>(value: &'a Value, default_value: D) -> D {
    if is_structured(value) {
        D::from(value)
    } else {
        default_value
    }
}

/// Returns the value if it is a string
pub fn get_valid_str<'a, D: From<&'a str>>(value: &'a Value, default_value: D) -> D {
    match value {
        Value::String(s) => D::from(s.as_str()),
        _ => default_value,
    }
}

/// Interpret a value as a boolean
///
/// Strings `on`, `yes`, `true` and `off`, `no`, `false` are recognized
/// regardless of case. Numbers are true unless zero. Booleans pass through.
/// Everything else yields the default.
///
/// # Example
///
/// ```rust
/// use valkit::utils::coerce::get_valid_bool;
/// use serde_json::json;
///
/// assert!(get_valid_bool(&json!("YES"), false));
/// assert!(!get_valid_bool(&json!("maybe"), false));
/// assert!(!get_valid_bool(&json!(0), true));
/// ```
pub fn get_valid_bool<D: From<bool>>(value: &Value, default_value: D) -> D {
    let parsed = match value {
        Value::String(s) => match s.to_lowercase().as_str() {
            "on" | "yes" | "true" => Some(true),
            "off" | "no" | "false" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        Value::Bool(b) => Some(*b),
        _ => None,
    };
    parsed.map_or(default_value, D::from)
}

/// Interpret a value as an integer
///
/// Strings are read up to the first character that cannot continue the
/// number, see [`parse_int`]. A result that does not fit the default's type
/// yields the default.
pub fn get_valid_int<D: IntegerTarget>(value: &Value, default_value: D) -> D {
    value_to_int(value)
        .and_then(D::from_parsed)
        .unwrap_or(default_value)
}

/// Interpret a value as a floating point number
///
/// Strings are read up to the first character that cannot continue the
/// number, see [`parse_float`].
pub fn get_valid_num<D: From<f64>>(value: &Value, default_value: D) -> D {
    value_to_float(value).map_or(default_value, D::from)
}

/// A bound that does not parse places no limit on its side
fn int_bound(bound: &Value) -> Option<i64> {
    value_to_int(bound)
}

fn float_bound(bound: &Value) -> Option<f64> {
    value_to_float(bound).filter(|f| !f.is_nan())
}

/// Interpret a value as an integer within `[min, max]`
///
/// Bounds are parsed the same way as the value. A bound that is not a
/// number, `Null` for instance, leaves that side open.
///
/// # Example
///
/// ```rust
/// use valkit::utils::coerce::get_valid_int_range;
/// use serde_json::json;
///
/// assert_eq!(get_valid_int_range(&json!(5), 1, 10, -1), 5);
/// assert_eq!(get_valid_int_range(&json!(15), 1, 10, -1), -1);
/// assert_eq!(get_valid_int_range(&json!(5), "x", "y", -1), 5);
/// assert_eq!(get_valid_int_range(&json!("500"), None::<i64>, 10, -1), -1);
/// ```
pub fn get_valid_int_range<D, L, H>(value: &Value, min: L, max: H, default_value: D) -> D
where
    D: IntegerTarget,
    L: Into<Value>,
    H: Into<Value>,
{
    let Some(parsed) = value_to_int(value) else {
        return default_value;
    };
    if int_bound(&min.into()).is_some_and(|lo| parsed < lo)
        || int_bound(&max.into()).is_some_and(|hi| parsed > hi)
    {
        return default_value;
    }
    D::from_parsed(parsed).unwrap_or(default_value)
}

/// Interpret a value as a floating point number within `[min, max]`
///
/// Same bound rules as [`get_valid_int_range`].
pub fn get_valid_num_range<D, L, H>(value: &Value, min: L, max: H, default_value: D) -> D
where
    D: From<f64>,
    L: Into<Value>,
    H: Into<Value>,
{
    let Some(parsed) = value_to_float(value) else {
        return default_value;
    };
    if float_bound(&min.into()).is_some_and(|lo| parsed < lo)
        || float_bound(&max.into()).is_some_and(|hi| parsed > hi)
    {
        return default_value;
    }
    D::from(parsed)
}

/// Returns the value if it is a string whose length lies within `[min, max]`
///
/// Length counts UTF-16 code units. Bounds are read with [`parse_int`] rules
/// and ignored when they are not numbers.
pub fn get_valid_str_range<'a, D, L, H>(value: &'a Value, min: L, max: H, default_value: D) -> D
where
    D: From<&'a str>,
    L: Into<Value>,
    H: Into<Value>,
{
    let Value::String(s) = value else {
        return default_value;
    };
    let len = i64::try_from(s.encode_utf16().count()).unwrap_or(i64::MAX);
    if int_bound(&min.into()).is_some_and(|lo| len < lo)
        || int_bound(&max.into()).is_some_and(|hi| len > hi)
    {
        return default_value;
    }
    D::from(s.as_str())
}

/// Returns the value if it is a string matched by `expr`
///
/// The expression is searched for anywhere in the string; anchor it with
/// `^...$` to require a whole-string match.
pub fn get_valid_str_expr<'a, D: From<&'a str>>(
    value: &'a Value,
    expr: &Regex,
    default_value: D,
) -> D {
    match value {
        Value::String(s) if expr.is_match(s) => D::from(s.as_str()),
        _ => default_value,
    }
}

/// Split a token list into trimmed, non-empty tokens
///
/// Accepts either a comma separated string or an array of strings (array
/// elements that are not strings are skipped). Any other input, or an input
/// that yields no tokens, produces the default.
///
/// # Example
///
/// ```rust
/// use valkit::utils::coerce::get_valid_tokens;
/// use serde_json::json;
///
/// assert_eq!(get_valid_tokens(&json!("a, b ,, c"), Vec::new()), ["a", "b", "c"]);
/// assert_eq!(get_valid_tokens(&json!([" x ", "", 3, "y"]), Vec::new()), ["x", "y"]);
/// assert_eq!(get_valid_tokens(&json!(null), vec!["all".to_string()]), ["all"]);
/// ```
pub fn get_valid_tokens<D: From<Vec<String>>>(value: &Value, default_value: D) -> D {
    let tokens: Vec<String> = match value {
        Value::String(s) => collect_tokens(s.split(TOKEN_SEPARATOR)),
        Value::Array(items) => collect_tokens(items.iter().filter_map(Value::as_str)),
        other => {
            tracing::trace!("get_valid_tokens ignores {} input", ValueKind::of(other));
            Vec::new()
        }
    };

    if tokens.is_empty() {
        default_value
    } else {
        D::from(tokens)
    }
}

fn collect_tokens<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    raw.map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Split a token list, yielding an empty list when there are no tokens
pub fn get_tokens(value: &Value) -> Vec<String> {
    get_valid_tokens(value, Vec::new())
}

/// Parse a JSON text into a value
///
/// # Errors
///
/// `ValkitError::Serialization` for malformed JSON.
pub fn parse_json(text: &str) -> crate::Result<Value> {
    Ok(serde_json::from_str(text)?)
}

/// Parse a JSON text, falling back to a default
///
/// The value must be a string holding JSON; anything else, or malformed
/// text, yields the default.
///
/// # Example
///
/// ```rust
/// use valkit::utils::coerce::get_json_value;
/// use serde_json::{json, Value};
///
/// assert_eq!(get_json_value(&json!(r#"{"a":1}"#), Value::Null), json!({"a": 1}));
/// assert_eq!(get_json_value(&json!("not json"), json!("fallback")), json!("fallback"));
/// ```
pub fn get_json_value<D: From<Value>>(value: &Value, default_value: D) -> D {
    let Value::String(text) = value else {
        tracing::trace!("get_json_value expects a string, got {}", ValueKind::of(value));
        return default_value;
    };
    match parse_json(text) {
        Ok(parsed) => D::from(parsed),
        Err(e) => {
            tracing::trace!("get_json_value fell back to default: {}", e);
            default_value
        }
    }
}

/// Parse only the integer prefix of a string, falling back to a default
///
/// Shorthand for [`get_valid_int`] on plain text.
pub fn get_int_from_str<D: IntegerTarget>(text: &str, default_value: D) -> D {
    parse_int(text)
        .and_then(D::from_parsed)
        .unwrap_or(default_value)
}

/// Parse only the numeric prefix of a string, falling back to a default
///
/// Shorthand for [`get_valid_num`] on plain text.
pub fn get_num_from_str<D: From<f64>>(text: &str, default_value: D) -> D {
    parse_float(text).map_or(default_value, D::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_get_specified_str() {
        assert_eq!(get_specified_str(&json!("abc"), "x"), "abc");
        assert_eq!(get_specified_str(&json!(""), "x"), "x");
        assert_eq!(get_specified_str(&json!(5), "x"), "x");
        assert_eq!(get_specified_str(&Value::Null, None::<&str>), None);
        assert_eq!(get_specified_str(&json!("abc"), String::new()), "abc".to_string());
    }

    #[test]
    fn test_get_valid_str() {
        assert_eq!(get_valid_str(&json!(""), "x"), "");
        assert_eq!(get_valid_str(&json!("abc"), None::<&str>), Some("abc"));
        assert_eq!(get_valid_str(&json!(["abc"]), "x"), "x");
        assert_eq!(get_valid_str(&json!(false), None::<&str>), None);
    }

    #[test]
    fn test_get_valid_arr() {
        let value = json!([1, "two"]);
        assert_eq!(get_valid_arr(&value, None::<&Vec<Value>>).map(Vec::len), Some(2));
        assert_eq!(get_valid_arr(&json!({"0": 1}), None::<&Vec<Value>>), None);
        assert_eq!(get_valid_arr(&json!("[1]"), None::<&Vec<Value>>), None);
    }

    #[test]
    fn test_get_valid_obj() {
        let object = json!({"a": 1});
        let array = json!([1]);
        let fallback = json!({});
        assert_eq!(get_valid_obj(&object, &fallback), &object);
        assert_eq!(get_valid_obj(&array, &fallback), &array);
        assert_eq!(get_valid_obj(&json!("{}"), &fallback), &fallback);
        assert_eq!(get_valid_obj(&json!(1), None::<&Value>), None);
        assert_eq!(get_valid_obj(&Value::Null, None::<&Value>), None);
    }

    #[test]
    fn test_get_valid_bool_strings() {
        for truthy in ["on", "yes", "true", "YES", "True", "oN"] {
            assert!(get_valid_bool(&json!(truthy), false), "{truthy}");
        }
        for falsy in ["off", "no", "false", "NO", "False"] {
            assert!(!get_valid_bool(&json!(falsy), true), "{falsy}");
        }
        assert!(!get_valid_bool(&json!("maybe"), false));
        assert!(get_valid_bool(&json!("maybe"), true));
        assert!(!get_valid_bool(&json!(" yes"), false));
        assert_eq!(get_valid_bool(&json!("1"), None::<bool>), None);
    }

    #[test]
    fn test_get_valid_bool_other_types() {
        assert!(!get_valid_bool(&json!(0), true));
        assert!(!get_valid_bool(&json!(0.0), true));
        assert!(get_valid_bool(&json!(-2), false));
        assert!(get_valid_bool(&json!(0.1), false));
        assert!(get_valid_bool(&json!(true), false));
        assert!(!get_valid_bool(&json!(false), true));
        assert_eq!(get_valid_bool(&Value::Null, None::<bool>), None);
        assert_eq!(get_valid_bool(&json!([true]), None::<bool>), None);
        assert_eq!(get_valid_bool(&json!({}), None::<bool>), None);
    }

    #[test]
    fn test_get_valid_int() {
        assert_eq!(get_valid_int(&json!("42abc"), -1), 42);
        assert_eq!(get_valid_int(&json!("abc"), -1), -1);
        assert_eq!(get_valid_int(&json!(" -8 "), 0), -8);
        assert_eq!(get_valid_int(&json!(9.99), 0), 9);
        assert_eq!(get_valid_int(&json!(true), -1), -1);
        assert_eq!(get_valid_int(&Value::Null, None::<i64>), None);
        assert_eq!(get_valid_int(&json!("7"), None::<i64>), Some(7));
    }

    #[test]
    fn test_get_valid_num() {
        assert_eq!(get_valid_num(&json!("1.5kg"), -1.0), 1.5);
        assert_eq!(get_valid_num(&json!(".5"), -1.0), 0.5);
        assert_eq!(get_valid_num(&json!("kg"), -1.0), -1.0);
        assert_eq!(get_valid_num(&json!(3), -1.0), 3.0);
        assert_eq!(get_valid_num(&json!({}), None::<f64>), None);
    }

    #[test]
    fn test_get_valid_int_range() {
        assert_eq!(get_valid_int_range(&json!(5), 1, 10, -1), 5);
        assert_eq!(get_valid_int_range(&json!(15), 1, 10, -1), -1);
        assert_eq!(get_valid_int_range(&json!(0), 1, 10, -1), -1);
        assert_eq!(get_valid_int_range(&json!(1), 1, 10, -1), 1);
        assert_eq!(get_valid_int_range(&json!(10), 1, 10, -1), 10);
        assert_eq!(get_valid_int_range(&json!(5), "x", "y", -1), 5);
        assert_eq!(get_valid_int_range(&json!(500), "x", 10, -1), -1);
        assert_eq!(get_valid_int_range(&json!(-500), Value::Null, 10, -1), -500);
        assert_eq!(get_valid_int_range(&json!("7px"), "5", "8", -1), 7);
        assert_eq!(get_valid_int_range(&json!("px"), 1, 10, None::<i32>), None);
    }

    #[test]
    fn test_get_valid_num_range() {
        assert_eq!(get_valid_num_range(&json!(0.5), 0, 1, -1.0), 0.5);
        assert_eq!(get_valid_num_range(&json!(1.01), 0, 1, -1.0), -1.0);
        assert_eq!(get_valid_num_range(&json!("-0.1"), 0.0, 1.0, -1.0), -1.0);
        assert_eq!(get_valid_num_range(&json!(99.5), "low", "high", -1.0), 99.5);
        assert_eq!(get_valid_num_range(&json!("Infinity"), 0, None::<f64>, -1.0), f64::INFINITY);
        assert_eq!(get_valid_num_range(&json!("Infinity"), 0, 1e9, None::<f64>), None);
    }

    #[test]
    fn test_get_valid_str_range() {
        assert_eq!(get_valid_str_range(&json!("abc"), 1, 3, "x"), "abc");
        assert_eq!(get_valid_str_range(&json!("abcd"), 1, 3, "x"), "x");
        assert_eq!(get_valid_str_range(&json!(""), 1, 3, "x"), "x");
        assert_eq!(get_valid_str_range(&json!(""), Value::Null, Value::Null, "x"), "");
        assert_eq!(get_valid_str_range(&json!("äöü"), 3, 3, "x"), "äöü");
        assert_eq!(get_valid_str_range(&json!("😎"), 1, 1, "x"), "x");
        assert_eq!(get_valid_str_range(&json!(123), 1, 3, None::<&str>), None);
    }

    #[test]
    fn test_get_valid_str_expr() {
        let digits = Regex::new(r"^[0-9]+$").unwrap();
        let word = Regex::new(r"[a-z]+").unwrap();
        assert_eq!(get_valid_str_expr(&json!("123"), &digits, "x"), "123");
        assert_eq!(get_valid_str_expr(&json!("12a"), &digits, "x"), "x");
        assert_eq!(get_valid_str_expr(&json!("12a"), &word, "x"), "12a");
        assert_eq!(get_valid_str_expr(&json!(123), &digits, None::<&str>), None);
    }

    #[test]
    fn test_get_valid_tokens() {
        assert_eq!(get_valid_tokens(&json!("a, b ,, c"), Vec::new()), ["a", "b", "c"]);
        assert_eq!(get_valid_tokens(&json!(["a", " b ", ""]), Vec::new()), ["a", "b"]);
        assert_eq!(get_valid_tokens(&json!("single"), Vec::new()), ["single"]);
        assert_eq!(get_valid_tokens(&json!(""), vec!["d".to_string()]), ["d"]);
        assert_eq!(get_valid_tokens(&json!(" , ,"), None::<Vec<String>>), None);
        assert_eq!(get_valid_tokens(&json!(42), None::<Vec<String>>), None);
        assert!(get_tokens(&Value::Null).is_empty());
    }

    #[test]
    fn test_get_json_value() {
        assert_eq!(get_json_value(&json!(r#"{"a":1}"#), Value::Null), json!({"a": 1}));
        assert_eq!(get_json_value(&json!("[1,2]"), Value::Null), json!([1, 2]));
        assert_eq!(get_json_value(&json!("null"), json!("x")), Value::Null);
        assert_eq!(get_json_value(&json!("not json"), json!("fallback")), json!("fallback"));
        assert_eq!(get_json_value(&json!(""), None::<Value>), None);
        assert_eq!(get_json_value(&json!(1), None::<Value>), None);
        assert_eq!(get_json_value(&json!({"a": 1}), None::<Value>), None);
    }

    #[test]
    fn test_str_shorthands() {
        assert_eq!(get_int_from_str("0x20 spaces", 0), 32);
        assert_eq!(get_int_from_str("none", 0), 0);
        assert_eq!(get_num_from_str("1e3ms", 0.0), 1000.0);
        assert_eq!(get_num_from_str("ms", None::<f64>), None);
    }
}
