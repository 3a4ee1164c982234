//! Dynamic value handling shared by the coercion helpers
//!
//! Every helper in this crate accepts a value of unknown shape. That shape is
//! modelled with [`serde_json::Value`]: strings, numbers, booleans, arrays,
//! objects and `Null`, which doubles as the "absent" input.

use std::borrow::Cow;

pub use serde_json::{Number, Value};

/// Rendered form of an object when it is coerced to text
pub const OBJECT_TEXT: &str = "[object Object]";

/// Coarse classification of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `Value::Null`, the absent input
    Absent,
    /// `Value::Bool`
    Boolean,
    /// `Value::Number`
    Number,
    /// `Value::String`
    String,
    /// `Value::Array`
    Array,
    /// `Value::Object`
    Object,
}

impl ValueKind {
    /// Classify a value
    pub const fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Absent,
            Value::Bool(_) => Self::Boolean,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    /// Convert kind to string representation
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Boolean => "boolean",
            Self::Number => "number",
            Self::String => "string",
            Self::Array => "array",
            Self::Object => "object",
        }
    }

    /// Structured values are the keyed or indexed ones
    pub const fn is_structured(self) -> bool {
        matches!(self, Self::Array | Self::Object)
    }
}

impl std::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check whether a value is structured (an array or an object)
pub const fn is_structured(value: &Value) -> bool {
    ValueKind::of(value).is_structured()
}

/// Render a number the way a dynamic runtime prints it
///
/// Integral floats lose their fraction (`5.0` prints as `5`); everything
/// else uses the shortest round-trip representation.
pub fn number_text(number: &Number) -> String {
    if number.is_f64() {
        if let Some(f) = number.as_f64() {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 {
                return format!("{f:.0}");
            }
        }
    }
    number.to_string()
}

/// Coerce any value to text
///
/// Strings are borrowed as they are. Other values are rendered:
/// `null`, `true`/`false`, numbers via [`number_text`], arrays by joining
/// their rendered elements with `,` (absent elements render empty) and
/// objects as `[object Object]`.
///
/// # Example
///
/// ```rust
/// use valkit::types::to_js_string;
/// use serde_json::json;
///
/// assert_eq!(to_js_string(&json!("text")), "text");
/// assert_eq!(to_js_string(&json!([1, null, "x"])), "1,,x");
/// assert_eq!(to_js_string(&json!({"a": 1})), "[object Object]");
/// ```
pub fn to_js_string(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(number_text(n)),
        Value::Array(items) => Cow::Owned(
            items
                .iter()
                .map(|item| match item {
                    Value::Null => Cow::Borrowed(""),
                    other => to_js_string(other),
                })
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => Cow::Borrowed(OBJECT_TEXT),
    }
}

/// Integer types the integer coercers can produce
///
/// The caller's default picks the target type. A parsed value that does not
/// fit the target is treated like a value that did not parse. `Option<T>`
/// targets let `None` act as the "no default" sentinel.
pub trait IntegerTarget: Sized {
    /// Narrow a parsed integer to this type
    fn from_parsed(value: i64) -> Option<Self>;
}

macro_rules! integer_target {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntegerTarget for $t {
                fn from_parsed(value: i64) -> Option<Self> {
                    <$t>::try_from(value).ok()
                }
            }

            impl IntegerTarget for Option<$t> {
                fn from_parsed(value: i64) -> Option<Self> {
                    <$t>::try_from(value).ok().map(Some)
                }
            }
        )*
    };
}

integer_target!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
