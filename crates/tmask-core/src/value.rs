#![forbid(unsafe_code)]

//! Value-safety normalization.
//!
//! Hosts hand the engine whatever their field currently holds. Text passes
//! through, numbers are formatted in plain decimal, absent values become the
//! empty string, and everything else is rejected with
//! [`MaskError::InvalidInputType`].
//!
//! ```
//! use tmask_core::{InputValue, normalize};
//!
//! assert_eq!(normalize("555").unwrap(), "555");
//! assert_eq!(normalize(42_i64).unwrap(), "42");
//! assert_eq!(normalize(1.5_f64).unwrap(), "1.5");
//! assert_eq!(normalize(None::<&str>).unwrap(), "");
//! assert!(normalize(true).is_err());
//! ```

use std::borrow::Cow;

use crate::error::MaskError;

/// A raw value of unspecified type, as handed over by a host field.
#[derive(Debug, Clone, PartialEq)]
pub enum InputValue<'a> {
    /// Text, passed through unchanged.
    Text(Cow<'a, str>),
    /// Signed integer.
    Integer(i64),
    /// Unsigned integer.
    Unsigned(u64),
    /// Floating point number.
    Float(f64),
    /// No value (`null` / `undefined` on the host side).
    Absent,
    /// A value of some other type; always rejected.
    Other(&'static str),
}

/// Coerce a raw value into the string the engine works on.
pub fn normalize<'a>(value: impl Into<InputValue<'a>>) -> Result<String, MaskError> {
    match value.into() {
        InputValue::Text(text) => Ok(text.into_owned()),
        InputValue::Integer(n) => Ok(n.to_string()),
        InputValue::Unsigned(n) => Ok(n.to_string()),
        InputValue::Float(n) => Ok(format_float(n)),
        InputValue::Absent => Ok(String::new()),
        InputValue::Other(type_name) => Err(MaskError::InvalidInputType { type_name }),
    }
}

fn format_float(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else if n == 0.0 {
        // -0.0 formats as "0"
        "0".to_string()
    } else {
        n.to_string()
    }
}

impl<'a> From<&'a str> for InputValue<'a> {
    fn from(value: &'a str) -> Self {
        Self::Text(Cow::Borrowed(value))
    }
}

impl<'a> From<&'a String> for InputValue<'a> {
    fn from(value: &'a String) -> Self {
        Self::Text(Cow::Borrowed(value.as_str()))
    }
}

impl From<String> for InputValue<'_> {
    fn from(value: String) -> Self {
        Self::Text(Cow::Owned(value))
    }
}

impl<'a> From<Cow<'a, str>> for InputValue<'a> {
    fn from(value: Cow<'a, str>) -> Self {
        Self::Text(value)
    }
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {
        $(impl From<$t> for InputValue<'_> {
            fn from(value: $t) -> Self {
                Self::Integer(i64::from(value))
            }
        })*
    };
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {
        $(impl From<$t> for InputValue<'_> {
            fn from(value: $t) -> Self {
                Self::Unsigned(u64::from(value))
            }
        })*
    };
}

impl_from_signed!(i8, i16, i32, i64);
impl_from_unsigned!(u8, u16, u32, u64);

impl From<usize> for InputValue<'_> {
    fn from(value: usize) -> Self {
        Self::Unsigned(value as u64)
    }
}

impl From<isize> for InputValue<'_> {
    fn from(value: isize) -> Self {
        Self::Integer(value as i64)
    }
}

impl From<f32> for InputValue<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl From<f64> for InputValue<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for InputValue<'_> {
    fn from(_: bool) -> Self {
        Self::Other("bool")
    }
}

impl From<()> for InputValue<'_> {
    fn from(_: ()) -> Self {
        Self::Absent
    }
}

impl<'a, T: Into<InputValue<'a>>> From<Option<T>> for InputValue<'a> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

#[cfg(feature = "json")]
impl From<serde_json::Value> for InputValue<'_> {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::Absent,
            Value::String(s) => Self::Text(Cow::Owned(s)),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Self::Unsigned(u)
                } else {
                    n.as_f64().map_or(Self::Other("number"), Self::Float)
                }
            }
            Value::Bool(_) => Self::Other("bool"),
            Value::Array(_) => Self::Other("array"),
            Value::Object(_) => Self::Other("object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_passes_through() {
        assert_eq!(normalize("(555) 12").unwrap(), "(555) 12");
        assert_eq!(normalize(String::from("abc")).unwrap(), "abc");
    }

    #[test]
    fn numbers_use_plain_decimal() {
        assert_eq!(normalize(-17_i32).unwrap(), "-17");
        assert_eq!(normalize(2_u8).unwrap(), "2");
        assert_eq!(normalize(2.0_f64).unwrap(), "2");
        assert_eq!(normalize(1234.5_f64).unwrap(), "1234.5");
        assert_eq!(normalize(-0.0_f64).unwrap(), "0");
    }

    #[test]
    fn absent_is_empty() {
        assert_eq!(normalize(()).unwrap(), "");
        assert_eq!(normalize(None::<i32>).unwrap(), "");
        assert_eq!(normalize(Some(7_i32)).unwrap(), "7");
    }

    #[test]
    fn other_types_are_rejected() {
        assert_eq!(
            normalize(false),
            Err(MaskError::InvalidInputType { type_name: "bool" })
        );
    }

    #[cfg(feature = "json")]
    #[test]
    fn json_values() {
        use serde_json::json;
        assert_eq!(normalize(json!(null)).unwrap(), "");
        assert_eq!(normalize(json!("12")).unwrap(), "12");
        assert_eq!(normalize(json!(12)).unwrap(), "12");
        assert_eq!(normalize(json!(0.25)).unwrap(), "0.25");
        assert_eq!(
            normalize(json!([1, 2])),
            Err(MaskError::InvalidInputType { type_name: "array" })
        );
        assert_eq!(
            normalize(json!({"a": 1})),
            Err(MaskError::InvalidInputType { type_name: "object" })
        );
    }
}
