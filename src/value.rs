//! The value carried by a control.
//!
//! A control holds either nothing, a string, or a number. `Empty` is deliberately distinct
//! from `Number(0.0)` and from `Text("")`: numeric zero is a real value and must never be
//! coerced away.

use std::fmt;

/// A control value: `string | number | empty`.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize, serde::Serialize),
    serde(untagged)
)]
pub enum Value {
    #[default]
    Empty,
    Number(f64),
    Text(String),
}

impl Value {
    /// Build a text value.
    pub fn text(s: impl Into<String>) -> Self {
        Value::Text(s.into())
    }

    /// Truthiness as the host language sees it: empty, `""`, `0` and `NaN` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Empty => false,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Text(s) => !s.is_empty(),
        }
    }

    /// True for the `Empty` variant only.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// True for numeric zero (either sign).
    pub fn is_zero(&self) -> bool {
        matches!(self, Value::Number(n) if *n == 0.0)
    }

    /// True for the empty string (not for `Empty`).
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Value::Text(s) if s.is_empty())
    }

    /// Borrow the text if this is a `Text` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view: numbers as-is, text parsed when it holds a finite number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) if n.is_finite() => Some(*n),
            Value::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// The value the toolkit should display: `Empty` shows as an empty field, while
    /// falsy-but-real values such as `0` are kept.
    pub fn display_value(&self) -> String {
        if self.is_truthy() || self.is_zero() {
            self.to_string()
        } else {
            String::new()
        }
    }
}

/// Parse trimmed text as a finite `f64`.
pub fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Number(n) => write!(f, "{n}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Empty, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_falsy_but_not_empty() {
        let zero = Value::Number(0.0);
        assert!(!zero.is_truthy());
        assert!(zero.is_zero());
        assert!(!zero.is_empty());
        assert_eq!(zero.display_value(), "0");
    }

    #[test]
    fn empty_string_and_empty_are_distinct() {
        assert_ne!(Value::text(""), Value::Empty);
        assert!(Value::text("").is_empty_string());
        assert!(!Value::Empty.is_empty_string());
        assert_eq!(Value::Empty.display_value(), "");
    }

    #[test]
    fn integral_numbers_display_without_fraction() {
        assert_eq!(Value::Number(42.0).to_string(), "42");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
    }

    #[test]
    fn numeric_text_parses() {
        assert_eq!(Value::text(" 17 ").as_number(), Some(17.0));
        assert_eq!(Value::text("abc").as_number(), None);
        assert_eq!(Value::text("").as_number(), None);
        assert_eq!(Value::Number(f64::NAN).as_number(), None);
        assert!(!Value::Number(f64::NAN).is_truthy());
    }

    #[test]
    fn option_conversion_maps_none_to_empty() {
        assert_eq!(Value::from(None::<&str>), Value::Empty);
        assert_eq!(Value::from(Some("x")), Value::text("x"));
    }
}
