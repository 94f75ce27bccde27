use std::cmp::Ordering;

use rust_decimal::{Decimal, prelude::FromPrimitive};

/// A scalar value used by tag queries.
///
/// Literals written in a query (`"lake"`, `2018`, `true`, `None`) and the
/// fixed fields of an item share this representation, so comparisons are a
/// matter of ordering two `Value`s.
///
/// # Examples
///
/// ```
/// use tagquery::Value;
/// use std::cmp::Ordering;
///
/// let year = Value::Integer(2020);
/// assert_eq!(year.compare(&Value::Float(2020.0)), Some(Ordering::Equal));
/// assert_eq!(year.compare(&Value::String("2020".into())), None);
/// assert!(Value::None.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent / unset (`None` in a query)
    None,

    /// Boolean (`true`/`false`)
    Boolean(bool),

    /// Integer number
    Integer(i64),

    /// Floating-point number, only ever produced by literals with a `.`
    Float(f64),

    /// UTF-8 string
    String(String),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::Float(_))
    }

    /// Human-readable name of the value's type, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Boolean(_) => "boolean",
            Value::Integer(_) => "integer",
            Value::Float(_) => "float",
            Value::String(_) => "string",
        }
    }

    /// Get as an exact decimal for numeric comparison
    fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Integer(n) => Some(Decimal::from(*n)),
            Value::Float(n) => Decimal::from_f64(*n),
            _ => None,
        }
    }

    /// Order two values of compatible types.
    ///
    /// Numbers compare numerically regardless of integer/float representation,
    /// strings compare lexicographically, booleans only compare for equality
    /// (`true` and `false` are never ordered relative to each other).
    /// Returns `None` when the types are incompatible or either side is `None`.
    pub fn compare(&self, other: &Value) -> Option<Ordering> {
        match (self, other) {
            (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
            (Value::Boolean(a), Value::Boolean(b)) => {
                if a == b {
                    Some(Ordering::Equal)
                } else {
                    None
                }
            }
            (a, b) if a.is_numeric() && b.is_numeric() => {
                match (a.as_decimal(), b.as_decimal()) {
                    (Some(x), Some(y)) => Some(x.cmp(&y)),
                    // Out of decimal range; fall back to float ordering
                    _ => a.as_float()?.partial_cmp(&b.as_float()?),
                }
            }
            _ => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            Value::Integer(n) => Some(*n as f64),
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Integer(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_numeric_compare() {
        assert_eq!(
            Value::Integer(3).compare(&Value::Float(2.5)),
            Some(Ordering::Greater)
        );
        assert_eq!(
            Value::Float(-1.5).compare(&Value::Integer(-1)),
            Some(Ordering::Less)
        );
    }

    #[test]
    fn test_booleans_are_not_ordered() {
        assert_eq!(
            Value::Boolean(true).compare(&Value::Boolean(true)),
            Some(Ordering::Equal)
        );
        assert_eq!(Value::Boolean(true).compare(&Value::Boolean(false)), None);
    }

    #[test]
    fn test_none_is_incomparable() {
        assert_eq!(Value::None.compare(&Value::None), None);
        assert_eq!(Value::Integer(1).compare(&Value::None), None);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(Some(5i64)), Value::Integer(5));
        assert_eq!(Value::from(None::<i64>), Value::None);
    }
}
