//! Raw values handed to insert operations

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// A raw datum supplied by the caller, before formatting.
///
/// Insert operations never format values themselves; they pass the raw value
/// and the target style's [`ValueFormat`](crate::ValueFormat) to the single
/// formatting entry point.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// No value
    Empty,
    /// Boolean
    Bool(bool),
    /// Numeric value
    Number(f64),
    /// Text
    Text(String),
    /// Date-time value
    DateTime(NaiveDateTime),
}

/// Coarse type tag used for per-type style dispatch (dictionary rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Empty,
    Bool,
    Number,
    Text,
    DateTime,
}

impl Value {
    /// The coarse type of this value
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Empty => ValueKind::Empty,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::DateTime(_) => ValueKind::DateTime,
        }
    }

    /// True for [`Value::Empty`]
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Try to read the value as a number (texts are parsed)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Bool(true) => Some(1.0),
            Value::Bool(false) => Some(0.0),
            Value::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            Value::Number(n) => write!(f, "{}", n),
            Value::Text(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", dt),
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

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

impl From<NaiveDate> for Value {
    fn from(d: NaiveDate) -> Self {
        Value::DateTime(d.and_hms_opt(0, 0, 0).expect("midnight is valid"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_dispatch() {
        assert_eq!(Value::from("x").kind(), ValueKind::Text);
        assert_eq!(Value::from(1.5).kind(), ValueKind::Number);
        assert_eq!(Value::from(true).kind(), ValueKind::Bool);
        assert_eq!(Value::Empty.kind(), ValueKind::Empty);
    }

    #[test]
    fn test_as_number_parses_text() {
        assert_eq!(Value::from("42.5").as_number(), Some(42.5));
        assert_eq!(Value::from(" 7 ").as_number(), Some(7.0));
        assert_eq!(Value::from("seven").as_number(), None);
        assert_eq!(Value::from(true).as_number(), Some(1.0));
    }
}
