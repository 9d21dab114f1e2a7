//! Option Values
//!
//! Stored options are a closed set of shapes. They serialize untagged so the
//! persisted JSON stays plain (`"x"`, `true`, `3`, `["a", "b"]`).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<String>),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Loose truthiness as the host settings layer sees it.
    ///
    /// `""`, `"0"`, `false`, `0` and the empty list are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(n) => *n != 0,
            Self::String(s) => is_truthy_str(s),
            Self::List(items) => !items.is_empty(),
        }
    }

    /// Short type label, used by the CLI
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::String(_) => "string",
            Self::List(_) => "list",
        }
    }
}

pub(crate) fn is_truthy_str(s: &str) -> bool {
    !s.is_empty() && s != "0"
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(n) => write!(f, "{}", n),
            Self::String(s) => write!(f, "{}", s),
            Self::List(items) => write!(f, "[{}]", items.join(", ")),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for OptionValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<String>> for OptionValue {
    fn from(items: Vec<String>) -> Self {
        Self::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untagged_json_shape() {
        let values = vec![
            OptionValue::Bool(true),
            OptionValue::Int(42),
            OptionValue::from("abc"),
            OptionValue::List(vec!["a".into(), "b".into()]),
        ];
        let json = serde_json::to_string(&values).unwrap();
        assert_eq!(json, r#"[true,42,"abc",["a","b"]]"#);

        let parsed: Vec<OptionValue> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, values);
    }

    #[test]
    fn test_numeric_string_stays_string() {
        let parsed: OptionValue = serde_json::from_str(r#""1700000000""#).unwrap();
        assert_eq!(parsed, OptionValue::String("1700000000".into()));
    }

    #[test]
    fn test_truthiness() {
        assert!(!OptionValue::from("").is_truthy());
        assert!(!OptionValue::from("0").is_truthy());
        assert!(!OptionValue::Bool(false).is_truthy());
        assert!(!OptionValue::Int(0).is_truthy());
        assert!(!OptionValue::List(vec![]).is_truthy());

        assert!(OptionValue::from("e1").is_truthy());
        assert!(OptionValue::Int(-1).is_truthy());
        assert!(OptionValue::List(vec!["".into()]).is_truthy());
    }
}
