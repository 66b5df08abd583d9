//! Flat records produced by response resolvers.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// A scalar cell value, kept in the type it was received as.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(Number),
    Text(String),
}

impl Scalar {
    /// Converts a JSON value into a scalar; arrays and objects yield `None`.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Self::Null),
            Value::Bool(flag) => Some(Self::Bool(*flag)),
            Value::Number(number) => Some(Self::Number(number.clone())),
            Value::String(text) => Some(Self::Text(text.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Text(text) => Value::String(text.clone()),
        }
    }

    /// Numeric view of the cell. Only numbers qualify; numeric-looking text
    /// stays text.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Number(number) => write!(f, "{number}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<f64> for Scalar {
    /// Non-finite values have no JSON representation and become `Null`.
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// One flat key/value record. Field order is the order the fields were
/// received in and is significant: the first field becomes the table index.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawRecord {
    fields: IndexMap<String, Scalar>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Scalar>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Scalar> {
        self.fields.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Scalar)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// True when both records carry exactly the same set of field names,
    /// regardless of order.
    pub fn same_keys(&self, other: &RawRecord) -> bool {
        self.len() == other.len() && self.keys().all(|key| other.fields.contains_key(key))
    }
}

impl<K: Into<String>, V: Into<Scalar>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn scalars_reject_nested_values() {
        assert_eq!(Scalar::from_json(&json!(500)), Some(Scalar::from(500_i64)));
        assert_eq!(Scalar::from_json(&json!("x")), Some(Scalar::from("x")));
        assert_eq!(Scalar::from_json(&json!(null)), Some(Scalar::Null));
        assert_eq!(Scalar::from_json(&json!([1, 2])), None);
        assert_eq!(Scalar::from_json(&json!({"a": 1})), None);
    }

    #[test]
    fn numeric_text_is_not_numeric() {
        assert_eq!(Scalar::from("510").as_f64(), None);
        assert_eq!(Scalar::from(70e12).as_f64(), Some(70e12));
        assert_eq!(Scalar::from(f64::NAN), Scalar::Null);
    }

    #[test]
    fn records_preserve_field_order() {
        let record: RawRecord = [("timestamp", Scalar::from("2024-01-01")), ("hashrate", Scalar::from(500_i64))]
            .into_iter()
            .collect();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["timestamp", "hashrate"]);
    }

    #[test]
    fn same_keys_ignores_order() {
        let left: RawRecord = [("t", 1_i64), ("a", 2_i64)].into_iter().collect();
        let right: RawRecord = [("a", 3_i64), ("t", 4_i64)].into_iter().collect();
        let other: RawRecord = [("t", 1_i64), ("b", 2_i64)].into_iter().collect();
        assert!(left.same_keys(&right));
        assert!(!left.same_keys(&other));
    }
}
