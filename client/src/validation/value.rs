use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Data record handed to the [`Validator`](super::Validator).
///
/// Keys missing from the record are treated as [`FieldValue::Null`].
pub type ValidationRecord = HashMap<String, FieldValue>;

/// A single field value as submitted by a form.
///
/// Values follow loose truthiness: `Null`, `false`, `0`, `NaN`, empty text
/// and empty lists are falsy, everything else is truthy.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<FieldValue>),
}

impl FieldValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(value) => *value,
            FieldValue::Number(value) => *value != 0.0 && !value.is_nan(),
            FieldValue::Text(value) => !value.is_empty(),
            FieldValue::List(values) => !values.is_empty(),
        }
    }

    pub fn is_falsy(&self) -> bool {
        !self.is_truthy()
    }

    /// Character count for text, element count for lists.
    ///
    /// Numbers and booleans have no length.
    pub fn length(&self) -> Option<usize> {
        match self {
            FieldValue::Text(value) => Some(value.chars().count()),
            FieldValue::List(values) => Some(values.len()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(values: Vec<T>) -> Self {
        FieldValue::List(values.into_iter().map(Into::into).collect())
    }
}

/// Builds a [`ValidationRecord`] from `(field, value)` pairs.
pub fn record<I, K, V>(entries: I) -> ValidationRecord
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<FieldValue>,
{
    entries
        .into_iter()
        .map(|(field, value)| (field.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(FieldValue::Null.is_falsy());
        assert!(FieldValue::from("").is_falsy());
        assert!(FieldValue::from(0i64).is_falsy());
        assert!(FieldValue::Number(f64::NAN).is_falsy());
        assert!(FieldValue::from(false).is_falsy());
        assert!(FieldValue::List(vec![]).is_falsy());

        assert!(FieldValue::from("x").is_truthy());
        assert!(FieldValue::from(-1i64).is_truthy());
        assert!(FieldValue::from(true).is_truthy());
        assert!(FieldValue::from(vec!["a"]).is_truthy());
    }

    #[test]
    fn test_length_counts_characters() {
        assert_eq!(FieldValue::from("ação").length(), Some(4));
        assert_eq!(FieldValue::from(vec![1i64, 2, 3]).length(), Some(3));
        assert_eq!(FieldValue::from(42i64).length(), None);
        assert_eq!(FieldValue::Null.length(), None);
    }

    #[test]
    fn test_deserialize_from_json() {
        let record: ValidationRecord =
            serde_json::from_str(r#"{"name": "Ana", "age": 31, "tags": [], "nick": null}"#)
                .unwrap();

        assert_eq!(record["name"], FieldValue::from("Ana"));
        assert_eq!(record["age"], FieldValue::Number(31.0));
        assert_eq!(record["tags"], FieldValue::List(vec![]));
        assert_eq!(record["nick"], FieldValue::Null);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
        assert_eq!(FieldValue::from(Some("a")), FieldValue::from("a"));
    }
}
