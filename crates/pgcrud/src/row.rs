//! Decoded result rows.
//!
//! The executor returns rows as ordered column-name/value pairs rather than
//! driver-specific row handles, so callers never touch `tokio_postgres::Row`
//! directly.

use crate::error::{CrudError, CrudResult};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A single decoded value from a database column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub enum Value {
    /// NULL value.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Signed integer (up to i64).
    Int(i64),

    /// Floating point number.
    Float(f64),

    /// Text/string value.
    Text(String),

    /// Binary data.
    Bytes(Vec<u8>),
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Text(_) => "text",
            Value::Bytes(_) => "bytes",
        }
    }
}

impl TryFrom<Value> for bool {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, String> {
        match v {
            Value::Bool(b) => Ok(b),
            other => Err(format!("expected boolean, got {}", other.kind())),
        }
    }
}

impl TryFrom<Value> for i64 {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, String> {
        match v {
            Value::Int(i) => Ok(i),
            other => Err(format!("expected integer, got {}", other.kind())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, String> {
        match v {
            Value::Float(f) => Ok(f),
            Value::Int(i) => Ok(i as f64),
            other => Err(format!("expected float, got {}", other.kind())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, String> {
        match v {
            Value::Text(s) => Ok(s),
            other => Err(format!("expected text, got {}", other.kind())),
        }
    }
}

impl TryFrom<Value> for Vec<u8> {
    type Error = String;

    fn try_from(v: Value) -> Result<Self, String> {
        match v {
            Value::Bytes(b) => Ok(b),
            other => Err(format!("expected bytes, got {}", other.kind())),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{}", v),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bytes(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => Value::Null,
        }
    }
}

/// A decoded result row: column-name/value pairs in result-set order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    columns: Vec<(String, Value)>,
}

impl Row {
    /// Create a row from (column, value) pairs, keeping their order.
    pub fn from_pairs(columns: Vec<(String, Value)>) -> Self {
        Self { columns }
    }

    /// Get a value by column name.
    ///
    /// If the query selected the same column name twice, the first
    /// occurrence wins.
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value)
    }

    /// Get a column converted to a concrete type, erroring on a missing
    /// column or a mismatched variant.
    ///
    /// NULLs are a mismatch for every target type; use [`Row::get`] when a
    /// column may be NULL.
    pub fn try_get_typed<T>(&self, column: &str) -> CrudResult<T>
    where
        T: TryFrom<Value, Error = String>,
    {
        let value = self
            .get(column)
            .ok_or_else(|| CrudError::decode(column, "column not present"))?;
        T::try_from(value.clone()).map_err(|message| CrudError::decode(column, message))
    }

    /// Column names in result-set order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Iterate over (column, value) pairs in result-set order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Decode a driver row into an ordered name/value row.
    pub(crate) fn decode(row: &tokio_postgres::Row) -> Self {
        let columns = row
            .columns()
            .iter()
            .enumerate()
            .map(|(i, col)| (col.name().to_string(), decode_value(row, i, col.type_().name())))
            .collect();
        Self { columns }
    }
}

impl Serialize for Row {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, value) in &self.columns {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Decode one column by its Postgres type name.
///
/// NULLs and values this crate cannot decode become `Value::Null`; temporal
/// and json columns are rendered as text.
fn decode_value(row: &tokio_postgres::Row, index: usize, type_name: &str) -> Value {
    match type_name {
        "bool" => row
            .try_get::<_, Option<bool>>(index)
            .ok()
            .flatten()
            .map(Value::Bool)
            .unwrap_or(Value::Null),

        "int2" => row
            .try_get::<_, Option<i16>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "int4" => row
            .try_get::<_, Option<i32>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Int(v as i64))
            .unwrap_or(Value::Null),

        "int8" => row
            .try_get::<_, Option<i64>>(index)
            .ok()
            .flatten()
            .map(Value::Int)
            .unwrap_or(Value::Null),

        "float4" => row
            .try_get::<_, Option<f32>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Float(v as f64))
            .unwrap_or(Value::Null),

        "float8" => row
            .try_get::<_, Option<f64>>(index)
            .ok()
            .flatten()
            .map(Value::Float)
            .unwrap_or(Value::Null),

        "bytea" => row
            .try_get::<_, Option<Vec<u8>>>(index)
            .ok()
            .flatten()
            .map(Value::Bytes)
            .unwrap_or(Value::Null),

        "timestamp" => row
            .try_get::<_, Option<chrono::NaiveDateTime>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Text(v.to_string()))
            .unwrap_or(Value::Null),

        "timestamptz" => row
            .try_get::<_, Option<chrono::DateTime<chrono::Utc>>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Text(v.to_rfc3339()))
            .unwrap_or(Value::Null),

        "date" => row
            .try_get::<_, Option<chrono::NaiveDate>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Text(v.to_string()))
            .unwrap_or(Value::Null),

        "time" => row
            .try_get::<_, Option<chrono::NaiveTime>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Text(v.to_string()))
            .unwrap_or(Value::Null),

        "json" | "jsonb" => row
            .try_get::<_, Option<serde_json::Value>>(index)
            .ok()
            .flatten()
            .map(|v| Value::Text(v.to_string()))
            .unwrap_or(Value::Null),

        // text, varchar, bpchar, name, and anything else decodable as text
        _ => row
            .try_get::<_, Option<String>>(index)
            .ok()
            .flatten()
            .map(Value::Text)
            .unwrap_or(Value::Null),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_display() {
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::Float(2.71).to_string(), "2.71");
        assert_eq!(Value::Text("hello".to_string()).to_string(), "hello");
        assert_eq!(Value::Bytes(vec![1, 2, 3]).to_string(), "<3 bytes>");
    }

    #[test]
    fn value_is_null() {
        assert!(Value::Null.is_null());
        assert!(!Value::Bool(false).is_null());
        assert!(!Value::Int(0).is_null());
    }

    #[test]
    fn value_from_conversions() {
        assert_eq!(Value::from(true), Value::Bool(true));
        assert_eq!(Value::from(42i32), Value::Int(42));
        assert_eq!(Value::from(42i64), Value::Int(42));
        assert_eq!(Value::from(2.71f64), Value::Float(2.71));
        assert_eq!(Value::from("hello"), Value::Text("hello".to_string()));
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some(42i32)), Value::Int(42));
    }

    #[test]
    fn row_get_and_order() {
        let row = Row::from_pairs(vec![
            ("id".to_string(), Value::Int(1)),
            ("name".to_string(), Value::Text("alice".to_string())),
            ("email".to_string(), Value::Null),
        ]);

        assert_eq!(row.len(), 3);
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
        assert_eq!(row.get("email"), Some(&Value::Null));
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["id", "name", "email"]);
    }

    #[test]
    fn row_typed_access() {
        let row = Row::from_pairs(vec![
            ("id".to_string(), Value::Int(7)),
            ("name".to_string(), Value::Text("alice".to_string())),
            ("score".to_string(), Value::Float(0.5)),
        ]);

        assert_eq!(row.try_get_typed::<i64>("id").unwrap(), 7);
        assert_eq!(row.try_get_typed::<String>("name").unwrap(), "alice");
        assert_eq!(row.try_get_typed::<f64>("score").unwrap(), 0.5);
        // integer columns widen to f64
        assert_eq!(row.try_get_typed::<f64>("id").unwrap(), 7.0);
    }

    #[test]
    fn row_typed_access_mismatch_and_missing() {
        let row = Row::from_pairs(vec![("id".to_string(), Value::Int(7))]);

        let err = row.try_get_typed::<String>("id").unwrap_err();
        assert!(matches!(err, CrudError::Decode { ref column, .. } if column == "id"));

        let err = row.try_get_typed::<i64>("missing").unwrap_err();
        assert!(matches!(err, CrudError::Decode { ref column, .. } if column == "missing"));
    }

    #[test]
    fn row_duplicate_column_first_wins() {
        let row = Row::from_pairs(vec![
            ("id".to_string(), Value::Int(1)),
            ("id".to_string(), Value::Int(2)),
        ]);
        assert_eq!(row.get("id"), Some(&Value::Int(1)));
    }

    #[test]
    fn row_serializes_as_ordered_map() {
        let row = Row::from_pairs(vec![
            ("b".to_string(), Value::Int(2)),
            ("a".to_string(), Value::Int(1)),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"b":{"Int":2},"a":{"Int":1}}"#);
    }
}
