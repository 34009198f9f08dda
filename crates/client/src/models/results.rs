//! Result set models for the Pandora search API.
//!
//! Results arrive columnar: an ordered list of field descriptors plus rows
//! of values aligned to those fields by position. [`ResultSet::to_records`]
//! turns them into one [`FlatRecord`] per row.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::common::null_as_default;

/// One output record: field name to cell value, ordered by field name.
pub type FlatRecord = BTreeMap<String, Value>;

/// A single result cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    List(Vec<Value>),
    Record(BTreeMap<String, Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n),
            serde_json::Value::String(s) => Self::String(s),
            serde_json::Value::Array(items) => {
                Self::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Self::Record(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

/// Role of a column in the result set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldFlag {
    /// Grouping key column.
    Bucket,
    /// Aggregated value column.
    Metric,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Describes one column of a [`ResultSet`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    #[serde(default)]
    pub flag: FieldFlag,
    pub name: String,
    #[serde(rename = "bucketIndex", default)]
    pub bucket_index: i64,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, flag: FieldFlag) -> Self {
        Self {
            flag,
            name: name.into(),
            bucket_index: 0,
        }
    }
}

/// Wire body of `GET /api/v1/jobs/{id}/results`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rows: Vec<Vec<Value>>,
}

impl ResultSet {
    /// Flatten the rows into records keyed by field name.
    pub fn to_records(&self) -> Vec<FlatRecord> {
        crate::projection::project(&self.fields, &self.rows)
    }
}
