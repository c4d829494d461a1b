//! Record types for the synchronized collection.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Name of the identity field every record must carry.
pub const ID_FIELD: &str = "id";

/// Identifier of a record.
///
/// Remote rows typically use integer keys, but string keys are accepted as well.
/// Unsigned keys above `i64::MAX` get their own variant, so integers still order
/// numerically, and all integers order before strings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    UInt(u64),
    Text(String),
}

impl RecordId {
    /// Extract an identifier from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(RecordId::Int)
                .or_else(|| n.as_u64().map(RecordId::UInt))
                .ok_or_else(|| Error::MalformedRecord(format!("id {} is not an integer", n))),
            Value::String(s) => Ok(RecordId::Text(s.clone())),
            other => Err(Error::MalformedRecord(format!(
                "id must be an integer or string, got {}",
                other
            ))),
        }
    }

    /// Convert back into the JSON representation stored in the record.
    pub fn to_value(&self) -> Value {
        match self {
            RecordId::Int(n) => Value::from(*n),
            RecordId::UInt(n) => Value::from(*n),
            RecordId::Text(s) => Value::from(s.as_str()),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::UInt(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// A single record: a JSON object keyed by its `id` field.
///
/// The full object, `id` included, is kept as-is so that equality and
/// persistence see exactly what the source delivered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct Record {
    id: RecordId,
    fields: Map<String, Value>,
}

impl Record {
    /// Build a record from a JSON object.
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(fields) = value else {
            return Err(Error::MalformedRecord(format!(
                "expected an object, got {}",
                value
            )));
        };
        let id = fields
            .get(ID_FIELD)
            .ok_or_else(|| Error::MalformedRecord("missing id field".into()))
            .and_then(RecordId::from_value)?;

        Ok(Self { id, fields })
    }

    /// The record's identifier.
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// All fields, including `id`.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Render a field as display text. Strings are shown unquoted.
    pub fn display(&self, field: &str) -> String {
        match self.fields.get(field) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

impl TryFrom<Value> for Record {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        Record::from_value(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Value::Object(record.fields)
    }
}
