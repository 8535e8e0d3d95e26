//! Log record structure

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Canonical log record: an ordered mapping of field names to values.
///
/// Always holds `level` and `timestamp`. `message` is absent rather than
/// empty when a call produced no text, and `stack` is present only when an
/// error was supplied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogRecord {
    fields: Map<String, Value>,
}

impl LogRecord {
    pub fn from_map(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn level(&self) -> &str {
        self.str_field("level").unwrap_or_default()
    }

    pub fn timestamp(&self) -> &str {
        self.str_field("timestamp").unwrap_or_default()
    }

    pub fn message(&self) -> Option<&str> {
        self.str_field("message")
    }

    /// Raw `stack` value.
    ///
    /// Left untyped because caller fields may put any value under `stack`;
    /// pretty output prints text as-is and inspects anything else. Use
    /// [`stack_str`](Self::stack_str) for the common text case.
    pub fn stack(&self) -> Option<&Value> {
        self.fields.get("stack")
    }

    /// `stack` when it holds text
    pub fn stack_str(&self) -> Option<&str> {
        self.str_field("stack")
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for LogRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::from_map(fields)
    }
}
