//! Log entry structure and field values

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Value type for structured entry fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
    Array(Vec<FieldValue>),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
            FieldValue::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<V: Into<FieldValue>> From<Vec<V>> for FieldValue {
    fn from(items: Vec<V>) -> Self {
        FieldValue::Array(items.into_iter().map(Into::into).collect())
    }
}

/// A single log record.
///
/// Entries are immutable once handed to the dispatcher: format stages and
/// callers extend an entry with the consuming `with_*` builders, each of
/// which produces a new value. Two transports with different format
/// overrides therefore never observe each other's changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    level: String,
    message: String,
    timestamp: DateTime<Utc>,
    #[serde(flatten)]
    fields: BTreeMap<String, FieldValue>,
}

impl LogEntry {
    /// Sanitize the message to prevent log injection: embedded newlines,
    /// carriage returns, and tabs are escaped so one call can never forge
    /// additional records in a line-oriented sink.
    fn sanitize_message(message: &str) -> String {
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    pub fn new(level: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: level.into(),
            message: Self::sanitize_message(&message.into()),
            timestamp: Utc::now(),
            fields: BTreeMap::new(),
        }
    }

    pub fn level(&self) -> &str {
        &self.level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Replace the level, producing a new entry.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Replace the message, producing a new entry.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Self::sanitize_message(&message.into());
        self
    }

    /// Override the capture timestamp. Mostly useful in tests and when
    /// replaying persisted entries.
    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Attach a named field, producing a new entry.
    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Attach many named fields at once.
    #[must_use]
    pub fn with_fields<K, V, I>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        for (key, value) in fields {
            self.fields.insert(key.into(), value.into());
        }
        self
    }

    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Keep only the named fields; used by query field projection.
    pub(crate) fn retain_fields(&mut self, keep: &[String]) {
        self.fields.retain(|k, _| keep.iter().any(|f| f == k));
    }

    /// Render fields as `key=value` pairs in key order.
    pub fn format_fields(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialize to a JSON value. Fields are flattened alongside `level`,
    /// `message`, and `timestamp`.
    pub fn to_json(&self) -> serde_json::Value {
        // Serialization of this shape cannot fail: every field type maps to JSON.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_basics() {
        let entry = LogEntry::new("info", "server started");
        assert_eq!(entry.level(), "info");
        assert_eq!(entry.message(), "server started");
        assert_eq!(entry.field_count(), 0);
    }

    #[test]
    fn test_message_sanitized() {
        let entry = LogEntry::new("info", "line one\nERROR forged\tentry");
        assert_eq!(entry.message(), "line one\\nERROR forged\\tentry");
    }

    #[test]
    fn test_builders_produce_new_entries() {
        let base = LogEntry::new("info", "request");
        let derived = base.clone().with_field("status", 200).with_level("http");

        assert_eq!(base.field_count(), 0);
        assert_eq!(base.level(), "info");
        assert_eq!(derived.level(), "http");
        assert_eq!(derived.field("status"), Some(&FieldValue::Int(200)));
    }

    #[test]
    fn test_format_fields() {
        let entry = LogEntry::new("info", "m")
            .with_field("user", "alice")
            .with_field("attempts", 3);
        let rendered = entry.format_fields();
        assert!(rendered.contains("user=alice"));
        assert!(rendered.contains("attempts=3"));
    }

    #[test]
    fn test_json_roundtrip() {
        let entry = LogEntry::new("warn", "low disk")
            .with_field("free_mb", 42)
            .with_field("mount", "/var")
            .with_field("readonly", false);

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: LogEntry = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, entry);
        assert_eq!(parsed.field("free_mb"), Some(&FieldValue::Int(42)));
    }

    #[test]
    fn test_retain_fields() {
        let mut entry = LogEntry::new("info", "m")
            .with_field("keep", 1)
            .with_field("drop", 2);
        entry.retain_fields(&["keep".to_string()]);
        assert!(entry.field("keep").is_some());
        assert!(entry.field("drop").is_none());
    }

    #[test]
    fn test_array_field_display() {
        let value = FieldValue::from(vec!["a", "b"]);
        assert_eq!(value.to_string(), "[a,b]");
    }
}
