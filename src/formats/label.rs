//! Label format stage

use crate::core::{Format, LogEntry, Result};

/// Attaches a fixed `label` field to every entry, identifying the emitting
/// component or service.
///
/// # Example
///
/// ```
/// use fanlog::formats::Label;
/// use fanlog::{FormatPipeline, LogEntry};
///
/// let pipeline = FormatPipeline::new().with(Label::new("api-gateway"));
/// let out = pipeline.apply(LogEntry::new("info", "up")).unwrap();
/// assert_eq!(out.field("label").unwrap().to_string(), "api-gateway");
/// ```
pub struct Label {
    label: String,
}

impl Label {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Format for Label {
    fn transform(&self, entry: LogEntry) -> Result<LogEntry> {
        Ok(entry.with_field("label", self.label.as_str()))
    }
}
