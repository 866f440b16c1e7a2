//! Format capability and pipeline composition
//!
//! A format stage is a pure transform from one entry to another. Stages
//! compose left-to-right into a [`FormatPipeline`]; stage `k + 1` sees
//! exactly the value stage `k` returned. The dispatcher applies a pipeline
//! to a fresh clone of the entry per transport, so a failing stage only
//! aborts that transport's copy.

use super::entry::LogEntry;
use super::error::Result;
use std::fmt;
use std::sync::Arc;

/// A pure entry transform. Implemented for plain closures, so ad-hoc stages
/// can be written inline:
///
/// ```
/// use fanlog::{FormatPipeline, LogEntry};
///
/// let pipeline = FormatPipeline::new()
///     .with_fn(|entry| Ok(entry.with_field("app", "api")));
/// let out = pipeline.apply(LogEntry::new("info", "hello")).unwrap();
/// assert!(out.field("app").is_some());
/// ```
pub trait Format: Send + Sync {
    fn transform(&self, entry: LogEntry) -> Result<LogEntry>;
}

impl<F> Format for F
where
    F: Fn(LogEntry) -> Result<LogEntry> + Send + Sync,
{
    fn transform(&self, entry: LogEntry) -> Result<LogEntry> {
        self(entry)
    }
}

/// Ordered sequence of format stages, applied left-to-right.
///
/// Cloning a pipeline is cheap: stages are shared behind `Arc`.
#[derive(Clone, Default)]
pub struct FormatPipeline {
    stages: Vec<Arc<dyn Format>>,
}

impl FormatPipeline {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Append a stage, builder style.
    #[must_use]
    pub fn with<F: Format + 'static>(mut self, stage: F) -> Self {
        self.stages.push(Arc::new(stage));
        self
    }

    /// Append a closure stage. The direct `Fn` bound lets closure return
    /// types infer, which the blanket [`Format`] impl alone cannot do.
    #[must_use]
    pub fn with_fn<F>(self, stage: F) -> Self
    where
        F: Fn(LogEntry) -> Result<LogEntry> + Send + Sync + 'static,
    {
        self.with(stage)
    }

    /// Append an already-shared stage.
    pub fn push(&mut self, stage: Arc<dyn Format>) {
        self.stages.push(stage);
    }

    /// Run the entry through every stage in order. The first failing stage
    /// aborts the application and its error is returned.
    pub fn apply(&self, entry: LogEntry) -> Result<LogEntry> {
        let mut current = entry;
        for stage in &self.stages {
            current = stage.transform(current)?;
        }
        Ok(current)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

impl fmt::Debug for FormatPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatPipeline")
            .field("stages", &self.stages.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = FormatPipeline::new();
        let entry = LogEntry::new("info", "unchanged");
        let out = pipeline.apply(entry.clone()).unwrap();
        assert_eq!(out, entry);
    }

    #[test]
    fn test_stages_compose_left_to_right() {
        let pipeline = FormatPipeline::new()
            .with_fn(|entry| {
                let message = format!("{}!", entry.message());
                Ok(entry.with_message(message))
            })
            .with_fn(|entry| {
                let message = entry.message().to_uppercase();
                Ok(entry.with_message(message))
            });

        let out = pipeline.apply(LogEntry::new("info", "hi")).unwrap();
        assert_eq!(out.message(), "HI!");
    }

    #[test]
    fn test_failing_stage_aborts_application() {
        let pipeline = FormatPipeline::new()
            .with_fn(|_entry| Err(LoggerError::other("stage broke")))
            .with_fn(|entry| Ok(entry.with_field("unreachable", true)));

        let result = pipeline.apply(LogEntry::new("info", "m"));
        assert!(result.is_err());
    }

    #[test]
    fn test_clone_shares_stages() {
        let pipeline = FormatPipeline::new().with_fn(|entry| Ok(entry));
        let cloned = pipeline.clone();
        assert_eq!(cloned.len(), 1);
    }
}
