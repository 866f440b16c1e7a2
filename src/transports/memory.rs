//! In-memory transport
//!
//! Keeps entries in a bounded buffer. Useful for tests, embedding, and as
//! a query/stream-capable sink without touching the filesystem.

use crate::core::{FormatPipeline, LogEntry, QueryOptions, Result, Transport};
use parking_lot::Mutex;

pub struct MemoryTransport {
    entries: Mutex<Vec<LogEntry>>,
    capacity: Option<usize>,
    level: Option<String>,
    format: Option<FormatPipeline>,
    silent: bool,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            capacity: None,
            level: None,
            format: None,
            silent: false,
        }
    }

    /// Bound the buffer; the oldest entries are evicted past `capacity`.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set a per-transport minimum level override.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    /// Set a per-transport format pipeline override.
    #[must_use]
    pub fn with_format(mut self, format: FormatPipeline) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Snapshot of the recorded entries, oldest first.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for MemoryTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for MemoryTransport {
    fn name(&self) -> &str {
        "memory"
    }

    fn write(&self, entry: &LogEntry) -> Result<()> {
        let mut entries = self.entries.lock();
        entries.push(entry.clone());
        if let Some(capacity) = self.capacity {
            let excess = entries.len().saturating_sub(capacity);
            if excess > 0 {
                entries.drain(..excess);
            }
        }
        Ok(())
    }

    fn level(&self) -> Option<&str> {
        self.level.as_deref()
    }

    fn format(&self) -> Option<&FormatPipeline> {
        self.format.as_ref()
    }

    fn silent(&self) -> bool {
        self.silent
    }

    fn supports_query(&self) -> bool {
        true
    }

    fn query(&self, options: &QueryOptions) -> Result<Vec<LogEntry>> {
        Ok(self
            .entries
            .lock()
            .iter()
            .filter(|entry| options.in_range(entry.timestamp()))
            .cloned()
            .collect())
    }

    /// Streams a snapshot of the buffer taken at call time; entries written
    /// afterwards are not included.
    fn stream_entries(&self) -> Option<Box<dyn Iterator<Item = LogEntry> + Send>> {
        let snapshot = self.entries.lock().clone();
        Some(Box::new(snapshot.into_iter()))
    }
}
