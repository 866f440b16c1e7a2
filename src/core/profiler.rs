//! Ad-hoc timing of operations
//!
//! A [`Profiler`] is a short-lived handle from
//! [`Logger::start_timer`](super::logger::Logger::start_timer). Completing
//! it emits one entry carrying the elapsed duration; completing it again is
//! a no-op, keeping the "logging never throws" discipline.

use super::entry::LogEntry;
use super::logger::Logger;
use std::time::{Duration, Instant};

pub struct Profiler<'a> {
    logger: &'a Logger,
    start: Instant,
    done: bool,
}

impl<'a> Profiler<'a> {
    pub(crate) fn new(logger: &'a Logger) -> Self {
        Self {
            logger,
            start: Instant::now(),
            done: false,
        }
    }

    /// Complete the timer at `info`, logging the elapsed duration.
    /// Returns true on the first call, false (and emits nothing) after.
    pub fn done(&mut self, message: impl Into<String>) -> bool {
        self.done_at("info", message)
    }

    /// Complete the timer at an explicit level.
    pub fn done_at(&mut self, level: &str, message: impl Into<String>) -> bool {
        if self.done {
            return false;
        }
        self.done = true;

        let duration_ms = self.start.elapsed().as_millis() as i64;
        self.logger
            .log_entry(LogEntry::new(level, message).with_field("duration_ms", duration_ms));
        true
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Elapsed time since the timer started. Monotonic.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::entry::FieldValue;
    use crate::transports::MemoryTransport;
    use std::sync::Arc;

    #[test]
    fn test_done_emits_once() {
        let sink = Arc::new(MemoryTransport::new());
        let logger = Logger::builder()
            .transport(sink.clone())
            .build()
            .unwrap();

        let mut timer = logger.start_timer();
        assert!(!timer.is_done());

        assert!(timer.done("first"));
        assert!(timer.is_done());
        assert!(!timer.done("second"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message(), "first");
        match entries[0].field("duration_ms") {
            Some(FieldValue::Int(ms)) => assert!(*ms >= 0),
            other => panic!("expected duration_ms, got {:?}", other),
        }
    }

    #[test]
    fn test_done_at_respects_level_filter() {
        let sink = Arc::new(MemoryTransport::new());
        let logger = Logger::builder()
            .level("warn")
            .transport(sink.clone())
            .build()
            .unwrap();

        let mut timer = logger.start_timer();
        // Completion succeeds even though the entry is filtered out
        assert!(timer.done_at("debug", "too verbose"));
        assert_eq!(sink.len(), 0);

        let mut timer = logger.start_timer();
        assert!(timer.done_at("error", "slow operation"));
        assert_eq!(sink.len(), 1);
    }
}
