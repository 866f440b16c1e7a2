//! Transport capability: an independent output sink for log entries

use super::entry::LogEntry;
use super::error::{LoggerError, Result};
use super::format::FormatPipeline;
use super::query::QueryOptions;

/// An output sink with its own optional level, format, and silent overrides.
///
/// `write` takes `&self`: transports are shared behind `Arc` across the
/// dispatcher and the async worker, so sinks with mutable state (buffered
/// writers, ring buffers) use interior mutability.
///
/// Registration identity is `Arc` pointer identity; re-adding the same
/// handle to a logger is a no-op, never a duplicate dispatch target.
pub trait Transport: Send + Sync {
    fn name(&self) -> &str;

    /// Deliver one formatted entry. Errors are isolated by the dispatcher:
    /// they are reported on the logger's error path and never reach the
    /// logging caller or other transports.
    fn write(&self, entry: &LogEntry) -> Result<()>;

    /// Minimum level override; `None` defers to the logger's active level.
    fn level(&self) -> Option<&str> {
        None
    }

    /// Format pipeline override; `None` defers to the logger's default
    /// pipeline.
    fn format(&self) -> Option<&FormatPipeline> {
        None
    }

    /// When true, the dispatcher skips this transport entirely.
    fn silent(&self) -> bool {
        false
    }

    /// Flush any buffered entries. Called by `Logger::close()` after drain.
    fn flush(&self) -> Result<()> {
        Ok(())
    }

    /// Whether this transport can answer [`query`](Transport::query).
    fn supports_query(&self) -> bool {
        false
    }

    /// Read back persisted entries matching the time bounds in `options`.
    /// Transports that do not persist entries keep the default.
    fn query(&self, _options: &QueryOptions) -> Result<Vec<LogEntry>> {
        Err(LoggerError::NotQueryable)
    }

    /// Lazy sequence of persisted entries, oldest first. `None` when the
    /// transport cannot stream. The sequence is not restartable.
    fn stream_entries(&self) -> Option<Box<dyn Iterator<Item = LogEntry> + Send>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Minimal;

    impl Transport for Minimal {
        fn name(&self) -> &str {
            "minimal"
        }

        fn write(&self, _entry: &LogEntry) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_default_capabilities() {
        let t = Minimal;
        assert_eq!(t.level(), None);
        assert!(t.format().is_none());
        assert!(!t.silent());
        assert!(!t.supports_query());
        assert!(t.query(&QueryOptions::new()).is_err());
        assert!(t.stream_entries().is_none());
        assert!(t.flush().is_ok());
    }
}
