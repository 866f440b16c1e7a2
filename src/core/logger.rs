//! Logger façade and state machine
//!
//! A `Logger` owns a level table, a default format pipeline, and an ordered
//! set of transports, all held in an immutable snapshot swapped whole on
//! every mutation. Logging is a best-effort, never-raising path; only
//! construction and `configure()` can fail.

use super::dispatch::{self, ErrorCallback, ErrorReporter, Snapshot};
use super::entry::{FieldValue, LogEntry};
use super::error::{LoggerError, Result};
use super::exception::ExitPolicy;
use super::format::FormatPipeline;
use super::level::LevelTable;
use super::profiler::Profiler;
use super::query::{QueryOptions, SortOrder};
use super::transport::Transport;
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Shutdown timeout used when the logger is dropped without an explicit
/// `close()`. `close()` itself honors the configured `close_timeout`.
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

const STATE_ACTIVE: u8 = 0;
const STATE_CLOSING: u8 = 1;
const STATE_CLOSED: u8 = 2;

/// Options accepted by [`Logger::configure`]. Every `Some` option replaces
/// the corresponding owned state; the whole set is applied in one atomic
/// snapshot swap.
#[derive(Default)]
pub struct LoggerOptions {
    pub levels: Option<LevelTable>,
    pub level: Option<String>,
    pub format: Option<FormatPipeline>,
    pub transports: Option<Vec<Arc<dyn Transport>>>,
    pub silent: Option<bool>,
    pub exit_on_error: Option<ExitPolicy>,
}

pub struct Logger {
    shared: Arc<RwLock<Arc<Snapshot>>>,
    state: AtomicU8,
    profilers: Mutex<HashMap<String, Instant>>,
    sender: Mutex<Option<Sender<LogEntry>>>,
    worker: Mutex<Option<thread::JoinHandle<()>>>,
    queue_capacity: usize,
    close_timeout: Option<Duration>,
    reporter: ErrorReporter,
}

macro_rules! leveled_methods {
    ($($name:ident),+ $(,)?) => {
        $(
            /// Convenience method logging at the level of the same name.
            /// If that name is not in the active table the entry is
            /// dropped and reported, like any unknown level.
            pub fn $name(&self, message: impl Into<String>) {
                self.log(stringify!($name), message);
            }
        )+
    };
}

impl Logger {
    /// A synchronous logger with npm levels at `info`, no transports.
    #[must_use]
    pub fn new() -> Self {
        Self::assemble(Snapshot::default_snapshot(), None, None, None)
    }

    /// An asynchronous logger: entries are enqueued on a bounded channel
    /// and fanned out by a worker thread, so `log()` never blocks past
    /// enqueue time. A full queue drops the entry and reports it.
    #[must_use]
    pub fn with_async(buffer_size: usize) -> Self {
        Self::assemble(Snapshot::default_snapshot(), Some(buffer_size), None, None)
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use fanlog::{LevelTable, Logger};
    ///
    /// let logger = Logger::builder()
    ///     .levels(LevelTable::syslog())
    ///     .level("warning")
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    fn assemble(
        snapshot: Snapshot,
        async_buffer: Option<usize>,
        close_timeout: Option<Duration>,
        on_error: Option<ErrorCallback>,
    ) -> Self {
        let reporter = ErrorReporter::new(on_error);
        let shared = Arc::new(RwLock::new(Arc::new(snapshot)));

        let (sender, worker, queue_capacity) = match async_buffer {
            Some(capacity) => {
                let (sender, receiver) = bounded::<LogEntry>(capacity);
                let worker_shared = Arc::clone(&shared);
                let worker_reporter = reporter.clone();

                // One worker drains the queue in order, which is what gives
                // FIFO delivery per sink. `recv` keeps returning buffered
                // entries after the sender is dropped, so close() drains
                // everything that was accepted.
                let handle = thread::spawn(move || {
                    while let Ok(entry) = receiver.recv() {
                        let snapshot = worker_shared.read().clone();
                        dispatch::dispatch(&snapshot, &entry, &worker_reporter);
                    }
                });

                (Some(sender), Some(handle), capacity)
            }
            None => (None, None, 0),
        };

        Self {
            shared,
            state: AtomicU8::new(STATE_ACTIVE),
            profilers: Mutex::new(HashMap::new()),
            sender: Mutex::new(sender),
            worker: Mutex::new(worker),
            queue_capacity,
            close_timeout,
            reporter,
        }
    }

    /// Log one entry. Validation failures and transport errors are reported
    /// on the internal error channel; this call never raises and, in async
    /// mode, never blocks past enqueue.
    pub fn log_entry(&self, entry: LogEntry) {
        if self.state.load(Ordering::Acquire) != STATE_ACTIVE {
            return;
        }

        let snapshot = self.shared.read().clone();
        if snapshot.silent {
            return;
        }
        if !snapshot.levels.contains(entry.level()) {
            self.reporter.report(&LoggerError::invalid_level(entry.level()));
            return;
        }
        if !snapshot.levels.should_log(entry.level(), &snapshot.level) {
            return;
        }

        let sender = self.sender.lock().clone();
        match sender {
            Some(sender) => match sender.try_send(entry) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    self.reporter
                        .report(&LoggerError::queue_full(self.queue_capacity));
                }
                Err(TrySendError::Disconnected(_)) => {
                    // Shutdown raced with this call; the entry was not accepted.
                }
            },
            None => dispatch::dispatch(&snapshot, &entry, &self.reporter),
        }
    }

    pub fn log(&self, level: &str, message: impl Into<String>) {
        self.log_entry(LogEntry::new(level, message));
    }

    /// Log with structured fields attached to the entry.
    pub fn log_with_fields<K, V, I>(&self, level: &str, message: impl Into<String>, fields: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.log_entry(LogEntry::new(level, message).with_fields(fields));
    }

    // npm set
    leveled_methods!(error, warn, info, http, verbose, debug, silly);
    // syslog set ("error", "info", "debug" shared with npm above)
    leveled_methods!(emerg, alert, crit, warning, notice);
    // cli extras
    leveled_methods!(help, data, prompt, input);

    /// Append a transport. Re-adding a handle already registered (by `Arc`
    /// identity) is a no-op.
    pub fn add(&self, transport: Arc<dyn Transport>) -> &Self {
        let mut guard = self.shared.write();
        if guard
            .transports
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &transport))
        {
            return self;
        }
        let mut next = (**guard).clone();
        next.transports.push(transport);
        *guard = Arc::new(next);
        self
    }

    /// Detach a transport by identity. Pending writes for it are not
    /// flushed; call `close()` first for a flush guarantee.
    pub fn remove(&self, transport: &Arc<dyn Transport>) -> &Self {
        let mut guard = self.shared.write();
        if !guard
            .transports
            .iter()
            .any(|existing| Arc::ptr_eq(existing, transport))
        {
            return self;
        }
        let mut next = (**guard).clone();
        next.transports
            .retain(|existing| !Arc::ptr_eq(existing, transport));
        *guard = Arc::new(next);
        self
    }

    /// Detach every transport.
    pub fn clear(&self) -> &Self {
        let mut guard = self.shared.write();
        let mut next = (**guard).clone();
        next.transports.clear();
        *guard = Arc::new(next);
        self
    }

    /// Replace owned state atomically. Only valid while active.
    ///
    /// A concurrent `log()` observes either fully the old or fully the new
    /// state, never a mixture.
    pub fn configure(&self, options: LoggerOptions) -> Result<()> {
        if self.state.load(Ordering::Acquire) != STATE_ACTIVE {
            return Err(LoggerError::LoggerClosed);
        }

        let mut guard = self.shared.write();
        let mut next = (**guard).clone();

        if let Some(levels) = options.levels {
            next.levels = levels;
        }
        if let Some(level) = options.level {
            next.level = level;
        }
        if let Some(format) = options.format {
            next.format = format;
        }
        if let Some(transports) = options.transports {
            next.transports = dedupe_transports(transports);
        }
        if let Some(silent) = options.silent {
            next.silent = silent;
        }
        if let Some(exit_on_error) = options.exit_on_error {
            next.exit_on_error = exit_on_error;
        }

        *guard = Arc::new(next);
        Ok(())
    }

    /// Stop accepting entries, drain in-flight writes, and flush every
    /// transport. With no configured `close_timeout` the drain wait is
    /// unbounded; no accepted entry is ever discarded by `close()` itself.
    /// Idempotent; after it returns, further `log()` calls are dropped.
    pub fn close(&self) {
        self.close_with(self.close_timeout);
    }

    fn close_with(&self, timeout: Option<Duration>) {
        if self
            .state
            .compare_exchange(
                STATE_ACTIVE,
                STATE_CLOSING,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return;
        }

        // Dropping the sender closes the channel; the worker keeps receiving
        // buffered entries until it is empty, then exits.
        drop(self.sender.lock().take());

        if let Some(handle) = self.worker.lock().take() {
            let drained = match timeout {
                None => true,
                Some(timeout) => {
                    let start = Instant::now();
                    loop {
                        if handle.is_finished() {
                            break true;
                        }
                        if start.elapsed() >= timeout {
                            break false;
                        }
                        thread::sleep(Duration::from_millis(10));
                    }
                }
            };

            if drained {
                if handle.join().is_err() {
                    self.reporter
                        .report(&LoggerError::other("async worker panicked during drain"));
                }
            } else {
                self.reporter.report(&LoggerError::other(
                    "close timed out before the async worker drained",
                ));
            }
        }

        let snapshot = self.shared.read().clone();
        for transport in &snapshot.transports {
            if let Err(error) = transport.flush() {
                self.reporter.report(&LoggerError::transport_write(
                    transport.name(),
                    error.to_string(),
                ));
            }
        }

        self.state.store(STATE_CLOSED, Ordering::Release);
    }

    /// Fan a query out to every query-capable transport and merge the
    /// results: stable sort on timestamp (ties keep transport registration
    /// order), then `start`/`limit` pagination and field projection.
    ///
    /// A transport whose query fails is reported and skipped, mirroring
    /// write isolation.
    pub fn query(&self, options: &QueryOptions) -> Result<Vec<LogEntry>> {
        let snapshot = self.shared.read().clone();
        let queryable: Vec<_> = snapshot
            .transports
            .iter()
            .filter(|t| t.supports_query())
            .collect();
        if queryable.is_empty() {
            return Err(LoggerError::NotQueryable);
        }

        let mut merged = Vec::new();
        for transport in queryable {
            match transport.query(options) {
                Ok(rows) => merged.extend(rows),
                Err(error) => self.reporter.report(&LoggerError::transport_write(
                    transport.name(),
                    format!("query failed: {}", error),
                )),
            }
        }

        merged.retain(|entry| options.in_range(entry.timestamp()));
        match options.order {
            SortOrder::Asc => merged.sort_by(|a, b| a.timestamp().cmp(&b.timestamp())),
            SortOrder::Desc => merged.sort_by(|a, b| b.timestamp().cmp(&a.timestamp())),
        }

        let mut results: Vec<LogEntry> = merged
            .into_iter()
            .skip(options.start)
            .take(options.limit.unwrap_or(usize::MAX))
            .collect();

        if let Some(fields) = &options.fields {
            for entry in &mut results {
                entry.retain_fields(fields);
            }
        }

        Ok(results)
    }

    /// Lazy sequence of persisted entries from every stream-capable
    /// transport, chained in registration order. Not restartable.
    pub fn stream(&self) -> Result<Box<dyn Iterator<Item = LogEntry> + Send>> {
        let snapshot = self.shared.read().clone();
        let mut streams = Vec::new();
        for transport in &snapshot.transports {
            if let Some(stream) = transport.stream_entries() {
                streams.push(stream);
            }
        }
        if streams.is_empty() {
            return Err(LoggerError::NotStreamable);
        }
        Ok(Box::new(streams.into_iter().flatten()))
    }

    /// Start a one-shot timer that logs its elapsed duration when completed.
    pub fn start_timer(&self) -> Profiler<'_> {
        Profiler::new(self)
    }

    /// Keyed timer: the first call with `id` arms a timer, the second
    /// completes it and logs the elapsed span at `info` with a
    /// `duration_ms` field. Completing an id that was never armed just
    /// arms it; nothing on this path can fail.
    pub fn profile(&self, id: impl Into<String>) {
        let id = id.into();
        let started = {
            let mut profilers = self.profilers.lock();
            match profilers.remove(&id) {
                Some(start) => Some(start),
                None => {
                    profilers.insert(id.clone(), Instant::now());
                    None
                }
            }
        };

        if let Some(start) = started {
            let duration_ms = start.elapsed().as_millis() as i64;
            self.log_entry(LogEntry::new("info", id).with_field("duration_ms", duration_ms));
        }
    }

    /// The active level name.
    pub fn level(&self) -> String {
        self.shared.read().level.clone()
    }

    /// A clone of the active level table.
    pub fn levels(&self) -> LevelTable {
        self.shared.read().levels.clone()
    }

    pub fn is_silent(&self) -> bool {
        self.shared.read().silent
    }

    pub fn transport_count(&self) -> usize {
        self.shared.read().transports.len()
    }

    pub fn is_closed(&self) -> bool {
        self.state.load(Ordering::Acquire) == STATE_CLOSED
    }

    /// Most severe level in the active table; the exception handler logs
    /// fatal errors at this level.
    pub fn most_severe_level(&self) -> String {
        self.shared.read().levels.most_severe().to_string()
    }

    /// The active exit policy consulted after a captured fatal error.
    pub fn exit_on_error(&self) -> ExitPolicy {
        self.shared.read().exit_on_error.clone()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        // Bound the wait here even when close_timeout is unbounded: a Drop
        // must not hang the process.
        self.close_with(Some(self.close_timeout.unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT)));
    }
}

impl Snapshot {
    fn default_snapshot() -> Self {
        Self {
            levels: LevelTable::npm(),
            level: "info".to_string(),
            format: FormatPipeline::new(),
            transports: Vec::new(),
            silent: false,
            exit_on_error: ExitPolicy::default(),
        }
    }
}

fn dedupe_transports(transports: Vec<Arc<dyn Transport>>) -> Vec<Arc<dyn Transport>> {
    let mut deduped: Vec<Arc<dyn Transport>> = Vec::new();
    for transport in transports {
        if !deduped
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &transport))
        {
            deduped.push(transport);
        }
    }
    deduped
}

/// Builder for constructing a Logger with a fluent API
///
/// # Example
/// ```
/// use fanlog::{LevelTable, Logger};
/// use fanlog::transports::MemoryTransport;
/// use std::sync::Arc;
///
/// let sink = Arc::new(MemoryTransport::new());
/// let logger = Logger::builder()
///     .levels(LevelTable::npm())
///     .level("debug")
///     .transport(sink.clone())
///     .async_mode(1000)
///     .build()
///     .unwrap();
/// ```
pub struct LoggerBuilder {
    levels: LevelTable,
    level: String,
    format: FormatPipeline,
    transports: Vec<Arc<dyn Transport>>,
    silent: bool,
    exit_on_error: ExitPolicy,
    async_buffer: Option<usize>,
    close_timeout: Option<Duration>,
    on_error: Option<ErrorCallback>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            levels: LevelTable::npm(),
            level: "info".to_string(),
            format: FormatPipeline::new(),
            transports: Vec::new(),
            silent: false,
            exit_on_error: ExitPolicy::default(),
            async_buffer: None,
            close_timeout: None,
            on_error: None,
        }
    }

    /// Replace the level table. Defaults to the npm set.
    #[must_use = "builder methods return a new value"]
    pub fn levels(mut self, levels: LevelTable) -> Self {
        self.levels = levels;
        self
    }

    /// Set the active level. Defaults to `"info"`. A name outside the
    /// table is permitted but makes filtering fail closed.
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the default format pipeline.
    #[must_use = "builder methods return a new value"]
    pub fn format(mut self, format: FormatPipeline) -> Self {
        self.format = format;
        self
    }

    /// Register a transport. Duplicate handles are collapsed at build.
    #[must_use = "builder methods return a new value"]
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transports.push(transport);
        self
    }

    /// Suppress all output without detaching transports.
    #[must_use = "builder methods return a new value"]
    pub fn silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    /// Policy applied after the exception handler captures a fatal error.
    #[must_use = "builder methods return a new value"]
    pub fn exit_on_error(mut self, policy: ExitPolicy) -> Self {
        self.exit_on_error = policy;
        self
    }

    /// Enable async dispatch with the given queue capacity.
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, buffer_size: usize) -> Self {
        self.async_buffer = Some(buffer_size);
        self
    }

    /// Bound the drain wait in `close()`. Unbounded when unset.
    #[must_use = "builder methods return a new value"]
    pub fn close_timeout(mut self, timeout: Duration) -> Self {
        self.close_timeout = Some(timeout);
        self
    }

    /// Receive every internally reported error (dropped entries, transport
    /// failures). Defaults to stderr.
    #[must_use = "builder methods return a new value"]
    pub fn on_error(mut self, callback: ErrorCallback) -> Self {
        self.on_error = Some(callback);
        self
    }

    /// Build the Logger
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` for structurally invalid options;
    /// this is the one path that fails loudly, since it runs outside the
    /// logging hot path.
    pub fn build(self) -> Result<Logger> {
        if self.async_buffer == Some(0) {
            return Err(LoggerError::config(
                "Logger",
                "async queue capacity must be non-zero",
            ));
        }

        let snapshot = Snapshot {
            levels: self.levels,
            level: self.level,
            format: self.format,
            transports: dedupe_transports(self.transports),
            silent: self.silent,
            exit_on_error: self.exit_on_error,
        };

        Ok(Logger::assemble(
            snapshot,
            self.async_buffer,
            self.close_timeout,
            self.on_error,
        ))
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transports::MemoryTransport;

    fn memory() -> Arc<MemoryTransport> {
        Arc::new(MemoryTransport::new())
    }

    #[test]
    fn test_level_round_trip() {
        let sink = memory();
        let logger = Logger::builder()
            .levels(LevelTable::new([("error", 0), ("warn", 1), ("info", 2)]).unwrap())
            .level("warn")
            .transport(sink.clone())
            .build()
            .unwrap();

        logger.log("info", "filtered out");
        logger.log("warn", "delivered");
        logger.log("error", "delivered");

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level(), "warn");
        assert_eq!(entries[1].level(), "error");
    }

    #[test]
    fn test_unknown_level_dropped_and_reported() {
        let sink = memory();
        let reported = Arc::new(Mutex::new(Vec::new()));
        let reported_clone = Arc::clone(&reported);

        let logger = Logger::builder()
            .transport(sink.clone())
            .on_error(Arc::new(move |e: &LoggerError| {
                reported_clone.lock().push(e.to_string());
            }))
            .build()
            .unwrap();

        logger.log("loud", "never delivered");

        assert_eq!(sink.len(), 0);
        let reported = reported.lock();
        assert_eq!(reported.len(), 1);
        assert!(reported[0].contains("unknown level 'loud'"));
    }

    #[test]
    fn test_silent_suppresses_without_detaching() {
        let sink = memory();
        let logger = Logger::builder()
            .transport(sink.clone())
            .silent(true)
            .build()
            .unwrap();

        logger.info("suppressed");
        assert_eq!(sink.len(), 0);
        assert_eq!(logger.transport_count(), 1);
    }

    #[test]
    fn test_add_is_identity_deduplicated() {
        let sink = memory();
        let logger = Logger::new();
        let handle: Arc<dyn Transport> = sink.clone();

        logger.add(handle.clone()).add(handle.clone());
        assert_eq!(logger.transport_count(), 1);

        logger.info("once");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let first = memory();
        let second = memory();
        let logger = Logger::new();
        let first_handle: Arc<dyn Transport> = first.clone();
        logger.add(first_handle.clone());
        logger.add(second.clone());

        logger.remove(&first_handle);
        assert_eq!(logger.transport_count(), 1);

        logger.info("only second");
        assert_eq!(first.len(), 0);
        assert_eq!(second.len(), 1);

        logger.clear();
        assert_eq!(logger.transport_count(), 0);
    }

    #[test]
    fn test_configure_replaces_state() {
        let sink = memory();
        let logger = Logger::builder().transport(sink.clone()).build().unwrap();

        logger
            .configure(LoggerOptions {
                levels: Some(LevelTable::syslog()),
                level: Some("crit".to_string()),
                ..LoggerOptions::default()
            })
            .unwrap();

        logger.log("info", "filtered under crit");
        logger.log("emerg", "delivered");

        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level(), "emerg");
        assert_eq!(logger.level(), "crit");
    }

    #[test]
    fn test_close_is_terminal_and_idempotent() {
        let sink = memory();
        let logger = Logger::builder().transport(sink.clone()).build().unwrap();

        logger.info("before close");
        logger.close();
        logger.close();
        logger.info("after close");

        assert!(logger.is_closed());
        assert_eq!(sink.len(), 1);
        assert!(matches!(
            logger.configure(LoggerOptions::default()),
            Err(LoggerError::LoggerClosed)
        ));
    }

    #[test]
    fn test_async_mode_delivers_in_order() {
        let sink = memory();
        let logger = Logger::builder()
            .transport(sink.clone())
            .async_mode(256)
            .build()
            .unwrap();

        for i in 0..50 {
            logger.info(format!("message {}", i));
        }
        logger.close();

        let entries = sink.entries();
        assert_eq!(entries.len(), 50);
        for (i, entry) in entries.iter().enumerate() {
            assert_eq!(entry.message(), format!("message {}", i));
        }
    }

    #[test]
    fn test_zero_async_buffer_rejected() {
        let result = Logger::builder().async_mode(0).build();
        assert!(matches!(
            result,
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_profile_pairs_calls() {
        let sink = memory();
        let logger = Logger::builder().transport(sink.clone()).build().unwrap();

        logger.profile("db-query");
        assert_eq!(sink.len(), 0);

        logger.profile("db-query");
        let entries = sink.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message(), "db-query");
        match entries[0].field("duration_ms") {
            Some(FieldValue::Int(ms)) => assert!(*ms >= 0),
            other => panic!("expected duration_ms field, got {:?}", other),
        }

        // Third call arms a fresh timer, emits nothing
        logger.profile("db-query");
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_leveled_methods_forward() {
        let sink = memory();
        let logger = Logger::builder()
            .level("silly")
            .transport(sink.clone())
            .build()
            .unwrap();

        logger.error("e");
        logger.warn("w");
        logger.verbose("v");
        logger.silly("s");

        assert_eq!(sink.len(), 4);
    }

    #[test]
    fn test_query_without_capable_transport() {
        let logger = Logger::new();
        assert!(matches!(
            logger.query(&QueryOptions::new()),
            Err(LoggerError::NotQueryable)
        ));
    }

    #[test]
    fn test_query_merges_and_paginates() {
        let first = memory();
        let second = memory();
        let logger = Logger::builder()
            .transport(first.clone())
            .transport(second.clone())
            .build()
            .unwrap();

        for i in 0..3 {
            logger.info(format!("entry {}", i));
        }

        let results = logger
            .query(&QueryOptions::new().order(SortOrder::Asc))
            .unwrap();
        // Both transports recorded every entry
        assert_eq!(results.len(), 6);

        let limited = logger
            .query(&QueryOptions::new().order(SortOrder::Asc).start(1).limit(2))
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_stream_without_capable_transport() {
        let logger = Logger::new();
        assert!(matches!(logger.stream(), Err(LoggerError::NotStreamable)));
    }

    #[test]
    fn test_stream_chains_transports() {
        let sink = memory();
        let logger = Logger::builder().transport(sink.clone()).build().unwrap();

        logger.info("a");
        logger.info("b");

        let streamed: Vec<_> = logger.stream().unwrap().collect();
        assert_eq!(streamed.len(), 2);
        assert_eq!(streamed[0].message(), "a");
    }
}
