//! Dispatcher: fan-out of one entry to every eligible transport
//!
//! The logger's owned state lives in an immutable [`Snapshot`] swapped
//! whole on every mutation, so a single dispatch always sees a consistent
//! level table and transport set. Per-transport failures (stage errors,
//! write errors, write panics) are reported and contained.

use super::entry::LogEntry;
use super::error::LoggerError;
use super::exception::ExitPolicy;
use super::format::FormatPipeline;
use super::level::LevelTable;
use super::transport::Transport;
use std::cell::Cell;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

thread_local! {
    // The process panic hook runs before catch_unwind catches; this flag
    // lets an installed exception hook tell a contained transport panic
    // from a genuine fatal error.
    static CONTAINING_PANIC: Cell<bool> = const { Cell::new(false) };
}

/// True while this thread is inside the dispatcher's panic containment.
pub(crate) fn is_containing_panic() -> bool {
    CONTAINING_PANIC.with(|flag| flag.get())
}

/// Callback invoked with every internally reported error.
pub type ErrorCallback = Arc<dyn Fn(&LoggerError) + Send + Sync>;

/// Internal error channel. Logging calls never raise; everything that goes
/// wrong on the hot path lands here instead.
#[derive(Clone)]
pub(crate) struct ErrorReporter {
    callback: Option<ErrorCallback>,
}

impl ErrorReporter {
    pub(crate) fn new(callback: Option<ErrorCallback>) -> Self {
        Self { callback }
    }

    pub(crate) fn report(&self, error: &LoggerError) {
        match &self.callback {
            Some(callback) => callback(error),
            None => eprintln!("[LOGGER ERROR] {}", error),
        }
    }
}

/// One consistent view of the logger's owned state. Mutations clone the
/// current snapshot, edit the clone, and swap it in atomically.
#[derive(Clone)]
pub(crate) struct Snapshot {
    pub(crate) levels: LevelTable,
    pub(crate) level: String,
    pub(crate) format: FormatPipeline,
    pub(crate) transports: Vec<Arc<dyn Transport>>,
    pub(crate) silent: bool,
    pub(crate) exit_on_error: ExitPolicy,
}

/// Extract a printable message from a caught panic payload.
pub(crate) fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Deliver `entry` to every eligible transport in registration order.
///
/// For each transport: skip if silent or if the entry does not pass the
/// transport's effective level; otherwise run the effective format pipeline
/// on a fresh clone of the entry and call `write`. Each transport's failure
/// is reported and delivery continues with the next one.
pub(crate) fn dispatch(snapshot: &Snapshot, entry: &LogEntry, reporter: &ErrorReporter) {
    for transport in &snapshot.transports {
        if transport.silent() {
            continue;
        }

        let effective_level = transport.level().unwrap_or(&snapshot.level);
        if !snapshot.levels.should_log(entry.level(), effective_level) {
            continue;
        }

        let pipeline = transport.format().unwrap_or(&snapshot.format);
        let formatted = match pipeline.apply(entry.clone()) {
            Ok(formatted) => formatted,
            Err(error) => {
                reporter.report(&LoggerError::format_stage(
                    transport.name(),
                    error.to_string(),
                ));
                continue;
            }
        };

        CONTAINING_PANIC.with(|flag| flag.set(true));
        let outcome = catch_unwind(AssertUnwindSafe(|| transport.write(&formatted)));
        CONTAINING_PANIC.with(|flag| flag.set(false));
        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(error)) => {
                reporter.report(&LoggerError::transport_write(
                    transport.name(),
                    error.to_string(),
                ));
            }
            Err(payload) => {
                reporter.report(&LoggerError::transport_panic(
                    transport.name(),
                    panic_message(payload),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Result;
    use parking_lot::Mutex;

    struct Recording {
        name: &'static str,
        level: Option<&'static str>,
        entries: Mutex<Vec<LogEntry>>,
    }

    impl Recording {
        fn new(name: &'static str, level: Option<&'static str>) -> Arc<Self> {
            Arc::new(Self {
                name,
                level,
                entries: Mutex::new(Vec::new()),
            })
        }

        fn count(&self) -> usize {
            self.entries.lock().len()
        }
    }

    impl Transport for Recording {
        fn name(&self) -> &str {
            self.name
        }

        fn level(&self) -> Option<&str> {
            self.level
        }

        fn write(&self, entry: &LogEntry) -> Result<()> {
            self.entries.lock().push(entry.clone());
            Ok(())
        }
    }

    struct Exploding;

    impl Transport for Exploding {
        fn name(&self) -> &str {
            "exploding"
        }

        fn write(&self, _entry: &LogEntry) -> Result<()> {
            panic!("sink blew up");
        }
    }

    fn snapshot(transports: Vec<Arc<dyn Transport>>) -> Snapshot {
        Snapshot {
            levels: LevelTable::npm(),
            level: "info".to_string(),
            format: FormatPipeline::new(),
            transports,
            silent: false,
            exit_on_error: ExitPolicy::Never,
        }
    }

    fn collected_errors() -> (ErrorReporter, Arc<Mutex<Vec<String>>>) {
        let errors = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&errors);
        let reporter = ErrorReporter::new(Some(Arc::new(move |e: &LoggerError| {
            sink.lock().push(e.to_string());
        })));
        (reporter, errors)
    }

    #[test]
    fn test_dispatch_respects_transport_level() {
        let quiet = Recording::new("quiet", Some("error"));
        let chatty = Recording::new("chatty", None);
        let snap = snapshot(vec![quiet.clone(), chatty.clone()]);
        let (reporter, _) = collected_errors();

        dispatch(&snap, &LogEntry::new("info", "hello"), &reporter);

        assert_eq!(quiet.count(), 0);
        assert_eq!(chatty.count(), 1);
    }

    #[test]
    fn test_panicking_transport_is_isolated() {
        let after = Recording::new("after", None);
        let snap = snapshot(vec![Arc::new(Exploding), after.clone()]);
        let (reporter, errors) = collected_errors();

        dispatch(&snap, &LogEntry::new("error", "boom"), &reporter);

        assert_eq!(after.count(), 1);
        let errors = errors.lock();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("panicked"));
    }

    #[test]
    fn test_containment_flag_cleared_after_panicking_write() {
        let snap = snapshot(vec![Arc::new(Exploding)]);
        let (reporter, _) = collected_errors();

        dispatch(&snap, &LogEntry::new("error", "boom"), &reporter);

        assert!(!is_containing_panic());
    }

    #[test]
    fn test_failing_format_override_only_affects_its_transport() {
        struct BadFormat {
            inner: Arc<Recording>,
            pipeline: FormatPipeline,
        }

        impl Transport for BadFormat {
            fn name(&self) -> &str {
                "bad-format"
            }

            fn format(&self) -> Option<&FormatPipeline> {
                Some(&self.pipeline)
            }

            fn write(&self, entry: &LogEntry) -> Result<()> {
                self.inner.write(entry)
            }
        }

        let broken_sink = Recording::new("inner", None);
        let bad = Arc::new(BadFormat {
            inner: broken_sink.clone(),
            pipeline: FormatPipeline::new()
                .with_fn(|_entry| Err(LoggerError::other("bad stage"))),
        });
        let healthy = Recording::new("healthy", None);
        let snap = snapshot(vec![bad, healthy.clone()]);
        let (reporter, errors) = collected_errors();

        dispatch(&snap, &LogEntry::new("info", "m"), &reporter);

        assert_eq!(broken_sink.count(), 0);
        assert_eq!(healthy.count(), 1);
        assert_eq!(errors.lock().len(), 1);
    }
}
