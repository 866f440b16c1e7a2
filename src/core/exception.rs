//! Process-wide fatal error capture
//!
//! [`ExceptionHandler`] converts a panic into a structured entry through
//! its owning logger. Installation is scoped: `handle()` saves the previous
//! process hook, `unhandle()` restores it, and dropping the handler
//! releases the hook too.

use super::dispatch;
use super::entry::{FieldValue, LogEntry};
use super::logger::Logger;
use parking_lot::Mutex;
use std::backtrace::Backtrace;
use std::cell::Cell;
use std::fmt;
use std::panic::{self, PanicHookInfo};
use std::sync::Arc;

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

thread_local! {
    // Re-entry guard: the hook logs through the engine, and that path must
    // never wind back into the hook on the same thread.
    static IN_HOOK: Cell<bool> = const { Cell::new(false) };
}

/// Decides whether the process terminates after a captured fatal error.
///
/// The predicate variant receives the panic's message text; returning true
/// exits the process after the entry has drained.
#[derive(Clone, Default)]
pub enum ExitPolicy {
    #[default]
    Always,
    Never,
    Predicate(Arc<dyn Fn(&str) -> bool + Send + Sync>),
}

impl ExitPolicy {
    pub fn should_exit(&self, message: &str) -> bool {
        match self {
            ExitPolicy::Always => true,
            ExitPolicy::Never => false,
            ExitPolicy::Predicate(predicate) => predicate(message),
        }
    }
}

impl fmt::Debug for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitPolicy::Always => write!(f, "ExitPolicy::Always"),
            ExitPolicy::Never => write!(f, "ExitPolicy::Never"),
            ExitPolicy::Predicate(_) => write!(f, "ExitPolicy::Predicate(..)"),
        }
    }
}

/// A normalized stack frame extracted from a captured backtrace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceFrame {
    pub function: String,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl fmt::Display for TraceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "at {} ({}:{})", self.function, file, line),
            (Some(file), None) => write!(f, "at {} ({})", self.function, file),
            _ => write!(f, "at {}", self.function),
        }
    }
}

/// Parse the text rendering of a [`Backtrace`] into ordered frames.
///
/// Frame headers look like `4: path::to::function` and are optionally
/// followed by an `at file:line:column` location line.
pub fn get_trace(backtrace: &str) -> Vec<TraceFrame> {
    let mut frames = Vec::new();

    for line in backtrace.lines() {
        let trimmed = line.trim();

        if let Some((index, function)) = trimmed.split_once(": ") {
            if !index.is_empty() && index.chars().all(|c| c.is_ascii_digit()) {
                frames.push(TraceFrame {
                    function: function.to_string(),
                    file: None,
                    line: None,
                });
                continue;
            }
        }

        if let Some(location) = trimmed.strip_prefix("at ") {
            if let Some(frame) = frames.last_mut() {
                // location is file:line:column; the column is discarded
                let mut parts = location.rsplitn(3, ':');
                let _column = parts.next();
                let line_number = parts.next().and_then(|s| s.parse().ok());
                match parts.next() {
                    Some(file) => {
                        frame.file = Some(file.to_string());
                        frame.line = line_number;
                    }
                    None => frame.file = Some(location.to_string()),
                }
            }
        }
    }

    frames
}

/// Process identity fields attached to every captured fatal entry.
pub fn get_process_info() -> Vec<(String, FieldValue)> {
    let exe = std::env::current_exe()
        .ok()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let argv: Vec<FieldValue> = std::env::args().map(FieldValue::String).collect();

    vec![
        ("pid".to_string(), FieldValue::Int(std::process::id() as i64)),
        ("exe".to_string(), FieldValue::String(exe)),
        ("argv".to_string(), FieldValue::Array(argv)),
    ]
}

/// Host platform fields attached to every captured fatal entry.
pub fn get_os_info() -> Vec<(String, FieldValue)> {
    vec![
        ("os".to_string(), FieldValue::from(std::env::consts::OS)),
        ("arch".to_string(), FieldValue::from(std::env::consts::ARCH)),
        (
            "family".to_string(),
            FieldValue::from(std::env::consts::FAMILY),
        ),
    ]
}

/// Build the structured entry for a fatal error: the error message, the
/// normalized stack, process info, and OS info. The caller assigns the
/// level (the table's most severe).
pub fn get_all_info(message: &str, trace: &[TraceFrame]) -> LogEntry {
    let stack: Vec<FieldValue> = trace
        .iter()
        .map(|frame| FieldValue::String(frame.to_string()))
        .collect();

    LogEntry::new("error", format!("uncaughtException: {}", message))
        .with_field("error", message)
        .with_field("stack", FieldValue::Array(stack))
        .with_fields(get_process_info())
        .with_fields(get_os_info())
}

fn describe_panic(info: &PanicHookInfo<'_>) -> String {
    let payload = info.payload();
    let message = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    };

    match info.location() {
        Some(location) => format!("{} ({}:{})", message, location.file(), location.line()),
        None => message,
    }
}

/// Subscribes to the process panic hook and routes fatal errors through the
/// owning logger at its most severe level.
pub struct ExceptionHandler {
    logger: Arc<Logger>,
    previous: Arc<Mutex<Option<PanicHook>>>,
}

impl ExceptionHandler {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self {
            logger,
            previous: Arc::new(Mutex::new(None)),
        }
    }

    /// Install the process-wide hook. Idempotent: a second call while
    /// installed is a no-op.
    ///
    /// The hook fires for every panic on the process, including ones the
    /// dispatcher contains; those are transport failures already reported
    /// on the error path, so the hook stands down and defers to the
    /// previously installed hook. For a genuine fatal panic it logs the
    /// structured entry, then consults the logger's [`ExitPolicy`]: on
    /// exit it drains the logger first via `close()` so the fatal entry is
    /// never lost, then terminates with status 1; otherwise control
    /// returns to the panic machinery.
    pub fn handle(&self) {
        let mut previous = self.previous.lock();
        if previous.is_some() {
            return;
        }
        *previous = Some(panic::take_hook());

        let logger = Arc::clone(&self.logger);
        let previous_hook = Arc::clone(&self.previous);
        panic::set_hook(Box::new(move |info| {
            if dispatch::is_containing_panic() {
                if let Some(hook) = previous_hook.lock().as_ref() {
                    hook(info);
                }
                return;
            }
            if IN_HOOK.with(|flag| flag.replace(true)) {
                return;
            }

            let message = describe_panic(info);
            let trace = get_trace(&Backtrace::force_capture().to_string());
            let entry = get_all_info(&message, &trace).with_level(logger.most_severe_level());

            let policy = logger.exit_on_error();
            logger.log_entry(entry);

            if policy.should_exit(&message) {
                logger.close();
                std::process::exit(1);
            }
            IN_HOOK.with(|flag| flag.set(false));
        }));
    }

    /// Restore the previously installed hook. Idempotent and safe to call
    /// when never handled.
    pub fn unhandle(&self) {
        let mut previous = self.previous.lock();
        if let Some(hook) = previous.take() {
            // Discard our hook and put the saved one back.
            let _ = panic::take_hook();
            panic::set_hook(hook);
        }
    }

    pub fn is_handled(&self) -> bool {
        self.previous.lock().is_some()
    }
}

impl Drop for ExceptionHandler {
    fn drop(&mut self) {
        self.unhandle();
    }
}
