//! # fanlog
//!
//! A leveled, structured logging engine: one `Logger` filters entries by
//! severity against a pluggable level table, runs them through a composable
//! format pipeline, and fans them out to independently configured transport
//! sinks.
//!
//! ## Features
//!
//! - **Pluggable levels**: npm-style, syslog-style, or custom tables
//! - **Per-transport overrides**: each sink carries its own level, format,
//!   and silent flag
//! - **Error isolation**: a failing or panicking sink never affects the
//!   caller or other sinks
//! - **Async dispatch**: optional bounded queue and worker so logging never
//!   blocks past enqueue, with a full drain on `close()`
//! - **Exception capture**: scoped panic-hook installation logging fatal
//!   errors through the same engine
//! - **Profiling and read-back**: duration-emitting timers plus `query()`
//!   and `stream()` over persisted entries

pub mod core;
pub mod formats;
pub mod macros;
pub mod transports;

pub mod prelude {
    pub use crate::core::{
        ErrorCallback, ExceptionHandler, ExitPolicy, FieldValue, Format, FormatPipeline,
        LevelTable, LogEntry, Logger, LoggerBuilder, LoggerError, LoggerOptions, Profiler,
        QueryOptions, Result, SortOrder, TraceFrame, Transport, DEFAULT_SHUTDOWN_TIMEOUT,
    };
    pub use crate::formats::{Label, TimestampFormat};
    pub use crate::transports::MemoryTransport;

    #[cfg(feature = "console")]
    pub use crate::formats::{ColorMap, Colorize};
    #[cfg(feature = "console")]
    pub use crate::transports::ConsoleTransport;
    #[cfg(feature = "file")]
    pub use crate::transports::FileTransport;
}

pub use crate::core::{
    get_all_info, get_os_info, get_process_info, get_trace, ErrorCallback, ExceptionHandler,
    ExitPolicy, FieldValue, Format, FormatPipeline, LevelTable, LogEntry, Logger, LoggerBuilder,
    LoggerError, LoggerOptions, Profiler, QueryOptions, Result, SortOrder, TraceFrame, Transport,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
