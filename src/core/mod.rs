//! Core engine: levels, entries, format pipelines, dispatch, and the
//! logger façade

pub mod dispatch;
pub mod entry;
pub mod error;
pub mod exception;
pub mod format;
pub mod level;
pub mod logger;
pub mod profiler;
pub mod query;
pub mod transport;

pub use dispatch::ErrorCallback;
pub use entry::{FieldValue, LogEntry};
pub use error::{LoggerError, Result};
pub use exception::{
    get_all_info, get_os_info, get_process_info, get_trace, ExceptionHandler, ExitPolicy,
    TraceFrame,
};
pub use format::{Format, FormatPipeline};
pub use level::LevelTable;
pub use logger::{Logger, LoggerBuilder, LoggerOptions, DEFAULT_SHUTDOWN_TIMEOUT};
pub use profiler::Profiler;
pub use query::{QueryOptions, SortOrder};
pub use transport::Transport;
