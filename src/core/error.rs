//! Error types for the logging engine

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Entry referenced a level that is not in the active level table
    #[error("unknown level '{level}': entry dropped")]
    InvalidLevel { level: String },

    /// A transport's write failed; delivery to other transports is unaffected
    #[error("transport '{transport}' write failed: {message}")]
    TransportWrite { transport: String, message: String },

    /// A transport panicked during write; the panic was contained
    #[error("transport '{transport}' panicked during write: {message}")]
    TransportPanic { transport: String, message: String },

    /// A format stage failed while rendering an entry for one transport
    #[error("format stage failed for transport '{transport}': {message}")]
    FormatStage { transport: String, message: String },

    /// Invalid configuration with details
    #[error("invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// Async dispatch queue is full; the entry was dropped
    #[error("log queue full ({capacity} entries buffered): entry dropped")]
    QueueFull { capacity: usize },

    /// Operation requires an active logger
    #[error("logger is closed")]
    LoggerClosed,

    /// `query()` called with no query-capable transport registered
    #[error("no registered transport supports query")]
    NotQueryable,

    /// `stream()` called with no stream-capable transport registered
    #[error("no registered transport supports streaming")]
    NotStreamable,

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl LoggerError {
    /// Create an invalid level error
    pub fn invalid_level(level: impl Into<String>) -> Self {
        LoggerError::InvalidLevel {
            level: level.into(),
        }
    }

    /// Create a transport write error
    pub fn transport_write(transport: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportWrite {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create a transport panic error
    pub fn transport_panic(transport: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::TransportPanic {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create a format stage error
    pub fn format_stage(transport: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatStage {
            transport: transport.into(),
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a queue full error
    pub fn queue_full(capacity: usize) -> Self {
        LoggerError::QueueFull { capacity }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        LoggerError::Other(msg.into())
    }
}
