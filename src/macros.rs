//! Logging macros for ergonomic message formatting.
//!
//! These macros provide a convenient interface for logging with automatic
//! string formatting, similar to `println!` and `format!`.
//!
//! # Examples
//!
//! ```
//! use fanlog::{info, Logger};
//!
//! let logger = Logger::new();
//!
//! // Basic logging
//! info!(logger, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an arbitrary level with automatic formatting.
///
/// # Examples
///
/// ```
/// # use fanlog::Logger;
/// # let logger = Logger::new();
/// use fanlog::log;
/// log!(logger, "info", "Simple message");
/// log!(logger, "error", "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "error", $($arg)+)
    };
}

/// Log a warn-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "warn", $($arg)+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use fanlog::Logger;
/// # let logger = Logger::new();
/// use fanlog::info;
/// info!(logger, "User {} logged in", 42);
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "info", $($arg)+)
    };
}

/// Log a verbose-level message.
#[macro_export]
macro_rules! verbose {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "verbose", $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "debug", $($arg)+)
    };
}

/// Log a silly-level message.
#[macro_export]
macro_rules! silly {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, "silly", $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::transports::MemoryTransport;
    use crate::Logger;
    use std::sync::Arc;

    #[test]
    fn test_macros_format_and_forward() {
        let sink = Arc::new(MemoryTransport::new());
        let logger = Logger::builder()
            .level("silly")
            .transport(sink.clone())
            .build()
            .unwrap();

        crate::info!(logger, "count = {}", 3);
        crate::error!(logger, "failed: {}", "timeout");
        crate::silly!(logger, "noise");

        let entries = sink.entries();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].message(), "count = 3");
        assert_eq!(entries[0].level(), "info");
        assert_eq!(entries[1].message(), "failed: timeout");
    }
}
