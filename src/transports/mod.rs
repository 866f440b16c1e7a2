//! Transport implementations
//!
//! The engine only requires the [`Transport`](crate::core::Transport)
//! capability; these are the sinks shipped with the crate.

pub mod memory;

#[cfg(feature = "console")]
pub mod console;

#[cfg(feature = "file")]
pub mod file;

pub use memory::MemoryTransport;

#[cfg(feature = "console")]
pub use console::ConsoleTransport;

#[cfg(feature = "file")]
pub use file::FileTransport;

// Re-export the capability trait for convenience
pub use crate::core::Transport;
