//! Concrete format stages
//!
//! The engine treats formats as an external capability (any
//! [`Format`](crate::core::Format) impl, including plain closures). These
//! are the stages shipped with the crate.

pub mod label;
pub mod timestamp;

#[cfg(feature = "console")]
pub mod colorize;

pub use label::Label;
pub use timestamp::TimestampFormat;

#[cfg(feature = "console")]
pub use colorize::{ColorMap, Colorize};
