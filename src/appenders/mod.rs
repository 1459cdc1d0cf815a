//! Appender implementations

pub mod console;
pub mod dual;
pub mod file;

pub use console::ConsoleAppender;
pub use dual::configure_dual_sinks;
pub use file::FileAppender;

// Re-export traits for backward compatibility
pub use crate::core::Appender;
