//! Logging macros for ergonomic log message formatting.
//!
//! The leveled macros take any logger-like expression with a
//! `log(LogLevel, message)` method: an [`AppLogger`](crate::AppLogger) or a
//! [`LogSource`](crate::LogSource).
//!
//! ```
//! use laplace_logger::prelude::*;
//! use laplace_logger::info;
//! use std::sync::Arc;
//!
//! let logger = Arc::new(Logger::new());
//! let source = logger.source("worker");
//!
//! let port = 8080;
//! info!(source, "Server listening on port {}", port);
//! ```
//!
//! The print macros write through the captured streams of the published
//! logger, so plain program output lands in the log as well. Before
//! initialization they behave like `print!` and `eprint!`.

/// Log a message with automatic formatting.
///
/// ```
/// # use laplace_logger::prelude::*;
/// # let source = std::sync::Arc::new(Logger::new()).source("app");
/// use laplace_logger::log;
/// log!(source, LogLevel::Info, "Simple message");
/// log!(source, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// `print!` through the captured stdout.
#[macro_export]
macro_rules! log_print {
    ($($arg:tt)*) => {
        match $crate::stdout() {
            Ok(mut out) => {
                let _ = ::std::io::Write::write_fmt(&mut out, format_args!($($arg)*));
            }
            Err(_) => ::std::print!($($arg)*),
        }
    };
}

/// `println!` through the captured stdout.
///
/// ```
/// use laplace_logger::log_println;
/// // Not initialized here, so this is a plain println!
/// log_println!("{} items", 3);
/// ```
#[macro_export]
macro_rules! log_println {
    () => {
        $crate::log_print!("\n")
    };
    ($($arg:tt)*) => {
        match $crate::stdout() {
            Ok(mut out) => {
                let _ = ::std::io::Write::write_fmt(
                    &mut out,
                    format_args!("{}\n", format_args!($($arg)*)),
                );
            }
            Err(_) => ::std::println!($($arg)*),
        }
    };
}

/// `eprint!` through the captured stderr.
#[macro_export]
macro_rules! log_eprint {
    ($($arg:tt)*) => {
        match $crate::stderr() {
            Ok(mut err) => {
                let _ = ::std::io::Write::write_fmt(&mut err, format_args!($($arg)*));
            }
            Err(_) => ::std::eprint!($($arg)*),
        }
    };
}

/// `eprintln!` through the captured stderr.
#[macro_export]
macro_rules! log_eprintln {
    () => {
        $crate::log_eprint!("\n")
    };
    ($($arg:tt)*) => {
        match $crate::stderr() {
            Ok(mut err) => {
                let _ = ::std::io::Write::write_fmt(
                    &mut err,
                    format_args!("{}\n", format_args!($($arg)*)),
                );
            }
            Err(_) => ::std::eprintln!($($arg)*),
        }
    };
}
