//! File + console sink pair
//!
//! Both sinks hang off the shared logger rather than a named source, so
//! records from every source (including captured stdout/stderr, tagged with
//! [`SHARED_SOURCE`](crate::core::SHARED_SOURCE)) are visible to both.

use super::{ConsoleAppender, FileAppender};
use crate::core::{LogLevel, Logger, Result, TimestampFormat};
use std::io::Write;
use std::path::Path;

/// Attach one file sink at `file_path` and one console sink on
/// `console_writer`, each with its own threshold.
///
/// Fails without registering anything if the file cannot be opened.
pub fn configure_dual_sinks(
    logger: &Logger,
    file_path: &Path,
    file_level: LogLevel,
    console_level: LogLevel,
    console_writer: Box<dyn Write + Send>,
    timestamp_format: &TimestampFormat,
) -> Result<()> {
    let file = FileAppender::new(file_path)?.with_timestamp_format(timestamp_format.clone());
    let console =
        ConsoleAppender::with_writer(console_writer).with_timestamp_format(timestamp_format.clone());

    logger.add_sink(Box::new(file), file_level);
    logger.add_sink(Box::new(console), console_level);
    Ok(())
}
