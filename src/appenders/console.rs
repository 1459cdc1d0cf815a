//! Console appender implementation

use crate::core::{Appender, LogEntry, Result, TimestampFormat};
#[cfg(feature = "console")]
use colored::Colorize;
use std::io::Write;

pub struct ConsoleAppender {
    writer: Box<dyn Write + Send>,
    use_colors: bool,
    timestamp_format: TimestampFormat,
}

impl ConsoleAppender {
    /// Console sink on the real standard output, without colors
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    /// Console sink on an arbitrary terminal-like writer
    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            writer: Box::new(writer),
            use_colors: false,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Color the level tag. Has no effect without the `console` feature.
    #[must_use]
    pub fn with_colors(mut self, use_colors: bool) -> Self {
        self.use_colors = use_colors;
        self
    }

    /// Set the timestamp format for this appender
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    fn format_text(&self, entry: &LogEntry) -> String {
        #[cfg(feature = "console")]
        if self.use_colors {
            return format!(
                "{} [{}] [{}] {}",
                self.timestamp_format.format(&entry.timestamp),
                entry.level.to_str().color(entry.level.color_code()),
                entry.source,
                entry.message
            );
        }

        entry.format_line(&self.timestamp_format)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.format_text(entry);
        writeln!(self.writer, "{}", output)?;
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }

    /// Captured stream output has already been echoed to the terminal
    fn accepts(&self, entry: &LogEntry) -> bool {
        !entry.is_captured()
    }
}
