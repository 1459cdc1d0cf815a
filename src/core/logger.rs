//! Shared record source and sink registry
//!
//! A [`Logger`] is the single pipeline every record flows through. Sinks are
//! registered with their own minimum severity; [`LogSource`] handles stamp
//! records with a source name before handing them to the logger.

use super::{
    appender::Appender,
    error::Result,
    log_entry::{LogEntry, RecordOrigin},
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::Mutex;
use std::cell::Cell;
use std::sync::Arc;

/// Source name of the process-wide record source. Captured stdout/stderr
/// text is tagged with it.
pub const SHARED_SOURCE: &str = "root";

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Clears the per-thread dispatch flag, also on unwind
struct DispatchGuard;

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|flag| flag.set(false));
    }
}

struct Sink {
    appender: Box<dyn Appender>,
    threshold: LogLevel,
}

impl Sink {
    fn passes(&self, entry: &LogEntry) -> bool {
        entry.level >= self.threshold && self.appender.accepts(entry)
    }
}

pub struct Logger {
    sinks: Mutex<Vec<Sink>>,
    metrics: LoggerMetrics,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sinks: Mutex::new(Vec::new()),
            metrics: LoggerMetrics::new(),
        }
    }

    /// Attach a sink that receives every record with `level >= threshold`
    pub fn add_sink(&self, appender: Box<dyn Appender>, threshold: LogLevel) {
        self.sinks.lock().push(Sink {
            appender,
            threshold,
        });
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.lock().len()
    }

    /// Names and thresholds of the registered sinks, in registration order
    pub fn sink_thresholds(&self) -> Vec<(String, LogLevel)> {
        self.sinks
            .lock()
            .iter()
            .map(|sink| (sink.appender.name().to_string(), sink.threshold))
            .collect()
    }

    /// A handle that tags records with `name`
    pub fn source(self: &Arc<Self>, name: impl Into<Arc<str>>) -> LogSource {
        LogSource {
            logger: Arc::clone(self),
            name: name.into(),
        }
    }

    /// A handle on the process-wide [`SHARED_SOURCE`]
    pub fn shared_source(self: &Arc<Self>) -> LogSource {
        self.source(SHARED_SOURCE)
    }

    /// Dispatch one record to every sink whose threshold it clears
    ///
    /// A record emitted while this thread is already dispatching (an
    /// appender that logs, or a panic hook firing inside one) is dropped.
    pub fn emit(&self, entry: &LogEntry) {
        if DISPATCHING.with(|flag| flag.replace(true)) {
            self.metrics.record_dropped();
            return;
        }
        let _guard = DispatchGuard;

        let mut sinks = self.sinks.lock();
        if Self::process_sync(&mut sinks, entry) {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
    }

    /// Process a log entry with per-appender panic isolation
    ///
    /// One failing appender does not prevent the others from receiving the
    /// entry. Returns true if any appender failed.
    fn process_sync(sinks: &mut [Sink], entry: &LogEntry) -> bool {
        let mut has_error = false;

        for (idx, sink) in sinks.iter_mut().enumerate() {
            if !sink.passes(entry) {
                continue;
            }

            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                sink.appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        sink.appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        sink.appender.name(),
                        panic_msg
                    );
                    has_error = true;
                }
            }
        }

        has_error
    }

    pub fn log(&self, source: &Arc<str>, level: LogLevel, message: impl AsRef<str>) {
        self.emit(&LogEntry::new(level, Arc::clone(source), message));
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    pub fn dropped_count(&self) -> u64 {
        self.metrics.dropped_count()
    }

    pub fn flush(&self) -> Result<()> {
        let mut sinks = self.sinks.lock();
        for sink in sinks.iter_mut() {
            sink.appender.flush()?;
        }
        Ok(())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        if let Err(e) = self.flush() {
            eprintln!("[LOGGER ERROR] Failed to flush during shutdown: {}", e);
        }
    }
}

/// A named record source bound to a [`Logger`]
///
/// # Example
///
/// ```
/// use laplace_logger::{ConsoleAppender, LogLevel, Logger};
/// use std::sync::Arc;
///
/// let logger = Arc::new(Logger::new());
/// logger.add_sink(Box::new(ConsoleAppender::new()), LogLevel::Info);
///
/// let db = logger.source("db");
/// db.info("connected");
/// db.debug("filtered out by the console threshold");
/// ```
#[derive(Clone)]
pub struct LogSource {
    logger: Arc<Logger>,
    name: Arc<str>,
}

impl LogSource {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.logger.log(&self.name, level, message);
    }

    /// Emit an INFO record marked as captured stream output
    pub(crate) fn captured(&self, message: &str) {
        let entry = LogEntry::new(LogLevel::Info, Arc::clone(&self.name), message)
            .with_origin(RecordOrigin::Captured);
        self.logger.metrics().record_captured();
        self.logger.emit(&entry);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Error, message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LoggerError;

    /// Collects every record it receives
    struct Collecting {
        seen: Arc<Mutex<Vec<LogEntry>>>,
        skip_captured: bool,
    }

    impl Appender for Collecting {
        fn append(&mut self, entry: &LogEntry) -> Result<()> {
            self.seen.lock().push(entry.clone());
            Ok(())
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "collecting"
        }

        fn accepts(&self, entry: &LogEntry) -> bool {
            !(self.skip_captured && entry.is_captured())
        }
    }

    fn collecting(skip_captured: bool) -> (Box<Collecting>, Arc<Mutex<Vec<LogEntry>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        (
            Box::new(Collecting {
                seen: Arc::clone(&seen),
                skip_captured,
            }),
            seen,
        )
    }

    #[test]
    fn test_threshold_per_sink() {
        let logger = Arc::new(Logger::new());
        let (low, low_seen) = collecting(false);
        let (high, high_seen) = collecting(false);
        logger.add_sink(low, LogLevel::Debug);
        logger.add_sink(high, LogLevel::Warning);

        let source = logger.source("app");
        source.debug("d");
        source.info("i");
        source.warning("w");
        source.error("e");

        assert_eq!(low_seen.lock().len(), 4);
        let high_messages: Vec<String> =
            high_seen.lock().iter().map(|e| e.message.clone()).collect();
        assert_eq!(high_messages, vec!["w", "e"]);
    }

    #[test]
    fn test_source_name_is_stamped() {
        let logger = Arc::new(Logger::new());
        let (sink, seen) = collecting(false);
        logger.add_sink(sink, LogLevel::Debug);

        logger.source("svc").info("hello");
        logger.shared_source().info("shared");

        let seen = seen.lock();
        assert_eq!(&*seen[0].source, "svc");
        assert_eq!(&*seen[1].source, SHARED_SOURCE);
    }

    #[test]
    fn test_captured_records_respect_accepts() {
        let logger = Arc::new(Logger::new());
        let (file_like, file_seen) = collecting(false);
        let (console_like, console_seen) = collecting(true);
        logger.add_sink(file_like, LogLevel::Debug);
        logger.add_sink(console_like, LogLevel::Debug);

        logger.shared_source().captured("printed");

        assert_eq!(file_seen.lock().len(), 1);
        assert!(console_seen.lock().is_empty());
        assert_eq!(logger.metrics().captured_count(), 1);
    }

    #[test]
    fn test_failing_appender_is_isolated() {
        struct Failing;

        impl Appender for Failing {
            fn append(&mut self, _entry: &LogEntry) -> Result<()> {
                Err(LoggerError::config("failing", "Simulated failure"))
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "failing"
            }
        }

        let logger = Arc::new(Logger::new());
        let (sink, seen) = collecting(false);
        logger.add_sink(Box::new(Failing), LogLevel::Debug);
        logger.add_sink(sink, LogLevel::Debug);

        for _ in 0..3 {
            logger.source("app").info("message");
        }

        assert_eq!(seen.lock().len(), 3);
        assert_eq!(logger.dropped_count(), 3);
    }

    #[test]
    fn test_reentrant_emit_is_dropped() {
        struct Reentrant {
            logger: Arc<Mutex<Option<Arc<Logger>>>>,
        }

        impl Appender for Reentrant {
            fn append(&mut self, _entry: &LogEntry) -> Result<()> {
                if let Some(logger) = self.logger.lock().as_ref() {
                    logger.source("inner").info("nested");
                }
                Ok(())
            }

            fn flush(&mut self) -> Result<()> {
                Ok(())
            }

            fn name(&self) -> &str {
                "reentrant"
            }
        }

        let slot = Arc::new(Mutex::new(None));
        let logger = Arc::new(Logger::new());
        logger.add_sink(
            Box::new(Reentrant {
                logger: Arc::clone(&slot),
            }),
            LogLevel::Debug,
        );
        *slot.lock() = Some(Arc::clone(&logger));

        logger.source("outer").info("first");

        assert_eq!(logger.metrics().total_logged(), 1);
        assert_eq!(logger.dropped_count(), 1);

        // Break the Arc cycle
        slot.lock().take();
    }

    #[test]
    fn test_sink_thresholds() {
        let logger = Logger::new();
        let (a, _) = collecting(false);
        logger.add_sink(a, LogLevel::Warning);
        assert_eq!(logger.sink_count(), 1);
        assert_eq!(
            logger.sink_thresholds(),
            vec![("collecting".to_string(), LogLevel::Warning)]
        );
    }
}
