//! Process-wide application logger
//!
//! [`AppLogger`] wires the pieces together: a day folder under the log root,
//! a file sink and a console sink on one shared [`Logger`], and captured
//! stdout/stderr streams. It can be used as a plain owned value, or published
//! once per process with [`initialize`].
//!
//! ```no_run
//! use laplace_logger::{initialize, log, LoggerConfig};
//! use std::io::Write;
//!
//! let app = initialize(LoggerConfig::new("svc").log_root("/tmp/x")).unwrap();
//! app.info("service started");
//! log::warning("via the shortcut").unwrap();
//! writeln!(laplace_logger::stdout().unwrap(), "plain output, also logged").unwrap();
//! ```

use super::capture::{CapturedStream, StreamHandle};
use super::config::{LogPaths, LoggerConfig};
use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::logger::{LogSource, Logger};
use super::metrics::LoggerMetrics;
use super::timestamp::today;
use crate::appenders::configure_dual_sinks;
use chrono::NaiveDate;
use parking_lot::Mutex;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};

type SharedStream = Mutex<CapturedStream<Box<dyn Write + Send>>>;

/// Terminal-side writers an [`AppLogger`] is built on
///
/// [`Streams::process`] (the default) uses the real process streams. Tests
/// and embedders substitute their own writers.
pub struct Streams {
    /// Target of the console sink
    pub console: Box<dyn Write + Send>,
    /// Where captured stdout text is echoed
    pub stdout: Box<dyn Write + Send>,
    /// Where captured stderr text is echoed
    pub stderr: Box<dyn Write + Send>,
}

impl Streams {
    pub fn process() -> Self {
        Self {
            console: Box::new(io::stdout()),
            stdout: Box::new(io::stdout()),
            stderr: Box::new(io::stderr()),
        }
    }
}

impl Default for Streams {
    fn default() -> Self {
        Self::process()
    }
}

pub struct AppLogger {
    app_name: String,
    paths: LogPaths,
    file_level: LogLevel,
    console_level: LogLevel,
    logger: Arc<Logger>,
    source: LogSource,
    stdout: SharedStream,
    stderr: SharedStream,
}

impl AppLogger {
    /// Build on the real process streams, dated today
    pub fn new(config: LoggerConfig) -> Result<Self> {
        Self::with_streams(config, Streams::process())
    }

    pub fn with_streams(config: LoggerConfig, streams: Streams) -> Result<Self> {
        Self::with_streams_at(config, streams, today())
    }

    /// Build with an explicit day folder date
    pub fn with_streams_at(config: LoggerConfig, streams: Streams, date: NaiveDate) -> Result<Self> {
        config.validate()?;
        let app_name = config.app_name.clone();
        let paths = LogPaths::resolve(config.log_root.as_deref(), &app_name, date)?;

        fs::create_dir_all(&paths.date_folder).map_err(|e| {
            LoggerError::io_operation(
                "creating log directory",
                paths.date_folder.display().to_string(),
                e,
            )
        })?;

        let logger = Arc::new(Logger::new());
        configure_dual_sinks(
            &logger,
            &paths.log_file,
            config.file_level,
            config.console_level,
            streams.console,
            &config.timestamp_format,
        )?;

        let shared = logger.shared_source();
        let source = logger.source(app_name.as_str());

        Ok(Self {
            app_name,
            paths,
            file_level: config.file_level,
            console_level: config.console_level,
            stdout: Mutex::new(CapturedStream::new(streams.stdout, shared.clone())),
            stderr: Mutex::new(CapturedStream::new(streams.stderr, shared)),
            logger,
            source,
        })
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn log_root(&self) -> &Path {
        &self.paths.log_root
    }

    pub fn date_folder(&self) -> &Path {
        &self.paths.date_folder
    }

    pub fn log_file(&self) -> &Path {
        &self.paths.log_file
    }

    pub fn file_level(&self) -> LogLevel {
        self.file_level
    }

    pub fn console_level(&self) -> LogLevel {
        self.console_level
    }

    /// The shared record source both sinks are attached to
    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// This application's named source
    pub fn source(&self) -> &LogSource {
        &self.source
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.logger.metrics()
    }

    /// Captured standard output
    pub fn stdout(&self) -> StreamHandle<'_> {
        StreamHandle::new(&self.stdout)
    }

    /// Captured standard error
    pub fn stderr(&self) -> StreamHandle<'_> {
        StreamHandle::new(&self.stderr)
    }

    pub fn flush(&self) -> Result<()> {
        self.logger.flush()?;
        self.stdout.lock().flush()?;
        self.stderr.lock().flush()?;
        Ok(())
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        self.source.log(level, message);
    }

    #[inline]
    pub fn debug(&self, message: impl AsRef<str>) {
        self.source.debug(message);
    }

    #[inline]
    pub fn info(&self, message: impl AsRef<str>) {
        self.source.info(message);
    }

    #[inline]
    pub fn warning(&self, message: impl AsRef<str>) {
        self.source.warning(message);
    }

    #[inline]
    pub fn error(&self, message: impl AsRef<str>) {
        self.source.error(message);
    }

    fn report_panic(&self, report: &str) {
        match self.stderr().try_write_str(report) {
            Some(Ok(())) => {}
            Some(Err(_)) | None => eprintln!("{}", report),
        }
    }
}

impl fmt::Debug for AppLogger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppLogger")
            .field("app_name", &self.app_name)
            .field("log_file", &self.paths.log_file)
            .field("file_level", &self.file_level)
            .field("console_level", &self.console_level)
            .finish_non_exhaustive()
    }
}

static INSTANCE: OnceLock<AppLogger> = OnceLock::new();
static INIT_LOCK: Mutex<()> = parking_lot::const_mutex(());

/// Create and publish the process-wide logger on the real process streams
///
/// Only the first successful call has any effect. Later calls return the
/// existing instance and ignore their arguments. A failed call publishes
/// nothing.
pub fn initialize(config: LoggerConfig) -> Result<&'static AppLogger> {
    initialize_with(config, Streams::process())
}

/// [`initialize`] with substituted terminal writers
pub fn initialize_with(config: LoggerConfig, streams: Streams) -> Result<&'static AppLogger> {
    if let Some(existing) = INSTANCE.get() {
        return Ok(existing);
    }

    let _init = INIT_LOCK.lock();
    if let Some(existing) = INSTANCE.get() {
        return Ok(existing);
    }

    let capture_panics = config.capture_panics;
    let app = AppLogger::with_streams(config, streams)?;
    let instance = INSTANCE.get_or_init(|| app);
    if capture_panics {
        install_panic_hook();
    }
    Ok(instance)
}

/// The published logger, or [`LoggerError::NotInitialized`]
pub fn instance() -> Result<&'static AppLogger> {
    INSTANCE.get().ok_or(LoggerError::NotInitialized)
}

pub fn is_initialized() -> bool {
    INSTANCE.get().is_some()
}

/// Captured standard output of the published logger
pub fn stdout() -> Result<StreamHandle<'static>> {
    instance().map(AppLogger::stdout)
}

/// Captured standard error of the published logger
pub fn stderr() -> Result<StreamHandle<'static>> {
    instance().map(AppLogger::stderr)
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let thread = std::thread::current();
        let report = format!("thread '{}' {}", thread.name().unwrap_or("<unnamed>"), info);
        match INSTANCE.get() {
            Some(app) => app.report_panic(&report),
            None => eprintln!("{}", report),
        }
    }));
}
