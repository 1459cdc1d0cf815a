//! Logger configuration
//!
//! [`LoggerConfig`] is what an embedding application hands to
//! [`initialize`](crate::initialize). Threshold strings are parsed leniently:
//! an unknown file level becomes DEBUG, an unknown console level INFO.

use super::error::{LoggerError, Result};
use super::log_level::LogLevel;
use super::timestamp::{date_folder_name, TimestampFormat};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};

/// Default file threshold
pub const DEFAULT_FILE_LEVEL: LogLevel = LogLevel::Debug;
/// Default console threshold
pub const DEFAULT_CONSOLE_LEVEL: LogLevel = LogLevel::Info;
/// Folder created under the working directory when no log root is given
pub const DEFAULT_LOG_DIR: &str = "logs";

/// # Example
///
/// ```
/// use laplace_logger::{LoggerConfig, LogLevel};
///
/// let config = LoggerConfig::new("svc")
///     .log_root("/tmp/x")
///     .file_level("warning")
///     .console_level("shouting");
///
/// assert_eq!(config.file_level, LogLevel::Warning);
/// assert_eq!(config.console_level, LogLevel::Info);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggerConfig {
    pub app_name: String,

    #[serde(default)]
    pub log_root: Option<PathBuf>,

    #[serde(default = "default_file_level", deserialize_with = "lenient_file_level")]
    pub file_level: LogLevel,

    #[serde(
        default = "default_console_level",
        deserialize_with = "lenient_console_level"
    )]
    pub console_level: LogLevel,

    /// Route panic reports through the captured stderr
    #[serde(default = "default_true")]
    pub capture_panics: bool,

    #[serde(default)]
    pub timestamp_format: TimestampFormat,
}

fn default_file_level() -> LogLevel {
    DEFAULT_FILE_LEVEL
}

fn default_console_level() -> LogLevel {
    DEFAULT_CONSOLE_LEVEL
}

fn default_true() -> bool {
    true
}

fn lenient_file_level<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<LogLevel, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(LogLevel::parse_or(&raw, DEFAULT_FILE_LEVEL))
}

fn lenient_console_level<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<LogLevel, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(LogLevel::parse_or(&raw, DEFAULT_CONSOLE_LEVEL))
}

impl LoggerConfig {
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            log_root: None,
            file_level: DEFAULT_FILE_LEVEL,
            console_level: DEFAULT_CONSOLE_LEVEL,
            capture_panics: true,
            timestamp_format: TimestampFormat::default(),
        }
    }

    /// Parse a JSON document such as
    /// `{"app_name": "svc", "log_root": "/var/log/svc", "file_level": "info"}`
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn log_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.log_root = Some(root.into());
        self
    }

    #[must_use]
    pub fn file_level(mut self, level: &str) -> Self {
        self.file_level = LogLevel::parse_or(level, DEFAULT_FILE_LEVEL);
        self
    }

    #[must_use]
    pub fn console_level(mut self, level: &str) -> Self {
        self.console_level = LogLevel::parse_or(level, DEFAULT_CONSOLE_LEVEL);
        self
    }

    #[must_use]
    pub fn capture_panics(mut self, capture: bool) -> Self {
        self.capture_panics = capture;
        self
    }

    #[must_use]
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// The app name becomes a file name, so it must be a single path component
    pub fn validate(&self) -> Result<()> {
        let name = self.app_name.as_str();
        if name.trim().is_empty() {
            return Err(LoggerError::config("LoggerConfig", "app_name must not be empty"));
        }
        if name.trim() != name {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("app_name '{}' has surrounding whitespace", self.app_name),
            ));
        }
        if name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(LoggerError::config(
                "LoggerConfig",
                format!("app_name '{}' is not a valid file name", self.app_name),
            ));
        }
        Ok(())
    }
}

/// Resolved on-disk layout: `<root>/<YYYY-MM-DD>/<app_name>.log`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogPaths {
    pub log_root: PathBuf,
    pub date_folder: PathBuf,
    pub log_file: PathBuf,
}

impl LogPaths {
    /// Compute the layout for `date`. Without an explicit root, logs go to
    /// `<cwd>/logs`.
    pub fn resolve(log_root: Option<&Path>, app_name: &str, date: NaiveDate) -> Result<Self> {
        let log_root = match log_root {
            Some(root) => root.to_path_buf(),
            None => std::env::current_dir()
                .map_err(|e| {
                    LoggerError::io_operation("resolving log root", "current directory", e)
                })?
                .join(DEFAULT_LOG_DIR),
        };
        let date_folder = log_root.join(date_folder_name(date));
        let log_file = date_folder.join(format!("{}.log", app_name));

        Ok(Self {
            log_root,
            date_folder,
            log_file,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LoggerConfig::new("app");
        assert_eq!(config.file_level, LogLevel::Debug);
        assert_eq!(config.console_level, LogLevel::Info);
        assert!(config.capture_panics);
        assert!(config.log_root.is_none());
    }

    #[test]
    fn test_level_strings_fall_back_per_sink() {
        let config = LoggerConfig::new("app")
            .file_level("bogus")
            .console_level("bogus");
        assert_eq!(config.file_level, LogLevel::Debug);
        assert_eq!(config.console_level, LogLevel::Info);

        let config = LoggerConfig::new("app")
            .file_level("ERROR")
            .console_level("Debug");
        assert_eq!(config.file_level, LogLevel::Error);
        assert_eq!(config.console_level, LogLevel::Debug);
    }

    #[test]
    fn test_from_json() {
        let config = LoggerConfig::from_json(
            r#"{"app_name": "svc", "log_root": "/tmp/x", "file_level": "Warning", "console_level": "loud"}"#,
        )
        .expect("parse config");

        assert_eq!(config.app_name, "svc");
        assert_eq!(config.log_root, Some(PathBuf::from("/tmp/x")));
        assert_eq!(config.file_level, LogLevel::Warning);
        assert_eq!(config.console_level, LogLevel::Info);
        assert!(config.capture_panics);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            LoggerConfig::from_json("{not json"),
            Err(LoggerError::JsonError(_))
        ));
        assert!(matches!(
            LoggerConfig::from_json(r#"{"app_name": ""}"#),
            Err(LoggerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_validate_app_name() {
        assert!(LoggerConfig::new("svc").validate().is_ok());
        assert!(LoggerConfig::new("  ").validate().is_err());
        assert!(LoggerConfig::new("a/b").validate().is_err());
        assert!(LoggerConfig::new("..").validate().is_err());
        assert!(LoggerConfig::new(" svc ").validate().is_err());
        assert!(LoggerConfig::new("my svc").validate().is_ok());
    }

    #[test]
    fn test_paths_layout() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 8).expect("valid date");
        let paths = LogPaths::resolve(Some(Path::new("/tmp/x")), "svc", date).expect("paths");

        assert_eq!(paths.log_root, PathBuf::from("/tmp/x"));
        assert_eq!(paths.date_folder, PathBuf::from("/tmp/x/2025-01-08"));
        assert_eq!(paths.log_file, PathBuf::from("/tmp/x/2025-01-08/svc.log"));
    }

    #[test]
    fn test_paths_default_root() {
        let date = NaiveDate::from_ymd_opt(2025, 1, 8).expect("valid date");
        let paths = LogPaths::resolve(None, "svc", date).expect("paths");
        let cwd = std::env::current_dir().expect("cwd");

        assert_eq!(paths.log_root, cwd.join("logs"));
        assert!(paths.log_file.ends_with("logs/2025-01-08/svc.log"));
    }
}
