//! Timestamp formatting utilities
//!
//! Log lines carry local wall-clock time. The default layout is
//! `2025-01-08 10:30:45`, the same layout used for the day folder prefix.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Layout of the day folder name: `2025-01-08`
pub const DATE_FOLDER_FORMAT: &str = "%Y-%m-%d";

/// Timestamp format options for log lines
///
/// # Examples
///
/// ```
/// use laplace_logger::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Standard.format(&at), "2025-01-08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45`
    #[default]
    Standard,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+01:00`
    Iso8601,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        match self {
            TimestampFormat::Standard => datetime.format("%Y-%m-%d %H:%M:%S").to_string(),
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z").to_string(),
            TimestampFormat::Custom(format_str) => datetime.format(format_str).to_string(),
        }
    }
}

/// Name of the folder that collects one calendar day of logs
pub fn date_folder_name(date: NaiveDate) -> String {
    date.format(DATE_FOLDER_FORMAT).to_string()
}

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
