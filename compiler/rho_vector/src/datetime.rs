//! `POSIXct` conversion. All date-times are UTC seconds since the epoch.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use super::{VectorError, VectorResult};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

/// Render a date-time as `as.character` does. Midnight drops the clock.
pub fn format_datetime(seconds: f64) -> String {
    if !seconds.is_finite() {
        return "NA".to_owned();
    }
    let whole = seconds.floor();
    let nanos = ((seconds - whole) * 1e9) as u32;
    let Some(time) = DateTime::from_timestamp(whole as i64, nanos) else {
        return "NA".to_owned();
    };
    if time.num_seconds_from_midnight() == 0 && nanos == 0 {
        time.format("%Y-%m-%d").to_string()
    } else {
        time.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Parse a date or date-time string into epoch seconds.
pub fn parse_datetime(text: &str) -> VectorResult<f64> {
    let text = text.trim();
    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Ok(naive.and_utc().timestamp() as f64);
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(naive.and_utc().timestamp() as f64);
            }
        }
    }
    Err(VectorError::InvalidDateTime)
}
