//! Parsing of the split `DD/MM/YYYY` + `HH.MM.SS` timestamp format.

use crate::error::{ForecastError, Result};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};

/// chrono format of the joined `date time` string.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H.%M.%S";

/// Parse a raw date and time pair into a timestamp.
///
/// The wall-clock reading is taken as UTC; no zone conversion is applied.
/// `row` is only used to locate the failure in the error.
///
/// # Example
/// ```
/// use sensor_forecast::prepare::parse_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = parse_timestamp("10/03/2004", "18.00.00", 0).unwrap();
/// assert_eq!(ts, Utc.with_ymd_and_hms(2004, 3, 10, 18, 0, 0).unwrap());
///
/// assert!(parse_timestamp("32/13/2020", "18.00.00", 0).is_err());
/// ```
pub fn parse_timestamp(date: &str, time: &str, row: usize) -> Result<DateTime<Utc>> {
    let joined = format!("{} {}", date.trim(), time.trim());
    let naive = NaiveDateTime::parse_from_str(&joined, TIMESTAMP_FORMAT).map_err(|e| {
        ForecastError::parse(
            row,
            format!("'{}' does not match {}: {}", joined, TIMESTAMP_FORMAT, e),
        )
    })?;
    Ok(Utc.from_utc_datetime(&naive))
}
