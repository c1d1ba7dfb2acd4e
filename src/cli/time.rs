//! Parsing of user-supplied points in time.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::domain::models::EpochMillis;

const LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Accepts epoch milliseconds, RFC3339, `YYYY-MM-DD HH:MM:SS` or
/// `YYYY-MM-DD` (midnight). The last two are local time.
pub fn parse_time(input: &str) -> Result<EpochMillis, String> {
    let input = input.trim();

    if let Ok(millis) = input.parse::<i64>() {
        return Ok(millis);
    }
    if let Ok(time) = DateTime::parse_from_rfc3339(input) {
        return Ok(time.timestamp_millis());
    }

    let naive = NaiveDateTime::parse_from_str(input, LOCAL_FORMAT)
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(|| format!("'{input}' is not epoch milliseconds, RFC3339 or {LOCAL_FORMAT}"))?;

    naive
        .and_local_timezone(Local)
        .earliest()
        .map(|time| time.timestamp_millis())
        .ok_or_else(|| format!("'{input}' does not exist in the local time zone"))
}
