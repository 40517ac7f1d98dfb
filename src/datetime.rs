//! Date/time display helpers.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Format used on board, topic and post listings.
pub const DISPLAY_FORMAT: &str = "%b %d, %Y %H:%M";

/// Format a stored UTC timestamp in the given timezone.
///
/// Accepts RFC3339 or the SQLite `YYYY-MM-DD HH:MM:SS` form. Returns the
/// input unchanged when either the timestamp or the timezone cannot be parsed.
pub fn format_datetime(datetime_str: &str, timezone: &str, format: &str) -> String {
    let tz: Tz = match timezone.parse() {
        Ok(tz) => tz,
        Err(_) => return datetime_str.to_string(),
    };

    if let Some(utc) = parse_utc(datetime_str) {
        return utc.with_timezone(&tz).format(format).to_string();
    }

    datetime_str.to_string()
}

/// Format with [`DISPLAY_FORMAT`].
pub fn format_display(datetime_str: &str, timezone: &str) -> String {
    format_datetime(datetime_str, timezone, DISPLAY_FORMAT)
}

/// Parse a stored timestamp as UTC.
pub fn parse_utc(datetime_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
