/// Form date helpers
///
/// On the wire dates are ISO-8601 and handled by serde. Edit forms show
/// audit timestamps as `YYYY-MM-DDTHH:mm` strings and parse them back on
/// submit; anything that does not parse is treated as absent.

use chrono::{DateTime, NaiveDateTime, Utc};

/// Date-time format used by date-time inputs
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Formats a timestamp for a date-time input
pub fn format_form_datetime(value: &DateTime<Utc>) -> String {
    value.format(DATE_TIME_FORMAT).to_string()
}

/// Parses a date-time input value; blank or malformed input yields `None`
pub fn parse_form_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    match NaiveDateTime::parse_from_str(value, DATE_TIME_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(err) => {
            tracing::debug!(value, error = %err, "Ignoring unparsable form date-time");
            None
        }
    }
}
