//! Weekday labels for forecast rows.

use chrono::NaiveDate;

pub const TODAY_LABEL: &str = "Today";

/// Label for a forecast day: "Today" for the first row, otherwise the
/// English short weekday ("Mon", "Tue", ...).
///
/// The date is taken as-is; no timezone conversion is applied.
pub fn format_day(date: NaiveDate, is_today: bool) -> String {
    if is_today {
        return TODAY_LABEL.to_string();
    }
    date.format("%a").to_string()
}

/// Same as [`format_day`] for an ISO `YYYY-MM-DD` string.
///
/// # Errors
/// Returns the parse error when `date` is not an ISO calendar date.
pub fn format_day_str(date: &str, is_today: bool) -> Result<String, chrono::ParseError> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d")?;
    Ok(format_day(parsed, is_today))
}
