use chrono::NaiveDate;

/// Only format accepted for dates stored in logs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// This is the standard way of converting a date to a string in habitual.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a strict `YYYY-MM-DD` date. chrono accepts unpadded fields like `2025-6-1`, so the
/// result is checked to format back into the exact same string.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).ok()?;
    (format_date(date) == value).then_some(date)
}

/// Returns all dates between start (inclusive) and end (inclusive).
pub fn date_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |day| *day <= end)
}
