use chrono::NaiveDate;

/// Table/print date format, e.g. `Jan 5, 1990`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Formats a `YYYY-MM-DD` string; anything unparseable is passed through.
pub fn format_date_str(value: &str) -> String {
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => format_date(date),
        Err(_) => value.to_string(),
    }
}
