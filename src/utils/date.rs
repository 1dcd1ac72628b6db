use crate::errors::{AppError, AppResult};
use chrono::{Datelike, NaiveDate};

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(s: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| AppError::InvalidDate(s.to_string()))
}

/// Calendar years are limited to what `NaiveDate` and a human editor can handle.
pub fn check_year(year: i32) -> AppResult<i32> {
    if (1900..=2999).contains(&year) {
        Ok(year)
    } else {
        Err(AppError::InvalidYear(year.to_string()))
    }
}

/// A holiday row must start inside the calendar year it is filed under.
pub fn in_year(date: NaiveDate, year: i32) -> bool {
    date.year() == year
}

pub fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}
