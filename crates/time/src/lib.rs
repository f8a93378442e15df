pub use chrono;
pub mod range;

pub use range::{DateRange, Range};

use chrono::{DateTime, Datelike as _, Duration, NaiveDate, ParseResult, TimeZone};

/// Format of the storage keys: a local calendar day without time of day.
pub const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Calendar day as seen in the timezone of `date_time`. Never goes through UTC.
pub fn local_date<Tz: TimeZone>(date_time: &DateTime<Tz>) -> NaiveDate {
    date_time.naive_local().date()
}

pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Inverse of [`date_key`]. A trailing time of day (`2024-05-15T23:30:00`) is ignored, so
/// the result is always the day written in the key whatever the host timezone is.
pub fn parse_date_key(key: &str) -> ParseResult<NaiveDate> {
    let day = key
        .trim()
        .split(['T', ' '])
        .next()
        .unwrap_or_default();
    NaiveDate::parse_from_str(day, DATE_KEY_FORMAT)
}

pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = if weekday == 0 { -6 } else { 1 - weekday };
    date + Duration::days(offset)
}

pub fn end_of_week(date: NaiveDate) -> NaiveDate {
    start_of_week(date) + Duration::days(6)
}

/// Monday..Sunday of the week containing `date`.
pub fn week_days(date: NaiveDate) -> [NaiveDate; 7] {
    let monday = start_of_week(date);
    std::array::from_fn(|offset| monday + Duration::days(offset as i64))
}

pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    start_of_month(date) + Duration::days(days_in_month(date) as i64 - 1)
}

pub fn start_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.ordinal0() as i64)
}

pub fn end_of_year(date: NaiveDate) -> NaiveDate {
    start_of_year(date) + Duration::days(days_in_year(date) as i64 - 1)
}

pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    match date.month() {
        2 if is_leap_year(date.year()) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn days_in_year(date: NaiveDate) -> u32 {
    if is_leap_year(date.year()) {
        366
    } else {
        365
    }
}

/// Inclusive on both ends.
pub fn is_date_between(date: NaiveDate, start: NaiveDate, end: NaiveDate) -> bool {
    start <= date && date <= end
}
