use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;

/// Fixed "today" shared by the projection suites, so relative scenario dates
/// (yesterday, tomorrow, last week) stay deterministic.
pub static REFERENCE: Lazy<NaiveDateTime> = Lazy::new(|| at(2024, 6, 10));

pub fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
}

pub fn at_time(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}
