use chrono::{Datelike, Duration, NaiveDate};

/// This is the standard way of converting a date to a string in quittrack.
pub const DATE_FMT: &str = "%Y-%m-%d";

/// Returns the Monday on or before `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.expect("month is validated to 1-12")
        .pred_opt()
        .expect("start of time should never happen")
        .day()
}

/// Parses a `YYYY-MM` month reference.
pub fn parse_year_month(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    if !(1..=12).contains(&month) {
        return None;
    }
    // reject references no real date can carry, like 0000-13
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((year, month))
}
