use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayRow {
    pub date: NaiveDate,
    pub count: u32,
}

/// The most recent `days` calendar dates ending at `today`, oldest first.
/// Dates without a log entry appear with a zero count, so the result is
/// always exactly `days` rows with no gaps.
pub fn daily_window(logs: &BTreeMap<NaiveDate, u32>, today: NaiveDate, days: u32) -> Vec<DayRow> {
    let start = today - Duration::days(days as i64 - 1);
    (0..days as i64)
        .map(|offset| {
            let date = start + Duration::days(offset);
            DayRow {
                date,
                count: logs.get(&date).copied().unwrap_or(0),
            }
        })
        .collect()
}
