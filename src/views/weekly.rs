use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::utils::time::week_start;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekRow {
    /// Monday of the week.
    pub start: NaiveDate,
    /// Sunday of the week.
    pub end: NaiveDate,
    pub total: u32,
    pub average: f64,
}

/// Monday-to-Sunday aggregates, oldest week first. The window opens at the
/// Monday on or before `today - weeks_back` weeks and runs through the
/// week containing `today`, even when that week is partial. Partial weeks
/// average over the days elapsed so far, complete weeks over all seven.
pub fn weekly_window(
    logs: &BTreeMap<NaiveDate, u32>,
    today: NaiveDate,
    weeks_back: u32,
) -> Vec<WeekRow> {
    let mut cursor = week_start(today - Duration::weeks(weeks_back as i64));
    let mut rows = Vec::new();
    while cursor <= today {
        let end = cursor + Duration::days(6);
        let last_counted = end.min(today);

        let mut total = 0;
        let mut days = 0u32;
        let mut day = cursor;
        while day <= last_counted {
            total += logs.get(&day).copied().unwrap_or(0);
            days += 1;
            day += Duration::days(1);
        }

        let average = if days == 0 {
            0.0
        } else {
            total as f64 / days as f64
        };
        rows.push(WeekRow {
            start: cursor,
            end,
            total,
            average,
        });
        cursor += Duration::weeks(1);
    }
    rows
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{Datelike, Duration, NaiveDate, Weekday};

    use super::weekly_window;

    // a Friday
    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();

    #[test]
    fn empty_log_still_yields_eight_zero_weeks() {
        let rows = weekly_window(&BTreeMap::new(), TODAY, 7);
        assert_eq!(rows.len(), 8);
        for row in &rows {
            assert_eq!(row.start.weekday(), Weekday::Mon);
            assert_eq!(row.end, row.start + Duration::days(6));
            assert_eq!(row.total, 0);
            assert_eq!(row.average, 0.0);
        }
        assert_eq!(rows.last().unwrap().start, NaiveDate::from_ymd_opt(2024, 4, 1).unwrap());
    }

    #[test]
    fn complete_weeks_average_over_seven_days() {
        let mut logs = BTreeMap::new();
        // the week of 2024-03-25 is fully in the past relative to TODAY
        let monday = NaiveDate::from_ymd_opt(2024, 3, 25).unwrap();
        for offset in 0..7 {
            logs.insert(monday + Duration::days(offset), 2);
        }

        let rows = weekly_window(&logs, TODAY, 7);
        let row = rows.iter().find(|r| r.start == monday).unwrap();
        assert_eq!(row.total, 14);
        assert_eq!(row.average, 2.0);
    }

    #[test]
    fn the_current_partial_week_averages_over_elapsed_days() {
        let mut logs = BTreeMap::new();
        // TODAY is a Friday, so five days of the current week have elapsed
        logs.insert(TODAY, 5);
        logs.insert(TODAY - Duration::days(1), 5);

        let rows = weekly_window(&logs, TODAY, 7);
        let row = rows.last().unwrap();
        assert_eq!(row.total, 10);
        assert_eq!(row.average, 2.0);
    }

    #[test]
    fn counts_outside_the_window_are_ignored() {
        let mut logs = BTreeMap::new();
        logs.insert(TODAY - Duration::weeks(20), 50);

        let rows = weekly_window(&logs, TODAY, 7);
        assert!(rows.iter().all(|r| r.total == 0));
    }
}
