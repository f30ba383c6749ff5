use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::{
    metrics::daily_saving,
    store::settings::Settings,
    utils::time::days_in_month,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayCell {
    pub day: u32,
    pub count: u32,
    pub saving: f64,
    pub is_today: bool,
}

/// One calendar month as a Sunday-first grid. `cells` always holds a
/// multiple of seven entries; `None` pads the first and last week out to
/// full rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
    pub cells: Vec<Option<DayCell>>,
}

impl MonthGrid {
    pub fn weeks(&self) -> std::slice::Chunks<'_, Option<DayCell>> {
        self.cells.chunks(7)
    }
}

/// Builds the grid for `year`/`month`. The caller validates the month
/// reference; see [crate::utils::time::parse_year_month].
pub fn month_grid(
    logs: &BTreeMap<NaiveDate, u32>,
    settings: &Settings,
    year: i32,
    month: u32,
    today: NaiveDate,
) -> MonthGrid {
    let first = NaiveDate::from_ymd_opt(year, month, 1).expect("caller validates the year-month");

    let mut cells = Vec::new();
    for _ in 0..first.weekday().num_days_from_sunday() {
        cells.push(None);
    }

    for day in 1..=days_in_month(year, month) {
        let date = NaiveDate::from_ymd_opt(year, month, day).expect("day is within the month");
        let count = logs.get(&date).copied().unwrap_or(0);
        cells.push(Some(DayCell {
            day,
            count,
            saving: daily_saving(count, settings),
            is_today: date == today,
        }));
    }

    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    MonthGrid { year, month, cells }
}
