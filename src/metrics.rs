//! Derived numbers. Everything here is a pure function of the log map and
//! the settings at call time; nothing is cached or stored.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};

use crate::store::settings::Settings;

/// Counts consecutive smoke-free days ending at `today`, walking backward.
/// A day qualifies when its recorded count is exactly zero (missing days
/// count as zero). The walk stops at the first smoked day, or once it
/// would step onto a day before `quit_date`, so the quit date caps the
/// window. A smoked today means a streak of zero.
pub fn smoke_free_streak(
    logs: &BTreeMap<NaiveDate, u32>,
    quit_date: NaiveDate,
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;
    let mut day = today;
    loop {
        if logs.get(&day).copied().unwrap_or(0) > 0 {
            break;
        }
        streak += 1;
        day -= Duration::days(1);
        if day < quit_date {
            break;
        }
    }
    streak
}

/// Price of a single cigarette. A pack size of zero (possible through a
/// hand-edited settings file) degrades the price to zero instead of
/// dividing by it.
pub fn price_per_cigarette(settings: &Settings) -> f64 {
    if settings.cigs_per_pack == 0 {
        return 0.0;
    }
    settings.price_per_pack / settings.cigs_per_pack as f64
}

/// What a single day with `count` cigarettes saved against the baseline.
/// Smoking above the baseline contributes nothing, never a negative.
pub fn daily_saving(count: u32, settings: &Settings) -> f64 {
    settings.baseline_per_day.saturating_sub(count) as f64 * price_per_cigarette(settings)
}

/// Total saved across logged days. With `from_quit_date` set, days before
/// the quit date don't qualify. Full recompute on every call; the log
/// stays in the low thousands of rows.
pub fn money_saved(
    logs: &BTreeMap<NaiveDate, u32>,
    settings: &Settings,
    from_quit_date: bool,
) -> f64 {
    logs.iter()
        .filter(|(date, _)| !from_quit_date || **date >= settings.quit_date)
        .map(|(_, count)| daily_saving(*count, settings))
        .sum()
}
