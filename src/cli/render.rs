use ansi_term::{Colour, Style};
use chrono::NaiveDate;

use crate::{
    store::settings::Settings,
    utils::{money::format_amount, time::DATE_FMT},
    views::{daily::DayRow, month::MonthGrid, weekly::WeekRow},
};

use super::StatusReport;

pub fn render_status(report: &StatusReport, motivation: Option<&str>) -> String {
    let mut out = String::new();
    let streak = format!(
        "{} {}",
        report.streak_days,
        if report.streak_days == 1 { "day" } else { "days" }
    );
    out.push_str(&format!(
        "Streak: {}\n",
        Style::new().bold().paint(streak)
    ));

    let since = if report.since_quit_date {
        format!(" (since {})", report.quit_date.format(DATE_FMT))
    } else {
        " (whole log)".to_string()
    };
    out.push_str(&format!(
        "Saved:  {}{since}\n",
        Style::new().bold().paint(format_amount(&report.currency, report.money_saved))
    ));
    out.push_str(&format!(
        "Price per cigarette: {}\n",
        format_amount(&report.currency, report.price_per_cigarette)
    ));

    if let Some(motivation) = motivation {
        out.push('\n');
        out.push_str(&format!("{}\n", Colour::Cyan.paint(motivation)));
    }
    out
}

pub fn render_daily(rows: &[DayRow], today: NaiveDate) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        Style::new().bold().paint("Date        Cigarettes")
    ));
    for row in rows {
        let line = format!("{}  {}", row.date.format(DATE_FMT), row.count);
        if row.date == today {
            out.push_str(&format!("{}\n", Colour::Green.paint(line)));
        } else {
            out.push_str(&line);
            out.push('\n');
        }
    }
    out
}

pub fn render_weekly(rows: &[WeekRow]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        Style::new()
            .bold()
            .paint("Week (Mon-Sun)            Total  Average/day")
    ));
    for row in rows {
        out.push_str(&format!(
            "{} - {}  {:>5}  {:>11.2}\n",
            row.start.format(DATE_FMT),
            row.end.format(DATE_FMT),
            row.total,
            row.average,
        ));
    }
    out
}

pub fn render_month(grid: &MonthGrid) -> String {
    let first = NaiveDate::from_ymd_opt(grid.year, grid.month, 1)
        .expect("grid holds a valid year-month");

    let mut out = String::new();
    out.push_str(&format!(
        "{}\n",
        Style::new().bold().paint(first.format("%B %Y").to_string())
    ));
    out.push_str("   Sun    Mon    Tue    Wed    Thu    Fri    Sat\n");

    let mut total = 0;
    for week in grid.weeks() {
        for cell in week {
            match cell {
                Some(cell) => {
                    total += cell.count;
                    let text = format!("{:>3}/{:<3}", cell.day, cell.count);
                    if cell.is_today {
                        out.push_str(&Colour::Green.bold().paint(text).to_string());
                    } else {
                        out.push_str(&text);
                    }
                }
                None => out.push_str("       "),
            }
        }
        out.push('\n');
    }

    out.push_str(&format!("Total: {total} cigarettes\n"));
    out
}

pub fn render_settings(settings: &Settings) -> String {
    let mut out = String::new();
    out.push_str(&format!("currency: {}\n", settings.currency));
    out.push_str(&format!("price per pack: {}\n", settings.price_per_pack));
    out.push_str(&format!("cigarettes per pack: {}\n", settings.cigs_per_pack));
    out.push_str(&format!(
        "baseline cigarettes/day: {}\n",
        settings.baseline_per_day
    ));
    out.push_str(&format!(
        "notifications: {}\n",
        if settings.notifications_enabled { "on" } else { "off" }
    ));
    out.push_str(&format!(
        "quit date: {}\n",
        settings.quit_date.format(DATE_FMT)
    ));
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::{Duration, NaiveDate};

    use crate::{
        store::settings::Settings,
        views::{daily::daily_window, month::month_grid, weekly::weekly_window},
    };

    use super::{render_daily, render_month, render_weekly};

    const TODAY: NaiveDate = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();

    #[test]
    fn daily_table_has_a_row_per_day() {
        let mut logs = BTreeMap::new();
        logs.insert(TODAY - Duration::days(1), 4);

        let rendered = render_daily(&daily_window(&logs, TODAY, 7), TODAY);
        assert_eq!(rendered.lines().count(), 8);
        assert!(rendered.contains("2024-04-04  4"));
        assert!(rendered.contains("2024-03-30  0"));
    }

    #[test]
    fn weekly_table_shows_ranges_and_averages() {
        let rendered = render_weekly(&weekly_window(&BTreeMap::new(), TODAY, 7));
        assert!(rendered.contains("2024-04-01 - 2024-04-07"));
        assert!(rendered.contains("0.00"));
    }

    #[test]
    fn month_grid_prints_a_footer_total() {
        let mut logs = BTreeMap::new();
        logs.insert(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(), 8);
        let settings = Settings {
            price_per_pack: 10.0,
            cigs_per_pack: 20,
            baseline_per_day: 20,
            ..Settings::defaults(TODAY)
        };

        // March has no today marker relative to TODAY's April
        let rendered = render_month(&month_grid(&logs, &settings, 2024, 3, TODAY));
        assert!(rendered.starts_with("\u{1b}[1mMarch 2024"));
        assert!(rendered.contains(" 10/8"));
        assert!(rendered.contains("Total: 8 cigarettes"));
    }
}
