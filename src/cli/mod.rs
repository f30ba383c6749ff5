pub mod render;
pub mod when;

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    backup::export_backup,
    error::TrackError,
    metrics::{money_saved, price_per_cigarette, smoke_free_streak},
    store::{
        daily_log::DailyLogStore,
        settings::{Settings, SettingsStore},
    },
    utils::{
        clock::{Clock, SystemClock},
        dir::{create_application_default_path, BACKUP_DIR_NAME, LOG_FILE_NAME, SETTINGS_FILE_NAME},
        logging::enable_logging,
        money::format_amount,
        time::parse_year_month,
    },
    views::{daily::daily_window, month::month_grid, weekly::weekly_window},
};

use render::{render_daily, render_month, render_settings, render_status, render_weekly};
use when::{parse_when, DateStyle};

#[derive(Parser, Debug)]
#[command(name = "QuitTrack", version, long_about = None)]
#[command(about = "Track smoke-free streaks, daily counts and money saved", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(
        long,
        help = "Application directory. By default tries to save into $XDG_STATE_HOME or $HOME/.local/state"
    )]
    dir: Option<PathBuf>,
    #[arg(long, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Record how many cigarettes were smoked on a day")]
    Log {
        count: u32,
        #[arg(
            long,
            help = "Day to record. Examples are \"yesterday\", \"15/03/2025\", \"2025-03-15\". Defaults to today"
        )]
        date: Option<String>,
        #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
        date_style: DateStyle,
    },
    #[command(about = "Clear one day's record, or the whole log")]
    Clear {
        #[arg(long, conflicts_with = "all", help = "Day to clear. Defaults to today")]
        date: Option<String>,
        #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
        date_style: DateStyle,
        #[arg(long, help = "Remove every logged day")]
        all: bool,
    },
    #[command(about = "Show the current streak and money saved")]
    Status {
        #[arg(long, help = "Count savings over the whole log instead of from the quit date")]
        all_history: bool,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Show a day-by-day table of recent counts")]
    Daily {
        #[arg(long, default_value_t = 30)]
        days: u32,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Show Monday-to-Sunday totals and averages")]
    Weekly {
        #[arg(long, default_value_t = 7, help = "How many weeks to look back from the current week")]
        weeks: u32,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Show a calendar month with counts and savings")]
    Month {
        #[arg(help = "Month to show as YYYY-MM. Defaults to the current month")]
        month: Option<String>,
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Copy the log file to a timestamped backup")]
    Export {},
    #[command(about = "Show or change settings", subcommand)]
    Settings(SettingsCommands),
}

#[derive(Subcommand, Debug)]
enum SettingsCommands {
    #[command(about = "Print the current settings")]
    Show {
        #[arg(long)]
        json: bool,
    },
    #[command(about = "Change one or more settings and save")]
    Set {
        #[arg(long)]
        currency: Option<String>,
        #[arg(long)]
        price_per_pack: Option<f64>,
        #[arg(long)]
        cigs_per_pack: Option<u32>,
        #[arg(long)]
        baseline_per_day: Option<u32>,
        #[arg(long, help = "Day the quit attempt started")]
        quit_date: Option<String>,
        #[arg(long, help = "Show a motivational line with status output")]
        notifications: Option<bool>,
        #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
        date_style: DateStyle,
    },
}

#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub streak_days: u32,
    pub money_saved: f64,
    pub currency: String,
    pub price_per_cigarette: f64,
    pub quit_date: NaiveDate,
    /// Whether savings were filtered to days on or after the quit date.
    pub since_quit_date: bool,
}

const MOTIVATION: &[&str] = &[
    "Small steps every day beat big plans once a year.",
    "Your lungs are already thanking you.",
    "One day at a time. One choice at a time.",
    "Cravings pass. Pride lasts.",
    "Today's zero is tomorrow's streak.",
];

fn motivation_for(today: NaiveDate) -> &'static str {
    MOTIVATION[today.ordinal0() as usize % MOTIVATION.len()]
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let dir = match args.dir {
        Some(dir) => {
            std::fs::create_dir_all(&dir)?;
            dir
        }
        None => create_application_default_path()?,
    };

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(&dir, logging_level, args.log)?;

    execute(args.commands, &dir, &SystemClock)
}

fn execute(command: Commands, dir: &Path, clock: &dyn Clock) -> Result<()> {
    debug!("Running {command:?}");

    let log_path = dir.join(LOG_FILE_NAME);
    let settings_store = SettingsStore::new(dir.join(SETTINGS_FILE_NAME));
    let settings = settings_store.load(clock.today());
    let mut logs = DailyLogStore::open(&log_path)?;

    match command {
        Commands::Log {
            count,
            date,
            date_style,
        } => {
            let date = match date {
                Some(input) => parse_when(&input, clock.now(), date_style)?,
                None => clock.today(),
            };
            logs.set_count(date, count)?;
            println!("Saved {date}: {count}");
            println!("{}", status_line(&logs, &settings, clock.today()));
        }
        Commands::Clear {
            date,
            date_style,
            all,
        } => {
            if all {
                logs.clear_all()?;
                println!("Cleared all logs");
            } else {
                let date = match date {
                    Some(input) => parse_when(&input, clock.now(), date_style)?,
                    None => clock.today(),
                };
                logs.clear_date(date)?;
                println!("Cleared {date}");
            }
            println!("{}", status_line(&logs, &settings, clock.today()));
        }
        Commands::Status { all_history, json } => {
            let report = StatusReport {
                streak_days: smoke_free_streak(logs.entries(), settings.quit_date, clock.today()),
                money_saved: money_saved(logs.entries(), &settings, !all_history),
                currency: settings.currency.clone(),
                price_per_cigarette: price_per_cigarette(&settings),
                quit_date: settings.quit_date,
                since_quit_date: !all_history,
            };
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                let motivation =
                    settings.notifications_enabled.then(|| motivation_for(clock.today()));
                print!("{}", render_status(&report, motivation));
            }
        }
        Commands::Daily { days, json } => {
            let rows = daily_window(logs.entries(), clock.today(), days);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_daily(&rows, clock.today()));
            }
        }
        Commands::Weekly { weeks, json } => {
            let rows = weekly_window(logs.entries(), clock.today(), weeks);
            if json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                print!("{}", render_weekly(&rows));
            }
        }
        Commands::Month { month, json } => {
            let today = clock.today();
            let (year, month) = match month {
                Some(input) => parse_year_month(&input).ok_or_else(|| {
                    TrackError::validation(format!("Can't read {input:?} as YYYY-MM"))
                })?,
                None => (today.year(), today.month()),
            };
            let grid = month_grid(logs.entries(), &settings, year, month, today);
            if json {
                println!("{}", serde_json::to_string_pretty(&grid)?);
            } else {
                print!("{}", render_month(&grid));
            }
        }
        Commands::Export {} => {
            let target = export_backup(&log_path, &dir.join(BACKUP_DIR_NAME), clock.now().naive_local())?;
            println!("Backup saved: {}", target.display());
        }
        Commands::Settings(SettingsCommands::Show { json }) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&settings)?);
            } else {
                print!("{}", render_settings(&settings));
            }
        }
        Commands::Settings(SettingsCommands::Set {
            currency,
            price_per_pack,
            cigs_per_pack,
            baseline_per_day,
            quit_date,
            notifications,
            date_style,
        }) => {
            let mut draft = settings;
            if let Some(v) = currency {
                draft.currency = v;
            }
            if let Some(v) = price_per_pack {
                draft.price_per_pack = v;
            }
            if let Some(v) = cigs_per_pack {
                draft.cigs_per_pack = v;
            }
            if let Some(v) = baseline_per_day {
                draft.baseline_per_day = v;
            }
            if let Some(v) = quit_date {
                draft.quit_date = parse_when(&v, clock.now(), date_style)?;
            }
            if let Some(v) = notifications {
                draft.notifications_enabled = v;
            }
            settings_store.save(&draft)?;
            println!("Settings saved.");
            print!("{}", render_settings(&draft));
        }
    }
    Ok(())
}

fn status_line(logs: &DailyLogStore, settings: &Settings, today: NaiveDate) -> String {
    let streak = smoke_free_streak(logs.entries(), settings.quit_date, today);
    let saved = money_saved(logs.entries(), settings, true);
    format!(
        "Streak: {streak} {}, saved {}",
        if streak == 1 { "day" } else { "days" },
        format_amount(&settings.currency, saved)
    )
}
