use std::fmt::Display;

use chrono::{DateTime, Local, NaiveDate};
use chrono_english::parse_date_string;
use clap::ValueEnum;

use crate::{error::TrackError, utils::time::DATE_FMT};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

/// Parses a user-supplied day reference like "2025-03-15", "15/03/2025" or
/// "yesterday" into a calendar date, relative to `now`.
pub fn parse_when(
    input: &str,
    now: DateTime<Local>,
    style: DateStyle,
) -> Result<NaiveDate, TrackError> {
    if let Ok(date) = NaiveDate::parse_from_str(input.trim(), DATE_FMT) {
        return Ok(date);
    }
    parse_date_string(input, now, style.into())
        .map(|v| v.date_naive())
        .map_err(|e| TrackError::validation(format!("Can't read {input:?} as a date: {e}")))
}
