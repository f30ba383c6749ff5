use std::{fmt::Write, io::ErrorKind, path::PathBuf};

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{instrument, warn};

use crate::{error::TrackError, utils::time::DATE_FMT};

pub const DEFAULT_CURRENCY: &str = "$";
pub const DEFAULT_PRICE_PER_PACK: f64 = 7.0;
pub const DEFAULT_CIGS_PER_PACK: u32 = 20;
pub const DEFAULT_BASELINE_PER_DAY: u32 = 20;

/// User-configurable parameters. The baseline is the pre-quit daily habit
/// that savings are measured against.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub currency: String,
    pub price_per_pack: f64,
    pub cigs_per_pack: u32,
    pub baseline_per_day: u32,
    pub notifications_enabled: bool,
    /// Streak and savings computations ignore days before this date.
    pub quit_date: NaiveDate,
}

impl Settings {
    pub fn defaults(today: NaiveDate) -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            price_per_pack: DEFAULT_PRICE_PER_PACK,
            cigs_per_pack: DEFAULT_CIGS_PER_PACK,
            baseline_per_day: DEFAULT_BASELINE_PER_DAY,
            notifications_enabled: true,
            quit_date: today,
        }
    }

    /// Checks the invariants a save must hold. Note that a file edited by
    /// hand can still bypass these; loading stays tolerant and the metrics
    /// degrade a zero pack size to a zero price instead of erroring.
    pub fn validate(&self) -> Result<(), TrackError> {
        if !(self.price_per_pack > 0.0) {
            return Err(TrackError::validation("Price per pack must be > 0"));
        }
        if self.cigs_per_pack == 0 {
            return Err(TrackError::validation("Cigarettes per pack must be > 0"));
        }
        if self.currency.trim().is_empty() {
            return Err(TrackError::validation("Currency must not be empty"));
        }
        Ok(())
    }
}

/// Reads and writes the `key=value` settings file.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads settings, falling back to the documented default for every
    /// field that is missing or does not parse. Never fails: an unreadable
    /// file simply yields the defaults. `today` seeds the default quit
    /// date.
    pub fn load(&self, today: NaiveDate) -> Settings {
        let mut settings = Settings::defaults(today);
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    warn!("Failed to read settings {:?}: {e}", self.path);
                }
                return settings;
            }
        };

        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                warn!("Skipping malformed settings line in {:?}: {line}", self.path);
                continue;
            };
            let (key, value) = (key.trim(), value.trim());
            match key {
                "currency" => {
                    if !value.is_empty() {
                        settings.currency = value.to_string();
                    }
                }
                "pricePerPack" => match value.parse::<f64>() {
                    Ok(v) => settings.price_per_pack = v,
                    Err(_) => warn!("Ignoring invalid pricePerPack {value:?}"),
                },
                "cigsPerPack" => match value.parse::<u32>() {
                    Ok(v) => settings.cigs_per_pack = v,
                    Err(_) => warn!("Ignoring invalid cigsPerPack {value:?}"),
                },
                "baselinePerDay" => match value.parse::<u32>() {
                    Ok(v) => settings.baseline_per_day = v,
                    Err(_) => warn!("Ignoring invalid baselinePerDay {value:?}"),
                },
                "notificationsEnabled" => match value.parse::<bool>() {
                    Ok(v) => settings.notifications_enabled = v,
                    Err(_) => warn!("Ignoring invalid notificationsEnabled {value:?}"),
                },
                "quitDate" => {
                    if value.is_empty() {
                        continue;
                    }
                    match NaiveDate::parse_from_str(value, DATE_FMT) {
                        Ok(v) => settings.quit_date = v,
                        Err(_) => warn!("Ignoring invalid quitDate {value:?}"),
                    }
                }
                _ => warn!("Ignoring unknown settings key {key:?}"),
            }
        }

        settings
    }

    /// Validates the draft, then rewrites the whole file. The caller only
    /// swaps its in-memory settings after this returns Ok, so a failed
    /// validation never leaves half-applied state behind.
    #[instrument(skip_all)]
    pub fn save(&self, settings: &Settings) -> Result<(), TrackError> {
        settings.validate()?;

        let mut buffer = String::new();
        let _ = writeln!(buffer, "currency={}", settings.currency);
        let _ = writeln!(buffer, "pricePerPack={}", settings.price_per_pack);
        let _ = writeln!(buffer, "cigsPerPack={}", settings.cigs_per_pack);
        let _ = writeln!(buffer, "baselinePerDay={}", settings.baseline_per_day);
        let _ = writeln!(
            buffer,
            "notificationsEnabled={}",
            settings.notifications_enabled
        );
        let _ = writeln!(buffer, "quitDate={}", settings.quit_date.format(DATE_FMT));
        std::fs::write(&self.path, buffer).map_err(|e| TrackError::persistence(&self.path, e))
    }
}
