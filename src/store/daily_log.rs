use std::{
    collections::BTreeMap,
    fmt::Write,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tracing::{debug, instrument, warn};

use crate::{error::TrackError, utils::time::DATE_FMT};

/// Hard ceiling on a single day's count. Anything above this is treated as
/// an input mistake rather than data.
pub const MAX_DAILY_COUNT: u32 = 200;

/// File-backed map of calendar date to cigarette count. Dates without an
/// entry count as zero. Every mutation rewrites the whole file; the log
/// stays small enough (years of daily rows) that batching would buy
/// nothing.
pub struct DailyLogStore {
    path: PathBuf,
    entries: BTreeMap<NaiveDate, u32>,
}

impl DailyLogStore {
    /// Opens the log at `path`, reading whatever is there. A missing file
    /// is an empty log. Lines that don't parse as `date,count`, and counts
    /// outside the allowed range, are skipped with a warning; a
    /// half-written line after a shutdown shouldn't take the whole history
    /// down with it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, TrackError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(content) => parse_log(&content, &path),
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(TrackError::persistence(&path, e)),
        };
        debug!("Loaded {} log entries from {:?}", entries.len(), path);
        Ok(Self { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<NaiveDate, u32> {
        &self.entries
    }

    pub fn get_count(&self, date: NaiveDate) -> u32 {
        self.entries.get(&date).copied().unwrap_or(0)
    }

    /// Records `count` for `date`, replacing any previous value, and
    /// persists immediately. Counts above [MAX_DAILY_COUNT] are rejected
    /// before anything is touched.
    pub fn set_count(&mut self, date: NaiveDate, count: u32) -> Result<(), TrackError> {
        if count > MAX_DAILY_COUNT {
            return Err(TrackError::validation(format!(
                "Daily count must be 0-{MAX_DAILY_COUNT}, got {count}"
            )));
        }
        self.entries.insert(date, count);
        self.save()
    }

    /// Removes the entry for `date`, which makes the day count as zero
    /// again, and persists.
    pub fn clear_date(&mut self, date: NaiveDate) -> Result<(), TrackError> {
        self.entries.remove(&date);
        self.save()
    }

    /// Empties the whole log and persists. Only a prior backup can bring
    /// the data back.
    pub fn clear_all(&mut self) -> Result<(), TrackError> {
        self.entries.clear();
        self.save()
    }

    #[instrument(skip(self))]
    fn save(&self) -> Result<(), TrackError> {
        let mut buffer = String::new();
        for (date, count) in &self.entries {
            let _ = writeln!(buffer, "{},{}", date.format(DATE_FMT), count);
        }
        std::fs::write(&self.path, buffer).map_err(|e| TrackError::persistence(&self.path, e))
    }
}

fn parse_log(content: &str, path: &Path) -> BTreeMap<NaiveDate, u32> {
    let mut entries = BTreeMap::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(line) {
            Some((date, count)) if count <= MAX_DAILY_COUNT => {
                entries.insert(date, count);
            }
            Some((date, count)) => {
                warn!("Dropping out-of-range count {count} for {date} in {path:?}");
            }
            None => {
                warn!("Skipping malformed log line in {path:?}: {line}");
            }
        }
    }
    entries
}

fn parse_line(line: &str) -> Option<(NaiveDate, u32)> {
    let (date, count) = line.split_once(',')?;
    let date = NaiveDate::parse_from_str(date.trim(), DATE_FMT).ok()?;
    let count = count.trim().parse::<u32>().ok()?;
    Some((date, count))
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{error::TrackError, utils::logging::TEST_LOGGING};

    use super::{DailyLogStore, MAX_DAILY_COUNT};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();

    #[test]
    fn missing_file_is_an_empty_log() -> Result<()> {
        let dir = tempdir()?;
        let store = DailyLogStore::open(dir.path().join("logs.csv"))?;
        assert!(store.entries().is_empty());
        assert_eq!(store.get_count(TEST_DATE), 0);
        Ok(())
    }

    #[test]
    fn set_then_get_round_trips() -> Result<()> {
        let dir = tempdir()?;
        let mut store = DailyLogStore::open(dir.path().join("logs.csv"))?;
        for count in [0, 1, 13, MAX_DAILY_COUNT] {
            store.set_count(TEST_DATE, count)?;
            assert_eq!(store.get_count(TEST_DATE), count);
        }
        Ok(())
    }

    #[test]
    fn save_then_reload_reproduces_the_map() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs.csv");
        let mut store = DailyLogStore::open(&path)?;
        store.set_count(TEST_DATE, 3)?;
        store.set_count(TEST_DATE + chrono::Duration::days(2), 0)?;
        store.set_count(TEST_DATE - chrono::Duration::days(10), 20)?;

        let reloaded = DailyLogStore::open(&path)?;
        assert_eq!(reloaded.entries(), store.entries());
        Ok(())
    }

    #[test]
    fn file_is_sorted_by_date() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs.csv");
        let mut store = DailyLogStore::open(&path)?;
        store.set_count(NaiveDate::from_ymd_opt(2024, 4, 9).unwrap(), 2)?;
        store.set_count(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 5)?;
        store.set_count(NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(), 1)?;

        let content = std::fs::read_to_string(&path)?;
        assert_eq!(content, "2024-03-01,5\n2024-04-01,1\n2024-04-09,2\n");
        Ok(())
    }

    #[test]
    fn lenient_load_skips_junk_lines() -> Result<()> {
        *TEST_LOGGING;

        let dir = tempdir()?;
        let path = dir.path().join("logs.csv");
        std::fs::write(
            &path,
            "# a comment\n\
             \n\
             2024-04-05,3\n\
             not a date,4\n\
             2024-04-06\n\
             2024-04-07,many\n\
             2024-04-08,201\n\
             2024-04-09,0\n",
        )?;

        let store = DailyLogStore::open(&path)?;
        assert_eq!(store.entries().len(), 2);
        assert_eq!(store.get_count(TEST_DATE), 3);
        assert_eq!(store.get_count(NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()), 0);
        assert!(store.entries().contains_key(&NaiveDate::from_ymd_opt(2024, 4, 9).unwrap()));
        Ok(())
    }

    #[test]
    fn out_of_range_count_is_rejected_without_mutating() -> Result<()> {
        let dir = tempdir()?;
        let mut store = DailyLogStore::open(dir.path().join("logs.csv"))?;
        store.set_count(TEST_DATE, 5)?;

        let result = store.set_count(TEST_DATE, MAX_DAILY_COUNT + 1);
        assert!(matches!(result, Err(TrackError::Validation(_))));
        assert_eq!(store.get_count(TEST_DATE), 5);
        Ok(())
    }

    #[test]
    fn clear_date_makes_the_day_implicitly_zero() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs.csv");
        let mut store = DailyLogStore::open(&path)?;
        store.set_count(TEST_DATE, 7)?;
        store.clear_date(TEST_DATE)?;

        assert_eq!(store.get_count(TEST_DATE), 0);
        let reloaded = DailyLogStore::open(&path)?;
        assert!(reloaded.entries().is_empty());
        Ok(())
    }

    #[test]
    fn clear_all_then_reload_is_empty() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("logs.csv");
        let mut store = DailyLogStore::open(&path)?;
        store.set_count(TEST_DATE, 7)?;
        store.set_count(TEST_DATE + chrono::Duration::days(1), 2)?;
        store.clear_all()?;

        let reloaded = DailyLogStore::open(&path)?;
        assert!(reloaded.entries().is_empty());
        Ok(())
    }
}
