use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::debug;

use crate::error::TrackError;

const BACKUP_TIME_FMT: &str = "%Y%m%d_%H%M%S";

/// Copies the log file verbatim into `backup_dir` under a name embedding
/// `now`, like `logs_20240405_121500.csv`, and returns the target path.
/// Asking for a backup before anything was logged is an error; a second
/// backup within the same second silently overwrites the first.
pub fn export_backup(
    log_path: &Path,
    backup_dir: &Path,
    now: NaiveDateTime,
) -> Result<PathBuf, TrackError> {
    if !log_path.exists() {
        return Err(TrackError::NothingToExport);
    }

    std::fs::create_dir_all(backup_dir).map_err(|e| TrackError::persistence(backup_dir, e))?;

    let target = backup_dir.join(format!("logs_{}.csv", now.format(BACKUP_TIME_FMT)));
    std::fs::copy(log_path, &target).map_err(|e| TrackError::persistence(&target, e))?;
    debug!("Backed up {log_path:?} to {target:?}");
    Ok(target)
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
    use tempfile::tempdir;

    use crate::error::TrackError;

    use super::export_backup;

    const TEST_MOMENT: NaiveDateTime = NaiveDateTime::new(
        NaiveDate::from_ymd_opt(2024, 4, 5).unwrap(),
        NaiveTime::from_hms_opt(12, 15, 0).unwrap(),
    );

    #[test]
    fn copies_the_log_under_a_timestamped_name() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("logs.csv");
        let backup_dir = dir.path().join("backups");
        std::fs::write(&log_path, "2024-04-05,3\n")?;

        let target = export_backup(&log_path, &backup_dir, TEST_MOMENT)?;

        assert_eq!(target, backup_dir.join("logs_20240405_121500.csv"));
        assert_eq!(std::fs::read_to_string(&target)?, "2024-04-05,3\n");
        Ok(())
    }

    #[test]
    fn missing_log_errors_and_creates_nothing() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("logs.csv");
        let backup_dir = dir.path().join("backups");

        let result = export_backup(&log_path, &backup_dir, TEST_MOMENT);

        assert!(matches!(result, Err(TrackError::NothingToExport)));
        assert!(!backup_dir.exists());
        Ok(())
    }

    #[test]
    fn timestamp_collision_overwrites() -> Result<()> {
        let dir = tempdir()?;
        let log_path = dir.path().join("logs.csv");
        let backup_dir = dir.path().join("backups");

        std::fs::write(&log_path, "2024-04-05,3\n")?;
        let first = export_backup(&log_path, &backup_dir, TEST_MOMENT)?;

        std::fs::write(&log_path, "2024-04-05,0\n")?;
        let second = export_backup(&log_path, &backup_dir, TEST_MOMENT)?;

        assert_eq!(first, second);
        assert_eq!(std::fs::read_to_string(&second)?, "2024-04-05,0\n");
        Ok(())
    }
}
