//! Timestamped copies taken before a save overwrites the working file.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use taskdeck_core::TaskdeckResult;

pub const BACKUP_EXTENSION: &str = "bak";
const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `dir/tasks.json` at 2024-03-05 14:07:09 → `dir/tasks_20240305_140709.bak`.
pub fn backup_path(path: &Path, at: NaiveDateTime) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!(
        "{}_{}.{}",
        stem,
        at.format(TIMESTAMP_FORMAT),
        BACKUP_EXTENSION
    );
    path.with_file_name(name)
}

/// Copies `path` verbatim next to itself. Returns `Ok(None)` when there is
/// nothing to back up.
pub fn backup_file(path: &Path, at: NaiveDateTime) -> TaskdeckResult<Option<PathBuf>> {
    if !path.is_file() {
        return Ok(None);
    }
    let target = backup_path(path, at);
    std::fs::copy(path, &target)?;
    tracing::info!("Created backup at {}", target.display());
    Ok(Some(target))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(14, 7, 9))
            .unwrap()
    }

    #[test]
    fn test_backup_path_format() {
        let path = Path::new("data/tasks.json");
        assert_eq!(
            backup_path(path, at()),
            PathBuf::from("data/tasks_20240305_140709.bak")
        );
    }

    #[test]
    fn test_backup_copies_content() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{\"a\": 1}").unwrap();

        let backup = backup_file(&path, at()).unwrap().unwrap();
        assert_eq!(backup.parent(), Some(dir.path()));
        assert_eq!(std::fs::read_to_string(backup).unwrap(), "{\"a\": 1}");
    }

    #[test]
    fn test_no_backup_without_original() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        assert_eq!(backup_file(&path, at()).unwrap(), None);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
