//! Modification-time based change detection.
//!
//! Purely a performance filter: it decides which history files are worth
//! re-parsing on a given tick.

use std::path::Path;
use std::time::SystemTime;

use super::discovery::HistoryFile;

/// Remembers when the previous check happened and reports files modified since.
#[derive(Debug, Clone)]
pub struct ChangeDetector {
    last_checked: SystemTime,
}

impl ChangeDetector {
    /// Start detecting changes from now on.
    pub fn new() -> Self {
        Self::since(SystemTime::now())
    }

    /// Start detecting changes made after `instant`.
    pub fn since(instant: SystemTime) -> Self {
        Self {
            last_checked: instant,
        }
    }

    pub fn last_checked(&self) -> SystemTime {
        self.last_checked
    }

    /// Return the files whose mtime is strictly newer than the previous check,
    /// then move the check point to `checked_at`.
    ///
    /// `checked_at` should be captured before the directory was listed so that
    /// writes landing mid-scan are picked up on the next tick.
    pub fn changed_files(
        &mut self,
        files: &[HistoryFile],
        checked_at: SystemTime,
    ) -> Vec<HistoryFile> {
        let changed = files
            .iter()
            .filter(|file| is_modified_after(&file.path, self.last_checked))
            .cloned()
            .collect();

        self.last_checked = checked_at;
        changed
    }
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether the file at `path` was modified strictly after `instant`.
///
/// Files that can't be stat'ed are reported as unchanged.
pub fn is_modified_after(path: &Path, instant: SystemTime) -> bool {
    match std::fs::metadata(path).and_then(|m| m.modified()) {
        Ok(modified) => modified > instant,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read modification time");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LogId;
    use std::fs::{self, File};
    use std::time::Duration;
    use tempfile::TempDir;

    fn touch(path: &Path, modified: SystemTime) {
        fs::write(path, "{}").unwrap();
        File::options()
            .write(true)
            .open(path)
            .unwrap()
            .set_modified(modified)
            .unwrap();
    }

    #[test]
    fn test_reports_only_newer_files() {
        let temp = TempDir::new().unwrap();
        let base = SystemTime::now();

        let old = temp.path().join("Commander1.cmdrHistory");
        let new = temp.path().join("Commander2.cmdrHistory");
        touch(&old, base - Duration::from_secs(60));
        touch(&new, base + Duration::from_secs(60));

        let files = vec![
            HistoryFile { id: LogId(1), path: old },
            HistoryFile { id: LogId(2), path: new.clone() },
        ];

        let mut detector = ChangeDetector::since(base);
        let changed = detector.changed_files(&files, base + Duration::from_secs(120));
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].path, new);

        // Check point moved past both files.
        assert!(detector
            .changed_files(&files, base + Duration::from_secs(130))
            .is_empty());
        assert_eq!(detector.last_checked(), base + Duration::from_secs(130));
    }

    #[test]
    fn test_equal_mtime_is_not_newer() {
        let temp = TempDir::new().unwrap();
        let base = SystemTime::now();
        let path = temp.path().join("Commander1.cmdrHistory");
        touch(&path, base);

        assert!(!is_modified_after(&path, base));
    }

    #[test]
    fn test_missing_file_is_unchanged() {
        let temp = TempDir::new().unwrap();
        assert!(!is_modified_after(
            &temp.path().join("gone.cmdrHistory"),
            SystemTime::UNIX_EPOCH
        ));
    }
}
