//! Discovery of `Commander<digits>.cmdrHistory` files.

use anyhow::{Context, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::models::LogId;

/// A history file found on disk together with the id parsed from its name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFile {
    pub id: LogId,
    pub path: PathBuf,
}

fn history_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^Commander(\d+)\.cmdrHistory$").expect("history file regex is valid")
    })
}

/// Parse the log id out of a history file name.
///
/// Returns `None` for names that don't follow the `Commander<digits>.cmdrHistory`
/// pattern, and for digit runs too large to be an id.
pub fn parse_history_file_name(name: &str) -> Option<LogId> {
    let caps = history_name_regex().captures(name)?;
    match caps[1].parse::<u64>() {
        Ok(id) => Some(LogId(id)),
        Err(e) => {
            tracing::warn!(file = name, error = %e, "history file id out of range, skipping");
            None
        }
    }
}

/// List the history files in `dir`, sorted by id.
///
/// Only plain files are considered; directories that happen to match the
/// naming pattern are ignored.
pub fn discover_history_files(dir: &Path) -> Result<Vec<HistoryFile>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read history directory: {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };

        if let Some(id) = parse_history_file_name(name) {
            files.push(HistoryFile { id, path });
        }
    }

    files.sort_by_key(|f| f.id);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_valid_name() {
        assert_eq!(
            parse_history_file_name("Commander2482731.cmdrHistory"),
            Some(LogId(2482731))
        );
    }

    #[test]
    fn test_parse_rejects_other_names() {
        assert_eq!(parse_history_file_name("Commander.cmdrHistory"), None);
        assert_eq!(parse_history_file_name("Commander12.cmdrHistory.bak"), None);
        assert_eq!(parse_history_file_name("commander12.cmdrHistory"), None);
        assert_eq!(parse_history_file_name("Commander12a.cmdrHistory"), None);
        assert_eq!(parse_history_file_name("Journal.2024-01-01.log"), None);
    }

    #[test]
    fn test_parse_rejects_overflowing_id() {
        assert_eq!(
            parse_history_file_name("Commander99999999999999999999999.cmdrHistory"),
            None
        );
    }

    #[test]
    fn test_discover_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path();
        fs::write(dir.join("Commander30.cmdrHistory"), "{}").unwrap();
        fs::write(dir.join("Commander4.cmdrHistory"), "{}").unwrap();
        fs::write(dir.join("notes.txt"), "").unwrap();
        fs::create_dir(dir.join("Commander7.cmdrHistory")).unwrap();

        let files = discover_history_files(dir).unwrap();
        let ids: Vec<LogId> = files.iter().map(|f| f.id).collect();
        assert_eq!(ids, vec![LogId(4), LogId(30)]);
        assert_eq!(files[0].path, dir.join("Commander4.cmdrHistory"));
    }

    #[test]
    fn test_discover_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        assert!(discover_history_files(&temp.path().join("nope")).is_err());
    }
}
