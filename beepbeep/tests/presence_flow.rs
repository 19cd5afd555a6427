//! End-to-end tests for the presence watcher
//!
//! These drive the public API the way `beepbeep watch` does: a config file on
//! disk, a CommanderHistory directory with real history files, and polls
//! after the files are rewritten.

use beepbeep::alert::{AlertBackend, AlertKind, Dispatch};
use beepbeep::commands::scan::summarize;
use beepbeep::commands::watch::build_watcher;
use beepbeep::config::Config;
use beepbeep::models::LogId;
use std::fs::{self, File};
use std::path::Path;
use std::time::{Duration, SystemTime};
use tempfile::TempDir;

/// Seconds between 1601-01-01 and 1970-01-01.
const UNIX_OFFSET: i64 = 11_644_473_600;

/// Write a history file. `records` are (commander, unix seconds, interaction).
fn write_history(dir: &Path, id: u64, records: &[(u64, i64, &str)]) {
    let entries: Vec<String> = records
        .iter()
        .map(|(cmdr, secs, interaction)| {
            format!(
                r#"{{"CommanderID": {cmdr}, "Epoch": {}, "Interactions": ["{interaction}"]}}"#,
                UNIX_OFFSET + secs
            )
        })
        .collect();

    let path = dir.join(format!("Commander{id}.cmdrHistory"));
    fs::write(&path, format!(r#"{{"Interactions": [{}]}}"#, entries.join(","))).unwrap();
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(SystemTime::now() + Duration::from_secs(3600))
        .unwrap();
}

fn config_for(history_dir: &Path, config_dir: &Path) -> Config {
    let path = config_dir.join("config.toml");
    fs::write(
        &path,
        format!(
            r#"
history_dir = {:?}
cooldown_secs = 5
alert = "log"
update_check = false

[friends]
WDX = 393577
"#,
            history_dir.display().to_string()
        ),
    )
    .unwrap();

    let config = Config::load(Some(path.as_path())).unwrap();
    config.validate().unwrap();
    config
}

#[test]
fn test_config_file_drives_watcher() {
    let history = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    write_history(history.path(), 1, &[(100, 10, "Met")]);

    let config = config_for(history.path(), config_dir.path());
    assert_eq!(config.alert, AlertBackend::Log);
    assert!(!config.update_check);

    let watcher = build_watcher(&config).unwrap();
    assert_eq!(watcher.registry().len(), 1);
    assert_eq!(watcher.dispatcher().cooldown(), Duration::from_secs(5));
    assert!(watcher.dispatcher().friends().contains(393577));
}

#[test]
fn test_arrival_then_cooldown_then_friend() {
    let history = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    write_history(
        history.path(),
        1,
        &[(100, 10, "Met"), (150, 11, "WingInvite")],
    );
    let config = config_for(history.path(), config_dir.path());
    let mut watcher = build_watcher(&config).unwrap();

    // A stranger shows up.
    write_history(
        history.path(),
        1,
        &[(100, 10, "Met"), (200, 20, "Met")],
    );
    let summary = watcher.poll().unwrap();
    assert_eq!(summary.changes.len(), 1);
    assert_eq!(summary.changes[0].1, Dispatch::Alerted(AlertKind::Standard));

    // Another arrival right away is swallowed by the cooldown.
    write_history(
        history.path(),
        1,
        &[(100, 10, "Met"), (200, 20, "Met"), (393577, 30, "Met")],
    );
    let summary = watcher.poll().unwrap();
    assert_eq!(summary.changes.len(), 1);
    assert_eq!(summary.changes[0].1, Dispatch::Suppressed);

    // State still moved on even though no alert fired.
    let state = watcher.registry().get(LogId(1)).unwrap();
    assert_eq!(
        state.active_set().into_iter().collect::<Vec<_>>(),
        vec![393577]
    );
}

#[test]
fn test_non_met_records_never_alert() {
    let history = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    write_history(history.path(), 1, &[(100, 10, "Met")]);
    let config = config_for(history.path(), config_dir.path());
    let mut watcher = build_watcher(&config).unwrap();

    write_history(
        history.path(),
        1,
        &[(100, 10, "Met"), (300, 40, "Killed")],
    );
    let summary = watcher.poll().unwrap();
    assert_eq!(summary.modified_files, 1);
    assert!(summary.changes.is_empty());
}

#[test]
fn test_scan_summary_over_directory() {
    let history = TempDir::new().unwrap();
    let config_dir = TempDir::new().unwrap();
    write_history(
        history.path(),
        7,
        &[(1, 10, "Met"), (2, 20, "Met"), (3, 20, "Met")],
    );
    fs::write(history.path().join("Commander8.cmdrHistory"), "garbage").unwrap();
    fs::write(history.path().join("readme.txt"), "not a log").unwrap();

    let config = config_for(history.path(), config_dir.path());
    let watcher = build_watcher(&config).unwrap();
    let summaries = summarize(watcher.registry());

    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[0].log_id, LogId(7));
    assert_eq!(summaries[0].active, vec![2, 3]);
    assert_eq!(summaries[1].log_id, LogId(8));
    assert_eq!(summaries[1].known, 0);
}
