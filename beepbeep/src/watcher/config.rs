//! Configuration for the watcher

use std::path::PathBuf;
use std::time::Duration;

use crate::config::Config;
use crate::models::constants::DEFAULT_POLL_INTERVAL_SECS;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    pub history_dir: PathBuf,
    pub poll_interval: Duration,
}

impl WatcherConfig {
    pub fn new(history_dir: PathBuf) -> Self {
        Self {
            history_dir,
            poll_interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
        }
    }
}

impl From<&Config> for WatcherConfig {
    fn from(config: &Config) -> Self {
        Self {
            history_dir: config.history_dir.clone(),
            poll_interval: config.poll_interval(),
        }
    }
}
