//! User configuration loaded from `config.toml`.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::alert::{AlertBackend, FriendlySet};
use crate::models::constants::{
    DEFAULT_COOLDOWN_SECS, DEFAULT_FRIENDS, DEFAULT_POLL_INTERVAL_SECS, HISTORY_DIR_ENV,
    HISTORY_DIR_SEGMENTS,
};
use crate::models::EntityId;

/// Effective configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the `Commander<id>.cmdrHistory` files.
    pub history_dir: PathBuf,
    /// Minimum gap between two alerts, in seconds.
    pub cooldown_secs: u64,
    /// How often to look for modified history files, in seconds.
    pub poll_interval_secs: u64,
    pub alert: AlertBackend,
    /// Check for a newer release on startup.
    pub update_check: bool,
    /// Display name to commander id. Friends get the friendly tone.
    pub friends: BTreeMap<String, EntityId>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_dir: default_history_dir(),
            cooldown_secs: DEFAULT_COOLDOWN_SECS,
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            alert: AlertBackend::default(),
            update_check: true,
            friends: DEFAULT_FRIENDS
                .iter()
                .map(|(name, id)| (name.to_string(), *id))
                .collect(),
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub history_dir: Option<PathBuf>,
    pub cooldown_secs: Option<u64>,
    pub poll_interval_secs: Option<u64>,
    pub alert: Option<AlertBackend>,
    pub no_update_check: bool,
}

impl Config {
    /// Load from `path`, or from the default location when `path` is `None`.
    ///
    /// An explicit path must exist. A missing default file means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Invalid config.toml")?;
        Ok(config)
    }

    pub fn apply(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(dir) = overrides.history_dir {
            self.history_dir = dir;
        }
        if let Some(secs) = overrides.cooldown_secs {
            self.cooldown_secs = secs;
        }
        if let Some(secs) = overrides.poll_interval_secs {
            self.poll_interval_secs = secs;
        }
        if let Some(alert) = overrides.alert {
            self.alert = alert;
        }
        if overrides.no_update_check {
            self.update_check = false;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.cooldown_secs == 0 {
            bail!("cooldown_secs must be a positive number of seconds");
        }
        if self.poll_interval_secs == 0 {
            bail!("poll_interval_secs must be a positive number of seconds");
        }
        Ok(())
    }

    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn friendly_set(&self) -> FriendlySet {
        FriendlySet::from_named(&self.friends)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Write this config to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "Config file already exists: {} (use --force to overwrite)",
                path.display()
            );
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }
}

/// `<config dir>/beepbeep/config.toml`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("beepbeep").join("config.toml"))
}

/// The game's CommanderHistory directory under the local data dir, unless
/// `BEEPBEEP_HISTORY_DIR` says otherwise.
pub fn default_history_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(HISTORY_DIR_ENV) {
        return PathBuf::from(dir);
    }

    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    HISTORY_DIR_SEGMENTS
        .iter()
        .fold(base, |path, segment| path.join(segment))
}
