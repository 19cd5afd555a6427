//! Observation value type shared by the history reader and the watcher.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Commander id of another player seen in a history file.
pub type EntityId = u64;

/// Numeric id parsed from a `Commander<digits>.cmdrHistory` file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LogId(pub u64);

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One "met" record: who was seen, and when.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub entity_id: EntityId,
    pub observed_at: DateTime<Utc>,
}

impl Observation {
    pub fn new(entity_id: EntityId, observed_at: DateTime<Utc>) -> Self {
        Self {
            entity_id,
            observed_at,
        }
    }
}
