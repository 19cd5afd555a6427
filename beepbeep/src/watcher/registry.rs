//! Registry owning one [`LogState`] per history file discovered at startup.

use std::collections::BTreeMap;

use crate::history::{HistoryFile, RecordSource};
use crate::models::{LogId, Observation};

use crate::error::RegistryError;
use super::state::LogState;

/// All per-log states, keyed by log id.
///
/// Only populated at startup; logs that appear afterwards are not registered.
#[derive(Debug, Default)]
pub struct StateRegistry {
    states: BTreeMap<LogId, LogState>,
}

impl StateRegistry {
    /// Seed one state per log from its full history. Nothing is notified.
    pub fn initialize<I>(histories: I) -> Self
    where
        I: IntoIterator<Item = (LogId, Vec<Observation>)>,
    {
        let states = histories
            .into_iter()
            .map(|(log_id, history)| {
                tracing::debug!(%log_id, observations = history.len(), "seeding history state");
                (log_id, LogState::seeded(log_id, &history))
            })
            .collect();

        Self { states }
    }

    /// Read every discovered file through `source` and seed the registry.
    pub fn from_files<S: RecordSource + ?Sized>(files: &[HistoryFile], source: &S) -> Self {
        Self::initialize(
            files
                .iter()
                .map(|file| (file.id, source.observations(&file.path))),
        )
    }

    pub fn get(&self, log_id: LogId) -> Result<&LogState, RegistryError> {
        self.states
            .get(&log_id)
            .ok_or(RegistryError::NotFound(log_id))
    }

    pub fn get_mut(&mut self, log_id: LogId) -> Result<&mut LogState, RegistryError> {
        self.states
            .get_mut(&log_id)
            .ok_or(RegistryError::NotFound(log_id))
    }

    pub fn contains(&self, log_id: LogId) -> bool {
        self.states.contains_key(&log_id)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Total commanders known across all logs (a commander seen in two logs counts twice).
    pub fn known_entities(&self) -> usize {
        self.states.values().map(LogState::known_entities).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogState> {
        self.states.values()
    }
}
