//! Collects fresh observations from the history files that changed.

use std::collections::BTreeMap;

use crate::history::{HistoryFile, RecordSource};
use crate::models::{LogId, Observation};

use super::registry::StateRegistry;

/// Re-parses changed history files and keeps only what is newer than each
/// log's known most recent timestamp. Never mutates the registry.
#[derive(Debug, Clone)]
pub struct ChangeAggregator<S> {
    source: S,
}

impl<S: RecordSource> ChangeAggregator<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Observations strictly newer than each log's most recent timestamp,
    /// grouped per log and sorted by timestamp.
    ///
    /// Logs with nothing new are left out. Unregistered logs are skipped with
    /// a warning.
    pub fn aggregate(
        &self,
        registry: &StateRegistry,
        changed: &[HistoryFile],
    ) -> BTreeMap<LogId, Vec<Observation>> {
        let mut fresh = BTreeMap::new();

        for file in changed {
            let most_recent = match registry.get(file.id) {
                Ok(state) => state.most_recent_timestamp(),
                Err(e) => {
                    tracing::warn!(log_id = %file.id, path = %file.path.display(), "{e}, skipping");
                    continue;
                }
            };

            let mut observations: Vec<Observation> = self
                .source
                .observations(&file.path)
                .into_iter()
                .filter(|o| Some(o.observed_at) > most_recent)
                .collect();

            if observations.is_empty() {
                continue;
            }

            // Stable: equal timestamps keep file order.
            observations.sort_by_key(|o| o.observed_at);
            fresh
                .entry(file.id)
                .or_insert_with(Vec::new)
                .extend(observations);
        }

        fresh
    }
}
