//! Per-log presence state.

use chrono::{DateTime, Utc};
use std::collections::{BTreeSet, HashMap};

use crate::models::{EntityId, LogId, Observation};

/// Presence state for one history file.
///
/// Tracks the most recent timestamp ever accepted and when each commander was
/// last seen. The active set is derived from those two: every commander whose
/// last sighting is at least as recent as the log's most recent timestamp.
#[derive(Debug, Clone)]
pub struct LogState {
    log_id: LogId,
    /// `None` until the first observation is accepted. Never moves backwards.
    most_recent: Option<DateTime<Utc>>,
    entity_last_seen: HashMap<EntityId, DateTime<Utc>>,
    previous_active: BTreeSet<EntityId>,
}

impl LogState {
    /// Build a state from a log's full history. Seeding never counts as a
    /// notification.
    ///
    /// History files aren't guaranteed to be chronological, so the history is
    /// replayed oldest first.
    pub fn seeded(log_id: LogId, history: &[Observation]) -> Self {
        let mut state = Self {
            log_id,
            most_recent: None,
            entity_last_seen: HashMap::new(),
            previous_active: BTreeSet::new(),
        };

        let mut ordered = history.to_vec();
        ordered.sort_by_key(|o| o.observed_at);
        for observation in &ordered {
            state.record(observation);
        }
        state.previous_active = state.active_set();
        state
    }

    pub fn log_id(&self) -> LogId {
        self.log_id
    }

    pub fn most_recent_timestamp(&self) -> Option<DateTime<Utc>> {
        self.most_recent
    }

    /// When `entity_id` was last seen in this log.
    pub fn last_seen(&self, entity_id: EntityId) -> Option<DateTime<Utc>> {
        self.entity_last_seen.get(&entity_id).copied()
    }

    /// Number of distinct commanders ever seen in this log.
    pub fn known_entities(&self) -> usize {
        self.entity_last_seen.len()
    }

    /// Commanders whose last sighting is at or after the most recent timestamp.
    pub fn active_set(&self) -> BTreeSet<EntityId> {
        self.entity_last_seen
            .iter()
            .filter(|(_, seen)| Some(**seen) >= self.most_recent)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Active commanders paired with their last sighting, ordered by id.
    pub fn active_snapshot(&self) -> Vec<Observation> {
        self.active_set()
            .into_iter()
            .filter_map(|id| self.last_seen(id).map(|seen| Observation::new(id, seen)))
            .collect()
    }

    /// Apply a batch of observations and report whether the result is worth
    /// notifying about.
    ///
    /// A batch is notification-worthy when at least one observation either
    /// advanced the most recent timestamp or introduced an unknown commander,
    /// and the resulting active set is not a subset of the previous one.
    /// Observations for the same commander should arrive in non-decreasing
    /// timestamp order; the last one wins.
    pub fn apply(&mut self, observations: &[Observation]) -> bool {
        if observations.is_empty() {
            return false;
        }

        let mut needs_emit = false;
        for observation in observations {
            needs_emit |= self.record(observation);
        }

        // Must use the batch's final timestamp: an earlier observation in the
        // same batch may have gone stale.
        let active = self.active_set();
        let is_subset = active.is_subset(&self.previous_active);
        self.previous_active = active;

        needs_emit && !is_subset
    }

    /// Record one observation; true when it moved the clock or was a stranger.
    fn record(&mut self, observation: &Observation) -> bool {
        let is_timestamp_newer = Some(observation.observed_at) > self.most_recent;
        if is_timestamp_newer {
            tracing::debug!(
                log_id = %self.log_id,
                timestamp = %observation.observed_at,
                "new most recent timestamp"
            );
            self.most_recent = Some(observation.observed_at);
        }

        let is_entity_new = self
            .entity_last_seen
            .insert(observation.entity_id, observation.observed_at)
            .is_none();

        is_timestamp_newer || is_entity_new
    }
}
