use super::{EntityId, LogId, Observation};

/// A log's active set changed in a way worth alerting about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenceChange {
    pub log_id: LogId,
    /// Active commanders after the change, with their last sighting.
    pub active: Vec<Observation>,
}

impl PresenceChange {
    pub fn entity_ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.active.iter().map(|o| o.entity_id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
