use crate::alert::Dispatch;
use crate::models::PresenceChange;

/// What happened during one poll tick.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PollSummary {
    /// History files whose mtime moved since the previous tick.
    pub modified_files: usize,
    /// Notification-worthy changes, each paired with what the dispatcher did.
    pub changes: Vec<(PresenceChange, Dispatch)>,
}

impl PollSummary {
    pub fn alerts(&self) -> usize {
        self.changes
            .iter()
            .filter(|(_, dispatch)| matches!(dispatch, Dispatch::Alerted(_)))
            .count()
    }
}
