//! Cooldown-gated alert dispatch.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::error::WatchError;
use crate::models::PresenceChange;

use super::friendly::FriendlySet;
use super::sink::{AlertKind, AlertSink};

/// What the dispatcher did with a presence change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// An alert of this kind was played.
    Alerted(AlertKind),
    /// Dropped: an alert already fired inside the cooldown window.
    Suppressed,
    /// Dropped: nobody is in the snapshot.
    Empty,
}

/// Turns presence changes from any log into at most one alert per cooldown
/// window.
///
/// The window is shared across all logs. `last_alert` sits behind a mutex so
/// the window holds even if several logs are updated from different threads.
pub struct Dispatcher {
    cooldown: Duration,
    friends: FriendlySet,
    sink: Box<dyn AlertSink>,
    last_alert: Mutex<Option<Instant>>,
}

impl Dispatcher {
    pub fn new(cooldown: Duration, friends: FriendlySet, sink: Box<dyn AlertSink>) -> Self {
        Self {
            cooldown,
            friends,
            sink,
            last_alert: Mutex::new(None),
        }
    }

    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    pub fn friends(&self) -> &FriendlySet {
        &self.friends
    }

    pub fn dispatch(&self, change: &PresenceChange) -> Result<Dispatch, WatchError> {
        self.dispatch_at(change, Instant::now())
    }

    /// Dispatch as if the change arrived at `now`.
    pub fn dispatch_at(
        &self,
        change: &PresenceChange,
        now: Instant,
    ) -> Result<Dispatch, WatchError> {
        if change.is_empty() {
            tracing::debug!(log_id = %change.log_id, "empty presence change, nothing to alert");
            return Ok(Dispatch::Empty);
        }

        {
            let mut last_alert = self
                .last_alert
                .lock()
                .map_err(|_| WatchError::DispatcherPoisoned)?;

            if let Some(last) = *last_alert {
                if now.saturating_duration_since(last) <= self.cooldown {
                    tracing::debug!(log_id = %change.log_id, "alert suppressed by cooldown");
                    return Ok(Dispatch::Suppressed);
                }
            }
            *last_alert = Some(now);
        }

        let kind = if self.friends.all_friendly(change.entity_ids()) {
            AlertKind::Friendly
        } else {
            AlertKind::Standard
        };

        self.announce(change, kind);
        self.sink.play(kind);
        Ok(Dispatch::Alerted(kind))
    }

    fn announce(&self, change: &PresenceChange, kind: AlertKind) {
        match kind {
            AlertKind::Friendly => tracing::info!(
                log_id = %change.log_id,
                "A friend of yours is trying to steal your ganks"
            ),
            AlertKind::Standard => tracing::info!(log_id = %change.log_id, "New CMDR in instance"),
        }

        for id in change.entity_ids() {
            if self.friends.contains(id) {
                tracing::info!(
                    "CMDR {} came to steal your kills",
                    self.friends.display_name(id)
                );
            } else {
                tracing::info!("CMDR w/ ID {id} joined the instance");
            }
        }
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("cooldown", &self.cooldown)
            .field("friends", &self.friends)
            .finish_non_exhaustive()
    }
}
