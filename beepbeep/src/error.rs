//! Error types for the watcher and alert dispatcher.

use std::path::PathBuf;

use crate::models::LogId;

/// Lookup failures in the [`StateRegistry`](crate::watcher::StateRegistry).
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The log was not present at startup and therefore has no state.
    #[error("history log {0} is not registered")]
    NotFound(LogId),
}

/// Failures of a single poll tick.
#[derive(Debug, thiserror::Error)]
pub enum WatchError {
    /// Listing the history directory failed.
    #[error("failed to scan history directory {}: {source:#}", .dir.display())]
    Scan {
        dir: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// The shared cooldown lock was poisoned by a panicking thread.
    #[error("alert dispatcher lock poisoned")]
    DispatcherPoisoned,
}

impl WatchError {
    /// Fatal errors stop the poll loop; everything else is logged and retried
    /// on the next tick.
    pub fn is_fatal(&self) -> bool {
        matches!(self, WatchError::DispatcherPoisoned)
    }
}
