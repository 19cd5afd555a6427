//! Core Watcher implementation

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use crate::alert::Dispatcher;
use crate::error::WatchError;
use crate::history::{discover_history_files, ChangeDetector, RecordSource};
use crate::models::PresenceChange;

use super::aggregator::ChangeAggregator;
use super::config::WatcherConfig;
use super::events::PollSummary;
use super::registry::StateRegistry;

/// Owns the registry and drives it from the poll loop.
pub struct Watcher<S> {
    config: WatcherConfig,
    registry: StateRegistry,
    aggregator: ChangeAggregator<S>,
    detector: ChangeDetector,
    dispatcher: Dispatcher,
}

impl<S: RecordSource> Watcher<S> {
    /// Scan the history directory once and seed a state for every log found.
    ///
    /// Only these logs are ever watched; files created later are ignored.
    pub fn start(config: WatcherConfig, source: S, dispatcher: Dispatcher) -> Result<Self> {
        // Captured before reading so writes during the initial scan still count
        // as modified on the first tick.
        let detector = ChangeDetector::new();
        let files = discover_history_files(&config.history_dir)?;
        let registry = StateRegistry::from_files(&files, &source);

        Ok(Self::from_parts(
            config,
            registry,
            ChangeAggregator::new(source),
            detector,
            dispatcher,
        ))
    }

    pub fn from_parts(
        config: WatcherConfig,
        registry: StateRegistry,
        aggregator: ChangeAggregator<S>,
        detector: ChangeDetector,
        dispatcher: Dispatcher,
    ) -> Self {
        Self {
            config,
            registry,
            aggregator,
            detector,
            dispatcher,
        }
    }

    pub fn registry(&self) -> &StateRegistry {
        &self.registry
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    /// Run one tick: find modified logs, apply their fresh observations and
    /// dispatch whatever is notification-worthy.
    pub fn poll(&mut self) -> Result<PollSummary, WatchError> {
        let checked_at = SystemTime::now();
        let files = discover_history_files(&self.config.history_dir).map_err(|source| {
            WatchError::Scan {
                dir: self.config.history_dir.clone(),
                source,
            }
        })?;

        let modified = self.detector.changed_files(&files, checked_at);
        let mut summary = PollSummary {
            modified_files: modified.len(),
            changes: Vec::new(),
        };
        tracing::debug!(count = modified.len(), "history files modified");

        if modified.is_empty() {
            tracing::debug!("No newly modified history file");
            return Ok(summary);
        }

        let fresh = self.aggregator.aggregate(&self.registry, &modified);
        if fresh.is_empty() {
            tracing::debug!("History file modified, but no new CMDR entries");
            return Ok(summary);
        }

        for (log_id, observations) in fresh {
            let state = match self.registry.get_mut(log_id) {
                Ok(state) => state,
                Err(e) => {
                    tracing::warn!(%log_id, "{e}, skipping");
                    continue;
                }
            };

            if !state.apply(&observations) {
                tracing::debug!(%log_id, "active set unchanged or shrinking");
                continue;
            }

            let change = PresenceChange {
                log_id,
                active: state.active_snapshot(),
            };
            let dispatch = self.dispatcher.dispatch(&change)?;
            summary.changes.push((change, dispatch));
        }

        Ok(summary)
    }

    /// Poll every `poll_interval` until `running` is cleared.
    ///
    /// A failed tick is logged and the loop carries on; only fatal errors end it.
    pub fn run(&mut self, running: &AtomicBool) -> Result<(), WatchError> {
        tracing::info!(
            logs = self.registry.len(),
            commanders = self.registry.known_entities(),
            dir = %self.config.history_dir.display(),
            "Ready and polling"
        );

        while running.load(Ordering::SeqCst) {
            std::thread::sleep(self.config.poll_interval);
            if !running.load(Ordering::SeqCst) {
                break;
            }

            tracing::debug!("Start new poll");
            match self.poll() {
                Ok(summary) if !summary.changes.is_empty() => {
                    tracing::debug!(
                        changes = summary.changes.len(),
                        alerts = summary.alerts(),
                        "poll finished"
                    );
                }
                Ok(_) => {}
                Err(e) if e.is_fatal() => {
                    tracing::error!(error = %e, "unrecoverable error in poll loop");
                    return Err(e);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Something broke in the poll loop, retrying next tick");
                }
            }
        }

        tracing::info!("Stopped polling");
        Ok(())
    }
}
