//! `beepbeep watch`: poll the history directory and alert on new arrivals.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::alert::Dispatcher;
use crate::commands::update_check;
use crate::config::Config;
use crate::history::JsonRecordSource;
use crate::watcher::{Watcher, WatcherConfig};

/// Build the watcher from `config` and poll until Ctrl+C.
pub fn execute(config: Config) -> Result<()> {
    config.validate()?;

    if config.update_check {
        update_check::check_on_startup();
    }

    let mut watcher = build_watcher(&config)?;

    let running = Arc::new(AtomicBool::new(true));
    let running_for_signal = running.clone();
    ctrlc::set_handler(move || {
        running_for_signal.store(false, Ordering::SeqCst);
    })
    .context("Failed to set Ctrl+C handler")?;

    watcher.run(&running)?;
    Ok(())
}

/// Seed the registry from the configured history directory.
pub fn build_watcher(config: &Config) -> Result<Watcher<JsonRecordSource>> {
    let friends = config.friendly_set();
    tracing::info!(
        cooldown_secs = config.cooldown_secs,
        poll_interval_secs = config.poll_interval_secs,
        alert = %config.alert,
        friends = friends.len(),
        "configuration loaded"
    );

    let dispatcher = Dispatcher::new(config.cooldown(), friends, config.alert.into_sink());
    Watcher::start(WatcherConfig::from(config), JsonRecordSource, dispatcher).with_context(|| {
        format!(
            "Failed to start watching {}",
            config.history_dir.display()
        )
    })
}
