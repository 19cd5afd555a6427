//! `beepbeep scan`: one-shot view of every history log and who is in it.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

use crate::alert::FriendlySet;
use crate::config::Config;
use crate::history::{discover_history_files, JsonRecordSource};
use crate::models::{EntityId, LogId};
use crate::watcher::StateRegistry;

/// One log's line in the scan output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogSummary {
    pub log_id: LogId,
    pub most_recent: Option<DateTime<Utc>>,
    pub known: usize,
    pub active: Vec<EntityId>,
}

pub fn summarize(registry: &StateRegistry) -> Vec<LogSummary> {
    registry
        .iter()
        .map(|state| LogSummary {
            log_id: state.log_id(),
            most_recent: state.most_recent_timestamp(),
            known: state.known_entities(),
            active: state.active_set().into_iter().collect(),
        })
        .collect()
}

/// Machine-readable form of the scan, one object per log.
pub fn render_json(summaries: &[LogSummary]) -> Result<String> {
    serde_json::to_string_pretty(summaries).context("Failed to serialize scan summary")
}

pub fn execute(config: Config, json: bool) -> Result<()> {
    let files = discover_history_files(&config.history_dir).with_context(|| {
        format!("Failed to scan {}", config.history_dir.display())
    })?;
    let registry = StateRegistry::from_files(&files, &JsonRecordSource);

    if json {
        println!("{}", render_json(&summarize(&registry))?);
        return Ok(());
    }

    let friends = config.friendly_set();

    println!(
        "{} {}",
        "History directory:".bold(),
        config.history_dir.display()
    );

    if registry.is_empty() {
        println!("{}", "No commander history files found.".yellow());
        return Ok(());
    }

    for summary in summarize(&registry) {
        print_summary(&summary, &friends);
    }

    println!(
        "\n{} logs, {} commanders in cache",
        registry.len(),
        registry.known_entities()
    );
    Ok(())
}

fn print_summary(summary: &LogSummary, friends: &FriendlySet) {
    let last = summary
        .most_recent
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| "never".to_string());

    println!(
        "\n{} {}  {} {}  {} known",
        "Log".bold(),
        summary.log_id.to_string().cyan(),
        "last met:".dimmed(),
        last,
        summary.known
    );

    if summary.active.is_empty() {
        println!("  {}", "(nobody)".dimmed());
        return;
    }

    for id in &summary.active {
        if friends.contains(*id) {
            println!("  {} {}", "♥".green(), friends.display_name(*id).green());
        } else {
            println!("  {} {}", "•".red(), id);
        }
    }
}
