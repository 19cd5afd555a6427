//! Startup check for a newer published version.
//!
//! Fetches a plain-text version file and compares it with the running build.
//! Never fatal: failures are reported and the caller carries on.

pub(crate) mod client;


use anyhow::{Context, Result};
use colored::Colorize;

use crate::models::constants::update::{DOWNLOAD_URL, MAX_VERSION_SIZE, RELEASE, VERSION_URL};
use client::{create_http_client, download_text_with_limit, validate_response_status};

/// Outcome of comparing the running build with the published one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    UpToDate,
    Available { current: u64, latest: u64 },
    /// Running something newer than what is published (dev builds).
    Ahead { current: u64, latest: u64 },
}

/// Parse the published release number. The version file holds a single
/// integer, optionally followed by a newline.
pub fn parse_published_release(text: &str) -> Result<u64> {
    let trimmed = text.trim();
    trimmed
        .parse::<u64>()
        .with_context(|| format!("Invalid published release: {trimmed:?}"))
}

pub fn compare_releases(current: u64, published: &str) -> Result<UpdateStatus> {
    let latest = parse_published_release(published)?;

    Ok(match latest.cmp(&current) {
        std::cmp::Ordering::Greater => UpdateStatus::Available { current, latest },
        std::cmp::Ordering::Equal => UpdateStatus::UpToDate,
        std::cmp::Ordering::Less => UpdateStatus::Ahead { current, latest },
    })
}

/// Fetch the published version from `url` and compare it with this build.
pub fn check(url: &str) -> Result<UpdateStatus> {
    let client = create_http_client()?;
    let response = client
        .get(url)
        .send()
        .context("Failed to check for updates")?;

    validate_response_status(&response, "Failed to fetch version file")?;
    let published = download_text_with_limit(response, MAX_VERSION_SIZE, "Version file")?;

    compare_releases(RELEASE, &published)
}

/// Print the outcome of a check.
pub fn report(status: &UpdateStatus) {
    match status {
        UpdateStatus::Available { current, latest } => {
            let rule = "*".repeat(20);
            println!("{}", rule.yellow());
            println!(
                "There is a new update available! Current local version is {}, available version is {}.",
                current.to_string().dimmed(),
                latest.to_string().green().bold()
            );
            println!("Download at {DOWNLOAD_URL}");
            println!("{}", rule.yellow());
        }
        UpdateStatus::UpToDate => {
            println!("{} This version is up to date.", "✓".green().bold());
        }
        UpdateStatus::Ahead { current, latest } => {
            println!(
                "Running {current}, which is newer than the published {latest}."
            );
        }
    }
}

/// Best-effort check used on startup.
pub fn check_on_startup() {
    match check(VERSION_URL) {
        Ok(status) => report(&status),
        Err(e) => {
            let error = format!("{e:#}");
            tracing::warn!(%error, "Failed to check for an update");
        }
    }
}

/// `beepbeep check-update`
pub fn execute() -> Result<()> {
    println!("{}", "Checking for updates...".blue());
    let status = check(VERSION_URL)?;
    report(&status);
    Ok(())
}
