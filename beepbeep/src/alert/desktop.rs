//! Desktop notification alerts.
//!
//! Uses notify-send on Linux and osascript on macOS.

use std::process::Command;

use super::sink::AlertSink;

/// Sends a desktop notification instead of beeping.
#[derive(Debug, Default)]
pub struct DesktopAlert;

impl AlertSink for DesktopAlert {
    fn standard(&self) {
        send_desktop_notification("beepbeep: New CMDR in instance", "Someone just showed up.");
    }

    fn friendly(&self) {
        send_desktop_notification(
            "beepbeep: Friend in instance",
            "A friend of yours is trying to steal your ganks.",
        );
    }
}

/// Send a desktop notification.
///
/// Failures are logged but never propagated - notifications are best-effort.
pub fn send_desktop_notification(title: &str, body: &str) {
    let result = if cfg!(target_os = "macos") {
        run_notifier("osascript", &["-e".to_string(), macos_script(title, body)])
    } else {
        run_notifier(
            "notify-send",
            &[
                "--urgency=critical".to_string(),
                "--app-name=beepbeep".to_string(),
                title.to_string(),
                body.to_string(),
            ],
        )
    };

    if let Err(e) = result {
        tracing::warn!(error = %e, "desktop notification failed");
    }
}

fn macos_script(title: &str, body: &str) -> String {
    format!(
        r#"display notification "{}" with title "{}""#,
        body.replace('"', r#"\""#),
        title.replace('"', r#"\""#)
    )
}

fn run_notifier(program: &str, args: &[String]) -> Result<(), String> {
    Command::new(program)
        .args(args)
        .output()
        .map_err(|e| format!("{program} failed: {e}"))
        .and_then(|output| {
            if output.status.success() {
                Ok(())
            } else {
                Err(format!("{program} exited with: {}", output.status))
            }
        })
}
