//! Alert primitives.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::time::Duration;

use super::desktop::DesktopAlert;

/// One beep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tone {
    pub frequency_hz: u32,
    pub duration: Duration,
}

impl Tone {
    const fn new(frequency_hz: u32, millis: u64) -> Self {
        Self {
            frequency_hz,
            duration: Duration::from_millis(millis),
        }
    }
}

const STANDARD_TONES: [Tone; 2] = [Tone::new(500, 200), Tone::new(700, 200)];
const FRIENDLY_TONES: [Tone; 3] = [Tone::new(700, 200), Tone::new(500, 200), Tone::new(400, 200)];

/// Which alert to raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    /// Someone not on the friends list showed up.
    Standard,
    /// Only friends showed up.
    Friendly,
}

impl AlertKind {
    /// Rising pair for strangers, falling triple for friends.
    pub fn tones(self) -> &'static [Tone] {
        match self {
            AlertKind::Standard => &STANDARD_TONES,
            AlertKind::Friendly => &FRIENDLY_TONES,
        }
    }
}

/// Fire-and-forget alert output.
pub trait AlertSink: Send + Sync {
    fn standard(&self);
    fn friendly(&self);

    fn play(&self, kind: AlertKind) {
        match kind {
            AlertKind::Standard => self.standard(),
            AlertKind::Friendly => self.friendly(),
        }
    }
}

/// Rings the terminal bell once per tone.
///
/// Terminals can't pick a pitch, so only the rhythm of the sequence survives.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl TerminalBell {
    fn ring(&self, tones: &[Tone]) {
        let mut stdout = std::io::stdout();
        for tone in tones {
            if let Err(e) = stdout.write_all(b"\x07").and_then(|_| stdout.flush()) {
                tracing::warn!(error = %e, "failed to ring terminal bell");
                return;
            }
            std::thread::sleep(tone.duration);
        }
    }
}

impl AlertSink for TerminalBell {
    fn standard(&self) {
        self.ring(AlertKind::Standard.tones());
    }

    fn friendly(&self) {
        self.ring(AlertKind::Friendly.tones());
    }
}

/// Writes a log line instead of making noise.
#[derive(Debug, Default)]
pub struct LogAlert;

impl AlertSink for LogAlert {
    fn standard(&self) {
        tracing::info!(alert = "standard", "BEEP BEEP");
    }

    fn friendly(&self) {
        tracing::info!(alert = "friendly", "beep beep beep");
    }
}

/// Alert output selected in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AlertBackend {
    #[default]
    Bell,
    Desktop,
    Log,
}

impl AlertBackend {
    pub fn into_sink(self) -> Box<dyn AlertSink> {
        match self {
            AlertBackend::Bell => Box::new(TerminalBell),
            AlertBackend::Desktop => Box::new(DesktopAlert),
            AlertBackend::Log => Box::new(LogAlert),
        }
    }
}

impl std::fmt::Display for AlertBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertBackend::Bell => write!(f, "bell"),
            AlertBackend::Desktop => write!(f, "desktop"),
            AlertBackend::Log => write!(f, "log"),
        }
    }
}
