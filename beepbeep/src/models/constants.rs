/// Default minimum gap between two accepted alerts, in seconds.
pub const DEFAULT_COOLDOWN_SECS: u64 = 5;

/// Default interval between two polls of the history directory, in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 1;

/// Interaction marker that turns a history record into an observation.
pub const MET_INTERACTION: &str = "Met";

/// Environment variable that overrides the default history directory.
pub const HISTORY_DIR_ENV: &str = "BEEPBEEP_HISTORY_DIR";

/// Where the game keeps its per-commander history files, relative to the
/// platform's local data directory.
pub const HISTORY_DIR_SEGMENTS: [&str; 3] =
    ["Frontier Developments", "Elite Dangerous", "CommanderHistory"];

/// Friendly commanders shipped in the default configuration.
pub const DEFAULT_FRIENDS: [(&str, u64); 2] = [("St4rF0x", 2039432), ("WDX", 393577)];

/// Update check settings.
pub mod update {
    /// Release number of this build. The published version file holds the
    /// latest release as a bare integer in the same numbering.
    pub const RELEASE: u64 = 1;

    /// Plain-text file holding the most recently published version.
    pub const VERSION_URL: &str =
        "https://raw.githubusercontent.com/CMDR-WDX/elite-beepbeep/master/version";

    /// Where users are sent to download a newer build.
    pub const DOWNLOAD_URL: &str = "https://github.com/CMDR-WDX/elite-beepbeep";

    /// A version file is a handful of bytes; anything beyond this is rejected.
    pub const MAX_VERSION_SIZE: u64 = 1024;
}
