//! Reading observations out of `.cmdrHistory` JSON files.
//!
//! A history file looks like:
//!
//! ```json
//! { "Interactions": [ { "CommanderID": 393577, "Epoch": 13350000000, "Interactions": ["Met"] } ] }
//! ```
//!
//! `Epoch` counts seconds since 1601-01-01 UTC. Only records tagged `Met`
//! become observations.

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use serde::Deserialize;
use std::path::Path;

use crate::models::constants::MET_INTERACTION;
use crate::models::Observation;

/// Source of observations for one history file.
///
/// Implementations must never fail: an unreadable or malformed file yields
/// an empty list.
pub trait RecordSource {
    fn observations(&self, path: &Path) -> Vec<Observation>;
}

/// Reads history files from disk as JSON.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRecordSource;

impl RecordSource for JsonRecordSource {
    fn observations(&self, path: &Path) -> Vec<Observation> {
        let parsed = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read history file: {}", path.display()))
            .and_then(|content| parse_history(&content));

        match parsed {
            Ok(observations) => observations,
            Err(e) => {
                let error = format!("{e:#}");
                tracing::warn!(path = %path.display(), %error, "failed to parse history file, skipping");
                Vec::new()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct HistoryDocument {
    #[serde(rename = "Interactions")]
    interactions: Vec<serde_json::Value>,
}

/// Typed view of a record, only built once the record is known to be a `Met`.
#[derive(Debug, Deserialize)]
struct MetRecord {
    #[serde(rename = "CommanderID")]
    commander_id: u64,
    #[serde(rename = "Epoch")]
    epoch: i64,
}

fn is_met(record: &serde_json::Value) -> bool {
    record
        .get("Interactions")
        .and_then(serde_json::Value::as_array)
        .is_some_and(|tags| tags.iter().any(|tag| tag.as_str() == Some(MET_INTERACTION)))
}

/// Parse the contents of a history file into observations, in file order.
///
/// Records not tagged `Met` are skipped without looking at their other
/// fields. A `Met` record with a bad id or an unrepresentable epoch makes the
/// whole file invalid.
pub fn parse_history(content: &str) -> Result<Vec<Observation>> {
    let document: HistoryDocument =
        serde_json::from_str(content).context("Failed to parse history JSON")?;

    document
        .interactions
        .into_iter()
        .filter(is_met)
        .map(|value| {
            let record: MetRecord =
                serde_json::from_value(value).context("Malformed Met record")?;
            let observed_at = epoch_to_datetime(record.epoch).ok_or_else(|| {
                anyhow!(
                    "Epoch {} for commander {} is out of range",
                    record.epoch,
                    record.commander_id
                )
            })?;
            Ok(Observation::new(record.commander_id, observed_at))
        })
        .collect()
}

/// Convert a history epoch (seconds since 1601-01-01 UTC) to a UTC timestamp.
pub fn epoch_to_datetime(epoch: i64) -> Option<DateTime<Utc>> {
    let base = NaiveDate::from_ymd_opt(1601, 1, 1)?.and_hms_opt(0, 0, 0)?;
    let delta = TimeDelta::try_seconds(epoch)?;
    base.checked_add_signed(delta).map(|dt| dt.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::fs;
    use tempfile::TempDir;

    /// Seconds between 1601-01-01 and 1970-01-01.
    const UNIX_OFFSET: i64 = 11_644_473_600;

    #[test]
    fn test_epoch_unix_origin() {
        let dt = epoch_to_datetime(UNIX_OFFSET).unwrap();
        assert_eq!(dt, Utc.timestamp_opt(0, 0).unwrap());
    }

    #[test]
    fn test_epoch_zero_is_1601() {
        let dt = epoch_to_datetime(0).unwrap();
        assert_eq!(dt.format("%Y-%m-%d").to_string(), "1601-01-01");
    }

    #[test]
    fn test_epoch_out_of_range() {
        assert!(epoch_to_datetime(i64::MAX).is_none());
    }

    #[test]
    fn test_parse_keeps_only_met() {
        let json = format!(
            r#"{{"Interactions": [
                {{"CommanderID": 1, "Epoch": {e}, "Interactions": ["Met"]}},
                {{"CommanderID": 2, "Epoch": {e}, "Interactions": ["WingMember"]}},
                {{"CommanderID": 3, "Epoch": {e2}, "Interactions": ["Met", "Killed"]}}
            ]}}"#,
            e = UNIX_OFFSET + 100,
            e2 = UNIX_OFFSET + 200,
        );

        let observations = parse_history(&json).unwrap();
        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].entity_id, 1);
        assert_eq!(observations[0].observed_at, Utc.timestamp_opt(100, 0).unwrap());
        assert_eq!(observations[1].entity_id, 3);
    }

    #[test]
    fn test_parse_missing_interactions_list_is_not_met() {
        let json = r#"{"Interactions": [{"CommanderID": 1, "Epoch": 5}]}"#;
        assert!(parse_history(json).unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_history("not json").is_err());
        assert!(parse_history(r#"{"Other": []}"#).is_err());
    }

    #[test]
    fn test_parse_rejects_bad_epoch() {
        let json = format!(
            r#"{{"Interactions": [
                {{"CommanderID": 1, "Epoch": 100, "Interactions": ["Met"]}},
                {{"CommanderID": 2, "Epoch": {}, "Interactions": ["Met"]}}
            ]}}"#,
            i64::MAX
        );
        assert!(parse_history(&json).is_err());
    }

    #[test]
    fn test_parse_ignores_malformed_non_met_records() {
        let json = format!(
            r#"{{"Interactions": [
                {{"CommanderID": -1, "Epoch": {e}, "Interactions": ["WingMember"]}},
                {{"CommanderID": 7, "Epoch": {e}, "Interactions": ["Met"]}},
                {{"CommanderID": "npc", "Interactions": ["Killed"]}},
                "junk"
            ]}}"#,
            e = UNIX_OFFSET + 100,
        );

        let observations = parse_history(&json).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].entity_id, 7);
    }

    #[test]
    fn test_parse_rejects_malformed_met_record() {
        let json = r#"{"Interactions": [
            {"CommanderID": 7, "Epoch": 100, "Interactions": ["Met"]},
            {"CommanderID": -3, "Epoch": 100, "Interactions": ["Met"]}
        ]}"#;
        assert!(parse_history(json).is_err());
    }

    #[test]
    fn test_json_source_absorbs_failures() {
        let temp = TempDir::new().unwrap();
        let broken = temp.path().join("Commander1.cmdrHistory");
        fs::write(&broken, "{ truncated").unwrap();

        assert!(JsonRecordSource.observations(&broken).is_empty());
        assert!(JsonRecordSource
            .observations(&temp.path().join("missing.cmdrHistory"))
            .is_empty());
    }

    #[test]
    fn test_json_source_reads_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Commander1.cmdrHistory");
        fs::write(
            &path,
            format!(
                r#"{{"Interactions": [{{"CommanderID": 42, "Epoch": {}, "Interactions": ["Met"]}}]}}"#,
                UNIX_OFFSET
            ),
        )
        .unwrap();

        let observations = JsonRecordSource.observations(&path);
        assert_eq!(observations, vec![Observation::new(42, Utc.timestamp_opt(0, 0).unwrap())]);
    }
}
