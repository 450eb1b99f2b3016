//! Replay metadata transforms.
//!
//! A replay list is a JSON array of records. The transforms here are the
//! whole contract: re-indexing, frame counting, and date sorting. Unknown
//! fields are carried through untouched.

use crate::error::{CoreError, CoreResult};
use crate::temp_files;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::Path;

/// One replay metadata record.
///
/// `index` is never trusted from disk; every transform that writes a list
/// rewrites it to the record's position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayRecord {
    /// ISO-8601 timestamp, a bare date, or the literal "Unknown".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_length_frames: Option<u64>,

    #[serde(default)]
    pub index: u64,

    /// All other fields pass through unmodified.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Reads a replay list from `path`. Malformed JSON is fatal.
pub fn load_replays(path: &Path) -> CoreResult<Vec<ReplayRecord>> {
    let contents = fs::read_to_string(path)?;
    let replays: Vec<ReplayRecord> = serde_json::from_str(&contents)?;
    log::debug!("Loaded {} replays from {}", replays.len(), path.display());
    Ok(replays)
}

/// Writes a replay list to `path` as pretty JSON, staged through a temp file
/// so a failure never leaves a partially written target.
pub fn save_replays(path: &Path, replays: &[ReplayRecord]) -> CoreResult<()> {
    let json = serde_json::to_string_pretty(replays)?;
    let mut staging = temp_files::create_staging_file(
        temp_files::staging_dir_for(path),
        "replays",
        "json",
    )?;
    staging.write_all(json.as_bytes())?;
    staging
        .persist(path)
        .map_err(|e| CoreError::Io(e.error))?;
    log::debug!("Wrote {} replays to {}", replays.len(), path.display());
    Ok(())
}

/// Rewrites each record's `index` to its position in the slice. Idempotent.
pub fn assign_indices(replays: &mut [ReplayRecord]) {
    for (i, replay) in replays.iter_mut().enumerate() {
        replay.index = i as u64;
    }
}

/// Sums `game_length_frames` over the records that carry it.
pub fn total_game_frames(replays: &[ReplayRecord]) -> u64 {
    replays.iter().filter_map(|r| r.game_length_frames).sum()
}

/// Stable ascending sort by replay date. Records whose date is "Unknown",
/// absent, or unparseable sort after every dated record.
pub fn sort_by_date(replays: &mut [ReplayRecord]) {
    replays.sort_by_cached_key(|r| parse_replay_date(r.date.as_deref()));
}

/// Parses a replay date, mapping anything unusable to the latest possible
/// instant so it orders last.
pub fn parse_replay_date(date: Option<&str>) -> DateTime<Utc> {
    let Some(raw) = date else {
        return DateTime::<Utc>::MAX_UTC;
    };
    if raw == "Unknown" {
        return DateTime::<Utc>::MAX_UTC;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.and_utc();
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        if let Some(dt) = day.and_hms_opt(0, 0, 0) {
            return dt.and_utc();
        }
    }
    log::warn!("Unparseable replay date '{raw}', sorting it last");
    DateTime::<Utc>::MAX_UTC
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(date: Option<&str>) -> ReplayRecord {
        ReplayRecord {
            date: date.map(str::to_string),
            game_length_frames: None,
            index: 0,
            extra: serde_json::Map::new(),
        }
    }

    #[test]
    fn sorts_unknown_dates_last() {
        let mut replays = vec![
            record(Some("2024-03-01")),
            record(Some("Unknown")),
            record(Some("2024-01-01")),
        ];
        sort_by_date(&mut replays);
        assign_indices(&mut replays);

        let dates: Vec<_> = replays.iter().map(|r| r.date.as_deref().unwrap()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-03-01", "Unknown"]);
        let indices: Vec<_> = replays.iter().map(|r| r.index).collect();
        assert_eq!(indices, [0, 1, 2]);
    }

    #[test]
    fn date_formats_parse_consistently() {
        let rfc = parse_replay_date(Some("2024-01-02T03:04:05Z"));
        let naive = parse_replay_date(Some("2024-01-02T03:04:05"));
        assert_eq!(rfc, naive);

        let bare = parse_replay_date(Some("2024-01-02"));
        assert!(bare < rfc);

        assert_eq!(parse_replay_date(Some("Unknown")), DateTime::<Utc>::MAX_UTC);
        assert_eq!(parse_replay_date(Some("not a date")), DateTime::<Utc>::MAX_UTC);
        assert_eq!(parse_replay_date(None), DateTime::<Utc>::MAX_UTC);
    }

    #[test]
    fn assign_indices_is_positional_and_idempotent() {
        let mut replays: Vec<_> = (0..5).map(|_| record(Some("2024-01-01"))).collect();
        replays[3].index = 99;

        assign_indices(&mut replays);
        let first: Vec<_> = replays.iter().map(|r| r.index).collect();
        assert_eq!(first, [0, 1, 2, 3, 4]);

        assign_indices(&mut replays);
        let second: Vec<_> = replays.iter().map(|r| r.index).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn total_frames_skips_records_without_the_field() {
        let mut replays = vec![record(None), record(None), record(None)];
        replays[0].game_length_frames = Some(100);
        replays[2].game_length_frames = Some(50);
        assert_eq!(total_game_frames(&replays), 150);
    }

    #[test]
    fn unknown_fields_round_trip() {
        let raw = json!([{
            "date": "2024-01-01",
            "game_length_frames": 12,
            "player": "falco",
            "stage": { "id": 3 }
        }]);
        let mut replays: Vec<ReplayRecord> =
            serde_json::from_value(raw).expect("deserializes");
        assign_indices(&mut replays);

        let out = serde_json::to_value(&replays).expect("serializes");
        assert_eq!(out[0]["player"], "falco");
        assert_eq!(out[0]["stage"]["id"], 3);
        assert_eq!(out[0]["index"], 0);
    }

    #[test]
    fn malformed_json_is_an_error_and_writes_nothing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let input = dir.path().join("replays.json");
        fs::write(&input, "{ not json").expect("write input");

        let err = load_replays(&input).unwrap_err();
        assert!(matches!(err, CoreError::Json(_)));

        // Nothing else appeared in the directory.
        let entries = fs::read_dir(dir.path()).expect("read dir").count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn save_replaces_the_target_atomically() {
        let dir = tempfile::tempdir().expect("tempdir");
        let target = dir.path().join("sorted.json");
        let replays = vec![record(Some("2024-01-01"))];

        save_replays(&target, &replays).expect("save");
        let reloaded = load_replays(&target).expect("reload");
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded[0].date.as_deref(), Some("2024-01-01"));
    }
}
