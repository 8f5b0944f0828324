//! Serializing the collection and search history into key-value storage.

use super::{KeyValue, StoreResult};
use crate::domain::Note;

/// Key holding the JSON array of notes.
pub const NOTES_KEY: &str = "digital-garden-notes";
/// Key holding the JSON array of past queries, newest first.
pub const HISTORY_KEY: &str = "digital-garden-search-history";

/// The collection as read back from storage.
#[derive(Debug, Default)]
pub struct LoadedNotes {
    pub notes: Vec<Note>,
    /// Set when the stored value, or any record in it, could not be read.
    /// Saving over it would lose that data.
    pub damaged: bool,
}

/// Reads the stored collection one record at a time.
///
/// A missing key is an empty collection. Records that fail to decode are
/// logged and skipped; if the value is not a JSON array at all nothing is
/// loaded. Either way the result is flagged as damaged and the stored value
/// is left untouched.
pub fn read_notes<K: KeyValue>(kv: &K) -> StoreResult<LoadedNotes> {
    let Some(raw) = kv.get(NOTES_KEY)? else {
        return Ok(LoadedNotes::default());
    };

    let records = match serde_json::from_str::<Vec<serde_json::Value>>(&raw) {
        Ok(records) => records,
        Err(e) => {
            log::warn!("failed to parse saved notes, starting empty: {e}");
            return Ok(LoadedNotes {
                notes: Vec::new(),
                damaged: true,
            });
        }
    };

    let total = records.len();
    let notes: Vec<Note> = records
        .into_iter()
        .enumerate()
        .filter_map(|(i, record)| match serde_json::from_value(record) {
            Ok(note) => Some(note),
            Err(e) => {
                log::warn!("skipping saved note #{i}: {e}");
                None
            }
        })
        .collect();

    let damaged = notes.len() < total;
    if damaged {
        log::warn!("loaded {} of {} saved notes", notes.len(), total);
    } else {
        log::debug!("loaded {} notes", notes.len());
    }
    Ok(LoadedNotes { notes, damaged })
}

/// Loads the readable part of the stored collection.
pub fn load_notes<K: KeyValue>(kv: &K) -> StoreResult<Vec<Note>> {
    Ok(read_notes(kv)?.notes)
}

/// Writes the whole collection.
pub fn save_notes<K: KeyValue>(kv: &mut K, notes: &[Note]) -> StoreResult<()> {
    let raw = serde_json::to_string(notes)?;
    kv.set(NOTES_KEY, &raw)?;
    log::debug!("saved {} notes", notes.len());
    Ok(())
}

/// Loads stored search history entries. Malformed data is logged and dropped.
pub fn load_history<K: KeyValue>(kv: &K) -> StoreResult<Vec<String>> {
    let Some(raw) = kv.get(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };

    Ok(serde_json::from_str(&raw).unwrap_or_else(|e| {
        log::warn!("failed to parse saved search history: {e}");
        Vec::new()
    }))
}

pub fn save_history<K: KeyValue>(kv: &mut K, entries: &[String]) -> StoreResult<()> {
    kv.set(HISTORY_KEY, &serde_json::to_string(entries)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NoteId, Tag};
    use crate::store::SqliteKv;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn sample() -> Vec<Note> {
        let t = Utc.with_ymd_and_hms(2024, 2, 2, 9, 30, 0).unwrap();
        vec![
            Note::builder(NoteId::from_timestamp_ms(1), "Alpha", t, t)
                .content("See [[Beta]]")
                .tags(vec![Tag::new("ideas").unwrap()])
                .build()
                .unwrap(),
            Note::new(NoteId::from_timestamp_ms(2), "Beta", t, t).unwrap(),
        ]
    }

    #[test]
    fn empty_store_loads_nothing() {
        let kv = SqliteKv::open_in_memory().unwrap();
        assert!(load_notes(&kv).unwrap().is_empty());
        assert!(load_history(&kv).unwrap().is_empty());
    }

    #[test]
    fn notes_round_trip_with_timestamps() {
        let mut kv = SqliteKv::open_in_memory().unwrap();
        let notes = sample();
        save_notes(&mut kv, &notes).unwrap();

        let raw = kv.get(NOTES_KEY).unwrap().unwrap();
        assert!(raw.contains("\"createdAt\":\"2024-02-02T09:30:00Z\""));
        assert_eq!(load_notes(&kv).unwrap(), notes);
    }

    #[test]
    fn malformed_notes_load_as_empty_without_overwriting() {
        let mut kv = SqliteKv::open_in_memory().unwrap();
        kv.set(NOTES_KEY, "{not json").unwrap();
        let loaded = read_notes(&kv).unwrap();
        assert!(loaded.notes.is_empty());
        assert!(loaded.damaged);
        assert_eq!(kv.get(NOTES_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn tag_with_spaces_survives_a_round_trip() {
        let mut kv = SqliteKv::open_in_memory().unwrap();
        let t = Utc.with_ymd_and_hms(2024, 2, 2, 9, 30, 0).unwrap();
        let mut notes = sample();
        notes.push(
            Note::builder(NoteId::from_timestamp_ms(3), "Gamma", t, t)
                .tags(vec![Tag::new("machine learning").unwrap()])
                .build()
                .unwrap(),
        );
        save_notes(&mut kv, &notes).unwrap();

        let loaded = read_notes(&kv).unwrap();
        assert!(!loaded.damaged);
        assert_eq!(loaded.notes, notes);
    }

    #[test]
    fn one_bad_record_does_not_drop_the_rest() {
        let mut kv = SqliteKv::open_in_memory().unwrap();
        save_notes(&mut kv, &sample()).unwrap();
        let raw = kv.get(NOTES_KEY).unwrap().unwrap();
        let bad = r#"{"id":"nope","title":""}"#;
        let with_bad = format!("{},{}]", raw.trim_end_matches(']'), bad);
        kv.set(NOTES_KEY, &with_bad).unwrap();

        let loaded = read_notes(&kv).unwrap();
        assert!(loaded.damaged);
        let titles: Vec<&str> = loaded.notes.iter().map(|n| n.title()).collect();
        assert_eq!(titles, vec!["Alpha", "Beta"]);
        assert_eq!(kv.get(NOTES_KEY).unwrap(), Some(with_bad));
    }

    #[test]
    fn history_round_trips() {
        let mut kv = SqliteKv::open_in_memory().unwrap();
        let entries = vec!["newest".to_string(), "older".to_string()];
        save_history(&mut kv, &entries).unwrap();
        assert_eq!(load_history(&kv).unwrap(), entries);
    }
}
