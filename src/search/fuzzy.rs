//! Approximate substring matching over selected note fields.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Note, NoteId};

/// A searchable note field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchKey {
    Title,
    Content,
    Tags,
}

type Accessor = for<'n> fn(&'n Note) -> Cow<'n, str>;

fn title_of(note: &Note) -> Cow<'_, str> {
    Cow::Borrowed(note.title())
}

fn content_of(note: &Note) -> Cow<'_, str> {
    Cow::Borrowed(note.content())
}

fn tags_of(note: &Note) -> Cow<'_, str> {
    let joined: Vec<&str> = note.tags().iter().map(|t| t.as_str()).collect();
    Cow::Owned(joined.join(" "))
}

/// Field name and extraction function for every key.
static ACCESSORS: [(SearchKey, &str, Accessor); 3] = [
    (SearchKey::Title, "title", title_of),
    (SearchKey::Content, "content", content_of),
    (SearchKey::Tags, "tags", tags_of),
];

impl SearchKey {
    /// All keys, in default search order.
    pub const ALL: [SearchKey; 3] = [SearchKey::Title, SearchKey::Content, SearchKey::Tags];

    fn accessor(self) -> &'static (SearchKey, &'static str, Accessor) {
        // ACCESSORS covers every variant
        ACCESSORS
            .iter()
            .find(|(key, _, _)| *key == self)
            .unwrap_or(&ACCESSORS[0])
    }

    /// The field name used in configuration and output.
    pub fn name(self) -> &'static str {
        self.accessor().1
    }

    /// Reads this field from `note`. Tags come back space-joined.
    pub fn extract(self, note: &Note) -> Cow<'_, str> {
        (self.accessor().2)(note)
    }
}

impl fmt::Display for SearchKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown search key name.
#[derive(Debug, Clone)]
pub struct ParseSearchKeyError(String);

impl fmt::Display for ParseSearchKeyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown search key '{}': expected title, content or tags",
            self.0
        )
    }
}

impl std::error::Error for ParseSearchKeyError {}

impl FromStr for SearchKey {
    type Err = ParseSearchKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ACCESSORS
            .iter()
            .find(|(_, name, _)| *name == wanted)
            .map(|(key, _, _)| *key)
            .ok_or_else(|| ParseSearchKeyError(s.to_string()))
    }
}

/// Smallest edit distance between `pattern` and any substring of `text`.
///
/// Sellers' variant of Levenshtein: a match may start anywhere in the text,
/// so leading and trailing text is free.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    let mut prev: Vec<usize> = (0..=m).collect();
    let mut cur = vec![0; m + 1];
    let mut best = m;

    for &tc in text {
        cur[0] = 0;
        for i in 1..=m {
            let substitution = prev[i - 1] + usize::from(pattern[i - 1] != tc);
            cur[i] = substitution.min(prev[i] + 1).min(cur[i - 1] + 1);
        }
        best = best.min(cur[m]);
        if best == 0 {
            break;
        }
        std::mem::swap(&mut prev, &mut cur);
    }
    best
}

/// Match score in `[0, 1]`: 0 is an exact occurrence, 1 is nothing in common.
pub fn match_score(pattern: &[char], text: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    substring_distance(pattern, text) as f64 / pattern.len() as f64
}

/// A note that matched a query.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Position of the note in the indexed collection.
    pub index: usize,
    /// Best score over all matching fields; lower is better.
    pub score: f64,
    /// Field that produced the best score.
    pub key: SearchKey,
}

/// Lower-cased field values for every note, ready for approximate matching.
///
/// Built from a snapshot of the collection and thrown away whenever the
/// collection, the keys or the threshold change.
#[derive(Debug, Clone)]
pub struct FuzzyIndex {
    keys: Vec<SearchKey>,
    threshold: f64,
    entries: Vec<Vec<Vec<char>>>,
    /// Id and `updated` of each indexed note, in index order.
    stamps: Vec<(NoteId, DateTime<Utc>)>,
}

impl FuzzyIndex {
    /// Indexes `keys` of every note. `threshold` is clamped to `[0, 1]`.
    pub fn build(notes: &[Note], keys: &[SearchKey], threshold: f64) -> Self {
        let entries = notes
            .iter()
            .map(|note| {
                keys.iter()
                    .map(|key| key.extract(note).to_lowercase().chars().collect())
                    .collect()
            })
            .collect();
        let stamps = notes
            .iter()
            .map(|note| (note.id().clone(), note.updated()))
            .collect();

        Self {
            keys: keys.to_vec(),
            threshold: threshold.clamp(0.0, 1.0),
            entries,
            stamps,
        }
    }

    /// True if the index was built from exactly these notes, in this order,
    /// with none of them edited since.
    pub fn is_current(&self, notes: &[Note]) -> bool {
        self.stamps.len() == notes.len()
            && self
                .stamps
                .iter()
                .zip(notes)
                .all(|((id, updated), note)| note.id() == id && note.updated() == *updated)
    }

    /// Number of indexed notes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn keys(&self) -> &[SearchKey] {
        &self.keys
    }

    /// Returns every note with at least one field scoring within the
    /// threshold, best first. Equal scores keep collection order.
    pub fn search(&self, query: &str) -> Vec<Hit> {
        let pattern: Vec<char> = query.trim().to_lowercase().chars().collect();
        if pattern.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<Hit> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(index, fields)| {
                fields
                    .iter()
                    .zip(&self.keys)
                    .map(|(text, key)| (match_score(&pattern, text), *key))
                    .filter(|(score, _)| *score <= self.threshold)
                    .min_by(|a, b| a.0.total_cmp(&b.0))
                    .map(|(score, key)| Hit { index, score, key })
            })
            .collect();

        hits.sort_by(|a, b| a.score.total_cmp(&b.score));
        hits
    }
}
