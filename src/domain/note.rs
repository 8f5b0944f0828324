//! Note: the atomic unit of the collection.

use crate::domain::{NoteId, Tag};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of error that occurred when constructing a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseNoteErrorKind {
    EmptyTitle,
    UpdatedBeforeCreated,
}

/// Error returned when constructing an invalid note.
#[derive(Debug, Clone)]
pub struct ParseNoteError {
    kind: ParseNoteErrorKind,
}

impl fmt::Display for ParseNoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ParseNoteErrorKind::EmptyTitle => write!(f, "invalid note: title cannot be empty"),
            ParseNoteErrorKind::UpdatedBeforeCreated => {
                write!(f, "invalid note: updatedAt precedes createdAt")
            }
        }
    }
}

impl std::error::Error for ParseNoteError {}

/// A short text note.
///
/// The title doubles as the key that `[[Title]]` references resolve against
/// (case-insensitively). Content is free text; tags form an ordered set.
///
/// # Invariants
/// - `title` is trimmed and non-empty
/// - `tags` contain no duplicates (case-insensitive)
/// - `updated >= created`
///
/// # Examples
///
/// ```
/// use garden::domain::{Note, NoteId, Tag};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let note = Note::builder(NoteId::new(), "Alpha", now, now)
///     .content("See [[Beta]]")
///     .tags(vec![Tag::new("ideas").unwrap()])
///     .build()
///     .unwrap();
/// assert_eq!(note.title(), "Alpha");
/// assert_eq!(note.tags().len(), 1);
/// ```
#[derive(Clone, PartialEq)]
pub struct Note {
    id: NoteId,
    title: String,
    content: String,
    tags: Vec<Tag>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl Note {
    /// Creates a note with empty content and no tags.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the title is blank or `updated < created`.
    pub fn new(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Result<Self, ParseNoteError> {
        Self::builder(id, title, created, updated).build()
    }

    /// Creates a builder for constructing a Note with content and tags.
    pub fn builder(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> NoteBuilder {
        NoteBuilder::new(id, title, created, updated)
    }

    /// Returns the note's unique identifier.
    pub fn id(&self) -> &NoteId {
        &self.id
    }

    /// Returns the note's title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the raw note text, including any `[[...]]` references.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the note's tags in display order.
    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns when the note was created.
    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    /// Returns when the note was last modified.
    pub fn updated(&self) -> DateTime<Utc> {
        self.updated
    }

    /// Returns true if the note carries `tag` (case-insensitive).
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.matches(tag))
    }

    /// Returns true if the title equals `title`, ignoring case and surrounding whitespace.
    pub fn title_matches(&self, title: &str) -> bool {
        self.title.to_lowercase() == title.trim().to_lowercase()
    }

    /// Applies a patch and advances `updated` to `now`.
    ///
    /// `id` and `created` never change. `updated` only moves forward, so a
    /// clock running behind leaves it where it was.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if the patch would blank the title; the note
    /// is left untouched in that case.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) -> Result<(), ParseNoteError> {
        let title = match patch.title {
            Some(title) => Some(normalize_title(&title)?),
            None => None,
        };

        if let Some(title) = title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(tags) = patch.tags {
            self.tags = deduplicate_tags(tags);
        }
        self.updated = now.max(self.updated);
        Ok(())
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.title, self.id.prefix())
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("content_len", &self.content.len())
            .field("tags", &self.tags)
            .field("created", &self.created)
            .field("updated", &self.updated)
            .finish()
    }
}

/// Partial update for a note. `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<Tag>>,
}

impl NotePatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.tags.is_none()
    }
}

/// Builder for constructing a Note with optional fields.
pub struct NoteBuilder {
    id: NoteId,
    title: String,
    content: String,
    tags: Vec<Tag>,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
}

impl NoteBuilder {
    fn new(
        id: NoteId,
        title: impl Into<String>,
        created: DateTime<Utc>,
        updated: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: String::new(),
            tags: Vec::new(),
            created,
            updated,
        }
    }

    /// Sets the note's content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets the note's tags.
    ///
    /// Duplicates are removed (first occurrence kept).
    pub fn tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = deduplicate_tags(tags);
        self
    }

    /// Builds the Note.
    ///
    /// # Errors
    ///
    /// Returns `ParseNoteError` if:
    /// - The title is empty or whitespace-only
    /// - `updated` precedes `created`
    pub fn build(self) -> Result<Note, ParseNoteError> {
        let title = normalize_title(&self.title)?;

        if self.updated < self.created {
            return Err(ParseNoteError {
                kind: ParseNoteErrorKind::UpdatedBeforeCreated,
            });
        }

        Ok(Note {
            id: self.id,
            title,
            content: self.content,
            tags: self.tags,
            created: self.created,
            updated: self.updated,
        })
    }
}

fn normalize_title(title: &str) -> Result<String, ParseNoteError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ParseNoteError {
            kind: ParseNoteErrorKind::EmptyTitle,
        });
    }
    Ok(trimmed.to_string())
}

/// Removes duplicate tags (case-insensitive, first occurrence kept).
fn deduplicate_tags(tags: Vec<Tag>) -> Vec<Tag> {
    let mut seen = Vec::new();
    for tag in tags {
        if !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

impl Serialize for Note {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(6))?;
        map.serialize_entry("id", &self.id)?;
        map.serialize_entry("title", &self.title)?;
        map.serialize_entry("content", &self.content)?;
        map.serialize_entry("tags", &self.tags)?;
        map.serialize_entry("createdAt", &self.created)?;
        map.serialize_entry("updatedAt", &self.updated)?;
        map.end()
    }
}

impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct NoteHelper {
            id: NoteId,
            title: String,
            #[serde(default)]
            content: String,
            #[serde(default)]
            tags: Vec<Tag>,
            created_at: DateTime<Utc>,
            updated_at: DateTime<Utc>,
        }

        let helper = NoteHelper::deserialize(deserializer)?;

        Note::builder(helper.id, helper.title, helper.created_at, helper.updated_at)
            .content(helper.content)
            .tags(helper.tags)
            .build()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn tag(s: &str) -> Tag {
        Tag::new(s).unwrap()
    }

    #[test]
    fn new_trims_title() {
        let note = Note::new(NoteId::new(), "  Alpha  ", at(9), at(9)).unwrap();
        assert_eq!(note.title(), "Alpha");
        assert_eq!(note.content(), "");
        assert!(note.tags().is_empty());
    }

    #[test]
    fn new_rejects_blank_title() {
        let err = Note::new(NoteId::new(), "   ", at(9), at(9)).unwrap_err();
        assert!(err.to_string().contains("title cannot be empty"));
    }

    #[test]
    fn build_rejects_updated_before_created() {
        let result = Note::builder(NoteId::new(), "Alpha", at(10), at(9)).build();
        assert!(result.is_err());
    }

    #[test]
    fn builder_deduplicates_tags_case_insensitively() {
        let note = Note::builder(NoteId::new(), "Alpha", at(9), at(9))
            .tags(vec![tag("Work"), tag("work"), tag("urgent")])
            .build()
            .unwrap();
        let tags: Vec<_> = note.tags().iter().map(Tag::as_str).collect();
        assert_eq!(tags, vec!["Work", "urgent"]);
    }

    #[test]
    fn apply_bumps_updated_and_keeps_identity() {
        let mut note = Note::new(NoteId::new(), "Alpha", at(9), at(9)).unwrap();
        let id = note.id().clone();
        let patch = NotePatch {
            content: Some("new body".to_string()),
            ..Default::default()
        };
        note.apply(patch, at(11)).unwrap();

        assert_eq!(note.id(), &id);
        assert_eq!(note.created(), at(9));
        assert_eq!(note.updated(), at(11));
        assert_eq!(note.content(), "new body");
        assert_eq!(note.title(), "Alpha");
    }

    #[test]
    fn apply_clamps_updated_to_created() {
        let mut note = Note::new(NoteId::new(), "Alpha", at(9), at(9)).unwrap();
        note.apply(NotePatch::default(), at(9) - Duration::hours(3))
            .unwrap();
        assert_eq!(note.updated(), at(9));
    }

    #[test]
    fn apply_never_moves_updated_backwards() {
        let mut note = Note::new(NoteId::new(), "Alpha", at(9), at(12)).unwrap();
        let patch = NotePatch {
            title: Some("Beta".to_string()),
            ..Default::default()
        };
        note.apply(patch, at(10)).unwrap();

        assert_eq!(note.title(), "Beta");
        assert_eq!(note.updated(), at(12));
    }

    #[test]
    fn apply_rejects_blank_title_without_changes() {
        let mut note = Note::new(NoteId::new(), "Alpha", at(9), at(9)).unwrap();
        let patch = NotePatch {
            title: Some("  ".to_string()),
            content: Some("changed".to_string()),
            tags: None,
        };
        assert!(note.apply(patch, at(10)).is_err());
        assert_eq!(note.content(), "");
        assert_eq!(note.updated(), at(9));
    }

    #[test]
    fn has_tag_and_title_matches_ignore_case() {
        let note = Note::builder(NoteId::new(), "Beta Notes", at(9), at(9))
            .tags(vec![tag("Work")])
            .build()
            .unwrap();
        assert!(note.has_tag("WORK"));
        assert!(note.title_matches(" beta notes "));
        assert!(!note.title_matches("beta"));
    }

    #[test]
    fn serializes_with_camel_case_timestamps() {
        let note = Note::builder(NoteId::from_timestamp_ms(0), "Alpha", at(9), at(10))
            .content("See [[Beta]]")
            .tags(vec![tag("ideas")])
            .build()
            .unwrap();
        let value = serde_json::to_value(&note).unwrap();
        assert_eq!(value["createdAt"], "2024-01-15T09:00:00Z");
        assert_eq!(value["updatedAt"], "2024-01-15T10:00:00Z");
        assert_eq!(value["tags"][0], "ideas");

        let back: Note = serde_json::from_value(value).unwrap();
        assert_eq!(back, note);
    }

    #[test]
    fn deserialize_defaults_content_and_tags() {
        let json = r#"{
            "id": "01HQ3K5M7NXJK4QZPW8V2R6T9Y",
            "title": "Bare",
            "createdAt": "2024-01-15T09:00:00Z",
            "updatedAt": "2024-01-15T09:00:00Z"
        }"#;
        let note: Note = serde_json::from_str(json).unwrap();
        assert_eq!(note.content(), "");
        assert!(note.tags().is_empty());
    }
}
