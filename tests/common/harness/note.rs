//! Builder for test notes with sensible defaults.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use garden::domain::{Note, NoteId, Tag};

/// Builder for creating test notes with sensible defaults.
///
/// Automatically generates an ID and timestamps, with a fluent API
/// for setting optional fields.
#[derive(Debug)]
pub struct TestNote {
    id: NoteId,
    title: String,
    created: DateTime<Utc>,
    updated: DateTime<Utc>,
    tags: Vec<Tag>,
    content: String,
}

impl TestNote {
    /// Creates a new test note with the given title.
    ///
    /// Automatically generates a unique ID and sets timestamps to now.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            title: title.into(),
            created: now,
            updated: now,
            tags: Vec::new(),
            content: String::new(),
        }
    }

    /// Sets an explicit ID for the note.
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into().parse().expect("Invalid NoteId");
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl AsRef<str>) -> Self {
        self.tags.push(Tag::new(tag.as_ref()).expect("Invalid tag"));
        self
    }

    /// Sets the content.
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Sets both timestamps.
    pub fn at(mut self, created: DateTime<Utc>, updated: DateTime<Utc>) -> Self {
        self.created = created;
        self.updated = updated;
        self
    }

    /// Returns the 10-character ID prefix.
    pub fn id_prefix(&self) -> String {
        self.id.prefix()
    }

    /// Returns the title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the ID.
    pub fn note_id(&self) -> &NoteId {
        &self.id
    }

    /// Converts this TestNote to a domain Note.
    pub fn to_note(&self) -> Note {
        Note::builder(self.id.clone(), &self.title, self.created, self.updated)
            .content(self.content.clone())
            .tags(self.tags.clone())
            .build()
            .expect("TestNote should always produce valid Note")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_generates_id() {
        let note = TestNote::new("Test");
        let id_str = note.note_id().to_string();
        assert_eq!(id_str.len(), 26, "Should generate a valid ULID");
    }

    #[test]
    fn test_note_builder_fluent() {
        let note = TestNote::new("Rust Notes")
            .tag("rust")
            .content("See [[Cargo]]");

        let domain_note = note.to_note();
        assert_eq!(domain_note.title(), "Rust Notes");
        assert_eq!(domain_note.content(), "See [[Cargo]]");
        assert_eq!(domain_note.tags()[0].as_str(), "rust");
    }

    #[test]
    fn test_note_id_prefix() {
        let note = TestNote::new("Test").id("01HQ3K5M7NXJK4QZPW8V2R6T9Y");
        assert_eq!(note.id_prefix(), "01HQ3K5M7N");
    }
}
