//! In-memory note store with change notification.

use chrono::{DateTime, Utc};

use super::{Change, ChangeListener, NoteStore, StoreError, StoreResult};
use crate::domain::{Note, NoteId, NotePatch, Tag};

/// Vec-backed [`NoteStore`].
///
/// New notes go to the front of the collection. Each mutation bumps
/// `revision` and is pushed to every subscribed listener.
#[derive(Default)]
pub struct MemoryStore {
    notes: Vec<Note>,
    revision: u64,
    listeners: Vec<Box<dyn ChangeListener>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already loaded collection.
    pub fn from_notes(notes: Vec<Note>) -> Self {
        Self {
            notes,
            revision: 0,
            listeners: Vec::new(),
        }
    }

    /// Monotonic counter, bumped on every change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a listener and immediately hands it the current collection.
    pub fn subscribe(&mut self, mut listener: Box<dyn ChangeListener>) {
        listener.notes_changed(&Change::Loaded, &self.notes);
        self.listeners.push(listener);
    }

    /// Replaces the whole collection.
    pub fn replace_all(&mut self, notes: Vec<Note>) {
        self.notes = notes;
        self.notify(Change::Loaded);
    }

    /// [`NoteStore::add`] with an explicit clock.
    pub fn add_at(
        &mut self,
        title: &str,
        content: &str,
        tags: Vec<Tag>,
        now: DateTime<Utc>,
    ) -> StoreResult<Note> {
        let note = Note::builder(NoteId::from_datetime(now), title, now, now)
            .content(content)
            .tags(tags)
            .build()?;

        self.notes.insert(0, note.clone());
        log::debug!("added note {}", note);
        self.notify(Change::Added(note.id().clone()));
        Ok(note)
    }

    /// [`NoteStore::update`] with an explicit clock.
    pub fn update_at(
        &mut self,
        id: &NoteId,
        patch: NotePatch,
        now: DateTime<Utc>,
    ) -> StoreResult<()> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id() == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        note.apply(patch, now)?;
        log::debug!("updated note {}", note);
        self.notify(Change::Updated(id.clone()));
        Ok(())
    }

    fn notify(&mut self, change: Change) {
        self.revision += 1;
        for listener in &mut self.listeners {
            listener.notes_changed(&change, &self.notes);
        }
    }
}

impl NoteStore for MemoryStore {
    fn notes(&self) -> &[Note] {
        &self.notes
    }

    fn add(&mut self, title: &str, content: &str, tags: Vec<Tag>) -> StoreResult<Note> {
        self.add_at(title, content, tags, Utc::now())
    }

    fn update(&mut self, id: &NoteId, patch: NotePatch) -> StoreResult<()> {
        self.update_at(id, patch, Utc::now())
    }

    fn delete(&mut self, id: &NoteId) -> StoreResult<()> {
        let position = self
            .notes
            .iter()
            .position(|n| n.id() == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_string() })?;

        let removed = self.notes.remove(position);
        log::debug!("deleted note {}", removed);
        self.notify(Change::Deleted(id.clone()));
        Ok(())
    }
}
