//! Note store, change notification, key-value persistence, daily notes

pub mod daily;
mod kv;
mod memory;
mod persist;

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use thiserror::Error;

use crate::domain::{Note, NoteId, NotePatch, ParseNoteError, Tag};

pub use daily::{DailyNotes, DailyOutcome};
pub use kv::{KeyValue, SqliteKv};
pub use memory::MemoryStore;
pub use persist::{
    HISTORY_KEY, LoadedNotes, NOTES_KEY, load_history, load_notes, read_notes, save_history,
    save_notes,
};

/// Errors that can occur in the store and its persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No note has the given id.
    #[error("note not found: {id}")]
    NotFound { id: String },

    /// The note data failed validation.
    #[error("{0}")]
    InvalidNote(#[from] ParseNoteError),

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Stored data could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The daily note template failed to render.
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// What changed in the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// The whole collection was (re)loaded or a listener just subscribed.
    Loaded,
    Added(NoteId),
    Updated(NoteId),
    Deleted(NoteId),
}

/// Receives the collection after every change so derived state can be
/// recomputed.
pub trait ChangeListener {
    fn notes_changed(&mut self, change: &Change, notes: &[Note]);
}

impl<L: ChangeListener + ?Sized> ChangeListener for Rc<RefCell<L>> {
    fn notes_changed(&mut self, change: &Change, notes: &[Note]) {
        self.borrow_mut().notes_changed(change, notes);
    }
}

/// The authoritative, mutable note collection.
///
/// Everything else in the crate reads `notes()`; only implementations of
/// this trait mutate notes.
pub trait NoteStore {
    /// All notes, in collection order.
    fn notes(&self) -> &[Note];

    /// Creates a note. `created` and `updated` are set to now.
    fn add(&mut self, title: &str, content: &str, tags: Vec<Tag>) -> StoreResult<Note>;

    /// Applies `patch` to the note with `id` and bumps its `updated` time.
    fn update(&mut self, id: &NoteId, patch: NotePatch) -> StoreResult<()>;

    /// Removes the note with `id`.
    fn delete(&mut self, id: &NoteId) -> StoreResult<()>;

    fn get_by_id(&self, id: &NoteId) -> Option<&Note> {
        self.notes().iter().find(|n| n.id() == id)
    }

    /// Case-insensitive title lookup; the first match in collection order wins.
    fn get_by_title(&self, title: &str) -> Option<&Note> {
        self.notes().iter().find(|n| n.title_matches(title))
    }
}
