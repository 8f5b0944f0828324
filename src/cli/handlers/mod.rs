//! Command handlers for the CLI.

mod daily;
mod graph;
mod list;
mod notes;
mod resolve;
mod search;
mod show;


use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};

use crate::domain::{Note, Tag};
use crate::store::{MemoryStore, NoteStore, SqliteKv, read_notes, save_notes};

// Re-export public items
pub use daily::{handle_daily, handle_today};
pub use graph::{handle_graph, handle_tags};
pub use list::handle_list;
pub use notes::{handle_edit, handle_new, handle_rm};
pub use resolve::{ResolveResult, resolve_note};
pub use search::{handle_history, handle_search, handle_suggest};
pub use show::{handle_backlinks, handle_show};

// ===========================================
// Shared Utilities
// ===========================================

/// Returns the database path for a data directory.
pub(crate) fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("garden.db")
}

/// The opened database together with the loaded note collection.
pub(crate) struct Garden {
    kv: SqliteKv,
    store: MemoryStore,
    damaged: bool,
}

impl Garden {
    /// Opens the database under `data_dir` and loads every note.
    pub(crate) fn open(data_dir: &Path) -> Result<Self> {
        let path = db_path(data_dir);
        let kv = SqliteKv::open(&path)
            .with_context(|| format!("failed to open store at {}", path.display()))?;
        let loaded = read_notes(&kv).with_context(|| "failed to load notes")?;
        Ok(Self {
            kv,
            store: MemoryStore::from_notes(loaded.notes),
            damaged: loaded.damaged,
        })
    }

    pub(crate) fn notes(&self) -> &[Note] {
        self.store.notes()
    }

    pub(crate) fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.store
    }

    pub(crate) fn kv(&self) -> &SqliteKv {
        &self.kv
    }

    pub(crate) fn kv_mut(&mut self) -> &mut SqliteKv {
        &mut self.kv
    }

    /// Writes the collection back to the database.
    ///
    /// Fails without writing if some stored notes could not be read.
    pub(crate) fn save(&mut self) -> Result<()> {
        if self.damaged {
            bail!("some stored notes could not be read; refusing to overwrite them");
        }
        save_notes(&mut self.kv, self.store.notes()).with_context(|| "failed to save notes")
    }
}

/// Parses tag arguments, failing on the first invalid one.
pub(crate) fn parse_tags(tag_strs: &[String]) -> Result<Vec<Tag>> {
    tag_strs
        .iter()
        .map(|s| Tag::new(s).with_context(|| format!("invalid tag '{}'", s)))
        .collect()
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

/// Prints notes as an ID / Title / Updated table followed by a count line.
pub(crate) fn print_note_table(notes: &[&Note], noun: &str) {
    if notes.is_empty() {
        println!("No {}s found.", noun);
        return;
    }

    println!("{:<10}  {:<50}  {:>10}", "ID", "Title", "Updated");
    println!(
        "{:<10}  {:<50}  {:>10}",
        "----------",
        "--------------------------------------------------",
        "----------"
    );

    for note in notes {
        let id_short = note.id().prefix();
        let title = truncate_str(note.title(), 50);
        let updated = note.updated().format("%Y-%m-%d").to_string();
        println!("{:<10}  {:<50}  {:>10}", id_short, title, updated);
    }

    println!();
    println!("{} {}(s)", notes.len(), noun);
}
