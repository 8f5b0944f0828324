//! Isolated test environment with temp directory.

#![allow(dead_code)]

use super::{GardenCommand, TestNote};
use garden::domain::Note;
use garden::store::{KeyValue, SqliteKv, load_history, load_notes, save_notes};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated test environment with a temporary data directory.
///
/// Creates a temp directory that is automatically cleaned up on drop.
/// Commands run from here also get their own config directory, so a config
/// file on the host never leaks into a test.
pub struct TestEnv {
    /// The temporary directory (kept for lifetime management)
    _temp_dir: TempDir,
    /// Path to the data directory
    data_dir: PathBuf,
    /// Path used as `XDG_CONFIG_HOME`
    config_home: PathBuf,
}

impl TestEnv {
    /// Creates a new isolated test environment.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let data_dir = temp_dir.path().join("data");
        let config_home = temp_dir.path().join("config");
        std::fs::create_dir_all(&config_home).expect("Failed to create config dir");
        Self {
            _temp_dir: temp_dir,
            data_dir,
            config_home,
        }
    }

    /// Returns the path to the data directory.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the path of the SQLite database.
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join("garden.db")
    }

    /// Adds a test note to the front of the stored collection.
    pub fn add_note(&self, test_note: &TestNote) -> Note {
        let note = test_note.to_note();
        let mut kv = SqliteKv::open(&self.db_path()).expect("Failed to open store");
        let mut notes = load_notes(&kv).expect("Failed to load notes");
        notes.insert(0, note.clone());
        save_notes(&mut kv, &notes).expect("Failed to save notes");
        note
    }

    /// Returns every stored note, in collection order.
    pub fn notes(&self) -> Vec<Note> {
        let kv = SqliteKv::open(&self.db_path()).expect("Failed to open store");
        load_notes(&kv).expect("Failed to load notes")
    }

    /// Returns the stored search history, newest first.
    pub fn history(&self) -> Vec<String> {
        let kv = SqliteKv::open(&self.db_path()).expect("Failed to open store");
        load_history(&kv).expect("Failed to load history")
    }

    /// Writes a raw value into the store.
    pub fn set_raw(&self, key: &str, value: &str) {
        let mut kv = SqliteKv::open(&self.db_path()).expect("Failed to open store");
        kv.set(key, value).expect("Failed to write value");
    }

    /// Reads a raw value from the store.
    pub fn raw(&self, key: &str) -> Option<String> {
        let kv = SqliteKv::open(&self.db_path()).expect("Failed to open store");
        kv.get(key).expect("Failed to read value")
    }

    /// Writes `config.toml` for commands run from this environment.
    pub fn write_config(&self, contents: &str) -> PathBuf {
        let dir = self.config_home.join("garden");
        std::fs::create_dir_all(&dir).expect("Failed to create config dir");
        let path = dir.join("config.toml");
        std::fs::write(&path, contents).expect("Failed to write config");
        path
    }

    /// Creates a GardenCommand configured for this test environment.
    pub fn cmd(&self) -> GardenCommand {
        GardenCommand::new()
            .env("XDG_CONFIG_HOME", self.config_home.to_string_lossy())
            .dir(&self.data_dir)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}
