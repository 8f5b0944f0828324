//! Bounded, most-recent-first query history.

/// Default number of remembered queries.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Past committed queries, newest first, without exact duplicates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHistory {
    entries: Vec<String>,
    limit: usize,
}

impl SearchHistory {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Rebuilds a history from stored entries (newest first).
    ///
    /// Blank entries and later duplicates are dropped, then the list is cut
    /// to `limit`.
    pub fn from_entries<I, S>(entries: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut history = Self::new(limit);
        for entry in entries {
            let entry = entry.into();
            if entry.trim().is_empty() || history.entries.contains(&entry) {
                continue;
            }
            history.entries.push(entry);
        }
        history.entries.truncate(limit);
        history
    }

    /// Records `query` as the most recent entry.
    ///
    /// Blank queries are ignored. An existing identical entry moves to the
    /// front instead of being duplicated. Returns true if the history changed.
    pub fn record(&mut self, query: &str) -> bool {
        if query.trim().is_empty() {
            return false;
        }
        let before = self.entries.clone();
        self.entries.retain(|entry| entry != query);
        self.entries.insert(0, query.to_string());
        self.entries.truncate(self.limit);
        self.entries != before
    }

    /// Entries, newest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// Returns the `n`th entry (0 = newest).
    pub fn get(&self, n: usize) -> Option<&str> {
        self.entries.get(n).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for SearchHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}
