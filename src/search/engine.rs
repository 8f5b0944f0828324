//! Search state, result computation and tag helpers.

use crate::domain::{Note, Tag};
use crate::store::{Change, ChangeListener};
use crate::tags::tag_counts;

use super::fuzzy::{FuzzyIndex, SearchKey};
use super::history::{DEFAULT_MAX_HISTORY, SearchHistory};

/// Default fuzzy threshold (0 = exact, 1 = anything goes).
pub const DEFAULT_THRESHOLD: f64 = 0.3;
/// Default number of tags returned by [`SearchEngine::popular_tags`].
pub const DEFAULT_POPULAR_TAGS: usize = 10;
/// Most suggestions returned for one input.
pub const MAX_SUGGESTIONS: usize = 5;

/// Tunables for the search engine.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOptions {
    pub threshold: f64,
    pub keys: Vec<SearchKey>,
    pub max_history: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            keys: SearchKey::ALL.to_vec(),
            max_history: DEFAULT_MAX_HISTORY,
        }
    }
}

/// A note in a result list, with its fuzzy score when a text query ran.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult<'n> {
    pub note: &'n Note,
    pub score: Option<f64>,
}

/// Splits `#tag` shorthand out of a free-text query.
///
/// Returns the remaining text (words re-joined with single spaces) and the
/// tags named by `#word` tokens. A bare `#` stays in the text.
pub fn split_query(query: &str) -> (String, Vec<Tag>) {
    let mut words = Vec::new();
    let mut tags = Vec::new();

    for word in query.split_whitespace() {
        match word.strip_prefix('#').filter(|rest| !rest.is_empty()) {
            Some(_) => match Tag::new(word) {
                Ok(tag) => tags.push(tag),
                Err(_) => words.push(word),
            },
            None => words.push(word),
        }
    }
    (words.join(" "), tags)
}

/// Fuzzy, tag-aware search over the note collection.
///
/// Holds the active query, the selected tags and the query history, plus a
/// fuzzy index derived from the collection. The index is rebuilt from scratch
/// by [`sync`](Self::sync), which must be called (directly or through the
/// [`ChangeListener`] hook) whenever the collection changes.
pub struct SearchEngine {
    options: SearchOptions,
    index: FuzzyIndex,
    query: String,
    selected_tags: Vec<Tag>,
    history: SearchHistory,
}

impl SearchEngine {
    pub fn new(notes: &[Note], options: SearchOptions) -> Self {
        let index = FuzzyIndex::build(notes, &options.keys, options.threshold);
        let history = SearchHistory::new(options.max_history);
        Self {
            options,
            index,
            query: String::new(),
            selected_tags: Vec::new(),
            history,
        }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Replaces the options, rebuilding the index if the keys or the
    /// threshold changed.
    pub fn set_options(&mut self, options: SearchOptions, notes: &[Note]) {
        let reindex =
            options.keys != self.options.keys || options.threshold != self.options.threshold;
        if options.max_history != self.options.max_history {
            self.history =
                SearchHistory::from_entries(self.history.entries().to_vec(), options.max_history);
        }
        self.options = options;
        if reindex {
            self.sync(notes);
        }
    }

    /// Discards the index and rebuilds it from `notes`.
    pub fn sync(&mut self, notes: &[Note]) {
        self.index = FuzzyIndex::build(notes, &self.options.keys, self.options.threshold);
        log::debug!(
            "search index rebuilt: {} notes, keys {:?}, threshold {}",
            notes.len(),
            self.options.keys,
            self.index.threshold()
        );
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the free-text query. History is not touched.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn selected_tags(&self) -> &[Tag] {
        &self.selected_tags
    }

    /// Adds `tag` to the filter. Returns false if it was already selected.
    pub fn select_tag(&mut self, tag: Tag) -> bool {
        if self.selected_tags.contains(&tag) {
            return false;
        }
        self.selected_tags.push(tag);
        true
    }

    /// Removes `tag` from the filter. Returns false if it was not selected.
    pub fn remove_tag(&mut self, tag: &Tag) -> bool {
        let before = self.selected_tags.len();
        self.selected_tags.retain(|t| t != tag);
        self.selected_tags.len() != before
    }

    /// Clears the query and the selected tags. History is kept.
    pub fn clear_all(&mut self) {
        self.query.clear();
        self.selected_tags.clear();
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    /// Replaces the history with previously stored entries.
    pub fn restore_history(&mut self, entries: Vec<String>) {
        self.history = SearchHistory::from_entries(entries, self.options.max_history);
    }

    /// Records a committed query. Blank input is ignored.
    pub fn add_to_history(&mut self, query: &str) -> bool {
        self.history.record(query)
    }

    /// Makes a history entry the active query and moves it to the front.
    pub fn select_from_history(&mut self, query: &str) {
        self.set_query(query);
        self.add_to_history(query);
    }

    /// True if a non-blank query is set or any tag is selected.
    pub fn has_active_filters(&self) -> bool {
        !self.query.trim().is_empty() || !self.selected_tags.is_empty()
    }

    /// Computes the current results over `notes`.
    ///
    /// A non-blank query runs the fuzzy search (best match first); otherwise
    /// every note is returned in collection order. The list is then narrowed
    /// to notes carrying every selected tag, including `#tag` words from the
    /// query.
    pub fn search<'n>(&self, notes: &'n [Note]) -> Vec<SearchResult<'n>> {
        let (text, shorthand) = split_query(&self.query);

        let mut results: Vec<SearchResult<'n>> = if text.trim().is_empty() {
            notes
                .iter()
                .map(|note| SearchResult { note, score: None })
                .collect()
        } else {
            let rebuilt;
            let index = if self.index.is_current(notes) {
                &self.index
            } else {
                log::warn!("search index is stale; rebuilding for this query");
                rebuilt = FuzzyIndex::build(notes, &self.options.keys, self.options.threshold);
                &rebuilt
            };
            index
                .search(&text)
                .into_iter()
                .filter_map(|hit| {
                    notes.get(hit.index).map(|note| SearchResult {
                        note,
                        score: Some(hit.score),
                    })
                })
                .collect()
        };

        let required: Vec<&Tag> = self.selected_tags.iter().chain(&shorthand).collect();
        if !required.is_empty() {
            results.retain(|r| required.iter().all(|tag| r.note.has_tag(tag.as_str())));
        }
        results
    }

    /// Like [`search`](Self::search) but without scores.
    pub fn results<'n>(&self, notes: &'n [Note]) -> Vec<&'n Note> {
        self.search(notes).into_iter().map(|r| r.note).collect()
    }

    /// Most used tags across the whole collection, ties in first-seen order.
    pub fn popular_tags(&self, notes: &[Note], limit: usize) -> Vec<Tag> {
        tag_counts(notes)
            .into_iter()
            .take(limit)
            .map(|c| c.tag)
            .collect()
    }

    /// Every distinct tag, sorted case-insensitively.
    pub fn all_tags(&self, notes: &[Note]) -> Vec<Tag> {
        let mut tags: Vec<Tag> = tag_counts(notes).into_iter().map(|c| c.tag).collect();
        tags.sort_by_key(|t| t.as_str().to_lowercase());
        tags
    }

    /// Completions for a partially typed query.
    ///
    /// After a `#`, only tags containing the text after the last `#` are
    /// offered (selected tags excluded). Otherwise titles containing the
    /// input come first, then `#tag` for matching tags. At most five.
    pub fn suggestions(&self, notes: &[Note], input: &str) -> Vec<String> {
        if input.trim().is_empty() {
            return Vec::new();
        }

        if let Some((_, fragment)) = input.rsplit_once('#') {
            let fragment = fragment.to_lowercase();
            return self
                .all_tags(notes)
                .into_iter()
                .filter(|tag| !self.selected_tags.contains(tag))
                .filter(|tag| tag.as_str().to_lowercase().contains(&fragment))
                .take(MAX_SUGGESTIONS)
                .map(|tag| format!("#{tag}"))
                .collect();
        }

        let needle = input.to_lowercase();
        let mut out: Vec<String> = Vec::new();
        let titles = notes
            .iter()
            .map(|n| n.title().to_string())
            .filter(|title| title.to_lowercase().contains(&needle));
        let tags = self
            .all_tags(notes)
            .into_iter()
            .filter(|tag| tag.as_str().to_lowercase().contains(&needle))
            .map(|tag| format!("#{tag}"));

        for candidate in titles.chain(tags) {
            if out.len() == MAX_SUGGESTIONS {
                break;
            }
            if !out.contains(&candidate) {
                out.push(candidate);
            }
        }
        out
    }
}

impl ChangeListener for SearchEngine {
    fn notes_changed(&mut self, change: &Change, notes: &[Note]) {
        log::trace!("search engine notified of {change:?}");
        self.sync(notes);
    }
}
