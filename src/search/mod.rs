//! Fuzzy multi-key search, tag filtering, query history and result ordering

mod engine;
mod fuzzy;
mod history;
mod order;

pub use engine::{
    DEFAULT_POPULAR_TAGS, DEFAULT_THRESHOLD, MAX_SUGGESTIONS, SearchEngine, SearchOptions,
    SearchResult, split_query,
};
pub use fuzzy::{
    FuzzyIndex, Hit, ParseSearchKeyError, SearchKey, match_score, substring_distance,
};
pub use history::{DEFAULT_MAX_HISTORY, SearchHistory};
pub use order::{DateRange, SortBy, SortDirection, compare_titles, refine, sort_notes};
