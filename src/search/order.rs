//! Date-range filtering and re-sorting of search results.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;

/// Inclusive range over note creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// True if `note` was created within the range, both ends included.
    pub fn contains(&self, note: &Note) -> bool {
        let created = note.created();
        created >= self.start && created <= self.end
    }
}

/// What to sort results by.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Keep the search engine's order
    #[default]
    Relevance,
    /// Creation date
    Created,
    /// Last update
    Updated,
    /// Title, case-folded
    Title,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortBy::Relevance => "relevance",
            SortBy::Created => "created",
            SortBy::Updated => "updated",
            SortBy::Title => "title",
        };
        f.write_str(name)
    }
}

impl FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <SortBy as ValueEnum>::from_str(s, true)
    }
}

/// Compares titles the way a reader expects: case-folded first, raw text as
/// the tie-break so the order is total.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Sorts `results` in place. Stable; `Relevance` leaves the order alone
/// whatever the direction.
pub fn sort_notes(results: &mut [&Note], sort_by: SortBy, direction: SortDirection) {
    let compare: fn(&Note, &Note) -> Ordering = match sort_by {
        SortBy::Relevance => return,
        SortBy::Created => |a, b| a.created().cmp(&b.created()),
        SortBy::Updated => |a, b| a.updated().cmp(&b.updated()),
        SortBy::Title => |a, b| compare_titles(a.title(), b.title()),
    };

    match direction {
        SortDirection::Asc => results.sort_by(|a, b| compare(a, b)),
        SortDirection::Desc => results.sort_by(|a, b| compare(b, a)),
    }
}

/// Applies the optional date range, then the requested ordering.
pub fn refine<'n>(
    mut results: Vec<&'n Note>,
    range: Option<&DateRange>,
    sort_by: SortBy,
    direction: SortDirection,
) -> Vec<&'n Note> {
    if let Some(range) = range {
        results.retain(|note| range.contains(note));
    }
    sort_notes(&mut results, sort_by, direction);
    results
}
