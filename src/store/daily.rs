//! Daily notes: one note per calendar day, titled `YYYY-MM-DD`.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use minijinja::{Environment, context};
use regex::Regex;

use super::{NoteStore, StoreResult};
use crate::domain::{Note, NoteId, Tag};

/// Body of a freshly created daily note.
///
/// Variables: `weekday` (`Monday`), `long_date` (`January 15, 2024`) and
/// `date` (`2024-01-15`).
pub const DEFAULT_DAILY_TEMPLATE: &str = "\
{{ weekday }}, {{ long_date }}

Today's Focus:


Notes:


Reflections:


This is your daily note for {{ date }}. Use it to capture thoughts, tasks, and reflections for the day.";

/// Tags attached to every daily note.
pub const DAILY_TAGS: [&str; 2] = ["daily", "journal"];

/// Days back (inclusive) that count as recent.
const RECENT_WINDOW_DAYS: u64 = 7;
const MAX_RECENT: usize = 6;

static DAILY_TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// The title of the daily note for `date`.
pub fn daily_title(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns true if `title` has the `YYYY-MM-DD` shape.
pub fn is_daily_title(title: &str) -> bool {
    DAILY_TITLE_RE.is_match(title)
}

/// Renders a daily note body for `date`.
pub fn render_daily(template: &str, date: NaiveDate) -> StoreResult<String> {
    let env = Environment::new();
    let body = env.render_str(
        template,
        context! {
            weekday => date.format("%A").to_string(),
            long_date => date.format("%B %-d, %Y").to_string(),
            date => daily_title(date),
        },
    )?;
    Ok(body)
}

/// Result of [`DailyNotes::ensure_today`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DailyOutcome {
    /// A new note was created.
    Created(NoteId),
    /// A note with today's title already exists.
    Existing(NoteId),
}

impl DailyOutcome {
    pub fn id(&self) -> &NoteId {
        match self {
            DailyOutcome::Created(id) | DailyOutcome::Existing(id) => id,
        }
    }
}

/// Creates the note for a given day from a template.
#[derive(Debug, Clone)]
pub struct DailyNotes {
    template: String,
}

impl Default for DailyNotes {
    fn default() -> Self {
        Self::new()
    }
}

impl DailyNotes {
    pub fn new() -> Self {
        Self::with_template(DEFAULT_DAILY_TEMPLATE)
    }

    pub fn with_template(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// Makes sure a note titled after `today` exists.
    ///
    /// The title lookup is what prevents duplicates: a note with that title,
    /// whoever created it, is returned as is.
    pub fn ensure_today<S: NoteStore + ?Sized>(
        &self,
        store: &mut S,
        today: NaiveDate,
    ) -> StoreResult<DailyOutcome> {
        let title = daily_title(today);

        if let Some(existing) = store.get_by_title(&title) {
            return Ok(DailyOutcome::Existing(existing.id().clone()));
        }

        let body = render_daily(&self.template, today)?;
        let tags = DAILY_TAGS.iter().filter_map(|t| Tag::new(t).ok()).collect();
        let note = store.add(&title, &body, tags)?;
        log::info!("created daily note {title}");
        Ok(DailyOutcome::Created(note.id().clone()))
    }
}

/// All notes with a daily title, newest date first.
pub fn daily_notes(notes: &[Note]) -> Vec<&Note> {
    let mut daily: Vec<&Note> = notes.iter().filter(|n| is_daily_title(n.title())).collect();
    daily.sort_by(|a, b| b.title().cmp(a.title()));
    daily
}

/// Daily notes from the last week, today excluded, at most six.
pub fn recent_daily_notes(notes: &[Note], today: NaiveDate) -> Vec<&Note> {
    let cutoff = today
        .checked_sub_days(Days::new(RECENT_WINDOW_DAYS))
        .unwrap_or(NaiveDate::MIN);
    let today_title = daily_title(today);

    daily_notes(notes)
        .into_iter()
        .filter(|n| n.title() != today_title)
        .filter(|n| {
            NaiveDate::parse_from_str(n.title(), "%Y-%m-%d")
                .map(|d| d >= cutoff)
                .unwrap_or(false)
        })
        .take(MAX_RECENT)
        .collect()
}

/// Short human label: `Today`, `Yesterday`, or `Mon, Jan 15`.
pub fn display_date(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%a, %b %-d").to_string()
    }
}
