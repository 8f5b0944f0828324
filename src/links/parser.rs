//! Inline `[[Title]]` reference parsing and resolution.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{Note, NoteId};

/// Double-open-bracket, anything but `]`, double-close-bracket. No nesting.
static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\]]*)\]\]").expect("reference pattern is valid"));

/// One `[[...]]` occurrence in a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference<'t> {
    title: &'t str,
    span: Range<usize>,
}

impl<'t> Reference<'t> {
    /// The text between the brackets, trimmed, with its original casing.
    pub fn title(&self) -> &'t str {
        self.title
    }

    /// Byte range of the whole token, brackets included.
    pub fn span(&self) -> Range<usize> {
        self.span.clone()
    }
}

/// Lazy iterator over the references in a text, in order of appearance.
///
/// Clone it before consuming, or call [`references`] again, to walk the same
/// text twice.
#[derive(Debug, Clone)]
pub struct References<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for References<'t> {
    type Item = Reference<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos > self.text.len() {
            return None;
        }
        let caps = REFERENCE_RE.captures_at(self.text, self.pos)?;
        let whole = caps.get(0)?;
        let inner = caps.get(1)?;
        self.pos = whole.end();
        Some(Reference {
            title: inner.as_str().trim(),
            span: whole.range(),
        })
    }
}

/// Returns the references contained in `text`.
///
/// Every occurrence is yielded, duplicates included. `[[` without a closing
/// `]]` is plain text; `[[]]` yields a reference with an empty title.
///
/// # Examples
///
/// ```
/// use garden::links::references;
///
/// let titles: Vec<_> = references("See [[Beta]] and [[ gamma ]]").map(|r| r.title()).collect();
/// assert_eq!(titles, vec!["Beta", "gamma"]);
/// ```
pub fn references(text: &str) -> References<'_> {
    References { text, pos: 0 }
}

/// Returns just the trimmed titles referenced by `text`.
pub fn link_titles(text: &str) -> Vec<&str> {
    references(text).map(|r| r.title()).collect()
}

/// Case-insensitive title index over a note collection.
///
/// When several notes share a title, the first one in collection order wins.
pub struct TitleLookup<'n> {
    by_title: HashMap<String, &'n Note>,
}

impl<'n> TitleLookup<'n> {
    /// Builds the lookup from the current collection.
    pub fn new(notes: &'n [Note]) -> Self {
        let mut by_title = HashMap::with_capacity(notes.len());
        for note in notes {
            by_title.entry(note.title().to_lowercase()).or_insert(note);
        }
        Self { by_title }
    }

    /// Finds the note a reference title points to.
    pub fn resolve(&self, title: &str) -> Option<&'n Note> {
        if title.is_empty() {
            return None;
        }
        self.by_title.get(&title.to_lowercase()).copied()
    }
}

/// A reference classified against a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedReference {
    pub title: String,
    pub span: Range<usize>,
    pub target: Option<NoteId>,
}

impl ResolvedReference {
    /// Returns true if the reference points at an existing note.
    pub fn exists(&self) -> bool {
        self.target.is_some()
    }
}

/// Parses `text` and resolves each reference against `lookup`.
pub fn resolve_references(text: &str, lookup: &TitleLookup<'_>) -> Vec<ResolvedReference> {
    references(text)
        .map(|r| ResolvedReference {
            title: r.title().to_string(),
            span: r.span(),
            target: lookup.resolve(r.title()).map(|n| n.id().clone()),
        })
        .collect()
}

/// Where a rendered link should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// The reference resolves to this note.
    Resolved(NoteId),
    /// No note carries the title; holds the attempted title so a renderer can
    /// offer to create it.
    Missing(String),
}

/// A piece of note content prepared for a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'t> {
    Text(&'t str),
    Link { text: &'t str, target: LinkTarget },
}

/// Splits `text` into plain runs and classified links.
///
/// Concatenating the `Text` runs and link texts gives back the content with
/// the bracket markup removed.
pub fn segments<'t>(text: &'t str, lookup: &TitleLookup<'_>) -> Vec<Segment<'t>> {
    let mut out = Vec::new();
    let mut cursor = 0;

    for reference in references(text) {
        let span = reference.span();
        if span.start > cursor {
            out.push(Segment::Text(&text[cursor..span.start]));
        }
        let target = match lookup.resolve(reference.title()) {
            Some(note) => LinkTarget::Resolved(note.id().clone()),
            None => LinkTarget::Missing(reference.title().to_string()),
        };
        out.push(Segment::Link {
            text: reference.title(),
            target,
        });
        cursor = span.end;
    }

    if cursor < text.len() {
        out.push(Segment::Text(&text[cursor..]));
    }
    out
}
