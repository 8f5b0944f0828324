//! Backlinks: which notes reference a given note.

use std::cmp::Reverse;

use super::parser::{ResolvedReference, TitleLookup, references, resolve_references};
use crate::domain::Note;

/// Returns every other note whose content references `target`'s title.
///
/// Matching is case-insensitive on the trimmed reference title and counts
/// unresolved references too, so a link written before a rename still shows
/// up. The target itself is never included. Results are ordered by last
/// update, newest first; notes updated at the same instant keep their
/// collection order.
pub fn find_backlinks<'n>(target: &Note, notes: &'n [Note]) -> Vec<&'n Note> {
    let wanted = target.title().to_lowercase();

    let mut backlinks: Vec<&Note> = notes
        .iter()
        .filter(|note| note.id() != target.id())
        .filter(|note| {
            references(note.content()).any(|r| r.title().to_lowercase() == wanted)
        })
        .collect();

    // sort_by_key is stable
    backlinks.sort_by_key(|note| Reverse(note.updated()));
    backlinks
}

/// Returns the references made by `note`, classified against `notes`.
pub fn forward_links(note: &Note, notes: &[Note]) -> Vec<ResolvedReference> {
    let lookup = TitleLookup::new(notes);
    resolve_references(note.content(), &lookup)
}
