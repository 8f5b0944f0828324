//! Note resolution utilities.

use anyhow::{Result, bail};

use crate::domain::Note;

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult<'n> {
    /// Exactly one note matched.
    Unique(&'n Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<&'n Note>),
    /// No notes matched.
    NotFound,
}

/// Prints detailed information about ambiguous notes to help distinguish them.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[&Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {}", note.id().prefix(), note.title());

        if !note.tags().is_empty() {
            let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
            eprintln!("      tags: {}", tags.join(", "));
        }
    }
    eprintln!();
    eprintln!("Use the ID prefix to specify which note you mean.");
}

/// Resolves a note identifier against the collection.
///
/// Resolution order:
/// 1. ID prefix match (if input looks like a ULID prefix)
/// 2. Case-insensitive title match (first in collection order)
///
/// Returns `Unique` if exactly one note matches across both methods,
/// `Ambiguous` if several do, or `NotFound` if none does.
pub fn resolve_note<'n>(notes: &'n [Note], identifier: &str) -> ResolveResult<'n> {
    let identifier = identifier.trim();

    let looks_like_id =
        identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_alphanumeric());

    let mut candidates: Vec<&Note> = Vec::new();

    if looks_like_id {
        let id_matches: Vec<&Note> = notes
            .iter()
            .filter(|n| n.id().starts_with(identifier))
            .collect();

        // ID matches are the most precise
        if let [only] = id_matches.as_slice() {
            return ResolveResult::Unique(*only);
        }

        candidates.extend(id_matches);
    }

    if let Some(by_title) = notes.iter().find(|n| n.title_matches(identifier))
        && !candidates.iter().any(|c| c.id() == by_title.id())
    {
        candidates.push(by_title);
    }

    match candidates.len() {
        0 => ResolveResult::NotFound,
        1 => ResolveResult::Unique(candidates[0]),
        _ => ResolveResult::Ambiguous(candidates),
    }
}

/// Resolves `identifier` or fails with a message naming it.
pub(crate) fn require_note<'n>(notes: &'n [Note], identifier: &str) -> Result<&'n Note> {
    match resolve_note(notes, identifier) {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(matches) => {
            print_ambiguous_notes(identifier, &matches);
            bail!("ambiguous note identifier: {}", identifier)
        }
        ResolveResult::NotFound => bail!("note not found: {}", identifier),
    }
}
