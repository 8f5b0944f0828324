//! Tag usage counts across the collection.

use std::collections::HashMap;

use serde::Serialize;

use crate::domain::{Note, Tag};

/// A tag and the number of notes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCount {
    pub tag: Tag,
    pub count: usize,
}

/// Counts how many notes use each tag.
///
/// Sorted by count, highest first; equal counts keep the order in which the
/// tags were first encountered. The spelling shown is the first one seen.
pub fn tag_counts(notes: &[Note]) -> Vec<TagCount> {
    let mut counts: Vec<TagCount> = Vec::new();
    let mut slots: HashMap<&Tag, usize> = HashMap::new();

    for note in notes {
        for tag in note.tags() {
            match slots.get(tag) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    slots.insert(tag, counts.len());
                    counts.push(TagCount {
                        tag: tag.clone(),
                        count: 1,
                    });
                }
            }
        }
    }

    // stable: ties stay in discovery order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}
