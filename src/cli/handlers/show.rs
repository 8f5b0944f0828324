//! Show and backlinks command handlers.

use anyhow::Result;
use std::path::Path;

use super::resolve::require_note;
use super::{Garden, print_note_table};
use crate::cli::output::{LinkListing, NoteDetail, NoteListing, OutputFormat, print_json};
use crate::cli::{BacklinksArgs, ShowArgs};
use crate::links::{LinkTarget, Segment, TitleLookup, find_backlinks, forward_links, segments};

/// Renders content with `[[Title]](ID-prefix)` for resolved links and
/// `[[Title]](missing)` for unresolved ones.
pub(crate) fn render_content(content: &str, lookup: &TitleLookup<'_>) -> String {
    let mut out = String::with_capacity(content.len());
    for segment in segments(content, lookup) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Link {
                text,
                target: LinkTarget::Resolved(id),
            } => out.push_str(&format!("[[{}]]({})", text, id.prefix())),
            Segment::Link {
                text,
                target: LinkTarget::Missing(_),
            } => out.push_str(&format!("[[{}]](missing)", text)),
        }
    }
    out
}

pub fn handle_show(args: &ShowArgs, data_dir: &Path) -> Result<()> {
    let garden = Garden::open(data_dir)?;
    let notes = garden.notes();
    let note = require_note(notes, &args.note)?;

    let links = forward_links(note, notes);
    let backlinks = find_backlinks(note, notes);

    match args.format {
        OutputFormat::Human => {
            println!("# {}", note.title());
            println!();
            println!(
                "ID: {}  Created: {}  Updated: {}",
                note.id().prefix(),
                note.created().format("%Y-%m-%d"),
                note.updated().format("%Y-%m-%d")
            );

            if !note.tags().is_empty() {
                let tags: Vec<_> = note.tags().iter().map(|t| t.as_str()).collect();
                println!("Tags: {}", tags.join(", "));
            }

            println!();

            if !note.content().is_empty() {
                let lookup = TitleLookup::new(notes);
                println!("{}", render_content(note.content(), &lookup));
                println!();
            }

            if !links.is_empty() {
                println!("Links:");
                for link in &links {
                    match &link.target {
                        Some(id) => println!("  -> {} ({})", link.title, id.prefix()),
                        None => println!("  -> {} (missing)", link.title),
                    }
                }
            }

            if !backlinks.is_empty() {
                println!("Backlinks:");
                for backlink in &backlinks {
                    println!("  <- {} ({})", backlink.title(), backlink.id().prefix());
                }
            }
        }
        OutputFormat::Json => print_json(NoteDetail {
            note,
            links: links.iter().map(LinkListing::from).collect(),
            backlinks: backlinks.iter().map(|n| NoteListing::new(n)).collect(),
        })?,
    }
    Ok(())
}

pub fn handle_backlinks(args: &BacklinksArgs, data_dir: &Path) -> Result<()> {
    let garden = Garden::open(data_dir)?;
    let notes = garden.notes();
    let note = require_note(notes, &args.note)?;

    let backlinks = find_backlinks(note, notes);

    match args.format {
        OutputFormat::Human => print_note_table(&backlinks, "backlink"),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> =
                backlinks.iter().map(|n| NoteListing::new(n)).collect();
            print_json(listings)?
        }
    }
    Ok(())
}
