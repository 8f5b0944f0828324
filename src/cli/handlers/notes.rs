//! New, edit and rm command handlers.

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::resolve::require_note;
use super::{Garden, parse_tags};
use crate::cli::output::{NoteListing, OutputFormat, print_json};
use crate::cli::{EditArgs, NewArgs, RmArgs};
use crate::domain::NotePatch;
use crate::links::find_backlinks;
use crate::store::NoteStore;

pub fn handle_new(args: &NewArgs, data_dir: &Path) -> Result<()> {
    let tags = parse_tags(&args.tags)?;

    let mut garden = Garden::open(data_dir)?;
    let note = garden
        .store_mut()
        .add(&args.title, &args.content, tags)
        .with_context(|| "failed to create note")?;
    garden.save()?;

    match args.format {
        OutputFormat::Human => println!("Created {}  {}", note.id().prefix(), note.title()),
        OutputFormat::Json => print_json(NoteListing::new(&note))?,
    }
    Ok(())
}

/// Builds the patch described by the edit flags.
pub(crate) fn edit_patch(args: &EditArgs) -> Result<NotePatch> {
    let tags = if args.clear_tags {
        Some(Vec::new())
    } else if !args.tags.is_empty() {
        Some(parse_tags(&args.tags)?)
    } else {
        None
    };

    Ok(NotePatch {
        title: args.title.clone(),
        content: args.content.clone(),
        tags,
    })
}

pub fn handle_edit(args: &EditArgs, data_dir: &Path) -> Result<()> {
    let patch = edit_patch(args)?;
    if patch.is_empty() {
        bail!("nothing to change: pass --title, --content, --tag or --clear-tags");
    }

    let mut garden = Garden::open(data_dir)?;
    let id = require_note(garden.notes(), &args.note)?.id().clone();

    garden
        .store_mut()
        .update(&id, patch)
        .with_context(|| format!("failed to update note {}", id.prefix()))?;
    garden.save()?;

    let Some(note) = garden.store_mut().get_by_id(&id) else {
        bail!("note disappeared during update: {}", id);
    };
    match args.format {
        OutputFormat::Human => println!("Updated {}  {}", note.id().prefix(), note.title()),
        OutputFormat::Json => print_json(NoteListing::new(note))?,
    }
    Ok(())
}

pub fn handle_rm(args: &RmArgs, data_dir: &Path) -> Result<()> {
    let mut garden = Garden::open(data_dir)?;

    let note = require_note(garden.notes(), &args.note)?;
    let (id, title) = (note.id().clone(), note.title().to_string());
    let dangling = find_backlinks(note, garden.notes()).len();

    garden
        .store_mut()
        .delete(&id)
        .with_context(|| format!("failed to delete note {}", id.prefix()))?;
    garden.save()?;

    println!("Deleted {}  {}", id.prefix(), title);
    if dangling > 0 {
        println!("{} note(s) still link to [[{}]]", dangling, title);
    }
    Ok(())
}
