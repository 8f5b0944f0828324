//! List command handler.

use anyhow::{Result, anyhow};
use std::path::Path;

use super::{Garden, parse_tags, print_note_table};
use crate::cli::ListArgs;
use crate::cli::date_filter::date_range;
use crate::cli::output::{NoteListing, OutputFormat, print_json};
use crate::search::{SearchEngine, SearchOptions, refine};

pub fn handle_list(args: &ListArgs, data_dir: &Path) -> Result<()> {
    let tags = parse_tags(&args.tags)?;
    let range = date_range(args.from.as_deref(), args.to.as_deref())
        .map_err(|e| anyhow!("invalid date range: {}", e))?;

    let garden = Garden::open(data_dir)?;
    let notes = garden.notes();

    // An empty query returns every note; selected tags narrow it (AND).
    let mut engine = SearchEngine::new(notes, SearchOptions::default());
    for tag in tags {
        engine.select_tag(tag);
    }
    let listed = refine(engine.results(notes), range.as_ref(), args.sort, args.order);

    match args.format {
        OutputFormat::Human => print_note_table(&listed, "note"),
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = listed.iter().map(|n| NoteListing::new(n)).collect();
            print_json(listings)?
        }
    }
    Ok(())
}
