//! Search, history and suggest command handlers.

use anyhow::{Context, Result, anyhow, bail};
use std::collections::HashMap;
use std::path::Path;

use super::{Garden, parse_tags, print_note_table};
use crate::cli::config::Config;
use crate::cli::date_filter::date_range;
use crate::cli::output::{NoteListing, OutputFormat, print_json};
use crate::cli::{HistoryArgs, SearchArgs, SuggestArgs};
use crate::domain::{Note, NoteId};
use crate::search::{DateRange, SearchEngine, SearchResult, SortBy, SortDirection, refine};
use crate::store::{load_history, save_history};

/// Opens the garden and builds an engine with the stored history restored.
fn open_engine(
    data_dir: &Path,
    config: &Config,
    threshold: Option<f64>,
) -> Result<(Garden, SearchEngine)> {
    let garden = Garden::open(data_dir)?;
    let mut engine = SearchEngine::new(garden.notes(), config.search_options(threshold));
    let history = load_history(garden.kv()).with_context(|| "failed to load search history")?;
    engine.restore_history(history);
    Ok((garden, engine))
}

fn store_history(garden: &mut Garden, engine: &SearchEngine) -> Result<()> {
    save_history(garden.kv_mut(), engine.history().entries())
        .with_context(|| "failed to save search history")
}

/// Runs the engine's current search, then applies the date range and ordering.
fn ranked<'n>(
    engine: &SearchEngine,
    notes: &'n [Note],
    range: Option<&DateRange>,
    sort_by: SortBy,
    direction: SortDirection,
) -> Vec<SearchResult<'n>> {
    let results = engine.search(notes);
    let scores: HashMap<&NoteId, Option<f64>> =
        results.iter().map(|r| (r.note.id(), r.score)).collect();

    let ordered = refine(
        results.iter().map(|r| r.note).collect(),
        range,
        sort_by,
        direction,
    );
    ordered
        .into_iter()
        .map(|note| SearchResult {
            note,
            score: scores.get(note.id()).copied().flatten(),
        })
        .collect()
}

fn print_results(results: &[SearchResult<'_>], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => {
            let notes: Vec<&Note> = results.iter().map(|r| r.note).collect();
            print_note_table(&notes, "result");
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = results
                .iter()
                .map(|r| NoteListing::with_score(r.note, r.score))
                .collect();
            print_json(listings)?
        }
    }
    Ok(())
}

pub fn handle_search(args: &SearchArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let tags = parse_tags(&args.tags)?;
    let range = date_range(args.from.as_deref(), args.to.as_deref())
        .map_err(|e| anyhow!("invalid date range: {}", e))?;

    let (mut garden, mut engine) = open_engine(data_dir, config, args.threshold)?;
    engine.set_query(args.query.as_str());
    for tag in tags {
        engine.select_tag(tag);
    }

    if !args.no_history && engine.add_to_history(&args.query) {
        store_history(&mut garden, &engine)?;
    }

    let results = ranked(&engine, garden.notes(), range.as_ref(), args.sort, args.order);
    print_results(&results, args.format)
}

pub fn handle_history(args: &HistoryArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let (mut garden, mut engine) = open_engine(data_dir, config, None)?;

    if let Some(n) = args.select {
        let Some(query) = n.checked_sub(1).and_then(|i| engine.history().get(i)) else {
            bail!("no search history entry {} ({} stored)", n, engine.history().len());
        };
        let query = query.to_string();
        engine.select_from_history(&query);
        store_history(&mut garden, &engine)?;

        let results = ranked(
            &engine,
            garden.notes(),
            None,
            SortBy::Relevance,
            SortDirection::Desc,
        );
        return print_results(&results, args.format);
    }

    let entries = engine.history().entries();
    match args.format {
        OutputFormat::Human => {
            if entries.is_empty() {
                println!("No search history.");
            }
            for (i, entry) in entries.iter().enumerate() {
                println!("{:>3}. {}", i + 1, entry);
            }
        }
        OutputFormat::Json => print_json(entries)?,
    }
    Ok(())
}

pub fn handle_suggest(args: &SuggestArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let tags = parse_tags(&args.tags)?;

    let garden = Garden::open(data_dir)?;
    let mut engine = SearchEngine::new(garden.notes(), config.search_options(None));
    for tag in tags {
        engine.select_tag(tag);
    }

    let suggestions = engine.suggestions(garden.notes(), &args.input);
    match args.format {
        OutputFormat::Human => {
            for suggestion in &suggestions {
                println!("{}", suggestion);
            }
        }
        OutputFormat::Json => print_json(suggestions)?,
    }
    Ok(())
}
