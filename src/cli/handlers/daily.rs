//! Today and daily command handlers.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;

use super::Garden;
use super::show::render_content;
use crate::cli::config::Config;
use crate::cli::output::{DailyListing, OutputFormat, TodayListing, print_json};
use crate::cli::{DailyArgs, TodayArgs};
use crate::links::TitleLookup;
use crate::store::daily::{daily_notes, daily_title, display_date, recent_daily_notes};
use crate::store::{DailyNotes, DailyOutcome};

pub fn handle_today(args: &TodayArgs, data_dir: &Path, config: &Config) -> Result<()> {
    let today = Local::now().date_naive();
    let title = daily_title(today);

    let mut garden = Garden::open(data_dir)?;
    let scheduler = DailyNotes::with_template(config.daily_template());
    let outcome = scheduler
        .ensure_today(garden.store_mut(), today)
        .with_context(|| format!("failed to create daily note {}", title))?;

    if let DailyOutcome::Created(_) = outcome {
        garden.save()?;
    }

    let note = garden
        .notes()
        .iter()
        .find(|n| n.id() == outcome.id())
        .with_context(|| format!("daily note {} missing after creation", title))?;
    let status = match outcome {
        DailyOutcome::Created(_) => "created",
        DailyOutcome::Existing(_) => "existing",
    };

    match args.format {
        OutputFormat::Human => {
            if status == "created" {
                println!("Created {}  {}", note.id().prefix(), note.title());
                println!();
            }
            let lookup = TitleLookup::new(garden.notes());
            println!("# {}", note.title());
            println!();
            println!("{}", render_content(note.content(), &lookup));
        }
        OutputFormat::Json => print_json(TodayListing {
            status,
            title,
            id: note.id().to_string(),
        })?,
    }
    Ok(())
}

pub fn handle_daily(args: &DailyArgs, data_dir: &Path) -> Result<()> {
    let today = Local::now().date_naive();
    let garden = Garden::open(data_dir)?;

    let notes = if args.all {
        daily_notes(garden.notes())
    } else {
        recent_daily_notes(garden.notes(), today)
    };

    let listings: Vec<DailyListing> = notes
        .iter()
        .map(|n| DailyListing {
            id: n.id().to_string(),
            title: n.title().to_string(),
            label: NaiveDate::parse_from_str(n.title(), "%Y-%m-%d")
                .map(|date| display_date(date, today))
                .unwrap_or_else(|_| n.title().to_string()),
        })
        .collect();

    match args.format {
        OutputFormat::Human => {
            if listings.is_empty() {
                println!("No daily notes found.");
            }
            for listing in &listings {
                let id_short = listing.id.get(..10).unwrap_or(&listing.id);
                println!("{:<10}  {}  {}", id_short, listing.title, listing.label);
            }
        }
        OutputFormat::Json => print_json(listings)?,
    }
    Ok(())
}
