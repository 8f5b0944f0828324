//! CLI command definitions and handlers

pub mod config;
pub mod date_filter;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::search::{SortBy, SortDirection};
use output::OutputFormat;

/// garden - linked notes with fuzzy search, backlinks and a note graph
#[derive(Parser, Debug)]
#[command(name = "garden", version, about, long_about = None)]
pub struct Cli {
    /// Data directory (overrides config file)
    #[arg(short = 'd', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new note
    New(NewArgs),

    /// Change a note's title, content or tags
    Edit(EditArgs),

    /// Delete a note
    Rm(RmArgs),

    /// Show a note with its links and backlinks
    Show(ShowArgs),

    /// List notes, optionally filtered by tags and dates
    #[command(name = "ls")]
    List(ListArgs),

    /// Fuzzy search across titles, content and tags
    Search(SearchArgs),

    /// Show recent searches or re-run one
    History(HistoryArgs),

    /// Show notes that link to a given note
    Backlinks(BacklinksArgs),

    /// Show the note graph
    Graph(GraphArgs),

    /// List tags with usage counts
    Tags(TagsArgs),

    /// Suggest titles and tags for partial input
    Suggest(SuggestArgs),

    /// Open today's daily note, creating it if needed
    Today(TodayArgs),

    /// List recent daily notes
    Daily(DailyArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `new` command
#[derive(Parser, Debug)]
pub struct NewArgs {
    /// Note title
    pub title: String,

    /// Note content; may contain [[Title]] references
    #[arg(short, long, default_value = "")]
    pub content: String,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `edit` command
#[derive(Parser, Debug)]
pub struct EditArgs {
    /// Note ID or title
    pub note: String,

    /// New title
    #[arg(long)]
    pub title: Option<String>,

    /// New content (replaces the old content)
    #[arg(short, long)]
    pub content: Option<String>,

    /// Tag for the note (replaces all tags, can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Remove all tags from the note
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note ID or title
    pub note: String,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Filter by tag (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortBy::Updated)]
    pub sort: SortBy,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
    pub order: SortDirection,

    /// Only notes created on or after this date (YYYY-MM-DD or relative like "7d")
    #[arg(long)]
    pub from: Option<String>,

    /// Only notes created on or before this date (YYYY-MM-DD or relative like "7d")
    #[arg(long)]
    pub to: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `search` command
#[derive(Parser, Debug)]
pub struct SearchArgs {
    /// Search query; `#word` also requires the tag `word`
    pub query: String,

    /// Filter results by tag (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Fuzzy threshold from 0 (exact) to 1 (anything)
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Sort order
    #[arg(long, value_enum, default_value_t = SortBy::Relevance)]
    pub sort: SortBy,

    /// Sort direction
    #[arg(long, value_enum, default_value_t = SortDirection::Desc)]
    pub order: SortDirection,

    /// Only notes created on or after this date (YYYY-MM-DD or relative like "7d")
    #[arg(long)]
    pub from: Option<String>,

    /// Only notes created on or before this date (YYYY-MM-DD or relative like "7d")
    #[arg(long)]
    pub to: Option<String>,

    /// Do not record the query in search history
    #[arg(long)]
    pub no_history: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `history` command
#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Re-run the Nth most recent search (1 = newest)
    #[arg(long, value_name = "N")]
    pub select: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `backlinks` command
#[derive(Parser, Debug)]
pub struct BacklinksArgs {
    /// Note ID or title
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug)]
pub struct GraphArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Show only the N most used tags
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `suggest` command
#[derive(Parser, Debug)]
pub struct SuggestArgs {
    /// Partial query
    pub input: String,

    /// Already selected tag, left out of tag suggestions (repeatable)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `today` command
#[derive(Parser, Debug)]
pub struct TodayArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `daily` command
#[derive(Parser, Debug)]
pub struct DailyArgs {
    /// List every daily note instead of the last week
    #[arg(short, long)]
    pub all: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}
