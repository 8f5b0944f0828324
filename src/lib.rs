//! garden - a personal knowledge base of linked notes
//!
//! Notes reference each other with `[[Title]]`. The crate parses those
//! references, computes backlinks, builds a graph of the collection, runs
//! fuzzy tag-aware search and keeps one daily note per day.

pub mod cli;
pub mod domain;
pub mod graph;
pub mod links;
pub mod search;
pub mod store;
pub mod tags;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use log::LevelFilter;

use cli::{
    Cli, Command,
    config::Config,
    handlers::{
        handle_backlinks, handle_daily, handle_edit, handle_graph, handle_history, handle_list,
        handle_new, handle_rm, handle_search, handle_show, handle_suggest, handle_tags,
        handle_today,
    },
};

/// Sets up logging to stderr. `RUST_LOG` wins over the `-v` count.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = env_logger::Builder::new();
    builder.filter_level(level).parse_default_env();
    // a logger may already be installed when embedded
    let _ = builder.try_init();
}

/// Main entry point for the CLI application.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Command::Completions(args) = &cli.command {
        clap_complete::generate(args.shell, &mut Cli::command(), "garden", &mut std::io::stdout());
        return Ok(());
    }

    let config = Config::load()?;
    let data_dir = config.data_dir(cli.dir.as_ref());
    log::debug!("using data directory {}", data_dir.display());

    match &cli.command {
        Command::New(args) => handle_new(args, &data_dir),
        Command::Edit(args) => handle_edit(args, &data_dir),
        Command::Rm(args) => handle_rm(args, &data_dir),
        Command::Show(args) => handle_show(args, &data_dir),
        Command::List(args) => handle_list(args, &data_dir),
        Command::Search(args) => handle_search(args, &data_dir, &config),
        Command::History(args) => handle_history(args, &data_dir, &config),
        Command::Backlinks(args) => handle_backlinks(args, &data_dir),
        Command::Graph(args) => handle_graph(args, &data_dir),
        Command::Tags(args) => handle_tags(args, &data_dir),
        Command::Suggest(args) => handle_suggest(args, &data_dir, &config),
        Command::Today(args) => handle_today(args, &data_dir, &config),
        Command::Daily(args) => handle_daily(args, &data_dir),
        Command::Completions(_) => Ok(()),
    }
}
