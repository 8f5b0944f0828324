//! Graph and tags command handlers.

use anyhow::Result;
use std::path::Path;

use super::{Garden, truncate_str};
use crate::cli::output::{GraphListing, NodeListing, OutputFormat, TagListing, print_json};
use crate::cli::{GraphArgs, TagsArgs};
use crate::domain::NoteId;
use crate::graph::build_graph;
use crate::tags::tag_counts;

pub fn handle_graph(args: &GraphArgs, data_dir: &Path) -> Result<()> {
    let garden = Garden::open(data_dir)?;
    let graph = build_graph(garden.notes());

    match args.format {
        OutputFormat::Human => {
            if graph.is_empty() {
                println!("No notes found.");
                return Ok(());
            }

            println!(
                "{:<10}  {:<40}  {:>5}  {:>5}  {:<6}",
                "ID", "Title", "Links", "Size", "Tier"
            );
            for node in &graph.nodes {
                println!(
                    "{:<10}  {:<40}  {:>5}  {:>5.0}  {:<6}",
                    node.id.prefix(),
                    truncate_str(&node.title, 40),
                    node.connections,
                    node.size,
                    node.tier()
                );
            }

            if !graph.edges.is_empty() {
                println!();
                let title_of =
                    |id: &NoteId| graph.node(id).map(|n| n.title.as_str()).unwrap_or("?");
                for edge in &graph.edges {
                    let marker = if edge.is_emphasized() { " *" } else { "" };
                    println!(
                        "{} -- {}  (strength {}){}",
                        title_of(&edge.source),
                        title_of(&edge.target),
                        edge.strength,
                        marker
                    );
                }
            }

            println!();
            println!(
                "{} note(s), {} connection(s)",
                graph.nodes.len(),
                graph.edges.len()
            );
        }
        OutputFormat::Json => print_json(GraphListing {
            nodes: graph.nodes.iter().map(NodeListing::from).collect(),
            edges: &graph.edges,
        })?,
    }
    Ok(())
}

pub fn handle_tags(args: &TagsArgs, data_dir: &Path) -> Result<()> {
    let garden = Garden::open(data_dir)?;
    let mut counts = tag_counts(garden.notes());
    if let Some(limit) = args.limit {
        counts.truncate(limit);
    }

    match args.format {
        OutputFormat::Human => {
            if counts.is_empty() {
                println!("No tags found.");
            }
            for count in &counts {
                println!("{:>5}  {}", count.count, count.tag);
            }
        }
        OutputFormat::Json => {
            let listings: Vec<TagListing> = counts
                .iter()
                .map(|c| TagListing {
                    name: c.tag.to_string(),
                    count: c.count,
                })
                .collect();
            print_json(listings)?
        }
    }
    Ok(())
}
