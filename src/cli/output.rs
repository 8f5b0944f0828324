//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::Note;
use crate::graph::{GraphEdge, GraphNode, Position, VisualTier};
use crate::links::ResolvedReference;

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Prints `data` as pretty JSON wrapped in `{"data": ...}`.
pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&Output::new(data))?);
    Ok(())
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl NoteListing {
    pub fn new(note: &Note) -> Self {
        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            tags: note.tags().iter().map(|t| t.to_string()).collect(),
            created: note.created(),
            updated: note.updated(),
            score: None,
        }
    }

    pub fn with_score(note: &Note, score: Option<f64>) -> Self {
        Self {
            score,
            ..Self::new(note)
        }
    }
}

/// A tag with its usage count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    pub count: usize,
}

/// A reference made by a note.
#[derive(Debug, Serialize)]
pub struct LinkListing {
    pub title: String,
    /// Target note id, absent for missing links.
    pub id: Option<String>,
}

impl From<&ResolvedReference> for LinkListing {
    fn from(reference: &ResolvedReference) -> Self {
        Self {
            title: reference.title.clone(),
            id: reference.target.as_ref().map(|id| id.to_string()),
        }
    }
}

/// A note with its rendered links and backlinks.
#[derive(Debug, Serialize)]
pub struct NoteDetail<'n> {
    pub note: &'n Note,
    pub links: Vec<LinkListing>,
    pub backlinks: Vec<NoteListing>,
}

/// A graph node with its visual tier.
#[derive(Debug, Serialize)]
pub struct NodeListing<'g> {
    pub id: String,
    pub title: &'g str,
    pub connections: usize,
    pub position: Position,
    pub size: f64,
    pub tier: VisualTier,
}

impl<'g> From<&'g GraphNode> for NodeListing<'g> {
    fn from(node: &'g GraphNode) -> Self {
        Self {
            id: node.id.to_string(),
            title: &node.title,
            connections: node.connections,
            position: node.position,
            size: node.size,
            tier: node.tier(),
        }
    }
}

/// The whole graph.
#[derive(Debug, Serialize)]
pub struct GraphListing<'g> {
    pub nodes: Vec<NodeListing<'g>>,
    pub edges: &'g [GraphEdge],
}

/// Result of the `today` command.
#[derive(Debug, Serialize)]
pub struct TodayListing {
    /// `created` or `existing`
    pub status: &'static str,
    pub title: String,
    pub id: String,
}

/// A daily note with its display label.
#[derive(Debug, Serialize)]
pub struct DailyListing {
    pub id: String,
    pub title: String,
    pub label: String,
}
