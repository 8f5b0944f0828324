//! Note graph: deduplicated undirected edges, connection counts, layout.

mod layout;

pub use layout::{Position, VisualTier, golden_angle, node_size, spiral_position};

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::domain::{Note, NoteId};
use crate::links::{TitleLookup, link_titles};

/// Upper bound on edge strength.
const MAX_STRENGTH: usize = 5;
/// Edges stronger than this are emphasized.
const EMPHASIS_THRESHOLD: usize = 2;

/// One note in the graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: NoteId,
    pub title: String,
    pub connections: usize,
    pub position: Position,
    pub size: f64,
}

impl GraphNode {
    /// Rendering bucket derived from the connection count.
    pub fn tier(&self) -> VisualTier {
        VisualTier::from_connections(self.connections)
    }
}

/// An undirected link between two distinct notes.
///
/// `source` is the note whose reference created the edge first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphEdge {
    pub source: NoteId,
    pub target: NoteId,
    pub strength: usize,
    /// Set for strong edges a renderer may animate or highlight.
    pub emphasized: bool,
}

impl GraphEdge {
    fn new(source: &NoteId, target: &NoteId, strength: usize) -> Self {
        Self {
            source: source.clone(),
            target: target.clone(),
            strength,
            emphasized: strength > EMPHASIS_THRESHOLD,
        }
    }

    pub fn is_emphasized(&self) -> bool {
        self.emphasized
    }

    /// True if the edge touches `id`.
    pub fn touches(&self, id: &NoteId) -> bool {
        &self.source == id || &self.target == id
    }
}

/// Nodes in collection order and edges in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graph {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl Graph {
    /// Looks up a node by note id.
    pub fn node(&self, id: &NoteId) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| &n.id == id)
    }

    /// Returns the ids of the notes sharing an edge with `id`.
    pub fn neighbors(&self, id: &NoteId) -> Vec<&NoteId> {
        self.edges
            .iter()
            .filter_map(|e| {
                if &e.source == id {
                    Some(&e.target)
                } else if &e.target == id {
                    Some(&e.source)
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds the graph for `notes`.
///
/// An edge exists between A and B if either references the other; it is
/// created once, the first time either direction is seen, and self
/// references are skipped. Strength is the source note's total reference
/// count capped at 5. Layout and size are pure functions of the node's index
/// and connection count, so the same collection in the same order always
/// yields the same graph.
pub fn build_graph(notes: &[Note]) -> Graph {
    let lookup = TitleLookup::new(notes);
    let mut seen: HashSet<(&NoteId, &NoteId)> = HashSet::new();
    let mut connections: HashMap<&NoteId, usize> = HashMap::with_capacity(notes.len());
    let mut edges = Vec::new();

    for note in notes {
        let titles = link_titles(note.content());
        let strength = titles.len().min(MAX_STRENGTH);

        for title in &titles {
            let Some(target) = lookup.resolve(title) else {
                continue;
            };
            if target.id() == note.id() {
                continue;
            }
            let forward = (note.id(), target.id());
            let reverse = (target.id(), note.id());
            if seen.contains(&forward) || seen.contains(&reverse) {
                continue;
            }
            seen.insert(forward);

            *connections.entry(note.id()).or_insert(0) += 1;
            *connections.entry(target.id()).or_insert(0) += 1;
            edges.push(GraphEdge::new(note.id(), target.id(), strength));
        }
    }

    let nodes = notes
        .iter()
        .enumerate()
        .map(|(index, note)| {
            let count = connections.get(note.id()).copied().unwrap_or(0);
            GraphNode {
                id: note.id().clone(),
                title: note.title().to_string(),
                connections: count,
                position: spiral_position(index, count),
                size: node_size(note.content().chars().count(), count),
            }
        })
        .collect();

    log::debug!("built graph: {} nodes, {} edges", notes.len(), edges.len());

    Graph { nodes, edges }
}
