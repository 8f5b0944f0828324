//! Deterministic layout formulas and visual tiers for graph nodes.

use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

/// Base spiral spacing per √index.
const SPIRAL_SPACING: f64 = 40.0;
/// How far each connection pulls a node toward the center.
const CONNECTION_PULL: f64 = 15.0;

const MIN_SIZE: f64 = 80.0;
const MAX_SIZE: f64 = 160.0;
const MAX_CONTENT_SCORE: f64 = 8.0;
const CHARS_PER_CONTENT_POINT: f64 = 200.0;

/// A point in the 2-D layout plane, centered on the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// The golden angle, π·(3 − √5).
pub fn golden_angle() -> f64 {
    PI * (3.0 - 5f64.sqrt())
}

/// Places the node at ordinal `index` on a golden-angle spiral.
///
/// Radius is `√index·40 − connections·15`. A negative radius lands the node
/// on the opposite side of the center.
pub fn spiral_position(index: usize, connections: usize) -> Position {
    let angle = index as f64 * golden_angle();
    let radius = (index as f64).sqrt() * SPIRAL_SPACING - connections as f64 * CONNECTION_PULL;
    Position {
        x: radius * angle.cos(),
        y: radius * angle.sin(),
    }
}

/// Node size from content length (in characters) and connection count,
/// clamped to `[80, 160]`.
pub fn node_size(content_len: usize, connections: usize) -> f64 {
    let content_score = (content_len as f64 / CHARS_PER_CONTENT_POINT).min(MAX_CONTENT_SCORE);
    let connection_score = connections as f64 * 3.0;
    (MIN_SIZE + (content_score + connection_score) * 4.0).clamp(MIN_SIZE, MAX_SIZE)
}

/// Coarse connectivity bucket a renderer can map to colors or effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualTier {
    None,
    Low,
    Medium,
    High,
}

impl VisualTier {
    pub fn from_connections(connections: usize) -> Self {
        match connections {
            0 => VisualTier::None,
            1..=2 => VisualTier::Low,
            3..=5 => VisualTier::Medium,
            _ => VisualTier::High,
        }
    }

    /// Lowercase name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            VisualTier::None => "none",
            VisualTier::Low => "low",
            VisualTier::Medium => "medium",
            VisualTier::High => "high",
        }
    }
}

impl fmt::Display for VisualTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
