//! Workflow graph — the typed node/connection structure inferred by the model.
//!
//! DESIGN
//! ======
//! Produced once per run by `services::inference` and consumed immediately by
//! `drawio`. Node ids are opaque strings chosen by the model; they only need to
//! be unique within one structure so connections can reference them.

use serde::{Deserialize, Serialize};

/// Canvas the model is asked to fit the diagram into.
pub const CANVAS_WIDTH: i64 = 1000;
pub const CANVAS_HEIGHT: i64 = 800;

// =============================================================================
// TYPES
// =============================================================================

/// Shape of a diagram vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Start/end terminals.
    Ellipse,
    /// Plain process steps.
    Rectangle,
    /// Decision points.
    Rhombus,
}

impl Shape {
    /// Every shape, in schema order.
    pub const ALL: [Self; 3] = [Self::Ellipse, Self::Rectangle, Self::Rhombus];

    /// Name used both in the schema enum and in the diagram style string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ellipse => "ellipse",
            Self::Rectangle => "rectangle",
            Self::Rhombus => "rhombus",
        }
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A diagram vertex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Node {
    pub id: String,
    pub label: String,
    pub shape: Shape,
    pub x: i64,
    pub y: i64,
}

/// A directed edge between two nodes, with an optional branch label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Connection {
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Connection {
    /// The label to display, if it carries any text.
    #[must_use]
    pub fn display_label(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

/// Root aggregate: ordered nodes and ordered connections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WorkflowStructure {
    pub nodes: Vec<Node>,
    pub connections: Vec<Connection>,
}

impl WorkflowStructure {
    /// Nodes whose position falls outside the requested canvas.
    ///
    /// Positions are never adjusted; callers only report these.
    pub fn nodes_off_canvas(&self) -> impl Iterator<Item = &Node> {
        self.nodes
            .iter()
            .filter(|n| !(0..=CANVAS_WIDTH).contains(&n.x) || !(0..=CANVAS_HEIGHT).contains(&n.y))
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
