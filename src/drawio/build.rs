//! Workflow graph → cell tree.
//!
//! Nodes are emitted first, each under a fresh id (`n2`, `n3`, …, continuing
//! after the reserved cells); connections follow as `e1`, `e2`, … and resolve
//! their endpoints through the [`NodeIdMap`] filled by the node pass.

use std::collections::HashMap;

use tracing::{debug, warn};

use super::DrawioError;
use super::model::{Cell, CellKind, EDGE_STYLE, Geometry, LAYER_CELL_ID, MxFile, NODE_HEIGHT, NODE_WIDTH, vertex_style};
use crate::workflow::{Connection, Node, WorkflowStructure};

/// First generated node number; `0` and `1` belong to the reserved cells.
const FIRST_NODE_NUMBER: usize = 2;
const FIRST_EDGE_NUMBER: usize = 1;

// =============================================================================
// ID MAP
// =============================================================================

/// Lookup from model-supplied node ids to the ids emitted in the document.
#[derive(Debug, Default)]
pub struct NodeIdMap {
    ids: HashMap<String, String>,
}

impl NodeIdMap {
    /// Record `original → generated`. A repeated original id is remapped to
    /// the newer cell.
    pub fn insert(&mut self, original: &str, generated: String) {
        if let Some(previous) = self.ids.insert(original.to_owned(), generated) {
            warn!(node_id = original, previous = %previous, "drawio: duplicate node id, later node wins");
        }
    }

    /// Generated id for `original`, if a node carried it.
    #[must_use]
    pub fn get(&self, original: &str) -> Option<&str> {
        self.ids.get(original).map(String::as_str)
    }
}

// =============================================================================
// BUILD
// =============================================================================

/// Build the full diagram tree for one structure.
///
/// # Errors
///
/// Returns [`DrawioError::UnresolvedNodeReference`] if any connection names a
/// source or target id that no node carries.
pub fn build_document(structure: &WorkflowStructure) -> Result<MxFile, DrawioError> {
    let mut cells = Vec::with_capacity(structure.nodes.len() + structure.connections.len() + 2);
    cells.push(Cell::root());
    cells.push(Cell::layer());

    let ids = push_nodes(&structure.nodes, &mut cells);
    debug!(mapped = ids.ids.len(), "drawio: node ids assigned");
    push_connections(&structure.connections, &ids, &mut cells)?;

    Ok(MxFile::new(cells))
}

fn push_nodes(nodes: &[Node], cells: &mut Vec<Cell>) -> NodeIdMap {
    let mut ids = NodeIdMap::default();
    for (offset, node) in nodes.iter().enumerate() {
        let id = format!("n{}", FIRST_NODE_NUMBER + offset);
        ids.insert(&node.id, id.clone());
        cells.push(Cell {
            id,
            value: Some(node.label.clone()),
            style: Some(vertex_style(node.shape.as_str())),
            kind: CellKind::Vertex,
            parent: Some(LAYER_CELL_ID.into()),
            geometry: Some(Geometry::Bounds { x: node.x, y: node.y, width: NODE_WIDTH, height: NODE_HEIGHT }),
        });
    }
    ids
}

fn push_connections(connections: &[Connection], ids: &NodeIdMap, cells: &mut Vec<Cell>) -> Result<(), DrawioError> {
    for (offset, conn) in connections.iter().enumerate() {
        let id = format!("e{}", FIRST_EDGE_NUMBER + offset);
        let resolve = |original: &str| {
            ids.get(original)
                .map(str::to_owned)
                .ok_or_else(|| DrawioError::UnresolvedNodeReference { connection: id.clone(), id: original.to_owned() })
        };
        let source = resolve(&conn.source)?;
        let target = resolve(&conn.target)?;
        cells.push(Cell {
            id,
            value: conn.display_label().map(str::to_owned),
            style: Some(EDGE_STYLE.into()),
            kind: CellKind::Edge { source, target },
            parent: Some(LAYER_CELL_ID.into()),
            geometry: Some(Geometry::Relative),
        });
    }
    Ok(())
}
