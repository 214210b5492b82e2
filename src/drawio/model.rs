//! Typed cell tree for the draw.io interchange format.

/// Name of the single diagram page.
pub const DIAGRAM_NAME: &str = "Workflow";

/// Implicit root cell every model starts with.
pub const ROOT_CELL_ID: &str = "0";
/// Default layer; every content cell is parented here.
pub const LAYER_CELL_ID: &str = "1";

pub const NODE_WIDTH: u32 = 120;
pub const NODE_HEIGHT: u32 = 60;

pub const EDGE_STYLE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=1;";

/// `<mxfile>` root element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MxFile {
    pub diagram: Diagram,
}

/// `<diagram name="...">` page wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagram {
    pub name: String,
    pub model: GraphModel,
}

/// `<mxGraphModel><root>` with its cells in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphModel {
    pub cells: Vec<Cell>,
}

/// Role of a cell, which decides its `vertex` / `edge` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellKind {
    /// The reserved root and layer cells.
    Structural,
    Vertex,
    Edge { source: String, target: String },
}

/// One `<mxCell>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub id: String,
    pub value: Option<String>,
    pub style: Option<String>,
    pub kind: CellKind,
    pub parent: Option<String>,
    pub geometry: Option<Geometry>,
}

/// The `<mxGeometry as="geometry">` child of a content cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    /// Vertex bounds on the canvas.
    Bounds { x: i64, y: i64, width: u32, height: u32 },
    /// Edge geometry, positioned relative to its endpoints.
    Relative,
}

impl Cell {
    /// Reserved cell `"0"`.
    #[must_use]
    pub fn root() -> Self {
        Self {
            id: ROOT_CELL_ID.into(),
            value: None,
            style: None,
            kind: CellKind::Structural,
            parent: None,
            geometry: None,
        }
    }

    /// Reserved cell `"1"`, parented to the root.
    #[must_use]
    pub fn layer() -> Self {
        Self { id: LAYER_CELL_ID.into(), parent: Some(ROOT_CELL_ID.into()), ..Self::root() }
    }

    #[must_use]
    pub fn is_vertex(&self) -> bool {
        matches!(self.kind, CellKind::Vertex)
    }

    #[must_use]
    pub fn is_edge(&self) -> bool {
        matches!(self.kind, CellKind::Edge { .. })
    }
}

impl MxFile {
    /// Wrap cells in the single `Workflow` page.
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { diagram: Diagram { name: DIAGRAM_NAME.into(), model: GraphModel { cells } } }
    }

    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.diagram.model.cells
    }
}

/// Style string for a vertex of the given shape.
#[must_use]
pub fn vertex_style(shape: &str) -> String {
    format!("shape={shape};whiteSpace=wrap;html=1;")
}
