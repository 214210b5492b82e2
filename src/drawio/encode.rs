//! Cell tree → UTF-8 XML bytes on disk.

use std::borrow::Cow;
use std::path::Path;

use quick_xml::Writer;
use quick_xml::events::attributes::Attribute;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::name::QName;
use tracing::info;

use super::DrawioError;
use super::model::{Cell, CellKind, Geometry, MxFile};

type XmlWriter = Writer<Vec<u8>>;

/// Encode the whole document, XML declaration included.
///
/// # Errors
///
/// Returns [`DrawioError::Encode`] if the writer rejects an event.
pub fn encode(doc: &MxFile) -> Result<Vec<u8>, DrawioError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(encode_error)?;

    open(&mut writer, BytesStart::new("mxfile"))?;
    let mut diagram = BytesStart::new("diagram");
    diagram.push_attribute(attribute("name", doc.diagram.name.as_str()));
    open(&mut writer, diagram)?;
    open(&mut writer, BytesStart::new("mxGraphModel"))?;
    open(&mut writer, BytesStart::new("root"))?;

    for cell in doc.cells() {
        write_cell(&mut writer, cell)?;
    }

    close(&mut writer, "root")?;
    close(&mut writer, "mxGraphModel")?;
    close(&mut writer, "diagram")?;
    close(&mut writer, "mxfile")?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    Ok(bytes)
}

/// Encode `doc` and replace whatever is at `path` with it.
///
/// Encoding finishes before the file is opened, so an encoding failure leaves
/// any existing file untouched.
///
/// # Errors
///
/// Returns [`DrawioError::Encode`] or [`DrawioError::Write`].
pub fn write_document(doc: &MxFile, path: &Path) -> Result<(), DrawioError> {
    let bytes = encode(doc)?;
    std::fs::write(path, &bytes).map_err(|source| DrawioError::Write { path: path.to_path_buf(), source })?;
    info!(
        path = %path.display(),
        vertices = doc.cells().iter().filter(|c| c.is_vertex()).count(),
        edges = doc.cells().iter().filter(|c| c.is_edge()).count(),
        bytes = bytes.len(),
        "drawio: diagram written"
    );
    Ok(())
}

// =============================================================================
// ELEMENTS
// =============================================================================

fn write_cell(writer: &mut XmlWriter, cell: &Cell) -> Result<(), DrawioError> {
    let mut start = BytesStart::new("mxCell");
    start.push_attribute(attribute("id", cell.id.as_str()));
    if let Some(value) = &cell.value {
        start.push_attribute(attribute("value", value.as_str()));
    }
    if let Some(style) = &cell.style {
        start.push_attribute(attribute("style", style.as_str()));
    }
    match &cell.kind {
        CellKind::Structural => {}
        CellKind::Vertex => start.push_attribute(attribute("vertex", "1")),
        CellKind::Edge { source, target } => {
            start.push_attribute(attribute("edge", "1"));
            start.push_attribute(attribute("source", source.as_str()));
            start.push_attribute(attribute("target", target.as_str()));
        }
    }
    if let Some(parent) = &cell.parent {
        start.push_attribute(attribute("parent", parent.as_str()));
    }

    let Some(geometry) = cell.geometry else {
        return writer.write_event(Event::Empty(start)).map_err(encode_error);
    };
    open(writer, start)?;
    writer
        .write_event(Event::Empty(geometry_element(geometry)))
        .map_err(encode_error)?;
    close(writer, "mxCell")
}

fn geometry_element(geometry: Geometry) -> BytesStart<'static> {
    let mut elem = BytesStart::new("mxGeometry");
    elem.push_attribute(attribute("as", "geometry"));
    match geometry {
        Geometry::Bounds { x, y, width, height } => {
            elem.push_attribute(attribute("x", x.to_string().as_str()));
            elem.push_attribute(attribute("y", y.to_string().as_str()));
            elem.push_attribute(attribute("width", width.to_string().as_str()));
            elem.push_attribute(attribute("height", height.to_string().as_str()));
        }
        Geometry::Relative => elem.push_attribute(attribute("relative", "1")),
    }
    elem
}

/// Attribute with its value escaped up front. Newlines, carriage returns and
/// tabs become character references so readers do not normalize them away.
fn attribute<'a>(key: &'a str, value: &str) -> Attribute<'a> {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\n' => escaped.push_str("&#10;"),
            '\r' => escaped.push_str("&#13;"),
            '\t' => escaped.push_str("&#9;"),
            _ => escaped.push(ch),
        }
    }
    Attribute { key: QName(key.as_bytes()), value: Cow::Owned(escaped.into_bytes()) }
}

fn open(writer: &mut XmlWriter, start: BytesStart<'_>) -> Result<(), DrawioError> {
    writer.write_event(Event::Start(start)).map_err(encode_error)
}

fn close(writer: &mut XmlWriter, name: &str) -> Result<(), DrawioError> {
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(encode_error)
}

fn encode_error(err: impl std::fmt::Display) -> DrawioError {
    DrawioError::Encode(err.to_string())
}
