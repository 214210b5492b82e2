//! draw.io diagram serializer.
//!
//! Maps a [`WorkflowStructure`](crate::workflow::WorkflowStructure) onto the
//! diagram editor's cell tree (`mxfile` → `diagram` → `mxGraphModel` → `root`
//! → `mxCell`s) and writes it as UTF-8 XML. Building the tree and encoding it
//! are separate steps, so a bad structure fails before any file is touched.

pub mod build;
pub mod encode;
pub mod model;

pub use build::{NodeIdMap, build_document};
pub use encode::{encode, write_document};

use std::path::PathBuf;

// =============================================================================
// ERROR
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum DrawioError {
    /// A connection endpoint names a node id that no node carries.
    #[error("connection {connection} references unknown node '{id}'")]
    UnresolvedNodeReference { connection: String, id: String },

    /// The cell tree could not be encoded as XML.
    #[error("XML encoding failed: {0}")]
    Encode(String),

    /// The output file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl crate::error::ErrorCode for DrawioError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnresolvedNodeReference { .. } => "E_UNRESOLVED_NODE_REFERENCE",
            Self::Encode(_) => "E_SERIALIZATION_ENCODE",
            Self::Write { .. } => "E_SERIALIZATION_WRITE",
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
