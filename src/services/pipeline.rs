//! Pipeline — sheet → description lines → inferred structure → diagram file.
//!
//! DESIGN
//! ======
//! Strictly one-way and single-shot: every stage runs once and the first
//! error ends the run. The diagram tree is fully built before the output file
//! is opened.

use std::path::{Path, PathBuf};

use tracing::info;

use super::inference::{InferenceError, infer_structure};
use crate::drawio::{self, DrawioError};
use crate::llm::LlmChat;
use crate::llm::types::LlmError;
use crate::sheet::{self, SheetError};
use crate::workflow::WorkflowStructure;

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error(transparent)]
    Sheet(#[from] SheetError),
    #[error("sheet '{sheet}' has no workflow rows")]
    EmptyWorkflow { sheet: String },
    #[error(transparent)]
    Config(#[from] LlmError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Drawio(#[from] DrawioError),
    #[error("failed to write structure to {}: {message}", .path.display())]
    StructureDump { path: PathBuf, message: String },
}

impl crate::error::ErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Sheet(e) => e.error_code(),
            Self::EmptyWorkflow { .. } => "E_EMPTY_WORKFLOW",
            Self::Config(e) => e.error_code(),
            Self::Inference(e) => e.error_code(),
            Self::Drawio(e) => e.error_code(),
            Self::StructureDump { .. } => "E_SERIALIZATION_WRITE",
        }
    }
}

/// Everything one run needs besides the model client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub input: PathBuf,
    pub sheet: String,
    pub output: PathBuf,
    pub max_tokens: u32,
    pub structure_out: Option<PathBuf>,
}

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub rows: usize,
    pub nodes: usize,
    pub connections: usize,
    pub output: PathBuf,
}

// =============================================================================
// STAGES
// =============================================================================

/// Load the sheet's description lines, rejecting a sheet with no rows.
///
/// # Errors
///
/// Returns [`PipelineError::Sheet`] for read and column failures and
/// [`PipelineError::EmptyWorkflow`] when no data rows remain.
pub fn load(opts: &RunOptions) -> Result<Vec<String>, PipelineError> {
    let lines = sheet::load_descriptions(&opts.input, &opts.sheet)?;
    if lines.is_empty() {
        return Err(PipelineError::EmptyWorkflow { sheet: opts.sheet.clone() });
    }
    Ok(lines)
}

/// Run the whole pipeline once.
///
/// # Errors
///
/// Returns the first stage failure; see [`PipelineError`].
pub async fn run(opts: &RunOptions, llm: &dyn LlmChat) -> Result<RunSummary, PipelineError> {
    let lines = load(opts)?;
    generate_diagram(&lines, llm, opts).await
}

/// Infer the structure behind `lines` and write it as a diagram.
///
/// # Errors
///
/// Returns [`PipelineError::Inference`], [`PipelineError::StructureDump`] or
/// [`PipelineError::Drawio`].
pub async fn generate_diagram(
    lines: &[String],
    llm: &dyn LlmChat,
    opts: &RunOptions,
) -> Result<RunSummary, PipelineError> {
    let structure = infer_structure(llm, lines, opts.max_tokens).await?;

    if let Some(path) = &opts.structure_out {
        dump_structure(&structure, path)?;
    }

    let doc = drawio::build_document(&structure)?;
    drawio::write_document(&doc, &opts.output)?;

    info!(output = %opts.output.display(), "pipeline: done");
    Ok(RunSummary {
        rows: lines.len(),
        nodes: structure.nodes.len(),
        connections: structure.connections.len(),
        output: opts.output.clone(),
    })
}

fn dump_structure(structure: &WorkflowStructure, path: &Path) -> Result<(), PipelineError> {
    let dump_error = |message: String| PipelineError::StructureDump { path: path.to_path_buf(), message };
    let mut json = serde_json::to_string_pretty(structure).map_err(|e| dump_error(e.to_string()))?;
    json.push('\n');
    std::fs::write(path, json).map_err(|e| dump_error(e.to_string()))?;
    info!(path = %path.display(), "pipeline: structure written");
    Ok(())
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
