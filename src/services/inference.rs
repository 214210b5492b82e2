//! Structure inference — description lines → LLM → typed workflow graph.
//!
//! DESIGN
//! ======
//! Builds one prompt from the sheet's description lines, forces the model to
//! answer through the `emit_workflow_structure` tool, and deserializes the
//! tool arguments strictly. Anything short of a schema-conformant structure is
//! an error; there is no partial result and no retry.

use std::fmt::Write;

use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::llm::LlmChat;
use crate::llm::tools::{WORKFLOW_STRUCTURE_TOOL, workflow_structure_tool};
use crate::llm::types::{LlmError, Message};
use crate::workflow::{CANVAS_HEIGHT, CANVAS_WIDTH, WorkflowStructure};

pub const DEFAULT_AI_MAX_TOKENS: u32 = 4096;

pub const SYSTEM_PROMPT: &str = "You are an assistant that generates workflow structures in JSON format.";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),
    #[error("model output does not match the workflow schema: {0}")]
    Schema(String),
}

impl crate::error::ErrorCode for InferenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Llm(e) => e.error_code(),
            Self::Schema(_) => "E_INFERENCE_SCHEMA",
        }
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// Build the user prompt from description lines, kept in sheet order.
#[must_use]
pub fn build_prompt(lines: &[String]) -> String {
    let mut prompt = String::from(
        "Analyze the following workflow description and suggest an improved structure for visualization:\n",
    );
    prompt.push_str("- Identify decision points and their branches (e.g., \"if yes\", \"if no\").\n");
    prompt.push_str("- Suggest relationships between nodes.\n");
    prompt.push_str(
        "- Evaluate each node label and, if possible, suggest a concise version to use in the diagram \
         without losing meaning.\n",
    );
    let _ = writeln!(
        prompt,
        "- Normalize the positions (x, y) of the nodes so that the diagram fits within a width of \
         {CANVAS_WIDTH} and a height of {CANVAS_HEIGHT}."
    );
    prompt.push_str("\nRespond by calling the provided tool with:\n");
    prompt.push_str(
        "- nodes: each node has an 'id', 'label', 'shape' (ellipse, rectangle, rhombus), and coordinates ('x', 'y').\n",
    );
    prompt.push_str(
        "- connections: each connection has a 'source', 'target', and an optional 'label' (e.g., \"Yes\", \"No\").\n",
    );
    prompt.push_str("\nWorkflow description:\n");
    for line in lines {
        prompt.push_str(line);
        prompt.push('\n');
    }
    prompt
}

// =============================================================================
// INFERENCE
// =============================================================================

/// Ask the model for the workflow graph behind `lines`.
///
/// # Errors
///
/// Returns [`InferenceError::Llm`] if the request fails, and
/// [`InferenceError::Schema`] if the reply is not a call to the workflow tool
/// with arguments that deserialize into [`WorkflowStructure`].
pub async fn infer_structure(
    llm: &dyn LlmChat,
    lines: &[String],
    max_tokens: u32,
) -> Result<WorkflowStructure, InferenceError> {
    let prompt = build_prompt(lines);
    let tools = [workflow_structure_tool()];
    let messages = [Message::user(prompt)];

    info!(lines = lines.len(), max_tokens, "inference: requesting workflow structure");
    let response = llm
        .chat(max_tokens, SYSTEM_PROMPT, &messages, Some(&tools), Some(WORKFLOW_STRUCTURE_TOOL))
        .await?;
    info!(
        model = %response.model,
        stop_reason = %response.stop_reason,
        input_tokens = response.input_tokens,
        output_tokens = response.output_tokens,
        "inference: LLM response"
    );

    let Some(input) = response.tool_input(WORKFLOW_STRUCTURE_TOOL) else {
        let called = response.tool_names();
        return Err(InferenceError::Schema(if called.is_empty() {
            format!("no {WORKFLOW_STRUCTURE_TOOL} call in response (stop_reason {})", response.stop_reason)
        } else {
            format!("expected {WORKFLOW_STRUCTURE_TOOL} call, got {}", called.join(", "))
        }));
    };

    let structure = parse_structure(input)?;
    info!(
        nodes = structure.nodes.len(),
        connections = structure.connections.len(),
        "inference: structure accepted"
    );
    debug!(?structure, "inference: structure");
    for node in structure.nodes_off_canvas() {
        warn!(node_id = %node.id, x = node.x, y = node.y, "inference: node outside canvas");
    }
    Ok(structure)
}

fn parse_structure(input: &serde_json::Value) -> Result<WorkflowStructure, InferenceError> {
    WorkflowStructure::deserialize(input).map_err(|e| InferenceError::Schema(e.to_string()))
}

#[cfg(test)]
#[path = "inference_test.rs"]
mod tests;
