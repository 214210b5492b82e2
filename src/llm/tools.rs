//! Structured-output tool definitions.
//!
//! The workflow schema is handed to the model as a tool whose arguments are
//! the whole answer; the request forces that tool so the reply is always a
//! call to it.

use super::types::Tool;
use crate::workflow::Shape;

/// Name of the tool carrying the inferred workflow graph.
pub const WORKFLOW_STRUCTURE_TOOL: &str = "emit_workflow_structure";

/// Build the tool whose input schema is the `WorkflowStructure` contract.
#[must_use]
pub fn workflow_structure_tool() -> Tool {
    let shapes: Vec<&str> = Shape::ALL.iter().map(|s| s.as_str()).collect();
    Tool {
        name: WORKFLOW_STRUCTURE_TOOL.into(),
        description: "Return the workflow as diagram nodes and labeled directed connections.".into(),
        input_schema: serde_json::json!({
            "type": "object",
            "properties": {
                "nodes": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "description": "Unique node identifier" },
                            "label": { "type": "string", "description": "Concise display text" },
                            "shape": { "type": "string", "enum": shapes, "description": "ellipse for start/end, rhombus for decisions, rectangle otherwise" },
                            "x": { "type": "integer", "description": "X position, 0 to 1000" },
                            "y": { "type": "integer", "description": "Y position, 0 to 800" }
                        },
                        "required": ["id", "label", "shape", "x", "y"],
                        "additionalProperties": false
                    }
                },
                "connections": {
                    "type": "array",
                    "items": {
                        "type": "object",
                        "properties": {
                            "source": { "type": "string", "description": "id of the source node" },
                            "target": { "type": "string", "description": "id of the target node" },
                            "label": { "type": "string", "description": "Optional branch label, e.g. Yes or No" }
                        },
                        "required": ["source", "target"],
                        "additionalProperties": false
                    }
                }
            },
            "required": ["nodes", "connections"],
            "additionalProperties": false
        }),
    }
}

#[cfg(test)]
#[path = "tools_test.rs"]
mod tests;
