//! Canned `LlmChat` implementations for tests.

use std::sync::Mutex;

use super::LlmChat;
use super::types::{ChatResponse, ContentBlock, LlmError, Message, Tool};

/// What a [`CannedLlm`] was asked.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<Message>,
    pub tool_names: Vec<String>,
    pub force_tool: Option<String>,
}

/// Answers every request with the same content blocks, or with an error
/// built by `fail`.
pub struct CannedLlm {
    content: Vec<ContentBlock>,
    fail: Option<fn() -> LlmError>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl CannedLlm {
    pub fn replying(content: Vec<ContentBlock>) -> Self {
        Self { content, fail: None, requests: Mutex::new(Vec::new()) }
    }

    /// Reply with a single call to `tool` carrying `input`.
    pub fn tool_call(tool: &str, input: serde_json::Value) -> Self {
        Self::replying(vec![ContentBlock::ToolUse { id: "call_1".into(), name: tool.into(), input }])
    }

    pub fn failing(fail: fn() -> LlmError) -> Self {
        Self { content: Vec::new(), fail: Some(fail), requests: Mutex::new(Vec::new()) }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmChat for CannedLlm {
    async fn chat(
        &self,
        max_tokens: u32,
        system: &str,
        messages: &[Message],
        tools: Option<&[Tool]>,
        force_tool: Option<&str>,
    ) -> Result<ChatResponse, LlmError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            max_tokens,
            system: system.to_owned(),
            messages: messages.to_vec(),
            tool_names: tools
                .unwrap_or_default()
                .iter()
                .map(|t| t.name.clone())
                .collect(),
            force_tool: force_tool.map(str::to_owned),
        });
        if let Some(fail) = self.fail {
            return Err(fail());
        }
        Ok(ChatResponse {
            content: self.content.clone(),
            model: "canned".into(),
            stop_reason: "tool_use".into(),
            input_tokens: 0,
            output_tokens: 0,
        })
    }
}
