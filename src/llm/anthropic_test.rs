use super::*;

fn make_response(content: serde_json::Value) -> String {
    serde_json::json!({
        "id": "msg_123",
        "type": "message",
        "role": "assistant",
        "content": content,
        "model": "claude-sonnet-4-5-20250929",
        "stop_reason": "tool_use",
        "usage": { "input_tokens": 100, "output_tokens": 50 }
    })
    .to_string()
}

// =============================================================================
// REQUEST
// =============================================================================

#[test]
fn request_forces_named_tool() {
    let messages = [Message::user("describe")];
    let tools = [Tool {
        name: "emit_workflow_structure".into(),
        description: "emit".into(),
        input_schema: serde_json::json!({ "type": "object" }),
    }];
    let body = build_request("claude", 1024, "sys", &messages, Some(&tools), Some("emit_workflow_structure"));
    let json = serde_json::to_value(&body).unwrap();
    assert_eq!(json["tool_choice"], serde_json::json!({ "type": "tool", "name": "emit_workflow_structure" }));
    assert_eq!(json["tools"][0]["input_schema"]["type"], "object");
    assert_eq!(json["messages"][0], serde_json::json!({ "role": "user", "content": "describe" }));
    assert_eq!(json["system"], "sys");
}

#[test]
fn request_without_tools_omits_tool_fields() {
    let messages = [Message::user("hi")];
    let body = build_request("claude", 16, "", &messages, None, None);
    let json = serde_json::to_value(&body).unwrap();
    assert!(json.get("tools").is_none());
    assert!(json.get("tool_choice").is_none());
}

// =============================================================================
// RESPONSE
// =============================================================================

#[test]
fn parse_text_response() {
    let json = make_response(serde_json::json!([
        { "type": "text", "text": "Hello world" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Hello world"));
    assert_eq!(resp.model, "claude-sonnet-4-5-20250929");
    assert_eq!(resp.input_tokens, 100);
    assert_eq!(resp.output_tokens, 50);
}

#[test]
fn parse_tool_use_response() {
    let json = make_response(serde_json::json!([
        { "type": "tool_use", "id": "tu_1", "name": "emit_workflow_structure", "input": { "nodes": [], "connections": [] } }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "tool_use");
    assert_eq!(
        resp.tool_input("emit_workflow_structure"),
        Some(&serde_json::json!({ "nodes": [], "connections": [] }))
    );
}

#[test]
fn parse_unknown_and_thinking_filtered() {
    let json = make_response(serde_json::json!([
        { "type": "thinking", "thinking": "Let me think..." },
        { "type": "some_future_type", "data": {} },
        { "type": "text", "text": "hi" }
    ]));
    let resp = parse_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { .. }));
}

#[test]
fn parse_invalid_json() {
    let err = parse_response("not json").unwrap_err();
    assert!(matches!(err, LlmError::ApiParse(_)));
}
