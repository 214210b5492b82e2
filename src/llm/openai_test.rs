use super::*;

fn emit_tool() -> Tool {
    Tool {
        name: "emit_workflow_structure".into(),
        description: "Return the workflow graph.".into(),
        input_schema: serde_json::json!({ "type": "object" }),
    }
}

// ===== chat completions =====

#[test]
fn cc_request_prepends_system_and_forces_function() {
    let msgs = build_chat_completions_messages("You generate workflows.", &[Message::user("rows")]);
    let tools = [emit_tool()];
    let body = build_cc_request("gpt-4o", 4096, &msgs, Some(&tools), Some("emit_workflow_structure"));
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["messages"][0], serde_json::json!({ "role": "system", "content": "You generate workflows." }));
    assert_eq!(json["messages"][1], serde_json::json!({ "role": "user", "content": "rows" }));
    assert_eq!(json["tools"][0]["type"], "function");
    assert_eq!(json["tools"][0]["function"]["name"], "emit_workflow_structure");
    assert_eq!(
        json["tool_choice"],
        serde_json::json!({ "type": "function", "function": { "name": "emit_workflow_structure" } })
    );
}

#[test]
fn cc_blank_system_is_omitted() {
    let msgs = build_chat_completions_messages("  ", &[Message::user("rows")]);
    assert_eq!(msgs.len(), 1);
    assert_eq!(msgs[0].role, "user");
}

#[test]
fn cc_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": "Hello!" },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 10, "completion_tokens": 5 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Hello!"));
    assert_eq!(resp.stop_reason, "end_turn");
    assert_eq!(resp.input_tokens, 10);
}

#[test]
fn cc_parse_tool_call() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": { "name": "emit_workflow_structure", "arguments": "{\"nodes\":[],\"connections\":[]}" }
                }]
            },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 20, "completion_tokens": 10 }
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "tool_use");
    assert_eq!(
        resp.tool_input("emit_workflow_structure"),
        Some(&serde_json::json!({ "nodes": [], "connections": [] }))
    );
}

#[test]
fn cc_malformed_arguments_kept_as_string() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "choices": [{
            "message": {
                "tool_calls": [{
                    "id": "call_1",
                    "function": { "name": "emit_workflow_structure", "arguments": "{\"nodes\": [" }
                }]
            },
            "finish_reason": "length"
        }]
    })
    .to_string();
    let resp = parse_chat_completions_response(&json).unwrap();
    assert_eq!(resp.tool_input("emit_workflow_structure"), Some(&Value::String("{\"nodes\": [".into())));
}

#[test]
fn cc_parse_missing_choices() {
    let json = serde_json::json!({ "model": "gpt-4o", "choices": [] }).to_string();
    assert!(matches!(parse_chat_completions_response(&json), Err(LlmError::ApiParse(_))));
}

// ===== responses API =====

#[test]
fn resp_request_uses_instructions_and_flat_tool_choice() {
    let input = build_responses_input(&[Message::user("rows")]);
    let tools = [emit_tool()];
    let body = build_resp_request("gpt-4o", 2048, "sys", &input, Some(&tools), Some("emit_workflow_structure"));
    let json = serde_json::to_value(&body).unwrap();

    assert_eq!(json["instructions"], "sys");
    assert_eq!(json["max_output_tokens"], 2048);
    assert_eq!(json["input"][0]["type"], "message");
    assert_eq!(json["input"][0]["content"][0], serde_json::json!({ "type": "input_text", "text": "rows" }));
    assert_eq!(json["tools"][0]["name"], "emit_workflow_structure");
    assert_eq!(json["tool_choice"], serde_json::json!({ "type": "function", "name": "emit_workflow_structure" }));
}

#[test]
fn resp_parse_text_response() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [{
            "type": "message",
            "content": [{ "type": "output_text", "text": "Done!" }]
        }],
        "usage": { "input_tokens": 15, "output_tokens": 8 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.content.len(), 1);
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Done!"));
    assert_eq!(resp.stop_reason, "end_turn");
}

#[test]
fn resp_parse_function_call() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output": [{
            "type": "function_call",
            "call_id": "fc_1",
            "name": "emit_workflow_structure",
            "arguments": "{\"nodes\":[]}"
        }],
        "usage": { "input_tokens": 10, "output_tokens": 5 }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert_eq!(resp.stop_reason, "tool_use");
    assert!(
        matches!(&resp.content[0], ContentBlock::ToolUse { id, name, .. } if id == "fc_1" && name == "emit_workflow_structure")
    );
}

#[test]
fn resp_parse_output_text_fallback() {
    let json = serde_json::json!({
        "model": "gpt-4o",
        "output_text": "Fallback text",
        "incomplete_details": { "reason": "max_output_tokens" }
    })
    .to_string();
    let resp = parse_responses_response(&json).unwrap();
    assert!(matches!(&resp.content[0], ContentBlock::Text { text } if text == "Fallback text"));
    assert_eq!(resp.stop_reason, "max_tokens");
}
