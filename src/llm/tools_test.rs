use super::*;

#[test]
fn tool_is_named_for_forcing() {
    assert_eq!(workflow_structure_tool().name, WORKFLOW_STRUCTURE_TOOL);
}

#[test]
fn schema_requires_both_collections() {
    let schema = workflow_structure_tool().input_schema;
    assert_eq!(schema["required"], serde_json::json!(["nodes", "connections"]));
}

#[test]
fn schema_constrains_shape_enum() {
    let schema = workflow_structure_tool().input_schema;
    let shape = &schema["properties"]["nodes"]["items"]["properties"]["shape"];
    assert_eq!(shape["enum"], serde_json::json!(["ellipse", "rectangle", "rhombus"]));
}

#[test]
fn schema_coordinates_are_integers() {
    let schema = workflow_structure_tool().input_schema;
    let props = &schema["properties"]["nodes"]["items"]["properties"];
    assert_eq!(props["x"]["type"], "integer");
    assert_eq!(props["y"]["type"], "integer");
}

#[test]
fn schema_connection_label_is_optional() {
    let schema = workflow_structure_tool().input_schema;
    let required = &schema["properties"]["connections"]["items"]["required"];
    assert_eq!(required, &serde_json::json!(["source", "target"]));
}
