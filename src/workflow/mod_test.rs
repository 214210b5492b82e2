use super::*;

#[test]
fn shape_deserializes_lowercase_names() {
    for shape in Shape::ALL {
        let json = format!("\"{shape}\"");
        let parsed: Shape = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, shape);
    }
}

#[test]
fn unknown_shape_is_rejected() {
    let result = serde_json::from_str::<Shape>("\"hexagon\"");
    assert!(result.is_err());
}

#[test]
fn connection_label_is_optional() {
    let conn: Connection = serde_json::from_value(serde_json::json!({ "source": "a", "target": "b" })).unwrap();
    assert_eq!(conn.label, None);
    assert_eq!(conn.display_label(), None);
}

#[test]
fn empty_connection_label_has_no_display_text() {
    let conn = Connection { source: "a".into(), target: "b".into(), label: Some(String::new()) };
    assert_eq!(conn.display_label(), None);

    let conn = Connection { label: Some("Yes".into()), ..conn };
    assert_eq!(conn.display_label(), Some("Yes"));
}

#[test]
fn fractional_coordinates_are_rejected() {
    let result = serde_json::from_value::<Node>(serde_json::json!({
        "id": "a", "label": "Start", "shape": "ellipse", "x": 10.5, "y": 0
    }));
    assert!(result.is_err());
}

#[test]
fn nodes_off_canvas_reports_without_changing() {
    let structure = WorkflowStructure {
        nodes: vec![
            Node { id: "a".into(), label: "In".into(), shape: Shape::Rectangle, x: 1000, y: 800 },
            Node { id: "b".into(), label: "Wide".into(), shape: Shape::Rectangle, x: 1001, y: 0 },
            Node { id: "c".into(), label: "Up".into(), shape: Shape::Rhombus, x: 5, y: -1 },
        ],
        connections: vec![],
    };
    let off: Vec<&str> = structure.nodes_off_canvas().map(|n| n.id.as_str()).collect();
    assert_eq!(off, vec!["b", "c"]);
    assert_eq!(structure.nodes[1].x, 1001);
}
