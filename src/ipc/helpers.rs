use serde_json::json;

use crate::form::Layout;
use crate::store::{Category, RecordRow};

/// Feedback the shell renders as coloured text: "success" green,
/// "error" red, "info" yellow.
pub fn feedback(kind: &str, message: &str) -> serde_json::Value {
    json!({ "kind": kind, "message": message })
}

pub fn layout_json(layout: &Layout) -> serde_json::Value {
    json!({
        "raVisible": layout.ra_visible,
        "courseUnitVisible": layout.course_unit_visible,
        "deleteLabel": layout.delete_label,
        "columns": layout.columns,
    })
}

pub fn rows_json(rows: &[RecordRow]) -> serde_json::Value {
    let rows: Vec<serde_json::Value> = rows
        .iter()
        .map(|r| {
            json!({
                "id": r.id,
                "name": r.name,
                "email": r.email,
                "ra": r.ra,
                "courseUnit": r.course_unit,
            })
        })
        .collect();
    json!(rows)
}

/// Informational notice for an empty listing; distinct from error feedback.
pub fn empty_notice(category: Category, rows: &[RecordRow]) -> serde_json::Value {
    if rows.is_empty() {
        json!(format!("No {} found.", category.label_plural()))
    } else {
        serde_json::Value::Null
    }
}
