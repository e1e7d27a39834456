use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{empty_notice, rows_json};
use crate::ipc::types::{AppState, Request};
use crate::store;
use serde_json::json;

/// Plain re-query of the active category, used by the shell to refresh the
/// table without changing any form state.
fn handle_records_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let category = state.form.category();
    let rows = match store::list_records(conn, category) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };

    ok(
        &req.id,
        json!({
            "category": category.as_str(),
            "rows": rows_json(&rows),
            "notice": empty_notice(category, &rows),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "records.list" => Some(handle_records_list(state, req)),
        _ => None,
    }
}
