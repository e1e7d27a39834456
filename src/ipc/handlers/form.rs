use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{empty_notice, feedback, layout_json, rows_json};
use crate::ipc::types::{AppState, Request};
use crate::store::{self, Category};
use serde_json::json;

/// Switches the active category: the layout changes and the listing is
/// re-queried from that category's table only.
fn handle_category_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let category = match req
        .params
        .get("category")
        .and_then(|v| v.as_str())
        .and_then(Category::parse)
    {
        Some(c) => c,
        None => {
            return err(
                &req.id,
                "bad_params",
                "missing or unknown params.category",
                None,
            )
        }
    };

    state.form.select_category(category);
    let rows = match store::list_records(conn, category) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };

    ok(
        &req.id,
        json!({
            "category": category.as_str(),
            "layout": layout_json(&state.form.layout()),
            "rows": rows_json(&rows),
            "notice": empty_notice(category, &rows),
        }),
    )
}

fn handle_form_input(state: &mut AppState, req: &Request) -> serde_json::Value {
    let field = match req
        .params
        .get("field")
        .and_then(|v| v.as_str())
        .and_then(crate::form::FormField::parse)
    {
        Some(f) => f,
        None => {
            return err(
                &req.id,
                "bad_params",
                "missing or unknown params.field",
                None,
            )
        }
    };
    let value = req
        .params
        .get("value")
        .and_then(|v| v.as_str())
        .unwrap_or("")
        .to_string();

    state.form.set_field(field, value);
    ok(&req.id, json!({ "ok": true }))
}

/// Validate-then-add for the active category. Validation and constraint
/// failures are user outcomes, so they travel as error feedback in an ok
/// response; only protocol/storage faults become coded errors.
fn handle_form_submit(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let category = state.form.category();
    let draft = match state.form.prepare_submission() {
        Ok(d) => d,
        Err(ve) => {
            return ok(
                &req.id,
                json!({ "feedback": feedback("error", ve.message()) }),
            )
        }
    };

    let report = match store::add_record(conn, category, &draft) {
        Ok(r) => r,
        Err(e) => return err(&req.id, "db_write_failed", e.to_string(), None),
    };
    if !report.ok {
        return ok(
            &req.id,
            json!({ "feedback": feedback("error", &report.message) }),
        );
    }

    state.form.clear_after_submit();
    let rows = match store::list_records(conn, category) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };

    ok(
        &req.id,
        json!({
            "feedback": feedback("success", &report.message),
            "rows": rows_json(&rows),
            "notice": empty_notice(category, &rows),
        }),
    )
}

fn handle_form_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };

    let category = state.form.category();
    let identifier = match state.form.delete_identifier() {
        Ok(v) => v,
        Err(ve) => {
            return ok(
                &req.id,
                json!({ "feedback": feedback("error", ve.message()) }),
            )
        }
    };

    let report = match store::delete_record(conn, category, &identifier) {
        Ok(r) => r,
        Err(e) => return err(&req.id, "db_write_failed", e.to_string(), None),
    };
    if !report.ok {
        return ok(
            &req.id,
            json!({ "feedback": feedback("error", &report.message) }),
        );
    }

    state.form.clear_delete_identifier();
    let rows = match store::list_records(conn, category) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "db_query_failed", e.to_string(), None),
    };

    ok(
        &req.id,
        json!({
            "feedback": feedback("success", &report.message),
            "rows": rows_json(&rows),
            "notice": empty_notice(category, &rows),
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "category.select" => Some(handle_category_select(state, req)),
        "form.input" => Some(handle_form_input(state, req)),
        "form.submit" => Some(handle_form_submit(state, req)),
        "form.delete" => Some(handle_form_delete(state, req)),
        _ => None,
    }
}
