use serde_json::json;

use super::{param_str, require_store};
use crate::import;
use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};

fn handle_import_csv(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match import::import_grades_csv(store, param_str(req, "csvText")) {
        Ok(count) => ok(&req.id, json!({ "importedCount": count })),
        Err(e) => fail(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.importCsv" => Some(handle_import_csv(state, req)),
        _ => None,
    }
}
