use serde_json::json;

use super::{param_str, require_store};
use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};
use crate::students;

fn handle_info(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match students::get_student_info(store, param_str(req, "studentId")) {
        Ok(info) => ok(&req.id, json!(info)),
        Err(e) => fail(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.info" => Some(handle_info(state, req)),
        _ => None,
    }
}
