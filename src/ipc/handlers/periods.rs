use serde_json::json;

use super::{param_str, require_store};
use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};
use crate::periods;

fn handle_set(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match periods::set_period(
        store,
        param_str(req, "gradeId"),
        param_str(req, "startTime"),
        param_str(req, "endTime"),
    ) {
        Ok(record) => ok(
            &req.id,
            json!({
                "period": {
                    "gradeId": record.grade_id,
                    "startTime": record.start_time,
                    "endTime": record.end_time,
                }
            }),
        ),
        Err(e) => fail(&req.id, &e),
    }
}

fn handle_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match periods::get_period(store, param_str(req, "gradeId")) {
        Ok(record) => ok(&req.id, json!(record)),
        Err(e) => fail(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "periods.set" => Some(handle_set(state, req)),
        "periods.get" => Some(handle_get(state, req)),
        _ => None,
    }
}
