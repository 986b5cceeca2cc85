use serde_json::{json, Value};

use super::{param_str, require_store};
use crate::grades;
use crate::ipc::error::{fail, ok};
use crate::ipc::types::{AppState, Request};
use crate::model::GradeRecord;

fn handle_upsert(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let score = req.params.get("score").cloned().unwrap_or(Value::Null);
    match grades::upsert_grade(
        store,
        param_str(req, "studentId"),
        param_str(req, "courseName"),
        &score,
        param_str(req, "semester"),
    ) {
        Ok(record) => ok(&req.id, json!({ "grade": record })),
        Err(e) => fail(&req.id, &e),
    }
}

fn handle_list_for_student(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match grades::query_grades_for_student(store, param_str(req, "studentId")) {
        Ok(records) => {
            let grades: Vec<Value> = records.iter().map(GradeRecord::summary).collect();
            ok(&req.id, json!({ "grades": grades }))
        }
        Err(e) => fail(&req.id, &e),
    }
}

fn handle_scan(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match grades::scan_grades(store) {
        Ok(records) => {
            let grades: Vec<Value> = records
                .iter()
                .map(|r| {
                    let mut row = r.summary();
                    row["studentId"] = json!(r.student_id);
                    row["gradeId"] = json!(r.grade_id);
                    row
                })
                .collect();
            ok(&req.id, json!({ "grades": grades }))
        }
        Err(e) => fail(&req.id, &e),
    }
}

fn handle_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match grades::delete_grade(store, param_str(req, "studentId"), param_str(req, "gradeId")) {
        Ok(record) => ok(&req.id, json!({ "deleted": record })),
        Err(e) => fail(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.upsert" => Some(handle_upsert(state, req)),
        "grades.listForStudent" => Some(handle_list_for_student(state, req)),
        "grades.scan" => Some(handle_scan(state, req)),
        "grades.delete" => Some(handle_delete(state, req)),
        _ => None,
    }
}
