use serde_json::json;

use crate::error::GradeError;

pub fn ok(id: &str, result: serde_json::Value) -> serde_json::Value {
    json!({
        "id": id,
        "ok": true,
        "result": result
    })
}

pub fn err(
    id: &str,
    code: &str,
    message: impl Into<String>,
    details: Option<serde_json::Value>,
) -> serde_json::Value {
    let mut error = json!({
        "code": code,
        "message": message.into(),
    });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({
        "id": id,
        "ok": false,
        "error": error,
    })
}

/// Failure response for a core error; row-scoped validation failures carry
/// the offending CSV row in details.
pub fn fail(id: &str, e: &GradeError) -> serde_json::Value {
    let details = e.row().map(|row| json!({ "row": row }));
    err(id, e.code(), e.to_string(), details)
}
