pub mod core;
pub mod grades;
pub mod import;
pub mod periods;
pub mod students;

use crate::ipc::error::err;
use crate::ipc::types::{AppState, Request};
use crate::store::RecordStore;

/// Every data method needs an open workspace; answer `no_workspace` instead
/// of panicking or dropping the request.
pub(crate) fn require_store<'a>(
    state: &'a AppState,
    req: &Request,
) -> Result<&'a dyn RecordStore, serde_json::Value> {
    match state.store.as_deref() {
        Some(store) => Ok(store),
        None => Err(err(&req.id, "no_workspace", "select a workspace first", None)),
    }
}

pub(crate) fn param_str<'a>(req: &'a Request, key: &str) -> &'a str {
    req.params
        .get(key)
        .and_then(serde_json::Value::as_str)
        .unwrap_or("")
}
