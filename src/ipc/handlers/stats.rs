use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::helpers::require_store;
use crate::ipc::types::{AppState, Request};
use crate::ops;

fn handle_stats_overview(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "stats": ops::overview(doc) })))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "stats.overview" => Some(handle_stats_overview(state, req)),
        _ => None,
    }
}
