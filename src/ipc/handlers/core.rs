use serde_json::json;
use std::io::Write;
use std::path::PathBuf;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::require_store;
use crate::ipc::types::{AppState, Request};
use crate::store::Store;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match Store::open(&path) {
        Ok((store, report)) => {
            // Hosts render from responses, but same-process writes also push
            // a notification line so open views can redraw without polling.
            store.subscribe(|event| {
                let line = json!({
                    "event": "store.changed",
                    "origin": event.origin.as_str(),
                    "lastUpdated": event.last_updated,
                });
                let mut out = std::io::stdout();
                let _ = writeln!(out, "{line}");
                let _ = out.flush();
            });
            let last_updated = store.last_updated();
            state.workspace = Some(path.clone());
            state.store = Some(store);
            ok(
                &req.id,
                json!({
                    "workspacePath": path.to_string_lossy(),
                    "removedDuplicates": report.removed(),
                    "droppedUsers": report.dropped,
                    "lastUpdated": last_updated,
                }),
            )
        }
        Err(e) => err(&req.id, "store_open_failed", format!("{e:?}"), None),
    }
}

/// The storage-event analogue: the host calls this after observing an
/// external write to the data file; the store reloads and re-deduplicates.
fn handle_store_refresh(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match store.refresh() {
        Ok(report) => ok(
            &req.id,
            json!({
                "removedDuplicates": report.removed(),
                "lastUpdated": store.last_updated(),
            }),
        ),
        Err(e) => err(&req.id, "store_write_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        "store.refresh" => Some(handle_store_refresh(state, req)),
        _ => None,
    }
}
