use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::ops::Rejection;
use crate::store::Store;

/// Most handlers need an open workspace; reject uniformly when there is none.
pub fn require_store<'a>(
    state: &'a AppState,
    req: &Request,
) -> Result<&'a Store, serde_json::Value> {
    state
        .store
        .as_ref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

pub fn parse_params<T: DeserializeOwned>(req: &Request) -> Result<T, serde_json::Value> {
    serde_json::from_value(req.params.clone())
        .map_err(|e| err(&req.id, "bad_params", e.to_string(), None))
}

pub fn parse_field<T: DeserializeOwned>(
    req: &Request,
    field: &str,
) -> Result<T, serde_json::Value> {
    let value = req
        .params
        .get(field)
        .cloned()
        .ok_or_else(|| err(&req.id, "bad_params", format!("missing params.{field}"), None))?;
    serde_json::from_value(value)
        .map_err(|e| err(&req.id, "bad_params", format!("params.{field}: {e}"), None))
}

pub fn id_param(req: &Request) -> Result<i64, serde_json::Value> {
    req.params
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| err(&req.id, "bad_params", "missing numeric params.id", None))
}

/// One load-modify-save unit mapped onto the wire: a rejection becomes its
/// error code with no write, an I/O failure becomes store_write_failed.
pub fn mutate_response<T: Serialize>(
    store: &Store,
    req: &Request,
    key: &str,
    f: impl FnOnce(&mut crate::model::RootDocument) -> Result<T, Rejection>,
) -> serde_json::Value {
    match store.mutate(f) {
        Ok(Ok(value)) => ok(&req.id, serde_json::json!({ key: value })),
        Ok(Err(rejection)) => err(&req.id, rejection.code(), rejection.message(), None),
        Err(e) => err(&req.id, "store_write_failed", e.to_string(), None),
    }
}
