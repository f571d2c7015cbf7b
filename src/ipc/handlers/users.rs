use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{id_param, mutate_response, parse_field, parse_params, require_store};
use crate::ipc::types::{AppState, Request};
use crate::ops::{self, NewUser, UserPatch, UserQuery};

fn handle_users_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let input: NewUser = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "user", |doc| ops::add_user(doc, input))
}

fn handle_users_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "users": doc.users })))
}

fn handle_users_get(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    store.with(|doc| match ops::find_user(doc, id) {
        Some(user) => ok(&req.id, json!({ "user": user })),
        None => err(&req.id, "not_found", "user not found", None),
    })
}

fn handle_users_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let patch: UserPatch = match parse_field(req, "patch") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "user", |doc| ops::update_user(doc, id, patch))
}

fn handle_users_filter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let query: UserQuery = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "users": ops::filter_users(doc, &query) })))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "users.add" => Some(handle_users_add(state, req)),
        "users.list" => Some(handle_users_list(state, req)),
        "users.get" => Some(handle_users_get(state, req)),
        "users.update" => Some(handle_users_update(state, req)),
        "users.filter" => Some(handle_users_filter(state, req)),
        _ => None,
    }
}
