use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::helpers::{id_param, mutate_response, parse_field, parse_params, require_store};
use crate::ipc::types::{AppState, Request};
use crate::ops::{self, NewStaff, StaffPatch, StaffQuery};

fn handle_staff_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let input: NewStaff = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "staff", |doc| ops::add_staff(doc, input))
}

fn handle_staff_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let patch: StaffPatch = match parse_field(req, "patch") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "staff", |doc| ops::update_staff(doc, id, patch))
}

fn handle_staff_toggle_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "staff", |doc| ops::toggle_staff_status(doc, id))
}

fn handle_staff_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "deleted", |doc| ops::delete_staff(doc, id))
}

fn handle_staff_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "staff": doc.staff })))
}

fn handle_staff_filter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let query: StaffQuery = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "staff": ops::filter_staff(doc, &query) })))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "staff.add" => Some(handle_staff_add(state, req)),
        "staff.update" => Some(handle_staff_update(state, req)),
        "staff.toggleStatus" => Some(handle_staff_toggle_status(state, req)),
        "staff.delete" => Some(handle_staff_delete(state, req)),
        "staff.list" => Some(handle_staff_list(state, req)),
        "staff.filter" => Some(handle_staff_filter(state, req)),
        _ => None,
    }
}
