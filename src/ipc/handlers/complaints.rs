use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::helpers::{id_param, mutate_response, parse_field, parse_params, require_store};
use crate::ipc::types::{AppState, Request};
use crate::model::ComplaintStatus;
use crate::ops::{self, ComplaintQuery, NewComplaint};

fn handle_complaints_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let input: NewComplaint = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "complaint", |doc| ops::add_complaint(doc, input))
}

fn handle_complaints_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "complaints": doc.complaints })))
}

fn handle_complaints_filter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let query: ComplaintQuery = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    store.with(|doc| {
        ok(
            &req.id,
            json!({ "complaints": ops::filter_complaints(doc, &query) }),
        )
    })
}

fn handle_complaints_set_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let status: ComplaintStatus = match parse_field(req, "status") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "complaint", |doc| {
        ops::set_complaint_status(doc, id, status)
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "complaints.add" => Some(handle_complaints_add(state, req)),
        "complaints.list" => Some(handle_complaints_list(state, req)),
        "complaints.filter" => Some(handle_complaints_filter(state, req)),
        "complaints.setStatus" => Some(handle_complaints_set_status(state, req)),
        _ => None,
    }
}
