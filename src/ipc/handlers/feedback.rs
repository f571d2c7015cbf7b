use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::helpers::{id_param, mutate_response, parse_field, parse_params, require_store};
use crate::ipc::types::{AppState, Request};
use crate::model::FeedbackStatus;
use crate::ops::{self, FeedbackQuery, NewFeedback};

fn handle_feedback_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let input: NewFeedback = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "feedback", |doc| ops::add_feedback(doc, input))
}

fn handle_feedback_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "feedback": doc.feedback })))
}

fn handle_feedback_filter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let query: FeedbackQuery = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    store.with(|doc| {
        ok(
            &req.id,
            json!({ "feedback": ops::filter_feedback(doc, &query) }),
        )
    })
}

fn handle_feedback_set_status(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let status: FeedbackStatus = match parse_field(req, "status") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "feedback", |doc| {
        ops::set_feedback_status(doc, id, status)
    })
}

fn handle_feedback_reply(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let id = match id_param(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let reply: String = match parse_field(req, "reply") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "feedback", |doc| {
        ops::reply_feedback(doc, id, reply)
    })
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "feedback.add" => Some(handle_feedback_add(state, req)),
        "feedback.list" => Some(handle_feedback_list(state, req)),
        "feedback.filter" => Some(handle_feedback_filter(state, req)),
        "feedback.setStatus" => Some(handle_feedback_set_status(state, req)),
        "feedback.reply" => Some(handle_feedback_reply(state, req)),
        _ => None,
    }
}
