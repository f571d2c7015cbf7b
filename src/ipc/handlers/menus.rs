use serde_json::json;

use crate::ipc::error::ok;
use crate::ipc::helpers::{mutate_response, parse_params, require_store};
use crate::ipc::types::{AppState, Request};
use crate::ops::{self, MenuQuery, NewMenu};

fn handle_menus_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let input: NewMenu = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    mutate_response(store, req, "menu", |doc| ops::add_menu(doc, input))
}

fn handle_menus_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "menus": doc.menus })))
}

fn handle_menus_filter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let query: MenuQuery = match parse_params(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    store.with(|doc| ok(&req.id, json!({ "menus": ops::filter_menus(doc, &query) })))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "menus.add" => Some(handle_menus_add(state, req)),
        "menus.list" => Some(handle_menus_list(state, req)),
        "menus.filter" => Some(handle_menus_filter(state, req)),
        _ => None,
    }
}
