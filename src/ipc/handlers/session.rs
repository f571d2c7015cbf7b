use serde_json::json;

use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{parse_field, require_store};
use crate::ipc::types::{AppState, Request};
use crate::session;

fn require_workspace<'a>(
    state: &'a AppState,
    req: &Request,
) -> Result<&'a std::path::Path, serde_json::Value> {
    state
        .workspace
        .as_deref()
        .ok_or_else(|| err(&req.id, "no_workspace", "select a workspace first", None))
}

fn handle_session_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let workspace = match require_workspace(state, req) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    let email: String = match parse_field(req, "email") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let password: String = match parse_field(req, "password") {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let outcome = store.with(|doc| session::authenticate(doc, &email, &password));
    match outcome {
        Ok(record) => {
            if let Err(e) = session::write_session(workspace, &record) {
                return err(&req.id, "store_write_failed", e.to_string(), None);
            }
            ok(&req.id, json!({ "user": record }))
        }
        Err(failure) => err(&req.id, failure.code(), failure.message(), None),
    }
}

fn handle_session_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace = match require_workspace(state, req) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    match session::read_session(workspace) {
        Some(record) => ok(&req.id, json!({ "loggedIn": true, "user": record })),
        None => ok(&req.id, json!({ "loggedIn": false })),
    }
}

fn handle_session_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    let workspace = match require_workspace(state, req) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    session::clear_session(workspace);
    ok(&req.id, json!({ "loggedIn": false }))
}

fn handle_session_change_password(state: &mut AppState, req: &Request) -> serde_json::Value {
    let store = match require_store(state, req) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let workspace = match require_workspace(state, req) {
        Ok(w) => w,
        Err(resp) => return resp,
    };
    let current: String = match parse_field(req, "currentPassword") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    let new_password: String = match parse_field(req, "newPassword") {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    // Same floor the dashboards enforced.
    if new_password.len() < 6 {
        return err(
            &req.id,
            "bad_params",
            "password must be at least 6 characters long",
            None,
        );
    }

    let Some(mut record) = session::read_session(workspace) else {
        return err(&req.id, "not_logged_in", "no active session", None);
    };
    if record.password != current {
        return err(
            &req.id,
            "invalid_credentials",
            "current password is incorrect",
            None,
        );
    }

    let applied = store.mutate(|doc| session::apply_password_change(doc, &record, &new_password));
    match applied {
        Ok(Ok(())) => {
            record.password = new_password;
            if let Err(e) = session::write_session(workspace, &record) {
                return err(&req.id, "store_write_failed", e.to_string(), None);
            }
            ok(&req.id, json!({ "user": record }))
        }
        Ok(Err(rejection)) => err(&req.id, rejection.code(), rejection.message(), None),
        Err(e) => err(&req.id, "store_write_failed", e.to_string(), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.login" => Some(handle_session_login(state, req)),
        "session.current" => Some(handle_session_current(state, req)),
        "session.logout" => Some(handle_session_logout(state, req)),
        "session.changePassword" => Some(handle_session_change_password(state, req)),
        _ => None,
    }
}
