use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::model::{RootDocument, StaffStatus, UserType};
use crate::ops::Rejection;

pub const SESSION_FILE: &str = "session.json";

/// Built-in administrator account. The password can be rotated through
/// `session.changePassword`, which stores the override in the document.
pub const ADMIN_EMAIL: &str = "admin@messmate.com";
pub const ADMIN_DEFAULT_PASSWORD: &str = "admin123";
const ADMIN_NAME: &str = "Mess Administrator";

/// The companion persisted value: the currently authenticated record,
/// written at login and cleared at logout. Dashboards gate access on
/// `userType` and populate their headers from it.
///
/// The password rides along in the clear, exactly as the legacy session
/// value did. Documented weakness of the format, kept for fidelity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginFailure {
    InvalidCredentials,
    InactiveStaff,
}

impl LoginFailure {
    pub fn code(&self) -> &'static str {
        match self {
            LoginFailure::InvalidCredentials => "invalid_credentials",
            LoginFailure::InactiveStaff => "staff_inactive",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            LoginFailure::InvalidCredentials => "invalid email or password",
            LoginFailure::InactiveStaff => "staff account is inactive",
        }
    }
}

fn session_path(workspace: &Path) -> PathBuf {
    workspace.join(SESSION_FILE)
}

/// Plaintext credential check against the document, in the same order the
/// login page tried: built-in admin, then staff, then users.
pub fn authenticate(
    doc: &RootDocument,
    email: &str,
    password: &str,
) -> Result<SessionRecord, LoginFailure> {
    if email == ADMIN_EMAIL {
        let expected = doc
            .admin_password
            .as_deref()
            .unwrap_or(ADMIN_DEFAULT_PASSWORD);
        if password == expected {
            return Ok(SessionRecord {
                id: 0,
                name: ADMIN_NAME.to_string(),
                email: ADMIN_EMAIL.to_string(),
                user_type: UserType::Admin,
                password: expected.to_string(),
            });
        }
        return Err(LoginFailure::InvalidCredentials);
    }

    if let Some(staff) = doc.staff.iter().find(|s| s.email == email) {
        if staff.password != password {
            return Err(LoginFailure::InvalidCredentials);
        }
        if staff.status == StaffStatus::Inactive {
            return Err(LoginFailure::InactiveStaff);
        }
        return Ok(SessionRecord {
            id: staff.id,
            name: staff.name.clone(),
            email: staff.email.clone(),
            user_type: UserType::Staff,
            password: staff.password.clone(),
        });
    }

    if let Some(user) = doc.users.iter().find(|u| u.email == email) {
        if user.password == password {
            return Ok(SessionRecord {
                id: user.id,
                name: user.name.clone(),
                email: user.email.clone(),
                user_type: user.user_type,
                password: user.password.clone(),
            });
        }
    }
    Err(LoginFailure::InvalidCredentials)
}

pub fn write_session(workspace: &Path, record: &SessionRecord) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(record).context("failed to serialize session")?;
    let path = session_path(workspace);
    fs::write(&path, text).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

/// Fail-soft like the store: an absent or corrupt session file just means
/// nobody is logged in.
pub fn read_session(workspace: &Path) -> Option<SessionRecord> {
    let text = fs::read_to_string(session_path(workspace)).ok()?;
    serde_json::from_str(&text).ok()
}

/// Idempotent; clearing an absent session is not an error.
pub fn clear_session(workspace: &Path) {
    let _ = fs::remove_file(session_path(workspace));
}

/// Applies a password change to the record backing the session. The admin's
/// password lives on the document itself; staff and users update in place.
pub fn apply_password_change(
    doc: &mut RootDocument,
    session: &SessionRecord,
    new_password: &str,
) -> Result<(), Rejection> {
    match session.user_type {
        UserType::Admin => {
            doc.admin_password = Some(new_password.to_string());
            Ok(())
        }
        UserType::Staff => {
            // Staff sessions may come from the staff collection or from a
            // STAFF-typed user record. Ids are allocated per collection, so
            // only the email identifies which record backs the session.
            if let Some(staff) = doc.staff.iter_mut().find(|s| s.email == session.email) {
                staff.password = new_password.to_string();
                return Ok(());
            }
            if let Some(user) = doc.users.iter_mut().find(|u| u.email == session.email) {
                user.password = new_password.to_string();
                return Ok(());
            }
            Err(Rejection::NotFound)
        }
        UserType::Student => {
            let user = doc
                .users
                .iter_mut()
                .find(|u| u.id == session.id)
                .ok_or(Rejection::NotFound)?;
            user.password = new_password.to_string();
            Ok(())
        }
    }
}
