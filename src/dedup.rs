use std::collections::HashSet;

use serde::Serialize;

use crate::model::{UserRecord, ROLL_PLACEHOLDER};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroppedUser {
    pub id: i64,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DedupReport {
    pub scanned: usize,
    pub dropped: Vec<DroppedUser>,
}

impl DedupReport {
    pub fn removed(&self) -> usize {
        self.dropped.len()
    }
}

/// First-occurrence-wins cleanup of duplicate user records.
///
/// Iteration order decides which duplicate survives: the earliest record
/// with a given email (or real roll number) is kept, later ones are
/// dropped. Placeholder and empty roll numbers never enter the seen-set,
/// so any number of unassigned-roll users may coexist. Running the pass
/// again over its own output drops nothing.
pub fn dedup_users(users: &mut Vec<UserRecord>) -> DedupReport {
    let mut report = DedupReport {
        scanned: users.len(),
        dropped: Vec::new(),
    };
    let mut seen_emails: HashSet<String> = HashSet::new();
    let mut seen_rolls: HashSet<String> = HashSet::new();
    let mut kept: Vec<UserRecord> = Vec::with_capacity(users.len());

    for user in users.drain(..) {
        let roll_free = match user.roll_number.as_deref() {
            None | Some("") | Some(ROLL_PLACEHOLDER) => true,
            Some(roll) => !seen_rolls.contains(roll),
        };
        if seen_emails.contains(&user.email) || !roll_free {
            report.dropped.push(DroppedUser {
                id: user.id,
                email: user.email,
                roll_number: user.roll_number,
            });
            continue;
        }
        seen_emails.insert(user.email.clone());
        if user.has_real_roll() {
            if let Some(roll) = user.roll_number.as_deref() {
                seen_rolls.insert(roll.to_string());
            }
        }
        kept.push(user);
    }

    *users = kept;
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{now_timestamp, UserType};

    fn user(id: i64, email: &str, roll: Option<&str>) -> UserRecord {
        UserRecord {
            id,
            name: format!("User {id}"),
            email: email.to_string(),
            user_type: UserType::Student,
            roll_number: roll.map(str::to_string),
            hostel: String::new(),
            room: String::new(),
            phone: String::new(),
            password: String::new(),
            created_at: now_timestamp(),
        }
    }

    #[test]
    fn first_occurrence_wins_on_email() {
        let mut users = vec![
            user(1, "a@x.com", Some("R1")),
            user(2, "b@x.com", Some("R2")),
            user(3, "a@x.com", Some("R3")),
        ];
        let report = dedup_users(&mut users);
        assert_eq!(report.removed(), 1);
        assert_eq!(report.dropped[0].id, 3);
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn duplicate_roll_number_drops_later_record() {
        let mut users = vec![
            user(1, "a@x.com", Some("R1")),
            user(2, "b@x.com", Some("R1")),
        ];
        let report = dedup_users(&mut users);
        assert_eq!(report.removed(), 1);
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].email, "a@x.com");
    }

    #[test]
    fn placeholder_rolls_do_not_collide() {
        let mut users = vec![
            user(1, "a@x.com", Some(ROLL_PLACEHOLDER)),
            user(2, "b@x.com", Some(ROLL_PLACEHOLDER)),
            user(3, "c@x.com", None),
        ];
        let report = dedup_users(&mut users);
        assert_eq!(report.removed(), 0);
        assert_eq!(users.len(), 3);
    }

    #[test]
    fn pass_is_idempotent() {
        let mut users = vec![
            user(1, "a@x.com", Some("R1")),
            user(2, "a@x.com", Some("R2")),
            user(3, "b@x.com", Some("R1")),
        ];
        dedup_users(&mut users);
        let snapshot: Vec<i64> = users.iter().map(|u| u.id).collect();
        let second = dedup_users(&mut users);
        assert_eq!(second.removed(), 0);
        assert_eq!(users.iter().map(|u| u.id).collect::<Vec<_>>(), snapshot);
    }
}
