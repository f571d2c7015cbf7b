use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{
    next_id, now_timestamp, ComplaintRecord, ComplaintStatus, FeedbackRecord, FeedbackStatus,
    MealType, MenuRecord, Priority, RootDocument, Shift, StaffRecord, StaffStatus, UserRecord,
    UserType, HOSTEL_DEFAULT, PHONE_DEFAULT, ROLL_PLACEHOLDER, ROOM_DEFAULT,
};

/// Validation outcome of a mutating accessor. Rejections are ordinary
/// control flow, never panics, and a rejected mutation writes nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    DuplicateEmail,
    DuplicateRollNumber,
    DuplicateStaffId,
    MenuConflict,
    NotFound,
    Invalid(String),
}

impl Rejection {
    pub fn code(&self) -> &'static str {
        match self {
            Rejection::DuplicateEmail => "duplicate_email",
            Rejection::DuplicateRollNumber => "duplicate_roll_number",
            Rejection::DuplicateStaffId => "duplicate_staff_id",
            Rejection::MenuConflict => "menu_conflict",
            Rejection::NotFound => "not_found",
            Rejection::Invalid(_) => "bad_params",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Rejection::DuplicateEmail => "a record with this email already exists".to_string(),
            Rejection::DuplicateRollNumber => {
                "a user with this roll number already exists".to_string()
            }
            Rejection::DuplicateStaffId => "a staff member with this id already exists".to_string(),
            Rejection::MenuConflict => {
                "a menu already exists for this date and meal type".to_string()
            }
            Rejection::NotFound => "record not found".to_string(),
            Rejection::Invalid(msg) => msg.clone(),
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

// ---------------------------------------------------------------------------
// Users

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub hostel: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub hostel: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

pub fn add_user(doc: &mut RootDocument, input: NewUser) -> Result<UserRecord, Rejection> {
    let email = input.email.trim().to_string();
    if email.is_empty() {
        return Err(Rejection::Invalid("email must not be empty".to_string()));
    }
    if doc.users.iter().any(|u| u.email == email) {
        return Err(Rejection::DuplicateEmail);
    }
    if let Some(roll) = input.roll_number.as_deref() {
        if !roll.is_empty()
            && roll != ROLL_PLACEHOLDER
            && doc.users.iter().any(|u| u.roll_number.as_deref() == Some(roll))
        {
            return Err(Rejection::DuplicateRollNumber);
        }
    }

    let roll_number = match input.roll_number {
        Some(r) if !r.is_empty() => Some(r),
        // Same fallback the signup flow used: a time-derived opaque id.
        _ => Some(format!("ID{}", Utc::now().timestamp_millis())),
    };
    let user = UserRecord {
        id: next_id(doc.users.iter().map(|u| u.id)),
        name: input.name,
        email,
        user_type: input.user_type.unwrap_or(UserType::Student),
        roll_number,
        hostel: input.hostel.unwrap_or_else(|| HOSTEL_DEFAULT.to_string()),
        room: input.room.unwrap_or_else(|| ROOM_DEFAULT.to_string()),
        phone: input.phone.unwrap_or_else(|| PHONE_DEFAULT.to_string()),
        password: input.password.unwrap_or_default(),
        created_at: now_timestamp(),
    };
    doc.users.push(user.clone());
    Ok(user)
}

pub fn update_user(doc: &mut RootDocument, id: i64, patch: UserPatch) -> Result<UserRecord, Rejection> {
    // Trim the same way add_user does, so whitespace cannot slip a
    // duplicate past the uniqueness check.
    let email = patch.email.map(|e| e.trim().to_string());
    if let Some(email) = email.as_deref() {
        if doc.users.iter().any(|u| u.id != id && u.email == email) {
            return Err(Rejection::DuplicateEmail);
        }
    }
    if let Some(roll) = patch.roll_number.as_deref() {
        if !roll.is_empty()
            && roll != ROLL_PLACEHOLDER
            && doc
                .users
                .iter()
                .any(|u| u.id != id && u.roll_number.as_deref() == Some(roll))
        {
            return Err(Rejection::DuplicateRollNumber);
        }
    }

    let user = doc
        .users
        .iter_mut()
        .find(|u| u.id == id)
        .ok_or(Rejection::NotFound)?;
    if let Some(name) = patch.name {
        user.name = name;
    }
    if let Some(email) = email {
        user.email = email;
    }
    if let Some(roll) = patch.roll_number {
        user.roll_number = Some(roll);
    }
    if let Some(hostel) = patch.hostel {
        user.hostel = hostel;
    }
    if let Some(room) = patch.room {
        user.room = room;
    }
    if let Some(phone) = patch.phone {
        user.phone = phone;
    }
    if let Some(password) = patch.password {
        user.password = password;
    }
    Ok(user.clone())
}

pub fn find_user(doc: &RootDocument, id: i64) -> Option<&UserRecord> {
    doc.users.iter().find(|u| u.id == id)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    #[serde(default, rename = "type")]
    pub user_type: Option<UserType>,
    #[serde(default)]
    pub search: Option<String>,
}

/// All predicates intersect (AND); the free-text search is a
/// case-insensitive substring match over name, email, roll number, and
/// hostel.
pub fn filter_users<'a>(doc: &'a RootDocument, query: &UserQuery) -> Vec<&'a UserRecord> {
    let needle = query.search.as_deref().map(str::to_lowercase);
    doc.users
        .iter()
        .filter(|u| query.user_type.map_or(true, |t| u.user_type == t))
        .filter(|u| {
            needle.as_deref().map_or(true, |n| {
                contains_ci(&u.name, n)
                    || contains_ci(&u.email, n)
                    || contains_ci(&u.hostel, n)
                    || u.roll_number
                        .as_deref()
                        .is_some_and(|r| contains_ci(r, n))
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Staff

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStaff {
    #[serde(default)]
    pub staff_id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub shift: Shift,
    #[serde(default)]
    pub role: Option<String>,
    pub password: String,
    #[serde(default)]
    pub status: Option<StaffStatus>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffPatch {
    #[serde(default)]
    pub staff_id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub shift: Option<Shift>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub status: Option<StaffStatus>,
}

/// STF + two-digit year + an opaque suffix, the staff-id shape the admin
/// dashboard generated. Uniqueness is still validated on add.
pub fn generate_staff_id() -> String {
    let year = Utc::now().year() % 100;
    let suffix = Uuid::new_v4().simple().to_string();
    let short: String = suffix.chars().take(6).collect::<String>().to_uppercase();
    format!("STF{year:02}{short}")
}

fn staff_conflict(doc: &RootDocument, id: i64, staff_id: &str, email: &str) -> Option<Rejection> {
    if doc.staff.iter().any(|s| s.id != id && s.staff_id == staff_id) {
        return Some(Rejection::DuplicateStaffId);
    }
    if doc.staff.iter().any(|s| s.id != id && s.email == email) {
        return Some(Rejection::DuplicateEmail);
    }
    None
}

pub fn add_staff(doc: &mut RootDocument, input: NewStaff) -> Result<StaffRecord, Rejection> {
    let email = input.email.trim().to_string();
    if email.is_empty() {
        return Err(Rejection::Invalid("email must not be empty".to_string()));
    }
    let staff_id = input
        .staff_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(generate_staff_id);
    if let Some(conflict) = staff_conflict(doc, 0, &staff_id, &email) {
        return Err(conflict);
    }

    let now = now_timestamp();
    let staff = StaffRecord {
        id: next_id(doc.staff.iter().map(|s| s.id)),
        staff_id,
        name: input.name,
        email,
        phone: input.phone.unwrap_or_else(|| PHONE_DEFAULT.to_string()),
        shift: input.shift,
        role: input.role.unwrap_or_else(|| "Kitchen Staff".to_string()),
        password: input.password,
        status: input.status.unwrap_or(StaffStatus::Active),
        created_at: now.clone(),
        updated_at: now,
    };
    doc.staff.push(staff.clone());
    Ok(staff)
}

pub fn update_staff(doc: &mut RootDocument, id: i64, patch: StaffPatch) -> Result<StaffRecord, Rejection> {
    let current = doc
        .staff
        .iter()
        .find(|s| s.id == id)
        .ok_or(Rejection::NotFound)?;
    let staff_id = patch
        .staff_id
        .clone()
        .unwrap_or_else(|| current.staff_id.clone());
    let email = patch.email.clone().unwrap_or_else(|| current.email.clone());
    // Uniqueness is checked against all *other* staff records; keeping your
    // own id or email on edit is not a conflict.
    if let Some(conflict) = staff_conflict(doc, id, &staff_id, &email) {
        return Err(conflict);
    }

    let staff = doc
        .staff
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or(Rejection::NotFound)?;
    staff.staff_id = staff_id;
    staff.email = email;
    if let Some(name) = patch.name {
        staff.name = name;
    }
    if let Some(phone) = patch.phone {
        staff.phone = phone;
    }
    if let Some(shift) = patch.shift {
        staff.shift = shift;
    }
    if let Some(role) = patch.role {
        staff.role = role;
    }
    if let Some(password) = patch.password {
        staff.password = password;
    }
    if let Some(status) = patch.status {
        staff.status = status;
    }
    staff.updated_at = now_timestamp();
    Ok(staff.clone())
}

pub fn toggle_staff_status(doc: &mut RootDocument, id: i64) -> Result<StaffRecord, Rejection> {
    let staff = doc
        .staff
        .iter_mut()
        .find(|s| s.id == id)
        .ok_or(Rejection::NotFound)?;
    staff.status = match staff.status {
        StaffStatus::Active => StaffStatus::Inactive,
        StaffStatus::Inactive => StaffStatus::Active,
    };
    staff.updated_at = now_timestamp();
    Ok(staff.clone())
}

/// Staff is the only entity with physical deletion; everything else is
/// logically transitioned through status fields.
pub fn delete_staff(doc: &mut RootDocument, id: i64) -> Result<StaffRecord, Rejection> {
    let index = doc
        .staff
        .iter()
        .position(|s| s.id == id)
        .ok_or(Rejection::NotFound)?;
    Ok(doc.staff.remove(index))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffQuery {
    #[serde(default)]
    pub status: Option<StaffStatus>,
    #[serde(default)]
    pub shift: Option<Shift>,
    #[serde(default)]
    pub search: Option<String>,
}

pub fn filter_staff<'a>(doc: &'a RootDocument, query: &StaffQuery) -> Vec<&'a StaffRecord> {
    let needle = query.search.as_deref().map(str::to_lowercase);
    doc.staff
        .iter()
        .filter(|s| query.status.map_or(true, |st| s.status == st))
        .filter(|s| query.shift.map_or(true, |sh| s.shift == sh))
        .filter(|s| {
            needle.as_deref().map_or(true, |n| {
                contains_ci(&s.name, n) || contains_ci(&s.staff_id, n) || contains_ci(&s.email, n)
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Complaints

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComplaint {
    pub title: String,
    pub student: String,
    #[serde(default)]
    pub student_id: Option<i64>,
    pub description: String,
    #[serde(default)]
    pub priority: Option<Priority>,
}

pub fn add_complaint(doc: &mut RootDocument, input: NewComplaint) -> Result<ComplaintRecord, Rejection> {
    if input.title.trim().is_empty() {
        return Err(Rejection::Invalid("title must not be empty".to_string()));
    }
    let complaint = ComplaintRecord {
        id: next_id(doc.complaints.iter().map(|c| c.id)),
        title: input.title,
        student: input.student,
        student_id: input.student_id,
        description: input.description,
        status: ComplaintStatus::Pending,
        priority: input.priority.unwrap_or(Priority::Medium),
        created_at: now_timestamp(),
    };
    doc.complaints.push(complaint.clone());
    Ok(complaint)
}

pub fn set_complaint_status(
    doc: &mut RootDocument,
    id: i64,
    status: ComplaintStatus,
) -> Result<ComplaintRecord, Rejection> {
    let complaint = doc
        .complaints
        .iter_mut()
        .find(|c| c.id == id)
        .ok_or(Rejection::NotFound)?;
    complaint.status = status;
    Ok(complaint.clone())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintQuery {
    #[serde(default)]
    pub status: Option<ComplaintStatus>,
    #[serde(default)]
    pub priority: Option<Priority>,
}

pub fn filter_complaints<'a>(doc: &'a RootDocument, query: &ComplaintQuery) -> Vec<&'a ComplaintRecord> {
    doc.complaints
        .iter()
        .filter(|c| query.status.map_or(true, |s| c.status == s))
        .filter(|c| query.priority.map_or(true, |p| c.priority == p))
        .collect()
}

// ---------------------------------------------------------------------------
// Feedback

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub student: String,
    #[serde(default)]
    pub student_id: Option<i64>,
    pub food_rating: u8,
    pub service_rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

pub fn add_feedback(doc: &mut RootDocument, input: NewFeedback) -> Result<FeedbackRecord, Rejection> {
    for (label, rating) in [("foodRating", input.food_rating), ("serviceRating", input.service_rating)] {
        if !(1..=5).contains(&rating) {
            return Err(Rejection::Invalid(format!("{label} must be between 1 and 5")));
        }
    }
    let feedback = FeedbackRecord {
        id: next_id(doc.feedback.iter().map(|f| f.id)),
        student: input.student,
        student_id: input.student_id,
        food_rating: input.food_rating,
        service_rating: input.service_rating,
        comment: input.comment.unwrap_or_default(),
        created_at: now_timestamp(),
        staff_status: FeedbackStatus::Unread,
        staff_reply: None,
    };
    doc.feedback.push(feedback.clone());
    Ok(feedback)
}

pub fn set_feedback_status(
    doc: &mut RootDocument,
    id: i64,
    status: FeedbackStatus,
) -> Result<FeedbackRecord, Rejection> {
    let feedback = doc
        .feedback
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or(Rejection::NotFound)?;
    feedback.staff_status = status;
    Ok(feedback.clone())
}

pub fn reply_feedback(doc: &mut RootDocument, id: i64, reply: String) -> Result<FeedbackRecord, Rejection> {
    let feedback = doc
        .feedback
        .iter_mut()
        .find(|f| f.id == id)
        .ok_or(Rejection::NotFound)?;
    feedback.staff_reply = Some(reply);
    feedback.staff_status = FeedbackStatus::Replied;
    Ok(feedback.clone())
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackQuery {
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub staff_status: Option<FeedbackStatus>,
}

pub fn filter_feedback<'a>(doc: &'a RootDocument, query: &FeedbackQuery) -> Vec<&'a FeedbackRecord> {
    doc.feedback
        .iter()
        // One predicate: the rating matches either the food or service score.
        .filter(|f| {
            query
                .rating
                .map_or(true, |r| f.food_rating == r || f.service_rating == r)
        })
        .filter(|f| {
            query
                .date
                .as_deref()
                .map_or(true, |d| f.created_at.starts_with(d))
        })
        .filter(|f| query.staff_status.map_or(true, |s| f.staff_status == s))
        .collect()
}

// ---------------------------------------------------------------------------
// Menus

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenu {
    pub date: String,
    pub meal_type: MealType,
    pub items: String,
    pub price: f64,
    /// Resolves a (date, mealType) conflict by replacing the existing
    /// record's items and price in place; without it the add is rejected.
    #[serde(default)]
    pub overwrite: bool,
}

pub fn add_menu(doc: &mut RootDocument, input: NewMenu) -> Result<MenuRecord, Rejection> {
    if !input.price.is_finite() || input.price < 0.0 {
        return Err(Rejection::Invalid("price must be non-negative".to_string()));
    }
    if input.date.trim().is_empty() {
        return Err(Rejection::Invalid("date must not be empty".to_string()));
    }

    if let Some(existing) = doc
        .menus
        .iter_mut()
        .find(|m| m.date == input.date && m.meal_type == input.meal_type)
    {
        if !input.overwrite {
            return Err(Rejection::MenuConflict);
        }
        existing.items = input.items;
        existing.price = input.price;
        return Ok(existing.clone());
    }

    let menu = MenuRecord {
        id: next_id(doc.menus.iter().map(|m| m.id)),
        date: input.date,
        meal_type: input.meal_type,
        items: input.items,
        price: input.price,
    };
    doc.menus.push(menu.clone());
    Ok(menu)
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuQuery {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub meal_type: Option<MealType>,
}

pub fn filter_menus<'a>(doc: &'a RootDocument, query: &MenuQuery) -> Vec<&'a MenuRecord> {
    doc.menus
        .iter()
        .filter(|m| query.date.as_deref().map_or(true, |d| m.date == d))
        .filter(|m| query.meal_type.map_or(true, |t| m.meal_type == t))
        .collect()
}

// ---------------------------------------------------------------------------
// Stats

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_users: usize,
    pub student_count: usize,
    pub staff_user_count: usize,
    pub admin_count: usize,
    pub pending_complaints: usize,
    pub in_progress_complaints: usize,
    pub solved_complaints: usize,
    pub total_feedback: usize,
    pub avg_food_rating: f64,
    pub avg_service_rating: f64,
    pub total_staff: usize,
    pub active_staff: usize,
    pub morning_shift: usize,
    pub evening_shift: usize,
    pub menu_count: usize,
}

pub fn overview(doc: &RootDocument) -> OverviewStats {
    let count_users = |t: UserType| doc.users.iter().filter(|u| u.user_type == t).count();
    let count_complaints =
        |s: ComplaintStatus| doc.complaints.iter().filter(|c| c.status == s).count();
    let avg = |pick: fn(&FeedbackRecord) -> u8| {
        if doc.feedback.is_empty() {
            0.0
        } else {
            let sum: u32 = doc.feedback.iter().map(|f| u32::from(pick(f))).sum();
            f64::from(sum) / doc.feedback.len() as f64
        }
    };
    // Shift counts follow the dashboard: only active staff are on shift.
    let on_shift = |shift: Shift| {
        doc.staff
            .iter()
            .filter(|s| s.shift == shift && s.status == StaffStatus::Active)
            .count()
    };

    OverviewStats {
        total_users: doc.users.len(),
        student_count: count_users(UserType::Student),
        staff_user_count: count_users(UserType::Staff),
        admin_count: count_users(UserType::Admin),
        pending_complaints: count_complaints(ComplaintStatus::Pending),
        in_progress_complaints: count_complaints(ComplaintStatus::InProgress),
        solved_complaints: count_complaints(ComplaintStatus::Solved),
        total_feedback: doc.feedback.len(),
        avg_food_rating: avg(|f| f.food_rating),
        avg_service_rating: avg(|f| f.service_rating),
        total_staff: doc.staff.len(),
        active_staff: doc
            .staff
            .iter()
            .filter(|s| s.status == StaffStatus::Active)
            .count(),
        morning_shift: on_shift(Shift::Morning),
        evening_shift: on_shift(Shift::Evening),
        menu_count: doc.menus.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, roll: &str) -> NewUser {
        NewUser {
            name: "Test".to_string(),
            email: email.to_string(),
            user_type: None,
            roll_number: Some(roll.to_string()),
            hostel: None,
            room: None,
            phone: None,
            password: Some("pw".to_string()),
        }
    }

    #[test]
    fn add_user_rejects_duplicate_email_without_partial_write() {
        let mut doc = RootDocument::default();
        add_user(&mut doc, new_user("a@x.com", "R1")).unwrap();
        let err = add_user(&mut doc, new_user("a@x.com", "R2")).unwrap_err();
        assert_eq!(err, Rejection::DuplicateEmail);
        assert_eq!(doc.users.len(), 1);
    }

    #[test]
    fn add_user_allows_placeholder_roll_collisions() {
        let mut doc = RootDocument::default();
        add_user(&mut doc, new_user("a@x.com", ROLL_PLACEHOLDER)).unwrap();
        add_user(&mut doc, new_user("b@x.com", ROLL_PLACEHOLDER)).unwrap();
        assert_eq!(doc.users.len(), 2);
        let err = add_user(&mut doc, new_user("c@x.com", "R1")).map(|_| ());
        assert!(err.is_ok());
        let err = add_user(&mut doc, new_user("d@x.com", "R1")).unwrap_err();
        assert_eq!(err, Rejection::DuplicateRollNumber);
    }

    #[test]
    fn update_user_trims_patched_email_before_uniqueness_check() {
        let mut doc = RootDocument::default();
        add_user(&mut doc, new_user("a@x.com", "R1")).unwrap();
        let b = add_user(&mut doc, new_user("b@x.com", "R2")).unwrap();

        let err = update_user(
            &mut doc,
            b.id,
            UserPatch {
                email: Some(" a@x.com ".to_string()),
                ..UserPatch::default()
            },
        )
        .unwrap_err();
        assert_eq!(err, Rejection::DuplicateEmail);

        let updated = update_user(
            &mut doc,
            b.id,
            UserPatch {
                email: Some(" b2@x.com ".to_string()),
                ..UserPatch::default()
            },
        )
        .unwrap();
        assert_eq!(updated.email, "b2@x.com");
    }

    #[test]
    fn user_ids_are_max_plus_one() {
        let mut doc = RootDocument::default();
        let a = add_user(&mut doc, new_user("a@x.com", "R1")).unwrap();
        assert_eq!(a.id, 1);
        doc.users[0].id = 41;
        let b = add_user(&mut doc, new_user("b@x.com", "R2")).unwrap();
        assert_eq!(b.id, 42);
    }

    #[test]
    fn update_staff_excludes_self_from_uniqueness() {
        let mut doc = RootDocument::default();
        let s = add_staff(
            &mut doc,
            NewStaff {
                staff_id: Some("STF24001".to_string()),
                name: "Cook".to_string(),
                email: "cook@mess.com".to_string(),
                phone: None,
                shift: Shift::Morning,
                role: None,
                password: "pw".to_string(),
                status: None,
            },
        )
        .unwrap();
        // Re-saving your own email and staff id must not conflict.
        let updated = update_staff(
            &mut doc,
            s.id,
            StaffPatch {
                email: Some("cook@mess.com".to_string()),
                staff_id: Some("STF24001".to_string()),
                name: Some("Head Cook".to_string()),
                ..StaffPatch::default()
            },
        )
        .unwrap();
        assert_eq!(updated.name, "Head Cook");
    }

    #[test]
    fn menu_conflict_requires_overwrite() {
        let mut doc = RootDocument::default();
        let first = add_menu(
            &mut doc,
            NewMenu {
                date: "2024-01-01".to_string(),
                meal_type: MealType::Lunch,
                items: "Rice".to_string(),
                price: 20.0,
                overwrite: false,
            },
        )
        .unwrap();
        let err = add_menu(
            &mut doc,
            NewMenu {
                date: "2024-01-01".to_string(),
                meal_type: MealType::Lunch,
                items: "Dal".to_string(),
                price: 25.0,
                overwrite: false,
            },
        )
        .unwrap_err();
        assert_eq!(err, Rejection::MenuConflict);

        let replaced = add_menu(
            &mut doc,
            NewMenu {
                date: "2024-01-01".to_string(),
                meal_type: MealType::Lunch,
                items: "Dal".to_string(),
                price: 25.0,
                overwrite: true,
            },
        )
        .unwrap();
        assert_eq!(replaced.id, first.id);
        assert_eq!(doc.menus.len(), 1);
        assert_eq!(doc.menus[0].items, "Dal");
    }

    #[test]
    fn filter_users_intersects_predicates() {
        let mut doc = RootDocument::default();
        add_user(&mut doc, new_user("ana@x.com", "R1")).unwrap();
        add_user(&mut doc, new_user("bob@x.com", "R2")).unwrap();
        let mut staff_user = new_user("anand@x.com", "R3");
        staff_user.user_type = Some(UserType::Staff);
        add_user(&mut doc, staff_user).unwrap();

        let both = filter_users(
            &doc,
            &UserQuery {
                user_type: Some(UserType::Student),
                search: Some("ana".to_string()),
            },
        );
        let by_type = filter_users(
            &doc,
            &UserQuery {
                user_type: Some(UserType::Student),
                search: None,
            },
        );
        let by_search = filter_users(
            &doc,
            &UserQuery {
                user_type: None,
                search: Some("ana".to_string()),
            },
        );
        let intersection: Vec<i64> = by_type
            .iter()
            .map(|u| u.id)
            .filter(|id| by_search.iter().any(|u| u.id == *id))
            .collect();
        assert_eq!(both.iter().map(|u| u.id).collect::<Vec<_>>(), intersection);
    }
}
