use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Sentinel roll number meaning "no roll number assigned". Excluded from
/// uniqueness checks and from the deduplication seen-set.
pub const ROLL_PLACEHOLDER: &str = "Not Assigned";

pub const HOSTEL_DEFAULT: &str = "Not Assigned";
pub const ROOM_DEFAULT: &str = "Not Assigned";
pub const PHONE_DEFAULT: &str = "Not Provided";

/// RFC 3339 with millisecond precision and a trailing Z, matching the
/// timestamps older dashboards wrote into the document.
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserType {
    Student,
    Staff,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shift {
    Morning,
    Evening,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffStatus {
    Active,
    Inactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComplaintStatus {
    Pending,
    InProgress,
    Solved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    #[default]
    Unread,
    Read,
    Forwarded,
    Replied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub user_type: UserType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roll_number: Option<String>,
    #[serde(default)]
    pub hostel: String,
    #[serde(default)]
    pub room: String,
    #[serde(default)]
    pub phone: String,
    // Stored in the clear, as the legacy dashboards did. A documented
    // weakness of the format, not a recommendation.
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub created_at: String,
}

impl UserRecord {
    pub fn has_real_roll(&self) -> bool {
        matches!(self.roll_number.as_deref(), Some(r) if !r.is_empty() && r != ROLL_PLACEHOLDER)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffRecord {
    pub id: i64,
    pub staff_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub shift: Shift,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub password: String,
    pub status: StaffStatus,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintRecord {
    pub id: i64,
    pub title: String,
    pub student: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    pub description: String,
    pub status: ComplaintStatus,
    pub priority: Priority,
    // Older dashboards wrote this field as "date"; normalized to createdAt
    // on the next write.
    #[serde(default, alias = "date")]
    pub created_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedbackRecord {
    pub id: i64,
    pub student: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_id: Option<i64>,
    pub food_rating: u8,
    pub service_rating: u8,
    #[serde(default)]
    pub comment: String,
    #[serde(default, alias = "date")]
    pub created_at: String,
    #[serde(default)]
    pub staff_status: FeedbackStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub staff_reply: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuRecord {
    pub id: i64,
    pub date: String,
    pub meal_type: MealType,
    pub items: String,
    pub price: f64,
}

/// The whole persisted document. Read and rewritten as a unit on every
/// mutation; there are no partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RootDocument {
    #[serde(default)]
    pub users: Vec<UserRecord>,
    #[serde(default)]
    pub staff: Vec<StaffRecord>,
    #[serde(default)]
    pub complaints: Vec<ComplaintRecord>,
    #[serde(default)]
    pub feedback: Vec<FeedbackRecord>,
    #[serde(default)]
    pub menus: Vec<MenuRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// Next id for a collection: one past the maximum id present, so ids stay
/// unique after deletions (length-based assignment would not).
pub fn next_id(ids: impl Iterator<Item = i64>) -> i64 {
    ids.max().unwrap_or(0) + 1
}
