use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::auth::role::Role;

/// Authenticated user as the backend describes it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: Role,
    #[serde(default)]
    pub is_suspended: bool,
    #[serde(default)]
    pub phone: Option<String>,
}

impl UserProfile {
    pub fn display_name(&self) -> String {
        let full = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let full = full.trim();
        if full.is_empty() {
            self.email.clone()
        } else {
            full.to_string()
        }
    }

    pub fn first_name_or_display(&self) -> String {
        match self.first_name.trim() {
            "" => self.display_name(),
            first => first.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserProfile,
}

/// `/auth/profile` answers either `{ "user": {...} }` or the bare user.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ProfileResponse {
    Wrapped { user: UserProfile },
    Bare(UserProfile),
}

impl ProfileResponse {
    pub fn into_user(self) -> UserProfile {
        match self {
            ProfileResponse::Wrapped { user } => user,
            ProfileResponse::Bare(user) => user,
        }
    }
}

/// Lifecycle status of a queue entry. Strings the portal does not know are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum WaitingStatus {
    Waiting,
    Notified,
    Confirmed,
    Declined,
    Expired,
    Unrecognized(String),
}

impl WaitingStatus {
    pub fn as_str(&self) -> &str {
        match self {
            WaitingStatus::Waiting => "WAITING",
            WaitingStatus::Notified => "NOTIFIED",
            WaitingStatus::Confirmed => "CONFIRMED",
            WaitingStatus::Declined => "DECLINED",
            WaitingStatus::Expired => "EXPIRED",
            WaitingStatus::Unrecognized(raw) => raw,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            WaitingStatus::Confirmed | WaitingStatus::Declined | WaitingStatus::Expired
        )
    }

    /// Whether the backend may move an entry from `self` to `next`.
    /// WAITING -> NOTIFIED -> {CONFIRMED | DECLINED | EXPIRED}; staying put is allowed.
    pub fn can_advance_to(&self, next: &WaitingStatus) -> bool {
        if self == next {
            return true;
        }
        match self {
            WaitingStatus::Waiting => !matches!(next, WaitingStatus::Unrecognized(_)),
            WaitingStatus::Notified => next.is_terminal(),
            WaitingStatus::Confirmed | WaitingStatus::Declined | WaitingStatus::Expired => false,
            WaitingStatus::Unrecognized(_) => true,
        }
    }
}

impl From<String> for WaitingStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "WAITING" => WaitingStatus::Waiting,
            "NOTIFIED" => WaitingStatus::Notified,
            "CONFIRMED" => WaitingStatus::Confirmed,
            "DECLINED" => WaitingStatus::Declined,
            "EXPIRED" => WaitingStatus::Expired,
            _ => WaitingStatus::Unrecognized(raw),
        }
    }
}

impl From<WaitingStatus> for String {
    fn from(status: WaitingStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlotRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentRef {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub appointment_date: Option<String>,
    #[serde(default)]
    pub warehouse_zone: Option<ZoneRef>,
    #[serde(default)]
    pub time_slot: Option<TimeSlotRef>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListEntry {
    pub id: i64,
    #[serde(default)]
    pub appointment: Option<AppointmentRef>,
    pub grain_type: String,
    pub requested_quantity: f64,
    #[serde(default)]
    pub position: Option<u32>,
    pub status: WaitingStatus,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub notified_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "deserialize_opt_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingListResponse {
    #[serde(default)]
    pub waiting_lists: Vec<WaitingListEntry>,
}

/// Grain varieties a zone can be restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GrainType {
    Wheat,
    Corn,
    Rice,
    Barley,
    Soybean,
    Other,
}

impl GrainType {
    pub const ALL: [GrainType; 6] = [
        GrainType::Wheat,
        GrainType::Corn,
        GrainType::Rice,
        GrainType::Barley,
        GrainType::Soybean,
        GrainType::Other,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            GrainType::Wheat => "WHEAT",
            GrainType::Corn => "CORN",
            GrainType::Rice => "RICE",
            GrainType::Barley => "BARLEY",
            GrainType::Soybean => "SOYBEAN",
            GrainType::Other => "OTHER",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GrainType::Wheat => "Wheat",
            GrainType::Corn => "Corn",
            GrainType::Rice => "Rice",
            GrainType::Barley => "Barley",
            GrainType::Soybean => "Soybean",
            GrainType::Other => "Other",
        }
    }

    pub fn from_code(code: &str) -> Option<GrainType> {
        GrainType::ALL.into_iter().find(|g| g.code() == code.trim())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinWaitingListRequest {
    pub warehouse_zone_id: i64,
    pub time_slot_id: i64,
    pub grain_type: GrainType,
    pub requested_quantity: f64,
}

/// Error payload; FastAPI uses `detail`, the Node backend `message`.
#[derive(Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn text(&self) -> Option<String> {
        if let Some(msg) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return Some(msg.to_string());
        }
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

/// Lenient timestamp parsing: RFC 3339, or a naive ISO date-time taken as UTC.
/// Entries with an unreadable optional timestamp still decode, without it.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn deserialize_opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(match raw {
        None => None,
        Some(s) if s.trim().is_empty() => None,
        Some(s) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                log::warn!("Ignoring unreadable timestamp from backend: {s:?}");
            }
            parsed
        }
    })
}
