use crate::api::types::WaitingStatus;

/// Label and color treatment for a status pill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusBadge {
    pub label: &'static str,
    pub color_class: &'static str,
}

const WAITING: StatusBadge = StatusBadge { label: "Waiting", color_class: "badge-blue" };
const NOTIFIED: StatusBadge = StatusBadge { label: "Action Required", color_class: "badge-yellow" };
const CONFIRMED: StatusBadge = StatusBadge { label: "Confirmed", color_class: "badge-green" };
const DECLINED: StatusBadge = StatusBadge { label: "Declined", color_class: "badge-gray" };
const EXPIRED: StatusBadge = StatusBadge { label: "Expired", color_class: "badge-red" };

impl StatusBadge {
    /// Statuses the portal does not recognise are shown as WAITING.
    pub fn for_status(status: &WaitingStatus) -> StatusBadge {
        match status {
            WaitingStatus::Waiting => WAITING,
            WaitingStatus::Notified => NOTIFIED,
            WaitingStatus::Confirmed => CONFIRMED,
            WaitingStatus::Declined => DECLINED,
            WaitingStatus::Expired => EXPIRED,
            WaitingStatus::Unrecognized(_) => WAITING,
        }
    }

    pub fn for_raw(raw: &str) -> StatusBadge {
        Self::for_status(&WaitingStatus::from(raw.to_string()))
    }
}
