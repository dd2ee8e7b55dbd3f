use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::api::types::{GrainType, WaitingListEntry, WaitingStatus, parse_timestamp};
use super::countdown::{self, time_remaining};
use super::pending::PendingActions;
use super::status::StatusBadge;

/// Explanatory box under an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryNotice {
    InQueue { position: Option<u32> },
    SlotOffered,
    Confirmed,
    Expired,
}

impl EntryNotice {
    fn for_status(status: &WaitingStatus, position: Option<u32>) -> Option<EntryNotice> {
        match status {
            WaitingStatus::Waiting => Some(EntryNotice::InQueue { position }),
            WaitingStatus::Notified => Some(EntryNotice::SlotOffered),
            WaitingStatus::Confirmed => Some(EntryNotice::Confirmed),
            WaitingStatus::Expired => Some(EntryNotice::Expired),
            WaitingStatus::Declined | WaitingStatus::Unrecognized(_) => None,
        }
    }

    pub fn text(&self) -> String {
        match self {
            EntryNotice::InQueue { position: Some(p) } => format!(
                "You are in position #{p} in the waiting list. We will notify you when a slot becomes available."
            ),
            EntryNotice::InQueue { position: None } => {
                "You are in the waiting list. We will notify you when a slot becomes available.".to_string()
            }
            EntryNotice::SlotOffered => "A time slot is now available for you!".to_string(),
            EntryNotice::Confirmed => {
                "Time slot confirmed! Check your appointments to see the details.".to_string()
            }
            EntryNotice::Expired => {
                "This notification has expired. The slot was offered to the next person in line.".to_string()
            }
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            EntryNotice::InQueue { .. } => "notice-blue",
            EntryNotice::SlotOffered => "notice-yellow",
            EntryNotice::Confirmed => "notice-green",
            EntryNotice::Expired => "notice-red",
        }
    }
}

/// One entry, flattened for the template.
#[derive(Debug, Clone)]
pub struct EntryView {
    pub id: i64,
    pub zone_name: String,
    pub date_display: String,
    pub time_range: Option<String>,
    pub grain_label: String,
    pub quantity_display: String,
    pub position: Option<u32>,
    pub status: WaitingStatus,
    pub badge: StatusBadge,
    pub notice: Option<EntryNotice>,
    pub countdown: Option<String>,
    pub countdown_expired: bool,
    pub notified_ago: Option<String>,
    /// Confirm/Decline are offered only for NOTIFIED entries.
    pub show_controls: bool,
    /// False while a confirm or decline for this entry is in flight.
    pub controls_enabled: bool,
}

impl EntryView {
    pub fn build(entry: &WaitingListEntry, now: DateTime<Utc>, action_pending: bool) -> Self {
        let appointment = entry.appointment.clone().unwrap_or_default();

        let zone_name = appointment
            .warehouse_zone
            .and_then(|z| z.name)
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Warehouse".to_string());

        let date_display = appointment
            .appointment_date
            .as_deref()
            .map(format_date)
            .unwrap_or_else(|| "-".to_string());

        let time_range = appointment.time_slot.and_then(|slot| match (slot.start_time, slot.end_time) {
            (Some(start), Some(end)) => Some(format!("{start} - {end}")),
            (Some(start), None) => Some(start),
            _ => None,
        });

        let grain_label = GrainType::from_code(&entry.grain_type)
            .map(|g| g.label().to_string())
            .unwrap_or_else(|| entry.grain_type.clone());

        let show_controls = entry.status == WaitingStatus::Notified;

        let (countdown, countdown_expired) = if show_controls {
            match time_remaining(entry.expires_at, now) {
                Some(c) => (Some(c.describe()), c.is_expired()),
                None => (None, false),
            }
        } else {
            (None, false)
        };

        Self {
            id: entry.id,
            zone_name,
            date_display,
            time_range,
            grain_label,
            quantity_display: format_quantity(entry.requested_quantity),
            position: if entry.status.is_terminal() { None } else { entry.position },
            badge: StatusBadge::for_status(&entry.status),
            notice: EntryNotice::for_status(&entry.status, entry.position),
            countdown,
            countdown_expired,
            notified_ago: entry.notified_at.map(|t| countdown::ago(t, now)),
            show_controls,
            controls_enabled: show_controls && !action_pending,
            status: entry.status.clone(),
        }
    }
}

/// Everything the waiting-list page renders.
#[derive(Debug, Clone, Default)]
pub struct WaitingListView {
    pub entries: Vec<EntryView>,
    pub error: Option<String>,
}

impl WaitingListView {
    pub fn loaded(
        entries: &[WaitingListEntry],
        now: DateTime<Utc>,
        pending: &PendingActions,
        user_id: i64,
    ) -> Self {
        let entries = entries
            .iter()
            .map(|e| EntryView::build(e, now, pending.is_pending(user_id, e.id)))
            .collect();
        Self { entries, error: None }
    }

    /// A failed fetch shows the message and nothing else.
    pub fn failed(message: impl Into<String>) -> Self {
        Self { entries: Vec::new(), error: Some(message.into()) }
    }

    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.entries.is_empty()
    }
}

/// Entries whose status moved backwards since `previous` was recorded.
pub fn regressions(previous: &HashMap<i64, String>, entries: &[WaitingListEntry]) -> Vec<i64> {
    entries
        .iter()
        .filter(|e| {
            previous
                .get(&e.id)
                .map(|before| !WaitingStatus::from(before.clone()).can_advance_to(&e.status))
                .unwrap_or(false)
        })
        .map(|e| e.id)
        .collect()
}

/// Last-seen statuses worth keeping for the next regression check.
///
/// Terminal entries never move again, so only live ones are kept, and at most `limit`
/// of them (lowest ids first) since the map rides in the session cookie.
pub fn statuses_to_remember(entries: &[WaitingListEntry], limit: usize) -> HashMap<i64, String> {
    let mut live: Vec<&WaitingListEntry> = entries.iter().filter(|e| !e.status.is_terminal()).collect();
    live.sort_by_key(|e| e.id);
    live.into_iter()
        .take(limit)
        .map(|e| (e.id, e.status.as_str().to_string()))
        .collect()
}

fn format_date(raw: &str) -> String {
    parse_timestamp(raw)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn format_quantity(tons: f64) -> String {
    if tons.fract() == 0.0 {
        format!("{tons:.0} tons")
    } else {
        format!("{tons} tons")
    }
}
