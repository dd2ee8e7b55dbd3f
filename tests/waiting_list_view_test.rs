//! View-model tests for the waiting-list page: status badges, the expiry
//! countdown, and which controls an entry offers.

use chrono::{Duration, TimeZone, Utc};

use mahsoule::api::types::{WaitingListEntry, WaitingStatus};
use mahsoule::waiting_list::{
    Countdown, EntryNotice, EntryView, PendingActions, StatusBadge, WaitingListView, time_remaining,
};

fn entry(status: &str, expires_in: Option<Duration>) -> WaitingListEntry {
    let now = Utc::now();
    WaitingListEntry {
        id: 1,
        appointment: None,
        grain_type: "WHEAT".to_string(),
        requested_quantity: 20.0,
        position: Some(2),
        status: WaitingStatus::from(status.to_string()),
        notified_at: None,
        expires_at: expires_in.map(|d| now + d),
    }
}

// ---------------------------------------------------------------------------
// Status badges
// ---------------------------------------------------------------------------

#[test]
fn test_every_status_has_label_and_color() {
    let expected = [
        ("WAITING", "Waiting", "badge-blue"),
        ("NOTIFIED", "Action Required", "badge-yellow"),
        ("CONFIRMED", "Confirmed", "badge-green"),
        ("DECLINED", "Declined", "badge-gray"),
        ("EXPIRED", "Expired", "badge-red"),
    ];
    for (raw, label, color) in expected {
        let badge = StatusBadge::for_raw(raw);
        assert_eq!(badge.label, label, "label for {raw}");
        assert_eq!(badge.color_class, color, "color for {raw}");
        assert!(!badge.label.is_empty());
    }
}

#[test]
fn test_unrecognized_status_falls_back_to_waiting() {
    let waiting = StatusBadge::for_raw("WAITING");
    assert_eq!(StatusBadge::for_raw("PAUSED"), waiting);
    assert_eq!(StatusBadge::for_raw("notified"), waiting);
    assert_eq!(StatusBadge::for_raw(""), waiting);
}

// ---------------------------------------------------------------------------
// Countdown
// ---------------------------------------------------------------------------

#[test]
fn test_countdown_past_expiry_is_expired() {
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    let past = now - Duration::minutes(1);
    let countdown = time_remaining(Some(past), now).unwrap();
    assert_eq!(countdown, Countdown::Expired);
    assert_eq!(countdown.describe(), "Expired");

    // Exactly at expiry counts as expired too
    assert_eq!(time_remaining(Some(now), now), Some(Countdown::Expired));
}

#[test]
fn test_countdown_future_expiry_is_readable() {
    let now = Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap();
    let countdown = time_remaining(Some(now + Duration::minutes(110)), now).unwrap();
    assert!(!countdown.is_expired());
    assert_eq!(countdown.describe(), "Expires in about 2 hours");

    let soon = time_remaining(Some(now + Duration::minutes(12)), now).unwrap();
    assert_eq!(soon.describe(), "Expires in 12 minutes");
}

#[test]
fn test_countdown_without_expiry_is_none() {
    assert_eq!(time_remaining(None, Utc::now()), None);
}

// ---------------------------------------------------------------------------
// Entry views
// ---------------------------------------------------------------------------

#[test]
fn test_notified_entry_with_future_expiry_enables_both_controls() {
    let e = entry("NOTIFIED", Some(Duration::hours(1)));
    let view = EntryView::build(&e, Utc::now(), false);

    assert!(view.show_controls);
    assert!(view.controls_enabled);
    assert_eq!(view.notice, Some(EntryNotice::SlotOffered));
    let countdown = view.countdown.expect("countdown shown");
    assert!(countdown.starts_with("Expires in"));
    assert!(!view.countdown_expired);
}

#[test]
fn test_notified_entry_past_expiry_still_follows_backend_status() {
    // The clock says expired, the backend still says NOTIFIED: controls stay.
    let e = entry("NOTIFIED", Some(Duration::minutes(-5)));
    let view = EntryView::build(&e, Utc::now(), false);

    assert!(view.controls_enabled);
    assert!(view.countdown_expired);
    assert_eq!(view.countdown.as_deref(), Some("Expired"));
}

#[test]
fn test_confirmed_entry_has_no_controls_and_shows_notice() {
    let e = entry("CONFIRMED", None);
    let view = EntryView::build(&e, Utc::now(), false);

    assert!(!view.show_controls);
    assert!(!view.controls_enabled);
    assert_eq!(view.notice, Some(EntryNotice::Confirmed));
    assert!(view.notice.unwrap().text().contains("Time slot confirmed"));
    assert_eq!(view.position, None, "terminal entries drop their position");
}

#[test]
fn test_waiting_entry_shows_queue_position() {
    let e = entry("WAITING", None);
    let view = EntryView::build(&e, Utc::now(), false);

    assert!(!view.show_controls);
    assert_eq!(view.position, Some(2));
    assert!(view.notice.unwrap().text().contains("position #2"));
    assert_eq!(view.grain_label, "Wheat");
    assert_eq!(view.quantity_display, "20 tons");
    assert_eq!(view.zone_name, "Warehouse");
}

#[test]
fn test_pending_action_disables_controls() {
    let pending = PendingActions::new();
    let e = entry("NOTIFIED", Some(Duration::hours(1)));

    let _guard = pending.try_begin(9, e.id).expect("claim");
    // Both actions share the claim
    assert!(pending.try_begin(9, e.id).is_none());

    let view = WaitingListView::loaded(std::slice::from_ref(&e), Utc::now(), &pending, 9);
    assert!(view.entries[0].show_controls);
    assert!(!view.entries[0].controls_enabled);

    // Another farmer with the same entry id is unaffected
    let other = WaitingListView::loaded(std::slice::from_ref(&e), Utc::now(), &pending, 10);
    assert!(other.entries[0].controls_enabled);
}

#[test]
fn test_failed_fetch_has_error_and_no_entries() {
    let view = WaitingListView::failed("Failed to fetch waiting lists");
    assert_eq!(view.error.as_deref(), Some("Failed to fetch waiting lists"));
    assert!(view.entries.is_empty());
    assert!(!view.is_empty(), "an error is not the empty state");
}

#[test]
fn test_entry_decodes_from_wire_format() {
    let raw = r#"{
        "id": 3,
        "appointment": {
            "appointmentDate": "2026-11-03T00:00:00.000Z",
            "warehouseZone": {"name": "Zone A"},
            "timeSlot": {"startTime": "10:00", "endTime": "11:00"}
        },
        "grainType": "BARLEY",
        "requestedQuantity": 7.5,
        "position": 1,
        "status": "NOTIFIED",
        "notifiedAt": "2026-10-17T09:00:00",
        "expiresAt": "2026-10-17T11:00:00Z"
    }"#;
    let e: WaitingListEntry = serde_json::from_str(raw).expect("decode entry");
    assert_eq!(e.status, WaitingStatus::Notified);
    assert_eq!(e.position, Some(1));

    let now = Utc.with_ymd_and_hms(2026, 10, 17, 10, 0, 0).unwrap();
    let view = EntryView::build(&e, now, false);
    assert_eq!(view.zone_name, "Zone A");
    assert_eq!(view.date_display, "Nov 3, 2026");
    assert_eq!(view.time_range.as_deref(), Some("10:00 - 11:00"));
    assert_eq!(view.grain_label, "Barley");
    assert_eq!(view.quantity_display, "7.5 tons");
    assert_eq!(view.countdown.as_deref(), Some("Expires in about 1 hour"));
    assert_eq!(view.notified_ago.as_deref(), Some("about 1 hour ago"));
}
