use chrono::{DateTime, Duration, Utc};

/// Advisory time left on a notification. The backend status still decides
/// whether Confirm/Decline are offered; clocks may disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Countdown {
    Expired,
    Remaining(Duration),
}

impl Countdown {
    pub fn is_expired(&self) -> bool {
        matches!(self, Countdown::Expired)
    }

    /// "Expired" or e.g. "Expires in about 2 hours".
    pub fn describe(&self) -> String {
        match self {
            Countdown::Expired => "Expired".to_string(),
            Countdown::Remaining(left) => format!("Expires in {}", distance(*left)),
        }
    }
}

/// `None` when the entry carries no expiry.
pub fn time_remaining(expires_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<Countdown> {
    let expiry = expires_at?;
    if expiry <= now {
        Some(Countdown::Expired)
    } else {
        Some(Countdown::Remaining(expiry - now))
    }
}

/// "Notified 5 minutes ago"-style phrase for a past instant.
pub fn ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now - then;
    if elapsed < Duration::zero() {
        return format!("in {}", distance(-elapsed));
    }
    format!("{} ago", distance(elapsed))
}

/// Human distance between two instants, bucketed the way people say it.
pub fn distance(d: Duration) -> String {
    let secs = d.num_seconds().abs();
    let minutes = (secs + 30) / 60;

    match minutes {
        0 => "less than a minute".to_string(),
        1 => "1 minute".to_string(),
        2..=44 => format!("{minutes} minutes"),
        45..=89 => "about 1 hour".to_string(),
        90..=1439 => format!("about {} hours", (minutes + 30) / 60),
        1440..=2519 => "1 day".to_string(),
        2520..=43199 => format!("{} days", (minutes + 720) / 1440),
        43200..=86399 => match (minutes + 21600) / 43200 {
            1 => "about 1 month".to_string(),
            months => format!("about {months} months"),
        },
        86400..=525599 => format!("{} months", (minutes + 21600) / 43200),
        _ => {
            let years = minutes / 525600;
            if years == 1 { "about 1 year".to_string() } else { format!("about {years} years") }
        }
    }
}
