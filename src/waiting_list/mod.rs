//! View model for a farmer's waiting-list entries.
//!
//! The backend owns every status transition; this module only decides how an
//! entry is shown and which controls are live, given the last fetch, the wall
//! clock and the set of in-flight actions.

pub mod countdown;
pub mod pending;
pub mod status;
pub mod view;

pub use countdown::{Countdown, time_remaining};
pub use pending::{PendingActions, PendingGuard};
pub use status::StatusBadge;
pub use view::{EntryNotice, EntryView, WaitingListView};
