use std::collections::HashSet;
use std::sync::{Arc, Mutex};

type ActionKey = (i64, i64);

/// In-flight confirm/decline requests, keyed by (user id, entry id).
///
/// Confirm and decline share one key per entry, so while either is pending a
/// second submission of either is refused. The slot frees itself when the
/// guard drops, whether the backend call succeeded or failed.
#[derive(Clone, Default)]
pub struct PendingActions {
    in_flight: Arc<Mutex<HashSet<ActionKey>>>,
}

impl PendingActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the entry for one request; `None` if a request is already out.
    pub fn try_begin(&self, user_id: i64, entry_id: i64) -> Option<PendingGuard> {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        if set.insert((user_id, entry_id)) {
            Some(PendingGuard {
                owner: self.clone(),
                key: (user_id, entry_id),
            })
        } else {
            None
        }
    }

    pub fn is_pending(&self, user_id: i64, entry_id: i64) -> bool {
        let set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.contains(&(user_id, entry_id))
    }

    fn release(&self, key: ActionKey) {
        let mut set = self.in_flight.lock().unwrap_or_else(|e| e.into_inner());
        set.remove(&key);
    }
}

pub struct PendingGuard {
    owner: PendingActions,
    key: ActionKey,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.owner.release(self.key);
    }
}
