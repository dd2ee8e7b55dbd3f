use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const MAX_ATTEMPTS: usize = 5;
const WINDOW: Duration = Duration::from_secs(900);

/// Failed sign-ins per client address, so the portal stops forwarding
/// password guesses to the backend.
#[derive(Clone, Default)]
pub struct LoginLimiter {
    attempts: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
}

impl LoginLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True once `ip` has used up its attempts inside the window.
    pub fn is_blocked(&self, ip: IpAddr) -> bool {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();

        match map.get_mut(&ip) {
            Some(timestamps) => {
                timestamps.retain(|t| now.duration_since(*t) < WINDOW);
                timestamps.len() >= MAX_ATTEMPTS
            }
            None => false,
        }
    }

    pub fn record_failure(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.entry(ip).or_default().push(Instant::now());
    }

    pub fn clear(&self, ip: IpAddr) {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        map.remove(&ip);
    }

    /// Forget attempts older than the window; returns how many addresses were dropped.
    pub fn prune(&self) -> usize {
        let mut map = self.attempts.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let before = map.len();
        map.retain(|_, timestamps| {
            timestamps.retain(|t| now.duration_since(*t) < WINDOW);
            !timestamps.is_empty()
        });
        before - map.len()
    }
}

/// Background sweep so addresses that never come back do not pile up.
pub fn spawn_pruner(limiter: LoginLimiter) {
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(WINDOW);
        loop {
            interval.tick().await;
            let dropped = limiter.prune();
            if dropped > 0 {
                log::debug!("Login limiter pruned {dropped} idle addresses");
            }
        }
    });
}
