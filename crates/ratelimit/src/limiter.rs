//! Fixed-window request counter keyed by client identifier

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use crate::sweeper::Sweeper;

/// Counter state for one client
#[derive(Debug, Clone, Copy)]
struct ClientWindow {
    count: u32,
    window_start: Instant,
}

/// In-memory per-client rate limiter with fixed-window counters.
///
/// A window opens on a client's first request and lasts `interval`; at
/// most `limit` requests are allowed inside it. Because windows reset
/// rather than slide, a client can land up to `2 * limit` requests around
/// a window boundary.
///
/// `limit == 0` allows only the opening request of each window and a zero
/// `interval` disables limiting; neither is rejected here, so callers own
/// sane configuration.
#[derive(Clone)]
pub struct RateLimiter {
    inner: Arc<LimiterInner>,
}

struct LimiterInner {
    interval: Duration,
    limit: u32,
    clients: Mutex<HashMap<String, ClientWindow>>,
}

impl RateLimiter {
    pub fn new(interval: Duration, limit: u32) -> Self {
        Self {
            inner: Arc::new(LimiterInner {
                interval,
                limit,
                clients: Mutex::new(HashMap::new()),
            }),
        }
    }

    pub fn interval(&self) -> Duration {
        self.inner.interval
    }

    pub fn limit(&self) -> u32 {
        self.inner.limit
    }

    /// Returns `true` if the request is allowed, `false` if rate-limited.
    pub fn allow(&self, client_id: &str) -> bool {
        self.allow_at(client_id, Instant::now())
    }

    /// Same decision as `allow`, taken at the given instant.
    pub fn allow_at(&self, client_id: &str, now: Instant) -> bool {
        let mut clients = self.lock();

        if let Some(window) = clients.get_mut(client_id) {
            if !self.window_expired(window, now) {
                if window.count >= self.inner.limit {
                    return false;
                }
                window.count += 1;
                return true;
            }
        }

        // Unseen client or expired window: open a new one
        clients.insert(
            client_id.to_string(),
            ClientWindow {
                count: 1,
                window_start: now,
            },
        );
        true
    }

    /// Removes clients whose window has expired; returns how many.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now())
    }

    pub fn sweep_at(&self, now: Instant) -> usize {
        let mut clients = self.lock();
        let before = clients.len();
        clients.retain(|_, window| !self.window_expired(window, now));
        before - clients.len()
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    /// Start the background sweep on a fixed `period`.
    ///
    /// Requires a running tokio runtime. The task lives until the returned
    /// `Sweeper` is shut down or dropped.
    pub fn spawn_sweeper(&self, period: Duration) -> Sweeper {
        Sweeper::spawn(self.clone(), period)
    }

    fn window_expired(&self, window: &ClientWindow, now: Instant) -> bool {
        now.saturating_duration_since(window.window_start) >= self.inner.interval
    }

    // A panic while holding the lock cannot leave a window half-updated,
    // so a poisoned table is still consistent.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, ClientWindow>> {
        self.inner
            .clients
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
