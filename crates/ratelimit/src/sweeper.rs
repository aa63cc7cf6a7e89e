//! Background eviction of expired client windows

use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::limiter::RateLimiter;

/// Shortest accepted sweep period; `tokio::time::interval` rejects zero
const MIN_SWEEP_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a running sweep task.
///
/// `shutdown` stops the task and waits for it. Dropping the handle also
/// stops the task, without waiting.
pub struct Sweeper {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

impl Sweeper {
    pub(crate) fn spawn(limiter: RateLimiter, period: Duration) -> Self {
        let (stop, mut stopped) = oneshot::channel::<()>();
        let period = period.max(MIN_SWEEP_PERIOD);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = &mut stopped => break,
                    _ = ticker.tick() => {
                        let removed = limiter.sweep();
                        if removed > 0 {
                            tracing::debug!(
                                removed,
                                remaining = limiter.tracked_clients(),
                                "Evicted expired rate limit windows"
                            );
                        }
                    }
                }
            }

            tracing::debug!("Rate limit sweeper stopped");
        });

        Self { stop, handle }
    }

    /// Stop the sweep task and wait for it to finish
    pub async fn shutdown(self) {
        // Err means the task already ended
        let _ = self.stop.send(());

        if let Err(e) = self.handle.await {
            tracing::warn!(error = %e, "Rate limit sweeper task failed");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}
