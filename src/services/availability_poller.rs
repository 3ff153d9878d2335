//! Periodic availability refresh
//!
//! Recomputes the availability snapshot on a fixed interval and publishes it
//! on a watch channel, so the public counter and the SSE stream update
//! without every client hitting the database. Stopping is explicit through
//! [`AvailabilityPoller::shutdown`], and dropping the poller cancels it too.

use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use super::availability::{AvailabilityService, AvailabilitySnapshot};

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(10);

pub struct AvailabilityPoller {
    receiver: watch::Receiver<AvailabilitySnapshot>,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl AvailabilityPoller {
    /// Take an initial snapshot and start refreshing every `period`
    pub async fn spawn(service: AvailabilityService, period: Duration) -> Self {
        let initial = service.snapshot().await;
        let (sender, receiver) = watch::channel(initial);
        let cancel = CancellationToken::new();

        let task_cancel = cancel.clone();
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // First tick completes immediately; the initial snapshot covers it
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = task_cancel.cancelled() => break,
                    snapshot = async {
                        interval.tick().await;
                        service.snapshot().await
                    } => {
                        debug!(status = ?snapshot.status(), "Availability refreshed");
                        sender.send_replace(snapshot);
                    }
                }
            }

            debug!("Availability poller stopped");
        });

        info!(interval_ms = period.as_millis() as u64, "Availability poller started");

        Self {
            receiver,
            cancel,
            handle: Some(handle),
        }
    }

    /// Receiver that observes every refresh
    pub fn subscribe(&self) -> watch::Receiver<AvailabilitySnapshot> {
        self.receiver.clone()
    }

    /// Most recently published snapshot
    pub fn latest(&self) -> AvailabilitySnapshot {
        self.receiver.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Stop refreshing and wait for the task to finish
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
        info!("Availability poller shut down");
    }
}

impl Drop for AvailabilityPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
