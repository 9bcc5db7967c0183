//! Refresh schedule
//!
//! Refreshes the feed once right away and then on a fixed period, from a
//! single background task. Each refresh finishes before the next tick is
//! awaited, so cycles never overlap.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::app::leaderboard_feed::LeaderboardFeed;

/// Handle to the recurring refresh task. Dropping it stops the task.
pub struct RefreshSchedule {
    task_handle: Option<JoinHandle<()>>,
}

impl RefreshSchedule {
    /// Spawn the refresh loop on the current tokio runtime
    pub fn start(feed: Arc<LeaderboardFeed>, period: Duration) -> Self {
        let period = period.max(Duration::from_millis(1));

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            // A slow cycle pushes the next one back instead of firing a burst
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                feed.refresh().await;
            }
        });

        tracing::info!(period_secs = period.as_secs_f64(), "Leaderboard refresh schedule started");
        Self {
            task_handle: Some(handle),
        }
    }

    /// Stop the refresh loop. An in-flight refresh is abandoned; calling this twice is harmless.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            handle.abort();
            tracing::info!("Leaderboard refresh schedule cancelled");
        }
    }
}

impl Drop for RefreshSchedule {
    fn drop(&mut self) {
        self.cancel();
    }
}
