//! Tokio driver for capture countdowns.

use crate::task::{
    ports::{FeedSink, ImageCapturePort, NotificationScheduler, TaskRepository},
    services::{CountdownTick, TaskLifecycleEngine},
};
use mockable::Clock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

/// Background task that calls
/// [`TaskLifecycleEngine::on_countdown_tick`] once per configured tick
/// period.
///
/// Dropping the ticker stops it.
#[derive(Debug)]
pub struct CountdownTicker {
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Spawns the ticker on the current tokio runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    #[must_use]
    pub fn spawn<R, N, P, F, C>(engine: Arc<TaskLifecycleEngine<R, N, P, F, C>>) -> Self
    where
        R: TaskRepository + 'static,
        N: NotificationScheduler + 'static,
        P: ImageCapturePort + 'static,
        F: FeedSink + 'static,
        C: Clock + Send + Sync + 'static,
    {
        let period = engine.config().tick_period.max(Duration::from_millis(1));
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick completes immediately.
            interval.tick().await;
            loop {
                interval.tick().await;
                match engine.on_countdown_tick().await {
                    Ok(CountdownTick::Expired(resolution)) => {
                        info!(
                            session_id = %resolution.session.id(),
                            task_id = %resolution.task.id(),
                            "countdown expired capture session"
                        );
                    }
                    Ok(CountdownTick::Idle | CountdownTick::Running { .. }) => {}
                    Err(err) => warn!(error = %err, "countdown tick failed"),
                }
            }
        });
        Self { handle }
    }

    /// Stops the ticker.
    pub fn stop(&self) {
        self.handle.abort();
    }

    /// Returns whether the ticker task is still running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        !self.handle.is_finished()
    }
}

impl Drop for CountdownTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
