//! Notification port for task reminders.

use crate::task::domain::{PlannedNotification, TaskId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Host notification service.
///
/// When the user opens a delivered reminder the host calls
/// `TaskLifecycleEngine::handle_notification_opened` with the task and kind.
#[async_trait]
pub trait NotificationScheduler: Send + Sync {
    /// Schedules a reminder.
    async fn schedule(&self, notification: &PlannedNotification) -> NotificationResult<()>;

    /// Removes every pending reminder for the task, whatever its kind.
    async fn cancel(&self, task_id: TaskId) -> NotificationResult<()>;
}

/// Errors returned by notification adapters.
#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    /// The user has not authorised notifications.
    #[error("notifications are not authorised")]
    NotAuthorised,

    /// Generic scheduler failure.
    #[error("notification scheduler error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl NotificationError {
    /// Wraps a scheduler error.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
