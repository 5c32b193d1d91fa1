//! In-memory notification scheduler.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{PlannedNotification, TaskId},
    ports::{NotificationError, NotificationResult, NotificationScheduler},
};

/// Records scheduled reminders instead of delivering them.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotificationScheduler {
    state: Arc<RwLock<NotificationState>>,
}

#[derive(Debug, Default)]
struct NotificationState {
    pending: HashMap<TaskId, Vec<PlannedNotification>>,
    authorised: Option<bool>,
}

impl InMemoryNotificationScheduler {
    /// Creates an empty scheduler that accepts every reminder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user revoking or granting notification permission.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Runtime`] when lock acquisition fails.
    pub fn set_authorised(&self, authorised: bool) -> NotificationResult<()> {
        let mut state = self.state.write().map_err(runtime_error)?;
        state.authorised = Some(authorised);
        Ok(())
    }

    /// Returns the pending reminders for a task, in scheduling order.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::Runtime`] when lock acquisition fails.
    pub fn pending_for(&self, task_id: TaskId) -> NotificationResult<Vec<PlannedNotification>> {
        let state = self.state.read().map_err(runtime_error)?;
        Ok(state.pending.get(&task_id).cloned().unwrap_or_default())
    }
}

fn runtime_error(err: impl ToString) -> NotificationError {
    NotificationError::runtime(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl NotificationScheduler for InMemoryNotificationScheduler {
    async fn schedule(&self, notification: &PlannedNotification) -> NotificationResult<()> {
        let mut state = self.state.write().map_err(runtime_error)?;
        if state.authorised == Some(false) {
            return Err(NotificationError::NotAuthorised);
        }
        state
            .pending
            .entry(notification.task_id)
            .or_default()
            .push(notification.clone());
        Ok(())
    }

    async fn cancel(&self, task_id: TaskId) -> NotificationResult<()> {
        let mut state = self.state.write().map_err(runtime_error)?;
        state.pending.remove(&task_id);
        Ok(())
    }
}
