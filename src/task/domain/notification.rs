//! Reminder prompts a task wants delivered.

use super::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of reminder delivered for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Time to take the start photo of a two-photo task.
    StartPrompt,
    /// A single-photo task is due.
    DuePrompt,
    /// Time to take the completion photo of a two-photo task.
    CompletionPrompt,
}

impl NotificationKind {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartPrompt => "start_prompt",
            Self::DuePrompt => "due_prompt",
            Self::CompletionPrompt => "completion_prompt",
        }
    }
}

/// A reminder to schedule with the host's notification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedNotification {
    /// Task the reminder is for.
    pub task_id: TaskId,
    /// When the reminder fires.
    pub fire_at: DateTime<Utc>,
    /// What the reminder asks for.
    pub kind: NotificationKind,
    /// Short headline.
    pub title: String,
    /// Body text.
    pub body: String,
}

impl PlannedNotification {
    /// Builds a reminder with the standard wording for its kind.
    #[must_use]
    pub fn for_task(
        task_id: TaskId,
        task_title: &str,
        fire_at: DateTime<Utc>,
        kind: NotificationKind,
    ) -> Self {
        let (title, body) = match kind {
            NotificationKind::StartPrompt => (
                "Time to start!",
                format!("Snap a photo to start your task: {task_title}"),
            ),
            NotificationKind::DuePrompt => (
                "Task Due!",
                format!("It's time to complete your task: {task_title}"),
            ),
            NotificationKind::CompletionPrompt => (
                "Finish up!",
                format!("Snap a photo to finish your task: {task_title}"),
            ),
        };
        Self {
            task_id,
            fire_at,
            kind,
            title: title.to_owned(),
            body,
        }
    }
}
