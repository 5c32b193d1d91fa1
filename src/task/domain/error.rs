//! Error types for task domain validation, state rules, and parsing.

use super::{CapturePurpose, CompletionStyle, TaskId, TaskStatus};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned while constructing or mutating domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The owner identifier is blank or malformed.
    #[error("invalid owner identifier '{0}'")]
    InvalidOwner(String),

    /// A two-photo task starts after it is due.
    #[error("start time {start} is after due time {due}")]
    StartAfterDue {
        /// Requested start time.
        start: DateTime<Utc>,
        /// Requested due time.
        due: DateTime<Utc>,
    },

    /// Only two-photo tasks carry a start time.
    #[error("a start time is only valid for two-photo tasks")]
    StartTimeRequiresTwoPhoto,

    /// The task is completed or missed and accepts no further captures.
    #[error("task {task_id} is {status} and cannot change")]
    TaskTerminal {
        /// Task identifier.
        task_id: TaskId,
        /// Terminal status the task is in.
        status: TaskStatus,
    },

    /// The completion photo of a two-photo task needs the start photo first.
    #[error("task {0} needs a start proof before its completion proof")]
    StartProofRequired(TaskId),

    /// The capture purpose does not exist for the task's completion style.
    #[error("{purpose} does not apply to {style} task {task_id}")]
    PurposeNotApplicable {
        /// Task identifier.
        task_id: TaskId,
        /// Requested purpose.
        purpose: CapturePurpose,
        /// Completion style of the task.
        style: CompletionStyle,
    },
}

impl TaskDomainError {
    /// Returns `true` for errors caused by bad input rather than task state.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::EmptyTitle
                | Self::InvalidOwner(_)
                | Self::StartAfterDue { .. }
                | Self::StartTimeRequiresTwoPhoto
        )
    }
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
