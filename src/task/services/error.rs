//! Service-level errors for the task lifecycle engine.

use crate::task::{
    domain::{CaptureSessionId, TaskDomainError, TaskId},
    ports::{CalendarSourceError, ImageCapturePortError, TaskRepositoryError},
};
use thiserror::Error;

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// Domain validation or a state rule failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// No task exists with the given identifier.
    #[error("task {0} not found")]
    NotFound(TaskId),
    /// No capture session with the given identifier was ever opened.
    #[error("capture session {0} not found")]
    SessionNotFound(CaptureSessionId),
    /// The capture session was already resolved, expired, or superseded.
    #[error("capture session {0} is already closed")]
    SessionClosed(CaptureSessionId),
    /// The host could not present a capture UI.
    #[error("image capture unavailable: {0}")]
    CaptureUnavailable(#[source] ImageCapturePortError),
    /// Fetching calendar events failed.
    #[error(transparent)]
    Calendar(#[from] CalendarSourceError),
}

/// Coarse classification of [`TaskLifecycleError`] for callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad input to a create operation.
    Validation,
    /// Unknown task or session identifier.
    NotFound,
    /// Operation not legal in the current state.
    InvalidState,
    /// Camera or library could not be presented.
    CaptureUnavailable,
    /// Adapter or storage failure.
    Infrastructure,
}

impl TaskLifecycleError {
    /// Classifies the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Domain(err) if err.is_validation() => ErrorKind::Validation,
            Self::Domain(_) | Self::SessionClosed(_) => ErrorKind::InvalidState,
            Self::NotFound(_)
            | Self::SessionNotFound(_)
            | Self::Repository(TaskRepositoryError::NotFound(_)) => ErrorKind::NotFound,
            Self::CaptureUnavailable(_) => ErrorKind::CaptureUnavailable,
            Self::Repository(_) | Self::Calendar(_) => ErrorKind::Infrastructure,
        }
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;
