//! Feed sink port.
//!
//! Implementations must upsert by task: the first leg creates the post, the
//! second updates the same post.

use crate::task::domain::{CompletionStyle, ImageRef, OwnerId, TaskId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for feed sink operations.
pub type FeedSinkResult<T> = Result<T, FeedSinkError>;

/// First-leg photo: the single photo, or the start photo of a two-photo task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartLegPost {
    /// Task identity the post is keyed by.
    pub task_id: TaskId,
    /// Task owner.
    pub owner_id: OwnerId,
    /// Task title at capture time.
    pub title: String,
    /// Task completion style.
    pub style: CompletionStyle,
    /// Captured image.
    pub image: ImageRef,
    /// Capture time.
    pub captured_at: DateTime<Utc>,
    /// Whether the photo was late.
    pub late: bool,
}

/// Completion photo of a two-photo task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionLegPost {
    /// Task identity the post is keyed by.
    pub task_id: TaskId,
    /// Captured image.
    pub image: ImageRef,
    /// Capture time.
    pub captured_at: DateTime<Utc>,
    /// Whether the photo was late.
    pub late: bool,
}

/// Social feed the engine publishes proofs to.
#[async_trait]
pub trait FeedSink: Send + Sync {
    /// Creates the post for the task, or replaces its start image.
    async fn record_start(&self, post: &StartLegPost) -> FeedSinkResult<()>;

    /// Adds the completion image to the task's existing post.
    ///
    /// # Errors
    ///
    /// Returns [`FeedSinkError::PostNotFound`] when no post exists for the
    /// task.
    async fn record_completion(&self, post: &CompletionLegPost) -> FeedSinkResult<()>;
}

/// Errors returned by feed sink implementations.
#[derive(Debug, Clone, Error)]
pub enum FeedSinkError {
    /// No post exists for the task.
    #[error("no feed post for task {0}")]
    PostNotFound(TaskId),

    /// Generic feed failure.
    #[error("feed error: {0}")]
    Runtime(Arc<dyn std::error::Error + Send + Sync>),
}

impl FeedSinkError {
    /// Wraps a feed error.
    pub fn runtime(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Runtime(Arc::new(err))
    }
}
