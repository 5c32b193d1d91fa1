//! In-memory feed store.

use super::{Comment, FeedPost, PostImage};
use crate::task::{
    domain::{OwnerId, TaskId},
    ports::{CompletionLegPost, FeedSink, FeedSinkError, FeedSinkResult, StartLegPost},
};
use async_trait::async_trait;
use mockable::Clock;
use std::sync::{Arc, RwLock};
use thiserror::Error;
use tracing::debug;

/// Errors returned by feed interactions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeedError {
    /// No post exists for the task.
    #[error("no feed post for task {0}")]
    PostNotFound(TaskId),

    /// The comment text is blank.
    #[error("comment must not be empty")]
    EmptyComment,

    /// The store lock was poisoned.
    #[error("feed storage error: {0}")]
    Storage(String),
}

/// Feed held in memory, newest post first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedStore {
    posts: Arc<RwLock<Vec<FeedPost>>>,
}

impl InMemoryFeedStore {
    /// Creates an empty feed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every post, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Storage`] when lock acquisition fails.
    pub fn posts(&self) -> Result<Vec<FeedPost>, FeedError> {
        let posts = self
            .posts
            .read()
            .map_err(|err| FeedError::Storage(err.to_string()))?;
        Ok(posts.clone())
    }

    /// Returns the post for a task.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Storage`] when lock acquisition fails.
    pub fn post_for(&self, task_id: TaskId) -> Result<Option<FeedPost>, FeedError> {
        let posts = self
            .posts
            .read()
            .map_err(|err| FeedError::Storage(err.to_string()))?;
        Ok(posts.iter().find(|post| post.task_id == task_id).cloned())
    }

    /// Adds a comment to the task's post.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::EmptyComment`] for blank text and
    /// [`FeedError::PostNotFound`] when the task has no post.
    pub fn add_comment(
        &self,
        task_id: TaskId,
        author_id: OwnerId,
        text: &str,
        clock: &impl Clock,
    ) -> Result<Comment, FeedError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(FeedError::EmptyComment);
        }
        self.with_post(task_id, |post| {
            let comment = Comment::new(author_id, trimmed.to_owned(), clock.utc());
            post.comments.push(comment.clone());
            comment
        })
    }

    /// Flips the like flag on the task's post and returns the new value.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::PostNotFound`] when the task has no post.
    pub fn toggle_like(&self, task_id: TaskId) -> Result<bool, FeedError> {
        self.with_post(task_id, |post| {
            post.liked = !post.liked;
            post.liked
        })
    }

    fn with_post<T>(
        &self,
        task_id: TaskId,
        update: impl FnOnce(&mut FeedPost) -> T,
    ) -> Result<T, FeedError> {
        let mut posts = self
            .posts
            .write()
            .map_err(|err| FeedError::Storage(err.to_string()))?;
        posts
            .iter_mut()
            .find(|post| post.task_id == task_id)
            .map(update)
            .ok_or(FeedError::PostNotFound(task_id))
    }
}

#[async_trait]
impl FeedSink for InMemoryFeedStore {
    async fn record_start(&self, post: &StartLegPost) -> FeedSinkResult<()> {
        let mut posts = self
            .posts
            .write()
            .map_err(|err| FeedSinkError::runtime(std::io::Error::other(err.to_string())))?;
        let image = PostImage {
            image: post.image.clone(),
            captured_at: post.captured_at,
            late: post.late,
        };

        if let Some(existing) = posts.iter_mut().find(|p| p.task_id == post.task_id) {
            debug!(task_id = %post.task_id, "replacing start image on feed post");
            existing.start_image = Some(image);
            return Ok(());
        }

        posts.insert(
            0,
            FeedPost {
                task_id: post.task_id,
                owner_id: post.owner_id.clone(),
                title: post.title.clone(),
                style: post.style,
                start_image: Some(image),
                completion_image: None,
                liked: false,
                comments: Vec::new(),
                created_at: post.captured_at,
            },
        );
        Ok(())
    }

    async fn record_completion(&self, post: &CompletionLegPost) -> FeedSinkResult<()> {
        let mut posts = self
            .posts
            .write()
            .map_err(|err| FeedSinkError::runtime(std::io::Error::other(err.to_string())))?;
        let existing = posts
            .iter_mut()
            .find(|p| p.task_id == post.task_id)
            .ok_or(FeedSinkError::PostNotFound(post.task_id))?;
        existing.completion_image = Some(PostImage {
            image: post.image.clone(),
            captured_at: post.captured_at,
            late: post.late,
        });
        Ok(())
    }
}
