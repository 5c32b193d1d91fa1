//! Feed posts and comments.

use crate::task::domain::{CompletionStyle, ImageRef, OwnerId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A photo shown on a feed post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostImage {
    /// Image reference.
    pub image: ImageRef,
    /// Capture time.
    pub captured_at: DateTime<Utc>,
    /// Whether the photo was late.
    pub late: bool,
}

/// A comment left on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    id: Uuid,
    author_id: OwnerId,
    text: String,
    created_at: DateTime<Utc>,
}

impl Comment {
    pub(crate) fn new(author_id: OwnerId, text: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            author_id,
            text,
            created_at,
        }
    }

    /// Returns the comment identifier.
    #[must_use]
    pub const fn id(&self) -> Uuid {
        self.id
    }

    /// Returns the author.
    #[must_use]
    pub const fn author_id(&self) -> &OwnerId {
        &self.author_id
    }

    /// Returns the comment text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns when the comment was left.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// One post per task, filled in leg by leg.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedPost {
    pub(crate) task_id: TaskId,
    pub(crate) owner_id: OwnerId,
    pub(crate) title: String,
    pub(crate) style: CompletionStyle,
    pub(crate) start_image: Option<PostImage>,
    pub(crate) completion_image: Option<PostImage>,
    pub(crate) liked: bool,
    pub(crate) comments: Vec<Comment>,
    pub(crate) created_at: DateTime<Utc>,
}

impl FeedPost {
    /// Returns the task the post belongs to.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the task owner.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the task title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the task completion style.
    #[must_use]
    pub const fn style(&self) -> CompletionStyle {
        self.style
    }

    /// Returns the first photo: the single photo or the start photo.
    #[must_use]
    pub const fn start_image(&self) -> Option<&PostImage> {
        self.start_image.as_ref()
    }

    /// Returns the completion photo of a two-photo task.
    #[must_use]
    pub const fn completion_image(&self) -> Option<&PostImage> {
        self.completion_image.as_ref()
    }

    /// Returns whether the viewer liked the post.
    #[must_use]
    pub const fn is_liked(&self) -> bool {
        self.liked
    }

    /// Returns comments, oldest first.
    #[must_use]
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    /// Returns when the post was created.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns whether a two-photo post still waits for its completion photo.
    #[must_use]
    pub const fn is_awaiting_completion_image(&self) -> bool {
        matches!(self.style, CompletionStyle::TwoPhoto)
            && self.start_image.is_some()
            && self.completion_image.is_none()
    }

    /// Returns whether any photo on the post was late.
    #[must_use]
    pub fn is_overall_late(&self) -> bool {
        [&self.start_image, &self.completion_image]
            .into_iter()
            .flatten()
            .any(|image| image.late)
    }
}
