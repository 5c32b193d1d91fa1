//! Port contracts for the task lifecycle engine.
//!
//! Ports define infrastructure-agnostic interfaces for storage, reminders,
//! photo capture, the social feed, and calendar import.

pub mod calendar;
pub mod capture;
pub mod feed;
pub mod notification;
pub mod repository;

pub use calendar::{CalendarEvent, CalendarSource, CalendarSourceError, CalendarSourceResult};
pub use capture::{CaptureRequest, ImageCapturePort, ImageCapturePortError, ImageCaptureResult};
pub use feed::{CompletionLegPost, FeedSink, FeedSinkError, FeedSinkResult, StartLegPost};
pub use notification::{NotificationError, NotificationResult, NotificationScheduler};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};

#[cfg(test)]
pub use capture::MockImageCapturePort;
