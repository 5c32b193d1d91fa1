//! Calendar source port for importing events as tasks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for calendar source operations.
pub type CalendarSourceResult<T> = Result<T, CalendarSourceError>;

/// A calendar event offered for import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title. Blank titles import as "Untitled Event".
    pub title: String,
    /// Event start, which becomes the task's due time.
    pub starts_at: DateTime<Utc>,
}

impl CalendarEvent {
    /// Creates an event.
    #[must_use]
    pub fn new(title: impl Into<String>, starts_at: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            starts_at,
        }
    }
}

/// External calendar.
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Returns events starting in `[from, until)`.
    async fn events_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> CalendarSourceResult<Vec<CalendarEvent>>;
}

/// Errors returned by calendar adapters.
#[derive(Debug, Clone, Error)]
pub enum CalendarSourceError {
    /// The user denied calendar access.
    #[error("calendar access denied")]
    AccessDenied,

    /// Calendar access is restricted on this device.
    #[error("calendar access restricted")]
    AccessRestricted,

    /// Fetching events failed.
    #[error("calendar fetch failed: {0}")]
    FetchFailed(Arc<dyn std::error::Error + Send + Sync>),
}

impl CalendarSourceError {
    /// Wraps a fetch error.
    pub fn fetch_failed(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::FetchFailed(Arc::new(err))
    }
}
