//! Fixed calendar source.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::task::ports::{CalendarEvent, CalendarSource, CalendarSourceError, CalendarSourceResult};

/// Calendar backed by a fixed list of events.
#[derive(Debug, Clone, Default)]
pub struct StaticCalendarSource {
    events: Vec<CalendarEvent>,
    access_denied: bool,
}

impl StaticCalendarSource {
    /// Creates a calendar holding `events`.
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = CalendarEvent>) -> Self {
        Self {
            events: events.into_iter().collect(),
            access_denied: false,
        }
    }

    /// Creates a calendar the user has not granted access to.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            events: Vec::new(),
            access_denied: true,
        }
    }
}

#[async_trait]
impl CalendarSource for StaticCalendarSource {
    async fn events_between(
        &self,
        from: DateTime<Utc>,
        until: DateTime<Utc>,
    ) -> CalendarSourceResult<Vec<CalendarEvent>> {
        if self.access_denied {
            return Err(CalendarSourceError::AccessDenied);
        }
        Ok(self
            .events
            .iter()
            .filter(|event| event.starts_at >= from && event.starts_at < until)
            .cloned()
            .collect())
    }
}
