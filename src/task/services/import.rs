//! Calendar import orchestration.

use super::{ImportSummary, TaskLifecycleEngine, TaskLifecycleResult};
use crate::task::{
    domain::OwnerId,
    ports::{CalendarSource, FeedSink, ImageCapturePort, NotificationScheduler, TaskRepository},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;

/// Pulls upcoming events from a [`CalendarSource`] and imports them as tasks.
#[derive(Clone)]
pub struct CalendarImportService<S, C>
where
    S: CalendarSource,
    C: Clock + Send + Sync,
{
    source: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> CalendarImportService<S, C>
where
    S: CalendarSource,
    C: Clock + Send + Sync,
{
    /// Creates a new import service.
    #[must_use]
    pub const fn new(source: Arc<S>, clock: Arc<C>) -> Self {
        Self { source, clock }
    }

    /// Imports events starting within the engine's lookahead window.
    ///
    /// # Errors
    ///
    /// Returns [`super::TaskLifecycleError::Calendar`] when the calendar
    /// cannot be read, and engine errors from the import itself.
    pub async fn import_upcoming<R, N, P, F, EC>(
        &self,
        engine: &TaskLifecycleEngine<R, N, P, F, EC>,
        owner_id: &OwnerId,
    ) -> TaskLifecycleResult<ImportSummary>
    where
        R: TaskRepository,
        N: NotificationScheduler,
        P: ImageCapturePort,
        F: FeedSink,
        EC: Clock + Send + Sync,
    {
        let from = self.clock.utc();
        let until = from
            .checked_add_signed(engine.config().calendar_lookahead())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let events = self.source.events_between(from, until).await?;
        engine.import_calendar_events(owner_id, events).await
    }
}
