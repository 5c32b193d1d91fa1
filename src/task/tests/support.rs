//! Shared fixtures for engine tests.

use std::sync::Arc;

use crate::feed::InMemoryFeedStore;
use crate::task::{
    adapters::{
        ManualClock,
        memory::{InMemoryImageCapture, InMemoryNotificationScheduler, InMemoryTaskRepository},
    },
    domain::{CapturePurpose, CaptureSource, ImageRef, OwnerId, TaskId},
    services::{CaptureResolution, TaskLifecycleEngine, TaskLifecycleResult},
};
use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;

pub(super) type TestEngine = TaskLifecycleEngine<
    InMemoryTaskRepository,
    InMemoryNotificationScheduler,
    InMemoryImageCapture,
    InMemoryFeedStore,
    ManualClock,
>;

/// Engine wired to in-memory adapters, with handles kept for inspection.
pub(super) struct Harness {
    pub engine: TestEngine,
    pub clock: ManualClock,
    pub notifications: Arc<InMemoryNotificationScheduler>,
    pub capture: Arc<InMemoryImageCapture>,
    pub feed: Arc<InMemoryFeedStore>,
}

impl Harness {
    /// Opens a session for `purpose` and resolves it with `image`.
    pub async fn capture(
        &self,
        task_id: TaskId,
        purpose: CapturePurpose,
        image: Option<&str>,
    ) -> TaskLifecycleResult<CaptureResolution> {
        let session = self
            .engine
            .begin_capture(task_id, purpose, CaptureSource::Library)
            .await?;
        self.engine
            .resolve_capture(session.id(), image.map(ImageRef::new))
            .await
    }
}

/// Monday 2 March 2026, 09:00 UTC.
pub(super) fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid base timestamp")
}

#[fixture]
pub(super) fn clock() -> ManualClock {
    ManualClock::new(base_time())
}

#[fixture]
pub(super) fn owner() -> OwnerId {
    OwnerId::new("alice").expect("valid owner")
}

#[fixture]
pub(super) fn harness(clock: ManualClock) -> Harness {
    let notifications = Arc::new(InMemoryNotificationScheduler::new());
    let capture = Arc::new(InMemoryImageCapture::new());
    let feed = Arc::new(InMemoryFeedStore::new());
    let engine = TaskLifecycleEngine::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&notifications),
        Arc::clone(&capture),
        Arc::clone(&feed),
        Arc::new(clock.clone()),
    );
    Harness {
        engine,
        clock,
        notifications,
        capture,
        feed,
    }
}
