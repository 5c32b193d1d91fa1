//! Shared wiring for in-memory integration tests.

use std::sync::Arc;

use alldun::feed::InMemoryFeedStore;
use alldun::task::{
    adapters::{
        ManualClock,
        memory::{InMemoryImageCapture, InMemoryNotificationScheduler, InMemoryTaskRepository},
    },
    domain::{CapturePurpose, CaptureSource, ImageRef, TaskId},
    services::{CaptureResolution, TaskLifecycleEngine, TaskLifecycleResult},
};
use chrono::{DateTime, TimeZone, Utc};
use rstest::fixture;

/// Engine type wired to in-memory adapters.
pub type TestEngine = TaskLifecycleEngine<
    InMemoryTaskRepository,
    InMemoryNotificationScheduler,
    InMemoryImageCapture,
    InMemoryFeedStore,
    ManualClock,
>;

/// Engine plus the adapter handles tests inspect.
pub struct Setup {
    pub engine: TestEngine,
    pub clock: ManualClock,
    pub notifications: Arc<InMemoryNotificationScheduler>,
    pub feed: Arc<InMemoryFeedStore>,
}

impl Setup {
    /// Runs one capture leg through to resolution.
    pub async fn capture(
        &self,
        task_id: TaskId,
        purpose: CapturePurpose,
        image: Option<&str>,
    ) -> TaskLifecycleResult<CaptureResolution> {
        let session = self
            .engine
            .begin_capture(task_id, purpose, CaptureSource::Camera)
            .await?;
        self.engine
            .resolve_capture(session.id(), image.map(ImageRef::new))
            .await
    }
}

/// Sunday 15 March 2026, 08:00 UTC.
#[must_use]
pub fn start_of_day() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 15, 8, 0, 0)
        .single()
        .expect("valid timestamp")
}

/// Fixture that wires a fresh engine.
#[fixture]
pub fn setup() -> Setup {
    let clock = ManualClock::new(start_of_day());
    let notifications = Arc::new(InMemoryNotificationScheduler::new());
    let feed = Arc::new(InMemoryFeedStore::new());
    let engine = TaskLifecycleEngine::new(
        Arc::new(InMemoryTaskRepository::new()),
        Arc::clone(&notifications),
        Arc::new(InMemoryImageCapture::new()),
        Arc::clone(&feed),
        Arc::new(clock.clone()),
    );
    Setup {
        engine,
        clock,
        notifications,
        feed,
    }
}
