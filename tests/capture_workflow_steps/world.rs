//! Shared world state for capture workflow BDD scenarios.

use std::sync::Arc;

use alldun::feed::InMemoryFeedStore;
use alldun::task::{
    adapters::{
        ManualClock,
        memory::{InMemoryImageCapture, InMemoryNotificationScheduler, InMemoryTaskRepository},
    },
    domain::{CaptureSession, OwnerId, Task},
    services::{CaptureResolution, ImportSummary, TaskLifecycleEngine, TaskLifecycleError},
};
use chrono::{DateTime, TimeZone, Utc};
use mockable::Clock;
use rstest::fixture;

/// Engine type used by the BDD world.
pub type TestEngine = TaskLifecycleEngine<
    InMemoryTaskRepository,
    InMemoryNotificationScheduler,
    InMemoryImageCapture,
    InMemoryFeedStore,
    ManualClock,
>;

/// Owner every scenario task belongs to.
pub const SCENARIO_OWNER: &str = "scenario-owner";

/// Scenario world for capture workflow behaviour tests.
pub struct CaptureWorld {
    pub engine: TestEngine,
    pub clock: ManualClock,
    pub owner: OwnerId,
    pub last_task: Option<Task>,
    pub last_capture: Option<Result<CaptureSession, TaskLifecycleError>>,
    pub last_resolution: Option<CaptureResolution>,
    pub last_import: Option<ImportSummary>,
}

impl CaptureWorld {
    /// Creates a world whose clock starts at 06:00 UTC.
    ///
    /// # Panics
    ///
    /// Panics if the fixed start time or owner are invalid.
    #[must_use]
    pub fn new() -> Self {
        let start = Utc
            .with_ymd_and_hms(2026, 4, 1, 6, 0, 0)
            .single()
            .expect("valid scenario start");
        let clock = ManualClock::new(start);
        let engine = TaskLifecycleEngine::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryNotificationScheduler::new()),
            Arc::new(InMemoryImageCapture::new()),
            Arc::new(InMemoryFeedStore::new()),
            Arc::new(clock.clone()),
        );

        Self {
            engine,
            clock,
            owner: OwnerId::new(SCENARIO_OWNER).expect("valid scenario owner"),
            last_task: None,
            last_capture: None,
            last_resolution: None,
            last_import: None,
        }
    }

    /// Returns the scenario's current time.
    #[must_use]
    pub fn clock_now(&self) -> DateTime<Utc> {
        self.clock.utc()
    }

    /// Returns the task created by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no task was created yet.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.last_task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing created task in scenario world"))
    }
}

impl Default for CaptureWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> CaptureWorld {
    CaptureWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
