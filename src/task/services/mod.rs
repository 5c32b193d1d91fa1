//! Application services for the task lifecycle.

mod config;
mod error;
mod events;
mod import;
mod lifecycle;

pub use config::EngineConfig;
pub use error::{ErrorKind, TaskLifecycleError, TaskLifecycleResult};
pub use events::{SessionCloseReason, TaskEvent};
pub use import::CalendarImportService;
pub use lifecycle::{
    CaptureResolution, CountdownTick, CreateTaskRequest, ImportSummary, LeaderboardEntry,
    RETIRED_SESSION_LIMIT, ResolutionOutcome, TaskLifecycleEngine, UNTITLED_EVENT,
};
