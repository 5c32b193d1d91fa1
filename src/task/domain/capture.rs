//! Capture sessions: the time-bounded window in which a photo is expected.

use super::{CaptureSessionId, TaskId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which leg of a task a capture is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapturePurpose {
    /// The "before" photo of a two-photo task.
    StartProof,
    /// The single photo, or the "after" photo of a two-photo task.
    CompletionProof,
}

impl CapturePurpose {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StartProof => "start_proof",
            Self::CompletionProof => "completion_proof",
        }
    }
}

impl fmt::Display for CapturePurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the capture UI should take the photo from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaptureSource {
    /// Live camera.
    Camera,
    /// Photo library.
    #[default]
    Library,
}

/// Result of advancing a countdown by one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStatus {
    /// Ticks left before the window closes.
    Running(u32),
    /// The window has closed.
    Elapsed,
}

/// A live capture window for one leg of one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureSession {
    id: CaptureSessionId,
    task_id: TaskId,
    purpose: CapturePurpose,
    source: CaptureSource,
    started_at: DateTime<Utc>,
    deadline: DateTime<Utc>,
    remaining_ticks: u32,
}

impl CaptureSession {
    /// Opens a session that lasts `window_ticks` ticks and closes at
    /// `deadline`.
    #[must_use]
    pub fn open(
        task_id: TaskId,
        purpose: CapturePurpose,
        source: CaptureSource,
        started_at: DateTime<Utc>,
        deadline: DateTime<Utc>,
        window_ticks: u32,
    ) -> Self {
        Self {
            id: CaptureSessionId::new(),
            task_id,
            purpose,
            source,
            started_at,
            deadline,
            remaining_ticks: window_ticks,
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> CaptureSessionId {
        self.id
    }

    /// Returns the target task.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the leg being captured.
    #[must_use]
    pub const fn purpose(&self) -> CapturePurpose {
        self.purpose
    }

    /// Returns the capture source that was presented.
    #[must_use]
    pub const fn source(&self) -> CaptureSource {
        self.source
    }

    /// Records the source actually presented after any fallback.
    pub(crate) const fn set_source(&mut self, source: CaptureSource) {
        self.source = source;
    }

    /// Returns when the session opened.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the wall-clock deadline of the window.
    #[must_use]
    pub const fn deadline(&self) -> DateTime<Utc> {
        self.deadline
    }

    /// Returns the number of ticks left.
    #[must_use]
    pub const fn remaining_ticks(&self) -> u32 {
        self.remaining_ticks
    }

    /// Decrements the countdown by one tick.
    pub const fn tick(&mut self) -> CountdownStatus {
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks == 0 {
            CountdownStatus::Elapsed
        } else {
            CountdownStatus::Running(self.remaining_ticks)
        }
    }
}
