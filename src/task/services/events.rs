//! Events broadcast to engine subscribers.

use crate::task::domain::{CapturePurpose, CaptureSessionId, OwnerId, TaskId, TaskStatus};

/// Why a capture session closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionCloseReason {
    /// A photo arrived.
    Captured,
    /// The user dismissed the capture UI.
    Cancelled,
    /// The countdown reached zero.
    Expired,
    /// A newer capture replaced it.
    Superseded,
    /// Its task was removed.
    TaskRemoved,
}

/// Change notifications published by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskEvent {
    /// A task was added.
    TaskCreated {
        /// New task.
        task_id: TaskId,
        /// Its owner.
        owner_id: OwnerId,
    },
    /// A task was removed.
    TaskRemoved {
        /// Removed task.
        task_id: TaskId,
    },
    /// A capture window opened.
    CaptureStarted {
        /// New session.
        session_id: CaptureSessionId,
        /// Target task.
        task_id: TaskId,
        /// Leg being captured.
        purpose: CapturePurpose,
    },
    /// A capture window closed.
    CaptureClosed {
        /// Closed session.
        session_id: CaptureSessionId,
        /// Target task.
        task_id: TaskId,
        /// Why it closed.
        reason: SessionCloseReason,
    },
    /// A photo was committed.
    ProofRecorded {
        /// Task the proof belongs to.
        task_id: TaskId,
        /// Leg the proof fills.
        purpose: CapturePurpose,
        /// Whether it was late.
        late: bool,
        /// Task status afterwards.
        status: TaskStatus,
    },
    /// An existing start proof was replaced.
    StartProofCorrected {
        /// Task whose start proof changed.
        task_id: TaskId,
    },
    /// A leg's window closed without a photo.
    LegMissed {
        /// Task the leg belongs to.
        task_id: TaskId,
        /// The missed leg.
        purpose: CapturePurpose,
        /// Task status afterwards.
        status: TaskStatus,
    },
}
