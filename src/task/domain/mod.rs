//! Domain model for photo-proof task tracking.
//!
//! Tasks carry one or two photo legs. Their status is derived from which
//! proofs are present and which capture windows closed empty, so it can never
//! drift from the stored data.

mod capture;
mod error;
mod ids;
mod metadata;
mod notification;
mod proof;
mod task;

pub use capture::{CapturePurpose, CaptureSession, CaptureSource, CountdownStatus};
pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{CaptureSessionId, ImageRef, OwnerId, TaskId};
pub use metadata::{Priority, TaskCategory, TaskMetadata};
pub use notification::{NotificationKind, PlannedNotification};
pub use proof::{DEFAULT_START_GRACE, Proof, ProofCorrection, is_completion_late, is_start_late};
pub use task::{CompletionStyle, RecordedProof, Task, TaskDraft, TaskStatus};
