//! Photo proofs and lateness rules.

use super::ImageRef;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default grace period after a start time before a start proof is late.
pub const DEFAULT_START_GRACE: Duration = Duration::hours(1);

/// A captured photo committed against one leg of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof {
    image: ImageRef,
    captured_at: DateTime<Utc>,
    late: bool,
}

impl Proof {
    /// Creates a proof record.
    #[must_use]
    pub const fn new(image: ImageRef, captured_at: DateTime<Utc>, late: bool) -> Self {
        Self {
            image,
            captured_at,
            late,
        }
    }

    /// Returns the image reference.
    #[must_use]
    pub const fn image(&self) -> &ImageRef {
        &self.image
    }

    /// Returns the capture timestamp.
    #[must_use]
    pub const fn captured_at(&self) -> DateTime<Utc> {
        self.captured_at
    }

    /// Returns whether the photo arrived after its deadline.
    #[must_use]
    pub const fn is_late(&self) -> bool {
        self.late
    }
}

/// Audit entry written when a start proof is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofCorrection {
    replaced: Proof,
    corrected_at: DateTime<Utc>,
}

impl ProofCorrection {
    /// Creates a correction entry.
    #[must_use]
    pub const fn new(replaced: Proof, corrected_at: DateTime<Utc>) -> Self {
        Self {
            replaced,
            corrected_at,
        }
    }

    /// Returns the proof that was overwritten.
    #[must_use]
    pub const fn replaced(&self) -> &Proof {
        &self.replaced
    }

    /// Returns when the correction happened.
    #[must_use]
    pub const fn corrected_at(&self) -> DateTime<Utc> {
        self.corrected_at
    }
}

/// Returns whether a start proof captured at `captured_at` is late.
///
/// A task without a start time never has a late start proof.
#[must_use]
pub fn is_start_late(
    start_time: Option<DateTime<Utc>>,
    captured_at: DateTime<Utc>,
    grace: Duration,
) -> bool {
    start_time.is_some_and(|start| {
        start
            .checked_add_signed(grace)
            .is_none_or(|limit| captured_at > limit)
    })
}

/// Returns whether a completion or single proof is late.
#[must_use]
pub fn is_completion_late(due_time: DateTime<Utc>, captured_at: DateTime<Utc>) -> bool {
    captured_at > due_time
}
