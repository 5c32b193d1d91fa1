//! Task aggregate root and its derived lifecycle status.

use super::{
    CapturePurpose, ImageRef, NotificationKind, OwnerId, ParseTaskStatusError,
    PlannedNotification, Proof, ProofCorrection, TaskDomainError, TaskId, TaskMetadata,
    is_completion_late, is_start_late,
};
use chrono::{DateTime, Duration, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many photos a task needs before it counts as done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionStyle {
    /// One photo at or after the due time.
    #[default]
    SinglePhoto,
    /// A "before" photo around the start time and an "after" photo by the
    /// due time.
    TwoPhoto,
}

impl CompletionStyle {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SinglePhoto => "single_photo",
            Self::TwoPhoto => "two_photo",
        }
    }
}

impl fmt::Display for CompletionStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task lifecycle status, derived from the stored proofs and missed legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Single-photo task waiting for its photo.
    Pending,
    /// Two-photo task waiting for its start photo.
    AwaitingStart,
    /// Two-photo task with a start photo, waiting for its completion photo.
    InProgress,
    /// Every required photo is present.
    Completed,
    /// A required photo window closed without a photo.
    Missed,
}

impl TaskStatus {
    /// Returns the canonical string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::AwaitingStart => "awaiting_start",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Missed => "missed",
        }
    }

    /// Returns whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Missed)
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "awaiting_start" => Ok(Self::AwaitingStart),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            "missed" => Ok(Self::Missed),
            _ => Err(ParseTaskStatusError(value.to_owned())),
        }
    }
}

/// Validated inputs for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    /// Display title.
    pub title: String,
    /// Owner of the task.
    pub owner_id: OwnerId,
    /// When the single or completion photo is expected.
    pub due_time: DateTime<Utc>,
    /// When the start photo is expected (two-photo only).
    pub start_time: Option<DateTime<Utc>>,
    /// Number of photos required.
    pub completion_style: CompletionStyle,
    /// Descriptive metadata.
    pub metadata: TaskMetadata,
}

/// A proof committed by [`Task::record_proof`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedProof {
    /// The committed proof.
    pub proof: Proof,
    /// The start proof it replaced, when this was a correction.
    pub replaced: Option<Proof>,
}

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    owner_id: OwnerId,
    title: String,
    due_time: DateTime<Utc>,
    start_time: Option<DateTime<Utc>>,
    completion_style: CompletionStyle,
    metadata: TaskMetadata,
    start_proof: Option<Proof>,
    completion_proof: Option<Proof>,
    start_missed: bool,
    completion_missed: bool,
    corrections: Vec<ProofCorrection>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for a blank title,
    /// [`TaskDomainError::StartTimeRequiresTwoPhoto`] when a single-photo
    /// task is given a start time, and [`TaskDomainError::StartAfterDue`]
    /// when a two-photo task starts after it is due.
    pub fn new(draft: TaskDraft, clock: &impl Clock) -> Result<Self, TaskDomainError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if let Some(start) = draft.start_time {
            if draft.completion_style == CompletionStyle::SinglePhoto {
                return Err(TaskDomainError::StartTimeRequiresTwoPhoto);
            }
            if start > draft.due_time {
                return Err(TaskDomainError::StartAfterDue {
                    start,
                    due: draft.due_time,
                });
            }
        }

        let timestamp = clock.utc();
        Ok(Self {
            id: TaskId::new(),
            owner_id: draft.owner_id,
            title: title.to_owned(),
            due_time: draft.due_time,
            start_time: draft.start_time,
            completion_style: draft.completion_style,
            metadata: draft.metadata,
            start_proof: None,
            completion_proof: None,
            start_missed: false,
            completion_missed: false,
            corrections: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owner.
    #[must_use]
    pub const fn owner_id(&self) -> &OwnerId {
        &self.owner_id
    }

    /// Returns the display title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns when the single or completion photo is expected.
    #[must_use]
    pub const fn due_time(&self) -> DateTime<Utc> {
        self.due_time
    }

    /// Returns when the start photo is expected, if set.
    #[must_use]
    pub const fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Returns the completion style.
    #[must_use]
    pub const fn completion_style(&self) -> CompletionStyle {
        self.completion_style
    }

    /// Returns descriptive metadata.
    #[must_use]
    pub const fn metadata(&self) -> &TaskMetadata {
        &self.metadata
    }

    /// Returns the start proof, if uploaded.
    #[must_use]
    pub const fn start_proof(&self) -> Option<&Proof> {
        self.start_proof.as_ref()
    }

    /// Returns the completion proof (the single proof for single-photo
    /// tasks), if uploaded.
    #[must_use]
    pub const fn completion_proof(&self) -> Option<&Proof> {
        self.completion_proof.as_ref()
    }

    /// Returns whether the given leg's capture window closed without a photo.
    #[must_use]
    pub const fn is_leg_missed(&self, purpose: CapturePurpose) -> bool {
        match purpose {
            CapturePurpose::StartProof => self.start_missed,
            CapturePurpose::CompletionProof => self.completion_missed,
        }
    }

    /// Returns the audit trail of replaced start proofs, oldest first.
    #[must_use]
    pub fn corrections(&self) -> &[ProofCorrection] {
        &self.corrections
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest mutation timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Derives the lifecycle status from stored proofs and missed legs.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.completion_proof.is_some() {
            return TaskStatus::Completed;
        }
        match self.completion_style {
            CompletionStyle::SinglePhoto => {
                if self.completion_missed {
                    TaskStatus::Missed
                } else {
                    TaskStatus::Pending
                }
            }
            CompletionStyle::TwoPhoto => {
                let start_present = self.start_proof.is_some();
                if self.completion_missed || (self.start_missed && !start_present) {
                    TaskStatus::Missed
                } else if start_present {
                    TaskStatus::InProgress
                } else {
                    TaskStatus::AwaitingStart
                }
            }
        }
    }

    /// Returns whether the task is completed or missed.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        self.status().is_terminal()
    }

    /// Returns the leg the next capture should target, or `None` for
    /// terminal tasks.
    #[must_use]
    pub const fn next_capture_purpose(&self) -> Option<CapturePurpose> {
        if self.is_terminal() {
            return None;
        }
        match self.completion_style {
            CompletionStyle::TwoPhoto if self.start_proof.is_none() => {
                Some(CapturePurpose::StartProof)
            }
            _ => Some(CapturePurpose::CompletionProof),
        }
    }

    /// Checks that a capture for `purpose` may begin.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::TaskTerminal`] for completed or missed
    /// tasks, [`TaskDomainError::PurposeNotApplicable`] for a start capture
    /// on a single-photo task, and [`TaskDomainError::StartProofRequired`]
    /// for a completion capture on a two-photo task without a start proof.
    pub const fn ensure_capture_allowed(
        &self,
        purpose: CapturePurpose,
    ) -> Result<(), TaskDomainError> {
        let status = self.status();
        if status.is_terminal() {
            return Err(TaskDomainError::TaskTerminal {
                task_id: self.id,
                status,
            });
        }
        match (self.completion_style, purpose) {
            (CompletionStyle::SinglePhoto, CapturePurpose::StartProof) => {
                Err(TaskDomainError::PurposeNotApplicable {
                    task_id: self.id,
                    purpose,
                    style: self.completion_style,
                })
            }
            (CompletionStyle::TwoPhoto, CapturePurpose::CompletionProof)
                if self.start_proof.is_none() =>
            {
                Err(TaskDomainError::StartProofRequired(self.id))
            }
            _ => Ok(()),
        }
    }

    /// Commits a photo for `purpose`, computing its lateness.
    ///
    /// A start proof on a task that already has one replaces it and records a
    /// [`ProofCorrection`].
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Task::ensure_capture_allowed`].
    pub fn record_proof(
        &mut self,
        purpose: CapturePurpose,
        image: ImageRef,
        start_grace: Duration,
        clock: &impl Clock,
    ) -> Result<RecordedProof, TaskDomainError> {
        self.ensure_capture_allowed(purpose)?;
        let captured_at = clock.utc();

        let recorded = match purpose {
            CapturePurpose::StartProof => {
                let late = is_start_late(self.start_time, captured_at, start_grace);
                let proof = Proof::new(image, captured_at, late);
                let replaced = self.start_proof.replace(proof.clone());
                if let Some(previous) = &replaced {
                    self.corrections
                        .push(ProofCorrection::new(previous.clone(), captured_at));
                }
                self.start_missed = false;
                RecordedProof { proof, replaced }
            }
            CapturePurpose::CompletionProof => {
                let late = is_completion_late(self.due_time, captured_at);
                let proof = Proof::new(image, captured_at, late);
                self.completion_proof = Some(proof.clone());
                self.completion_missed = false;
                RecordedProof {
                    proof,
                    replaced: None,
                }
            }
        };

        self.updated_at = captured_at;
        Ok(recorded)
    }

    /// Marks a leg as missed when its proof is still absent.
    ///
    /// Returns `true` when the leg changed. Legs that already carry a proof
    /// are left untouched.
    pub fn mark_leg_missed(&mut self, purpose: CapturePurpose, clock: &impl Clock) -> bool {
        let (proof_present, missed) = match purpose {
            CapturePurpose::StartProof => (self.start_proof.is_some(), &mut self.start_missed),
            CapturePurpose::CompletionProof => {
                (self.completion_proof.is_some(), &mut self.completion_missed)
            }
        };
        if proof_present || *missed {
            return false;
        }
        *missed = true;
        self.updated_at = clock.utc();
        true
    }

    /// Returns the reminders still relevant for the task's current status.
    #[must_use]
    pub fn planned_notifications(&self) -> Vec<PlannedNotification> {
        let remind =
            |fire_at, kind| PlannedNotification::for_task(self.id, &self.title, fire_at, kind);
        match (self.status(), self.completion_style) {
            (TaskStatus::Completed | TaskStatus::Missed, _) => Vec::new(),
            (_, CompletionStyle::SinglePhoto) => {
                vec![remind(self.due_time, NotificationKind::DuePrompt)]
            }
            (TaskStatus::AwaitingStart, CompletionStyle::TwoPhoto) => self
                .start_time
                .map(|start| remind(start, NotificationKind::StartPrompt))
                .into_iter()
                .chain(std::iter::once(remind(
                    self.due_time,
                    NotificationKind::CompletionPrompt,
                )))
                .collect(),
            (_, CompletionStyle::TwoPhoto) => {
                vec![remind(self.due_time, NotificationKind::CompletionPrompt)]
            }
        }
    }
}
