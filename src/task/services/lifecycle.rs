//! Task lifecycle engine: task collection, capture sessions, and countdowns.

use super::{
    EngineConfig, SessionCloseReason, TaskEvent, TaskLifecycleError, TaskLifecycleResult,
};
use crate::task::{
    domain::{
        CapturePurpose, CaptureSession, CaptureSessionId, CaptureSource, CompletionStyle,
        CountdownStatus, ImageRef, NotificationKind, OwnerId, Proof, Task, TaskDraft, TaskId,
        TaskMetadata, TaskStatus,
    },
    ports::{
        CalendarEvent, CaptureRequest, CompletionLegPost, FeedSink, ImageCapturePort,
        ImageCapturePortError, NotificationScheduler, StartLegPost, TaskRepository,
        TaskRepositoryError,
    },
};
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use mockable::Clock;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tokio::sync::{Mutex, broadcast};
use tracing::{debug, info, warn};

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    owner_id: String,
    title: String,
    due_time: DateTime<Utc>,
    start_time: Option<DateTime<Utc>>,
    completion_style: CompletionStyle,
    metadata: TaskMetadata,
}

impl CreateTaskRequest {
    /// Creates a single-photo task request with required fields.
    #[must_use]
    pub fn new(
        owner_id: impl Into<String>,
        title: impl Into<String>,
        due_time: DateTime<Utc>,
    ) -> Self {
        Self {
            owner_id: owner_id.into(),
            title: title.into(),
            due_time,
            start_time: None,
            completion_style: CompletionStyle::SinglePhoto,
            metadata: TaskMetadata::default(),
        }
    }

    /// Turns the request into a two-photo task with an optional start time.
    #[must_use]
    pub const fn two_photo(mut self, start_time: Option<DateTime<Utc>>) -> Self {
        self.completion_style = CompletionStyle::TwoPhoto;
        self.start_time = start_time;
        self
    }

    /// Sets the start time without changing the completion style.
    #[must_use]
    pub const fn with_start_time(mut self, start_time: DateTime<Utc>) -> Self {
        self.start_time = Some(start_time);
        self
    }

    /// Sets descriptive metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: TaskMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}

/// What resolving a capture session did to its task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// A photo was committed.
    ProofRecorded {
        /// The committed proof.
        proof: Proof,
        /// Whether it replaced an earlier start proof.
        corrected: bool,
    },
    /// The leg was marked missed.
    LegMissed,
    /// Nothing changed; the leg already had a proof or was already missed.
    Unchanged,
}

/// Result of closing a capture session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResolution {
    /// The closed session.
    pub session: CaptureSession,
    /// The task after resolution.
    pub task: Task,
    /// What happened to the task.
    pub outcome: ResolutionOutcome,
}

/// Result of one countdown tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountdownTick {
    /// No capture session is active.
    Idle,
    /// The active session still has time.
    Running {
        /// Active session.
        session_id: CaptureSessionId,
        /// Ticks left.
        remaining: u32,
    },
    /// The active session ran out and was resolved without a photo.
    Expired(Box<CaptureResolution>),
}

/// Completed-task count for one owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    /// The owner.
    pub owner_id: OwnerId,
    /// Number of completed tasks.
    pub completed_tasks: usize,
}

/// Outcome of importing calendar events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportSummary {
    /// Tasks created by the import.
    pub imported: Vec<Task>,
    /// Events skipped as duplicates.
    pub skipped: usize,
}

/// Title given to calendar events without one.
pub const UNTITLED_EVENT: &str = "Untitled Event";

/// Number of closed session ids remembered for [`TaskLifecycleError::SessionClosed`].
///
/// Older ids are forgotten and then report
/// [`TaskLifecycleError::SessionNotFound`].
pub const RETIRED_SESSION_LIMIT: usize = 1024;

/// Closed session ids, oldest first, capped at a fixed size.
#[derive(Debug)]
struct RetiredSessions {
    limit: usize,
    order: VecDeque<CaptureSessionId>,
    ids: HashSet<CaptureSessionId>,
}

impl RetiredSessions {
    fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            order: VecDeque::new(),
            ids: HashSet::new(),
        }
    }

    fn insert(&mut self, session_id: CaptureSessionId) {
        if !self.ids.insert(session_id) {
            return;
        }
        self.order.push_back(session_id);
        while self.order.len() > self.limit {
            if let Some(oldest) = self.order.pop_front() {
                self.ids.remove(&oldest);
            }
        }
    }

    fn contains(&self, session_id: &CaptureSessionId) -> bool {
        self.ids.contains(session_id)
    }
}

impl Default for RetiredSessions {
    fn default() -> Self {
        Self::with_limit(RETIRED_SESSION_LIMIT)
    }
}

#[derive(Debug, Default)]
struct SessionState {
    active: Option<CaptureSession>,
    retired: RetiredSessions,
}

/// Task lifecycle engine.
///
/// Owns the task collection through a [`TaskRepository`], runs at most one
/// [`CaptureSession`] at a time, and publishes committed proofs to a
/// [`FeedSink`]. Every mutation is serialised behind one async mutex, so the
/// engine can be shared across tasks of a multi-threaded runtime.
pub struct TaskLifecycleEngine<R, N, P, F, C>
where
    R: TaskRepository,
    N: NotificationScheduler,
    P: ImageCapturePort,
    F: FeedSink,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    notifications: Arc<N>,
    capture: Arc<P>,
    feed: Arc<F>,
    clock: Arc<C>,
    config: EngineConfig,
    sessions: Mutex<SessionState>,
    events: broadcast::Sender<TaskEvent>,
}

impl<R, N, P, F, C> TaskLifecycleEngine<R, N, P, F, C>
where
    R: TaskRepository,
    N: NotificationScheduler,
    P: ImageCapturePort,
    F: FeedSink,
    C: Clock + Send + Sync,
{
    /// Creates an engine with the default configuration.
    #[must_use]
    pub fn new(
        repository: Arc<R>,
        notifications: Arc<N>,
        capture: Arc<P>,
        feed: Arc<F>,
        clock: Arc<C>,
    ) -> Self {
        let config = EngineConfig::default();
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        Self {
            repository,
            notifications,
            capture,
            feed,
            clock,
            config,
            sessions: Mutex::new(SessionState::default()),
            events,
        }
    }

    /// Replaces the configuration.
    #[must_use]
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        let (events, _) = broadcast::channel(config.event_capacity.max(1));
        self.events = events;
        self.config = config;
        self
    }

    /// Returns the active configuration.
    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Subscribes to task events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<TaskEvent> {
        self.events.subscribe()
    }

    /// Creates a task and schedules its reminders.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Domain`] when the title is blank, the
    /// owner is invalid, or the start time is after the due time; or a
    /// repository error when storage fails.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let draft = TaskDraft {
            title: request.title,
            owner_id: OwnerId::new(request.owner_id)?,
            due_time: request.due_time,
            start_time: request.start_time,
            completion_style: request.completion_style,
            metadata: request.metadata,
        };
        let task = Task::new(draft, &*self.clock)?;

        let _serialised = self.sessions.lock().await;
        self.insert_task(task).await
    }

    /// Returns a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when lookup fails.
    pub async fn find_task(&self, task_id: TaskId) -> TaskLifecycleResult<Option<Task>> {
        Ok(self.repository.find_by_id(task_id).await?)
    }

    /// Removes a task, cancels its reminders, and retires any capture session
    /// targeting it without marking a leg missed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist.
    pub async fn remove_task(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        let mut sessions = self.sessions.lock().await;
        let task = self
            .repository
            .remove(task_id)
            .await
            .map_err(|err| match err {
                TaskRepositoryError::NotFound(id) => TaskLifecycleError::NotFound(id),
                other => other.into(),
            })?;

        if let Some(session) = sessions
            .active
            .take_if(|active| active.task_id() == task_id)
        {
            self.retire_session(&mut sessions, &session, SessionCloseReason::TaskRemoved);
        }

        if let Err(err) = self.notifications.cancel(task_id).await {
            warn!(task_id = %task_id, error = %err, "failed to cancel reminders");
        }
        info!(task_id = %task_id, "task removed");
        self.publish(TaskEvent::TaskRemoved { task_id });
        Ok(task)
    }

    /// Returns the active capture session, if any.
    pub async fn active_session(&self) -> Option<CaptureSession> {
        self.sessions.lock().await.active.clone()
    }

    /// Opens a capture session for one leg of a task and presents the
    /// capture UI.
    ///
    /// An already active session is superseded only once the new capture
    /// has been validated and presented. A session on another task is
    /// resolved without a photo, so its leg is marked missed. A session on
    /// the same task is retired without touching the task, since the user is
    /// retrying that task's capture.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] for an unknown task,
    /// [`TaskLifecycleError::Domain`] when the task is terminal or the leg is
    /// not capturable yet, and [`TaskLifecycleError::CaptureUnavailable`]
    /// when the host cannot present a capture UI. On any of these the active
    /// session and its task are left as they were.
    pub async fn begin_capture(
        &self,
        task_id: TaskId,
        purpose: CapturePurpose,
        source: CaptureSource,
    ) -> TaskLifecycleResult<CaptureSession> {
        let mut sessions = self.sessions.lock().await;
        let task = self.find_task_or_error(task_id).await?;
        task.ensure_capture_allowed(purpose)?;

        let now = self.clock.utc();
        let deadline = now
            .checked_add_signed(self.config.capture_window())
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
        let mut session = CaptureSession::open(
            task_id,
            purpose,
            source,
            now,
            deadline,
            self.config.capture_window_ticks,
        );

        match self.present_with_fallback(&session).await {
            Ok(presented) => session.set_source(presented),
            Err(err) => {
                sessions.retired.insert(session.id());
                warn!(task_id = %task_id, error = %err, "capture UI unavailable");
                return Err(err);
            }
        }

        if let Some(previous) = sessions.active.take() {
            debug!(session_id = %previous.id(), "superseding active capture session");
            let superseded = if previous.task_id() == task_id {
                self.retire_session(&mut sessions, &previous, SessionCloseReason::Superseded);
                Ok(())
            } else {
                self.close_session(&mut sessions, previous, None, SessionCloseReason::Superseded)
                    .await
                    .map(drop)
            };
            if let Err(err) = superseded {
                sessions.retired.insert(session.id());
                return Err(err);
            }
        }

        info!(
            session_id = %session.id(),
            task_id = %task_id,
            purpose = purpose.as_str(),
            "capture session started"
        );
        sessions.active = Some(session.clone());
        self.publish(TaskEvent::CaptureStarted {
            session_id: session.id(),
            task_id,
            purpose,
        });
        Ok(session)
    }

    /// Resolves the active capture session with a photo, or with `None` when
    /// the user cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::SessionClosed`] for a session that was
    /// already resolved, expired, or superseded;
    /// [`TaskLifecycleError::SessionNotFound`] for an unknown session; and
    /// domain or repository errors from committing the proof.
    pub async fn resolve_capture(
        &self,
        session_id: CaptureSessionId,
        image: Option<ImageRef>,
    ) -> TaskLifecycleResult<CaptureResolution> {
        let mut sessions = self.sessions.lock().await;
        let Some(session) = sessions
            .active
            .take_if(|active| active.id() == session_id)
        else {
            return Err(if sessions.retired.contains(&session_id) {
                TaskLifecycleError::SessionClosed(session_id)
            } else {
                TaskLifecycleError::SessionNotFound(session_id)
            });
        };

        let reason = if image.is_some() {
            SessionCloseReason::Captured
        } else {
            SessionCloseReason::Cancelled
        };
        self.close_session(&mut sessions, session, image, reason)
            .await
    }

    /// Advances the active session's countdown by one tick, resolving it
    /// without a photo when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns repository errors raised while marking the leg missed.
    pub async fn on_countdown_tick(&self) -> TaskLifecycleResult<CountdownTick> {
        let mut sessions = self.sessions.lock().await;
        let Some(active) = sessions.active.as_mut() else {
            return Ok(CountdownTick::Idle);
        };
        let session_id = active.id();

        match active.tick() {
            CountdownStatus::Running(remaining) => {
                debug!(session_id = %session_id, remaining, "countdown tick");
                Ok(CountdownTick::Running {
                    session_id,
                    remaining,
                })
            }
            CountdownStatus::Elapsed => {
                let Some(session) = sessions.active.take() else {
                    return Ok(CountdownTick::Idle);
                };
                info!(session_id = %session_id, "capture window elapsed");
                let resolution = self
                    .close_session(&mut sessions, session, None, SessionCloseReason::Expired)
                    .await?;
                Ok(CountdownTick::Expired(Box::new(resolution)))
            }
        }
    }

    /// Starts a capture for the leg a delivered reminder refers to.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`Self::begin_capture`].
    pub async fn handle_notification_opened(
        &self,
        task_id: TaskId,
        kind: NotificationKind,
        source: CaptureSource,
    ) -> TaskLifecycleResult<CaptureSession> {
        let task = self.find_task_or_error(task_id).await?;
        debug!(task_id = %task_id, kind = kind.as_str(), "reminder opened");
        let purpose = task
            .next_capture_purpose()
            .unwrap_or(CapturePurpose::CompletionProof);
        self.begin_capture(task_id, purpose, source).await
    }

    /// Lists an owner's tasks in `status`.
    ///
    /// Completed tasks are newest-due first; every other status is
    /// soonest-due first.
    ///
    /// # Errors
    ///
    /// Returns repository errors when listing fails.
    pub async fn list_by_status(
        &self,
        owner_id: &OwnerId,
        status: TaskStatus,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .repository
            .list_by_owner(owner_id)
            .await?
            .into_iter()
            .filter(|task| task.status() == status)
            .collect();
        if status == TaskStatus::Completed {
            tasks.sort_by(|a, b| by_due_time(b, a));
        } else {
            tasks.sort_by(by_due_time);
        }
        Ok(tasks)
    }

    /// Lists an owner's unfinished tasks due on `day`, soonest first.
    ///
    /// # Errors
    ///
    /// Returns repository errors when listing fails.
    pub async fn list_due_on(
        &self,
        owner_id: &OwnerId,
        day: NaiveDate,
    ) -> TaskLifecycleResult<Vec<Task>> {
        let offset = self.config.calendar_offset();
        let mut tasks: Vec<Task> = self
            .repository
            .list_by_owner(owner_id)
            .await?
            .into_iter()
            .filter(|task| !task.is_terminal() && calendar_day(task.due_time(), offset) == day)
            .collect();
        tasks.sort_by(by_due_time);
        Ok(tasks)
    }

    /// Lists an owner's unfinished tasks due today.
    ///
    /// # Errors
    ///
    /// Returns repository errors when listing fails.
    pub async fn list_due_today(&self, owner_id: &OwnerId) -> TaskLifecycleResult<Vec<Task>> {
        let today = calendar_day(self.clock.utc(), self.config.calendar_offset());
        self.list_due_on(owner_id, today).await
    }

    /// Ranks owners by completed tasks, most first. Ties are ordered by
    /// owner identifier.
    ///
    /// # Errors
    ///
    /// Returns repository errors when listing fails.
    pub async fn leaderboard(
        &self,
        owners: &[OwnerId],
    ) -> TaskLifecycleResult<Vec<LeaderboardEntry>> {
        let mut counts: HashMap<OwnerId, usize> = HashMap::new();
        for task in self.repository.list_all().await? {
            if task.status() == TaskStatus::Completed {
                *counts.entry(task.owner_id().clone()).or_default() += 1;
            }
        }

        let mut entries: Vec<LeaderboardEntry> = owners
            .iter()
            .map(|owner_id| LeaderboardEntry {
                owner_id: owner_id.clone(),
                completed_tasks: counts.get(owner_id).copied().unwrap_or_default(),
            })
            .collect();
        entries.sort_by(|a, b| {
            b.completed_tasks
                .cmp(&a.completed_tasks)
                .then_with(|| a.owner_id.cmp(&b.owner_id))
        });
        Ok(entries)
    }

    /// Creates single-photo tasks from calendar events, skipping events that
    /// match an existing task of the owner (or an earlier event in the same
    /// batch) by normalised title and calendar day.
    ///
    /// # Errors
    ///
    /// Returns repository errors when listing or storing fails. Tasks stored
    /// before the failure stay stored.
    pub async fn import_calendar_events(
        &self,
        owner_id: &OwnerId,
        events: impl IntoIterator<Item = CalendarEvent>,
    ) -> TaskLifecycleResult<ImportSummary> {
        let offset = self.config.calendar_offset();
        let _serialised = self.sessions.lock().await;

        let mut seen: HashSet<(String, NaiveDate)> = self
            .repository
            .list_by_owner(owner_id)
            .await?
            .iter()
            .map(|task| dedupe_key(task.title(), task.due_time(), offset))
            .collect();

        let mut summary = ImportSummary::default();
        for event in events {
            let trimmed = event.title.trim();
            let title = if trimmed.is_empty() {
                UNTITLED_EVENT
            } else {
                trimmed
            };
            if !seen.insert(dedupe_key(title, event.starts_at, offset)) {
                debug!(owner_id = %owner_id, title, "skipping duplicate calendar event");
                summary.skipped += 1;
                continue;
            }

            let draft = TaskDraft {
                title: title.to_owned(),
                owner_id: owner_id.clone(),
                due_time: event.starts_at,
                start_time: None,
                completion_style: CompletionStyle::SinglePhoto,
                metadata: TaskMetadata::default(),
            };
            let task = Task::new(draft, &*self.clock)?;
            summary.imported.push(self.insert_task(task).await?);
        }

        info!(
            owner_id = %owner_id,
            imported = summary.imported.len(),
            skipped = summary.skipped,
            "calendar import finished"
        );
        Ok(summary)
    }

    async fn insert_task(&self, task: Task) -> TaskLifecycleResult<Task> {
        self.repository.store(&task).await?;
        info!(
            task_id = %task.id(),
            owner_id = %task.owner_id(),
            style = task.completion_style().as_str(),
            "task created"
        );
        self.schedule_notifications(&task).await;
        self.publish(TaskEvent::TaskCreated {
            task_id: task.id(),
            owner_id: task.owner_id().clone(),
        });
        Ok(task)
    }

    async fn find_task_or_error(&self, task_id: TaskId) -> TaskLifecycleResult<Task> {
        self.repository
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::NotFound(task_id))
    }

    /// Marks `session` closed and announces it, leaving its task alone.
    fn retire_session(
        &self,
        sessions: &mut SessionState,
        session: &CaptureSession,
        reason: SessionCloseReason,
    ) {
        sessions.retired.insert(session.id());
        self.publish(TaskEvent::CaptureClosed {
            session_id: session.id(),
            task_id: session.task_id(),
            reason,
        });
    }

    /// Closes `session`, committing `image` or marking the leg missed.
    ///
    /// The session is retired before any fallible work so it can never be
    /// resolved twice.
    async fn close_session(
        &self,
        sessions: &mut SessionState,
        session: CaptureSession,
        image: Option<ImageRef>,
        reason: SessionCloseReason,
    ) -> TaskLifecycleResult<CaptureResolution> {
        self.retire_session(sessions, &session, reason);

        let mut task = self.find_task_or_error(session.task_id()).await?;
        let purpose = session.purpose();
        let outcome = match image {
            Some(image) => {
                let recorded = task.record_proof(
                    purpose,
                    image,
                    self.config.start_grace(),
                    &*self.clock,
                )?;
                self.repository.update(&task).await?;
                info!(
                    task_id = %task.id(),
                    purpose = purpose.as_str(),
                    late = recorded.proof.is_late(),
                    status = task.status().as_str(),
                    "proof recorded"
                );
                let corrected = recorded.replaced.is_some();
                if corrected {
                    info!(task_id = %task.id(), "start proof corrected");
                    self.publish(TaskEvent::StartProofCorrected { task_id: task.id() });
                }
                self.publish(TaskEvent::ProofRecorded {
                    task_id: task.id(),
                    purpose,
                    late: recorded.proof.is_late(),
                    status: task.status(),
                });
                self.publish_to_feed(&task, purpose, &recorded.proof).await;
                self.reissue_notifications(&task).await;
                ResolutionOutcome::ProofRecorded {
                    proof: recorded.proof,
                    corrected,
                }
            }
            None if task.mark_leg_missed(purpose, &*self.clock) => {
                self.repository.update(&task).await?;
                info!(
                    task_id = %task.id(),
                    purpose = purpose.as_str(),
                    status = task.status().as_str(),
                    "capture leg missed"
                );
                self.publish(TaskEvent::LegMissed {
                    task_id: task.id(),
                    purpose,
                    status: task.status(),
                });
                self.reissue_notifications(&task).await;
                ResolutionOutcome::LegMissed
            }
            None => ResolutionOutcome::Unchanged,
        };

        Ok(CaptureResolution {
            session,
            task,
            outcome,
        })
    }

    async fn present_with_fallback(
        &self,
        session: &CaptureSession,
    ) -> TaskLifecycleResult<CaptureSource> {
        let mut request = CaptureRequest {
            session_id: session.id(),
            task_id: session.task_id(),
            purpose: session.purpose(),
            source: session.source(),
        };
        match self.capture.present(&request).await {
            Ok(()) => Ok(request.source),
            Err(ImageCapturePortError::CameraUnavailable)
                if request.source == CaptureSource::Camera =>
            {
                debug!(task_id = %request.task_id, "camera unavailable, using library");
                request.source = CaptureSource::Library;
                self.capture
                    .present(&request)
                    .await
                    .map_err(TaskLifecycleError::CaptureUnavailable)?;
                Ok(request.source)
            }
            Err(err) => Err(TaskLifecycleError::CaptureUnavailable(err)),
        }
    }

    async fn publish_to_feed(&self, task: &Task, purpose: CapturePurpose, proof: &Proof) {
        let result = match (task.completion_style(), purpose) {
            (CompletionStyle::TwoPhoto, CapturePurpose::CompletionProof) => {
                self.feed
                    .record_completion(&CompletionLegPost {
                        task_id: task.id(),
                        image: proof.image().clone(),
                        captured_at: proof.captured_at(),
                        late: proof.is_late(),
                    })
                    .await
            }
            _ => {
                self.feed
                    .record_start(&StartLegPost {
                        task_id: task.id(),
                        owner_id: task.owner_id().clone(),
                        title: task.title().to_owned(),
                        style: task.completion_style(),
                        image: proof.image().clone(),
                        captured_at: proof.captured_at(),
                        late: proof.is_late(),
                    })
                    .await
            }
        };
        if let Err(err) = result {
            warn!(task_id = %task.id(), error = %err, "feed publication failed");
        }
    }

    async fn schedule_notifications(&self, task: &Task) {
        let now = self.clock.utc();
        for planned in task.planned_notifications() {
            if planned.fire_at <= now {
                debug!(
                    task_id = %task.id(),
                    kind = planned.kind.as_str(),
                    "skipping reminder in the past"
                );
                continue;
            }
            if let Err(err) = self.notifications.schedule(&planned).await {
                warn!(
                    task_id = %task.id(),
                    kind = planned.kind.as_str(),
                    error = %err,
                    "failed to schedule reminder"
                );
            }
        }
    }

    async fn reissue_notifications(&self, task: &Task) {
        if let Err(err) = self.notifications.cancel(task.id()).await {
            warn!(task_id = %task.id(), error = %err, "failed to cancel reminders");
        }
        self.schedule_notifications(task).await;
    }

    fn publish(&self, event: TaskEvent) {
        if self.events.send(event).is_err() {
            debug!("no task event subscribers");
        }
    }
}

fn by_due_time(a: &Task, b: &Task) -> Ordering {
    a.due_time()
        .cmp(&b.due_time())
        .then_with(|| a.created_at().cmp(&b.created_at()))
        .then_with(|| a.id().cmp(&b.id()))
}

fn calendar_day(instant: DateTime<Utc>, offset: FixedOffset) -> NaiveDate {
    instant.with_timezone(&offset).date_naive()
}

fn dedupe_key(title: &str, due_time: DateTime<Utc>, offset: FixedOffset) -> (String, NaiveDate) {
    (title.trim().to_lowercase(), calendar_day(due_time, offset))
}
