//! In-memory integration tests for task lifecycle operations.

use super::helpers::{Setup, setup, start_of_day};
use alldun::task::{
    domain::{CapturePurpose, CaptureSource, NotificationKind, OwnerId, Task, TaskStatus},
    services::{CountdownTick, CreateTaskRequest, ErrorKind, EngineConfig, TaskLifecycleError},
};
use chrono::Duration;
use rstest::rstest;

/// Asserts the listed tasks match `expected`, in order.
///
/// # Errors
///
/// Returns an error if the identifiers differ.
fn assert_task_order(found: &[Task], expected: &[&Task]) -> Result<(), eyre::Report> {
    let found_ids: Vec<_> = found.iter().map(Task::id).collect();
    let expected_ids: Vec<_> = expected.iter().map(|task| task.id()).collect();
    eyre::ensure!(
        found_ids == expected_ids,
        "expected order {expected_ids:?}, found {found_ids:?}"
    );
    Ok(())
}

fn alice() -> OwnerId {
    OwnerId::new("alice").expect("valid owner")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn two_photo_day_plays_out_end_to_end(setup: Setup) -> eyre::Result<()> {
    let start = start_of_day() + Duration::hours(1);
    let task = setup
        .engine
        .create_task(
            CreateTaskRequest::new("alice", "Gym session", start + Duration::hours(2))
                .two_photo(Some(start)),
        )
        .await?;
    eyre::ensure!(task.status() == TaskStatus::AwaitingStart);

    setup.clock.set(start + Duration::minutes(90));
    let started = setup
        .capture(task.id(), CapturePurpose::StartProof, Some("gym/before.jpg"))
        .await?;
    eyre::ensure!(started.task.status() == TaskStatus::InProgress);
    let start_proof = started
        .task
        .start_proof()
        .ok_or_else(|| eyre::eyre!("start proof missing"))?;
    eyre::ensure!(start_proof.is_late(), "90 minutes after start is past the grace");

    setup.clock.set(start + Duration::minutes(110));
    let finished = setup
        .capture(task.id(), CapturePurpose::CompletionProof, Some("gym/after.jpg"))
        .await?;
    eyre::ensure!(finished.task.status() == TaskStatus::Completed);
    let completion_proof = finished
        .task
        .completion_proof()
        .ok_or_else(|| eyre::eyre!("completion proof missing"))?;
    eyre::ensure!(!completion_proof.is_late(), "completion was before due");

    let completed = setup
        .engine
        .list_by_status(&alice(), TaskStatus::Completed)
        .await?;
    assert_task_order(&completed, &[&finished.task])?;
    eyre::ensure!(setup.notifications.pending_for(task.id())?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn completion_before_start_leaves_task_awaiting(setup: Setup) {
    let start = start_of_day() + Duration::hours(1);
    let task = setup
        .engine
        .create_task(
            CreateTaskRequest::new("alice", "Essay draft", start + Duration::hours(2))
                .two_photo(Some(start)),
        )
        .await
        .expect("create task");

    let result = setup
        .engine
        .begin_capture(task.id(), CapturePurpose::CompletionProof, CaptureSource::Camera)
        .await;

    assert!(matches!(result, Err(ref err) if err.kind() == ErrorKind::InvalidState));
    let stored = setup
        .engine
        .find_task(task.id())
        .await
        .expect("lookup")
        .expect("task exists");
    assert_eq!(stored.status(), TaskStatus::AwaitingStart);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn elapsed_countdown_misses_single_photo(setup: Setup) {
    let engine = setup.engine.with_config(EngineConfig {
        capture_window_ticks: 5,
        ..EngineConfig::default()
    });
    let task = engine
        .create_task(CreateTaskRequest::new(
            "alice",
            "Practice piano",
            start_of_day() + Duration::hours(4),
        ))
        .await
        .expect("create task");
    let session = engine
        .begin_capture(task.id(), CapturePurpose::CompletionProof, CaptureSource::Camera)
        .await
        .expect("begin capture");

    let mut expired = None;
    for _ in 0..5 {
        if let CountdownTick::Expired(resolution) = engine.on_countdown_tick().await.expect("tick")
        {
            expired = Some(resolution);
        }
    }

    let resolution = expired.expect("countdown expires on the fifth tick");
    assert_eq!(resolution.task.status(), TaskStatus::Missed);
    assert!(matches!(
        engine.resolve_capture(session.id(), None).await,
        Err(TaskLifecycleError::SessionClosed(_))
    ));
    let missed = engine
        .list_by_status(&alice(), TaskStatus::Missed)
        .await
        .expect("list missed");
    assert_eq!(missed.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reminder_opens_capture_for_next_leg(setup: Setup) {
    let start = start_of_day() + Duration::hours(1);
    let task = setup
        .engine
        .create_task(
            CreateTaskRequest::new("alice", "Run", start + Duration::hours(1))
                .two_photo(Some(start)),
        )
        .await
        .expect("create task");
    setup
        .capture(task.id(), CapturePurpose::StartProof, Some("run/before.jpg"))
        .await
        .expect("start capture");

    let session = setup
        .engine
        .handle_notification_opened(
            task.id(),
            NotificationKind::CompletionPrompt,
            CaptureSource::Library,
        )
        .await
        .expect("open reminder");

    assert_eq!(session.purpose(), CapturePurpose::CompletionProof);
}
