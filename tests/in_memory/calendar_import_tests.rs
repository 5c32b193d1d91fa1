//! Integration tests for calendar import.

use std::sync::Arc;

use super::helpers::{Setup, setup, start_of_day};
use alldun::task::{
    adapters::memory::StaticCalendarSource,
    domain::{OwnerId, TaskStatus},
    ports::CalendarEvent,
    services::{CalendarImportService, CreateTaskRequest},
};
use chrono::Duration;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn event_matching_existing_task_is_not_imported(setup: Setup) {
    let alice = OwnerId::new("alice").expect("valid owner");
    setup
        .engine
        .create_task(CreateTaskRequest::new(
            "alice",
            "Gym",
            start_of_day() + Duration::hours(2),
        ))
        .await
        .expect("create task");
    let calendar = StaticCalendarSource::new([
        CalendarEvent::new("Gym", start_of_day() + Duration::hours(10)),
        CalendarEvent::new("Dentist", start_of_day() + Duration::days(1)),
    ]);
    let importer = CalendarImportService::new(Arc::new(calendar), Arc::new(setup.clock.clone()));

    let summary = importer
        .import_upcoming(&setup.engine, &alice)
        .await
        .expect("import");
    let again = importer
        .import_upcoming(&setup.engine, &alice)
        .await
        .expect("second import");

    assert_eq!(summary.imported.len(), 1);
    assert_eq!(summary.skipped, 1);
    assert!(again.imported.is_empty());
    assert_eq!(again.skipped, 2);

    let pending = setup
        .engine
        .list_by_status(&alice, TaskStatus::Pending)
        .await
        .expect("list pending");
    let titles: Vec<&str> = pending.iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["Gym", "Dentist"]);
}
