//! Integration tests for feed posts produced by captures.

use super::helpers::{Setup, setup, start_of_day};
use alldun::task::{
    adapters::ManualClock,
    domain::{CapturePurpose, OwnerId},
    services::CreateTaskRequest,
};
use chrono::Duration;
use rstest::rstest;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn feed_shows_newest_task_first_with_one_post_each(setup: Setup) {
    let start = start_of_day() + Duration::hours(1);
    let two_photo = setup
        .engine
        .create_task(
            CreateTaskRequest::new("alice", "Gym session", start + Duration::hours(2))
                .two_photo(Some(start)),
        )
        .await
        .expect("create two-photo task");
    let single = setup
        .engine
        .create_task(CreateTaskRequest::new(
            "bob",
            "Read chapter 4",
            start_of_day() + Duration::hours(2),
        ))
        .await
        .expect("create single-photo task");

    setup
        .capture(two_photo.id(), CapturePurpose::StartProof, Some("gym/before.jpg"))
        .await
        .expect("start leg");
    setup
        .capture(single.id(), CapturePurpose::CompletionProof, Some("read.jpg"))
        .await
        .expect("single leg");
    setup
        .capture(
            two_photo.id(),
            CapturePurpose::CompletionProof,
            Some("gym/after.jpg"),
        )
        .await
        .expect("completion leg");

    let posts = setup.feed.posts().expect("feed read");
    let titles: Vec<&str> = posts.iter().map(|post| post.title()).collect();
    assert_eq!(titles, vec!["Read chapter 4", "Gym session"]);
    assert!(posts.iter().all(|post| !post.is_awaiting_completion_image()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_owners_can_like_and_comment(setup: Setup) {
    let task = setup
        .engine
        .create_task(CreateTaskRequest::new(
            "alice",
            "Stretch",
            start_of_day() + Duration::hours(1),
        ))
        .await
        .expect("create task");
    setup
        .capture(task.id(), CapturePurpose::CompletionProof, Some("stretch.jpg"))
        .await
        .expect("capture");
    let bob = OwnerId::new("bob").expect("valid owner");
    let clock = ManualClock::new(start_of_day() + Duration::minutes(5));

    setup.feed.toggle_like(task.id()).expect("like");
    setup
        .feed
        .add_comment(task.id(), bob, "Looking flexible", &clock)
        .expect("comment");

    let post = setup
        .feed
        .post_for(task.id())
        .expect("feed read")
        .expect("post exists");
    assert!(post.is_liked());
    assert_eq!(post.comments().len(), 1);
    assert_eq!(post.owner_id().as_str(), "alice");
}
