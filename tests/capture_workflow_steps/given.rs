//! Given steps for capture workflow BDD scenarios.

use super::world::{CaptureWorld, SCENARIO_OWNER, run_async};
use alldun::task::services::CreateTaskRequest;
use chrono::Duration;
use eyre::WrapErr;
use rstest_bdd_macros::given;

#[given(r#"a single-photo task "{title}" due in {minutes:i64} minutes"#)]
fn single_photo_task(
    world: &mut CaptureWorld,
    title: String,
    minutes: i64,
) -> Result<(), eyre::Report> {
    let due = world.clock_now() + Duration::minutes(minutes);
    let created = run_async(
        world
            .engine
            .create_task(CreateTaskRequest::new(SCENARIO_OWNER, title, due)),
    )
    .wrap_err("create single-photo task for scenario")?;
    world.last_task = Some(created);
    Ok(())
}

#[given(
    r#"a two-photo task "{title}" starting in {start_minutes:i64} minutes and due {due_minutes:i64} minutes later"#
)]
fn two_photo_task(
    world: &mut CaptureWorld,
    title: String,
    start_minutes: i64,
    due_minutes: i64,
) -> Result<(), eyre::Report> {
    let start = world.clock_now() + Duration::minutes(start_minutes);
    let due = start + Duration::minutes(due_minutes);
    let request = CreateTaskRequest::new(SCENARIO_OWNER, title, due).two_photo(Some(start));
    let created = run_async(world.engine.create_task(request))
        .wrap_err("create two-photo task for scenario")?;
    world.last_task = Some(created);
    Ok(())
}
