//! When steps for capture workflow BDD scenarios.

use super::world::{CaptureWorld, run_async};
use alldun::task::{
    domain::{CapturePurpose, CaptureSource, ImageRef},
    ports::CalendarEvent,
    services::CountdownTick,
};
use chrono::Duration;
use eyre::WrapErr;
use rstest_bdd_macros::when;

#[when("the clock moves forward {minutes:i64} minutes")]
fn clock_moves_forward(world: &mut CaptureWorld, minutes: i64) {
    world.clock.advance(Duration::minutes(minutes));
}

#[when("a completion capture is started")]
fn completion_capture_started(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let result = run_async(world.engine.begin_capture(
        task_id,
        CapturePurpose::CompletionProof,
        CaptureSource::Camera,
    ));
    world.last_capture = Some(result);
    Ok(())
}

#[when("a completion photo is captured")]
fn completion_photo_captured(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let session = run_async(world.engine.begin_capture(
        task_id,
        CapturePurpose::CompletionProof,
        CaptureSource::Camera,
    ))
    .wrap_err("begin completion capture")?;
    let resolution = run_async(
        world
            .engine
            .resolve_capture(session.id(), Some(ImageRef::new("scenario/photo.jpg"))),
    )
    .wrap_err("resolve completion capture")?;
    world.last_resolution = Some(resolution);
    Ok(())
}

#[when("the countdown runs out")]
fn countdown_runs_out(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    let ticks = world.engine.config().capture_window_ticks;
    for _ in 0..ticks {
        let tick = run_async(world.engine.on_countdown_tick()).wrap_err("countdown tick")?;
        if let CountdownTick::Expired(resolution) = tick {
            world.last_resolution = Some(*resolution);
            return Ok(());
        }
    }
    Err(eyre::eyre!("countdown did not expire after {ticks} ticks"))
}

#[when(r#"a calendar event "{title}" starting in {minutes:i64} minutes is imported"#)]
fn calendar_event_imported(
    world: &mut CaptureWorld,
    title: String,
    minutes: i64,
) -> Result<(), eyre::Report> {
    let event = CalendarEvent::new(title, world.clock_now() + Duration::minutes(minutes));
    let summary = run_async(world.engine.import_calendar_events(&world.owner, [event]))
        .wrap_err("import calendar event")?;
    world.last_import = Some(summary);
    Ok(())
}
