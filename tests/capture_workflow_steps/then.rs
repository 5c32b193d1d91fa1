//! Then steps for capture workflow BDD scenarios.

use super::world::{CaptureWorld, run_async};
use alldun::task::{
    domain::TaskStatus,
    services::{ErrorKind, ResolutionOutcome},
};
use rstest_bdd_macros::then;

#[then(r#"the task status is "{status}""#)]
fn task_status_is(world: &CaptureWorld, status: String) -> Result<(), eyre::Report> {
    let expected = TaskStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let task_id = world.task()?.id();
    let stored = run_async(world.engine.find_task(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} disappeared"))?;

    if stored.status() != expected {
        return Err(eyre::eyre!(
            "expected status {}, found {}",
            expected.as_str(),
            stored.status().as_str()
        ));
    }
    Ok(())
}

#[then("the last proof is late")]
fn last_proof_is_late(world: &CaptureWorld) -> Result<(), eyre::Report> {
    let resolution = world
        .last_resolution
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing capture resolution"))?;
    match &resolution.outcome {
        ResolutionOutcome::ProofRecorded { proof, .. } if proof.is_late() => Ok(()),
        other => Err(eyre::eyre!("expected a late proof, got {other:?}")),
    }
}

#[then("the capture is rejected as invalid state")]
fn capture_rejected_as_invalid_state(world: &CaptureWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_capture
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing capture result"))?;
    match result {
        Err(err) if err.kind() == ErrorKind::InvalidState => Ok(()),
        other => Err(eyre::eyre!("expected InvalidState error, got {other:?}")),
    }
}

#[then("{imported:usize} tasks are imported and {skipped:usize} is skipped")]
fn import_counts(
    world: &CaptureWorld,
    imported: usize,
    skipped: usize,
) -> Result<(), eyre::Report> {
    let summary = world
        .last_import
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing import summary"))?;
    eyre::ensure!(
        summary.imported.len() == imported && summary.skipped == skipped,
        "expected {imported} imported and {skipped} skipped, got {} and {}",
        summary.imported.len(),
        summary.skipped
    );
    Ok(())
}
