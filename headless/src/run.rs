use std::path::PathBuf;

use bevy::prelude::*;
use bevy_ecs::resource::Resource;
use bevy_log::{error, info};
use fluidwave_core::{LastFrameSteps, ResetWaveField, WaveSimulation, WaveUpdateSet};

use crate::snapshot::FieldSnapshot;

/// Run-length and reporting options for a headless session.
#[derive(Resource, Debug, Clone)]
pub struct HeadlessRun {
    pub frames: u64,
    pub reset_every: Option<u64>,
    pub report_every: u64,
    pub snapshot: Option<PathBuf>,
}

pub fn register_systems(app: &mut App) {
    app.add_systems(Update, request_scheduled_resets.in_set(WaveUpdateSet::Input));

    app.add_systems(
        Update,
        (report_progress, finish_run)
            .chain()
            .after(WaveUpdateSet::Simulation),
    );
}

fn request_scheduled_resets(
    run: Res<HeadlessRun>,
    simulation: Res<WaveSimulation>,
    mut reset_events: EventWriter<ResetWaveField>,
) {
    let Some(every) = run.reset_every else {
        return;
    };
    let frame = simulation.frame();
    if frame > 0 && frame % every == 0 {
        reset_events.write(ResetWaveField);
    }
}

fn report_progress(
    run: Res<HeadlessRun>,
    simulation: Res<WaveSimulation>,
    last_steps: Res<LastFrameSteps>,
) {
    if simulation.frame() % run.report_every != 0 {
        return;
    }
    let field = simulation.field();
    info!(
        "Frame {}: energy {:.4}, max |p| {:.4}, {} sub-steps ({} total)",
        simulation.frame(),
        field.total_energy(),
        field.max_abs_pressure(),
        last_steps.0.substeps,
        simulation.total_substeps()
    );
}

fn finish_run(
    run: Res<HeadlessRun>,
    simulation: Res<WaveSimulation>,
    mut ev_app_exit: EventWriter<AppExit>,
) {
    if simulation.frame() < run.frames {
        return;
    }

    if let Some(path) = &run.snapshot {
        let snapshot = FieldSnapshot::capture(&simulation);
        if let Err(err) = snapshot.save(path) {
            error!("Could not write snapshot to {}: {}", path.display(), err);
            ev_app_exit.write(AppExit::error());
            return;
        }
        info!("Snapshot of frame {} saved to {}", snapshot.frame, path.display());
    }

    ev_app_exit.write(AppExit::Success);
}
