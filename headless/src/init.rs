use std::time::Duration;

use bevy::{
    diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin},
    prelude::*,
    time::TimeUpdateStrategy,
};
use bevy_app::ScheduleRunnerPlugin;
use fluidwave_core::{WavePlugin, WaveSimConfig, WaveSimulation};

use crate::run::{self, HeadlessRun};

pub fn init(config: WaveSimConfig, run: HeadlessRun, fps: f64, fixed_step: bool) -> AppExit {
    let frame_duration = Duration::from_secs_f64(1.0 / fps);

    let mut app = App::new();
    app.add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(frame_duration)));

    app.add_plugins(FrameTimeDiagnosticsPlugin::default());
    app.add_plugins(LogDiagnosticsPlugin::default());
    app.add_plugins(bevy::log::LogPlugin::default());

    // Deterministic runs: every frame sees exactly 1/fps of simulated time
    if fixed_step {
        app.insert_resource(TimeUpdateStrategy::ManualDuration(frame_duration));
    }

    app.add_plugins(WavePlugin::default());

    let simulation = match WaveSimulation::new(config) {
        Ok(simulation) => simulation,
        Err(err) => {
            error!("Failed to build the wave simulation: {}", err);
            return AppExit::error();
        }
    };
    app.insert_resource(simulation);

    info!(
        "Running {} frames at {} fps{}",
        run.frames,
        fps,
        if fixed_step { " (fixed step)" } else { "" }
    );
    app.insert_resource(run);

    run::register_systems(&mut app);

    app.run()
}
