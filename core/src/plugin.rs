//! Bevy plugin driving the wave simulation once per frame.

use bevy::input::{keyboard::KeyCode, ButtonInput};
use bevy::prelude::*;

use crate::clock::FrameSteps;
use crate::simulation::WaveSimulation;

/// Requests that the field be reinitialized to its initial pulse before the
/// next advance.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct ResetWaveField;

/// Sub-steps taken by the most recent frame.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct LastFrameSteps(pub FrameSteps);

/// Key that triggers a reset when keyboard input is available.
#[derive(Resource, Debug, Clone, Copy)]
pub struct WaveKeyBindings {
    pub reset: Option<KeyCode>,
}

impl Default for WaveKeyBindings {
    fn default() -> Self {
        Self {
            reset: Some(KeyCode::Space),
        }
    }
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum WaveUpdateSet {
    Input,
    Simulation,
}

/// Plugin that steps a [`WaveSimulation`] resource every `Update`.
///
/// This plugin:
/// - Registers the [`ResetWaveField`] event and the reset key binding
/// - Applies pending resets, then advances by the frame's delta time
///
/// The host inserts the `WaveSimulation` resource itself, since building it
/// can fail on a bad configuration. Nothing runs until it exists.
#[derive(Default)]
pub struct WavePlugin {
    pub key_bindings: WaveKeyBindings,
}

impl Plugin for WavePlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ResetWaveField>()
            .insert_resource(self.key_bindings)
            .init_resource::<LastFrameSteps>()
            .configure_sets(
                Update,
                (WaveUpdateSet::Input, WaveUpdateSet::Simulation).chain(),
            )
            .add_systems(Update, reset_on_key_press.in_set(WaveUpdateSet::Input))
            // Resets are applied on the same frame as the request, before advancing
            .add_systems(
                Update,
                (apply_reset_requests, advance_wave_simulation)
                    .chain()
                    .in_set(WaveUpdateSet::Simulation)
                    .run_if(resource_exists::<WaveSimulation>),
            );
    }
}

fn reset_on_key_press(
    keyboard_input: Option<Res<ButtonInput<KeyCode>>>,
    key_bindings: Res<WaveKeyBindings>,
    mut reset_events: EventWriter<ResetWaveField>,
) {
    let (Some(keyboard_input), Some(key)) = (keyboard_input, key_bindings.reset) else {
        return;
    };
    if keyboard_input.just_pressed(key) {
        reset_events.write(ResetWaveField);
    }
}

fn apply_reset_requests(
    mut reset_events: EventReader<ResetWaveField>,
    mut simulation: ResMut<WaveSimulation>,
) {
    // Several requests in one frame collapse into a single reset
    if reset_events.read().count() > 0 {
        simulation.reset();
    }
}

/// The first frame has no meaningful delta, so it integrates `startup_delta`.
fn advance_wave_simulation(
    time: Res<Time>,
    mut simulation: ResMut<WaveSimulation>,
    mut last_steps: ResMut<LastFrameSteps>,
) {
    let elapsed = if simulation.frame() == 0 {
        simulation.config().startup_delta
    } else {
        time.delta_secs_f64()
    };

    last_steps.0 = simulation.advance(elapsed);
}
