//! Splits frame time into stability-bounded integrator sub-steps.

use bevy_log::{debug, warn};

use crate::constants::SUBSTEP_RELATIVE_EPSILON;
use crate::error::{WaveError, WaveResult};
use crate::grid::GridField;
use crate::integrator::FieldIntegrator;

/// Summary of the sub-steps taken for one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameSteps {
    /// Number of integrator calls.
    pub substeps: u64,
    /// Sum of the unscaled sub-step durations, in seconds.
    pub simulated: f64,
}

/// Drives an integrator so that no single call covers more than
/// `max_delta_t` seconds of frame time, however long the frame was.
#[derive(Debug, Clone, Copy)]
pub struct SimulationClock {
    max_delta_t: f64,
    animation_speed: f64,
}

impl SimulationClock {
    /// Both values must be finite and positive, otherwise a frame could never
    /// be consumed.
    pub fn new(max_delta_t: f64, animation_speed: f64) -> WaveResult<Self> {
        for (name, value) in [
            ("max_delta_t", max_delta_t),
            ("animation_speed", animation_speed),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(WaveError::InvalidParameter { name, value });
            }
        }

        Ok(Self {
            max_delta_t,
            animation_speed,
        })
    }

    pub fn max_delta_t(&self) -> f64 {
        self.max_delta_t
    }

    pub fn animation_speed(&self) -> f64 {
        self.animation_speed
    }

    /// Consumes `elapsed` seconds in chunks of at most `max_delta_t`, passing
    /// each chunk scaled by `animation_speed` to the integrator.
    ///
    /// Any positive frame time runs at least one sub-step. Float residue left
    /// after the last full chunk is dropped once it falls to
    /// `SUBSTEP_RELATIVE_EPSILON * elapsed`. Zero, negative and non-finite
    /// frame times run no sub-steps.
    pub fn advance<I: FieldIntegrator + ?Sized>(
        &self,
        elapsed: f64,
        field: &mut GridField,
        integrator: &mut I,
    ) -> FrameSteps {
        let mut steps = FrameSteps::default();
        for dt in self.substeps(elapsed) {
            integrator.step(field, dt * self.animation_speed);
            steps.substeps = steps.substeps.saturating_add(1);
            steps.simulated += dt;
        }

        if steps.substeps > 1 {
            debug!(
                "Frame of {:.4}s split into {} sub-steps",
                elapsed, steps.substeps
            );
        }
        steps
    }

    /// Number of integrator calls `advance(elapsed, ..)` would make.
    pub fn substep_count(&self, elapsed: f64) -> u64 {
        self.substeps(elapsed).count() as u64
    }

    fn substeps(&self, elapsed: f64) -> SubSteps {
        let remaining = if elapsed.is_finite() {
            elapsed.max(0.0)
        } else {
            warn!("Ignoring non-finite frame time {}", elapsed);
            0.0
        };
        SubSteps {
            remaining,
            residue: remaining * SUBSTEP_RELATIVE_EPSILON,
            max_delta_t: self.max_delta_t,
        }
    }
}

/// Unscaled sub-step durations for a single frame.
struct SubSteps {
    remaining: f64,
    residue: f64,
    max_delta_t: f64,
}

impl Iterator for SubSteps {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining <= self.residue {
            return None;
        }
        let dt = self.remaining.min(self.max_delta_t);
        self.remaining -= dt;
        Some(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WaveSimConfig;
    use crate::integrator::WaveIntegrator;

    /// Records every time step it is handed instead of integrating.
    #[derive(Default)]
    struct RecordingIntegrator {
        steps: Vec<f64>,
    }

    impl FieldIntegrator for RecordingIntegrator {
        fn step(&mut self, _field: &mut GridField, time_step: f64) {
            self.steps.push(time_step);
        }
    }

    fn reference_clock() -> SimulationClock {
        SimulationClock::new(0.01, 10.0).unwrap()
    }

    fn field() -> GridField {
        GridField::new(&WaveSimConfig::default()).unwrap()
    }

    #[test]
    fn test_short_frame_is_single_step() {
        let mut recorder = RecordingIntegrator::default();
        let steps = reference_clock().advance(0.005, &mut field(), &mut recorder);
        assert_eq!(steps.substeps, 1);
        assert_eq!(recorder.steps.len(), 1);
        assert!((recorder.steps[0] - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_long_frame_is_split() {
        let mut recorder = RecordingIntegrator::default();
        let steps = reference_clock().advance(0.025, &mut field(), &mut recorder);
        assert_eq!(steps.substeps, 3);
        let expected = [0.1, 0.1, 0.05];
        for (got, want) in recorder.steps.iter().zip(expected) {
            assert!((got - want).abs() < 1e-12, "got {got}, want {want}");
        }
        assert!((steps.simulated - 0.025).abs() < 1e-12);
    }

    #[test]
    fn test_substep_count_matches_ceil() {
        let clock = reference_clock();
        for elapsed in [0.001, 0.005, 0.01, 0.015, 0.025, 0.0333, 0.05, 0.1, 0.25, 1.0] {
            let mut recorder = RecordingIntegrator::default();
            let steps = clock.advance(elapsed, &mut field(), &mut recorder);
            let expected = (elapsed / 0.01).ceil() as u64;
            assert_eq!(steps.substeps, expected, "elapsed = {elapsed}");
            assert_eq!(clock.substep_count(elapsed), expected);
            assert!(
                (steps.simulated - elapsed).abs() < 1e-9,
                "unscaled steps should sum to {elapsed}, got {}",
                steps.simulated
            );
            assert!(recorder
                .steps
                .iter()
                .all(|dt| *dt <= 0.01 * 10.0 + 1e-12));
        }
    }

    #[test]
    fn test_zero_and_invalid_frames_do_nothing() {
        let clock = reference_clock();
        for elapsed in [0.0, -0.5, f64::NAN, f64::INFINITY] {
            let mut recorder = RecordingIntegrator::default();
            let steps = clock.advance(elapsed, &mut field(), &mut recorder);
            assert_eq!(steps, FrameSteps::default(), "elapsed = {elapsed}");
            assert!(recorder.steps.is_empty());
        }
    }

    #[test]
    fn test_advance_zero_leaves_field_untouched() {
        let mut field = field();
        let before = field.clone();
        reference_clock().advance(0.0, &mut field, &mut WaveIntegrator);
        assert_eq!(field.pressure_slice(), before.pressure_slice());
        assert_eq!(field.velocity_x_slice(), before.velocity_x_slice());
        assert_eq!(field.velocity_y_slice(), before.velocity_y_slice());
    }

    #[test]
    fn test_animation_speed_scales_steps() {
        let clock = SimulationClock::new(0.01, 2.0).unwrap();
        let mut recorder = RecordingIntegrator::default();
        clock.advance(0.01, &mut field(), &mut recorder);
        assert_eq!(recorder.steps.len(), 1);
        assert!((recorder.steps[0] - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_non_positive_bounds() {
        for (max_delta_t, speed) in [
            (0.0, 10.0),
            (-0.01, 10.0),
            (f64::NAN, 10.0),
            (f64::INFINITY, 10.0),
            (0.01, 0.0),
            (0.01, -1.0),
            (0.01, f64::NAN),
        ] {
            assert!(
                matches!(
                    SimulationClock::new(max_delta_t, speed),
                    Err(WaveError::InvalidParameter { .. })
                ),
                "max_delta_t = {max_delta_t}, speed = {speed} should be rejected"
            );
        }

        let clock = SimulationClock::new(0.01, 10.0).unwrap();
        assert_eq!(clock.max_delta_t(), 0.01);
        assert_eq!(clock.animation_speed(), 10.0);
    }

    #[test]
    fn test_tiny_frame_still_steps_once() {
        let clock = reference_clock();
        for elapsed in [1e-13, 1e-300, f64::MIN_POSITIVE] {
            let mut recorder = RecordingIntegrator::default();
            let steps = clock.advance(elapsed, &mut field(), &mut recorder);
            assert_eq!(steps.substeps, 1, "elapsed = {elapsed}");
            assert_eq!(recorder.steps, vec![elapsed * 10.0]);
        }
    }

    #[test]
    fn test_float_residue_adds_no_extra_step() {
        let clock = reference_clock();
        // Repeated subtraction of 0.01 leaves tiny remainders for these.
        for (elapsed, expected) in [(0.03, 3), (0.07, 7), (0.3, 30), (2.0, 200)] {
            assert_eq!(clock.substep_count(elapsed), expected, "elapsed = {elapsed}");
        }
    }
}
