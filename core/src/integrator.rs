//! Explicit finite-difference wave propagation.
//!
//! One sub-step runs three passes over the lattice:
//!
//! 1. pressure gradient with periodic (wrap-around) neighbors
//! 2. explicit Euler velocity update
//! 3. pressure update from velocity divergence, for x >= 1 and y >= 1 only
//!
//! The x = 0 column and y = 0 row of pressure are never written by pass 3, so
//! they behave as a fixed edge even though pass 1 wraps. This asymmetry is
//! kept bit-for-bit; whether it is an intended boundary condition is still
//! an open question for the system owner.

use crate::grid::GridField;

/// Advances a [`GridField`] by one sub-step.
///
/// `time_step` is already scaled by the animation speed. Implementations do
/// no stability checking; bounding the step is the caller's job.
pub trait FieldIntegrator {
    fn step(&mut self, field: &mut GridField, time_step: f64);
}

/// The reference pressure/velocity scheme.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaveIntegrator;

impl FieldIntegrator for WaveIntegrator {
    fn step(&mut self, field: &mut GridField, time_step: f64) {
        let width = field.width();
        let height = field.height();
        let (pressure, vx, vy, ax, ay) = field.solver_buffers_mut();

        compute_accelerations(pressure, ax, ay, width, height);
        integrate_velocities(vx, vy, ax, ay, time_step);
        integrate_pressure(pressure, vx, vy, width, height, time_step);
    }
}

/// Pressure difference to the next cell along each axis, wrapping at the edges.
fn compute_accelerations(
    pressure: &[f64],
    ax: &mut [f64],
    ay: &mut [f64],
    width: usize,
    height: usize,
) {
    for y in 0..height {
        let row = y * width;
        let next_row = ((y + 1) % height) * width;
        for x in 0..width {
            let idx = row + x;
            let next_x = row + (x + 1) % width;
            ax[idx] = pressure[idx] - pressure[next_x];
            ay[idx] = pressure[idx] - pressure[next_row + x];
        }
    }
}

#[inline]
fn integrate_velocities(vx: &mut [f64], vy: &mut [f64], ax: &[f64], ay: &[f64], time_step: f64) {
    for (v, a) in vx.iter_mut().zip(ax) {
        *v += a * time_step;
    }
    for (v, a) in vy.iter_mut().zip(ay) {
        *v += a * time_step;
    }
}

/// Inflow minus outflow along both axes. Skips the first row and column.
fn integrate_pressure(
    pressure: &mut [f64],
    vx: &[f64],
    vy: &[f64],
    width: usize,
    height: usize,
    time_step: f64,
) {
    for y in 1..height {
        let row = y * width;
        let prev_row = row - width;
        for x in 1..width {
            let idx = row + x;
            let divergence = vx[idx - 1] - vx[idx] + vy[prev_row + x] - vy[idx];
            pressure[idx] += divergence * time_step;
        }
    }
}
