//! Simulation state for the wave lattice.
//!
//! Uses Structure of Arrays layout: one contiguous row-major buffer per
//! quantity, all indexed by `y * width + x`.

use bevy::math::Vec3;
use std::f64::consts::PI;

use crate::config::WaveSimConfig;
use crate::error::WaveResult;

/// Pressure, velocity and derived buffers over a fixed W x H lattice.
///
/// Pressure and velocity are only written by the integrator; the derived
/// normal and averaged height buffers are only written by the projector.
#[derive(Debug, Clone)]
pub struct GridField {
    width: usize,
    height: usize,

    pressure: Vec<f64>,
    velocity_x: Vec<f64>,
    velocity_y: Vec<f64>,

    /// Pressure gradient, recomputed every sub-step.
    accel_x: Vec<f64>,
    accel_y: Vec<f64>,

    /// Per-cell shading data, recomputed once per frame when enabled.
    normal: Vec<Vec3>,
    averaged_height: Vec<f32>,

    pulse: PulseShape,
}

/// Parameters of the centered initial pulse.
#[derive(Debug, Clone, Copy)]
struct PulseShape {
    radius_fraction: f64,
    distance_scale: f64,
    amplitude: f64,
}

impl GridField {
    /// Allocates the lattice described by `config` and applies the initial pulse.
    pub fn new(config: &WaveSimConfig) -> WaveResult<Self> {
        config.validate()?;

        let width = config.grid_width;
        let height = config.grid_height;
        let size = width * height;

        let mut field = Self {
            width,
            height,
            pressure: vec![0.0; size],
            velocity_x: vec![0.0; size],
            velocity_y: vec![0.0; size],
            accel_x: vec![0.0; size],
            accel_y: vec![0.0; size],
            normal: vec![Vec3::ZERO; size],
            averaged_height: vec![0.0; size],
            pulse: PulseShape {
                radius_fraction: config.pulse_radius_fraction,
                distance_scale: config.pulse_distance_scale,
                amplitude: config.pulse_amplitude,
            },
        };
        field.reset();
        Ok(field)
    }

    /// Restores the initial condition: zero velocity everywhere and a
    /// negative-cosine pulse centered on the lattice.
    pub fn reset(&mut self) {
        let half_w = (self.width / 2) as f64;
        let half_h = (self.height / 2) as f64;
        let radius = self.pulse.radius_fraction * half_w.min(half_h);
        let phase_scale = self.pulse.distance_scale * PI / (self.width * 8) as f64;

        for y in 0..self.height {
            for x in 0..self.width {
                let idx = self.idx(x, y);
                let dx = x as f64 - half_w;
                let dy = y as f64 - half_h;
                let d = (dx * dx + dy * dy).sqrt();

                self.pressure[idx] = if d < radius {
                    -(d * phase_scale).cos() * self.pulse.amplitude
                } else {
                    0.0
                };
            }
        }

        self.velocity_x.fill(0.0);
        self.velocity_y.fill(0.0);
        self.accel_x.fill(0.0);
        self.accel_y.fill(0.0);
        self.normal.fill(Vec3::ZERO);
        self.averaged_height.fill(0.0);
    }

    /// Convert (x, y) coordinates to a linear index.
    #[inline(always)]
    pub(crate) fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "cell ({x}, {y}) outside {}x{} lattice",
            self.width,
            self.height
        );
        y * self.width + x
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.pressure.len()
    }

    #[inline]
    pub fn pressure(&self, x: usize, y: usize) -> f64 {
        self.pressure[self.idx(x, y)]
    }

    #[inline]
    pub fn velocity_x(&self, x: usize, y: usize) -> f64 {
        self.velocity_x[self.idx(x, y)]
    }

    #[inline]
    pub fn velocity_y(&self, x: usize, y: usize) -> f64 {
        self.velocity_y[self.idx(x, y)]
    }

    #[inline]
    pub fn accel_x(&self, x: usize, y: usize) -> f64 {
        self.accel_x[self.idx(x, y)]
    }

    #[inline]
    pub fn accel_y(&self, x: usize, y: usize) -> f64 {
        self.accel_y[self.idx(x, y)]
    }

    /// Averaged shading normal of the quad whose lower-left corner is (x, y).
    ///
    /// Zero for the last row and column, and for every cell while normal
    /// computation is disabled.
    #[inline]
    pub fn normal(&self, x: usize, y: usize) -> Vec3 {
        self.normal[self.idx(x, y)]
    }

    #[inline]
    pub fn averaged_height(&self, x: usize, y: usize) -> f32 {
        self.averaged_height[self.idx(x, y)]
    }

    /// Pressure buffer as a flat slice (row-major order).
    #[inline]
    pub fn pressure_slice(&self) -> &[f64] {
        &self.pressure
    }

    #[inline]
    pub fn velocity_x_slice(&self) -> &[f64] {
        &self.velocity_x
    }

    #[inline]
    pub fn velocity_y_slice(&self) -> &[f64] {
        &self.velocity_y
    }

    #[inline]
    pub fn normal_slice(&self) -> &[Vec3] {
        &self.normal
    }

    #[inline]
    pub fn averaged_height_slice(&self) -> &[f32] {
        &self.averaged_height
    }

    /// Sum of squared pressures.
    pub fn total_energy(&self) -> f64 {
        self.pressure.iter().map(|p| p * p).sum()
    }

    pub fn max_abs_pressure(&self) -> f64 {
        self.pressure.iter().map(|p| p.abs()).fold(0.0, f64::max)
    }

    /// Mutable access to the integrated buffers:
    /// (pressure, velocity_x, velocity_y, accel_x, accel_y).
    pub(crate) fn solver_buffers_mut(
        &mut self,
    ) -> (
        &mut [f64],
        &mut [f64],
        &mut [f64],
        &mut [f64],
        &mut [f64],
    ) {
        (
            &mut self.pressure,
            &mut self.velocity_x,
            &mut self.velocity_y,
            &mut self.accel_x,
            &mut self.accel_y,
        )
    }

    /// Mutable access to the derived shading buffers: (normal, averaged_height).
    pub(crate) fn shading_buffers_mut(&mut self) -> (&mut [Vec3], &mut [f32]) {
        (&mut self.normal, &mut self.averaged_height)
    }

    #[cfg(test)]
    pub(crate) fn set_pressure(&mut self, x: usize, y: usize, value: f64) {
        let idx = self.idx(x, y);
        self.pressure[idx] = value;
    }
}
