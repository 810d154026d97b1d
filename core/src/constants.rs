pub const DEFAULT_GRID_WIDTH: usize = 50;
pub const DEFAULT_GRID_HEIGHT: usize = 50;
/// Maximum unscaled time covered by a single integrator call, in seconds.
pub const DEFAULT_MAX_DELTA_T: f64 = 0.01;
/// Multiplier applied to every sub-step before it reaches the integrator.
pub const DEFAULT_ANIMATION_SPEED: f64 = 10.0;
/// Pulse radius as a fraction of the half-extent of the lattice.
pub const DEFAULT_PULSE_RADIUS_FRACTION: f64 = 0.1;
pub const DEFAULT_PULSE_DISTANCE_SCALE: f64 = 10.0;
pub const DEFAULT_PULSE_AMPLITUDE: f64 = 50.0;
pub const DEFAULT_HEIGHT_SCALE: f64 = 1.0 / 50.0;
/// Frame delta used for the very first frame, before a real delta exists.
pub const DEFAULT_STARTUP_DELTA: f64 = 0.01;

/// Remaining frame time at or below this fraction of the frame is considered
/// fully consumed.
pub const SUBSTEP_RELATIVE_EPSILON: f64 = 1e-9;
/// Cross products shorter than this are treated as degenerate.
pub const NORMAL_EPSILON: f32 = 1e-8;

pub const CONFIG_READ_ERROR: &str = "Failed to read wave configuration file";
pub const CONFIG_WRITE_ERROR: &str = "Failed to write default wave configuration file";
