//! Real-time 2D wave simulation on a regular lattice.
//!
//! A [`WaveSimulation`] owns the pressure/velocity field and a quad mesh whose
//! vertex heights follow the pressure. Hosts call [`WaveSimulation::advance`]
//! once per frame with the elapsed wall-clock time, or add [`WavePlugin`] to a
//! Bevy app and insert the simulation as a resource.

pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod grid;
pub mod integrator;
pub mod mesh;
pub mod plugin;
pub mod projector;
pub mod simulation;

pub use clock::{FrameSteps, SimulationClock};
pub use config::WaveSimConfig;
pub use error::{WaveError, WaveResult};
pub use grid::GridField;
pub use integrator::{FieldIntegrator, WaveIntegrator};
pub use mesh::MeshTopology;
pub use plugin::{LastFrameSteps, ResetWaveField, WaveKeyBindings, WavePlugin, WaveUpdateSet};
pub use projector::GeometryProjector;
pub use simulation::WaveSimulation;
