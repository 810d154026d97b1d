//! Single entry point used by hosts: one `advance` per frame, `reset` on demand.

use bevy_ecs::resource::Resource;
use bevy_log::info;

use crate::clock::{FrameSteps, SimulationClock};
use crate::config::WaveSimConfig;
use crate::error::WaveResult;
use crate::grid::GridField;
use crate::integrator::WaveIntegrator;
use crate::mesh::MeshTopology;
use crate::projector::GeometryProjector;

/// Owns the field, the mesh and the components that connect them.
#[derive(Resource, Debug, Clone)]
pub struct WaveSimulation {
    config: WaveSimConfig,
    field: GridField,
    mesh: MeshTopology,
    integrator: WaveIntegrator,
    projector: GeometryProjector,
    clock: SimulationClock,
    /// Frames advanced since construction (including zero-length frames).
    frame: u64,
    /// Integrator calls since construction.
    total_substeps: u64,
}

impl WaveSimulation {
    /// Builds the lattice and mesh, applies the initial pulse and projects it.
    pub fn new(config: WaveSimConfig) -> WaveResult<Self> {
        config.validate()?;

        let mesh = MeshTopology::build(config.grid_width, config.grid_height)?;
        let field = GridField::new(&config)?;
        let clock = SimulationClock::new(config.max_delta_t, config.animation_speed)?;

        let mut simulation = Self {
            integrator: WaveIntegrator,
            projector: GeometryProjector::new(config.height_scale),
            clock,
            field,
            mesh,
            config,
            frame: 0,
            total_substeps: 0,
        };
        simulation.project();

        info!(
            "Wave simulation ready: {}x{} lattice, {} quads, max dt {}s, speed {}",
            simulation.config.grid_width,
            simulation.config.grid_height,
            simulation.mesh.quad_count(),
            simulation.config.max_delta_t,
            simulation.config.animation_speed
        );
        Ok(simulation)
    }

    /// Advances the field by `elapsed_seconds` of wall-clock time, then
    /// refreshes the mesh once.
    pub fn advance(&mut self, elapsed_seconds: f64) -> FrameSteps {
        let steps = self
            .clock
            .advance(elapsed_seconds, &mut self.field, &mut self.integrator);

        self.frame += 1;
        self.total_substeps = self.total_substeps.saturating_add(steps.substeps);

        self.project();
        steps
    }

    /// Reinitializes the field to the initial pulse and re-projects it.
    pub fn reset(&mut self) {
        self.field.reset();
        self.project();
        info!("Wave field reset after {} frames", self.frame);
    }

    fn project(&mut self) {
        self.projector.project_heights(&self.field, &mut self.mesh);
        if self.config.compute_normals {
            self.projector
                .project_normals_and_averages(&mut self.field, &self.mesh);
        }
    }

    pub fn config(&self) -> &WaveSimConfig {
        &self.config
    }

    pub fn field(&self) -> &GridField {
        &self.field
    }

    pub fn mesh(&self) -> &MeshTopology {
        &self.mesh
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn total_substeps(&self) -> u64 {
        self.total_substeps
    }
}
