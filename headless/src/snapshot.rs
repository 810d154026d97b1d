use std::{fs::File, io::Write, path::Path};

use fluidwave_core::WaveSimulation;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};

/// Final state of a run, row-major like the field itself.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FieldSnapshot {
    pub width: usize,
    pub height: usize,
    pub frame: u64,
    pub total_energy: f64,
    pub pressure: Vec<f64>,
    /// Vertex z values after projection.
    pub heights: Vec<f32>,
}

impl FieldSnapshot {
    pub fn capture(simulation: &WaveSimulation) -> Self {
        let field = simulation.field();
        Self {
            width: field.width(),
            height: field.height(),
            frame: simulation.frame(),
            total_energy: field.total_energy(),
            pressure: field.pressure_slice().to_vec(),
            heights: simulation.mesh().positions().iter().map(|p| p[2]).collect(),
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let pretty_config = PrettyConfig::new()
            .with_depth_limit(3)
            .with_separate_tuple_members(true)
            .with_enumerate_arrays(true);

        let serialized = ron::ser::to_string_pretty(self, pretty_config)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let mut file = File::create(path)?;
        file.write_all(serialized.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fluidwave_core::WaveSimConfig;

    #[test]
    fn test_capture_initial_state() {
        let simulation = WaveSimulation::new(WaveSimConfig::default()).unwrap();
        let snapshot = FieldSnapshot::capture(&simulation);

        assert_eq!((snapshot.width, snapshot.height), (50, 50));
        assert_eq!(snapshot.frame, 0);
        assert_eq!(snapshot.pressure.len(), 2500);
        assert_eq!(snapshot.heights.len(), 2500);
        assert_eq!(snapshot.pressure[25 * 50 + 25], -50.0);
        assert_eq!(snapshot.heights[25 * 50 + 25], -1.0);
        assert_eq!(snapshot.total_energy, simulation.field().total_energy());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = std::env::temp_dir()
            .join("fluidwave_snapshot_tests")
            .join(format!("nested_{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("snapshot.ron");

        let mut simulation = WaveSimulation::new(WaveSimConfig::default().with_grid(6, 4)).unwrap();
        simulation.advance(0.02);
        let snapshot = FieldSnapshot::capture(&simulation);
        snapshot.save(&path).unwrap();

        let loaded: FieldSnapshot = ron::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded, snapshot);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
