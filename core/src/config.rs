//! Wave simulation configuration.
//!
//! Every tunable of the solver lives here so hosts can load it from a RON file
//! instead of relying on compiled-in constants.

use bevy_log::info;
use ron::ser::PrettyConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::Path,
};

use crate::constants::*;
use crate::error::{WaveError, WaveResult};

/// Runtime configuration for a [`crate::WaveSimulation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveSimConfig {
    /// Number of lattice columns (W).
    pub grid_width: usize,
    /// Number of lattice rows (H).
    pub grid_height: usize,
    /// Upper bound for a single unscaled sub-step, in seconds.
    pub max_delta_t: f64,
    /// Scale applied to each sub-step before integration.
    pub animation_speed: f64,
    /// Radius of the initial pulse as a fraction of min(W/2, H/2).
    pub pulse_radius_fraction: f64,
    /// Multiplier on the radial distance inside the pulse profile.
    pub pulse_distance_scale: f64,
    /// Peak depth of the initial pulse.
    pub pulse_amplitude: f64,
    /// Factor converting pressure into vertex z.
    pub height_scale: f64,
    /// Whether per-cell normals and averaged heights are derived each frame.
    pub compute_normals: bool,
    /// Frame delta substituted on the first frame, in seconds.
    pub startup_delta: f64,
}

impl Default for WaveSimConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            max_delta_t: DEFAULT_MAX_DELTA_T,
            animation_speed: DEFAULT_ANIMATION_SPEED,
            pulse_radius_fraction: DEFAULT_PULSE_RADIUS_FRACTION,
            pulse_distance_scale: DEFAULT_PULSE_DISTANCE_SCALE,
            pulse_amplitude: DEFAULT_PULSE_AMPLITUDE,
            height_scale: DEFAULT_HEIGHT_SCALE,
            compute_normals: false,
            startup_delta: DEFAULT_STARTUP_DELTA,
        }
    }
}

impl WaveSimConfig {
    /// Configuration for a custom lattice with every other value at its default.
    pub fn with_grid(mut self, width: usize, height: usize) -> Self {
        self.grid_width = width;
        self.grid_height = height;
        self
    }

    pub fn with_normals(mut self, enabled: bool) -> Self {
        self.compute_normals = enabled;
        self
    }

    /// Checks the configuration before any buffer is allocated.
    pub fn validate(&self) -> WaveResult<()> {
        if self.grid_width < 2 || self.grid_height < 2 {
            return Err(WaveError::InvalidGridSize {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        let positive = [
            ("max_delta_t", self.max_delta_t),
            ("animation_speed", self.animation_speed),
            ("pulse_distance_scale", self.pulse_distance_scale),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(WaveError::InvalidParameter { name, value });
            }
        }

        // Zero is allowed here: it disables the pulse or flattens the mesh.
        let non_negative = [
            ("pulse_radius_fraction", self.pulse_radius_fraction),
            ("startup_delta", self.startup_delta),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(WaveError::InvalidParameter { name, value });
            }
        }

        for (name, value) in [
            ("pulse_amplitude", self.pulse_amplitude),
            ("height_scale", self.height_scale),
        ] {
            if !value.is_finite() {
                return Err(WaveError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }

    /// Loads a configuration from a RON file.
    ///
    /// When the file does not exist, the default configuration is written to
    /// `path` and returned.
    pub fn load_or_create(path: &Path) -> WaveResult<Self> {
        if !path.exists() {
            info!(
                "Wave configuration not found at {}, writing defaults",
                path.display()
            );
            let config = Self::default();
            config.save(path)?;
            return Ok(config);
        }

        let contents = fs::read_to_string(path).map_err(|e| WaveError::io(CONFIG_READ_ERROR, e))?;
        let config: Self = ron::de::from_str(&contents)?;
        config.validate()?;

        info!("Loaded wave configuration from {}", path.display());
        Ok(config)
    }

    /// Writes the configuration as pretty-printed RON.
    pub fn save(&self, path: &Path) -> WaveResult<()> {
        let pretty_config = PrettyConfig::new()
            .with_depth_limit(2)
            .with_separate_tuple_members(true)
            .with_enumerate_arrays(true);

        let serialized = ron::ser::to_string_pretty(self, pretty_config)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| WaveError::io(CONFIG_WRITE_ERROR, e))?;
        }
        let mut file = File::create(path).map_err(|e| WaveError::io(CONFIG_WRITE_ERROR, e))?;
        file.write_all(serialized.as_bytes())
            .map_err(|e| WaveError::io(CONFIG_WRITE_ERROR, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_config_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir()
            .join(format!("fluidwave_config_{}_{}", name, std::process::id()))
            .join("wave.ron")
    }

    #[test]
    fn test_default_matches_reference_values() {
        let config = WaveSimConfig::default();
        assert_eq!(config.grid_width, 50);
        assert_eq!(config.grid_height, 50);
        assert_eq!(config.max_delta_t, 0.01);
        assert_eq!(config.animation_speed, 10.0);
        assert_eq!(config.height_scale, 1.0 / 50.0);
        assert!(!config.compute_normals);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_degenerate_grid() {
        for (w, h) in [(1, 50), (50, 1), (0, 0), (1, 1)] {
            let config = WaveSimConfig::default().with_grid(w, h);
            assert!(
                matches!(config.validate(), Err(WaveError::InvalidGridSize { .. })),
                "{w}x{h} should be rejected"
            );
        }
        assert!(WaveSimConfig::default().with_grid(2, 2).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_step_parameters() {
        let mut config = WaveSimConfig::default();
        config.max_delta_t = 0.0;
        assert!(matches!(
            config.validate(),
            Err(WaveError::InvalidParameter {
                name: "max_delta_t",
                ..
            })
        ));

        let mut config = WaveSimConfig::default();
        config.animation_speed = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = WaveSimConfig::default();
        config.startup_delta = -0.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_create_writes_defaults_then_reads_them_back() {
        let path = temp_config_path("roundtrip");
        let _ = fs::remove_file(&path);

        let created = WaveSimConfig::load_or_create(&path).expect("default config is written");
        assert!(path.exists());
        assert_eq!(created, WaveSimConfig::default());

        let mut custom = WaveSimConfig::default().with_grid(12, 8).with_normals(true);
        custom.animation_speed = 5.0;
        custom.save(&path).expect("config is saved");

        let loaded = WaveSimConfig::load_or_create(&path).expect("config is loaded");
        assert_eq!(loaded, custom);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_uses_defaults_for_missing_fields() {
        let config: WaveSimConfig =
            ron::de::from_str("(grid_width: 20, compute_normals: true)").unwrap();
        assert_eq!(config.grid_width, 20);
        assert_eq!(config.grid_height, DEFAULT_GRID_HEIGHT);
        assert!(config.compute_normals);
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let path = temp_config_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(grid_width: 1)").unwrap();

        let result = WaveSimConfig::load_or_create(&path);
        assert!(matches!(result, Err(WaveError::InvalidGridSize { .. })));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
