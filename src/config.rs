use crate::error::ConfigurationError;
use crate::physics::body::BodySpec;
use crate::physics::gravity::UpdateOrder;
use crate::physics::integrators::IntegratorType;
use crate::physics::math::{DEFAULT_SOFTENING, Scalar};
use crate::physics::scenario::ScenarioPreset;
use bevy::log::{info, warn};
use bevy::prelude::Resource;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Prefix of environment variables that override configuration values,
/// e.g. `SPACESIM__PHYSICS__TIME_MULTIPLIER=1e6`
pub const ENVIRONMENT_PREFIX: &str = "SPACESIM";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub physics: PhysicsConfig,
    pub telemetry: TelemetryConfig,
    pub view: ViewConfig,
    pub scenario: ScenarioConfig,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Simulated seconds per sub-step before the multiplier is applied
    pub base_time_step: Scalar,
    pub time_multiplier: Scalar,
    pub substeps_per_frame: usize,
    pub softening: Scalar,
    pub update_order: UpdateOrder,
    pub integrator: IntegratorType,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            base_time_step: 1.0 / 240.0,
            time_multiplier: 2e6,
            substeps_per_frame: 4,
            softening: DEFAULT_SOFTENING,
            update_order: UpdateOrder::default(),
            integrator: IntegratorType::default(),
        }
    }
}

impl PhysicsConfig {
    /// Simulated seconds covered by one integrator call
    pub fn sub_step(&self) -> Scalar {
        self.base_time_step * self.time_multiplier
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TelemetryConfig {
    /// Number of frame-time samples kept for the chart
    pub capacity: usize,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self { capacity: 256 }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    /// Pixels per meter
    pub zoom: f32,
    /// Zoom multiplier applied per unit of zoom input
    pub zoom_factor: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    /// Pixels per second while a pan key is held
    pub pan_speed: f32,
    pub chart_width: f32,
    pub chart_height: f32,
    pub label_box_size: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom: 1.5e-10,
            zoom_factor: 1.1,
            min_zoom: 1e-13,
            max_zoom: 1e-5,
            pan_speed: 400.0,
            chart_width: 256.0,
            chart_height: 80.0,
            label_box_size: 15.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ScenarioConfig {
    pub preset: ScenarioPreset,
    /// Replaces the preset when present
    pub bodies: Option<Vec<BodySpec>>,
}

impl ScenarioConfig {
    pub fn bodies(&self) -> Vec<BodySpec> {
        match &self.bodies {
            Some(bodies) => bodies.clone(),
            None => self.preset.bodies(),
        }
    }
}

impl SimulationConfig {
    /// Location of the per-user configuration file
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "spacesim").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load the per-user configuration, falling back to defaults
    pub fn load_from_user_config() -> Self {
        match Self::user_config_path() {
            Some(path) => Self::load_or_default(path),
            None => {
                info!("No configuration directory available. Using defaults.");
                Self::default()
            }
        }
    }

    /// Load configuration from a file, falling back to defaults if the file doesn't exist
    ///
    /// Environment overrides apply whether or not the file exists.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let exists = path.exists();

        match Self::load_layered(path, false) {
            Ok(config) if exists => {
                info!("Loaded configuration from {}", path.display());
                config
            }
            Ok(config) => {
                info!("Config file {} not found. Using defaults.", path.display());
                config
            }
            Err(e) => {
                warn!(
                    "Failed to parse config file {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Read `path` as TOML with `SPACESIM__SECTION__KEY` environment overrides
    ///
    /// The file must exist.
    pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
        Self::load_layered(path, true)
    }

    fn load_layered(path: &Path, required: bool) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(
                config::File::from(path)
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENVIRONMENT_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Parse a TOML document without consulting files or the environment
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let physics = &self.physics;
        let sub_step = physics.sub_step();
        if !(sub_step.is_finite() && sub_step > 0.0) {
            return Err(ConfigurationError::InvalidParameter {
                name: "physics.base_time_step * physics.time_multiplier",
                reason: format!("sub-step must be a positive finite number of seconds, got {sub_step}"),
            });
        }
        if physics.substeps_per_frame == 0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "physics.substeps_per_frame",
                reason: "at least one sub-step per frame is required".into(),
            });
        }
        if !(physics.softening.is_finite() && physics.softening >= 0.0) {
            return Err(ConfigurationError::InvalidParameter {
                name: "physics.softening",
                reason: format!("must be finite and non-negative, got {}", physics.softening),
            });
        }
        if self.telemetry.capacity == 0 {
            return Err(ConfigurationError::InvalidParameter {
                name: "telemetry.capacity",
                reason: "must be greater than zero".into(),
            });
        }
        let view = &self.view;
        if !(view.zoom_factor.is_finite() && view.zoom_factor > 1.0) {
            return Err(ConfigurationError::InvalidParameter {
                name: "view.zoom_factor",
                reason: format!("must be a finite number above 1, got {}", view.zoom_factor),
            });
        }
        if !(view.min_zoom > 0.0 && view.min_zoom <= view.max_zoom) {
            return Err(ConfigurationError::InvalidParameter {
                name: "view.min_zoom",
                reason: format!(
                    "must be positive and not above view.max_zoom ({} > {})",
                    view.min_zoom, view.max_zoom
                ),
            });
        }
        Ok(())
    }
}
