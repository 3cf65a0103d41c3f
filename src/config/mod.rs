//! Configuration file support for artplay.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/artplay/config.toml`. Settings include the starting brush,
//! throw tuning, physics parameters, controller tuning, and keybindings.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{ControllerConfig, DrawingConfig, PhysicsConfig, ScoreConfig, ThrowConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Narrowest and widest tube radius a brush can take.
pub const MIN_WIDTH: f32 = 0.002;
pub const MAX_WIDTH: f32 = 0.05;

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "cyan"
/// default_width = 0.02
/// max_strokes = 50
///
/// [throw]
/// scale = 40.0
/// physics_on_drop = true
///
/// [physics]
/// gravity = [0.0, -9.81, 0.0]
///
/// [keybindings]
/// undo = ["Ctrl+Z", "U"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush defaults, sampling and tessellation
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Throw velocity estimation
    #[serde(default)]
    pub throw: ThrowConfig,

    /// Rigid body parameters and world gravity
    #[serde(default)]
    pub physics: PhysicsConfig,

    /// Immersive controller tuning
    #[serde(default)]
    pub controller: ControllerConfig,

    /// Score volume
    #[serde(default)]
    pub score: ScoreConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_width`: 0.002 - 0.05
    /// - `width_step`: 0.0005 - 0.05
    /// - `smoothing_distance`: 0.0 - 0.5
    /// - `max_strokes`: 1 - 10000
    /// - `tessellation`: 3 - 64
    /// - `throw.history_capacity`: 1 - 64, `throw.window`: 1 - history_capacity
    /// - `throw.dynamic_mass`: 0.01 - 10.0
    /// - `physics.restitution`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        clamp_f32(
            "default_width",
            &mut self.drawing.default_width,
            MIN_WIDTH,
            MAX_WIDTH,
        );
        clamp_f32("width_step", &mut self.drawing.width_step, 0.0005, 0.05);
        clamp_f32(
            "smoothing_distance",
            &mut self.drawing.smoothing_distance,
            0.0,
            0.5,
        );

        if !(1..=10_000).contains(&self.drawing.max_strokes) {
            log::warn!(
                "Invalid max_strokes {}, clamping to 1-10000 range",
                self.drawing.max_strokes
            );
            self.drawing.max_strokes = self.drawing.max_strokes.clamp(1, 10_000);
        }

        if !(3..=64).contains(&self.drawing.tessellation) {
            log::warn!(
                "Invalid tessellation {}, clamping to 3-64 range",
                self.drawing.tessellation
            );
            self.drawing.tessellation = self.drawing.tessellation.clamp(3, 64);
        }

        if !(1..=64).contains(&self.throw.history_capacity) {
            log::warn!(
                "Invalid throw history_capacity {}, clamping to 1-64 range",
                self.throw.history_capacity
            );
            self.throw.history_capacity = self.throw.history_capacity.clamp(1, 64);
        }

        // Window depends on the (already clamped) capacity
        if !(1..=self.throw.history_capacity).contains(&self.throw.window) {
            log::warn!(
                "Invalid throw window {}, clamping to 1-{} range",
                self.throw.window,
                self.throw.history_capacity
            );
            self.throw.window = self.throw.window.clamp(1, self.throw.history_capacity);
        }

        clamp_f32("throw scale", &mut self.throw.scale, 0.0, 1000.0);
        clamp_f32(
            "noise_threshold",
            &mut self.throw.noise_threshold,
            0.0,
            1000.0,
        );
        clamp_f32("dynamic_mass", &mut self.throw.dynamic_mass, 0.01, 10.0);

        clamp_f32("restitution", &mut self.physics.restitution, 0.0, 1.0);
        clamp_f32("friction", &mut self.physics.friction, 0.0, 10.0);

        clamp_f32("tip_offset", &mut self.controller.tip_offset, 0.0, 1.0);
        clamp_f32("dead_zone", &mut self.controller.dead_zone, 0.0, 0.95);
        clamp_f32(
            "thumbstick_threshold",
            &mut self.controller.thumbstick_threshold,
            0.1,
            1.0,
        );
        clamp_f32("pick_length", &mut self.controller.pick_length, 0.1, 100.0);

        if self.score.radius <= 0.0 || !self.score.radius.is_finite() {
            log::warn!(
                "Invalid score radius {:.3}, falling back to 0.35",
                self.score.radius
            );
            self.score.radius = 0.35;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/artplay/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("artplay");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Serializes the effective configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_f32(name: &str, value: &mut f32, min: f32, max: f32) {
    let current = *value;
    if !(min..=max).contains(&current) {
        log::warn!(
            "Invalid {} {:.4}, clamping to {}-{} range",
            name,
            current,
            min,
            max
        );
        // NaN compares false everywhere; fall back to the lower bound
        *value = if current.is_nan() {
            min
        } else {
            current.clamp(min, max)
        };
    }
}
