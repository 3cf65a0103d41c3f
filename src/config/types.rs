//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Stroke authoring settings.
///
/// Controls the brush a session starts with and how strokes are sampled and
/// tessellated. Width and color can be changed at runtime with keybindings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Starting stroke color - a palette name, a palette index, or `[r, g, b]` (0-255)
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Starting tube radius in world units (valid range: 0.002 - 0.05)
    #[serde(default = "default_width")]
    pub default_width: f32,

    /// Radius change per width keypress or thumbstick flick
    #[serde(default = "default_width_step")]
    pub width_step: f32,

    /// Minimum distance between accepted stroke points (valid range: 0.0 - 0.5)
    #[serde(default = "default_smoothing_distance")]
    pub smoothing_distance: f32,

    /// Maximum number of committed strokes kept; the oldest is evicted beyond this
    #[serde(default = "default_max_strokes")]
    pub max_strokes: usize,

    /// Segments around the tube circumference (valid range: 3 - 64)
    #[serde(default = "default_tessellation")]
    pub tessellation: u32,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_width: default_width(),
            width_step: default_width_step(),
            smoothing_distance: default_smoothing_distance(),
            max_strokes: default_max_strokes(),
            tessellation: default_tessellation(),
        }
    }
}

/// Throw velocity estimation.
///
/// The release velocity is the sum of the last `window` motion deltas
/// multiplied by `scale`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ThrowConfig {
    /// Multiplier applied to the summed deltas
    #[serde(default = "default_throw_scale")]
    pub scale: f32,

    /// Number of most recent motion samples summed at release
    #[serde(default = "default_throw_window")]
    pub window: usize,

    /// Motion samples kept while a stroke is held
    #[serde(default = "default_history_capacity")]
    pub history_capacity: usize,

    /// Releases slower than this drop the stroke in place as a static body
    #[serde(default = "default_noise_threshold")]
    pub noise_threshold: f32,

    /// Mass of thrown strokes
    #[serde(default = "default_dynamic_mass")]
    pub dynamic_mass: f32,

    /// Whether fast releases become dynamic bodies at all
    #[serde(default = "default_physics_on_drop")]
    pub physics_on_drop: bool,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            scale: default_throw_scale(),
            window: default_throw_window(),
            history_capacity: default_history_capacity(),
            noise_threshold: default_noise_threshold(),
            dynamic_mass: default_dynamic_mass(),
            physics_on_drop: default_physics_on_drop(),
        }
    }
}

/// Rigid body parameters and the simulated world.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PhysicsConfig {
    /// Bounciness of stroke bodies (0.0 - 1.0)
    #[serde(default = "default_restitution")]
    pub restitution: f32,

    /// Surface friction of stroke bodies
    #[serde(default = "default_friction")]
    pub friction: f32,

    /// Gravity vector in world units per second squared
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 3],

    /// Height of the ground plane
    #[serde(default = "default_ground_height")]
    pub ground_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            restitution: default_restitution(),
            friction: default_friction(),
            gravity: default_gravity(),
            ground_height: default_ground_height(),
        }
    }
}

/// Immersive controller tuning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ControllerConfig {
    /// Distance from the controller origin to the brush tip along its forward axis
    #[serde(default = "default_tip_offset")]
    pub tip_offset: f32,

    /// Thumbstick deflection ignored for locomotion
    #[serde(default = "default_dead_zone")]
    pub dead_zone: f32,

    /// Locomotion distance per tick at full deflection
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,

    /// Vertical deflection needed to step the brush width
    #[serde(default = "default_thumbstick_threshold")]
    pub thumbstick_threshold: f32,

    /// Minimum time between two width steps
    #[serde(default = "default_thumbstick_debounce_ms")]
    pub thumbstick_debounce_ms: u64,

    /// Maximum grip pick distance in world units
    #[serde(default = "default_pick_length")]
    pub pick_length: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            tip_offset: default_tip_offset(),
            dead_zone: default_dead_zone(),
            move_speed: default_move_speed(),
            thumbstick_threshold: default_thumbstick_threshold(),
            thumbstick_debounce_ms: default_thumbstick_debounce_ms(),
            pick_length: default_pick_length(),
        }
    }
}

/// Score volume (the hoop).
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ScoreConfig {
    /// Check thrown strokes against the score volume every tick
    #[serde(default)]
    pub enabled: bool,

    /// Center of the score volume
    #[serde(default = "default_score_center")]
    pub center: [f32; 3],

    /// Radius of the score volume
    #[serde(default = "default_score_radius")]
    pub radius: f32,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            center: default_score_center(),
            radius: default_score_radius(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_width() -> f32 {
    0.05
}

fn default_width_step() -> f32 {
    0.005
}

fn default_smoothing_distance() -> f32 {
    0.01
}

fn default_max_strokes() -> usize {
    100
}

fn default_tessellation() -> u32 {
    8
}

fn default_throw_scale() -> f32 {
    50.0
}

fn default_throw_window() -> usize {
    4
}

fn default_history_capacity() -> usize {
    8
}

fn default_noise_threshold() -> f32 {
    1.0
}

fn default_dynamic_mass() -> f32 {
    0.15
}

fn default_physics_on_drop() -> bool {
    true
}

fn default_restitution() -> f32 {
    0.3
}

fn default_friction() -> f32 {
    0.5
}

fn default_gravity() -> [f32; 3] {
    [0.0, -3.0, 0.0]
}

fn default_ground_height() -> f32 {
    0.0
}

fn default_tip_offset() -> f32 {
    0.05
}

fn default_dead_zone() -> f32 {
    0.15
}

fn default_move_speed() -> f32 {
    0.05
}

fn default_thumbstick_threshold() -> f32 {
    0.9
}

fn default_thumbstick_debounce_ms() -> u64 {
    200
}

fn default_pick_length() -> f32 {
    3.0
}

fn default_score_center() -> [f32; 3] {
    [0.0, 2.5, -3.0]
}

fn default_score_radius() -> f32 {
    0.35
}
