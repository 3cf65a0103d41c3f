//! Continuous controller sampling: brush tip, thumbstick width steps, locomotion.

use glam::{Vec2, Vec3};

use super::events::ControllerPose;
use crate::config::ControllerConfig;
use crate::util;

/// Direction of a thumbstick-driven brush width change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidthStep {
    Increase,
    Decrease,
}

/// Per-tick controller state.
///
/// Holds the last thumbstick deflection and the time of the last width step so
/// that a held stick steps the width once per debounce window.
#[derive(Debug, Clone)]
pub struct ControllerSampler {
    tip_offset: f32,
    dead_zone: f32,
    move_speed: f32,
    threshold: f32,
    /// Seconds between width steps
    debounce: f64,
    pick_length: f32,
    axes: Vec2,
    last_step: Option<f64>,
}

impl Default for ControllerSampler {
    fn default() -> Self {
        Self::from_config(&ControllerConfig::default())
    }
}

impl ControllerSampler {
    pub fn from_config(config: &ControllerConfig) -> Self {
        Self {
            tip_offset: config.tip_offset,
            dead_zone: config.dead_zone,
            move_speed: config.move_speed,
            threshold: config.thumbstick_threshold,
            debounce: config.thumbstick_debounce_ms as f64 / 1000.0,
            pick_length: config.pick_length,
            axes: Vec2::ZERO,
            last_step: None,
        }
    }

    /// Brush tip: a fixed distance ahead of the controller.
    pub fn tip_position(&self, pose: &ControllerPose) -> Vec3 {
        pose.position + pose.forward * self.tip_offset
    }

    /// Reach of the grip pick ray.
    pub fn pick_length(&self) -> f32 {
        self.pick_length
    }

    /// Records a thumbstick deflection at time `now` (seconds).
    ///
    /// Returns a width step when the vertical deflection passes the threshold
    /// and the previous step is older than the debounce window.
    pub fn set_thumbstick(&mut self, axes: Vec2, now: f64) -> Option<WidthStep> {
        self.axes = axes;

        if self
            .last_step
            .is_some_and(|last| now - last < self.debounce)
        {
            return None;
        }
        if axes.y.abs() <= self.threshold {
            return None;
        }

        self.last_step = Some(now);
        let step = if axes.y > 0.0 {
            WidthStep::Increase
        } else {
            WidthStep::Decrease
        };
        log::debug!("Thumbstick width step {:?} at {:.3}s", step, now);
        Some(step)
    }

    /// Camera translation for this tick from the current thumbstick deflection.
    ///
    /// Pushing forward (negative y) moves along the horizontal look direction,
    /// sideways deflection strafes. Each axis inside the dead zone contributes
    /// nothing.
    pub fn locomotion(&self, camera_forward: Vec3) -> Vec3 {
        let forward = util::flatten_horizontal(camera_forward);
        let mut translation = Vec3::ZERO;

        if self.axes.y.abs() > self.dead_zone {
            translation += forward * (-self.axes.y * self.move_speed);
        }
        if self.axes.x.abs() > self.dead_zone {
            let right = Vec3::Y.cross(camera_forward).normalize_or_zero();
            translation += right * (self.axes.x * self.move_speed);
        }
        translation
    }
}
