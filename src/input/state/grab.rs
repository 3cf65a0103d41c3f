//! Grab-and-throw: holds one stroke, samples its motion, throws it on release.

use std::collections::VecDeque;

use glam::Vec3;

use crate::config::ThrowConfig;
use crate::draw::{PhysicsState, StrokeId, StrokeStore};
use crate::engine::{Engine, EngineError, GeometryHandle, MeshBackend, PickHit};
use crate::physics::{PhysicsAttachments, PhysicsKind};

/// One motion sample of a held stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub delta: Vec3,
    /// Seconds
    pub timestamp: f64,
}

/// Bounded ring buffer of motion samples; the oldest sample is dropped when full.
#[derive(Debug, Clone)]
pub struct MotionHistory {
    samples: VecDeque<MotionSample>,
    capacity: usize,
}

impl MotionHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, delta: Vec3, timestamp: f64) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(MotionSample { delta, timestamp });
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Sum of the deltas of the newest `window` samples (fewer if the history is shorter).
    pub fn recent_sum(&self, window: usize) -> Vec3 {
        self.samples.iter().rev().take(window).map(|s| s.delta).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MotionSample> {
        self.samples.iter()
    }
}

/// Tuning for the release velocity estimate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowSettings {
    pub scale: f32,
    pub window: usize,
    pub history_capacity: usize,
    pub noise_threshold: f32,
    pub dynamic_mass: f32,
}

impl Default for ThrowSettings {
    fn default() -> Self {
        Self::from_config(&ThrowConfig::default())
    }
}

impl ThrowSettings {
    pub fn from_config(config: &ThrowConfig) -> Self {
        Self {
            scale: config.scale,
            window: config.window,
            history_capacity: config.history_capacity,
            noise_threshold: config.noise_threshold,
            dynamic_mass: config.dynamic_mass,
        }
    }

    /// Summed recent deltas, scaled.
    pub fn velocity(&self, history: &MotionHistory) -> Vec3 {
        history.recent_sum(self.window) * self.scale
    }
}

/// State of the stroke currently held.
#[derive(Debug, Clone)]
pub struct GrabSession {
    pub held: StrokeId,
    geometry: GeometryHandle,
    /// Viewpoint-to-hit distance at grab time
    grab_distance: f32,
    last_position: Vec3,
    /// Stroke translation relative to the input anchor (pick point or controller)
    anchor_offset: Vec3,
    history: MotionHistory,
}

impl GrabSession {
    pub fn geometry(&self) -> GeometryHandle {
        self.geometry
    }

    pub fn grab_distance(&self) -> f32 {
        self.grab_distance
    }

    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    pub fn history(&self) -> &MotionHistory {
        &self.history
    }
}

/// Result of releasing a held stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Release {
    pub id: StrokeId,
    /// Launch velocity; zero when the stroke was set down as static
    pub velocity: Vec3,
    pub dynamic: bool,
}

/// Point `distance` units along a ray. Keeps a dragged stroke at constant depth.
pub fn project_at_distance(origin: Vec3, direction: Vec3, distance: f32) -> Vec3 {
    origin + direction.normalize_or_zero() * distance
}

/// Grab-and-throw engine: `Empty` or `Holding` one stroke.
#[derive(Debug, Default)]
pub struct GrabEngine {
    session: Option<GrabSession>,
    settings: ThrowSettings,
}

impl GrabEngine {
    pub fn new(settings: ThrowSettings) -> Self {
        Self {
            session: None,
            settings,
        }
    }

    pub fn settings(&self) -> &ThrowSettings {
        &self.settings
    }

    pub fn is_holding(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&GrabSession> {
        self.session.as_ref()
    }

    pub fn held(&self) -> Option<StrokeId> {
        self.session.as_ref().map(|s| s.held)
    }

    pub fn grab_distance(&self) -> Option<f32> {
        self.session.as_ref().map(|s| s.grab_distance)
    }

    /// Picks up the committed stroke owning `hit.geometry`.
    ///
    /// The stroke's physics body is detached for as long as it is held.
    /// `anchor` is the input position the stroke should follow (the hit point
    /// for pointer drags, the controller position for grip grabs).
    pub fn try_grab<E: Engine + ?Sized>(
        &mut self,
        engine: &mut E,
        attachments: &mut PhysicsAttachments,
        store: &mut StrokeStore,
        hit: &PickHit,
        viewpoint: Vec3,
        anchor: Vec3,
    ) -> Option<StrokeId> {
        if self.session.is_some() {
            return None;
        }
        let id = store.find_by_geometry(hit.geometry)?;
        let position = engine.translation(hit.geometry)?;
        let stroke = store.get_mut(id)?;

        attachments.detach(engine, hit.geometry);
        stroke.physics = PhysicsState::None;

        let grab_distance = viewpoint.distance(hit.point);
        self.session = Some(GrabSession {
            held: id,
            geometry: hit.geometry,
            grab_distance,
            last_position: position,
            anchor_offset: position - anchor,
            history: MotionHistory::new(self.settings.history_capacity),
        });
        log::debug!("Grabbed {:?} at distance {:.3}", id, grab_distance);
        Some(id)
    }

    /// Stroke position that keeps the grab offset relative to `anchor`.
    pub fn target_for_anchor(&self, anchor: Vec3) -> Option<Vec3> {
        self.session.as_ref().map(|s| anchor + s.anchor_offset)
    }

    /// Moves the held stroke to `position` and records the motion sample.
    pub fn move_to<B: MeshBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        position: Vec3,
        now: f64,
    ) -> Result<(), EngineError> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        backend.set_translation(session.geometry, position)?;
        session
            .history
            .push(position - session.last_position, now);
        session.last_position = position;
        Ok(())
    }

    /// Lets go of the held stroke.
    ///
    /// A release faster than the noise threshold with `physics_on_drop` set
    /// throws the stroke as a dynamic body; anything else sets it down as a
    /// static one. Returns `Ok(None)` when nothing was held.
    pub fn release<E: Engine + ?Sized>(
        &mut self,
        engine: &mut E,
        attachments: &mut PhysicsAttachments,
        store: &mut StrokeStore,
        physics_on_drop: bool,
    ) -> Result<Option<Release>, EngineError> {
        let Some(session) = self.session.take() else {
            return Ok(None);
        };
        let Some(stroke) = store.get_mut(session.held) else {
            log::warn!("Held stroke {:?} vanished before release", session.held);
            return Ok(None);
        };

        let estimate = self.settings.velocity(&session.history);
        let dynamic = physics_on_drop && estimate.length() > self.settings.noise_threshold;

        let release = if dynamic {
            let mass = self.settings.dynamic_mass;
            attachments.attach(engine, session.geometry, PhysicsKind::Dynamic { mass })?;
            stroke.physics = PhysicsState::Dynamic {
                mass,
                velocity: estimate,
            };
            attachments.set_linear_velocity(engine, session.geometry, estimate)?;
            Release {
                id: session.held,
                velocity: estimate,
                dynamic: true,
            }
        } else {
            attachments.attach(engine, session.geometry, PhysicsKind::Static)?;
            stroke.physics = PhysicsState::Static;
            Release {
                id: session.held,
                velocity: Vec3::ZERO,
                dynamic: false,
            }
        };

        log::debug!(
            "Released {:?}: estimate {:?} from {} samples",
            release.id,
            estimate,
            session.history.len()
        );
        Ok(Some(release))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_drops_oldest_beyond_capacity() {
        let mut history = MotionHistory::new(8);
        for i in 0..10 {
            history.push(Vec3::splat(i as f32), i as f64);
        }
        assert_eq!(history.len(), 8);
        assert_eq!(history.iter().next().unwrap().timestamp, 2.0);
    }

    #[test]
    fn recent_sum_uses_newest_samples_only() {
        let mut history = MotionHistory::new(8);
        history.push(Vec3::new(10.0, 0.0, 0.0), 0.0);
        for i in 1..=4 {
            history.push(Vec3::new(0.0, 0.0, 0.5), i as f64);
        }
        assert_eq!(history.recent_sum(4), Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(history.recent_sum(100), Vec3::new(10.0, 0.0, 2.0));
        assert_eq!(MotionHistory::new(8).recent_sum(4), Vec3::ZERO);
    }

    #[test]
    fn velocity_is_scaled_sum() {
        let settings = ThrowSettings::default();
        let mut history = MotionHistory::new(settings.history_capacity);
        for i in 0..4 {
            history.push(Vec3::new(0.0, 0.0, 0.5), i as f64);
        }
        assert_eq!(settings.velocity(&history), Vec3::new(0.0, 0.0, 100.0));
    }

    #[test]
    fn project_at_distance_normalizes_direction() {
        let p = project_at_distance(Vec3::ONE, Vec3::new(0.0, 0.0, -4.0), 2.0);
        assert_eq!(p, Vec3::new(1.0, 1.0, -1.0));
    }

    #[test]
    fn idle_engine_ignores_move_and_release() {
        use crate::engine::HeadlessEngine;

        let mut engine = HeadlessEngine::new();
        let mut attachments = PhysicsAttachments::default();
        let mut store = StrokeStore::default();
        let mut grab = GrabEngine::default();

        grab.move_to(&mut engine, Vec3::ONE, 0.0).unwrap();
        let released = grab
            .release(&mut engine, &mut attachments, &mut store, true)
            .unwrap();
        assert!(released.is_none());
        assert_eq!(grab.target_for_anchor(Vec3::ZERO), None);
    }
}
