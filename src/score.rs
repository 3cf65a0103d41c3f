//! Trigger volume that reports thrown strokes passing through it.

use glam::Vec3;

use crate::draw::{PhysicsState, StrokeId, StrokeStore};
use crate::engine::MeshBackend;

/// Spherical score volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreZone {
    pub center: Vec3,
    pub radius: f32,
}

impl ScoreZone {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns the dynamic strokes that entered the zone since the last check.
    ///
    /// Each stroke scores at most once: its `has_scored` latch is set here and
    /// never cleared.
    pub fn check<B: MeshBackend + ?Sized>(
        &self,
        store: &mut StrokeStore,
        backend: &B,
    ) -> Vec<StrokeId> {
        let mut scored = Vec::new();
        for stroke in store.iter_mut() {
            if stroke.has_scored || !matches!(stroke.physics, PhysicsState::Dynamic { .. }) {
                continue;
            }
            let Some(center) = stroke.geometry().and_then(|g| backend.world_center(g)) else {
                continue;
            };
            if center.distance(self.center) < self.radius {
                stroke.has_scored = true;
                log::info!("Stroke {:?} scored", stroke.id);
                scored.push(stroke.id);
            }
        }
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Color, GeometryBuilder, Stroke};
    use crate::engine::HeadlessEngine;

    fn committed(engine: &mut HeadlessEngine, id: u64, physics: PhysicsState) -> Stroke {
        let mut stroke = Stroke::new(StrokeId(id), Vec3::new(-0.1, 0.0, 0.0), Color::WHITE, 0.05);
        stroke.push_point(Vec3::new(0.1, 0.0, 0.0));
        let handle = GeometryBuilder::default()
            .build(engine, stroke.points(), stroke.color(), stroke.width())
            .unwrap()
            .unwrap();
        stroke.replace_geometry(handle);
        stroke.physics = physics;
        stroke
    }

    #[test]
    fn dynamic_stroke_scores_once() {
        let mut engine = HeadlessEngine::new();
        let mut store = StrokeStore::new(10);
        let dynamic = PhysicsState::Dynamic {
            mass: 0.15,
            velocity: Vec3::ZERO,
        };
        let _ = store.commit(committed(&mut engine, 1, dynamic));
        let zone = ScoreZone::new(Vec3::ZERO, 0.35);

        assert_eq!(zone.check(&mut store, &engine), vec![StrokeId(1)]);
        assert!(zone.check(&mut store, &engine).is_empty());
        assert!(store.get(StrokeId(1)).unwrap().has_scored);
    }

    #[test]
    fn static_and_distant_strokes_do_not_score() {
        let mut engine = HeadlessEngine::new();
        let mut store = StrokeStore::new(10);
        let _ = store.commit(committed(&mut engine, 1, PhysicsState::Static));
        let far = committed(
            &mut engine,
            2,
            PhysicsState::Dynamic {
                mass: 0.15,
                velocity: Vec3::ZERO,
            },
        );
        engine
            .set_translation(far.geometry().unwrap(), Vec3::new(0.0, 5.0, 0.0))
            .unwrap();
        let _ = store.commit(far);

        let zone = ScoreZone::new(Vec3::ZERO, 0.35);
        assert!(zone.check(&mut store, &engine).is_empty());
    }
}
