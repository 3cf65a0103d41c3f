//! The stroke entity.

use glam::Vec3;

use super::color::Color;
use crate::engine::{Engine, GeometryHandle};
use crate::physics::PhysicsAttachments;

/// Session-unique stroke identifier. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StrokeId(pub u64);

/// How a stroke currently takes part in the physics simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PhysicsState {
    /// No body attached (in progress, or held by the grab engine)
    #[default]
    None,
    /// Zero-mass collider that stays where it is
    Static,
    /// Simulated body with the velocity it was released with
    Dynamic { mass: f32, velocity: Vec3 },
}

/// A freehand 3D polyline rendered as a tube.
///
/// The stroke exclusively owns its geometry handle. A stroke with fewer than
/// two points never holds geometry.
#[derive(Debug)]
pub struct Stroke {
    pub id: StrokeId,
    points: Vec<Vec3>,
    color: Color,
    width: f32,
    geometry: Option<GeometryHandle>,
    pub physics: PhysicsState,
    /// Latched by the score zone; never reset
    pub has_scored: bool,
}

impl Stroke {
    /// Starts a stroke at `start` with a fixed color and width.
    pub fn new(id: StrokeId, start: Vec3, color: Color, width: f32) -> Self {
        Self {
            id,
            points: vec![start],
            color,
            width,
            geometry: None,
            physics: PhysicsState::None,
            has_scored: false,
        }
    }

    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn geometry(&self) -> Option<GeometryHandle> {
        self.geometry
    }

    pub fn last_point(&self) -> Option<Vec3> {
        self.points.last().copied()
    }

    /// Whether the stroke has enough points to become a solid.
    pub fn is_committable(&self) -> bool {
        self.points.len() >= 2
    }

    pub(crate) fn push_point(&mut self, point: Vec3) {
        self.points.push(point);
    }

    pub(crate) fn pop_point(&mut self) -> Option<Vec3> {
        self.points.pop()
    }

    /// Installs rebuilt geometry and returns the handle it replaces.
    ///
    /// Geometry is refused for strokes with fewer than two points; the offered
    /// handle is handed straight back in that case.
    pub(crate) fn replace_geometry(&mut self, handle: GeometryHandle) -> Option<GeometryHandle> {
        if !self.is_committable() {
            return Some(handle);
        }
        self.geometry.replace(handle)
    }

    /// Releases physics, then geometry. A second call finds nothing to release.
    pub fn release<E: Engine + ?Sized>(
        &mut self,
        engine: &mut E,
        attachments: &mut PhysicsAttachments,
    ) {
        if let Some(geometry) = self.geometry.take() {
            attachments.detach(engine, geometry);
            engine.dispose_mesh(geometry);
        }
        self.physics = PhysicsState::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::GeometryBuilder;
    use crate::engine::HeadlessEngine;
    use crate::physics::PhysicsKind;

    #[test]
    fn short_stroke_refuses_geometry() {
        let mut engine = HeadlessEngine::new();
        let handle = GeometryBuilder::default()
            .build(&mut engine, &[Vec3::ZERO, Vec3::X], Color::WHITE, 0.05)
            .unwrap()
            .unwrap();

        let mut stroke = Stroke::new(StrokeId(1), Vec3::ZERO, Color::WHITE, 0.05);
        assert_eq!(stroke.replace_geometry(handle), Some(handle));
        assert!(stroke.geometry().is_none());

        stroke.push_point(Vec3::X);
        assert_eq!(stroke.replace_geometry(handle), None);
        assert_eq!(stroke.geometry(), Some(handle));
    }

    #[test]
    fn release_tears_down_once() {
        let mut engine = HeadlessEngine::new();
        let mut attachments = PhysicsAttachments::default();
        let mut stroke = Stroke::new(StrokeId(1), Vec3::ZERO, Color::WHITE, 0.05);
        stroke.push_point(Vec3::X);
        let handle = GeometryBuilder::default()
            .build(&mut engine, stroke.points(), stroke.color(), stroke.width())
            .unwrap()
            .unwrap();
        stroke.replace_geometry(handle);
        attachments
            .attach(&mut engine, handle, PhysicsKind::Static)
            .unwrap();
        stroke.physics = PhysicsState::Static;

        stroke.release(&mut engine, &mut attachments);
        stroke.release(&mut engine, &mut attachments);

        assert_eq!(engine.mesh_totals(), (1, 1));
        assert_eq!(engine.body_totals(), (1, 1));
        assert_eq!(stroke.physics, PhysicsState::None);
        assert!(stroke.geometry().is_none());
    }
}
