//! Data types exchanged with the render/physics backend.

use glam::Vec3;
use thiserror::Error;

use crate::draw::Color;

/// Opaque handle to a renderable solid owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeometryHandle(pub u64);

/// Opaque handle to a rigid body owned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(pub u64);

/// Surface appearance for a stroke mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub diffuse: Color,
    pub emissive: Color,
    pub specular: Color,
}

impl Material {
    /// Stroke material: the stroke color, a dimmed emissive glow, and a grey highlight.
    pub fn for_stroke(color: Color) -> Self {
        Self {
            diffuse: color,
            emissive: color.scale(0.3),
            specular: Color::grey(0.2),
        }
    }
}

/// Rigid body parameters handed to the backend when attaching physics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    /// Zero for immovable (static) bodies
    pub mass: f32,
    pub restitution: f32,
    pub friction: f32,
}

impl BodyDesc {
    pub fn is_dynamic(&self) -> bool {
        self.mass > 0.0
    }
}

/// A pick ray in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
    /// Maximum hit distance along `direction`
    pub length: f32,
}

impl Ray {
    /// Creates an unbounded ray. The direction is normalized.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self::with_length(origin, direction, f32::INFINITY)
    }

    /// Creates a ray that only reports hits within `length` units.
    pub fn with_length(origin: Vec3, direction: Vec3, length: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            length,
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Result of a successful pick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PickHit {
    pub geometry: GeometryHandle,
    pub point: Vec3,
    pub distance: f32,
}

/// Errors reported by a backend or by the physics side-table.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Backend refused to create mesh: {0}")]
    MeshCreation(String),

    #[error("Unknown geometry handle {0:?}")]
    UnknownGeometry(GeometryHandle),

    #[error("Backend refused to create physics body: {0}")]
    BodyCreation(String),

    #[error("Dynamic bodies need a positive mass, got {0}")]
    InvalidMass(f32),

    #[error("Backend error: {0}")]
    Backend(String),
}
