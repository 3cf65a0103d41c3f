//! Physics attachment side-table.
//!
//! Maps each stroke geometry to the single rigid body currently attached to it.
//! Attaching again replaces the previous body instead of stacking a second one.

use std::collections::HashMap;

use glam::Vec3;

use crate::engine::{BodyDesc, BodyHandle, EngineError, GeometryHandle, PhysicsBackend};

pub const DEFAULT_RESTITUTION: f32 = 0.3;
pub const DEFAULT_FRICTION: f32 = 0.5;

/// What kind of body to attach.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhysicsKind {
    /// Immovable collider (mass zero)
    Static,
    /// Simulated body; `mass` must be positive
    Dynamic { mass: f32 },
}

/// Side-table from geometry to physics body.
#[derive(Debug)]
pub struct PhysicsAttachments {
    bodies: HashMap<GeometryHandle, BodyHandle>,
    restitution: f32,
    friction: f32,
}

impl Default for PhysicsAttachments {
    fn default() -> Self {
        Self::new(DEFAULT_RESTITUTION, DEFAULT_FRICTION)
    }
}

impl PhysicsAttachments {
    pub fn new(restitution: f32, friction: f32) -> Self {
        Self {
            bodies: HashMap::new(),
            restitution,
            friction,
        }
    }

    /// Attaches a body to `geometry`, disposing any body already attached.
    ///
    /// The mass is validated before anything is torn down, so a rejected
    /// dynamic attach leaves an existing attachment in place.
    pub fn attach<B: PhysicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        geometry: GeometryHandle,
        kind: PhysicsKind,
    ) -> Result<BodyHandle, EngineError> {
        let mass = match kind {
            PhysicsKind::Static => 0.0,
            PhysicsKind::Dynamic { mass } if mass > 0.0 && mass.is_finite() => mass,
            PhysicsKind::Dynamic { mass } => return Err(EngineError::InvalidMass(mass)),
        };

        self.detach(backend, geometry);

        let body = backend.create_body(
            geometry,
            BodyDesc {
                mass,
                restitution: self.restitution,
                friction: self.friction,
            },
        )?;
        self.bodies.insert(geometry, body);
        log::debug!("Attached {:?} body {:?} to {:?}", kind, body, geometry);
        Ok(body)
    }

    /// Removes the body attached to `geometry`. Returns whether one existed.
    pub fn detach<B: PhysicsBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        geometry: GeometryHandle,
    ) -> bool {
        match self.bodies.remove(&geometry) {
            Some(body) => {
                backend.dispose_body(body);
                true
            }
            None => false,
        }
    }

    pub fn set_linear_velocity<B: PhysicsBackend + ?Sized>(
        &self,
        backend: &mut B,
        geometry: GeometryHandle,
        velocity: Vec3,
    ) -> Result<(), EngineError> {
        let body = self
            .bodies
            .get(&geometry)
            .copied()
            .ok_or(EngineError::UnknownGeometry(geometry))?;
        backend.set_linear_velocity(body, velocity)
    }

    pub fn body_for(&self, geometry: GeometryHandle) -> Option<BodyHandle> {
        self.bodies.get(&geometry).copied()
    }

    pub fn is_attached(&self, geometry: GeometryHandle) -> bool {
        self.bodies.contains_key(&geometry)
    }

    pub fn attachment_count(&self) -> usize {
        self.bodies.len()
    }
}
