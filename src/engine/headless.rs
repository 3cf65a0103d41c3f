//! In-memory engine used by the CLI demo and the test suite.

use std::collections::HashMap;

use glam::Vec3;

use super::types::{BodyDesc, BodyHandle, EngineError, GeometryHandle, Material, PickHit, Ray};
use super::{MeshBackend, PhysicsBackend};
use crate::draw::TubeMesh;
use crate::util;

#[derive(Debug, Clone)]
struct MeshSlot {
    /// Bounding sphere center in mesh-local space
    center: Vec3,
    radius: f32,
    translation: Vec3,
    material: Material,
    vertex_count: usize,
}

#[derive(Debug, Clone)]
struct BodySlot {
    geometry: GeometryHandle,
    desc: BodyDesc,
    velocity: Vec3,
}

/// Headless render/physics engine.
///
/// Meshes are reduced to bounding spheres for picking and collision. Dynamic
/// bodies are integrated by [`HeadlessEngine::step`] against a flat ground plane.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    meshes: HashMap<GeometryHandle, MeshSlot>,
    bodies: HashMap<BodyHandle, BodySlot>,
    next_id: u64,
    meshes_created: usize,
    meshes_disposed: usize,
    bodies_created: usize,
    bodies_disposed: usize,
    fail_next_mesh: bool,
    fail_next_body: bool,
}

impl HeadlessEngine {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Number of meshes currently alive.
    pub fn live_meshes(&self) -> usize {
        self.meshes.len()
    }

    /// Number of bodies currently alive.
    pub fn live_bodies(&self) -> usize {
        self.bodies.len()
    }

    /// Number of live bodies attached to `geometry`.
    pub fn bodies_for(&self, geometry: GeometryHandle) -> usize {
        self.bodies
            .values()
            .filter(|body| body.geometry == geometry)
            .count()
    }

    /// Total meshes created and disposed over the engine lifetime.
    pub fn mesh_totals(&self) -> (usize, usize) {
        (self.meshes_created, self.meshes_disposed)
    }

    /// Total bodies created and disposed over the engine lifetime.
    pub fn body_totals(&self) -> (usize, usize) {
        (self.bodies_created, self.bodies_disposed)
    }

    pub fn contains_mesh(&self, geometry: GeometryHandle) -> bool {
        self.meshes.contains_key(&geometry)
    }

    pub fn material(&self, geometry: GeometryHandle) -> Option<Material> {
        self.meshes.get(&geometry).map(|mesh| mesh.material)
    }

    pub fn vertex_count(&self, geometry: GeometryHandle) -> Option<usize> {
        self.meshes.get(&geometry).map(|mesh| mesh.vertex_count)
    }

    /// Parameters and current velocity of the body attached to `geometry`.
    pub fn body_state(&self, geometry: GeometryHandle) -> Option<(BodyDesc, Vec3)> {
        self.bodies
            .values()
            .find(|body| body.geometry == geometry)
            .map(|body| (body.desc, body.velocity))
    }

    /// Makes the next `create_mesh` call fail.
    pub fn fail_next_mesh(&mut self) {
        self.fail_next_mesh = true;
    }

    /// Makes the next `create_body` call fail.
    pub fn fail_next_body(&mut self) {
        self.fail_next_body = true;
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Dynamic bodies accelerate under `gravity` and bounce off the plane
    /// `y = ground_height` using their restitution; friction bleeds off
    /// horizontal speed while in contact.
    pub fn step(&mut self, dt: f32, gravity: Vec3, ground_height: f32) {
        if dt <= 0.0 {
            return;
        }

        for body in self.bodies.values_mut() {
            if !body.desc.is_dynamic() {
                continue;
            }
            let Some(mesh) = self.meshes.get_mut(&body.geometry) else {
                continue;
            };

            body.velocity += gravity * dt;
            mesh.translation += body.velocity * dt;

            let lowest = mesh.center.y + mesh.translation.y - mesh.radius;
            if lowest < ground_height {
                mesh.translation.y += ground_height - lowest;
                if body.velocity.y < 0.0 {
                    body.velocity.y = -body.velocity.y * body.desc.restitution;
                }
                let damping = (1.0 - body.desc.friction * dt).max(0.0);
                body.velocity.x *= damping;
                body.velocity.z *= damping;
            }
        }
    }
}

impl MeshBackend for HeadlessEngine {
    fn create_mesh(
        &mut self,
        mesh: &TubeMesh,
        material: &Material,
    ) -> Result<GeometryHandle, EngineError> {
        if std::mem::take(&mut self.fail_next_mesh) {
            return Err(EngineError::MeshCreation("injected failure".to_string()));
        }

        let (center, radius) = mesh.bounding_sphere();
        let handle = GeometryHandle(self.allocate_id());
        self.meshes.insert(
            handle,
            MeshSlot {
                center,
                radius,
                translation: Vec3::ZERO,
                material: *material,
                vertex_count: mesh.positions.len(),
            },
        );
        self.meshes_created += 1;
        Ok(handle)
    }

    fn dispose_mesh(&mut self, handle: GeometryHandle) {
        if self.meshes.remove(&handle).is_some() {
            self.meshes_disposed += 1;
        }
    }

    fn set_translation(
        &mut self,
        handle: GeometryHandle,
        translation: Vec3,
    ) -> Result<(), EngineError> {
        let mesh = self
            .meshes
            .get_mut(&handle)
            .ok_or(EngineError::UnknownGeometry(handle))?;
        mesh.translation = translation;
        Ok(())
    }

    fn translation(&self, handle: GeometryHandle) -> Option<Vec3> {
        self.meshes.get(&handle).map(|mesh| mesh.translation)
    }

    fn world_center(&self, handle: GeometryHandle) -> Option<Vec3> {
        self.meshes
            .get(&handle)
            .map(|mesh| mesh.center + mesh.translation)
    }

    fn pick(&self, ray: &Ray, filter: &dyn Fn(GeometryHandle) -> bool) -> Option<PickHit> {
        self.meshes
            .iter()
            .filter(|(handle, _)| filter(**handle))
            .filter_map(|(handle, mesh)| {
                let center = mesh.center + mesh.translation;
                util::ray_sphere(ray.origin, ray.direction, center, mesh.radius)
                    .filter(|t| *t <= ray.length)
                    .map(|t| PickHit {
                        geometry: *handle,
                        point: ray.at(t),
                        distance: t,
                    })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

impl PhysicsBackend for HeadlessEngine {
    fn create_body(
        &mut self,
        geometry: GeometryHandle,
        desc: BodyDesc,
    ) -> Result<BodyHandle, EngineError> {
        if std::mem::take(&mut self.fail_next_body) {
            return Err(EngineError::BodyCreation("injected failure".to_string()));
        }
        if !self.meshes.contains_key(&geometry) {
            return Err(EngineError::UnknownGeometry(geometry));
        }

        let handle = BodyHandle(self.allocate_id());
        self.bodies.insert(
            handle,
            BodySlot {
                geometry,
                desc,
                velocity: Vec3::ZERO,
            },
        );
        self.bodies_created += 1;
        Ok(handle)
    }

    fn dispose_body(&mut self, body: BodyHandle) {
        if self.bodies.remove(&body).is_some() {
            self.bodies_disposed += 1;
        }
    }

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3) -> Result<(), EngineError> {
        let slot = self
            .bodies
            .get_mut(&body)
            .ok_or_else(|| EngineError::Backend(format!("unknown body {body:?}")))?;
        slot.velocity = velocity;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Color, TubeMesh};

    fn straight_tube() -> TubeMesh {
        TubeMesh::sweep(&[Vec3::new(-1.0, 1.0, 0.0), Vec3::new(1.0, 1.0, 0.0)], 0.1, 8)
            .expect("two distinct points")
    }

    #[test]
    fn pick_returns_nearest_hit_and_respects_filter() {
        let mut engine = HeadlessEngine::new();
        let material = Material::for_stroke(Color::WHITE);
        let near = engine.create_mesh(&straight_tube(), &material).unwrap();
        let far = engine.create_mesh(&straight_tube(), &material).unwrap();
        engine
            .set_translation(far, Vec3::new(0.0, 0.0, -5.0))
            .unwrap();

        let ray = Ray::new(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z);
        let hit = engine.pick(&ray, &|_| true).unwrap();
        assert_eq!(hit.geometry, near);

        let hit = engine.pick(&ray, &|handle| handle != near).unwrap();
        assert_eq!(hit.geometry, far);

        let short = Ray::with_length(Vec3::new(0.0, 1.0, 5.0), Vec3::NEG_Z, 1.0);
        assert!(engine.pick(&short, &|_| true).is_none());
    }

    #[test]
    fn dynamic_body_falls_and_stops_at_ground() {
        let mut engine = HeadlessEngine::new();
        let short = TubeMesh::sweep(&[Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.2, 2.0, 0.0)], 0.05, 8)
            .unwrap();
        let mesh = engine
            .create_mesh(&short, &Material::for_stroke(Color::WHITE))
            .unwrap();
        engine
            .create_body(
                mesh,
                BodyDesc {
                    mass: 0.15,
                    restitution: 0.0,
                    friction: 0.5,
                },
            )
            .unwrap();

        for _ in 0..600 {
            engine.step(1.0 / 60.0, Vec3::new(0.0, -3.0, 0.0), 0.0);
        }

        let center = engine.world_center(mesh).unwrap();
        assert!(center.y >= 0.0);
        assert!(center.y < 1.0, "body should have fallen, y = {}", center.y);
    }

    #[test]
    fn static_body_does_not_move() {
        let mut engine = HeadlessEngine::new();
        let mesh = engine
            .create_mesh(&straight_tube(), &Material::for_stroke(Color::WHITE))
            .unwrap();
        engine
            .create_body(
                mesh,
                BodyDesc {
                    mass: 0.0,
                    restitution: 0.3,
                    friction: 0.5,
                },
            )
            .unwrap();

        engine.step(1.0, Vec3::new(0.0, -3.0, 0.0), 0.0);
        assert_eq!(engine.translation(mesh), Some(Vec3::ZERO));
    }

    #[test]
    fn injected_failures_fire_once() {
        let mut engine = HeadlessEngine::new();
        engine.fail_next_mesh();
        let material = Material::for_stroke(Color::WHITE);
        assert!(engine.create_mesh(&straight_tube(), &material).is_err());
        assert!(engine.create_mesh(&straight_tube(), &material).is_ok());
    }
}
