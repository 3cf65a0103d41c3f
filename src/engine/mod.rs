//! Boundary between the stroke core and the external render/physics engine.
//!
//! The core never talks to a concrete engine. It consumes two small traits:
//! - [`MeshBackend`]: mesh allocation, transforms, and ray picking
//! - [`PhysicsBackend`]: rigid body creation and velocity control
//!
//! [`HeadlessEngine`] implements both in memory; the CLI demo and the tests run
//! against it.

pub mod headless;
pub mod types;

pub use headless::HeadlessEngine;
pub use types::{BodyDesc, BodyHandle, EngineError, GeometryHandle, Material, PickHit, Ray};

use crate::draw::TubeMesh;
use glam::Vec3;

/// Abstraction over the renderer's mesh management.
pub trait MeshBackend {
    /// Uploads a tube mesh and returns a handle the caller exclusively owns.
    fn create_mesh(
        &mut self,
        mesh: &TubeMesh,
        material: &Material,
    ) -> Result<GeometryHandle, EngineError>;

    /// Releases a mesh. Unknown handles are ignored.
    fn dispose_mesh(&mut self, handle: GeometryHandle);

    /// Sets the mesh translation (its local origin in world space).
    fn set_translation(&mut self, handle: GeometryHandle, translation: Vec3)
    -> Result<(), EngineError>;

    /// Current mesh translation, `None` for unknown handles.
    fn translation(&self, handle: GeometryHandle) -> Option<Vec3>;

    /// World-space center of the mesh bounds, including its translation.
    fn world_center(&self, handle: GeometryHandle) -> Option<Vec3>;

    /// Nearest mesh hit by `ray` among those accepted by `filter`.
    fn pick(&self, ray: &Ray, filter: &dyn Fn(GeometryHandle) -> bool) -> Option<PickHit>;
}

/// Abstraction over the physics simulation.
pub trait PhysicsBackend {
    /// Attaches a rigid body to a mesh. Mass zero means static.
    fn create_body(
        &mut self,
        geometry: GeometryHandle,
        desc: BodyDesc,
    ) -> Result<BodyHandle, EngineError>;

    /// Removes a body from the simulation. Unknown handles are ignored.
    fn dispose_body(&mut self, body: BodyHandle);

    fn set_linear_velocity(&mut self, body: BodyHandle, velocity: Vec3) -> Result<(), EngineError>;
}

/// Everything the core needs from an engine.
pub trait Engine: MeshBackend + PhysicsBackend {}

impl<T: MeshBackend + PhysicsBackend> Engine for T {}
