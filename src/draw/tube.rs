//! Tube sweeping: turns a stroke polyline into a closed solid.

use glam::{Quat, Vec3};
use std::f32::consts::TAU;

use super::color::Color;
use crate::engine::{EngineError, GeometryHandle, Material, MeshBackend};
use crate::util;

/// Default number of segments around the tube circumference.
pub const DEFAULT_TESSELLATION: u32 = 8;

/// Triangle mesh of a swept tube.
///
/// Layout: `segments` ring vertices per path point, followed by the start and
/// end cap centers. Every triangle is three indices into `positions`.
#[derive(Debug, Clone, PartialEq)]
pub struct TubeMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
    pub segments: u32,
}

impl TubeMesh {
    /// Sweeps a circle of `radius` along `path` with `segments` subdivisions.
    ///
    /// Consecutive duplicate points are skipped. Returns `None` when fewer than
    /// two distinct points remain or `segments < 3`.
    ///
    /// Ring orientation follows parallel-transported frames, so the tube does
    /// not twist around sharp bends.
    pub fn sweep(path: &[Vec3], radius: f32, segments: u32) -> Option<Self> {
        if segments < 3 {
            return None;
        }

        let mut points: Vec<Vec3> = Vec::with_capacity(path.len());
        for p in path {
            if points
                .last()
                .is_none_or(|last| last.distance_squared(*p) > f32::EPSILON)
            {
                points.push(*p);
            }
        }
        if points.len() < 2 {
            return None;
        }

        let tangents = path_tangents(&points);
        let seg = segments as usize;
        let ring_count = points.len();

        let mut positions = Vec::with_capacity(ring_count * seg + 2);
        let mut normals = Vec::with_capacity(ring_count * seg + 2);

        let mut normal = tangents[0].any_orthonormal_vector();
        for (i, (point, tangent)) in points.iter().zip(&tangents).enumerate() {
            if i > 0 {
                let rotation = Quat::from_rotation_arc(tangents[i - 1], *tangent);
                normal = rotation * normal;
                // Re-orthogonalize to keep drift from accumulating
                normal = (normal - *tangent * normal.dot(*tangent))
                    .try_normalize()
                    .unwrap_or_else(|| tangent.any_orthonormal_vector());
            }
            let binormal = tangent.cross(normal);

            for j in 0..seg {
                let angle = TAU * j as f32 / seg as f32;
                let dir = normal * angle.cos() + binormal * angle.sin();
                positions.push(*point + dir * radius);
                normals.push(dir);
            }
        }

        let start_center = (ring_count * seg) as u32;
        let end_center = start_center + 1;
        positions.push(points[0]);
        normals.push(-tangents[0]);
        positions.push(points[ring_count - 1]);
        normals.push(tangents[ring_count - 1]);

        let ring = |i: usize, j: usize| (i * seg + j % seg) as u32;
        let mut indices = Vec::with_capacity(3 * (2 * seg * (ring_count - 1) + 2 * seg));
        for i in 0..ring_count - 1 {
            for j in 0..seg {
                let (a, b) = (ring(i, j), ring(i, j + 1));
                let (c, d) = (ring(i + 1, j), ring(i + 1, j + 1));
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }
        let last = ring_count - 1;
        for j in 0..seg {
            indices.extend_from_slice(&[start_center, ring(0, j + 1), ring(0, j)]);
            indices.extend_from_slice(&[end_center, ring(last, j), ring(last, j + 1)]);
        }

        Some(Self {
            positions,
            normals,
            indices,
            segments,
        })
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Bounding sphere in mesh-local space.
    pub fn bounding_sphere(&self) -> (Vec3, f32) {
        util::bounding_sphere(&self.positions)
    }
}

/// Per-point unit tangents. Interior points average their neighbours; a
/// reversal falls back to the outgoing segment.
fn path_tangents(points: &[Vec3]) -> Vec<Vec3> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let outgoing = points[(i + 1).min(n - 1)] - points[i];
            let incoming = points[i] - points[i.saturating_sub(1)];
            (incoming.normalize_or_zero() + outgoing.normalize_or_zero())
                .try_normalize()
                .or_else(|| outgoing.try_normalize())
                .or_else(|| incoming.try_normalize())
                .unwrap_or(Vec3::Z)
        })
        .collect()
}

/// Builds stroke solids through a [`MeshBackend`].
#[derive(Debug, Clone, Copy)]
pub struct GeometryBuilder {
    pub tessellation: u32,
}

impl Default for GeometryBuilder {
    fn default() -> Self {
        Self {
            tessellation: DEFAULT_TESSELLATION,
        }
    }
}

impl GeometryBuilder {
    pub fn new(tessellation: u32) -> Self {
        Self { tessellation }
    }

    /// Sweeps `points` into a capped tube of radius `width` and uploads it.
    ///
    /// Returns `Ok(None)` for paths that cannot define a tube. The caller owns
    /// the returned handle and must dispose any handle it replaces.
    pub fn build<B: MeshBackend + ?Sized>(
        &self,
        backend: &mut B,
        points: &[Vec3],
        color: Color,
        width: f32,
    ) -> Result<Option<GeometryHandle>, EngineError> {
        if points.len() < 2 {
            return Ok(None);
        }
        let Some(mesh) = TubeMesh::sweep(points, width, self.tessellation) else {
            return Ok(None);
        };

        let handle = backend.create_mesh(&mesh, &Material::for_stroke(color))?;
        log::debug!(
            "Built tube {:?}: {} points, {} triangles",
            handle,
            points.len(),
            mesh.triangle_count()
        );
        Ok(Some(handle))
    }
}
