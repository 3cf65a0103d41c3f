//! Small vector-math helpers shared by the engine, picking, and score code.

use glam::Vec3;

/// Distance along a ray to where it enters a solid sphere.
///
/// `ray_dir` must be normalized. Returns `None` when the ray misses or the
/// sphere lies entirely behind the origin. A ray starting inside the sphere
/// hits at its closest approach to the center (clamped to the origin).
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    if c <= 0.0 {
        return Some((-b).max(0.0));
    }
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Bounding sphere of a point cloud: the box center and the farthest point from it.
///
/// Returns a zero sphere at the origin for an empty slice.
pub fn bounding_sphere(points: &[Vec3]) -> (Vec3, f32) {
    let Some(first) = points.first() else {
        return (Vec3::ZERO, 0.0);
    };

    let (min, max) = points
        .iter()
        .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
    let center = (min + max) * 0.5;
    let radius = points
        .iter()
        .map(|p| p.distance(center))
        .fold(0.0_f32, f32::max);
    (center, radius)
}

/// Projects `v` onto the horizontal plane and normalizes it.
///
/// Returns zero when `v` is vertical.
#[inline]
pub fn flatten_horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ray_sphere_hits_front_surface() {
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).unwrap();
        assert!((t - 3.0).abs() < 1e-5);
    }

    #[test]
    fn ray_sphere_misses_sideways() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::X, Vec3::new(0.0, 0.0, 5.0), 2.0).is_none());
    }

    #[test]
    fn ray_sphere_ignores_spheres_behind_origin() {
        assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, -5.0), 2.0).is_none());
    }

    #[test]
    fn ray_sphere_from_inside_hits_at_closest_approach() {
        let center = Vec3::new(0.0, 0.0, -1.0);
        let t = ray_sphere(Vec3::ZERO, Vec3::NEG_Z, center, 3.0).unwrap();
        assert!((t - 1.0).abs() < 1e-5);

        // Center behind the origin: the hit is the origin itself
        let t = ray_sphere(Vec3::ZERO, Vec3::Z, center, 3.0).unwrap();
        assert_eq!(t, 0.0);
    }

    #[test]
    fn bounding_sphere_contains_all_points() {
        let points = [
            Vec3::new(-1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.5),
        ];
        let (center, radius) = bounding_sphere(&points);
        for p in points {
            assert!(p.distance(center) <= radius + 1e-5);
        }
    }

    #[test]
    fn bounding_sphere_of_empty_slice_is_degenerate() {
        assert_eq!(bounding_sphere(&[]), (Vec3::ZERO, 0.0));
    }

    #[test]
    fn flatten_horizontal_drops_vertical_component() {
        let flat = flatten_horizontal(Vec3::new(1.0, 5.0, 0.0));
        assert!((flat - Vec3::X).length() < 1e-5);
        assert_eq!(flatten_horizontal(Vec3::Y), Vec3::ZERO);
    }
}
