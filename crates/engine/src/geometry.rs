//! Pure vector/ray math used by picking and mesh bookkeeping.
//!
//! Everything here is stateless and operates in whatever space the caller
//! hands in; the picking engine feeds world-space data.

use glam::Vec3;

const EPSILON: f32 = 1e-7;

/// A ray in world space
#[derive(Clone, Copy, Debug)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A line segment in world space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Vec3,
    pub end: Vec3,
}

impl Segment {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f32 {
        (self.end - self.start).length()
    }
}

/// Axis-aligned bounding box
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Compute the AABB of a point set. Empty input collapses to the origin.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        let mut min = Vec3::splat(f32::MAX);
        let mut max = Vec3::splat(f32::MIN);
        let mut any = false;

        for p in points {
            any = true;
            min = min.min(p);
            max = max.max(p);
        }

        if any {
            Self { min, max }
        } else {
            Self {
                min: Vec3::ZERO,
                max: Vec3::ZERO,
            }
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The eight corners, bottom face first.
    pub fn corners(&self) -> [Vec3; 8] {
        let (min, max) = (self.min, self.max);
        [
            Vec3::new(min.x, min.y, min.z),
            Vec3::new(max.x, min.y, min.z),
            Vec3::new(max.x, min.y, max.z),
            Vec3::new(min.x, min.y, max.z),
            Vec3::new(min.x, max.y, min.z),
            Vec3::new(max.x, max.y, min.z),
            Vec3::new(max.x, max.y, max.z),
            Vec3::new(min.x, max.y, max.z),
        ]
    }
}

/// Ray-AABB intersection using the slab method.
/// Returns the distance along the ray to the nearest hit, or None. An
/// origin inside the box reports the exit distance.
pub fn ray_aabb(ray: &Ray, aabb: &Aabb) -> Option<f32> {
    let inv_dir = Vec3::new(
        1.0 / ray.direction.x,
        1.0 / ray.direction.y,
        1.0 / ray.direction.z,
    );

    let t1 = (aabb.min.x - ray.origin.x) * inv_dir.x;
    let t2 = (aabb.max.x - ray.origin.x) * inv_dir.x;
    let t3 = (aabb.min.y - ray.origin.y) * inv_dir.y;
    let t4 = (aabb.max.y - ray.origin.y) * inv_dir.y;
    let t5 = (aabb.min.z - ray.origin.z) * inv_dir.z;
    let t6 = (aabb.max.z - ray.origin.z) * inv_dir.z;

    let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
    let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

    if tmax < 0.0 || tmin > tmax {
        return None;
    }

    Some(if tmin < 0.0 { tmax } else { tmin })
}

/// Möller-Trumbore ray-triangle intersection.
/// Returns the distance along the ray if hit, or None if no intersection.
pub fn ray_triangle_intersect(ray: &Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let edge1 = v1 - v0;
    let edge2 = v2 - v0;
    let h = ray.direction.cross(edge2);
    let a = edge1.dot(h);

    // Ray is parallel to triangle
    if a.abs() < EPSILON {
        return None;
    }

    let f = 1.0 / a;
    let s = ray.origin - v0;
    let u = f * s.dot(h);

    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = f * ray.direction.dot(q);

    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = f * edge2.dot(q);

    // Intersection is behind ray origin
    if t > EPSILON {
        Some(t)
    } else {
        None
    }
}

/// Area of the triangle (v0, v1, v2): |cross(v1-v0, v2-v0)| / 2
pub fn triangle_area(v0: Vec3, v1: Vec3, v2: Vec3) -> f32 {
    (v1 - v0).cross(v2 - v0).length() * 0.5
}

/// Minimum distance between a ray and a segment, via the closest point
/// between skew lines clamped to the ray (t >= 0) and the segment (0..=1).
/// Returns `(distance, t)` where `t` is the ray parameter of the closest
/// approach.
pub fn ray_segment_distance(ray: &Ray, segment: &Segment) -> (f32, f32) {
    let d1 = ray.direction; // unit
    let d2 = segment.end - segment.start;
    let r = ray.origin - segment.start;

    let e = d2.dot(d2);
    let c = d1.dot(r);

    // Degenerate segment: point-to-ray distance
    if e < EPSILON {
        let t = (-c).max(0.0);
        return ((ray.point_at(t) - segment.start).length(), t);
    }

    let b = d1.dot(d2);
    let f = d2.dot(r);
    let denom = e - b * b; // a == 1 for a unit ray direction

    // Parallel lines fall back to projecting the segment start
    let mut t = if denom > EPSILON {
        ((b * f - c * e) / denom).max(0.0)
    } else {
        0.0
    };

    let mut u = (b * t + f) / e;
    if u < 0.0 {
        u = 0.0;
        t = (-c).max(0.0);
    } else if u > 1.0 {
        u = 1.0;
        t = (b - c).max(0.0);
    }

    let on_ray = ray.point_at(t);
    let on_segment = segment.start + d2 * u;
    ((on_ray - on_segment).length(), t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_triangle_hit() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, 5.0), Vec3::NEG_Z);
        let t = ray_triangle_intersect(&ray, Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((t.unwrap() - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_triangle_miss_outside() {
        let ray = Ray::new(Vec3::new(2.0, 2.0, 5.0), Vec3::NEG_Z);
        assert!(ray_triangle_intersect(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_ray_triangle_behind_origin() {
        let ray = Ray::new(Vec3::new(0.25, 0.25, -5.0), Vec3::NEG_Z);
        assert!(ray_triangle_intersect(&ray, Vec3::ZERO, Vec3::X, Vec3::Y).is_none());
    }

    #[test]
    fn test_ray_aabb_hit_front_face() {
        let aabb = Aabb {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        };
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::NEG_Z);
        let t = ray_aabb(&ray, &aabb).unwrap();
        assert!((t - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_miss() {
        let aabb = Aabb {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        };
        let ray = Ray::new(Vec3::new(2.0, 0.0, 5.0), Vec3::NEG_Z);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_ray_aabb_behind_origin() {
        let aabb = Aabb {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        };
        let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::NEG_Z);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_ray_aabb_origin_inside_reports_exit() {
        let aabb = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let t = ray_aabb(&ray, &aabb).unwrap();
        assert!((t - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_ray_aabb_axis_parallel_outside_slab() {
        let aabb = Aabb {
            min: Vec3::splat(-0.5),
            max: Vec3::splat(0.5),
        };
        // Parallel to X, offset outside the Y slab
        let ray = Ray::new(Vec3::new(-5.0, 2.0, 0.0), Vec3::X);
        assert!(ray_aabb(&ray, &aabb).is_none());
    }

    #[test]
    fn test_triangle_area_unit_right() {
        let area = triangle_area(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!((area - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_triangle_area_degenerate() {
        let area = triangle_area(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
        assert!(area.abs() < 1e-6);
    }

    #[test]
    fn test_ray_segment_perpendicular() {
        // Ray along +X at the origin; segment along Z offset 0.04 in Y
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let seg = Segment::new(Vec3::new(5.0, 0.04, -1.0), Vec3::new(5.0, 0.04, 1.0));
        let (dist, t) = ray_segment_distance(&ray, &seg);
        assert!((dist - 0.04).abs() < 1e-5);
        assert!((t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_ray_segment_clamps_to_endpoint() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let seg = Segment::new(Vec3::new(3.0, 1.0, 2.0), Vec3::new(3.0, 1.0, 5.0));
        let (dist, _) = ray_segment_distance(&ray, &seg);
        // Closest segment point is the (3, 1, 2) endpoint
        let expected = (1.0f32 + 4.0).sqrt();
        assert!((dist - expected).abs() < 1e-5);
    }

    #[test]
    fn test_ray_segment_behind_ray_clamps_to_origin() {
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let seg = Segment::new(Vec3::new(-4.0, 2.0, 0.0), Vec3::new(-2.0, 2.0, 0.0));
        let (dist, t) = ray_segment_distance(&ray, &seg);
        assert_eq!(t, 0.0);
        let expected = (4.0f32 + 4.0).sqrt();
        assert!((dist - expected).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_from_points() {
        let aabb = Aabb::from_points([Vec3::new(-1.0, 0.0, 2.0), Vec3::new(3.0, 4.0, -2.0)]);
        assert_eq!(aabb.min, Vec3::new(-1.0, 0.0, -2.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 4.0, 2.0));
        assert!((aabb.height() - 4.0).abs() < 1e-6);
        assert_eq!(aabb.center(), Vec3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_segment_length() {
        let seg = Segment::new(Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0));
        assert!((seg.length() - 5.0).abs() < 1e-6);
    }
}
