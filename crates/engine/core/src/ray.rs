//! Rays and planes

use glam::Vec3;

/// Denominators below this are treated as a ray parallel to the plane
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Ray with an origin and a normalized direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray; the direction is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at parameter `t` along the ray
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersect with a plane
    ///
    /// Returns `None` when the ray is (nearly) parallel to the plane. Hits
    /// behind the origin are returned as computed.
    pub fn intersect_plane(&self, plane: &Plane) -> Option<Vec3> {
        let denom = self.direction.dot(plane.normal);
        if denom.abs() < PARALLEL_EPSILON {
            return None;
        }
        let t = -(self.origin.dot(plane.normal) + plane.distance) / denom;
        Some(self.at(t))
    }
}

/// Plane `dot(normal, p) + distance = 0`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    /// Horizontal plane through the world origin
    pub const GROUND: Self = Self {
        normal: Vec3::Y,
        distance: 0.0,
    };

    /// Horizontal plane at height `y`
    pub fn horizontal(y: f32) -> Self {
        Self {
            normal: Vec3::Y,
            distance: -y,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_straight_down_hits_ground() {
        let ray = Ray::new(Vec3::new(3.0, 10.0, -2.0), Vec3::NEG_Y);
        let hit = ray.intersect_plane(&Plane::GROUND).unwrap();
        assert!((hit - Vec3::new(3.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_oblique_hit() {
        let ray = Ray::new(Vec3::new(0.0, 4.0, 0.0), Vec3::new(1.0, -1.0, 0.0));
        let hit = ray.intersect_plane(&Plane::GROUND).unwrap();
        assert!((hit - Vec3::new(4.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_parallel_ray_misses() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::X);
        assert!(ray.intersect_plane(&Plane::GROUND).is_none());
    }

    #[test]
    fn test_hit_behind_origin_is_returned() {
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
        let hit = ray.intersect_plane(&Plane::GROUND).unwrap();
        assert!((hit - Vec3::ZERO).length() < 1e-5);
    }

    #[test]
    fn test_horizontal_plane_offset() {
        let ray = Ray::new(Vec3::new(1.0, 5.0, 1.0), Vec3::NEG_Y);
        let hit = ray.intersect_plane(&Plane::horizontal(2.0)).unwrap();
        assert!((hit.y - 2.0).abs() < 1e-5);
    }
}
