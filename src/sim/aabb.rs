//! Axis-aligned bounding boxes
//!
//! Broad-phase only: obstacle shapes are simple convex volumes, so box
//! overlap is the whole collision test.

use glam::Vec3;

/// An axis-aligned box in world space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Box centered on `center` extending `half_extents` along each axis
    pub fn from_center(center: Vec3, half_extents: Vec3) -> Self {
        let half_extents = half_extents.abs();
        Self {
            min: center - half_extents,
            max: center + half_extents,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Strict overlap on all three axes. Boxes that only share a face do not
    /// intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::from_center(Vec3::new(1.5, 0.0, 0.5), Vec3::splat(1.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_touching_faces_do_not_intersect() {
        let a = Aabb::from_center(Vec3::ZERO, Vec3::splat(1.0));
        let b = Aabb::from_center(Vec3::new(0.0, 0.0, 2.0), Vec3::splat(1.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_separated_on_one_axis_misses() {
        // Same depth and height, different lane
        let a = Aabb::from_center(Vec3::ZERO, Vec3::new(0.6, 0.5, 1.2));
        let b = Aabb::from_center(Vec3::new(3.0, 0.0, 0.0), Vec3::new(1.2, 1.0, 1.6));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_center_and_extents_round_trip() {
        let aabb = Aabb::from_center(Vec3::new(2.0, 1.0, -4.0), Vec3::new(0.5, -1.0, 2.0));
        assert_eq!(aabb.center(), Vec3::new(2.0, 1.0, -4.0));
        assert_eq!(aabb.half_extents(), Vec3::new(0.5, 1.0, 2.0));
    }
}
