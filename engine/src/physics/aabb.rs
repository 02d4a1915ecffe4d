//! Axis-aligned bounding boxes
//!
//! One box type serves both world obstacles and the player's derived
//! collision volume.
//!
//! # Ray-AABB Intersection
//!
//! The slab method is used for ray-AABB intersection, which finds the
//! intersection points by computing entry and exit times for each axis.
//!
//! # Example
//!
//! ```ignore
//! use wallrunner_engine::physics::Aabb;
//! use glam::Vec3;
//!
//! let wall = Aabb::from_center_size(Vec3::new(3.0, 6.0, 0.0), Vec3::new(1.0, 12.0, 15.0));
//! let origin = Vec3::new(0.0, 1.0, 0.0);
//!
//! if let Some(t) = wall.ray_intersect(origin, Vec3::X) {
//!     let hit_point = origin + Vec3::X * t;
//!     let normal = wall.surface_normal(hit_point);
//! }
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned box. Invariant: `min <= max` on every axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Create a box from two corners. The corners are reordered per axis so
    /// the `min <= max` invariant always holds.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create a box from its center and full size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// The same box moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Strict overlap test. Boxes that only share a face do not intersect,
    /// which lets a resting player touch the floor without being blocked by it.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Whether `point` lies inside or on the surface of the box.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Performs ray-AABB intersection using the slab method.
    ///
    /// # Arguments
    ///
    /// * `ray_origin` - Starting point of the ray
    /// * `ray_dir` - Direction of the ray (must be normalized)
    ///
    /// # Returns
    ///
    /// * `Some(t)` - Distance along the ray to the intersection point (t >= 0)
    /// * `None` - No intersection or intersection is behind the ray origin
    pub fn ray_intersect(&self, ray_origin: Vec3, ray_dir: Vec3) -> Option<f32> {
        // Handle near-zero directions by using large values
        let inv_dir = Vec3::new(
            if ray_dir.x.abs() > 1e-10 { 1.0 / ray_dir.x } else { f32::MAX * ray_dir.x.signum() },
            if ray_dir.y.abs() > 1e-10 { 1.0 / ray_dir.y } else { f32::MAX * ray_dir.y.signum() },
            if ray_dir.z.abs() > 1e-10 { 1.0 / ray_dir.z } else { f32::MAX * ray_dir.z.signum() },
        );

        let t1 = (self.min - ray_origin) * inv_dir;
        let t2 = (self.max - ray_origin) * inv_dir;

        let t_min = t1.min(t2).max_element();
        let t_max = t1.max(t2).min_element();

        if t_max >= t_min && t_max >= 0.0 {
            if t_min >= 0.0 {
                Some(t_min)
            } else {
                // Ray starts inside the box
                Some(t_max)
            }
        } else {
            None
        }
    }

    /// Outward normal of the face closest to `point`.
    ///
    /// Degenerate (zero-thickness) axes are ignored so a flat plate still
    /// reports a sensible face.
    pub fn surface_normal(&self, point: Vec3) -> Vec3 {
        let half_extents = self.size() * 0.5;
        let local = point - self.center();

        let normalized = Vec3::new(
            if half_extents.x > 1e-6 { local.x / half_extents.x } else { 0.0 },
            if half_extents.y > 1e-6 { local.y / half_extents.y } else { 0.0 },
            if half_extents.z > 1e-6 { local.z / half_extents.z } else { 0.0 },
        );

        let abs_normalized = normalized.abs();

        if abs_normalized.x >= abs_normalized.y && abs_normalized.x >= abs_normalized.z {
            Vec3::new(sign_or_one(normalized.x), 0.0, 0.0)
        } else if abs_normalized.y >= abs_normalized.z {
            Vec3::new(0.0, sign_or_one(normalized.y), 0.0)
        } else {
            Vec3::new(0.0, 0.0, sign_or_one(normalized.z))
        }
    }
}

#[inline]
fn sign_or_one(v: f32) -> f32 {
    if v < 0.0 { -1.0 } else { 1.0 }
}
