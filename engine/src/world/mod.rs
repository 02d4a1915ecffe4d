//! World Module
//!
//! Static level geometry as seen by the simulation: a flat list of boxes.
//!
//! - [`ColliderSource`] - Anything that can hand out its obstacle boxes
//! - [`HallwayLevel`] - The wall-run hallway course

pub mod hallway;

pub use hallway::{HallwayLayout, HallwayLevel};

use crate::physics::aabb::Aabb;

/// Read-only access to a level's obstacle boxes.
///
/// The list is borrowed for the duration of one tick and must not change
/// while the simulation reads it.
pub trait ColliderSource {
    fn colliders(&self) -> &[Aabb];
}

impl ColliderSource for Vec<Aabb> {
    fn colliders(&self) -> &[Aabb] {
        self
    }
}
