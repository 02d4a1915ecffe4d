//! Hallway course
//!
//! A long floor with wall sections alternating between the left and right
//! side of a hallway, ending at a raised goal platform. Walls are tall and
//! long enough to run along; alternating sides let a player chain wall-jumps
//! down the hall.
//!
//! ```text
//!   z = -90          z = -82          z = -74   ...        z = 60
//!   |#####|                          |#####|               [goal]
//!                     |#####|                    ...
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::physics::aabb::Aabb;

use super::ColliderSource;

/// Hallway dimensions in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HallwayLayout {
    /// Floor box size; its top face sits at y = 0
    pub floor_size: Vec3,
    /// Distance between the two wall center lines plus one wall thickness
    pub hallway_width: f32,
    pub wall_count: u32,
    /// Wall box size (thickness, height, length)
    pub wall_size: Vec3,
    /// Z distance between consecutive wall sections
    pub wall_spacing: f32,
    /// Z of the first wall section's center
    pub first_wall_z: f32,
    pub goal_center: Vec3,
    pub goal_size: Vec3,
}

impl Default for HallwayLayout {
    fn default() -> Self {
        Self {
            floor_size: Vec3::new(40.0, 1.0, 200.0),
            hallway_width: 16.0,
            wall_count: 20,
            wall_size: Vec3::new(1.0, 12.0, 15.0),
            wall_spacing: 8.0,
            first_wall_z: -90.0,
            goal_center: Vec3::new(0.0, 4.0, 60.0),
            goal_size: Vec3::new(10.0, 1.0, 10.0),
        }
    }
}

impl HallwayLayout {
    /// Center of wall section `index`. Even sections sit on the right (+X),
    /// odd sections on the left.
    pub fn wall_center(&self, index: u32) -> Vec3 {
        let offset = self.hallway_width * 0.5 - 1.0;
        let x = if index % 2 == 0 { offset } else { -offset };
        Vec3::new(
            x,
            self.wall_size.y * 0.5,
            self.first_wall_z + index as f32 * self.wall_spacing,
        )
    }
}

/// Built hallway level.
#[derive(Debug, Clone)]
pub struct HallwayLevel {
    layout: HallwayLayout,
    colliders: Vec<Aabb>,
}

impl Default for HallwayLevel {
    fn default() -> Self {
        Self::new(HallwayLayout::default())
    }
}

impl HallwayLevel {
    /// Build the collider list: floor first, then walls in order, then goal.
    pub fn new(layout: HallwayLayout) -> Self {
        let mut colliders = Vec::with_capacity(layout.wall_count as usize + 2);

        colliders.push(Aabb::from_center_size(
            Vec3::new(0.0, -layout.floor_size.y * 0.5, 0.0),
            layout.floor_size,
        ));
        for index in 0..layout.wall_count {
            colliders.push(Aabb::from_center_size(layout.wall_center(index), layout.wall_size));
        }
        colliders.push(Aabb::from_center_size(layout.goal_center, layout.goal_size));

        debug!(colliders = colliders.len(), "hallway level built");
        Self { layout, colliders }
    }

    pub fn layout(&self) -> &HallwayLayout {
        &self.layout
    }

    pub fn floor(&self) -> &Aabb {
        &self.colliders[0]
    }

    pub fn walls(&self) -> &[Aabb] {
        &self.colliders[1..self.colliders.len() - 1]
    }

    pub fn goal(&self) -> &Aabb {
        &self.colliders[self.colliders.len() - 1]
    }
}

impl ColliderSource for HallwayLevel {
    fn colliders(&self) -> &[Aabb] {
        &self.colliders
    }
}
