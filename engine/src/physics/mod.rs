//! Physics module
//!
//! Axis-aligned collision for the player body against static level geometry.
//! No external physics library: boxes, rays and a two-pass resolver are all
//! that first-person movement in a box-built level needs.
//!
//! # Unit System
//!
//! **1 unit = 1 meter** (SI units throughout)
//!
//! - Distances in meters
//! - Velocities in m/s
//! - Accelerations in m/s²
//!
//! # Submodules
//!
//! - [`types`] - Math types re-exported from glam plus horizontal helpers
//! - [`aabb`] - Axis-aligned boxes, ray casts and surface normals
//! - [`collision`] - Vertical-then-horizontal collision resolver

pub mod aabb;
pub mod collision;
pub mod types;

pub use aabb::Aabb;
pub use collision::{CONTACT_EPSILON, CONTACT_GAP, CollisionOutcome, ResolverParams, resolve};
pub use types::{TIMER_EPSILON, Vec2, Vec3, horizontal, horizontal_speed};
