//! Physics type re-exports from glam
//!
//! This module provides the core mathematical types used throughout
//! the movement core, re-exported from the glam library.

pub use glam::{Vec2, Vec3};

/// Reference update rate used to turn per-frame friction coefficients into
/// frame-rate independent decay: `coefficient.powf(dt * REFERENCE_HZ)`.
pub const REFERENCE_HZ: f32 = 60.0;

/// Squared length below which a direction is treated as "no direction".
pub const DIRECTION_EPSILON_SQ: f32 = 1e-8;

/// Slack for countdown timers built from summed `f32` steps. A timer within
/// this many seconds of its limit counts as elapsed, so `1/60` steps reach
/// `0.1` or `1.5` on the tick that lands on the limit.
pub const TIMER_EPSILON: f32 = 1e-4;

/// Horizontal (XZ) part of a vector.
#[inline]
pub fn horizontal(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Horizontal (XZ) speed of a velocity.
#[inline]
pub fn horizontal_speed(v: Vec3) -> f32 {
    Vec2::new(v.x, v.z).length()
}
