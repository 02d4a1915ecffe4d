//! First-person look state
//!
//! Yaw/pitch driven directly by pointer deltas, with no smoothing.
//!
//! - Yaw is unrestricted; 0 looks toward -Z, positive turns right
//! - Pitch is clamped just inside ±90° so the view never flips
//! - Movement uses the flat (yaw-only) basis, aiming uses the full forward

use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

/// Margin kept between the pitch limit and straight up/down, in radians.
pub const PITCH_EPSILON: f32 = 0.01;

/// Default mouse sensitivity in radians per pixel.
pub const DEFAULT_SENSITIVITY: f32 = 0.002;

/// Player view orientation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LookState {
    /// Horizontal angle (radians)
    pub yaw: f32,
    /// Vertical angle (radians), positive looks up
    pitch: f32,
    /// Radians per pixel of pointer movement
    pub sensitivity: f32,
}

impl Default for LookState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.0,
            sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl LookState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sensitivity(sensitivity: f32) -> Self {
        Self {
            sensitivity,
            ..Default::default()
        }
    }

    /// Largest allowed |pitch|.
    #[inline]
    pub fn pitch_limit() -> f32 {
        FRAC_PI_2 - PITCH_EPSILON
    }

    #[inline]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Set the pitch angle directly (clamped to the limits).
    pub fn set_pitch(&mut self, pitch: f32) {
        let limit = Self::pitch_limit();
        self.pitch = pitch.clamp(-limit, limit);
    }

    /// Apply a raw pointer delta in pixels.
    ///
    /// Positive `dx` turns right; positive `dy` (pointer moved down) looks down.
    /// Non-finite deltas are ignored.
    pub fn apply_mouse_delta(&mut self, dx: f32, dy: f32) {
        if !dx.is_finite() || !dy.is_finite() {
            return;
        }
        self.yaw += dx * self.sensitivity;
        self.set_pitch(self.pitch - dy * self.sensitivity);
    }

    /// Horizontal forward direction from yaw alone (pitch never affects movement).
    #[inline]
    pub fn forward_flat(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, -self.yaw.cos())
    }

    /// Horizontal right direction, perpendicular to [`Self::forward_flat`].
    #[inline]
    pub fn right_flat(&self) -> Vec3 {
        Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin())
    }

    /// Full view direction including pitch (used for aiming).
    #[inline]
    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            -self.yaw.cos() * self.pitch.cos(),
        )
    }

    /// Reset orientation to looking toward -Z.
    pub fn reset(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_looks_down_negative_z() {
        let look = LookState::new();
        assert!((look.forward() - Vec3::NEG_Z).length() < 1e-6);
        assert!((look.right_flat() - Vec3::X).length() < 1e-6);
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut look = LookState::new();
        look.apply_mouse_delta(100.0, 0.0);
        assert!((look.yaw - 0.2).abs() < 1e-6);
        assert!(look.forward_flat().x > 0.0);
    }

    #[test]
    fn test_mouse_down_looks_down() {
        let mut look = LookState::new();
        look.apply_mouse_delta(0.0, 50.0);
        assert!(look.pitch() < 0.0);
        assert!(look.forward().y < 0.0);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut look = LookState::new();
        look.apply_mouse_delta(0.0, -100_000.0);
        assert!(look.pitch() < FRAC_PI_2);
        assert!((look.pitch() - LookState::pitch_limit()).abs() < 1e-6);

        look.apply_mouse_delta(0.0, 100_000.0);
        assert!((look.pitch() + LookState::pitch_limit()).abs() < 1e-6);
    }

    #[test]
    fn test_flat_basis_ignores_pitch() {
        let mut look = LookState::new();
        look.yaw = 0.7;
        let flat = look.forward_flat();
        look.set_pitch(1.2);
        assert_eq!(look.forward_flat(), flat);
        assert!((flat.length() - 1.0).abs() < 1e-6);
        assert!(flat.dot(look.right_flat()).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_delta_ignored() {
        let mut look = LookState::new();
        look.apply_mouse_delta(f32::NAN, 1.0);
        assert_eq!(look.yaw, 0.0);
        assert_eq!(look.pitch(), 0.0);
    }
}
