//! Player Movement Controller
//!
//! Kinematic integrator for the first-person player. Owns velocity and the
//! grounded flag; produces the velocity the collision resolver then clamps.
//!
//! # Physics Model
//!
//! - Input is force-based: the wish direction accelerates horizontal velocity,
//!   it never sets it, so momentum and air control survive between frames
//! - Friction is exponential decay, `friction ^ (dt * 60)`, so a coefficient
//!   means "fraction kept per 1/60 s" at any frame rate
//! - Horizontal speed is capped by uniform rescale (direction preserved)
//! - Airborne: constant gravity. Grounded: vertical velocity is held at a
//!   small negative value so the resolver re-confirms floor contact every tick
//!
//! # Usage
//!
//! ```rust,ignore
//! use wallrunner_engine::player::{MovementController, MovementConfig};
//!
//! let mut movement = MovementController::new(MovementConfig::default());
//!
//! // Each frame:
//! movement.integrate(dt, &input, &look);
//! let outcome = resolve(&collider, movement.velocity(), dt, obstacles, &movement.resolver_params(skin));
//! position += outcome.displacement;
//! movement.apply_collision(&outcome);
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::input::FrameInput;
use crate::physics::collision::{CollisionOutcome, ResolverParams};
use crate::physics::types::{DIRECTION_EPSILON_SQ, REFERENCE_HZ, horizontal_speed};

use super::look::LookState;

/// Tunables for the kinematic integrator.
///
/// Friction values are per-reference-frame retention factors in `(0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Gravity acceleration in m/s² (applied downward while airborne)
    pub gravity: f32,
    /// Downward speed held while grounded, in m/s
    pub ground_stick_velocity: f32,
    /// Vertical speed set by a jump, in m/s
    pub jump_impulse: f32,
    /// Horizontal multiplier applied on a jump when already moving
    pub jump_boost: f32,
    /// Input acceleration on the ground, in m/s²
    pub ground_acceleration: f32,
    /// Input acceleration in the air, in m/s²
    pub air_acceleration: f32,
    /// Horizontal retention per reference frame on the ground
    pub ground_friction: f32,
    /// Horizontal retention per reference frame in the air
    pub air_friction: f32,
    /// Horizontal speed cap in m/s
    pub max_speed: f32,
    /// Fraction of velocity kept on an axis blocked by a wall
    pub wall_restitution: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 25.0,
            ground_stick_velocity: 2.0,
            jump_impulse: 10.0,
            jump_boost: 1.1,
            ground_acceleration: 120.0,
            air_acceleration: 40.0,
            ground_friction: 0.86,
            air_friction: 0.99,
            max_speed: 12.0,
            wall_restitution: 0.5,
        }
    }
}

/// Horizontal speed above which a jump counts as "already moving".
const MOVING_SPEED: f32 = 0.1;

/// Kinematic integrator state.
#[derive(Debug, Clone)]
pub struct MovementController {
    /// Current velocity in world space (meters per second)
    velocity: Vec3,
    /// Whether the resolver reported floor contact last tick
    grounded: bool,
    /// Jump input held on the previous tick (for edge detection)
    jump_held: bool,
    config: MovementConfig,
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}

impl MovementController {
    pub fn new(config: MovementConfig) -> Self {
        Self {
            velocity: Vec3::ZERO,
            grounded: false,
            jump_held: false,
            config,
        }
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Set velocity directly (e.g., for wall-run overrides or knockback).
    #[inline]
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    /// Get the horizontal speed (XZ plane only).
    #[inline]
    pub fn horizontal_speed(&self) -> f32 {
        horizontal_speed(self.velocity)
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MovementConfig) {
        self.config = config;
    }

    /// Resolver tunables derived from this config.
    pub fn resolver_params(&self, skin: f32) -> ResolverParams {
        ResolverParams {
            skin,
            restitution: self.config.wall_restitution,
        }
    }

    /// True when jump is held this tick but was not held last tick.
    #[inline]
    pub fn jump_edge(&self, input: &FrameInput) -> bool {
        input.jump && !self.jump_held
    }

    /// Normalized world-space wish direction from the input axes, rotated by
    /// yaw only. Zero when no (or cancelling) movement keys are held.
    pub fn wish_direction(input: &FrameInput, look: &LookState) -> Vec3 {
        let forward_input = input.forward_axis() as f32;
        let right_input = input.right_axis() as f32;

        let dir = look.forward_flat() * forward_input + look.right_flat() * right_input;
        if dir.length_squared() > DIRECTION_EPSILON_SQ {
            dir.normalize()
        } else {
            Vec3::ZERO
        }
    }

    /// Advance velocity by one tick. Returns `true` if a jump started.
    ///
    /// `dt <= 0` (or non-finite) leaves all state untouched.
    pub fn integrate(&mut self, dt: f32, input: &FrameInput, look: &LookState) -> bool {
        if dt <= 0.0 || !dt.is_finite() {
            return false;
        }

        let jump_pressed = self.jump_edge(input);
        self.jump_held = input.jump;

        let (acceleration, friction) = if self.grounded {
            (self.config.ground_acceleration, self.config.ground_friction)
        } else {
            (self.config.air_acceleration, self.config.air_friction)
        };

        // Input force
        let wish = Self::wish_direction(input, look);
        self.velocity.x += wish.x * acceleration * dt;
        self.velocity.z += wish.z * acceleration * dt;

        // Frame-rate independent friction
        let decay = friction.powf(dt * REFERENCE_HZ);
        self.velocity.x *= decay;
        self.velocity.z *= decay;

        // Vertical
        let mut jumped = false;
        if self.grounded {
            if jump_pressed {
                self.velocity.y = self.config.jump_impulse;
                self.grounded = false;
                if self.horizontal_speed() > MOVING_SPEED {
                    self.velocity.x *= self.config.jump_boost;
                    self.velocity.z *= self.config.jump_boost;
                }
                jumped = true;
            } else {
                self.velocity.y = -self.config.ground_stick_velocity;
            }
        } else {
            self.velocity.y -= self.config.gravity * dt;
        }

        self.clamp_horizontal_speed();
        jumped
    }

    /// Uniformly rescale horizontal velocity down to `max_speed`.
    pub fn clamp_horizontal_speed(&mut self) {
        let speed = self.horizontal_speed();
        let max_speed = self.config.max_speed;
        if speed > max_speed && speed > 0.0 {
            let scale = max_speed / speed;
            self.velocity.x *= scale;
            self.velocity.z *= scale;
        }
    }

    /// Take the resolver's corrected velocity and contacts.
    ///
    /// Returns `true` when this tick landed (airborne before, grounded now).
    pub fn apply_collision(&mut self, outcome: &CollisionOutcome) -> bool {
        let landed = !self.grounded && outcome.grounded;
        self.velocity = outcome.velocity;
        self.grounded = outcome.grounded;
        landed
    }

    /// Zero velocity and clear contact/edge state (used on respawn).
    pub fn reset(&mut self) {
        self.velocity = Vec3::ZERO;
        self.grounded = false;
        self.jump_held = false;
    }
}
