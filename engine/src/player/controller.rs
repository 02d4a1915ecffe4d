//! Player Controller
//!
//! Owns everything about the player body: position, look, velocity, wall-run
//! state and health. One [`PlayerController::update`] call advances the body
//! by one tick in a fixed order:
//!
//! 1. Look: apply the frame's pointer delta
//! 2. Integrate: input force, friction, gravity and jump
//! 3. Wall-run: detection, glide and wall-jump may override velocity
//! 4. Resolve: clamp the resulting motion against the world
//! 5. Apply: move the body and take the resolver's contacts
//!
//! The position is the camera/eye point. The collider hangs `height` below it
//! and reaches `head_clearance` above it.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::FrameInput;
use crate::physics::aabb::Aabb;
use crate::physics::collision::resolve;
use crate::presentation::PresentationEvent;

use super::look::LookState;
use super::movement_controller::{MovementConfig, MovementController};
use super::wall_run::{WallRunConfig, WallRunContext, WallRunEvent, WallRunner};

/// Full health.
pub const MAX_HEALTH: f32 = 100.0;

/// Player body measurements, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerDimensions {
    /// Eye to feet
    pub height: f32,
    /// Collider extent along X and Z
    pub width: f32,
    /// Collider extent above the eye
    pub head_clearance: f32,
    /// Lift of the horizontal collision probe above the feet
    pub skin: f32,
}

impl Default for PlayerDimensions {
    fn default() -> Self {
        Self {
            height: 2.0,
            width: 0.5,
            head_clearance: 0.1,
            skin: 0.05,
        }
    }
}

impl PlayerDimensions {
    /// Collider for an eye at `position`.
    pub fn collider_at(&self, position: Vec3) -> Aabb {
        let half = self.width * 0.5;
        Aabb::new(
            Vec3::new(position.x - half, position.y - self.height, position.z - half),
            Vec3::new(position.x + half, position.y + self.head_clearance, position.z + half),
        )
    }
}

/// First-person player body.
#[derive(Debug, Clone)]
pub struct PlayerController {
    position: Vec3,
    look: LookState,
    movement: MovementController,
    wall_runner: WallRunner,
    dimensions: PlayerDimensions,
    health: f32,
}

impl Default for PlayerController {
    fn default() -> Self {
        Self::new(
            Vec3::ZERO,
            PlayerDimensions::default(),
            MovementConfig::default(),
            WallRunConfig::default(),
        )
    }
}

impl PlayerController {
    pub fn new(
        spawn: Vec3,
        dimensions: PlayerDimensions,
        movement: MovementConfig,
        wall_run: WallRunConfig,
    ) -> Self {
        Self {
            position: spawn,
            look: LookState::new(),
            movement: MovementController::new(movement),
            wall_runner: WallRunner::new(wall_run),
            dimensions,
            health: MAX_HEALTH,
        }
    }

    // ---- Accessors ----

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.movement.velocity()
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.movement.set_velocity(velocity);
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.movement.is_grounded()
    }

    #[inline]
    pub fn is_wall_running(&self) -> bool {
        self.wall_runner.is_active()
    }

    pub fn look(&self) -> &LookState {
        &self.look
    }

    pub fn look_mut(&mut self) -> &mut LookState {
        &mut self.look
    }

    pub fn movement(&self) -> &MovementController {
        &self.movement
    }

    pub fn wall_runner(&self) -> &WallRunner {
        &self.wall_runner
    }

    pub fn dimensions(&self) -> &PlayerDimensions {
        &self.dimensions
    }

    /// Collision box derived from the current position.
    #[inline]
    pub fn collider(&self) -> Aabb {
        self.dimensions.collider_at(self.position)
    }

    /// Midpoint between eye and feet; wall probes start here.
    #[inline]
    pub fn body_center(&self) -> Vec3 {
        self.position - Vec3::Y * (self.dimensions.height * 0.5)
    }

    /// Camera roll target in radians.
    pub fn camera_tilt_target(&self) -> f32 {
        self.wall_runner.camera_tilt_target()
    }

    // ---- Health ----

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Subtract damage, clamped at zero. Returns the health left.
    pub fn apply_damage(&mut self, amount: f32) -> f32 {
        if amount.is_finite() && amount > 0.0 {
            self.health = (self.health - amount).max(0.0);
        }
        self.health
    }

    /// Add health, clamped at [`MAX_HEALTH`].
    pub fn heal(&mut self, amount: f32) -> f32 {
        if amount.is_finite() && amount > 0.0 {
            self.health = (self.health + amount).min(MAX_HEALTH);
        }
        self.health
    }

    /// Put the player back at `spawn` with full health and no momentum.
    ///
    /// Yaw is kept; pitch is levelled. Any wall-run or cooldown is dropped.
    pub fn respawn(&mut self, spawn: Vec3) {
        self.position = spawn;
        self.movement.reset();
        self.wall_runner.reset();
        self.look.set_pitch(0.0);
        self.health = MAX_HEALTH;
        debug!(x = spawn.x, y = spawn.y, z = spawn.z, "player respawned");
    }

    // ---- Simulation ----

    /// Advance the body by one tick, appending what happened to `events`.
    ///
    /// `dt <= 0` is a no-op.
    pub fn update(
        &mut self,
        dt: f32,
        input: &FrameInput,
        obstacles: &[Aabb],
        events: &mut Vec<PresentationEvent>,
    ) {
        if dt <= 0.0 || !dt.is_finite() {
            return;
        }

        self.look
            .apply_mouse_delta(input.look_delta.x, input.look_delta.y);

        let jump_pressed = self.movement.jump_edge(input);
        if self.movement.integrate(dt, input, &self.look) {
            events.push(PresentationEvent::Jumped);
        }

        let mut velocity = self.movement.velocity();
        let context = WallRunContext {
            dt,
            origin: self.body_center(),
            forward: self.look.forward_flat(),
            right: self.look.right_flat(),
            grounded: self.movement.is_grounded(),
            jump_pressed,
            jump_held: input.jump,
            obstacles,
        };
        match self.wall_runner.update(&context, &mut velocity) {
            Some(WallRunEvent::Started { side, .. }) => {
                events.push(PresentationEvent::WallRunStarted { side });
            }
            Some(WallRunEvent::Ended { reason, wall_jump }) => {
                events.push(PresentationEvent::WallRunEnded { reason });
                if wall_jump {
                    events.push(PresentationEvent::WallJumped);
                }
            }
            None => {}
        }
        self.movement.set_velocity(velocity);

        let impact_speed = (-velocity.y).max(0.0);
        let outcome = resolve(
            &self.collider(),
            velocity,
            dt,
            obstacles,
            &self.movement.resolver_params(self.dimensions.skin),
        );
        self.position += outcome.displacement;

        if self.movement.apply_collision(&outcome) {
            events.push(PresentationEvent::Landed { impact_speed });
        }
    }
}
