//! Presentation boundary
//!
//! Everything a renderer, audio layer or HUD needs from one simulation tick,
//! as plain data. The simulation never calls into presentation code; it
//! returns a [`FrameOutput`] and the caller decides what to draw or play.
//!
//! # Example
//!
//! ```rust,ignore
//! let output = session.update(dt, &input);
//! camera.set_pose(output.position, output.yaw, output.pitch, output.camera_tilt_target);
//! queue.write_buffer(&instances, 0, bytemuck::cast_slice(&output.projectiles));
//! for event in &output.events {
//!     audio.play_for(event);
//! }
//! let hud = output.hud();
//! ```

use glam::Vec3;

use crate::combat::{FireRejection, ProjectileId};
use crate::player::{WallRunExit, WallSide};

/// GPU instance record for one live projectile.
///
/// Layout (16 bytes):
/// - position: vec3<f32> (12 bytes)
/// - age:      f32 (4 bytes) - seconds since spawn, for fade-out
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ProjectileInstance {
    pub position: [f32; 3],
    pub age: f32,
}

static_assertions::assert_eq_size!(ProjectileInstance, [u8; 16]);

impl ProjectileInstance {
    pub fn new(position: Vec3, age: f32) -> Self {
        Self {
            position: position.to_array(),
            age,
        }
    }
}

/// Why the player was put back at the spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RespawnReason {
    /// Health reached zero
    Died,
    /// Fell below the kill plane
    FellOutOfWorld,
}

/// Something the presentation layer may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresentationEvent {
    /// A projectile spawned (muzzle flash, shot sound)
    Fired {
        id: ProjectileId,
        origin: Vec3,
        direction: Vec3,
    },
    /// Trigger pressed but nothing fired
    DryFire { reason: FireRejection },
    Reloaded,
    /// A projectile reached the end of its lifetime; release its visuals
    ProjectileExpired { id: ProjectileId },
    Jumped,
    /// Floor contact after being airborne
    Landed { impact_speed: f32 },
    WallRunStarted { side: WallSide },
    WallRunEnded { reason: WallRunExit },
    WallJumped,
    PlayerDamaged { amount: f32, health: f32 },
    Respawned { reason: RespawnReason },
}

/// Snapshot of one simulation tick.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrameOutput {
    /// Eye position
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Camera roll target in radians; the renderer eases toward it
    pub camera_tilt_target: f32,
    pub grounded: bool,
    pub wall_running: bool,
    pub health: f32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub projectiles: Vec<ProjectileInstance>,
    pub events: Vec<PresentationEvent>,
}

impl FrameOutput {
    /// HUD view of this snapshot.
    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::new(self.health, self.ammo, self.max_ammo)
    }
}

/// Health display tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthTier {
    /// Above 60
    Healthy,
    /// Above 30
    Wounded,
    Critical,
}

/// Ammo display tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmmoTier {
    Normal,
    /// 5 rounds or fewer
    Low,
    Empty,
}

pub const HEALTH_HEALTHY_ABOVE: f32 = 60.0;
pub const HEALTH_WOUNDED_ABOVE: f32 = 30.0;
pub const AMMO_LOW_AT: u32 = 5;

/// Values and tiers shown on the HUD.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HudSnapshot {
    pub health: f32,
    pub health_tier: HealthTier,
    pub ammo: u32,
    pub max_ammo: u32,
    pub ammo_tier: AmmoTier,
}

impl HudSnapshot {
    pub fn new(health: f32, ammo: u32, max_ammo: u32) -> Self {
        let health_tier = if health > HEALTH_HEALTHY_ABOVE {
            HealthTier::Healthy
        } else if health > HEALTH_WOUNDED_ABOVE {
            HealthTier::Wounded
        } else {
            HealthTier::Critical
        };

        let ammo_tier = match ammo {
            0 => AmmoTier::Empty,
            n if n <= AMMO_LOW_AT => AmmoTier::Low,
            _ => AmmoTier::Normal,
        };

        Self {
            health,
            health_tier,
            ammo,
            max_ammo,
            ammo_tier,
        }
    }

    /// Text for the ammo counter, e.g. `"12 / 30"`.
    pub fn ammo_label(&self) -> String {
        format!("{} / {}", self.ammo, self.max_ammo)
    }
}
