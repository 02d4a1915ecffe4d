//! Weapon gate: fire cooldown and ammunition.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::physics::types::{DIRECTION_EPSILON_SQ, TIMER_EPSILON};

/// Weapon and projectile tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponConfig {
    /// Muzzle speed in m/s
    pub projectile_speed: f32,
    /// Seconds a projectile lives before it is removed
    pub projectile_lifetime: f32,
    /// Minimum seconds between shots
    pub fire_cooldown: f32,
    /// Magazine size
    pub max_ammo: u32,
    /// Distance in front of the eye where projectiles spawn
    pub muzzle_offset: f32,
}

impl Default for WeaponConfig {
    fn default() -> Self {
        Self {
            projectile_speed: 50.0,
            projectile_lifetime: 2.0,
            fire_cooldown: 0.1,
            max_ammo: 30,
            muzzle_offset: 0.5,
        }
    }
}

/// Why a trigger pull did not fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireRejection {
    /// Previous shot's cooldown has not elapsed
    CoolingDown,
    /// Magazine is empty
    OutOfAmmo,
    /// Aim direction is zero or not finite
    InvalidDirection,
}

/// Result of a reload request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReloadOutcome {
    Reloaded,
    AlreadyFull,
}

/// Ammunition counter plus fire-rate limiter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weapon {
    ammo: u32,
    max_ammo: u32,
    cooldown_remaining: f32,
    fire_cooldown: f32,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::from_config(&WeaponConfig::default())
    }
}

impl Weapon {
    /// Full magazine, ready to fire.
    pub fn new(max_ammo: u32, fire_cooldown: f32) -> Self {
        Self {
            ammo: max_ammo,
            max_ammo,
            cooldown_remaining: 0.0,
            fire_cooldown,
        }
    }

    pub fn from_config(config: &WeaponConfig) -> Self {
        Self::new(config.max_ammo, config.fire_cooldown)
    }

    #[inline]
    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    #[inline]
    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    #[inline]
    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    /// Check whether a shot along `direction` would be accepted.
    pub fn check(&self, direction: Vec3) -> Result<(), FireRejection> {
        if !direction.is_finite() || direction.length_squared() < DIRECTION_EPSILON_SQ {
            return Err(FireRejection::InvalidDirection);
        }
        if self.cooldown_remaining > 0.0 {
            return Err(FireRejection::CoolingDown);
        }
        if self.ammo == 0 {
            return Err(FireRejection::OutOfAmmo);
        }
        Ok(())
    }

    /// Consume one round and start the cooldown, or report why not.
    pub fn try_fire(&mut self, direction: Vec3) -> Result<(), FireRejection> {
        self.check(direction)?;
        self.ammo -= 1;
        self.cooldown_remaining = self.fire_cooldown;
        Ok(())
    }

    /// Refill the magazine.
    pub fn reload(&mut self) -> ReloadOutcome {
        if self.ammo >= self.max_ammo {
            return ReloadOutcome::AlreadyFull;
        }
        self.ammo = self.max_ammo;
        ReloadOutcome::Reloaded
    }

    /// Count the fire cooldown down. A remainder within [`TIMER_EPSILON`]
    /// of zero is summation error and clears the cooldown.
    pub fn tick(&mut self, dt: f32) {
        if dt > 0.0 && dt.is_finite() {
            let remaining = self.cooldown_remaining - dt;
            self.cooldown_remaining = if remaining <= TIMER_EPSILON { 0.0 } else { remaining };
        }
    }

    /// Full magazine and no cooldown (used on respawn).
    pub fn reset(&mut self) {
        self.ammo = self.max_ammo;
        self.cooldown_remaining = 0.0;
    }
}
