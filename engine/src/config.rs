//! Game configuration
//!
//! Every tunable of the simulation in one serde document. Each group has a
//! `Default` holding the stock values, and `#[serde(default)]` on every struct
//! means a JSON file only needs the fields it changes:
//!
//! ```json
//! { "movement": { "gravity": 30.0 }, "weapon": { "max_ammo": 12 } }
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::combat::{EnemyConfig, WeaponConfig};
use crate::player::look::DEFAULT_SENSITIVITY;
use crate::player::{MovementConfig, PlayerDimensions, WallRunConfig};
use crate::world::HallwayLayout;

/// Error loading or validating a [`GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// Standard I/O error.
    Io(std::io::Error),
    /// JSON deserialization error.
    Json(serde_json::Error),
    /// A value is outside its allowed range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {e}"),
            ConfigError::Json(e) => write!(f, "JSON error: {e}"),
            ConfigError::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Json(e)
    }
}

/// Where the player comes back after dying or falling out of the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RespawnConfig {
    /// Eye position on respawn
    pub spawn_point: Vec3,
    /// Falling below this height respawns the player
    pub kill_plane_y: f32,
}

impl Default for RespawnConfig {
    fn default() -> Self {
        Self {
            spawn_point: Vec3::new(0.0, 2.0, 5.0),
            kill_plane_y: -50.0,
        }
    }
}

/// All simulation tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerDimensions,
    pub movement: MovementConfig,
    pub wall_run: WallRunConfig,
    pub weapon: WeaponConfig,
    pub enemy: EnemyConfig,
    pub respawn: RespawnConfig,
    pub level: HallwayLayout,
    /// Radians per pixel of pointer movement
    pub mouse_sensitivity: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player: PlayerDimensions::default(),
            movement: MovementConfig::default(),
            wall_run: WallRunConfig::default(),
            weapon: WeaponConfig::default(),
            enemy: EnemyConfig::default(),
            respawn: RespawnConfig::default(),
            level: HallwayLayout::default(),
            mouse_sensitivity: DEFAULT_SENSITIVITY,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        positive("player.height", player.height)?;
        positive("player.width", player.width)?;
        non_negative("player.head_clearance", player.head_clearance)?;
        non_negative("player.skin", player.skin)?;
        if player.skin >= player.height {
            return Err(invalid("player.skin must be smaller than player.height"));
        }

        let movement = &self.movement;
        non_negative("movement.gravity", movement.gravity)?;
        non_negative("movement.ground_stick_velocity", movement.ground_stick_velocity)?;
        non_negative("movement.jump_impulse", movement.jump_impulse)?;
        positive("movement.jump_boost", movement.jump_boost)?;
        non_negative("movement.ground_acceleration", movement.ground_acceleration)?;
        non_negative("movement.air_acceleration", movement.air_acceleration)?;
        retention("movement.ground_friction", movement.ground_friction)?;
        retention("movement.air_friction", movement.air_friction)?;
        positive("movement.max_speed", movement.max_speed)?;
        if !(0.0..=1.0).contains(&movement.wall_restitution) {
            return Err(invalid(format!(
                "movement.wall_restitution must be in [0, 1], got {}",
                movement.wall_restitution
            )));
        }

        let wall_run = &self.wall_run;
        if wall_run.probe_count == 0 {
            return Err(invalid("wall_run.probe_count must be at least 1"));
        }
        positive("wall_run.probe_distance", wall_run.probe_distance)?;
        non_negative("wall_run.probe_fan_degrees", wall_run.probe_fan_degrees)?;
        non_negative("wall_run.min_speed", wall_run.min_speed)?;
        positive("wall_run.speed", wall_run.speed)?;
        positive("wall_run.max_time", wall_run.max_time)?;
        non_negative("wall_run.cooldown", wall_run.cooldown)?;
        if !(-1.0..=1.0).contains(&wall_run.head_on_dot) {
            return Err(invalid("wall_run.head_on_dot must be in [-1, 1]"));
        }

        let weapon = &self.weapon;
        positive("weapon.projectile_speed", weapon.projectile_speed)?;
        positive("weapon.projectile_lifetime", weapon.projectile_lifetime)?;
        non_negative("weapon.fire_cooldown", weapon.fire_cooldown)?;
        if weapon.max_ammo == 0 {
            return Err(invalid("weapon.max_ammo must be at least 1"));
        }

        let enemy = &self.enemy;
        non_negative("enemy.speed", enemy.speed)?;
        non_negative("enemy.attack_range", enemy.attack_range)?;
        non_negative("enemy.attack_cooldown", enemy.attack_cooldown)?;
        positive("enemy.health", enemy.health)?;

        if !self.respawn.spawn_point.is_finite() || !self.respawn.kill_plane_y.is_finite() {
            return Err(invalid("respawn values must be finite"));
        }
        if self.respawn.kill_plane_y >= self.respawn.spawn_point.y {
            return Err(invalid("respawn.kill_plane_y must be below the spawn point"));
        }

        positive("mouse_sensitivity", self.mouse_sensitivity)?;

        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> ConfigError {
    let msg = msg.into();
    warn!(%msg, "config rejected");
    ConfigError::Invalid(msg)
}

fn positive(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

fn non_negative(name: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must not be negative, got {value}")))
    }
}

/// Per-frame retention factor in `(0, 1]`.
fn retention(name: &str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be in (0, 1], got {value}")))
    }
}
