//! Melee enemies that chase the player.
//!
//! An enemy flies straight at the player while the player is inside its
//! detection range and strikes whenever the player is inside attack range and
//! its attack timer has run out. Enemies pass through level geometry.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::physics::types::TIMER_EPSILON;

/// Enemy tunables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyConfig {
    /// Chase speed in m/s
    pub speed: f32,
    /// Distance under which the enemy starts chasing
    pub detection_range: f32,
    /// Distance under which the enemy can strike
    pub attack_range: f32,
    /// Health removed per strike
    pub attack_damage: f32,
    /// Seconds between strikes
    pub attack_cooldown: f32,
    /// Starting health
    pub health: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            detection_range: 15.0,
            attack_range: 2.0,
            attack_damage: 10.0,
            attack_cooldown: 1.0,
            health: 100.0,
        }
    }
}

/// What an enemy did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnemyState {
    #[default]
    Idle,
    Chasing,
    Attacking,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    position: Vec3,
    health: f32,
    attack_cooldown_remaining: f32,
    state: EnemyState,
    config: EnemyConfig,
}

impl Enemy {
    pub fn new(position: Vec3, config: EnemyConfig) -> Self {
        Self {
            position,
            health: config.health,
            attack_cooldown_remaining: 0.0,
            state: EnemyState::Idle,
            config,
        }
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    pub fn state(&self) -> EnemyState {
        self.state
    }

    pub fn attack_cooldown_remaining(&self) -> f32 {
        self.attack_cooldown_remaining
    }

    /// Chase and maybe strike the player at `target`.
    ///
    /// Returns the damage dealt this tick, if any.
    pub fn update(&mut self, dt: f32, target: Vec3) -> Option<f32> {
        if dt <= 0.0 || !dt.is_finite() || !self.is_alive() {
            return None;
        }

        self.attack_cooldown_remaining = (self.attack_cooldown_remaining - dt).max(0.0);

        let to_target = target - self.position;
        let distance = to_target.length();

        self.state = EnemyState::Idle;
        if distance < self.config.detection_range {
            self.state = EnemyState::Chasing;
            // Do not overshoot the target in one step
            let step = (self.config.speed * dt).min(distance);
            self.position += to_target.normalize_or_zero() * step;
        }

        if distance < self.config.attack_range && self.attack_cooldown_remaining <= TIMER_EPSILON {
            self.state = EnemyState::Attacking;
            self.attack_cooldown_remaining = self.config.attack_cooldown;
            debug!(damage = self.config.attack_damage, "enemy attacks");
            return Some(self.config.attack_damage);
        }

        None
    }

    /// Subtract damage, clamped at zero. Returns `true` if this killed it.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() || !amount.is_finite() || amount <= 0.0 {
            return false;
        }
        self.health = (self.health - amount).max(0.0);
        !self.is_alive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enemy_at(position: Vec3) -> Enemy {
        Enemy::new(position, EnemyConfig::default())
    }

    #[test]
    fn test_idle_outside_detection_range() {
        let mut enemy = enemy_at(Vec3::new(0.0, 1.0, -30.0));
        assert!(enemy.update(0.1, Vec3::new(0.0, 1.0, 0.0)).is_none());
        assert_eq!(enemy.position(), Vec3::new(0.0, 1.0, -30.0));
        assert_eq!(enemy.state(), EnemyState::Idle);
    }

    #[test]
    fn test_chases_inside_detection_range() {
        let mut enemy = enemy_at(Vec3::new(0.0, 1.0, -10.0));
        enemy.update(0.1, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(enemy.state(), EnemyState::Chasing);
        assert!((enemy.position().z + 9.5).abs() < 1e-5);
    }

    #[test]
    fn test_attack_respects_cooldown() {
        let mut enemy = enemy_at(Vec3::new(0.0, 1.0, -1.0));
        let target = Vec3::new(0.0, 1.0, 0.0);

        assert_eq!(enemy.update(0.25, target), Some(10.0));
        assert_eq!(enemy.state(), EnemyState::Attacking);

        // 1s cooldown: three more 0.25s ticks are not enough
        for _ in 0..3 {
            assert!(enemy.update(0.25, target).is_none());
        }
        assert_eq!(enemy.update(0.25, target), Some(10.0));
    }

    #[test]
    fn test_take_damage_kills_once() {
        let mut enemy = enemy_at(Vec3::ZERO);
        assert!(!enemy.take_damage(60.0));
        assert!(enemy.take_damage(60.0));
        assert_eq!(enemy.health(), 0.0);
        assert!(!enemy.take_damage(10.0));
        assert!(enemy.update(0.1, Vec3::X).is_none());
    }
}
