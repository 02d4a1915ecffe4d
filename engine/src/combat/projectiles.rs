//! Projectile lifecycle management.
//!
//! Owns the weapon gate and the live projectile list, providing fire /
//! update / despawn / iterate operations with no renderer coupling. Motion is
//! straight-line and cosmetic: projectiles do not collide with the level or
//! with enemies.

use glam::Vec3;
use tracing::{debug, trace};

use crate::presentation::ProjectileInstance;

use super::weapon::{FireRejection, ReloadOutcome, Weapon, WeaponConfig};

/// Stable handle for a live projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(pub u64);

/// A live projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub id: ProjectileId,
    pub position: Vec3,
    pub velocity: Vec3,
    /// Seconds since spawn
    pub age: f32,
}

/// Result of [`ProjectileManager::fire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireOutcome {
    Fired(ProjectileId),
    Rejected(FireRejection),
}

impl FireOutcome {
    #[inline]
    pub fn is_fired(&self) -> bool {
        matches!(self, FireOutcome::Fired(_))
    }
}

/// Manages the weapon and every live projectile.
pub struct ProjectileManager {
    projectiles: Vec<Projectile>,
    weapon: Weapon,
    config: WeaponConfig,
    next_id: u64,
    /// Maximum number of simultaneously live projectiles; the oldest is
    /// dropped to make room.
    pub max_projectiles: usize,
}

impl Default for ProjectileManager {
    fn default() -> Self {
        Self::new(WeaponConfig::default())
    }
}

impl ProjectileManager {
    pub fn new(config: WeaponConfig) -> Self {
        Self {
            projectiles: Vec::new(),
            weapon: Weapon::from_config(&config),
            config,
            next_id: 0,
            max_projectiles: 128,
        }
    }

    pub fn config(&self) -> &WeaponConfig {
        &self.config
    }

    pub fn weapon(&self) -> &Weapon {
        &self.weapon
    }

    pub fn weapon_mut(&mut self) -> &mut Weapon {
        &mut self.weapon
    }

    /// Spawn a projectile at `origin` travelling along `direction`.
    ///
    /// Gated by the weapon: rejected shots spawn nothing and keep the ammo.
    pub fn fire(&mut self, origin: Vec3, direction: Vec3) -> FireOutcome {
        if let Err(reason) = self.weapon.try_fire(direction) {
            trace!(?reason, "fire rejected");
            return FireOutcome::Rejected(reason);
        }

        if self.projectiles.len() >= self.max_projectiles && !self.projectiles.is_empty() {
            let dropped = self.projectiles.remove(0);
            trace!(id = dropped.id.0, "dropping oldest projectile");
        }

        let id = ProjectileId(self.next_id);
        self.next_id += 1;
        self.projectiles.push(Projectile {
            id,
            position: origin,
            velocity: direction.normalize() * self.config.projectile_speed,
            age: 0.0,
        });

        debug!(id = id.0, ammo = self.weapon.ammo(), "projectile fired");
        FireOutcome::Fired(id)
    }

    /// Refill the weapon.
    pub fn reload(&mut self) -> ReloadOutcome {
        let outcome = self.weapon.reload();
        if outcome == ReloadOutcome::Reloaded {
            debug!(ammo = self.weapon.ammo(), "weapon reloaded");
        }
        outcome
    }

    /// Advance every projectile and the weapon cooldown.
    ///
    /// Returns the ids of projectiles whose age passed the lifetime this
    /// tick; they are already removed, so the caller only releases whatever
    /// it attached to them.
    pub fn update(&mut self, dt: f32) -> Vec<ProjectileId> {
        if dt <= 0.0 || !dt.is_finite() {
            return Vec::new();
        }

        self.weapon.tick(dt);

        let lifetime = self.config.projectile_lifetime;
        let mut expired = Vec::new();
        self.projectiles.retain_mut(|projectile| {
            projectile.position += projectile.velocity * dt;
            projectile.age += dt;
            if projectile.age > lifetime {
                expired.push(projectile.id);
                false
            } else {
                true
            }
        });

        expired
    }

    /// Remove one projectile. Returns `false` if it was not live.
    pub fn despawn(&mut self, id: ProjectileId) -> bool {
        let before = self.projectiles.len();
        self.projectiles.retain(|p| p.id != id);
        self.projectiles.len() != before
    }

    /// Remove all projectiles.
    pub fn clear(&mut self) {
        self.projectiles.clear();
    }

    /// Remove all projectiles and restore the weapon to full.
    pub fn reset(&mut self) {
        self.clear();
        self.weapon.reset();
    }

    /// Number of live projectiles.
    pub fn active_count(&self) -> usize {
        self.projectiles.len()
    }

    pub fn get(&self, id: ProjectileId) -> Option<&Projectile> {
        self.projectiles.iter().find(|p| p.id == id)
    }

    /// Iterate over live projectiles (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = &Projectile> {
        self.projectiles.iter()
    }

    /// GPU-ready instance records for the live projectiles.
    pub fn instances(&self) -> Vec<ProjectileInstance> {
        self.projectiles
            .iter()
            .map(|p| ProjectileInstance::new(p.position, p.age))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> ProjectileManager {
        ProjectileManager::new(WeaponConfig {
            fire_cooldown: 0.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_fire_spawns_at_speed() {
        let mut projectiles = manager();
        let outcome = projectiles.fire(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -3.0));
        let FireOutcome::Fired(id) = outcome else {
            panic!("expected a shot, got {outcome:?}");
        };
        let projectile = projectiles.get(id).unwrap();
        assert_eq!(projectile.velocity, Vec3::new(0.0, 0.0, -50.0));
        assert_eq!(projectile.age, 0.0);
        assert_eq!(projectiles.weapon().ammo(), 29);
    }

    #[test]
    fn test_update_moves_in_straight_line() {
        let mut projectiles = manager();
        projectiles.fire(Vec3::ZERO, Vec3::X);
        projectiles.update(0.1);
        let projectile = projectiles.iter().next().unwrap();
        assert!((projectile.position - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);
        assert!((projectile.age - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_expiry_reports_ids() {
        let mut projectiles = manager();
        let FireOutcome::Fired(id) = projectiles.fire(Vec3::ZERO, Vec3::X) else {
            panic!("expected a shot");
        };
        assert!(projectiles.update(1.5).is_empty());
        assert_eq!(projectiles.update(1.0), vec![id]);
        assert_eq!(projectiles.active_count(), 0);
    }

    #[test]
    fn test_rejected_fire_spawns_nothing() {
        let mut projectiles = ProjectileManager::default();
        assert!(projectiles.fire(Vec3::ZERO, Vec3::X).is_fired());
        assert_eq!(
            projectiles.fire(Vec3::ZERO, Vec3::X),
            FireOutcome::Rejected(FireRejection::CoolingDown)
        );
        assert_eq!(
            projectiles.fire(Vec3::ZERO, Vec3::ZERO),
            FireOutcome::Rejected(FireRejection::InvalidDirection)
        );
        assert_eq!(projectiles.active_count(), 1);
    }

    #[test]
    fn test_capacity_drops_oldest() {
        let mut projectiles = manager();
        projectiles.max_projectiles = 2;
        projectiles.fire(Vec3::ZERO, Vec3::X);
        projectiles.fire(Vec3::ZERO, Vec3::X);
        projectiles.fire(Vec3::ZERO, Vec3::X);
        let ids: Vec<u64> = projectiles.iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_despawn_and_clear() {
        let mut projectiles = manager();
        let FireOutcome::Fired(first) = projectiles.fire(Vec3::ZERO, Vec3::X) else {
            panic!("expected a shot");
        };
        projectiles.fire(Vec3::ZERO, Vec3::Z);
        assert!(projectiles.despawn(first));
        assert!(!projectiles.despawn(first));
        assert_eq!(projectiles.active_count(), 1);
        projectiles.clear();
        assert_eq!(projectiles.active_count(), 0);
    }

    #[test]
    fn test_instances_mirror_live_list() {
        let mut projectiles = manager();
        projectiles.fire(Vec3::new(1.0, 2.0, 3.0), Vec3::X);
        let instances = projectiles.instances();
        assert_eq!(instances.len(), 1);
        assert_eq!(instances[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(instances[0].age, 0.0);
    }
}
