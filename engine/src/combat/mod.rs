//! Combat Module
//!
//! - [`Weapon`] - Ammunition and fire cooldown gate
//! - [`ProjectileManager`] - Live projectile list behind the weapon gate
//! - [`Enemy`] - Chasing melee enemies

pub mod enemy;
pub mod projectiles;
pub mod weapon;

pub use enemy::{Enemy, EnemyConfig, EnemyState};
pub use projectiles::{FireOutcome, Projectile, ProjectileId, ProjectileManager};
pub use weapon::{FireRejection, ReloadOutcome, Weapon, WeaponConfig};
