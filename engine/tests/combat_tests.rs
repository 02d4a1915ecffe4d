//! Combat Tests - Projectile Lifetime, Ammo Gating and Enemies
//!
//! Exercises the weapon gate and projectile manager through the public API.

use glam::Vec3;
use wallrunner_engine::combat::{
    Enemy, EnemyConfig, FireOutcome, FireRejection, ProjectileManager, ReloadOutcome,
    WeaponConfig,
};

// ============================================================================
// Projectile lifetime
// ============================================================================

#[test]
fn test_projectile_alive_at_1_9s_gone_at_2_1s() {
    let mut projectiles = ProjectileManager::default();
    let FireOutcome::Fired(id) = projectiles.fire(Vec3::new(0.0, 2.0, 0.0), Vec3::NEG_Z) else {
        panic!("first shot must fire");
    };

    let mut expired = Vec::new();
    for _ in 0..19 {
        expired.extend(projectiles.update(0.1));
    }
    assert!(expired.is_empty());
    let projectile = projectiles.get(id).expect("alive at 1.9s");
    assert!((projectile.position.z + 95.0).abs() < 1e-2);

    for _ in 0..2 {
        expired.extend(projectiles.update(0.1));
    }
    assert_eq!(expired, vec![id]);
    assert!(projectiles.get(id).is_none());
    assert!(projectiles.instances().is_empty());
}

#[test]
fn test_instances_track_age() {
    let mut projectiles = ProjectileManager::default();
    projectiles.fire(Vec3::ZERO, Vec3::X);
    projectiles.update(0.5);
    let instances = projectiles.instances();
    assert_eq!(instances.len(), 1);
    assert!((instances[0].age - 0.5).abs() < 1e-6);
    assert!((instances[0].position[0] - 25.0).abs() < 1e-4);
}

// ============================================================================
// Ammo gating
// ============================================================================

#[test]
fn test_magazine_empties_then_reloads() {
    let mut projectiles = ProjectileManager::new(WeaponConfig::default());

    // 0.1s cooldown, one shot per 0.1s tick
    for shot in 0..30 {
        let outcome = projectiles.fire(Vec3::ZERO, Vec3::NEG_Z);
        assert!(outcome.is_fired(), "shot {shot} rejected: {outcome:?}");
        projectiles.update(0.1);
    }
    assert_eq!(projectiles.weapon().ammo(), 0);
    assert_eq!(
        projectiles.fire(Vec3::ZERO, Vec3::NEG_Z),
        FireOutcome::Rejected(FireRejection::OutOfAmmo)
    );

    assert_eq!(projectiles.reload(), ReloadOutcome::Reloaded);
    assert_eq!(projectiles.weapon().ammo(), 30);
    assert_eq!(projectiles.reload(), ReloadOutcome::AlreadyFull);
    assert!(projectiles.fire(Vec3::ZERO, Vec3::NEG_Z).is_fired());
}

#[test]
fn test_single_round_gated_by_cooldown_and_ammo() {
    let mut projectiles = ProjectileManager::new(WeaponConfig {
        max_ammo: 1,
        fire_cooldown: 0.1,
        ..Default::default()
    });

    // Two pulls inside the cooldown window: one projectile
    assert!(projectiles.fire(Vec3::ZERO, Vec3::NEG_Z).is_fired());
    assert!(!projectiles.fire(Vec3::ZERO, Vec3::NEG_Z).is_fired());
    assert_eq!(projectiles.active_count(), 1);
    assert_eq!(projectiles.weapon().ammo(), 0);

    assert_eq!(projectiles.reload(), ReloadOutcome::Reloaded);
    assert_eq!(projectiles.weapon().ammo(), 1);

    // Reload does not skip the cooldown
    assert_eq!(
        projectiles.fire(Vec3::ZERO, Vec3::NEG_Z),
        FireOutcome::Rejected(FireRejection::CoolingDown)
    );
    projectiles.update(0.1);
    assert!(projectiles.fire(Vec3::ZERO, Vec3::NEG_Z).is_fired());
    assert_eq!(projectiles.weapon().ammo(), 0);
    assert_eq!(projectiles.active_count(), 2);
}

#[test]
fn test_held_trigger_fires_ten_per_second_at_60hz() {
    let mut projectiles = ProjectileManager::default();
    let mut shots = 0;
    for _ in 0..60 {
        if projectiles.fire(Vec3::ZERO, Vec3::NEG_Z).is_fired() {
            shots += 1;
        }
        projectiles.update(1.0 / 60.0);
    }
    assert_eq!(shots, 10);
    assert_eq!(projectiles.weapon().ammo(), 20);
}

#[test]
fn test_cooldown_rejects_rapid_fire() {
    let mut projectiles = ProjectileManager::default();
    assert!(projectiles.fire(Vec3::ZERO, Vec3::X).is_fired());
    projectiles.update(0.05);
    assert_eq!(
        projectiles.fire(Vec3::ZERO, Vec3::X),
        FireOutcome::Rejected(FireRejection::CoolingDown)
    );
    projectiles.update(0.05);
    assert!(projectiles.fire(Vec3::ZERO, Vec3::X).is_fired());
    assert_eq!(projectiles.weapon().ammo(), 28);
}

#[test]
fn test_zero_direction_keeps_ammo() {
    let mut projectiles = ProjectileManager::default();
    assert_eq!(
        projectiles.fire(Vec3::ZERO, Vec3::ZERO),
        FireOutcome::Rejected(FireRejection::InvalidDirection)
    );
    assert_eq!(projectiles.weapon().ammo(), 30);
    assert_eq!(projectiles.active_count(), 0);
}

// ============================================================================
// Enemies
// ============================================================================

#[test]
fn test_enemy_closes_in_and_attacks() {
    let mut enemy = Enemy::new(Vec3::new(0.0, 2.0, -5.0), EnemyConfig::default());
    let target = Vec3::new(0.0, 2.0, 0.0);

    let mut damage = 0.0;
    for _ in 0..8 {
        damage += enemy.update(0.25, target).unwrap_or(0.0);
    }
    // Reaches attack range after ~0.6s, then strikes once per second
    assert!(damage >= 10.0);
    assert!(enemy.position().distance(target) < 2.0);
}
