//! Game Session
//!
//! The per-frame driver. A session owns the level, the player, the weapon and
//! projectiles and the enemies, and advances all of them by one tick per
//! [`GameSession::update`] call:
//!
//! 1. Player: look, movement, wall-run, collision
//! 2. Weapon: fire (held trigger fires at the cooldown rate) and reload
//! 3. Projectiles: advance and expire
//! 4. Enemies: chase and attack the player
//! 5. Respawn the player if dead or below the kill plane
//!
//! The session is single-threaded and takes `dt` from the caller, so a fixed
//! `dt` sequence always reproduces the same run.

use glam::Vec3;
use tracing::{debug, info};

use crate::combat::{Enemy, FireOutcome, FireRejection, ProjectileManager, ReloadOutcome};
use crate::config::GameConfig;
use crate::input::FrameInput;
use crate::player::PlayerController;
use crate::presentation::{FrameOutput, PresentationEvent, RespawnReason};
use crate::world::ColliderSource;

pub struct GameSession<W: ColliderSource> {
    world: W,
    config: GameConfig,
    player: PlayerController,
    projectiles: ProjectileManager,
    enemies: Vec<Enemy>,
    fire_held: bool,
    reload_held: bool,
    ticks: u64,
}

impl<W: ColliderSource> GameSession<W> {
    /// Start a session with the player at the configured spawn point.
    pub fn new(world: W, config: GameConfig) -> Self {
        let mut player = PlayerController::new(
            config.respawn.spawn_point,
            config.player,
            config.movement,
            config.wall_run,
        );
        player.look_mut().sensitivity = config.mouse_sensitivity;

        info!(
            colliders = world.colliders().len(),
            spawn = ?config.respawn.spawn_point,
            "session started"
        );

        Self {
            world,
            config,
            player,
            projectiles: ProjectileManager::new(config.weapon),
            enemies: Vec::new(),
            fire_held: false,
            reload_held: false,
            ticks: 0,
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerController {
        &mut self.player
    }

    pub fn projectiles(&self) -> &ProjectileManager {
        &self.projectiles
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn enemies_mut(&mut self) -> &mut Vec<Enemy> {
        &mut self.enemies
    }

    /// Number of ticks with a positive `dt` so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Add an enemy using the configured enemy tunables.
    pub fn spawn_enemy(&mut self, position: Vec3) {
        self.enemies.push(Enemy::new(position, self.config.enemy));
        debug!(?position, count = self.enemies.len(), "enemy spawned");
    }

    /// Advance the whole game by `dt` seconds.
    ///
    /// `dt <= 0` (or non-finite) changes nothing and returns the current
    /// snapshot with no events.
    pub fn update(&mut self, dt: f32, input: &FrameInput) -> FrameOutput {
        let mut events = Vec::new();
        if dt <= 0.0 || !dt.is_finite() {
            return self.snapshot(events);
        }
        self.ticks += 1;

        self.player
            .update(dt, input, self.world.colliders(), &mut events);

        self.update_weapon(input, &mut events);

        for id in self.projectiles.update(dt) {
            events.push(PresentationEvent::ProjectileExpired { id });
        }

        self.update_enemies(dt, &mut events);

        if self.player.is_dead() {
            self.respawn_player(RespawnReason::Died, &mut events);
        } else if self.player.position().y < self.config.respawn.kill_plane_y {
            self.respawn_player(RespawnReason::FellOutOfWorld, &mut events);
        }

        self.snapshot(events)
    }

    fn update_weapon(&mut self, input: &FrameInput, events: &mut Vec<PresentationEvent>) {
        let fire_pressed = input.fire && !self.fire_held;
        self.fire_held = input.fire;

        if input.fire {
            let direction = self.player.look().forward();
            let origin = self.player.position() + direction * self.config.weapon.muzzle_offset;
            match self.projectiles.fire(origin, direction) {
                FireOutcome::Fired(id) => events.push(PresentationEvent::Fired {
                    id,
                    origin,
                    direction,
                }),
                // Holding the trigger through the cooldown is not a dry fire
                FireOutcome::Rejected(FireRejection::CoolingDown) => {}
                FireOutcome::Rejected(reason) => {
                    if fire_pressed {
                        events.push(PresentationEvent::DryFire { reason });
                    }
                }
            }
        }

        let reload_pressed = input.reload && !self.reload_held;
        self.reload_held = input.reload;
        if reload_pressed && self.projectiles.reload() == ReloadOutcome::Reloaded {
            events.push(PresentationEvent::Reloaded);
        }
    }

    fn update_enemies(&mut self, dt: f32, events: &mut Vec<PresentationEvent>) {
        let target = self.player.position();
        for enemy in &mut self.enemies {
            if let Some(amount) = enemy.update(dt, target) {
                let health = self.player.apply_damage(amount);
                events.push(PresentationEvent::PlayerDamaged { amount, health });
            }
        }
        self.enemies.retain(Enemy::is_alive);
    }

    fn respawn_player(&mut self, reason: RespawnReason, events: &mut Vec<PresentationEvent>) {
        info!(?reason, "respawning player");
        self.player.respawn(self.config.respawn.spawn_point);
        self.projectiles.weapon_mut().reset();
        events.push(PresentationEvent::Respawned { reason });
    }

    fn snapshot(&self, events: Vec<PresentationEvent>) -> FrameOutput {
        let look = self.player.look();
        let weapon = self.projectiles.weapon();
        FrameOutput {
            position: self.player.position(),
            yaw: look.yaw,
            pitch: look.pitch(),
            camera_tilt_target: self.player.camera_tilt_target(),
            grounded: self.player.is_grounded(),
            wall_running: self.player.is_wall_running(),
            health: self.player.health(),
            ammo: weapon.ammo(),
            max_ammo: weapon.max_ammo(),
            projectiles: self.projectiles.instances(),
            events,
        }
    }
}
