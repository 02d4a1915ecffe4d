//! Wall-Run State Machine
//!
//! Lets an airborne player glide along a vertical surface.
//!
//! # States
//!
//! ```text
//! Idle --(airborne, fast enough, wall accepted, not latched)--> Running
//! Running --(timeout | wall lost | jump | landed)--> exit
//! exit --(jump held: wall-jump)--> Idle
//! exit --(otherwise)--> Cooldown --(timer elapsed)--> Idle
//! ```
//!
//! # Detection
//!
//! A fan of horizontal probes around the player's right axis is cast to both
//! sides. Hits on floor/ceiling faces are ignored, as are hits whose wall the
//! player is driving straight into (`-normal · velocity_dir > head_on_dot`):
//! those should stop the player, not start a run. The nearest accepted hit
//! wins. Probing a fan rather than a single ray catches walls approached at
//! shallow or diagonal angles.
//!
//! All timers are plain fields advanced by [`WallRunner::update`], so a run is
//! fully deterministic for a given `dt` sequence.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::physics::aabb::Aabb;
use crate::physics::types::{DIRECTION_EPSILON_SQ, TIMER_EPSILON, horizontal, horizontal_speed};

/// Normals with a larger vertical component are floors or ceilings.
const MAX_WALL_NORMAL_Y: f32 = 0.5;

/// Dot product above which two wall normals are the same wall orientation.
const SAME_WALL_DOT: f32 = 0.99;

/// Tunables for wall detection and wall-running.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallRunConfig {
    /// Minimum horizontal speed to start a run, in m/s
    pub min_speed: f32,
    /// Probe reach from the body center, in meters
    pub probe_distance: f32,
    /// Half-width of the probe fan around the right axis, in degrees
    pub probe_fan_degrees: f32,
    /// Number of probe angles per side (spread evenly over the fan)
    pub probe_count: u32,
    /// Head-on rejection threshold for `-normal · velocity_dir`
    pub head_on_dot: f32,
    /// Glide speed along the wall, in m/s
    pub speed: f32,
    /// Constant sink speed while running, in m/s
    pub fall_speed: f32,
    /// Inward velocity toward the wall per second of run
    pub stick_force: f32,
    /// Longest run before a forced exit, in seconds
    pub max_time: f32,
    /// Re-entry lockout after a non-jump exit, in seconds
    pub cooldown: f32,
    /// Vertical speed of a wall-jump, in m/s
    pub wall_jump_impulse: f32,
    /// Horizontal speed of a wall-jump, in m/s
    pub wall_jump_push: f32,
    /// Weight of the wall normal against camera forward in the launch vector
    pub wall_jump_normal_weight: f32,
    /// Camera roll target while running, in degrees
    pub camera_tilt_degrees: f32,
}

impl Default for WallRunConfig {
    fn default() -> Self {
        Self {
            min_speed: 5.0,
            probe_distance: 1.0,
            probe_fan_degrees: 45.0,
            probe_count: 5,
            head_on_dot: 0.8,
            speed: 12.0,
            fall_speed: 1.5,
            stick_force: 20.0,
            max_time: 1.5,
            cooldown: 0.5,
            wall_jump_impulse: 10.0,
            wall_jump_push: 12.0,
            wall_jump_normal_weight: 1.0,
            camera_tilt_degrees: 15.0,
        }
    }
}

impl WallRunConfig {
    /// Probe angles in radians, evenly spread over `[-fan, +fan]`.
    pub fn probe_angles(&self) -> Vec<f32> {
        let fan = self.probe_fan_degrees.to_radians();
        match self.probe_count {
            0 => Vec::new(),
            1 => vec![0.0],
            n => {
                let step = 2.0 * fan / (n - 1) as f32;
                (0..n).map(|i| -fan + step * i as f32).collect()
            }
        }
    }
}

/// Which side of the player the wall is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// +1 for right, -1 for left.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            WallSide::Left => -1.0,
            WallSide::Right => 1.0,
        }
    }
}

/// An accepted probe hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallContact {
    /// Outward wall normal (horizontal)
    pub normal: Vec3,
    /// World-space hit point
    pub point: Vec3,
    /// Distance from the probe origin
    pub distance: f32,
    pub side: WallSide,
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallRunExit {
    /// Accumulated run time reached `max_time`
    Timeout,
    /// No accepted wall within probe reach
    WallLost,
    /// Jump pressed during the run
    Jump,
    /// Floor contact reported by the resolver
    Landed,
}

/// Transition reported by [`WallRunner::update`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WallRunEvent {
    Started { side: WallSide, normal: Vec3 },
    Ended { reason: WallRunExit, wall_jump: bool },
}

/// Current machine state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum WallRunPhase {
    #[default]
    Idle,
    Running {
        normal: Vec3,
        side: WallSide,
        elapsed: f32,
    },
    Cooldown {
        remaining: f32,
    },
}

/// Per-tick inputs for the state machine.
#[derive(Debug, Clone, Copy)]
pub struct WallRunContext<'a> {
    pub dt: f32,
    /// Probe origin (body center)
    pub origin: Vec3,
    /// Camera forward, yaw only
    pub forward: Vec3,
    /// Camera right, yaw only
    pub right: Vec3,
    pub grounded: bool,
    /// Jump went down this tick
    pub jump_pressed: bool,
    /// Jump is held this tick
    pub jump_held: bool,
    pub obstacles: &'a [Aabb],
}

/// Wall-run state machine.
#[derive(Debug, Clone)]
pub struct WallRunner {
    phase: WallRunPhase,
    config: WallRunConfig,
    /// Fan angles in radians, built once from the config
    probe_angles: Vec<f32>,
    /// Normal of the wall last jumped off; that wall cannot be re-latched
    /// until the player lands or runs on a different wall.
    last_jump_normal: Option<Vec3>,
    camera_tilt_target: f32,
}

impl Default for WallRunner {
    fn default() -> Self {
        Self::new(WallRunConfig::default())
    }
}

impl WallRunner {
    pub fn new(config: WallRunConfig) -> Self {
        Self {
            phase: WallRunPhase::Idle,
            probe_angles: config.probe_angles(),
            config,
            last_jump_normal: None,
            camera_tilt_target: 0.0,
        }
    }

    pub fn config(&self) -> &WallRunConfig {
        &self.config
    }

    pub fn phase(&self) -> WallRunPhase {
        self.phase
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        matches!(self.phase, WallRunPhase::Running { .. })
    }

    #[inline]
    pub fn is_cooling_down(&self) -> bool {
        matches!(self.phase, WallRunPhase::Cooldown { .. })
    }

    pub fn cooldown_remaining(&self) -> f32 {
        match self.phase {
            WallRunPhase::Cooldown { remaining } => remaining.max(0.0),
            _ => 0.0,
        }
    }

    /// Normal of the wall being run on.
    pub fn wall_normal(&self) -> Option<Vec3> {
        match self.phase {
            WallRunPhase::Running { normal, .. } => Some(normal),
            _ => None,
        }
    }

    pub fn side(&self) -> Option<WallSide> {
        match self.phase {
            WallRunPhase::Running { side, .. } => Some(side),
            _ => None,
        }
    }

    /// Seconds spent in the current run.
    pub fn elapsed(&self) -> f32 {
        match self.phase {
            WallRunPhase::Running { elapsed, .. } => elapsed,
            _ => 0.0,
        }
    }

    /// Camera roll target in radians; positive rolls toward the right.
    pub fn camera_tilt_target(&self) -> f32 {
        self.camera_tilt_target
    }

    /// Drop any run, cooldown and latch memory (used on respawn).
    pub fn reset(&mut self) {
        self.phase = WallRunPhase::Idle;
        self.last_jump_normal = None;
        self.camera_tilt_target = 0.0;
    }

    /// Cast the probe fan and return the nearest accepted wall.
    pub fn detect(
        &self,
        origin: Vec3,
        right: Vec3,
        velocity: Vec3,
        obstacles: &[Aabb],
    ) -> Option<WallContact> {
        let velocity_dir = horizontal(velocity).normalize_or_zero();
        let right = horizontal(right).normalize_or_zero();
        if right == Vec3::ZERO {
            return None;
        }

        let mut best: Option<WallContact> = None;

        for &angle in &self.probe_angles {
            let fan_dir = Quat::from_rotation_y(angle) * right;
            for dir in [fan_dir, -fan_dir] {
                for obstacle in obstacles {
                    if obstacle.contains_point(origin) {
                        continue;
                    }
                    let t = match obstacle.ray_intersect(origin, dir) {
                        Some(t) if t <= self.config.probe_distance => t,
                        _ => continue,
                    };

                    let point = origin + dir * t;
                    let normal = obstacle.surface_normal(point);
                    if normal.y.abs() > MAX_WALL_NORMAL_Y {
                        continue;
                    }

                    let approach = (-normal).dot(velocity_dir);
                    if approach > self.config.head_on_dot {
                        trace!(approach, "rejecting head-on wall hit");
                        continue;
                    }

                    if best.is_none_or(|b| t < b.distance) {
                        let side = if normal.dot(right) < 0.0 {
                            WallSide::Right
                        } else {
                            WallSide::Left
                        };
                        best = Some(WallContact {
                            normal,
                            point,
                            distance: t,
                            side,
                        });
                    }
                }
            }
        }

        best
    }

    /// Advance the machine by one tick, overriding `velocity` while running
    /// and on a wall-jump.
    pub fn update(&mut self, ctx: &WallRunContext<'_>, velocity: &mut Vec3) -> Option<WallRunEvent> {
        if ctx.dt <= 0.0 || !ctx.dt.is_finite() {
            return None;
        }

        if ctx.grounded {
            self.last_jump_normal = None;
        }

        if let WallRunPhase::Cooldown { remaining } = &mut self.phase {
            *remaining -= ctx.dt;
            if *remaining <= TIMER_EPSILON {
                self.phase = WallRunPhase::Idle;
            }
        }

        match self.phase {
            WallRunPhase::Running { normal, elapsed, .. } => {
                let elapsed = elapsed + ctx.dt;

                let forced_exit = if ctx.jump_pressed {
                    Some(WallRunExit::Jump)
                } else if ctx.grounded {
                    Some(WallRunExit::Landed)
                } else if elapsed >= self.config.max_time - TIMER_EPSILON {
                    Some(WallRunExit::Timeout)
                } else {
                    None
                };
                if let Some(reason) = forced_exit {
                    return Some(self.exit(reason, normal, ctx, velocity));
                }

                match self.detect(ctx.origin, ctx.right, *velocity, ctx.obstacles) {
                    Some(contact) => {
                        self.phase = WallRunPhase::Running {
                            normal: contact.normal,
                            side: contact.side,
                            elapsed,
                        };
                        self.camera_tilt_target = self.tilt_for(contact.side);
                        self.glide(contact.normal, ctx, velocity);
                        None
                    }
                    None => Some(self.exit(WallRunExit::WallLost, normal, ctx, velocity)),
                }
            }
            WallRunPhase::Idle => {
                if ctx.grounded || horizontal_speed(*velocity) < self.config.min_speed {
                    return None;
                }

                let contact = self.detect(ctx.origin, ctx.right, *velocity, ctx.obstacles)?;
                if self
                    .last_jump_normal
                    .is_some_and(|n| n.dot(contact.normal) > SAME_WALL_DOT)
                {
                    return None;
                }

                self.last_jump_normal = None;
                self.phase = WallRunPhase::Running {
                    normal: contact.normal,
                    side: contact.side,
                    elapsed: 0.0,
                };
                self.camera_tilt_target = self.tilt_for(contact.side);
                self.glide(contact.normal, ctx, velocity);

                debug!(side = ?contact.side, distance = contact.distance, "wall-run started");
                Some(WallRunEvent::Started {
                    side: contact.side,
                    normal: contact.normal,
                })
            }
            WallRunPhase::Cooldown { .. } => None,
        }
    }

    fn tilt_for(&self, side: WallSide) -> f32 {
        side.sign() * self.config.camera_tilt_degrees.to_radians()
    }

    /// Glide along the wall tangent toward where the camera faces, sink
    /// slowly and lean into the wall.
    fn glide(&self, normal: Vec3, ctx: &WallRunContext<'_>, velocity: &mut Vec3) {
        let tangent = |v: Vec3| {
            let h = horizontal(v);
            h - normal * h.dot(normal)
        };

        let mut dir = tangent(ctx.forward);
        if dir.length_squared() < DIRECTION_EPSILON_SQ {
            // Facing straight into the wall: keep the current run direction
            dir = tangent(*velocity);
        }
        let dir = dir.normalize_or_zero();

        velocity.x = dir.x * self.config.speed;
        velocity.z = dir.z * self.config.speed;
        velocity.y = -self.config.fall_speed;
        *velocity -= normal * self.config.stick_force * ctx.dt;
    }

    fn exit(
        &mut self,
        reason: WallRunExit,
        normal: Vec3,
        ctx: &WallRunContext<'_>,
        velocity: &mut Vec3,
    ) -> WallRunEvent {
        self.camera_tilt_target = 0.0;

        let wall_jump = ctx.jump_held && reason != WallRunExit::Landed;
        if wall_jump {
            let launch = horizontal(normal * self.config.wall_jump_normal_weight + ctx.forward);
            let dir = if launch.length_squared() > DIRECTION_EPSILON_SQ {
                launch.normalize()
            } else {
                normal
            };

            velocity.x = dir.x * self.config.wall_jump_push;
            velocity.z = dir.z * self.config.wall_jump_push;
            velocity.y = self.config.wall_jump_impulse;

            self.last_jump_normal = Some(normal);
            self.phase = WallRunPhase::Idle;
        } else {
            self.phase = WallRunPhase::Cooldown {
                remaining: self.config.cooldown,
            };
        }

        debug!(?reason, wall_jump, "wall-run ended");
        WallRunEvent::Ended { reason, wall_jump }
    }
}
