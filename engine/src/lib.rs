//! Wallrunner Engine Library
//!
//! Movement core for a first-person wall-running shooter. The library is a
//! deterministic simulation: it takes a time step and one input record per
//! frame and returns a presentation snapshot. Rendering, audio, windowing and
//! asset loading live outside it.
//!
//! # Modules
//!
//! - [`physics`] - Boxes, rays and the collision resolver
//! - [`input`] - Key bindings and the per-frame input record
//! - [`player`] - Look, kinematic integrator, wall-run state machine, player body
//! - [`combat`] - Weapon gate, projectiles and enemies
//! - [`world`] - Level collider sources and the hallway course
//! - [`presentation`] - Frame snapshot, events and HUD tiers
//! - [`session`] - The per-frame driver tying everything together
//! - [`config`] - Serde configuration for every tunable
//!
//! # Example
//!
//! ```ignore
//! use wallrunner_engine::config::GameConfig;
//! use wallrunner_engine::input::FrameInput;
//! use wallrunner_engine::session::GameSession;
//! use wallrunner_engine::world::HallwayLevel;
//!
//! let config = GameConfig::default();
//! let mut session = GameSession::new(HallwayLevel::new(config.level), config);
//!
//! // Each frame:
//! let output = session.update(1.0 / 60.0, &FrameInput::new().forward());
//! println!("at {:?}, wall-running: {}", output.position, output.wall_running);
//! ```

pub mod combat;
pub mod config;
pub mod input;
pub mod physics;
pub mod player;
pub mod presentation;
pub mod session;
pub mod world;

// Re-export the types most callers need
pub use config::{ConfigError, GameConfig};
pub use input::{FrameInput, KeyBindings, KeyCode};
pub use physics::Aabb;
pub use player::PlayerController;
pub use presentation::{FrameOutput, HudSnapshot, PresentationEvent};
pub use session::GameSession;
pub use world::{ColliderSource, HallwayLevel};
