//! Player Module
//!
//! First-person player body and the systems that move it.
//!
//! # Components
//!
//! - [`PlayerController`] - Owns the body and runs one tick in order:
//!   look, integrate, wall-run, resolve, apply
//! - [`LookState`] - Yaw/pitch from raw pointer deltas
//! - [`MovementController`] - Force-based kinematic integrator
//!   - Exponential friction, speed cap, gravity and edge-triggered jumps
//! - [`WallRunner`] - Wall detection, wall-run glide and wall-jumps

pub mod controller;
pub mod look;
pub mod movement_controller;
pub mod wall_run;

pub use controller::{MAX_HEALTH, PlayerController, PlayerDimensions};
pub use look::LookState;
pub use movement_controller::{MovementConfig, MovementController};
pub use wall_run::{
    WallContact, WallRunConfig, WallRunContext, WallRunEvent, WallRunExit, WallRunPhase,
    WallRunner, WallSide,
};
