//! Input Module
//!
//! Platform-agnostic input boundary. The platform layer tracks which physical
//! keys are down and how far the pointer moved; [`KeyBindings::resolve`] turns
//! that into one [`FrameInput`] per tick, which is all the simulation reads.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::HashSet;
//! use wallrunner_engine::input::{KeyBindings, KeyCode};
//! use glam::Vec2;
//!
//! let bindings = KeyBindings::new();
//! let mut pressed = HashSet::new();
//! pressed.insert(KeyCode::W);
//!
//! let input = bindings.resolve(&pressed, Vec2::new(mouse_dx, mouse_dy));
//! session.update(dt, &input);
//! ```

pub mod bindings;
pub mod frame;
pub mod keyboard;

pub use bindings::{InputAction, KeyBindings};
pub use frame::FrameInput;
pub use keyboard::KeyCode;
