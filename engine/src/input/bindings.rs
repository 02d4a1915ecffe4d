//! Input Bindings Module
//!
//! Maps physical keys to logical actions and resolves the pressed-key set into
//! a [`FrameInput`] once per frame, so the simulation never looks keys up by
//! name.

use std::collections::{HashMap, HashSet};

use glam::Vec2;

use super::frame::FrameInput;
use super::keyboard::KeyCode;

/// Logical input actions that can be bound to physical keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    /// Move forward (default: W)
    MoveForward,
    /// Move backward (default: S)
    MoveBack,
    /// Strafe left (default: A)
    MoveLeft,
    /// Strafe right (default: D)
    MoveRight,
    /// Jump / wall-jump (default: Space)
    Jump,
    /// Fire weapon (default: left mouse button)
    Fire,
    /// Reload weapon (default: R)
    Reload,
}

impl InputAction {
    /// Every action, in declaration order.
    pub const ALL: [InputAction; 7] = [
        InputAction::MoveForward,
        InputAction::MoveBack,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Jump,
        InputAction::Fire,
        InputAction::Reload,
    ];
}

/// Maps physical keys to logical actions, supporting customizable key bindings.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    /// Map from physical key to logical action
    key_to_action: HashMap<KeyCode, InputAction>,
    /// Map from logical action to physical key (for reverse lookup and display)
    action_to_key: HashMap<InputAction, KeyCode>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyBindings {
    /// Create a new KeyBindings instance with default key mappings.
    ///
    /// Default bindings:
    /// - W = MoveForward
    /// - S = MoveBack
    /// - A = MoveLeft
    /// - D = MoveRight
    /// - Space = Jump
    /// - Left mouse button = Fire
    /// - R = Reload
    pub fn new() -> Self {
        let mut bindings = Self::empty();

        bindings.bind(KeyCode::W, InputAction::MoveForward);
        bindings.bind(KeyCode::S, InputAction::MoveBack);
        bindings.bind(KeyCode::A, InputAction::MoveLeft);
        bindings.bind(KeyCode::D, InputAction::MoveRight);
        bindings.bind(KeyCode::Space, InputAction::Jump);
        bindings.bind(KeyCode::MouseLeft, InputAction::Fire);
        bindings.bind(KeyCode::R, InputAction::Reload);

        bindings
    }

    /// Create a KeyBindings instance with nothing bound.
    pub fn empty() -> Self {
        Self {
            key_to_action: HashMap::new(),
            action_to_key: HashMap::new(),
        }
    }

    /// Bind a physical key to a logical action.
    ///
    /// If the key was previously bound to another action, that binding is removed.
    /// If the action was previously bound to another key, that binding is also removed.
    pub fn bind(&mut self, key: KeyCode, action: InputAction) {
        if let Some(old_action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&old_action);
        }
        if let Some(old_key) = self.action_to_key.remove(&action) {
            self.key_to_action.remove(&old_key);
        }

        self.key_to_action.insert(key, action);
        self.action_to_key.insert(action, key);
    }

    /// Remove the binding for a specific key.
    pub fn unbind_key(&mut self, key: KeyCode) {
        if let Some(action) = self.key_to_action.remove(&key) {
            self.action_to_key.remove(&action);
        }
    }

    /// Get the action bound to a physical key, if any.
    pub fn get_action(&self, key: KeyCode) -> Option<InputAction> {
        self.key_to_action.get(&key).copied()
    }

    /// Get the key bound to a logical action, if any.
    pub fn get_key(&self, action: InputAction) -> Option<KeyCode> {
        self.action_to_key.get(&action).copied()
    }

    /// Check if a specific action is currently pressed, given a set of pressed keys.
    pub fn is_action_pressed(&self, action: InputAction, pressed_keys: &HashSet<KeyCode>) -> bool {
        self.action_to_key
            .get(&action)
            .is_some_and(|key| pressed_keys.contains(key))
    }

    /// Resolve the pressed keys and this frame's pointer delta into the
    /// immutable per-tick input record.
    pub fn resolve(&self, pressed_keys: &HashSet<KeyCode>, look_delta: Vec2) -> FrameInput {
        let pressed = |action| self.is_action_pressed(action, pressed_keys);
        FrameInput {
            move_forward: pressed(InputAction::MoveForward),
            move_back: pressed(InputAction::MoveBack),
            move_left: pressed(InputAction::MoveLeft),
            move_right: pressed(InputAction::MoveRight),
            jump: pressed(InputAction::Jump),
            fire: pressed(InputAction::Fire),
            reload: pressed(InputAction::Reload),
            look_delta,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keys: &[KeyCode]) -> HashSet<KeyCode> {
        keys.iter().copied().collect()
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::new();

        assert_eq!(bindings.get_action(KeyCode::W), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_action(KeyCode::S), Some(InputAction::MoveBack));
        assert_eq!(bindings.get_action(KeyCode::A), Some(InputAction::MoveLeft));
        assert_eq!(bindings.get_action(KeyCode::D), Some(InputAction::MoveRight));
        assert_eq!(bindings.get_action(KeyCode::Space), Some(InputAction::Jump));
        assert_eq!(bindings.get_action(KeyCode::MouseLeft), Some(InputAction::Fire));
        assert_eq!(bindings.get_action(KeyCode::R), Some(InputAction::Reload));
    }

    #[test]
    fn test_every_action_has_a_default_key() {
        let bindings = KeyBindings::new();
        for action in InputAction::ALL {
            assert!(bindings.get_key(action).is_some(), "{action:?} unbound");
        }
    }

    #[test]
    fn test_rebind_key() {
        let mut bindings = KeyBindings::new();

        bindings.bind(KeyCode::ArrowUp, InputAction::MoveForward);

        assert_eq!(bindings.get_action(KeyCode::W), None);
        assert_eq!(bindings.get_action(KeyCode::ArrowUp), Some(InputAction::MoveForward));
        assert_eq!(bindings.get_key(InputAction::MoveForward), Some(KeyCode::ArrowUp));
    }

    #[test]
    fn test_unbind_key() {
        let mut bindings = KeyBindings::new();
        bindings.unbind_key(KeyCode::R);

        assert_eq!(bindings.get_action(KeyCode::R), None);
        assert_eq!(bindings.get_key(InputAction::Reload), None);
        assert!(!bindings.is_action_pressed(InputAction::Reload, &pressed(&[KeyCode::R])));
    }

    #[test]
    fn test_resolve_frame_input() {
        let bindings = KeyBindings::new();
        let keys = pressed(&[KeyCode::W, KeyCode::D, KeyCode::Space, KeyCode::Escape]);

        let input = bindings.resolve(&keys, Vec2::new(4.0, -2.0));

        assert!(input.move_forward);
        assert!(input.move_right);
        assert!(input.jump);
        assert!(!input.move_back);
        assert!(!input.fire);
        assert!(!input.reload);
        assert_eq!(input.look_delta, Vec2::new(4.0, -2.0));
    }
}
