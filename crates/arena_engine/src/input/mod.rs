//! Input management system
//!
//! Platform layers feed raw key and button transitions into an
//! [`InputManager`]; gameplay polls it through the [`InputSource`] trait.

use std::collections::HashSet;

use crate::foundation::math::{Vec2, DIRECTION_EPSILON};

/// Polled player intent
///
/// `move_axis` is in the avatar's local frame: `x` is strafe (right
/// positive), `y` is forward.
pub trait InputSource {
    /// Desired movement direction, normalized or zero
    fn move_axis(&self) -> Vec2;

    /// Whether the jump control is held
    fn is_jumping(&self) -> bool;

    /// Whether the fire control is held
    fn is_shooting(&self) -> bool;
}

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    keys_down: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    cursor: (f64, f64),
}

impl InputManager {
    /// Create a new input manager with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            self.keys_down.insert(key);
        } else {
            self.keys_down.remove(&key);
        }
    }

    /// Handle mouse button input
    pub fn handle_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if pressed {
            self.buttons_down.insert(button);
        } else {
            self.buttons_down.remove(&button);
        }
    }

    /// Handle mouse movement
    pub fn handle_mouse_move(&mut self, x: f64, y: f64) {
        self.cursor = (x, y);
    }

    /// Last reported cursor position
    pub fn cursor_position(&self) -> (f64, f64) {
        self.cursor
    }

    /// Whether a key is currently held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// Release everything (e.g. on focus loss)
    pub fn clear(&mut self) {
        self.keys_down.clear();
        self.buttons_down.clear();
    }

    fn any_down(&self, keys: &[KeyCode]) -> bool {
        keys.iter().any(|key| self.keys_down.contains(key))
    }
}

impl InputSource for InputManager {
    fn move_axis(&self) -> Vec2 {
        let mut axis = Vec2::zeros();
        if self.any_down(&[KeyCode::W, KeyCode::Up]) {
            axis.y += 1.0;
        }
        if self.any_down(&[KeyCode::S, KeyCode::Down]) {
            axis.y -= 1.0;
        }
        if self.any_down(&[KeyCode::D, KeyCode::Right]) {
            axis.x += 1.0;
        }
        if self.any_down(&[KeyCode::A, KeyCode::Left]) {
            axis.x -= 1.0;
        }
        axis.try_normalize(DIRECTION_EPSILON).unwrap_or_else(Vec2::zeros)
    }

    fn is_jumping(&self) -> bool {
        self.keys_down.contains(&KeyCode::Space)
    }

    fn is_shooting(&self) -> bool {
        self.keys_down.contains(&KeyCode::F) || self.buttons_down.contains(&MouseButton::Left)
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// W key
    W,
    /// A key
    A,
    /// S key
    S,
    /// D key
    D,
    /// F key
    F,
    /// Up arrow
    Up,
    /// Down arrow
    Down,
    /// Left arrow
    Left,
    /// Right arrow
    Right,
    /// Space bar
    Space,
    /// Escape
    Escape,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_idle_axis_is_zero() {
        let input = InputManager::new();
        assert_eq!(input.move_axis(), Vec2::zeros());
        assert!(!input.is_jumping());
        assert!(!input.is_shooting());
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::W, true);
        input.handle_key_input(KeyCode::Right, true);

        let axis = input.move_axis();
        assert_relative_eq!(axis.norm(), 1.0, epsilon = 1e-6);
        assert!(axis.x > 0.0 && axis.y > 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::A, true);
        input.handle_key_input(KeyCode::D, true);
        assert_eq!(input.move_axis(), Vec2::zeros());

        input.handle_key_input(KeyCode::D, false);
        assert_relative_eq!(input.move_axis(), Vec2::new(-1.0, 0.0));
    }

    #[test]
    fn test_shoot_from_key_or_mouse() {
        let mut input = InputManager::new();
        input.handle_mouse_button(MouseButton::Left, true);
        assert!(input.is_shooting());

        input.handle_mouse_button(MouseButton::Left, false);
        input.handle_key_input(KeyCode::F, true);
        assert!(input.is_shooting());

        input.clear();
        assert!(!input.is_shooting());
    }

    #[test]
    fn test_space_jumps() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::Space, true);
        input.handle_mouse_move(12.0, 34.0);

        assert!(input.is_jumping());
        assert!(input.is_key_down(KeyCode::Space));
        assert_eq!(input.cursor_position(), (12.0, 34.0));
    }
}
