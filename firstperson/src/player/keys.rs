use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Pressed/released state of every input code seen so far.
///
/// Codes are browser-style names (`"KeyW"`, `"Space"`, ...). A code that was
/// never reported reads as released.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    pressed: HashMap<String, bool>,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, code: &str, pressed: bool) {
        match self.pressed.get_mut(code) {
            Some(state) => *state = pressed,
            None => {
                self.pressed.insert(code.to_owned(), pressed);
            }
        }
    }

    pub fn press(&mut self, code: &str) {
        self.set(code, true);
    }

    pub fn release(&mut self, code: &str) {
        self.set(code, false);
    }

    pub fn is_pressed(&self, code: &str) -> bool {
        self.pressed.get(code).copied().unwrap_or(false)
    }

    pub fn release_all(&mut self) {
        self.pressed.values_mut().for_each(|state| *state = false);
    }
}

/// Which input codes drive the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MoveBindings {
    pub forward: String,
    pub backward: String,
    pub left: String,
    pub right: String,
    pub interact: String,
}

impl Default for MoveBindings {
    fn default() -> Self {
        Self {
            forward: "KeyW".to_owned(),
            backward: "KeyS".to_owned(),
            left: "KeyA".to_owned(),
            right: "KeyD".to_owned(),
            interact: "KeyE".to_owned(),
        }
    }
}
