//! Keyboard state snapshot, queried synchronously during `update`.

use std::collections::HashSet;

/// Logical keys the game reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Fire,
    Confirm,
    Quit,
}

impl Key {
    pub const ALL: [Key; 7] = [
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Fire,
        Key::Confirm,
        Key::Quit,
    ];
}

#[derive(Clone, Debug, Default)]
pub struct Input {
    held: HashSet<Key>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn set(&mut self, key: Key, pressed: bool) {
        if pressed {
            self.press(key);
        } else {
            self.release(key);
        }
    }

    /// Replace the whole snapshot with the keys currently held.
    pub fn set_held(&mut self, keys: impl IntoIterator<Item = Key>) {
        self.held = keys.into_iter().collect();
    }

    pub fn release_all(&mut self) {
        self.held.clear();
    }

    pub fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// -1, 0 or 1 depending on which of the two opposing keys is held.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        match (self.is_pressed(negative), self.is_pressed(positive)) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
