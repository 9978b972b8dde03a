//! Held-key state
//!
//! Event handlers flip flags here; the tick only reads them.

/// Logical directional keys (arrows plus WASD aliases)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    W,
    S,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value to a tracked key
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "a" | "A" => Some(Key::A),
            "d" | "D" => Some(Key::D),
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            _ => None,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Which tracked keys are currently held
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    held: [bool; 8],
}

impl InputState {
    pub fn press(&mut self, key: Key) {
        self.held[key.index()] = true;
    }

    pub fn release(&mut self, key: Key) {
        self.held[key.index()] = false;
    }

    /// Drop every held key
    pub fn release_all(&mut self) {
        self.held = [false; 8];
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held[key.index()]
    }

    /// Horizontal intent in {-1, 0, 1}. Vertical keys are tracked but never
    /// contribute: the avatar rides a fixed rail.
    pub fn horizontal_axis(&self) -> f32 {
        let left = self.is_held(Key::Left) || self.is_held(Key::A);
        let right = self.is_held(Key::Right) || self.is_held(Key::D);
        match (left, right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}
