//! Logical keys and per-tick input snapshots
//!
//! Physical key bindings belong to whatever input backend feeds the
//! simulation; the core only sees these logical keys.

use std::collections::BTreeSet;

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Logical game keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    /// Doubles movement speed and widens the beam fan while held
    Boost,
    Fire,
    Hyper,
    Shield,
    GravitySphere,
    NeoGravity,
    /// Buy one more beam for the fan
    ExtraBeam,
}

impl Key {
    /// Unit movement delta for the four direction keys
    pub fn delta(self) -> Option<IVec2> {
        match self {
            Key::Up => Some(IVec2::new(0, -1)),
            Key::Down => Some(IVec2::new(0, 1)),
            Key::Left => Some(IVec2::new(-1, 0)),
            Key::Right => Some(IVec2::new(1, 0)),
            _ => None,
        }
    }
}

/// Discrete input event for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(Key),
    Released(Key),
    /// Window closed / explicit quit
    Quit,
}

/// Set of keys currently held down
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeldKeys {
    keys: BTreeSet<Key>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    #[inline]
    pub fn contains(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    pub fn press(&mut self, key: Key) {
        self.keys.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.keys.remove(&key);
    }

    /// Apply a press/release event to the held set
    pub fn apply(&mut self, event: &KeyEvent) {
        match *event {
            KeyEvent::Pressed(key) => self.press(key),
            KeyEvent::Released(key) => self.release(key),
            KeyEvent::Quit => {}
        }
    }

    /// Summed unit delta of every held direction key
    pub fn direction(&self) -> IVec2 {
        self.keys
            .iter()
            .filter_map(|k| k.delta())
            .fold(IVec2::ZERO, |acc, d| acc + d)
    }

    pub fn iter(&self) -> impl Iterator<Item = Key> + '_ {
        self.keys.iter().copied()
    }
}
