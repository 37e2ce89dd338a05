//! Replays a fixed sequence of key events

use std::collections::VecDeque;

use super::InputSource;
use crate::sim::{GameState, HeldKeys, KeyEvent, TickInput};

/// Input source fed from a list of per-tick event batches.
///
/// Held keys are derived from the press/release events, the way a keyboard
/// backend would track them. Once the script runs out, every later poll
/// reports no new events (and a `Quit` if `quit_when_done` is set).
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<Vec<KeyEvent>>,
    held: HeldKeys,
    quit_when_done: bool,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = Vec<KeyEvent>>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
            held: HeldKeys::new(),
            quit_when_done: false,
        }
    }

    /// Emit `Quit` after the last scripted frame
    pub fn then_quit(mut self) -> Self {
        self.quit_when_done = true;
        self
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        let events = match self.frames.pop_front() {
            Some(events) => events,
            None if self.quit_when_done => vec![KeyEvent::Quit],
            None => Vec::new(),
        };
        for event in &events {
            self.held.apply(event);
        }
        TickInput {
            held: self.held.clone(),
            events,
        }
    }
}
