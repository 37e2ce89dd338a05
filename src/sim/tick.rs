//! Fixed timestep simulation tick
//!
//! One call advances the session by exactly one frame: discrete triggers,
//! spawning, movement and lifetimes, then collision resolution.

use glam::Vec2;
use rand::Rng;

use super::ability::{Ability, try_activate};
use super::beams::gen_beams;
use super::collision::{Resolution, resolve};
use super::input::{HeldKeys, Key, KeyEvent};
use super::state::GameState;
use crate::consts::*;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Keys held down at the start of the tick
    pub held: HeldKeys,
    /// Press/release events since the previous tick, in arrival order
    pub events: Vec<KeyEvent>,
}

impl TickInput {
    pub fn held(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            held: HeldKeys::from_keys(keys),
            events: Vec::new(),
        }
    }

    /// Add a key-down event
    pub fn press(mut self, key: Key) -> Self {
        self.events.push(KeyEvent::Pressed(key));
        self
    }

    pub fn quit_requested(&self) -> bool {
        self.events.contains(&KeyEvent::Quit)
    }
}

/// Handle a single key-down trigger
fn on_key_down(state: &mut GameState, key: Key, held: &HeldKeys) {
    match key {
        Key::Fire => {
            let count = if held.contains(Key::Boost) {
                state.beam_count
            } else {
                1
            };
            gen_beams(state, count);
        }
        Key::Hyper => {
            try_activate(state, Ability::Hyper);
        }
        Key::Shield => {
            try_activate(state, Ability::Shield);
        }
        Key::GravitySphere => {
            try_activate(state, Ability::GravitySphere);
        }
        Key::NeoGravity => {
            try_activate(state, Ability::NeoGravity);
        }
        Key::ExtraBeam => {
            try_activate(state, Ability::ExtraBeam);
        }
        Key::Up | Key::Down | Key::Left | Key::Right | Key::Boost => {}
    }
}

/// Spawn enemies on schedule and let stopped enemies drop their bombs
fn spawn(state: &mut GameState) {
    if state.time_ticks % ENEMY_SPAWN_INTERVAL == 0 {
        state.spawn_enemy();
    }

    let frame = state.time_ticks;
    let droppers: Vec<usize> = state
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.drops_on(frame))
        .map(|(i, _)| i)
        .collect();
    for index in droppers {
        state.drop_bomb(index);
    }
}

/// Move everything and count lifetimes down, dropping what expired or left
/// the playfield
fn update_entities(state: &mut GameState, held: &HeldKeys) {
    state.player.apply_input(held);
    state.player.update_hyper();

    state.beams.retain_mut(|b| b.update());
    for enemy in &mut state.enemies {
        enemy.update();
    }
    state.bombs.retain_mut(|b| b.update());
    state.explosions.retain_mut(|e| e.update());
    state.neo_gravities.retain_mut(|n| n.update());
    let follow = state.player.center();
    state.gravity_spheres.retain_mut(|s| s.update(follow));
    state.shields.retain_mut(|s| s.update());
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> Resolution {
    if state.is_over() {
        return Resolution::default();
    }

    for event in &input.events {
        if let KeyEvent::Pressed(key) = *event {
            on_key_down(state, key, &input.held);
        }
    }

    spawn(state);
    update_entities(state, &input.held);
    let result = resolve(state);

    state.screen_shake = if state.neo_gravities.is_empty() {
        Vec2::ZERO
    } else {
        Vec2::new(
            state.rng.random_range(-1..=1) as f32,
            state.rng.random_range(-1..=1) as f32,
        )
    };

    state.time_ticks += 1;
    result
}
