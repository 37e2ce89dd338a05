//! Multi-beam spawner
//!
//! One fire command fans out into up to `MAX_BEAMS` beams around the
//! player's facing angle, alternating sides as the fan widens.

use super::state::{Beam, GameState};
use crate::consts::MAX_BEAMS;

/// Angular offsets (degrees) in the order beams are added to the fan
pub const BEAM_OFFSETS: [f32; MAX_BEAMS] = [
    0.0, -25.0, 25.0, -50.0, 50.0, -75.0, 75.0, -100.0, 100.0, -125.0, 125.0, -150.0, 150.0,
    -175.0,
];

/// Firing angles for a fan of `count` beams around `facing` degrees.
///
/// `count` is clamped to `1..=MAX_BEAMS`.
pub fn fan_angles(facing: f32, count: usize) -> impl Iterator<Item = f32> {
    let count = count.clamp(1, MAX_BEAMS);
    BEAM_OFFSETS
        .into_iter()
        .take(count)
        .map(move |offset| facing + offset)
}

/// Spawn a fan of `count` beams from the player's current facing.
///
/// Returns the ids of the new beams, in fan order.
pub fn gen_beams(state: &mut GameState, count: usize) -> Vec<u32> {
    let facing = state.player.facing_degrees();
    let mut ids = Vec::with_capacity(count.clamp(1, MAX_BEAMS));

    for angle in fan_angles(facing, count) {
        let id = state.next_entity_id();
        let beam = Beam::fire(id, &state.player, angle, &state.sprites);
        state.beams.push(beam);
        ids.push(id);
    }

    log::debug!("Fired {} beam(s) facing {:.0}°", ids.len(), facing);
    ids
}
