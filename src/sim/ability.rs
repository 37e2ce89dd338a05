//! Score-gated abilities
//!
//! Every ability is paid for out of the score. An unaffordable (or
//! concurrency-capped) request is a silent no-op apart from the
//! `AbilityRejected` event.

use super::state::{GameEvent, GameState, GravitySphere, NeoGravity, Shield};
use crate::consts::*;

/// Purchasable abilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ability {
    /// Temporary invincibility that destroys bombs on contact
    Hyper,
    /// Directional barrier in front of the player (one at a time)
    Shield,
    /// Area effect that follows the player
    GravitySphere,
    /// Full-screen area effect
    NeoGravity,
    /// Widen the beam fan by one
    ExtraBeam,
}

impl Ability {
    /// Current cost; the extra beam gets pricier as the fan grows
    pub fn cost(self, state: &GameState) -> u64 {
        match self {
            Ability::Hyper => HYPER_COST,
            Ability::Shield => SHIELD_COST,
            Ability::GravitySphere => GRAVITY_SPHERE_COST,
            Ability::NeoGravity => NEO_GRAVITY_COST,
            Ability::ExtraBeam => state.beam_count as u64 * EXTRA_BEAM_COST_PER_BEAM,
        }
    }

    /// Whether the concurrency limit allows another activation right now
    fn has_capacity(self, state: &GameState) -> bool {
        match self {
            Ability::Shield => state.shields.is_empty(),
            Ability::ExtraBeam => state.beam_count < MAX_BEAMS,
            Ability::Hyper | Ability::GravitySphere | Ability::NeoGravity => true,
        }
    }
}

/// Try to buy and activate `ability`. Returns true if it fired.
pub fn try_activate(state: &mut GameState, ability: Ability) -> bool {
    let cost = ability.cost(state);
    if !ability.has_capacity(state) || !state.score.try_spend(cost) {
        log::debug!(
            "{:?} rejected (score {}, cost {})",
            ability,
            state.score.value(),
            cost
        );
        state.events.push(GameEvent::AbilityRejected { ability });
        return false;
    }

    match ability {
        Ability::Hyper => state.player.set_hyper(true, HYPER_DURATION),
        Ability::Shield => {
            let id = state.next_entity_id();
            let shield = Shield::raise(id, &state.player);
            state.shields.push(shield);
        }
        Ability::GravitySphere => {
            let id = state.next_entity_id();
            let center = state.player.center();
            state.gravity_spheres.push(GravitySphere::new(id, center));
        }
        Ability::NeoGravity => {
            let id = state.next_entity_id();
            state.neo_gravities.push(NeoGravity::new(id));
        }
        Ability::ExtraBeam => state.beam_count += 1,
    }

    log::info!(
        "{:?} activated for {} points, {} left",
        ability,
        cost,
        state.score.value()
    );
    state.events.push(GameEvent::AbilityActivated { ability, cost });
    true
}
