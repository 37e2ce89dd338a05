//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One call to `tick` is one frame
//! - Seeded RNG only
//! - Stable iteration order (entities kept in spawn order)
//! - No rendering or platform dependencies

pub mod ability;
pub mod beams;
pub mod collision;
pub mod input;
pub mod score;
pub mod shape;
pub mod state;
pub mod tick;

pub use ability::{Ability, try_activate};
pub use beams::{BEAM_OFFSETS, fan_angles, gen_beams};
pub use collision::{Collider, Pass, RESOLVE_ORDER, Resolution, Target, resolve};
pub use input::{HeldKeys, Key, KeyEvent};
pub use score::Score;
pub use shape::{Rect, direction_to, fully_in_bounds, in_bounds, point_in_bounds, rotated_size};
pub use state::{
    Beam, Bomb, Countdown, Enemy, EnemyPhase, Explosion, GameEvent, GamePhase, GameState,
    GravitySphere, KillCause, NeoGravity, Player, PlayerMood, Shield, SpriteSizes,
};
pub use tick::{TickInput, tick};
