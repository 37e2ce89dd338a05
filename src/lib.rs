//! Kokaton Musou - a frame-stepped 2D shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, score, abilities)
//! - `renderer`: Draw-call list in fixed group order, behind a `Renderer` trait
//! - `platform`: Input sources, frame pacing and the session loop
//! - `settings`: Runtime configuration

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Playfield dimensions (pixels, y grows downward)
    pub const WIDTH: f32 = 1000.0;
    pub const HEIGHT: f32 = 600.0;

    /// Target simulation steps per second
    pub const FRAME_RATE: u32 = 50;
    /// Pause before the session closes after the player is hit (ms)
    pub const GAME_OVER_PAUSE_MS: u64 = 2000;

    /// Player defaults
    pub const PLAYER_START: (f32, f32) = (900.0, 400.0);
    pub const PLAYER_SPEED: f32 = 10.0;
    /// Speed multiplier while the boost key is held
    pub const BOOST_FACTOR: f32 = 2.0;

    /// Enemies
    pub const ENEMY_SPAWN_INTERVAL: u64 = 200;
    pub const ENEMY_SPEED: f32 = 6.0;
    pub const ENEMY_BOUND_MIN: f32 = 50.0;
    pub const ENEMY_DROP_INTERVAL_MIN: u64 = 50;
    pub const ENEMY_DROP_INTERVAL_MAX: u64 = 300;
    pub const ENEMY_VARIANTS: usize = 3;

    /// Bombs
    pub const BOMB_SPEED: f32 = 6.0;
    pub const BOMB_RADIUS_MIN: f32 = 10.0;
    pub const BOMB_RADIUS_MAX: f32 = 50.0;
    pub const BOMB_COLORS: [[u8; 3]; 6] = [
        [255, 0, 0],
        [0, 255, 0],
        [0, 0, 255],
        [255, 255, 0],
        [255, 0, 255],
        [0, 255, 255],
    ];

    /// Beams
    pub const BEAM_SPEED: f32 = 10.0;
    /// Largest fan the multi-beam spawner produces
    pub const MAX_BEAMS: usize = 14;
    /// Fan size at session start
    pub const START_BEAM_COUNT: usize = 2;

    /// Kill rewards
    pub const ENEMY_REWARD: u64 = 10;
    pub const BOMB_REWARD: u64 = 1;

    /// Explosion lifetimes (frames)
    pub const ENEMY_EXPLOSION_LIFE: i32 = 100;
    pub const BOMB_EXPLOSION_LIFE: i32 = 50;

    /// Ability costs and durations (frames)
    pub const HYPER_COST: u64 = 100;
    pub const HYPER_DURATION: i32 = 500;
    pub const SHIELD_COST: u64 = 50;
    pub const SHIELD_LIFE: i32 = 400;
    pub const SHIELD_THICKNESS: f32 = 20.0;
    pub const GRAVITY_SPHERE_COST: u64 = 50;
    pub const GRAVITY_SPHERE_LIFE: i32 = 500;
    pub const GRAVITY_SPHERE_RADIUS: f32 = 200.0;
    pub const NEO_GRAVITY_COST: u64 = 200;
    pub const NEO_GRAVITY_LIFE: i32 = 400;
    /// Extra beam costs this many points per beam already in the fan
    pub const EXTRA_BEAM_COST_PER_BEAM: u64 = 10;

    /// Overlay alpha for area effects
    pub const GRAVITY_SPHERE_ALPHA: u8 = 191;
    pub const NEO_GRAVITY_ALPHA: u8 = 127;

    /// Score text anchor
    pub const SCORE_POS: (f32, f32) = (100.0, HEIGHT - 50.0);
}

/// Unit direction for an angle in degrees.
///
/// Angles are counter-clockwise with screen y pointing down, so 90° is "up"
/// and yields a negative y component.
#[inline]
pub fn direction_from_degrees(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), -rad.sin())
}

/// Angle in degrees of a screen-space direction (inverse of `direction_from_degrees`)
#[inline]
pub fn degrees_from_direction(dir: Vec2) -> f32 {
    (-dir.y).atan2(dir.x).to_degrees()
}
