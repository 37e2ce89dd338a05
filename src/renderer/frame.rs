//! Draw list generation
//!
//! Groups are emitted in a fixed order, back to front: background, player,
//! beams, enemies, bombs, explosions, full-screen effects, gravity spheres,
//! score text and finally the shield.

use glam::{IVec2, Vec2};

use crate::consts::{GRAVITY_SPHERE_ALPHA, NEO_GRAVITY_ALPHA, SCORE_POS};
use crate::sim::{GameState, PlayerMood, Rect};

/// Draw groups, in the order they are painted
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DrawLayer {
    Background,
    Player,
    Beams,
    Enemies,
    Bombs,
    Explosions,
    FullScreenEffects,
    GravitySpheres,
    Score,
    Shield,
}

/// What to draw; the backend maps these to its own assets
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    /// Background image, offset while the screen shakes
    Background { offset: Vec2 },
    Player {
        facing: IVec2,
        mood: PlayerMood,
        /// Hyper mode uses an edge-detected variant of the sprite
        invincible: bool,
    },
    Beam { angle: f32 },
    Enemy { variant: usize },
    Bomb { color: [u8; 3], radius: f32 },
    /// Two-frame blast animation
    Explosion { frame: usize },
    NeoGravity { alpha: u8 },
    GravitySphere { radius: f32, alpha: u8 },
    Score { value: u64 },
    Shield { angle: f32 },
}

/// A single draw call
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCall {
    pub layer: DrawLayer,
    pub visual: Visual,
    /// Where to draw; text is anchored at the rect center
    pub rect: Rect,
}

impl DrawCall {
    fn new(layer: DrawLayer, visual: Visual, rect: Rect) -> Self {
        Self { layer, visual, rect }
    }
}

/// Build the full draw list for one frame
pub fn build_frame(state: &GameState) -> Vec<DrawCall> {
    let mut calls = Vec::with_capacity(
        4 + state.beams.len()
            + state.enemies.len()
            + state.bombs.len()
            + state.explosions.len()
            + state.neo_gravities.len()
            + state.gravity_spheres.len()
            + state.shields.len(),
    );

    calls.push(DrawCall::new(
        DrawLayer::Background,
        Visual::Background {
            offset: state.screen_shake,
        },
        Rect::playfield().translated(state.screen_shake),
    ));

    let player = &state.player;
    calls.push(DrawCall::new(
        DrawLayer::Player,
        Visual::Player {
            facing: player.facing,
            mood: player.mood,
            invincible: player.is_hyper(),
        },
        player.rect,
    ));

    calls.extend(state.beams.iter().map(|b| {
        DrawCall::new(DrawLayer::Beams, Visual::Beam { angle: b.angle }, b.rect)
    }));

    calls.extend(state.enemies.iter().map(|e| {
        DrawCall::new(
            DrawLayer::Enemies,
            Visual::Enemy { variant: e.variant },
            e.rect,
        )
    }));

    calls.extend(state.bombs.iter().map(|b| {
        DrawCall::new(
            DrawLayer::Bombs,
            Visual::Bomb {
                color: b.color,
                radius: b.radius,
            },
            b.rect,
        )
    }));

    calls.extend(state.explosions.iter().map(|e| {
        DrawCall::new(
            DrawLayer::Explosions,
            Visual::Explosion { frame: e.frame() },
            e.rect,
        )
    }));

    calls.extend(state.neo_gravities.iter().map(|n| {
        DrawCall::new(
            DrawLayer::FullScreenEffects,
            Visual::NeoGravity {
                alpha: NEO_GRAVITY_ALPHA,
            },
            n.rect(),
        )
    }));

    calls.extend(state.gravity_spheres.iter().map(|s| {
        DrawCall::new(
            DrawLayer::GravitySpheres,
            Visual::GravitySphere {
                radius: s.radius,
                alpha: GRAVITY_SPHERE_ALPHA,
            },
            s.rect(),
        )
    }));

    calls.push(DrawCall::new(
        DrawLayer::Score,
        Visual::Score {
            value: state.score.value(),
        },
        Rect::new(Vec2::new(SCORE_POS.0, SCORE_POS.1), Vec2::ZERO),
    ));

    calls.extend(state.shields.iter().map(|s| {
        DrawCall::new(DrawLayer::Shield, Visual::Shield { angle: s.angle }, s.rect)
    }));

    calls
}
