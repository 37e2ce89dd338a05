//! Collision and effect resolution
//!
//! Runs once per tick after every entity has moved. Each pass removes what it
//! matches straight away, so an entity can be destroyed by at most one pass.
//! Pass order is fixed by `RESOLVE_ORDER`: beams get first claim on a kill,
//! then the area effects, then the shield, then the player.

use glam::Vec2;

use super::shape::Rect;
use super::state::{
    Beam, Bomb, Enemy, GameEvent, GamePhase, GameState, KillCause, NeoGravity, PlayerMood, Shield,
};
use crate::consts::*;

/// Anything with a collision rectangle
pub trait Collider {
    fn rect(&self) -> Rect;
}

/// Something the player earns points for destroying
pub trait Target: Collider {
    /// Points awarded on destruction
    const REWARD: u64;
    /// Frames the explosion left behind lasts
    const EXPLOSION_LIFE: i32;
    /// Whether destroying it cheers the player up
    const CHEERS: bool;

    fn id(&self) -> u32;
    /// Radius used by gravity sphere distance checks
    fn radius(&self) -> f32;
    fn destroyed_event(&self, cause: KillCause) -> GameEvent;

    fn center(&self) -> Vec2 {
        self.rect().center
    }
}

impl Collider for Enemy {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Target for Enemy {
    const REWARD: u64 = ENEMY_REWARD;
    const EXPLOSION_LIFE: i32 = ENEMY_EXPLOSION_LIFE;
    const CHEERS: bool = true;

    fn id(&self) -> u32 {
        self.id
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn destroyed_event(&self, cause: KillCause) -> GameEvent {
        GameEvent::EnemyDestroyed {
            id: self.id,
            cause,
            pos: self.rect.center,
        }
    }
}

impl Collider for Bomb {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Target for Bomb {
    const REWARD: u64 = BOMB_REWARD;
    const EXPLOSION_LIFE: i32 = BOMB_EXPLOSION_LIFE;
    const CHEERS: bool = false;

    fn id(&self) -> u32 {
        self.id
    }

    fn radius(&self) -> f32 {
        self.radius
    }

    fn destroyed_event(&self, cause: KillCause) -> GameEvent {
        GameEvent::BombDestroyed {
            id: self.id,
            cause,
            pos: self.rect.center,
        }
    }
}

impl Collider for Beam {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Collider for Shield {
    fn rect(&self) -> Rect {
        self.rect
    }
}

impl Collider for NeoGravity {
    fn rect(&self) -> Rect {
        NeoGravity::rect(self)
    }
}

/// One step of the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// Enemy and beam both destroyed
    EnemyBeam,
    /// Bomb and beam both destroyed
    BombBeam,
    EnemyNeoGravity,
    BombNeoGravity,
    /// Enemies then bombs, sphere by sphere
    GravitySphere,
    EnemyShield,
    BombShield,
    /// Hyper player rams bombs for points
    HyperBomb,
    /// Any bomb still touching the player ends the session
    PlayerBomb,
}

/// Order the passes run in. Changing it changes which cause gets credited
/// for an entity several effects could destroy in the same tick.
pub const RESOLVE_ORDER: [Pass; 9] = [
    Pass::EnemyBeam,
    Pass::BombBeam,
    Pass::EnemyNeoGravity,
    Pass::BombNeoGravity,
    Pass::GravitySphere,
    Pass::EnemyShield,
    Pass::BombShield,
    Pass::HyperBomb,
    Pass::PlayerBomb,
];

/// Summary of one resolver run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Resolution {
    pub enemies_destroyed: u32,
    pub bombs_destroyed: u32,
    pub player_hit: bool,
}

/// Split off every element matching `pred`, keeping the rest in order
fn take_where<T>(items: &mut Vec<T>, pred: impl FnMut(&T) -> bool) -> Vec<T> {
    let (taken, kept): (Vec<T>, Vec<T>) = std::mem::take(items).into_iter().partition(pred);
    *items = kept;
    taken
}

/// Destroy every target hit by a projectile, consuming the projectiles.
///
/// Targets are checked in order; a projectile consumed by one target is gone
/// before the next target is checked.
pub fn consume_pairs<T: Target, P: Collider>(targets: &mut Vec<T>, projectiles: &mut Vec<P>) -> Vec<T> {
    take_where(targets, |target| {
        let rect = target.rect();
        let hits = take_where(projectiles, |p| p.rect().intersects(&rect));
        !hits.is_empty()
    })
}

/// Destroy every target overlapping any of `areas`; the areas persist
pub fn sweep_areas<T: Target, A: Collider>(targets: &mut Vec<T>, areas: &[A]) -> Vec<T> {
    if areas.is_empty() {
        return Vec::new();
    }
    take_where(targets, |target| {
        let rect = target.rect();
        areas.iter().any(|a| a.rect().intersects(&rect))
    })
}

/// Destroy every target whose center is closer than `radius + target.radius`
pub fn sweep_radius<T: Target>(targets: &mut Vec<T>, center: Vec2, radius: f32) -> Vec<T> {
    take_where(targets, |target| {
        target.center().distance(center) < radius + target.radius()
    })
}

/// Remove every target overlapping `rect`
pub fn touching<T: Target>(targets: &mut Vec<T>, rect: &Rect) -> Vec<T> {
    take_where(targets, |target| target.rect().intersects(rect))
}

/// Apply rewards, explosions and cues for destroyed targets
fn record_kills<T: Target>(state: &mut GameState, killed: Vec<T>, cause: KillCause) -> u32 {
    let count = killed.len() as u32;
    for target in killed {
        log::debug!("Target {} destroyed by {:?}", target.id(), cause);
        state.score.award(T::REWARD);
        state.spawn_explosion(target.center(), T::EXPLOSION_LIFE);
        if T::CHEERS {
            state.player.mood = PlayerMood::Happy;
        }
        state.events.push(target.destroyed_event(cause));
    }
    count
}

/// Run one pass of the resolver
fn run_pass(state: &mut GameState, pass: Pass, result: &mut Resolution) {
    match pass {
        Pass::EnemyBeam => {
            let killed = consume_pairs(&mut state.enemies, &mut state.beams);
            result.enemies_destroyed += record_kills(state, killed, KillCause::Beam);
        }
        Pass::BombBeam => {
            let killed = consume_pairs(&mut state.bombs, &mut state.beams);
            result.bombs_destroyed += record_kills(state, killed, KillCause::Beam);
        }
        Pass::EnemyNeoGravity => {
            let killed = sweep_areas(&mut state.enemies, &state.neo_gravities);
            result.enemies_destroyed += record_kills(state, killed, KillCause::NeoGravity);
        }
        Pass::BombNeoGravity => {
            let killed = sweep_areas(&mut state.bombs, &state.neo_gravities);
            result.bombs_destroyed += record_kills(state, killed, KillCause::NeoGravity);
        }
        Pass::GravitySphere => {
            let spheres: Vec<(Vec2, f32)> = state
                .gravity_spheres
                .iter()
                .map(|s| (s.center, s.radius))
                .collect();
            for (center, radius) in spheres {
                let killed = sweep_radius(&mut state.enemies, center, radius);
                result.enemies_destroyed += record_kills(state, killed, KillCause::GravitySphere);
                let killed = sweep_radius(&mut state.bombs, center, radius);
                result.bombs_destroyed += record_kills(state, killed, KillCause::GravitySphere);
            }
        }
        Pass::EnemyShield => {
            let killed = sweep_areas(&mut state.enemies, &state.shields);
            result.enemies_destroyed += record_kills(state, killed, KillCause::Shield);
        }
        Pass::BombShield => {
            let killed = sweep_areas(&mut state.bombs, &state.shields);
            result.bombs_destroyed += record_kills(state, killed, KillCause::Shield);
        }
        Pass::HyperBomb => {
            if state.player.is_hyper() {
                let rect = state.player.rect;
                let killed = touching(&mut state.bombs, &rect);
                result.bombs_destroyed += record_kills(state, killed, KillCause::Hyper);
            }
        }
        Pass::PlayerBomb => {
            let rect = state.player.rect;
            let hits = touching(&mut state.bombs, &rect);
            if !hits.is_empty() {
                log::info!(
                    "Player hit by bomb {} at frame {}, final score {}",
                    hits[0].id,
                    state.time_ticks,
                    state.score.value()
                );
                state.player.mood = PlayerMood::Sad;
                state.phase = GamePhase::GameOver;
                state.events.push(GameEvent::PlayerHit);
                result.player_hit = true;
            }
        }
    }
}

/// Resolve every collision for this tick in `RESOLVE_ORDER`
pub fn resolve(state: &mut GameState) -> Resolution {
    let mut result = Resolution::default();
    for pass in RESOLVE_ORDER {
        run_pass(state, pass, &mut result);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Beam, GravitySphere, Shield};
    use crate::sim::state::{EnemyPhase, SpriteSizes};
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn enemy_at(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        let mut rng = Pcg32::seed_from_u64(id as u64);
        let mut enemy = Enemy::spawn(id, &mut rng, &SpriteSizes::default());
        enemy.rect.center = pos;
        enemy.phase = EnemyPhase::Stopped;
        state.enemies.push(enemy);
        id
    }

    fn bomb_at(state: &mut GameState, pos: Vec2, radius: f32) -> u32 {
        let id = state.next_entity_id();
        state.bombs.push(Bomb {
            id,
            owner: 0,
            rect: Rect::new(pos, Vec2::splat(radius * 2.0)),
            dir: Vec2::Y,
            speed: BOMB_SPEED,
            radius,
            color: BOMB_COLORS[0],
        });
        id
    }

    fn beam_at(state: &mut GameState, pos: Vec2) -> u32 {
        let id = state.next_entity_id();
        state.beams.push(Beam {
            id,
            rect: Rect::new(pos, Vec2::new(100.0, 20.0)),
            angle: 0.0,
            dir: Vec2::X,
            speed: BEAM_SPEED,
        });
        id
    }

    fn empty_state() -> GameState {
        let mut state = GameState::new(5);
        state.player.rect.center = Vec2::new(900.0, 500.0);
        state
    }

    #[test]
    fn test_enemy_beam_destroys_both() {
        let mut state = empty_state();
        enemy_at(&mut state, Vec2::new(300.0, 200.0));
        beam_at(&mut state, Vec2::new(310.0, 200.0));

        let result = resolve(&mut state);
        assert_eq!(result.enemies_destroyed, 1);
        assert!(state.enemies.is_empty());
        assert!(state.beams.is_empty());
        assert_eq!(state.score.value(), ENEMY_REWARD);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life.remaining(), ENEMY_EXPLOSION_LIFE);
        assert_eq!(state.explosions[0].rect.center, Vec2::new(300.0, 200.0));
        assert_eq!(state.player.mood, PlayerMood::Happy);
    }

    #[test]
    fn test_one_beam_kills_one_enemy() {
        let mut state = empty_state();
        // Two enemies overlapping the same beam: the first in order takes it
        let first = enemy_at(&mut state, Vec2::new(300.0, 200.0));
        let second = enemy_at(&mut state, Vec2::new(320.0, 200.0));
        beam_at(&mut state, Vec2::new(310.0, 200.0));

        resolve(&mut state);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.enemies[0].id, second);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDestroyed { id, cause: KillCause::Beam, .. } if *id == first
        )));
    }

    #[test]
    fn test_enemy_hit_by_two_beams_consumes_both() {
        let mut state = empty_state();
        let enemy = enemy_at(&mut state, Vec2::new(300.0, 200.0));
        beam_at(&mut state, Vec2::new(290.0, 195.0));
        beam_at(&mut state, Vec2::new(310.0, 205.0));

        let result = resolve(&mut state);
        assert_eq!(result.enemies_destroyed, 1);
        assert!(state.enemies.is_empty());
        assert!(state.beams.is_empty());
        // Killed once, rewarded once
        assert_eq!(state.score.value(), ENEMY_REWARD);
        assert_eq!(
            state
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDestroyed { id, .. } if *id == enemy))
                .count(),
            1
        );
    }

    #[test]
    fn test_bomb_beam_awards_one_point() {
        let mut state = empty_state();
        bomb_at(&mut state, Vec2::new(300.0, 300.0), 20.0);
        beam_at(&mut state, Vec2::new(300.0, 300.0));

        let result = resolve(&mut state);
        assert_eq!(result.bombs_destroyed, 1);
        assert_eq!(state.score.value(), BOMB_REWARD);
        assert_eq!(state.explosions[0].life.remaining(), BOMB_EXPLOSION_LIFE);
        assert_eq!(state.player.mood, PlayerMood::Normal);
    }

    #[test]
    fn test_neo_gravity_persists() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        state.neo_gravities.push(NeoGravity::new(id));
        enemy_at(&mut state, Vec2::new(300.0, 200.0));
        bomb_at(&mut state, Vec2::new(500.0, 300.0), 15.0);

        let result = resolve(&mut state);
        assert_eq!(result.enemies_destroyed, 1);
        assert_eq!(result.bombs_destroyed, 1);
        assert_eq!(state.neo_gravities.len(), 1);
        assert_eq!(state.score.value(), ENEMY_REWARD + BOMB_REWARD);
    }

    #[test]
    fn test_gravity_sphere_uses_target_radius() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        state
            .gravity_spheres
            .push(GravitySphere::new(id, Vec2::new(500.0, 300.0)));
        // 240 away: inside 200 + 50, outside 200 + 10
        let big = bomb_at(&mut state, Vec2::new(740.0, 300.0), 50.0);
        let small = bomb_at(&mut state, Vec2::new(500.0, 60.0), 10.0);

        resolve(&mut state);
        assert_eq!(state.bombs.len(), 1);
        assert_eq!(state.bombs[0].id, small);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::BombDestroyed { id, cause: KillCause::GravitySphere, .. } if *id == big
        )));
        assert_eq!(state.gravity_spheres.len(), 1);
    }

    #[test]
    fn test_shield_blocks_bomb() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        let shield = Shield::raise(id, &state.player);
        let shield_center = shield.rect.center;
        state.shields.push(shield);
        bomb_at(&mut state, shield_center, 10.0);

        let result = resolve(&mut state);
        assert_eq!(result.bombs_destroyed, 1);
        assert_eq!(state.shields.len(), 1);
        assert!(!state.is_over());
    }

    #[test]
    fn test_shield_destroys_enemy() {
        let mut state = empty_state();
        state.player.rect.center = Vec2::new(500.0, 400.0);
        let id = state.next_entity_id();
        let shield = Shield::raise(id, &state.player);
        let shield_center = shield.rect.center;
        state.shields.push(shield);
        let enemy = enemy_at(&mut state, shield_center);

        let result = resolve(&mut state);
        assert_eq!(result.enemies_destroyed, 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score.value(), ENEMY_REWARD);
        assert_eq!(state.explosions.len(), 1);
        assert_eq!(state.explosions[0].life.remaining(), ENEMY_EXPLOSION_LIFE);
        assert_eq!(state.player.mood, PlayerMood::Happy);
        assert_eq!(state.shields.len(), 1);
        assert!(state.events.iter().any(|e| matches!(
            e,
            GameEvent::EnemyDestroyed { id, cause: KillCause::Shield, .. } if *id == enemy
        )));
    }

    #[test]
    fn test_beam_claims_kill_before_area() {
        let mut state = empty_state();
        let id = state.next_entity_id();
        state.neo_gravities.push(NeoGravity::new(id));
        let enemy = enemy_at(&mut state, Vec2::new(300.0, 200.0));
        beam_at(&mut state, Vec2::new(300.0, 200.0));

        resolve(&mut state);
        let causes: Vec<KillCause> = state
            .events
            .iter()
            .filter_map(|e| match e {
                GameEvent::EnemyDestroyed { id, cause, .. } if *id == enemy => Some(*cause),
                _ => None,
            })
            .collect();
        assert_eq!(causes, vec![KillCause::Beam]);
        assert_eq!(state.score.value(), ENEMY_REWARD);
    }

    #[test]
    fn test_bomb_hits_player() {
        let mut state = empty_state();
        let center = state.player.center();
        bomb_at(&mut state, center, 20.0);

        let result = resolve(&mut state);
        assert!(result.player_hit);
        assert!(state.is_over());
        assert_eq!(state.player.mood, PlayerMood::Sad);
        assert_eq!(
            state.events.iter().filter(|e| **e == GameEvent::PlayerHit).count(),
            1
        );
        assert_eq!(state.score.value(), 0);
    }

    #[test]
    fn test_hyper_player_rams_bombs() {
        let mut state = empty_state();
        state.player.set_hyper(true, HYPER_DURATION);
        let center = state.player.center();
        bomb_at(&mut state, center, 20.0);

        let result = resolve(&mut state);
        assert!(!result.player_hit);
        assert!(!state.is_over());
        assert_eq!(result.bombs_destroyed, 1);
        assert_eq!(state.score.value(), BOMB_REWARD);
    }

    proptest! {
        #[test]
        fn prop_each_entity_destroyed_once(
            enemies in prop::collection::vec((0.0f32..WIDTH, 0.0f32..HEIGHT), 0..8),
            bombs in prop::collection::vec((0.0f32..WIDTH, 0.0f32..HEIGHT, 10.0f32..50.0), 0..8),
            beams in prop::collection::vec((0.0f32..WIDTH, 0.0f32..HEIGHT), 0..8),
            sphere in prop::option::of((0.0f32..WIDTH, 0.0f32..HEIGHT)),
        ) {
            let mut state = empty_state();
            for (x, y) in &enemies {
                enemy_at(&mut state, Vec2::new(*x, *y));
            }
            for (x, y, r) in &bombs {
                bomb_at(&mut state, Vec2::new(*x, *y), *r);
            }
            for (x, y) in &beams {
                beam_at(&mut state, Vec2::new(*x, *y));
            }
            if let Some((x, y)) = sphere {
                let id = state.next_entity_id();
                state.gravity_spheres.push(GravitySphere::new(id, Vec2::new(x, y)));
            }

            let result = resolve(&mut state);

            let mut destroyed: Vec<u32> = state.events.iter().filter_map(|e| match e {
                GameEvent::EnemyDestroyed { id, .. } | GameEvent::BombDestroyed { id, .. } => Some(*id),
                _ => None,
            }).collect();
            let total = destroyed.len();
            destroyed.sort_unstable();
            destroyed.dedup();
            prop_assert_eq!(destroyed.len(), total);

            prop_assert_eq!(
                state.enemies.len() + result.enemies_destroyed as usize,
                enemies.len()
            );
            let expected_score = result.enemies_destroyed as u64 * ENEMY_REWARD
                + result.bombs_destroyed as u64 * BOMB_REWARD;
            prop_assert_eq!(state.score.value(), expected_score);
        }
    }
}
