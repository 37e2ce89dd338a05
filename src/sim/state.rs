//! Game state and core simulation types
//!
//! Every live entity is owned by its per-kind `Vec` in `GameState`, tagged
//! with a unique id. Nothing holds references across ticks; entities refer
//! to each other by id only.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ability::Ability;
use super::input::{HeldKeys, Key};
use super::score::Score;
use super::shape::{Rect, direction_to, in_bounds, rotated_size};
use crate::consts::*;
use crate::{degrees_from_direction, direction_from_degrees};

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Player was hit; the session is over
    GameOver,
}

/// Frame countdown shared by every timed entity.
///
/// Decremented once per update; the owner expires once it drops below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: i32,
}

impl Countdown {
    pub fn new(frames: i32) -> Self {
        Self { remaining: frames }
    }

    #[inline]
    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    /// Count one frame down. Returns false once expired.
    pub fn tick(&mut self) -> bool {
        self.remaining -= 1;
        !self.is_expired()
    }

    #[inline]
    pub fn is_expired(&self) -> bool {
        self.remaining < 0
    }
}

/// Bounding dimensions of every sprite, as reported by the asset provider
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteSizes {
    pub player: Vec2,
    pub enemies: [Vec2; ENEMY_VARIANTS],
    /// Beam sprite before rotation (pointing right)
    pub beam: Vec2,
    pub explosion: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            player: Vec2::new(96.0, 96.0),
            enemies: [
                Vec2::new(64.0, 64.0),
                Vec2::new(72.0, 56.0),
                Vec2::new(60.0, 70.0),
            ],
            beam: Vec2::new(100.0, 20.0),
            explosion: Vec2::new(100.0, 90.0),
        }
    }
}

impl SpriteSizes {
    /// All dimensions strictly positive
    pub fn is_valid(&self) -> bool {
        std::iter::once(&self.player)
            .chain(self.enemies.iter())
            .chain([&self.beam, &self.explosion])
            .all(|s| s.x > 0.0 && s.y > 0.0)
    }
}

/// Visual cue shown on the player sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMood {
    Normal,
    /// Shown after an enemy kill until the player next moves
    Happy,
    /// Shown on the fatal hit
    Sad,
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Player {
    pub rect: Rect,
    pub base_speed: f32,
    /// Speed applied on the last movement step
    pub speed: f32,
    /// Summed direction of the last nonzero movement (one of 8 values)
    pub facing: IVec2,
    /// Hyper countdown, `Some` while hyper is active
    pub hyper: Option<Countdown>,
    pub mood: PlayerMood,
}

impl Player {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            rect: Rect::new(center, size),
            base_speed: PLAYER_SPEED,
            speed: PLAYER_SPEED,
            facing: IVec2::new(1, 0),
            hyper: None,
            mood: PlayerMood::Normal,
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center
    }

    #[inline]
    pub fn is_hyper(&self) -> bool {
        self.hyper.is_some()
    }

    /// Facing angle in degrees (0 = right, 90 = up)
    pub fn facing_degrees(&self) -> f32 {
        degrees_from_direction(self.facing.as_vec2())
    }

    /// Move according to the held direction keys.
    ///
    /// Each axis that would leave the playfield is rolled back on its own, so
    /// the player can slide along a wall.
    pub fn apply_input(&mut self, held: &HeldKeys) {
        self.speed = if held.contains(Key::Boost) {
            self.base_speed * BOOST_FACTOR
        } else {
            self.base_speed
        };

        let step = held.direction();
        if step == IVec2::ZERO {
            return;
        }

        let before = self.rect.center;
        self.rect = self.rect.translated(step.as_vec2() * self.speed);
        let (horizontal_ok, vertical_ok) = in_bounds(&self.rect);
        if !horizontal_ok {
            self.rect.center.x = before.x;
        }
        if !vertical_ok {
            self.rect.center.y = before.y;
        }

        self.facing = step;
        self.mood = PlayerMood::Normal;
    }

    /// Enter or leave hyper mode. Re-entering replaces the remaining time.
    pub fn set_hyper(&mut self, active: bool, duration: i32) {
        self.hyper = active.then(|| Countdown::new(duration));
    }

    /// Count the hyper timer down, reverting to normal once it goes negative
    pub fn update_hyper(&mut self) {
        if let Some(countdown) = self.hyper.as_mut() {
            if !countdown.tick() {
                self.hyper = None;
            }
        }
    }
}

/// Enemy movement state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyPhase {
    Descending,
    Stopped,
}

/// A descending enemy that hovers and drops bombs
#[derive(Debug, Clone)]
pub struct Enemy {
    pub id: u32,
    pub rect: Rect,
    /// Sprite variant index
    pub variant: usize,
    pub vel: Vec2,
    /// Vertical position at which descent stops
    pub bound: f32,
    pub phase: EnemyPhase,
    /// Drops a bomb whenever the frame counter is a multiple of this
    pub drop_interval: u64,
    pub radius: f32,
}

impl Enemy {
    /// Spawn at a random column on the top edge
    pub fn spawn(id: u32, rng: &mut impl Rng, sprites: &SpriteSizes) -> Self {
        let variant = rng.random_range(0..ENEMY_VARIANTS);
        let size = sprites.enemies[variant];
        let x = rng.random_range(0.0..=WIDTH);
        let bound = rng.random_range(ENEMY_BOUND_MIN..=HEIGHT / 2.0);
        let drop_interval = rng.random_range(ENEMY_DROP_INTERVAL_MIN..=ENEMY_DROP_INTERVAL_MAX);

        Self {
            id,
            rect: Rect::new(Vec2::new(x, 0.0), size),
            variant,
            vel: Vec2::new(0.0, ENEMY_SPEED),
            bound,
            phase: EnemyPhase::Descending,
            drop_interval,
            radius: size.x.max(size.y) / 2.0,
        }
    }

    pub fn update(&mut self) {
        if self.phase == EnemyPhase::Descending && self.rect.center.y >= self.bound {
            self.vel = Vec2::ZERO;
            self.phase = EnemyPhase::Stopped;
        }
        self.rect.center += self.vel;
    }

    /// Whether this enemy drops a bomb on frame `frame`
    pub fn drops_on(&self, frame: u64) -> bool {
        self.phase == EnemyPhase::Stopped && frame % self.drop_interval == 0
    }
}

/// A bomb dropped by an enemy, flying straight at where the player was
#[derive(Debug, Clone)]
pub struct Bomb {
    pub id: u32,
    /// Enemy that dropped it
    pub owner: u32,
    pub rect: Rect,
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    pub color: [u8; 3],
}

impl Bomb {
    /// Drop a bomb under `enemy` aimed at the player's current center.
    ///
    /// Returns `None` if the enemy sits exactly on the player, where no
    /// direction exists.
    pub fn aimed(id: u32, enemy: &Enemy, target: &Rect, rng: &mut impl Rng) -> Option<Self> {
        let dir = direction_to(&enemy.rect, target)?;
        let radius = rng.random_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX).round();
        let color = BOMB_COLORS[rng.random_range(0..BOMB_COLORS.len())];
        let center = Vec2::new(
            enemy.rect.center.x,
            enemy.rect.center.y + enemy.rect.size.y / 2.0,
        );

        Some(Self {
            id,
            owner: enemy.id,
            rect: Rect::new(center, Vec2::splat(radius * 2.0)),
            dir,
            speed: BOMB_SPEED,
            radius,
            color,
        })
    }

    /// Advance; returns false once the bomb has left the playfield
    pub fn update(&mut self) -> bool {
        self.rect.center += self.dir * self.speed;
        in_bounds(&self.rect) == (true, true)
    }
}

/// A beam fired by the player
#[derive(Debug, Clone)]
pub struct Beam {
    pub id: u32,
    pub rect: Rect,
    /// Firing angle in degrees
    pub angle: f32,
    pub dir: Vec2,
    pub speed: f32,
}

impl Beam {
    /// Fire from just in front of the player at `angle` degrees
    pub fn fire(id: u32, player: &Player, angle: f32, sprites: &SpriteSizes) -> Self {
        let dir = direction_from_degrees(angle);
        let center = player.rect.center + player.rect.size * dir;
        Self {
            id,
            rect: Rect::new(center, rotated_size(sprites.beam, angle)),
            angle,
            dir,
            speed: BEAM_SPEED,
        }
    }

    /// Advance; returns false once the beam has left the playfield
    pub fn update(&mut self) -> bool {
        self.rect.center += self.dir * self.speed;
        in_bounds(&self.rect) == (true, true)
    }
}

/// A directional barrier in front of the player
#[derive(Debug, Clone)]
pub struct Shield {
    pub id: u32,
    pub rect: Rect,
    /// Orientation in degrees, matching the player's facing at creation
    pub angle: f32,
    pub life: Countdown,
}

impl Shield {
    /// Raise in front of the player, kept inside the playfield when the
    /// player stands near an edge
    pub fn raise(id: u32, player: &Player) -> Self {
        let angle = player.facing_degrees();
        let facing = player.facing.as_vec2();
        let size = Vec2::new(SHIELD_THICKNESS, player.rect.size.y * 2.0);
        Self {
            id,
            rect: Rect::new(
                player.rect.center + player.rect.size * facing,
                rotated_size(size, angle),
            )
            .clamped_to_playfield(),
            angle,
            life: Countdown::new(SHIELD_LIFE),
        }
    }

    pub fn update(&mut self) -> bool {
        self.life.tick()
    }
}

/// A circular area that follows the player and swallows what it touches
#[derive(Debug, Clone)]
pub struct GravitySphere {
    pub id: u32,
    pub center: Vec2,
    pub radius: f32,
    pub life: Countdown,
}

impl GravitySphere {
    pub fn new(id: u32, center: Vec2) -> Self {
        Self {
            id,
            center,
            radius: GRAVITY_SPHERE_RADIUS,
            life: Countdown::new(GRAVITY_SPHERE_LIFE),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.center, Vec2::splat(self.radius * 2.0))
    }

    /// Re-center on the player; returns false once expired
    pub fn update(&mut self, follow: Vec2) -> bool {
        self.center = follow;
        self.life.tick()
    }
}

/// Full-screen gravity field
#[derive(Debug, Clone)]
pub struct NeoGravity {
    pub id: u32,
    pub life: Countdown,
}

impl NeoGravity {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            life: Countdown::new(NEO_GRAVITY_LIFE),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::playfield()
    }

    pub fn update(&mut self) -> bool {
        self.life.tick()
    }
}

/// Purely visual blast left where something was destroyed
#[derive(Debug, Clone)]
pub struct Explosion {
    pub id: u32,
    pub rect: Rect,
    pub life: Countdown,
}

impl Explosion {
    /// Placed at `center`, nudged inward if it would poke out of the playfield
    pub fn new(id: u32, center: Vec2, size: Vec2, life: i32) -> Self {
        Self {
            id,
            rect: Rect::new(center, size).clamped_to_playfield(),
            life: Countdown::new(life),
        }
    }

    /// Animation frame (0 or 1), flipping every 10 frames
    pub fn frame(&self) -> usize {
        (self.life.remaining().max(0) / 10 % 2) as usize
    }

    pub fn update(&mut self) -> bool {
        self.life.tick()
    }
}

/// What destroyed an enemy or bomb
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KillCause {
    Beam,
    NeoGravity,
    GravitySphere,
    Shield,
    /// Rammed by the player in hyper mode
    Hyper,
}

/// Things that happened during a tick, drained by the caller
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    EnemySpawned { id: u32 },
    BombDropped { id: u32, enemy: u32 },
    EnemyDestroyed { id: u32, cause: KillCause, pos: Vec2 },
    BombDestroyed { id: u32, cause: KillCause, pos: Vec2 },
    AbilityActivated { ability: Ability, cost: u64 },
    AbilityRejected { ability: Ability },
    PlayerHit,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Source of every per-instance random field
    pub rng: Pcg32,
    /// Frame counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    pub score: Score,
    /// Fan size used when firing with boost held
    pub beam_count: usize,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    /// At most one live shield
    pub shields: Vec<Shield>,
    pub gravity_spheres: Vec<GravitySphere>,
    pub neo_gravities: Vec<NeoGravity>,
    pub explosions: Vec<Explosion>,
    /// Background offset while a neo-gravity field is live
    pub screen_shake: Vec2,
    /// Events recorded since the last drain
    pub events: Vec<GameEvent>,
    pub sprites: SpriteSizes,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new session with the given seed and default sprite sizes
    pub fn new(seed: u64) -> Self {
        Self::with_sprites(seed, SpriteSizes::default())
    }

    pub fn with_sprites(seed: u64, sprites: SpriteSizes) -> Self {
        let start = Vec2::new(PLAYER_START.0, PLAYER_START.1);
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            time_ticks: 0,
            phase: GamePhase::Playing,
            score: Score::new(),
            beam_count: START_BEAM_COUNT,
            player: Player::new(start, sprites.player),
            enemies: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            shields: Vec::new(),
            gravity_spheres: Vec::new(),
            neo_gravities: Vec::new(),
            explosions: Vec::new(),
            screen_shake: Vec2::ZERO,
            events: Vec::new(),
            sprites,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Spawn a fresh enemy at the top edge
    pub fn spawn_enemy(&mut self) -> u32 {
        let id = self.next_entity_id();
        let enemy = Enemy::spawn(id, &mut self.rng, &self.sprites);
        log::debug!(
            "Enemy {} spawned at x={:.0}, stops at y={:.0}, drops every {} frames",
            id,
            enemy.rect.center.x,
            enemy.bound,
            enemy.drop_interval
        );
        self.enemies.push(enemy);
        self.events.push(GameEvent::EnemySpawned { id });
        id
    }

    /// Drop a bomb from the enemy at `index`, aimed at the player.
    ///
    /// The id is only claimed when the bomb actually spawns.
    pub fn drop_bomb(&mut self, index: usize) -> Option<u32> {
        let id = self.next_id;
        let enemy = &self.enemies[index];
        match Bomb::aimed(id, enemy, &self.player.rect, &mut self.rng) {
            Some(bomb) => {
                self.next_id += 1;
                self.events.push(GameEvent::BombDropped { id, enemy: bomb.owner });
                self.bombs.push(bomb);
                Some(id)
            }
            None => {
                log::warn!("Enemy {} sits on the player, bomb not dropped", enemy.id);
                None
            }
        }
    }

    /// Leave an explosion behind at `center`
    pub fn spawn_explosion(&mut self, center: Vec2, life: i32) {
        let id = self.next_entity_id();
        let size = self.sprites.explosion;
        self.explosions.push(Explosion::new(id, center, size, life));
    }

    /// Take all events recorded so far
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
