//! Axis-aligned rectangle geometry for sprites
//!
//! Every sprite is described by its center and the size of its bounding box,
//! the same box a blitter would fill on screen.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{HEIGHT, WIDTH};

/// An axis-aligned rectangle stored as center + size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub center: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self { center, size }
    }

    /// Rectangle covering the whole playfield
    pub fn playfield() -> Self {
        Self::new(Vec2::new(WIDTH / 2.0, HEIGHT / 2.0), Vec2::new(WIDTH, HEIGHT))
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.size.x / 2.0
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.size.x / 2.0
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.size.y / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.size.y / 2.0
    }

    /// Strict overlap test: rectangles that only share an edge do not collide
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.center + delta, self.size)
    }

    /// Shift the rectangle the least distance that puts it inside the
    /// playfield. A rectangle larger than the playfield ends up flush with
    /// the right/bottom edge.
    pub fn clamped_to_playfield(&self) -> Self {
        let half = self.size / 2.0;
        let center = Vec2::new(
            self.center.x.max(half.x).min(WIDTH - half.x),
            self.center.y.max(half.y).min(HEIGHT - half.y),
        );
        Self::new(center, self.size)
    }
}

/// True when `point` lies inside the playfield (edges included)
#[inline]
pub fn point_in_bounds(point: Vec2) -> bool {
    (0.0..=WIDTH).contains(&point.x) && (0.0..=HEIGHT).contains(&point.y)
}

/// Check whether a rectangle lies inside the playfield on each axis.
///
/// Returns `(horizontal_ok, vertical_ok)`.
pub fn in_bounds(rect: &Rect) -> (bool, bool) {
    let horizontal = rect.left() >= 0.0 && rect.right() <= WIDTH;
    let vertical = rect.top() >= 0.0 && rect.bottom() <= HEIGHT;
    (horizontal, vertical)
}

/// True when the rectangle is fully inside the playfield
#[inline]
pub fn fully_in_bounds(rect: &Rect) -> bool {
    in_bounds(rect) == (true, true)
}

/// Unit vector from `from`'s center to `to`'s center.
///
/// Returns `None` when the centers coincide; callers must not spawn anything
/// aimed along an undefined direction.
pub fn direction_to(from: &Rect, to: &Rect) -> Option<Vec2> {
    (to.center - from.center).try_normalize()
}

/// Bounding box size of a `size` sprite rotated by `degrees`
pub fn rotated_size(size: Vec2, degrees: f32) -> Vec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (sin, cos) = (sin.abs(), cos.abs());
    Vec2::new(size.x * cos + size.y * sin, size.x * sin + size.y * cos)
}
