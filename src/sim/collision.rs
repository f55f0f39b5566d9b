//! Axis-aligned collision geometry
//!
//! Everything that collides in the world is a rectangle in canvas space
//! (y grows downward). Overlap uses strict comparisons on all four edges so
//! rectangles that only share a boundary never collide.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle stored by its corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: Vec2,
    /// Bottom-right corner
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Square box of half-extent `half` around `center`
    pub fn from_center(center: Vec2, half: f32) -> Self {
        Self {
            min: center - Vec2::splat(half),
            max: center + Vec2::splat(half),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }
}

/// Strict AABB overlap test (touching edges do not count)
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.max.x > b.min.x && a.min.x < b.max.x && a.max.y > b.min.y && a.min.y < b.max.y
}
