//! The player-controlled sprite

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use super::state::WorldParams;

/// The actor falls under gravity and jumps on impulse.
///
/// `pos` is the sprite center. `x` never changes after spawn; only `y` and
/// the vertical `velocity` are simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    pub pos: Vec2,
    /// Vertical velocity in pixels per tick (positive is down)
    pub velocity: f32,
    /// Half-extent used for both the bounding box and bounds clamping
    pub size: f32,
    /// Velocity assigned on impulse
    pub impulse_strength: f32,
}

impl Actor {
    /// Spawn at the configured x, vertically centered, at rest
    pub fn spawn(params: &WorldParams) -> Self {
        Self {
            pos: Vec2::new(params.actor_spawn_x, params.world_height / 2.0),
            velocity: 0.0,
            size: params.actor_size,
            impulse_strength: params.impulse_strength,
        }
    }

    /// Accumulate gravity. Terminal velocity is unbounded.
    #[inline]
    pub fn apply_gravity(&mut self, gravity: f32) {
        self.velocity += gravity;
    }

    #[inline]
    pub fn integrate_position(&mut self) {
        self.pos.y += self.velocity;
    }

    /// Clamp `y` to `[0, world_height - size]`.
    ///
    /// Velocity is left untouched. Returns true if the position was clamped.
    pub fn clamp_to_bounds(&mut self, world_height: f32) -> bool {
        let clamped = self.pos.y.min(world_height - self.size).max(0.0);
        let hit = clamped != self.pos.y;
        self.pos.y = clamped;
        hit
    }

    /// Set (not add) the impulse velocity
    #[inline]
    pub fn apply_impulse(&mut self) {
        self.velocity = self.impulse_strength;
    }

    /// Collision box: a square of half-extent `size` around the center
    pub fn bounding_box(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }
}
