//! Obstacle pairs: a top and bottom column sharing one gap

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::{Rect, overlaps};
use super::state::WorldParams;

/// Two columns with one gap between them.
///
/// Both columns share `x` and `width`. The top column spans `[0, gap_top]`
/// and the bottom column spans `[gap_bottom, world_height]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub id: u32,
    /// Left edge, decreases every tick
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub world_height: f32,
}

impl ObstaclePair {
    /// Build a pair with a known gap
    pub fn with_gap(id: u32, x: f32, gap_top: f32, params: &WorldParams) -> Self {
        Self {
            id,
            x,
            width: params.obstacle_width,
            gap_top,
            gap_bottom: gap_top + params.gap_height,
            world_height: params.world_height,
        }
    }

    /// Spawn at the right edge of the world with `gap_top` drawn uniformly
    /// from `[0, world_height / 2)`
    pub fn spawn<R: Rng + ?Sized>(id: u32, params: &WorldParams, rng: &mut R) -> Self {
        let upper = params.world_height / 2.0;
        let gap_top = if upper > 0.0 {
            rng.random_range(0.0..upper)
        } else {
            0.0
        };
        Self::with_gap(id, params.world_width, gap_top, params)
    }

    /// Scroll left by `speed`
    #[inline]
    pub fn advance(&mut self, speed: f32) {
        self.x -= speed;
    }

    /// Fully past the left edge
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.x + self.width < 0.0
    }

    pub fn top_rect(&self) -> Rect {
        Rect::new(Vec2::new(self.x, 0.0), Vec2::new(self.x + self.width, self.gap_top))
    }

    pub fn bottom_rect(&self) -> Rect {
        Rect::new(
            Vec2::new(self.x, self.gap_bottom),
            Vec2::new(self.x + self.width, self.world_height),
        )
    }

    /// Both columns, top first
    pub fn rects(&self) -> [Rect; 2] {
        [self.top_rect(), self.bottom_rect()]
    }

    /// True if `bbox` overlaps either column
    pub fn collides_with(&self, bbox: &Rect) -> bool {
        overlaps(bbox, &self.top_rect()) || overlaps(bbox, &self.bottom_rect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Actor;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_spawn_at_right_edge() {
        let params = WorldParams::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let pair = ObstaclePair::spawn(1, &params, &mut rng);

        assert_eq!(pair.x, WORLD_WIDTH);
        assert_eq!(pair.width, OBSTACLE_WIDTH);
        let [top, bottom] = pair.rects();
        assert_eq!(top.min, Vec2::new(WORLD_WIDTH, 0.0));
        assert_eq!(top.height(), pair.gap_top);
        assert_eq!(bottom.min.y, pair.gap_top + OBSTACLE_GAP_HEIGHT);
        assert_eq!(bottom.max.y, WORLD_HEIGHT);
    }

    #[test]
    fn test_advance_moves_both_columns() {
        let params = WorldParams::default();
        let mut pair = ObstaclePair::with_gap(1, 400.0, 100.0, &params);
        pair.advance(SCROLL_SPEED);
        assert_eq!(pair.top_rect().min.x, 398.0);
        assert_eq!(pair.bottom_rect().min.x, 398.0);
    }

    #[test]
    fn test_offscreen_boundary() {
        let params = WorldParams::default();
        // Right edge exactly at 0 is still on screen
        let pair = ObstaclePair::with_gap(1, -OBSTACLE_WIDTH, 100.0, &params);
        assert!(!pair.is_offscreen());

        let pair = ObstaclePair::with_gap(1, -OBSTACLE_WIDTH - 0.5, 100.0, &params);
        assert!(pair.is_offscreen());
    }

    #[test]
    fn test_collides_with_top_and_bottom_independently() {
        let params = WorldParams::default();
        let pair = ObstaclePair::with_gap(1, 40.0, 200.0, &params);
        let mut actor = Actor::spawn(&params);

        // Inside the gap (200..400)
        actor.pos.y = 300.0;
        assert!(!pair.collides_with(&actor.bounding_box()));

        // Into the top column
        actor.pos.y = 190.0;
        assert!(pair.collides_with(&actor.bounding_box()));

        // Into the bottom column
        actor.pos.y = 390.0;
        assert!(pair.collides_with(&actor.bounding_box()));
    }

    #[test]
    fn test_touching_boundary_is_not_collision() {
        let params = WorldParams {
            actor_size: 10.0,
            ..WorldParams::default()
        };
        let actor = Actor::spawn(&params);

        // Left edge of the pair sits exactly on the actor's right edge
        let pair = ObstaclePair::with_gap(1, actor.pos.x + 10.0, 500.0, &params);
        assert!(!pair.collides_with(&actor.bounding_box()));

        // Gap edges touching the actor top and bottom
        let snug = WorldParams {
            gap_height: 20.0,
            ..params
        };
        let pair = ObstaclePair::with_gap(1, actor.pos.x - 40.0, actor.pos.y - 10.0, &snug);
        assert!(!pair.collides_with(&actor.bounding_box()));
    }

    proptest! {
        #[test]
        fn prop_gap_invariants(seed in any::<u64>()) {
            let params = WorldParams::default();
            let mut rng = Pcg32::seed_from_u64(seed);
            let pair = ObstaclePair::spawn(1, &params, &mut rng);

            prop_assert_eq!(pair.gap_bottom, pair.gap_top + OBSTACLE_GAP_HEIGHT);
            prop_assert!((pair.gap_bottom - pair.gap_top - OBSTACLE_GAP_HEIGHT).abs() < 1e-3);
            prop_assert!(pair.gap_top >= 0.0);
            prop_assert!(pair.gap_top < WORLD_HEIGHT / 2.0);
        }
    }
}
