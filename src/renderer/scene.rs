//! Plain-data description of one frame
//!
//! Built from the simulation after every tick and handed to a `RenderSink`.
//! Nothing here touches the GPU, so it is easy to test.

use glam::Vec2;

use crate::consts::{SCORE_TEXT_BASELINE, SCORE_TEXT_MARGIN_RIGHT};
use crate::sim::{GamePhase, GameState, Rect};

/// Score overlay color (yellow)
pub const SCORE_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

/// Text drawn over the scene
#[derive(Debug, Clone, PartialEq)]
pub struct TextOverlay {
    pub text: String,
    /// Baseline anchor in world coordinates
    pub anchor: Vec2,
    /// Anchor is the right end of the text
    pub align_right: bool,
    pub color: [f32; 4],
}

/// Everything a renderer needs for one frame, in draw order:
/// background, obstacle columns, actor, then the score text
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub world_size: Vec2,
    /// Horizontal distance scrolled this run (for background parallax)
    pub scroll: f32,
    pub phase: GamePhase,
    /// Actor sprite box
    pub actor: Rect,
    pub actor_velocity: f32,
    /// Every obstacle column, left-to-right, top column before bottom
    pub obstacles: Vec<Rect>,
    pub score: TextOverlay,
}

impl Scene {
    pub fn from_state(state: &GameState) -> Self {
        let params = &state.params;
        let obstacles = state
            .obstacles
            .iter()
            .flat_map(|pair| pair.rects())
            .collect();

        Self {
            world_size: Vec2::new(params.world_width, params.world_height),
            scroll: state.time_ticks as f32 * state.speed,
            phase: state.phase,
            actor: state.actor.bounding_box(),
            actor_velocity: state.actor.velocity,
            obstacles,
            score: TextOverlay {
                text: score_text(state.score),
                anchor: Vec2::new(params.world_width - SCORE_TEXT_MARGIN_RIGHT, SCORE_TEXT_BASELINE),
                align_right: true,
                color: SCORE_COLOR,
            },
        }
    }
}

/// The label used by both the overlay and the game-over panel
pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}
