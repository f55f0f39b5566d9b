//! Flappy - a side-scrolling gap runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (actor, obstacles, collisions, game state)
//! - `game`: Command queue and per-frame driver around the simulation
//! - `renderer`: Scene description and WebGPU rendering pipeline
//! - `settings`: Player/world settings with validation

pub mod game;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use game::{Command, CommandSender, FrameOutcome, Game, GameOverSink};
pub use settings::{Settings, SettingsError};

/// Game configuration constants
pub mod consts {
    /// World dimensions (canvas pixels)
    pub const WORLD_WIDTH: f32 = 400.0;
    pub const WORLD_HEIGHT: f32 = 600.0;

    /// Downward acceleration added to the actor velocity every tick
    pub const GRAVITY: f32 = 0.4;
    /// Horizontal obstacle scroll per tick
    pub const SCROLL_SPEED: f32 = 2.0;

    /// Obstacle defaults
    pub const OBSTACLE_GAP_HEIGHT: f32 = 200.0;
    pub const OBSTACLE_WIDTH: f32 = 80.0;
    /// Distance from the right edge the trailing obstacle must travel before the next spawns
    pub const SPAWN_THRESHOLD: f32 = 200.0;

    /// Actor defaults
    pub const ACTOR_SIZE: f32 = 20.0;
    pub const ACTOR_SPAWN_X: f32 = 50.0;
    /// Velocity set (not added) on every impulse
    pub const IMPULSE_STRENGTH: f32 = -6.0;

    /// Score overlay anchor (right-aligned)
    pub const SCORE_TEXT_MARGIN_RIGHT: f32 = 20.0;
    pub const SCORE_TEXT_BASELINE: f32 = 40.0;
}
