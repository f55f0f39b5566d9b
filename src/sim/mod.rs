//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, no wall-clock time
//! - Seeded RNG only
//! - Obstacles kept in spawn order (left-to-right)
//! - No rendering or platform dependencies

pub mod actor;
pub mod autopilot;
pub mod collision;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use actor::Actor;
pub use autopilot::wants_impulse;
pub use collision::{Rect, overlaps};
pub use obstacle::ObstaclePair;
pub use state::{GameEvent, GamePhase, GameState, WorldParams};
pub use tick::{TickOutcome, handle_impulse, maybe_spawn, prune_offscreen, start, tick};
