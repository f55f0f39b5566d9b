//! Game state and core simulation types

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::Actor;
use super::obstacle::ObstaclePair;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start
    Ready,
    /// Active gameplay, ticking every frame
    Running,
    /// Run ended on collision; only a start leaves this phase
    Ended,
}

/// World tuning. `Default` reproduces the classic game exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldParams {
    pub world_width: f32,
    pub world_height: f32,
    pub gravity: f32,
    pub speed: f32,
    pub gap_height: f32,
    pub obstacle_width: f32,
    pub spawn_threshold: f32,
    pub actor_size: f32,
    pub actor_spawn_x: f32,
    pub impulse_strength: f32,
    /// Zero the actor velocity when it is clamped at the floor or ceiling.
    /// Off by default: a pinned actor keeps accumulating velocity.
    pub clamp_resets_velocity: bool,
}

impl Default for WorldParams {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            gravity: GRAVITY,
            speed: SCROLL_SPEED,
            gap_height: OBSTACLE_GAP_HEIGHT,
            obstacle_width: OBSTACLE_WIDTH,
            spawn_threshold: SPAWN_THRESHOLD,
            actor_size: ACTOR_SIZE,
            actor_spawn_x: ACTOR_SPAWN_X,
            impulse_strength: IMPULSE_STRENGTH,
            clamp_resets_velocity: false,
        }
    }
}

/// Things that happened since the driver last drained `GameState::events`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started { seed: u64 },
    ObstacleSpawned { id: u32, gap_top: f32 },
    Impulse,
    Collision { obstacle_id: u32 },
    GameOver { final_score: u64 },
}

/// Complete game state (deterministic for a given seed and command sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    pub params: WorldParams,
    /// Session seed; each run reseeds from `seed + run_index`
    pub seed: u64,
    /// Number of starts this session
    pub run_index: u32,
    pub phase: GamePhase,
    pub actor: Actor,
    /// Active pairs in spawn order, which is also left-to-right order
    pub obstacles: Vec<ObstaclePair>,
    pub score: u64,
    /// Scroll speed for the current run
    pub speed: f32,
    /// Gravity for the current run
    pub gravity: f32,
    /// Ticks elapsed in the current run
    pub time_ticks: u64,
    /// Pending events for the driver
    pub events: Vec<GameEvent>,
    pub(crate) rng: Pcg32,
    next_id: u32,
}

impl GameState {
    /// Create a new game in the `Ready` phase
    pub fn new(seed: u64, params: WorldParams) -> Self {
        Self {
            params,
            seed,
            run_index: 0,
            phase: GamePhase::Ready,
            actor: Actor::spawn(&params),
            obstacles: Vec::new(),
            score: 0,
            speed: params.speed,
            gravity: params.gravity,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new obstacle ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reseed the obstacle RNG for the current run
    pub(crate) fn reseed_for_run(&mut self) {
        let run_seed = self.seed.wrapping_add(self.run_index as u64);
        self.rng = Pcg32::seed_from_u64(run_seed);
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_ready() {
        let state = GameState::new(42, WorldParams::default());
        assert_eq!(state.phase, GamePhase::Ready);
        assert!(!state.is_running());
        assert!(state.obstacles.is_empty());
        assert_eq!(state.score, 0);
        assert_eq!(state.run_index, 0);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut state = GameState::new(42, WorldParams::default());
        assert_eq!(state.next_entity_id(), 1);
        assert_eq!(state.next_entity_id(), 2);
    }

    #[test]
    fn test_default_params_match_classic_constants() {
        let p = WorldParams::default();
        assert_eq!((p.world_width, p.world_height), (400.0, 600.0));
        assert_eq!(p.gravity, 0.4);
        assert_eq!(p.speed, 2.0);
        assert_eq!(p.gap_height, 200.0);
        assert_eq!(p.obstacle_width, 80.0);
        assert_eq!(p.spawn_threshold, 200.0);
        assert_eq!(p.actor_size, 20.0);
        assert_eq!(p.impulse_strength, -6.0);
        assert!(!p.clamp_resets_velocity);
    }

    #[test]
    fn test_drain_events_empties_queue() {
        let mut state = GameState::new(1, WorldParams::default());
        state.events.push(GameEvent::Impulse);
        assert_eq!(state.drain_events(), vec![GameEvent::Impulse]);
        assert!(state.events.is_empty());
    }
}
