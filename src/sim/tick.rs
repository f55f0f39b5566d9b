//! Per-frame simulation step
//!
//! One `tick` advances the actor, scrolls and collides obstacles, prunes the
//! ones that left the screen, spawns a new pair when there is room, and scores.

use super::actor::Actor;
use super::obstacle::ObstaclePair;
use super::state::{GameEvent, GamePhase, GameState};

/// What the driver should do after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running; nothing happened
    Idle,
    /// Still running, request another frame
    Continue,
    /// Collision this tick; stop requesting frames
    Ended { final_score: u64 },
}

/// Begin a new run. Valid from `Ready` or `Ended`; ignored while running.
///
/// Resets the actor, obstacles, score and per-run constants, then spawns the
/// first obstacle pair so there is something to draw before the first tick.
pub fn start(state: &mut GameState) -> bool {
    if state.is_running() {
        return false;
    }

    state.run_index += 1;
    state.reseed_for_run();

    state.actor = Actor::spawn(&state.params);
    state.obstacles.clear();
    state.score = 0;
    state.speed = state.params.speed;
    state.gravity = state.params.gravity;
    state.time_ticks = 0;
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::Started { seed: state.seed });

    spawn_pair(state);

    log::info!("Run {} started (seed {})", state.run_index, state.seed);
    true
}

/// Apply an impulse to the actor. Ignored unless running; never buffered.
pub fn handle_impulse(state: &mut GameState) -> bool {
    if !state.is_running() {
        return false;
    }
    state.actor.apply_impulse();
    state.events.push(GameEvent::Impulse);
    true
}

/// Advance the game by one frame
pub fn tick(state: &mut GameState) -> TickOutcome {
    if !state.is_running() {
        return TickOutcome::Idle;
    }

    state.time_ticks += 1;

    // 1. Actor
    let world_height = state.params.world_height;
    state.actor.apply_gravity(state.gravity);
    state.actor.integrate_position();
    if state.actor.clamp_to_bounds(world_height) && state.params.clamp_resets_velocity {
        state.actor.velocity = 0.0;
    }

    // 2. Scroll and collide, only against pairs present at the start of the tick.
    // The first hit ends the run; later pairs are left untouched.
    let actor_box = state.actor.bounding_box();
    let speed = state.speed;
    let mut hit = None;
    for pair in state.obstacles.iter_mut() {
        pair.advance(speed);
        if pair.collides_with(&actor_box) {
            hit = Some(pair.id);
            break;
        }
    }
    if let Some(obstacle_id) = hit {
        return end_run(state, obstacle_id);
    }

    // 3. Prune
    prune_offscreen(&mut state.obstacles);

    // 4. Spawn
    maybe_spawn(state);

    // 5. Score
    state.score += 1;

    TickOutcome::Continue
}

/// Remove every pair that is fully offscreen, preserving the order of the rest
pub fn prune_offscreen(obstacles: &mut Vec<ObstaclePair>) -> usize {
    let before = obstacles.len();
    obstacles.retain(|pair| !pair.is_offscreen());
    before - obstacles.len()
}

/// Spawn a pair if none exist or the trailing pair has scrolled past the
/// spawn threshold. Returns true if a pair was spawned.
pub fn maybe_spawn(state: &mut GameState) -> bool {
    let threshold_x = state.params.world_width - state.params.spawn_threshold;
    let room = state
        .obstacles
        .last()
        .is_none_or(|trailing| trailing.x < threshold_x);

    if room {
        spawn_pair(state);
    }
    room
}

fn spawn_pair(state: &mut GameState) {
    let id = state.next_entity_id();
    let pair = ObstaclePair::spawn(id, &state.params, &mut state.rng);
    log::debug!("Spawned obstacle {} (gap top {:.1})", id, pair.gap_top);
    state.events.push(GameEvent::ObstacleSpawned {
        id,
        gap_top: pair.gap_top,
    });
    state.obstacles.push(pair);
}

fn end_run(state: &mut GameState, obstacle_id: u32) -> TickOutcome {
    let final_score = state.score;
    state.phase = GamePhase::Ended;
    state.events.push(GameEvent::Collision { obstacle_id });
    state.events.push(GameEvent::GameOver { final_score });

    log::info!(
        "Run {} over: score {} after {} ticks",
        state.run_index,
        final_score,
        state.time_ticks
    );
    TickOutcome::Ended { final_score }
}
