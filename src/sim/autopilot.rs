//! Idle/demo mode controller
//!
//! Looks at the state and decides whether an impulse should be requested this
//! frame. It never touches the state itself; the driver turns a `true` into an
//! ordinary impulse command.

use super::obstacle::ObstaclePair;
use super::state::GameState;

/// Clearance kept between the actor box and the gap edges
const GAP_MARGIN: f32 = 8.0;
/// Upper bound on ticks simulated when predicting the top of a jump
const MAX_LOOKAHEAD: usize = 240;

/// Vertical offset (negative is up) of the highest point reached after an impulse
fn apex_offset(impulse: f32, gravity: f32) -> f32 {
    let mut v = impulse;
    let mut dy = 0.0_f32;
    let mut apex = 0.0_f32;
    for _ in 0..MAX_LOOKAHEAD {
        v += gravity;
        dy += v;
        apex = apex.min(dy);
        if v >= 0.0 {
            break;
        }
    }
    apex
}

/// The pair the actor has to get through next: the first one whose right
/// edge has not yet passed the actor's left edge
fn next_pair(state: &GameState) -> Option<&ObstaclePair> {
    let actor_left = state.actor.pos.x - state.actor.size;
    state
        .obstacles
        .iter()
        .find(|pair| pair.x + pair.width > actor_left)
}

/// True if flapping now keeps the actor inside the upcoming gap
pub fn wants_impulse(state: &GameState) -> bool {
    if !state.is_running() {
        return false;
    }

    let actor = &state.actor;
    let (floor, ceiling) = match next_pair(state) {
        Some(pair) => (pair.gap_bottom - GAP_MARGIN, pair.gap_top + GAP_MARGIN),
        None => {
            let mid = state.params.world_height / 2.0;
            (mid + actor.size, mid - actor.size)
        }
    };

    // Where the bottom edge lands next tick if we do nothing
    let falling_to = actor.pos.y + actor.velocity + state.gravity + actor.size;
    // Highest the top edge gets if we flap now
    let rising_to = actor.pos.y + apex_offset(actor.impulse_strength, state.gravity) - actor.size;

    falling_to > floor && rising_to > ceiling
}
