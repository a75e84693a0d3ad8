//! Per-tick update rule
//!
//! Advances the ball by one fixed displacement. Not scaled by wall-clock time;
//! the physics rate is whatever rate the loop calls this at.

use super::collision::{fell_out, hits_side_wall, hits_top_wall, touches_paddle};
use super::state::GameState;

/// Advance the game state by one step
pub fn tick(state: &mut GameState) {
    state.time_ticks += 1;

    let arena = state.arena;
    let ball = &mut state.ball;

    // Integrate
    ball.pos += ball.vel;

    // Walls flip the matching component once per tick
    if hits_side_wall(ball, &arena) {
        ball.vel.x = -ball.vel.x;
    }
    if hits_top_wall(ball) {
        ball.vel.y = -ball.vel.y;
    }

    // Paddles always send the ball upward, whatever it was doing
    for paddle in [&state.left, &state.right] {
        if touches_paddle(ball, paddle) {
            ball.vel.y = -ball.vel.y.abs();
        }
    }

    // Missed both paddles: respawn, keeping the current velocity
    if fell_out(ball, &arena) {
        ball.pos = arena.spawn_point();
    }
}
