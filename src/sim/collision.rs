//! Collision tests for the rectangular arena
//!
//! Each check is a pure predicate over the post-integration ball position.
//! The tick decides what to do with the velocity.

use super::state::{Arena, Ball, Paddle};

/// Ball overlaps the left or right wall
#[inline]
pub fn hits_side_wall(ball: &Ball, arena: &Arena) -> bool {
    ball.pos.x < ball.radius || ball.pos.x > arena.width - ball.radius
}

/// Ball overlaps the top wall
#[inline]
pub fn hits_top_wall(ball: &Ball) -> bool {
    ball.pos.y < ball.radius
}

/// Ball bottom edge has reached the paddle top edge while its center lies
/// strictly inside the paddle's horizontal span.
///
/// Approach direction is not checked, so this stays true for every tick the
/// ball sits in the paddle's band.
#[inline]
pub fn touches_paddle(ball: &Ball, paddle: &Paddle) -> bool {
    ball.bottom() >= paddle.top() && ball.pos.x > paddle.left() && ball.pos.x < paddle.right()
}

/// Ball has dropped below the arena floor
#[inline]
pub fn fell_out(ball: &Ball, arena: &Arena) -> bool {
    ball.pos.y > arena.height
}
