//! Game state and core simulation types
//!
//! Everything the loop mutates under its lock lives here. Seeded from the
//! surface dimensions when the surface is created.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// The bouncing ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    /// Displacement applied each tick
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Bottom edge of the ball
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.radius
    }
}

/// Which half of the screen a paddle (and its touch zone) belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

/// A fixed paddle. Input only changes its highlight, never its position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub pressed: bool,
}

impl Paddle {
    /// Top edge (the face the ball lands on)
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    /// Bottom-right corner
    #[inline]
    pub fn max(&self) -> Vec2 {
        self.pos + self.size
    }
}

/// Arena bounds, equal to the current surface size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Where the ball is (re)spawned
    #[inline]
    pub fn spawn_point(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 3.0)
    }

    /// Horizontal midpoint splitting the two touch zones
    #[inline]
    pub fn midpoint_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Snapshot of the two pressed flags
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left_pressed: bool,
    pub right_pressed: bool,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub arena: Arena,
    pub ball: Ball,
    pub left: Paddle,
    pub right: Paddle,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Seed a fresh state for a surface of the given size
    pub fn new(width: f32, height: f32, settings: &Settings) -> Self {
        debug_assert!(settings.ball_radius > 0.0, "ball radius must be positive");
        let arena = Arena::new(width, height);
        let size = Vec2::new(settings.paddle_width, settings.paddle_height);
        let paddle_y = height - settings.paddle_bottom_offset;

        let left = Paddle {
            side: Side::Left,
            pos: Vec2::new(settings.paddle_inset, paddle_y),
            size,
            pressed: false,
        };
        let right = Paddle {
            side: Side::Right,
            pos: Vec2::new(width - settings.paddle_width - settings.paddle_inset, paddle_y),
            size,
            pressed: false,
        };

        Self {
            arena,
            ball: Ball::new(
                arena.spawn_point(),
                Vec2::from(settings.ball_speed),
                settings.ball_radius,
            ),
            left,
            right,
            time_ticks: 0,
        }
    }

    /// Copy the latest input flags onto the paddles
    pub fn apply_input(&mut self, input: InputState) {
        self.left.pressed = input.left_pressed;
        self.right.pressed = input.right_pressed;
    }

    /// Update arena bounds after a surface resize.
    /// Paddle layout is left as seeded.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.arena = Arena::new(width, height);
    }

    pub fn paddles(&self) -> [&Paddle; 2] {
        [&self.left, &self.right]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_surface() {
        let state = GameState::new(800.0, 600.0, &Settings::default());

        assert_eq!(state.ball.pos, Vec2::new(400.0, 200.0));
        assert_eq!(state.ball.vel, Vec2::new(5.0, 5.0));
        assert_eq!(state.ball.radius, 30.0);

        assert_eq!(state.left.pos, Vec2::new(100.0, 450.0));
        assert_eq!(state.right.pos, Vec2::new(500.0, 450.0));
        assert_eq!(state.left.size, Vec2::new(200.0, 30.0));
        assert!(!state.left.pressed && !state.right.pressed);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_apply_input() {
        let mut state = GameState::new(800.0, 600.0, &Settings::default());
        let input = InputState {
            left_pressed: true,
            right_pressed: false,
        };
        state.apply_input(input);

        assert!(state.left.pressed);
        assert!(!state.right.pressed);

        state.apply_input(InputState::default());
        assert!(!state.left.pressed && !state.right.pressed);
    }

    #[test]
    fn test_resize_keeps_paddles() {
        let mut state = GameState::new(800.0, 600.0, &Settings::default());
        let right = state.right;
        state.resize(1024.0, 768.0);

        assert_eq!(state.arena, Arena::new(1024.0, 768.0));
        assert_eq!(state.arena.spawn_point(), Vec2::new(512.0, 256.0));
        assert_eq!(state.right, right);
    }
}
