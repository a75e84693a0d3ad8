//! Pinball - a touch-driven bouncing-ball arcade core
//!
//! Core modules:
//! - `sim`: Simulation state and the per-tick update rule
//! - `platform`: Surface provider and pointer input seams
//! - `renderer`: State-to-pixels projection and software rasterizer
//! - `game_loop`: Dedicated tick/render/sleep thread
//! - `view`: Composes surface lifecycle, input and the loop
//! - `settings`: Data-driven layout, timing and palette

pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod view;

pub use game_loop::{GameLoop, LoopPhase, LoopStats};
pub use settings::{Settings, SettingsError};
pub use view::GameView;

/// Game configuration constants
pub mod consts {
    /// Sleep between loop iterations (~60 iterations/second)
    pub const FRAME_INTERVAL_MS: u64 = 16;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 30.0;
    /// Per-tick displacement, not scaled by elapsed time
    pub const BALL_SPEED_X: f32 = 5.0;
    pub const BALL_SPEED_Y: f32 = 5.0;

    /// Paddle defaults (fixed geometry, paddles never move)
    pub const PADDLE_WIDTH: f32 = 200.0;
    pub const PADDLE_HEIGHT: f32 = 30.0;
    /// Horizontal gap between a paddle and its side of the arena
    pub const PADDLE_INSET: f32 = 100.0;
    /// Distance from the bottom of the arena to the paddle top edge
    pub const PADDLE_BOTTOM_OFFSET: f32 = 150.0;
}
