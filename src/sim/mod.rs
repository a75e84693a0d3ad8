//! Simulation module
//!
//! All ball physics lives here. Pure state transitions only:
//! - Fixed per-tick displacement
//! - No rendering, threading or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{fell_out, hits_side_wall, hits_top_wall, touches_paddle};
pub use state::{Arena, Ball, GameState, InputState, Paddle, Side};
pub use tick::tick;
