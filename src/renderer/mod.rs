//! Rendering module
//!
//! Projects a `GameState` onto any `Canvas`. Drawing never mutates state.

pub mod raster;

pub use raster::PixelBuffer;

use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameState, Paddle};

/// 8-bit RGBA color, laid out to match the pixel buffer
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);
    pub const RED: Rgba = Rgba::rgb(255, 0, 0);
    pub const YELLOW: Rgba = Rgba::rgb(255, 255, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Linear blend toward `other` by `t` in [0, 1]
    pub fn lerp(self, other: Rgba, t: f32) -> Rgba {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgba {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// Colors used to draw a frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Rgba,
    pub ball: Rgba,
    /// Paddle fill while its half of the screen is touched
    pub paddle_pressed: Rgba,
    pub paddle_idle: Rgba,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Rgba::BLACK,
            ball: Rgba::WHITE,
            paddle_pressed: Rgba::YELLOW,
            paddle_idle: Rgba::RED,
        }
    }
}

impl Palette {
    pub fn paddle(&self, paddle: &Paddle) -> Rgba {
        if paddle.pressed {
            self.paddle_pressed
        } else {
            self.paddle_idle
        }
    }
}

/// A drawable frame target
pub trait Canvas {
    fn clear(&mut self, color: Rgba);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
    /// Fill the axis-aligned rect spanning `min` to `max`
    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba);
}

/// Paint one frame of `state`
pub fn draw<C: Canvas + ?Sized>(state: &GameState, palette: &Palette, canvas: &mut C) {
    canvas.clear(palette.background);

    let ball = &state.ball;
    canvas.fill_circle(ball.pos, ball.radius, palette.ball);

    for paddle in state.paddles() {
        canvas.fill_rect(paddle.pos, paddle.max(), palette.paddle(paddle));
    }
}
