//! Software rasterizer for 2D primitives

use glam::Vec2;

use super::{Canvas, Rgba};

/// An RGBA8 frame, row-major, origin top-left
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgba::default(); width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Raw RGBA bytes for presentation
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Clip a half-open span of pixel centers to `[0, limit)`
    fn span(lo: f32, hi: f32, limit: u32) -> (u32, u32) {
        let clip = |v: f32| (v.round().max(0.0) as u32).min(limit);
        (clip(lo), clip(hi))
    }
}

impl Canvas for PixelBuffer {
    fn clear(&mut self, color: Rgba) {
        self.pixels.fill(color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        // One extra pixel for the anti-aliased rim
        let (x0, x1) = Self::span(center.x - radius - 1.0, center.x + radius + 1.0, self.width);
        let (y0, y1) = Self::span(center.y - radius - 1.0, center.y + radius + 1.0, self.height);

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel_center = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let edge = pixel_center.distance(center) - radius;
                let coverage = (0.5 - edge).clamp(0.0, 1.0);
                if coverage <= 0.0 {
                    continue;
                }
                let i = self.index(x, y);
                self.pixels[i] = self.pixels[i].lerp(color, coverage);
            }
        }
    }

    fn fill_rect(&mut self, min: Vec2, max: Vec2, color: Rgba) {
        let (x0, x1) = Self::span(min.x, max.x, self.width);
        let (y0, y1) = Self::span(min.y, max.y, self.height);
        if x0 >= x1 {
            return;
        }

        for y in y0..y1 {
            let row = self.index(0, y);
            self.pixels[row + x0 as usize..row + x1 as usize].fill(color);
        }
    }
}
