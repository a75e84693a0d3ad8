//! Platform abstraction layer
//!
//! The seams between the game core and whatever hosts it:
//! - Drawable surface (acquire / present frames, current size)
//! - Surface lifecycle callbacks
//! - Pointer input events

pub mod input;
pub mod surface;

pub use input::{InputFlags, InputRouter, PointerAction, PointerEvent};
pub use surface::{PixelSurface, Surface, SurfaceError};

/// Surface lifecycle notifications delivered by the host
pub trait SurfaceCallbacks {
    fn surface_created(&mut self);
    fn surface_changed(&mut self, width: f32, height: f32);
    fn surface_destroyed(&mut self);
}

/// Receives pointer events, possibly from a thread other than the loop's.
/// Returns whether the event was consumed.
pub trait PointerHandler {
    fn on_pointer_event(&self, event: PointerEvent) -> bool;
}
