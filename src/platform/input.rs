//! Pointer input routing
//!
//! Maps raw pointer actions onto the two half-screen pressed flags. Safe to
//! call from any thread while the loop is running.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};

use crate::sim::{InputState, Side};

/// Pointer action kinds delivered by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerAction {
    /// First finger down
    Down,
    /// Additional finger down
    PointerDown,
    /// Last finger up
    Up,
    /// Non-primary finger up
    PointerUp,
    Move,
    Cancel,
}

/// A single pointer event in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub x: f32,
    pub y: f32,
}

impl PointerEvent {
    pub fn new(action: PointerAction, x: f32, y: f32) -> Self {
        Self { action, x, y }
    }
}

/// Shared pressed flags.
///
/// Plain relaxed atomics: last write wins, readers may observe a stale value
/// for one iteration.
#[derive(Debug, Default)]
pub struct InputFlags {
    left: AtomicBool,
    right: AtomicBool,
}

impl InputFlags {
    pub fn set(&self, side: Side, pressed: bool) {
        match side {
            Side::Left => self.left.store(pressed, Ordering::Relaxed),
            Side::Right => self.right.store(pressed, Ordering::Relaxed),
        }
    }

    pub fn snapshot(&self) -> InputState {
        InputState {
            left_pressed: self.left.load(Ordering::Relaxed),
            right_pressed: self.right.load(Ordering::Relaxed),
        }
    }

    pub fn clear(&self) {
        self.set(Side::Left, false);
        self.set(Side::Right, false);
    }
}

/// Translates pointer events into pressed flags
#[derive(Debug, Clone, Default)]
pub struct InputRouter {
    flags: Arc<InputFlags>,
}

impl InputRouter {
    pub fn new(flags: Arc<InputFlags>) -> Self {
        Self { flags }
    }

    pub fn flags(&self) -> &Arc<InputFlags> {
        &self.flags
    }

    /// Which half of a surface `width` wide the coordinate falls in.
    /// No range check: off-surface coordinates fall on whichever side they lie.
    pub fn side_of(x: f32, width: f32) -> Side {
        if x < width / 2.0 { Side::Left } else { Side::Right }
    }

    /// Apply one event. Always consumes it.
    pub fn on_pointer_event(&self, event: PointerEvent, width: f32) -> bool {
        let side = Self::side_of(event.x, width);
        match event.action {
            PointerAction::Down | PointerAction::PointerDown => self.flags.set(side, true),
            PointerAction::Up | PointerAction::PointerUp => self.flags.set(side, false),
            PointerAction::Move | PointerAction::Cancel => {}
        }
        true
    }
}
