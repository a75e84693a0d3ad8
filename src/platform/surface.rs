//! Drawable surface seam and a headless in-memory implementation

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

use thiserror::Error;

use crate::renderer::{Canvas, PixelBuffer};

/// Why a frame could not be acquired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// No buffer right now (surface suspended, zero-sized, or busy)
    #[error("frame buffer unavailable")]
    Unavailable,
    /// The surface has gone away
    #[error("surface lost")]
    Lost,
}

/// Surface provider consumed by the game loop
pub trait Surface: Send + Sync + 'static {
    type Frame: Canvas + Send;

    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn acquire_frame(&self) -> Result<Self::Frame, SurfaceError>;
    fn present_frame(&self, frame: Self::Frame);
}

/// Headless double-buffered surface backed by `PixelBuffer`s
#[derive(Debug)]
pub struct PixelSurface {
    width: AtomicU32,
    height: AtomicU32,
    front: Mutex<PixelBuffer>,
    /// Recycled back buffer, if one is free
    spare: Mutex<Option<PixelBuffer>>,
    suspended: AtomicBool,
    /// Set once torn down; every later acquire fails with `Lost`
    released: AtomicBool,
    presented: AtomicU64,
}

impl PixelSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: AtomicU32::new(width),
            height: AtomicU32::new(height),
            front: Mutex::new(PixelBuffer::new(width, height)),
            spare: Mutex::new(None),
            suspended: AtomicBool::new(false),
            released: AtomicBool::new(false),
            presented: AtomicU64::new(0),
        }
    }

    /// While suspended every acquire fails with `Unavailable`
    pub fn set_suspended(&self, suspended: bool) {
        self.suspended.store(suspended, Ordering::Release);
    }

    /// Change the surface size. Frames acquired afterwards use the new size.
    pub fn resize(&self, width: u32, height: u32) {
        self.width.store(width, Ordering::Release);
        self.height.store(height, Ordering::Release);
        self.spare
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
    }

    /// Tear the surface down for good
    pub fn release(&self) {
        self.released.store(true, Ordering::Release);
    }

    fn size(&self) -> (u32, u32) {
        (
            self.width.load(Ordering::Acquire),
            self.height.load(Ordering::Acquire),
        )
    }

    /// Number of frames presented so far
    pub fn frames_presented(&self) -> u64 {
        self.presented.load(Ordering::Acquire)
    }

    /// Copy of the last presented frame
    pub fn front_buffer(&self) -> PixelBuffer {
        self.front
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Raw RGBA bytes of the last presented frame
    pub fn front_bytes(&self) -> Vec<u8> {
        self.front_buffer().as_bytes().to_vec()
    }
}

impl Surface for PixelSurface {
    type Frame = PixelBuffer;

    fn width(&self) -> f32 {
        self.width.load(Ordering::Acquire) as f32
    }

    fn height(&self) -> f32 {
        self.height.load(Ordering::Acquire) as f32
    }

    fn acquire_frame(&self) -> Result<PixelBuffer, SurfaceError> {
        if self.released.load(Ordering::Acquire) {
            return Err(SurfaceError::Lost);
        }
        let (width, height) = self.size();
        if self.suspended.load(Ordering::Acquire) || width == 0 || height == 0 {
            return Err(SurfaceError::Unavailable);
        }
        let spare = self
            .spare
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
            .filter(|buf| buf.width() == width && buf.height() == height);
        Ok(spare.unwrap_or_else(|| PixelBuffer::new(width, height)))
    }

    fn present_frame(&self, frame: PixelBuffer) {
        let previous = {
            let mut front = self.front.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            std::mem::replace(&mut *front, frame)
        };
        *self.spare.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(previous);
        self.presented.fetch_add(1, Ordering::AcqRel);
    }
}
