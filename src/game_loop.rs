//! Dedicated game loop thread
//!
//! Each iteration acquires a frame, ticks and draws under the state lock,
//! presents, then sleeps a fixed interval. The sleep is not corrected for
//! drift or for how long the iteration took.

use std::any::Any;
use std::io;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use thiserror::Error;

use crate::platform::{InputFlags, Surface};
use crate::renderer::{self, Palette};
use crate::settings::Settings;
use crate::sim::{GameState, tick};

/// Thread name for the loop
pub const LOOP_THREAD_NAME: &str = "game-loop";

#[derive(Debug, Error)]
pub enum LoopError {
    /// Loops are single-use; a new surface gets a new loop
    #[error("game loop already started")]
    AlreadyStarted,
    #[error("failed to spawn game loop thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Stopped,
    Running,
}

/// Counters updated by the loop thread
#[derive(Debug, Default)]
pub struct LoopStats {
    ticks: AtomicU64,
    frames_presented: AtomicU64,
    frames_skipped: AtomicU64,
}

impl LoopStats {
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented.load(Ordering::Acquire)
    }

    /// Iterations dropped because no frame could be acquired
    pub fn frames_skipped(&self) -> u64 {
        self.frames_skipped.load(Ordering::Acquire)
    }
}

/// Lock the shared state, recovering from a poisoned mutex
pub fn lock_state(state: &Mutex<GameState>) -> MutexGuard<'_, GameState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Everything the loop thread owns
struct Worker<S: Surface> {
    surface: Arc<S>,
    state: Arc<Mutex<GameState>>,
    flags: Arc<InputFlags>,
    palette: Palette,
    interval: Duration,
    running: Arc<AtomicBool>,
    stats: Arc<LoopStats>,
}

impl<S: Surface> Worker<S> {
    fn run(self) {
        while self.running.load(Ordering::Acquire) {
            self.step();
            thread::sleep(self.interval);
        }
        log::debug!("Game loop thread exiting");
    }

    /// One iteration minus the sleep. Returns whether a frame was presented.
    fn step(&self) -> bool {
        // No frame means no tick either: update and draw happen together
        let mut frame = match self.surface.acquire_frame() {
            Ok(frame) => frame,
            Err(e) => {
                log::debug!("Skipping iteration: {}", e);
                self.stats.frames_skipped.fetch_add(1, Ordering::AcqRel);
                return false;
            }
        };

        {
            let mut state = lock_state(&self.state);
            state.apply_input(self.flags.snapshot());
            tick(&mut state);
            renderer::draw(&state, &self.palette, &mut frame);
        }
        self.stats.ticks.fetch_add(1, Ordering::AcqRel);

        self.surface.present_frame(frame);
        self.stats.frames_presented.fetch_add(1, Ordering::AcqRel);
        true
    }
}

/// Handle to a loop thread, one per surface lifetime
pub struct GameLoop<S: Surface> {
    phase: LoopPhase,
    /// Taken on start
    worker: Option<Worker<S>>,
    running: Arc<AtomicBool>,
    stats: Arc<LoopStats>,
    handle: Option<JoinHandle<()>>,
}

impl<S: Surface> GameLoop<S> {
    /// Create a stopped loop over `state`, reading input from `flags`
    pub fn new(
        surface: Arc<S>,
        state: Arc<Mutex<GameState>>,
        flags: Arc<InputFlags>,
        settings: &Settings,
    ) -> Self {
        let running = Arc::new(AtomicBool::new(false));
        let stats = Arc::new(LoopStats::default());
        let worker = Worker {
            surface,
            state,
            flags,
            palette: settings.palette,
            interval: settings.frame_interval(),
            running: running.clone(),
            stats: stats.clone(),
        };

        Self {
            phase: LoopPhase::Stopped,
            worker: Some(worker),
            running,
            stats,
            handle: None,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn stats(&self) -> Arc<LoopStats> {
        self.stats.clone()
    }

    /// Spawn the loop thread. A loop can only be started once.
    pub fn start(&mut self) -> Result<(), LoopError> {
        let worker = self.worker.take().ok_or(LoopError::AlreadyStarted)?;
        let interval = worker.interval;

        self.running.store(true, Ordering::Release);
        let spawned = thread::Builder::new()
            .name(LOOP_THREAD_NAME.to_string())
            .spawn(move || worker.run());

        match spawned {
            Ok(handle) => {
                self.handle = Some(handle);
                self.phase = LoopPhase::Running;
                log::info!("Game loop started ({}ms interval)", interval.as_millis());
                Ok(())
            }
            Err(e) => {
                self.running.store(false, Ordering::Release);
                Err(e.into())
            }
        }
    }

    /// Signal the thread and block until it has exited.
    ///
    /// No frame is presented after this returns. A panic on the loop thread is
    /// logged, not propagated.
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::Release);

        let Some(handle) = self.handle.take() else {
            return;
        };
        if let Err(panic) = handle.join() {
            log::error!("Game loop thread panicked: {}", panic_message(&*panic));
        }
        self.phase = LoopPhase::Stopped;

        log::info!(
            "Game loop stopped after {} ticks ({} frames presented, {} skipped)",
            self.stats.ticks(),
            self.stats.frames_presented(),
            self.stats.frames_skipped()
        );
    }
}

impl<S: Surface> Drop for GameLoop<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
