//! Game view
//!
//! Glues a surface, the input router and a game loop together. The host drives
//! it through `SurfaceCallbacks` and `PointerHandler`.

use std::sync::{Arc, Mutex};

use crate::game_loop::{GameLoop, LoopPhase, LoopStats, lock_state};
use crate::platform::{InputRouter, PointerEvent, PointerHandler, Surface, SurfaceCallbacks};
use crate::settings::Settings;
use crate::sim::GameState;

/// Cloneable pointer entry point for input threads
pub struct TouchInput<S: Surface> {
    router: InputRouter,
    surface: Arc<S>,
}

impl<S: Surface> Clone for TouchInput<S> {
    fn clone(&self) -> Self {
        Self {
            router: self.router.clone(),
            surface: self.surface.clone(),
        }
    }
}

impl<S: Surface> PointerHandler for TouchInput<S> {
    fn on_pointer_event(&self, event: PointerEvent) -> bool {
        // Split the live surface, not the size the state was seeded with
        self.router.on_pointer_event(event, self.surface.width())
    }
}

pub struct GameView<S: Surface> {
    surface: Arc<S>,
    settings: Settings,
    input: TouchInput<S>,
    state: Option<Arc<Mutex<GameState>>>,
    game_loop: Option<GameLoop<S>>,
}

impl<S: Surface> GameView<S> {
    pub fn new(surface: Arc<S>, settings: Settings) -> Self {
        let input = TouchInput {
            router: InputRouter::default(),
            surface: surface.clone(),
        };
        Self {
            surface,
            settings,
            input,
            state: None,
            game_loop: None,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Handle for delivering pointer events from another thread
    pub fn touch_input(&self) -> TouchInput<S> {
        self.input.clone()
    }

    pub fn loop_phase(&self) -> LoopPhase {
        self.game_loop
            .as_ref()
            .map_or(LoopPhase::Stopped, GameLoop::phase)
    }

    /// Stats of the current (or most recent) loop
    pub fn loop_stats(&self) -> Option<Arc<LoopStats>> {
        self.game_loop.as_ref().map(GameLoop::stats)
    }

    /// Copy of the current simulation state, taken under the loop's lock
    pub fn snapshot(&self) -> Option<GameState> {
        self.state.as_ref().map(|state| lock_state(state).clone())
    }

    fn shutdown_loop(&mut self) {
        if let Some(game_loop) = self.game_loop.as_mut() {
            game_loop.stop();
        }
    }
}

impl<S: Surface> SurfaceCallbacks for GameView<S> {
    fn surface_created(&mut self) {
        if self.loop_phase() == LoopPhase::Running {
            log::warn!("Surface created while a loop is running; stopping it first");
            self.shutdown_loop();
        }

        let (width, height) = (self.surface.width(), self.surface.height());
        let state = Arc::new(Mutex::new(GameState::new(width, height, &self.settings)));
        log::info!("Surface created ({}x{})", width, height);

        let mut game_loop = GameLoop::new(
            self.surface.clone(),
            state.clone(),
            self.input.router.flags().clone(),
            &self.settings,
        );
        if let Err(e) = game_loop.start() {
            log::error!("Could not start game loop: {}", e);
        }

        self.state = Some(state);
        self.game_loop = Some(game_loop);
    }

    /// The arena is sized from the surface itself, the same source the input
    /// midpoint reads, so the two can never disagree.
    fn surface_changed(&mut self, width: f32, height: f32) {
        let (live_width, live_height) = (self.surface.width(), self.surface.height());
        if (live_width, live_height) != (width, height) {
            log::warn!(
                "Surface reported {}x{} but measures {}x{}; using the measured size",
                width,
                height,
                live_width,
                live_height
            );
        }
        log::info!("Surface changed ({}x{})", live_width, live_height);
        if let Some(state) = &self.state {
            lock_state(state).resize(live_width, live_height);
        }
    }

    fn surface_destroyed(&mut self) {
        log::info!("Surface destroyed");
        self.shutdown_loop();
    }
}

impl<S: Surface> PointerHandler for GameView<S> {
    fn on_pointer_event(&self, event: PointerEvent) -> bool {
        self.input.on_pointer_event(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{PixelSurface, PointerAction};
    use crate::sim::Side;
    use glam::Vec2;
    use std::thread;
    use std::time::{Duration, Instant};

    fn view() -> (Arc<PixelSurface>, GameView<PixelSurface>) {
        let surface = Arc::new(PixelSurface::new(800, 600));
        let settings = Settings {
            frame_interval_ms: 1,
            ..Default::default()
        };
        (surface.clone(), GameView::new(surface, settings))
    }

    fn wait_until(what: &str, cond: impl Fn() -> bool) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !cond() {
            assert!(Instant::now() < deadline, "timed out waiting for {}", what);
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn test_lifecycle() {
        let (surface, mut view) = view();
        assert_eq!(view.loop_phase(), LoopPhase::Stopped);
        assert!(view.snapshot().is_none());

        view.surface_created();
        assert_eq!(view.loop_phase(), LoopPhase::Running);

        let state = view.snapshot().unwrap();
        assert_eq!(state.left.pos, Vec2::new(100.0, 450.0));
        assert_eq!(state.right.pos, Vec2::new(500.0, 450.0));

        wait_until("frames", || surface.frames_presented() >= 3);
        view.surface_destroyed();
        assert_eq!(view.loop_phase(), LoopPhase::Stopped);

        let presented = surface.frames_presented();
        thread::sleep(Duration::from_millis(30));
        assert_eq!(surface.frames_presented(), presented);
        assert_eq!(view.loop_stats().unwrap().frames_presented(), presented);
    }

    #[test]
    fn test_recreate_reseeds() {
        let (surface, mut view) = view();
        view.surface_created();
        wait_until("frames", || surface.frames_presented() >= 5);
        view.surface_destroyed();
        let first = view.loop_stats().unwrap();
        assert!(view.snapshot().unwrap().time_ticks >= 5);

        view.surface_created();
        let second = view.loop_stats().unwrap();
        assert!(!Arc::ptr_eq(&first, &second));

        // The old loop stays frozen while the new one runs
        let frozen = first.frames_presented();
        let frozen_ticks = first.ticks();
        wait_until("second loop frames", || second.frames_presented() >= 5);
        thread::sleep(Duration::from_millis(20));
        assert_eq!(first.frames_presented(), frozen);
        assert_eq!(first.ticks(), frozen_ticks);
        view.surface_destroyed();

        // Fresh state: only the second loop's ticks are on it
        assert_eq!(view.snapshot().unwrap().time_ticks, second.ticks());
    }

    #[test]
    fn test_double_create_replaces_loop() {
        let (_surface, mut view) = view();
        view.surface_created();
        let first = view.loop_stats().unwrap();
        view.surface_created();

        let frozen = first.frames_presented();
        thread::sleep(Duration::from_millis(20));
        assert_eq!(first.frames_presented(), frozen);
        assert_eq!(view.loop_phase(), LoopPhase::Running);
        view.surface_destroyed();
    }

    #[test]
    fn test_destroy_without_create() {
        let (surface, mut view) = view();
        view.surface_destroyed();
        assert_eq!(view.loop_phase(), LoopPhase::Stopped);
        assert_eq!(surface.frames_presented(), 0);
    }

    #[test]
    fn test_pointer_events_reach_paddles() {
        let (_surface, mut view) = view();
        view.surface_created();

        let input = view.touch_input();
        let sender = thread::spawn(move || {
            input.on_pointer_event(PointerEvent::new(PointerAction::Down, 790.0, 10.0))
        });
        assert!(sender.join().unwrap());

        wait_until("right paddle pressed", || {
            view.snapshot().is_some_and(|s| s.right.pressed && !s.left.pressed)
        });

        assert!(view.on_pointer_event(PointerEvent::new(PointerAction::Up, 600.0, 10.0)));
        wait_until("right paddle released", || {
            view.snapshot().is_some_and(|s| !s.right.pressed)
        });
        view.surface_destroyed();
    }

    #[test]
    fn test_surface_changed_resizes_arena() {
        let (surface, mut view) = view();
        // Ignored before the surface exists
        view.surface_changed(320.0, 240.0);
        assert!(view.snapshot().is_none());

        view.surface_created();
        surface.resize(1024, 768);
        view.surface_changed(1024.0, 768.0);
        let state = view.snapshot().unwrap();
        assert_eq!(state.arena.width, 1024.0);
        assert_eq!(state.arena.height, 768.0);
        view.surface_destroyed();
    }

    #[test]
    fn test_tap_uses_resized_midpoint() {
        let (surface, mut view) = view();
        view.surface_created();
        surface.resize(1600, 600);
        view.surface_changed(1600.0, 600.0);

        // Right of the old midpoint, left of the new one
        assert!(view.on_pointer_event(PointerEvent::new(PointerAction::Down, 500.0, 10.0)));
        let flags = view.input.router.flags().snapshot();
        assert!(flags.left_pressed);
        assert!(!flags.right_pressed);

        let arena = view.snapshot().unwrap().arena;
        assert_eq!(arena.width, 1600.0);
        assert!(500.0 < arena.midpoint_x());
        view.surface_destroyed();
    }

    #[test]
    fn test_reported_size_cannot_split_arena_and_input() {
        let (_surface, mut view) = view();
        view.surface_created();
        // Callback disagrees with the surface, which still measures 800 wide
        view.surface_changed(1600.0, 600.0);

        let arena = view.snapshot().unwrap().arena;
        assert_eq!(arena.width, 800.0);

        view.on_pointer_event(PointerEvent::new(PointerAction::Down, 500.0, 10.0));
        let flags = view.input.router.flags().snapshot();
        let arena_side = InputRouter::side_of(500.0, arena.width);
        assert_eq!(arena_side, Side::Right);
        assert!(flags.right_pressed);
        assert!(!flags.left_pressed);
        view.surface_destroyed();
    }
}
