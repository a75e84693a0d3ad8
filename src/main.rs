//! Pinball entry point
//!
//! Runs the game headless against an in-memory surface while a scripted
//! finger taps both halves of the screen from its own thread.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use pinball::platform::{
    PixelSurface, PointerAction, PointerEvent, PointerHandler, Surface, SurfaceCallbacks,
};
use pinball::{GameView, Settings};

const SURFACE_WIDTH: u32 = 800;
const SURFACE_HEIGHT: u32 = 600;
const DEMO_DURATION: Duration = Duration::from_secs(3);

/// Tap random halves of the surface until `done` is set
fn run_finger<H: PointerHandler>(input: H, width: f32, height: f32, seed: u64, done: &AtomicBool) {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut taps = 0u32;

    while !done.load(Ordering::Acquire) {
        let x = if rng.random_bool(0.5) {
            rng.random_range(0.0..width / 2.0)
        } else {
            rng.random_range(width / 2.0..width)
        };
        let y = rng.random_range(0.0..height);

        input.on_pointer_event(PointerEvent::new(PointerAction::Down, x, y));
        thread::sleep(Duration::from_millis(rng.random_range(50..400)));
        input.on_pointer_event(PointerEvent::new(PointerAction::Up, x, y));
        taps += 1;

        thread::sleep(Duration::from_millis(rng.random_range(20..200)));
    }

    log::info!("Finger lifted after {} taps", taps);
}

fn main() {
    env_logger::init();
    log::info!("Pinball (headless) starting...");

    let settings = Settings::load();
    let surface = Arc::new(PixelSurface::new(SURFACE_WIDTH, SURFACE_HEIGHT));
    let mut view = GameView::new(surface.clone(), settings);

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    log::info!("Finger script seed: {}", seed);

    view.surface_created();

    let done = Arc::new(AtomicBool::new(false));
    let finger = {
        let input = view.touch_input();
        let done = done.clone();
        let (width, height) = (surface.width(), surface.height());
        thread::spawn(move || run_finger(input, width, height, seed, &done))
    };

    let started = Instant::now();
    while started.elapsed() < DEMO_DURATION {
        thread::sleep(Duration::from_millis(500));
        if let Some(state) = view.snapshot() {
            log::info!(
                "tick {:>4}  ball ({:6.1}, {:6.1})  vel ({:+.0}, {:+.0})  pressed L={} R={}",
                state.time_ticks,
                state.ball.pos.x,
                state.ball.pos.y,
                state.ball.vel.x,
                state.ball.vel.y,
                state.left.pressed,
                state.right.pressed
            );
        }
    }

    done.store(true, Ordering::Release);
    if finger.join().is_err() {
        log::error!("Finger thread panicked");
    }
    view.surface_destroyed();
    surface.release();

    let frame = surface.front_buffer();
    let background = view.settings().palette.background;
    let lit = frame.pixels().iter().filter(|p| **p != background).count();
    let highlighted = frame
        .pixels()
        .iter()
        .filter(|p| **p == view.settings().palette.paddle_pressed)
        .count();
    log::info!(
        "Last frame: {}x{}, {} lit pixels ({} highlighted), {} frames presented",
        frame.width(),
        frame.height(),
        lit,
        highlighted,
        surface.frames_presented()
    );
}
