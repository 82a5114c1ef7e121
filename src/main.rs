//! Torus Asteroids - headless native runner
//!
//! Plays a scripted autopilot run at a simulated 60 fps display and prints the
//! final snapshot as JSON. The browser build drives the library through
//! `torus_asteroids::web` instead.

#[cfg(not(target_arch = "wasm32"))]
use torus_asteroids::{
    Session, Settings, SilentAudio,
    consts::FIXED_STEP_MS,
    platform,
    sim::{GameMode, GameState, TickInput},
};

/// Autopilot: sweep the nose around, fire constantly, and thrust in short
/// bursts. Restarts after a game over.
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &GameState, frame: u64) -> TickInput {
    match state.mode {
        GameMode::Attract | GameMode::GameOver => TickInput {
            any_key: true,
            ..Default::default()
        },
        GameMode::Paused => TickInput {
            pause: true,
            ..Default::default()
        },
        GameMode::Playing => TickInput {
            rotate_left: (frame / 90) % 2 == 0,
            rotate_right: (frame / 90) % 2 == 1,
            thrust: frame % 120 < 15,
            fire: true,
            ..Default::default()
        },
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    let settings = Settings::load();
    platform::init_logging(&settings.log_filter);
    log::info!("Torus Asteroids (native) starting...");

    let store = platform::default_store(&settings);
    let mut session = Session::from_settings(&settings, store, SilentAudio);

    let frames = (settings.demo_seconds * 1000.0 / FIXED_STEP_MS).round() as u64;
    let mut last_mode = session.state().mode;
    let mut last_level = session.state().level;

    for frame in 0..frames {
        let input = autopilot(session.state(), frame);
        session.frame(FIXED_STEP_MS, input);

        let state = session.state();
        if state.mode != last_mode {
            log::info!("Mode {:?} -> {:?} (score {})", last_mode, state.mode, state.score);
            last_mode = state.mode;
        }
        if state.level != last_level {
            log::info!("Level {} reached", state.level);
            last_level = state.level;
        }
    }

    let state = session.state();
    log::info!(
        "Autopilot finished after {} ticks: score {}, high score {}, level {}",
        session.ticks(),
        state.score,
        state.high_score,
        state.level
    );
    println!("{}", session.snapshot().to_json());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is torus_asteroids::web::wasm_main
}
