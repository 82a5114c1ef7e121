//! Browser façade
//!
//! The page owns the canvas, keyboard and audio; it calls in once per
//! animation frame with the elapsed time and the current key flags.

use wasm_bindgen::prelude::*;

use crate::highscores::LocalStorageStore;
use crate::platform;
use crate::session::{Session, SilentAudio};
use crate::settings::Settings;
use crate::sim::TickInput;

/// Key flags in `TickInput` field order, packed for the JS boundary
fn input_from_flags(flags: u32) -> TickInput {
    let bit = |n: u32| flags & (1 << n) != 0;
    TickInput {
        rotate_left: bit(0),
        rotate_right: bit(1),
        thrust: bit(2),
        fire: bit(3),
        pause: bit(4),
        restart: bit(5),
        fullscreen: bit(6),
        any_key: bit(7),
    }
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session<LocalStorageStore, SilentAudio>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebGame {
        let settings = Settings::load();
        let store = platform::default_store(&settings);
        WebGame {
            session: Session::from_settings(&settings, store, SilentAudio),
        }
    }

    /// Run one animation frame; returns the ticks advanced
    pub fn frame(&mut self, elapsed_ms: f32, flags: u32) -> u32 {
        self.session.frame(elapsed_ms, input_from_flags(flags))
    }

    /// Deterministic time advance for automated page tests
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, ms: f32, flags: u32) -> u32 {
        self.session.advance_time(ms, input_from_flags(flags))
    }

    #[wasm_bindgen(js_name = setHidden)]
    pub fn set_hidden(&mut self, hidden: bool) {
        self.session.set_hidden(hidden);
    }

    /// Current state as snapshot JSON
    pub fn render_game_to_text(&self) -> String {
        self.session.snapshot().to_json()
    }
}

impl Default for WebGame {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    platform::init_logging("info");
    log::info!("Torus Asteroids (web) ready");
}
