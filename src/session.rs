//! Frame driver that owns the game between frames
//!
//! Converts wall-clock time into whole fixed ticks, feeds catch-up ticks a
//! steady input so edge actions apply once per frame, and turns each tick's
//! event record into audio cues and high-score writes.

use rand_pcg::Pcg32;

use crate::consts::*;
use crate::highscores::HighScoreStore;
use crate::settings::Settings;
use crate::sim::random::seeded;
use crate::sim::{GameMode, GameState, StateSnapshot, StepEvents, TickInput, step};

/// Sound collaborator; every cue defaults to doing nothing
pub trait AudioSink {
    fn fire(&mut self) {}
    fn explosion(&mut self) {}
    fn beat(&mut self) {}
    /// Thruster loop on/off, refreshed every frame
    fn set_thrust(&mut self, _on: bool) {}
    /// First user gesture; browsers refuse audio before it
    fn unlock(&mut self) {}
    fn on_visibility_change(&mut self, _hidden: bool) {}
}

/// Audio sink for headless hosts
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentAudio;

impl AudioSink for SilentAudio {}

/// A running game: state, its random stream, and the collaborators
pub struct Session<S: HighScoreStore, A: AudioSink = SilentAudio> {
    state: GameState,
    rng: Pcg32,
    store: S,
    audio: A,
    accumulator_ms: f32,
    max_frame_delta_ms: f32,
    ticks: u64,
}

impl<S: HighScoreStore, A: AudioSink> Session<S, A> {
    /// Load the stored high score and build the attract screen
    pub fn new(seed: u64, mut store: S, audio: A) -> Self {
        let mut rng = seeded(seed);
        let high_score = store.load();
        let state = GameState::new(high_score, &mut rng);
        log::info!("Session seeded with {} (high score {})", seed, high_score);

        Self {
            state,
            rng,
            store,
            audio,
            accumulator_ms: 0.0,
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            ticks: 0,
        }
    }

    /// Session configured from host settings; draws a system seed if none is set
    pub fn from_settings(settings: &Settings, store: S, audio: A) -> Self {
        let seed = settings.seed.unwrap_or_else(rand::random);
        let mut session = Self::new(seed, store, audio);
        session.max_frame_delta_ms = settings.max_frame_delta_ms;
        session
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct state access for inspection/test tooling
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Fixed ticks run since the session started
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one display frame; returns the number of ticks it advanced
    pub fn frame(&mut self, elapsed_ms: f32, input: TickInput) -> u32 {
        if input.any_key {
            self.audio.unlock();
        }

        let delta = if elapsed_ms.is_finite() {
            elapsed_ms.clamp(0.0, self.max_frame_delta_ms)
        } else {
            0.0
        };
        self.accumulator_ms += delta;

        let mut ticks = 0;
        while self.accumulator_ms >= FIXED_STEP_MS {
            let tick_input = if ticks == 0 { input } else { input.steady() };
            self.tick(&tick_input);
            self.accumulator_ms -= FIXED_STEP_MS;
            ticks += 1;
        }

        if ticks == 0 {
            self.audio.set_thrust(self.state.mode == GameMode::Playing && input.thrust);
        }
        ticks
    }

    /// Advance a fixed amount of game time regardless of the frame clock
    ///
    /// Runs at least one tick; the first gets `input`, the rest its steady form.
    pub fn advance_time(&mut self, ms: f32, input: TickInput) -> u32 {
        if input.any_key {
            self.audio.unlock();
        }

        let ms = if ms.is_finite() { ms.max(0.0) } else { 0.0 };
        let steps = ((ms / FIXED_STEP_MS).round() as u32).max(1);
        let steady = input.steady();
        for i in 0..steps {
            self.tick(if i == 0 { &input } else { &steady });
        }
        steps
    }

    /// Page hidden/shown: freeze an active run and tell audio
    pub fn set_hidden(&mut self, hidden: bool) {
        if hidden && self.state.mode == GameMode::Playing {
            self.state.mode = GameMode::Paused;
            log::debug!("Paused on hide");
        }
        self.audio.on_visibility_change(hidden);
    }

    pub fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::capture(&self.state)
    }

    fn tick(&mut self, input: &TickInput) -> StepEvents {
        let events = step(&mut self.state, input, FIXED_STEP_MS, &mut self.rng);
        self.ticks += 1;
        self.dispatch(&events, input);
        events
    }

    fn dispatch(&mut self, events: &StepEvents, input: &TickInput) {
        self.audio.set_thrust(self.state.mode == GameMode::Playing && input.thrust);

        if events.fired {
            self.audio.fire();
        }
        for _ in 0..events.explosions {
            self.audio.explosion();
        }
        if events.beat {
            self.audio.beat();
        }

        if events.high_score_updated {
            if let Err(e) = self.store.save(self.state.high_score) {
                log::warn!("High score not saved: {}", e);
            }
        }
    }
}
