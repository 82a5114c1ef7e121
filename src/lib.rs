//! Torus Asteroids - An arcade asteroids game on a wraparound field
//!
//! Core modules:
//! - `sim`: Deterministic simulation (kinematics, collisions, spawning, game state)
//! - `presentation`: Seeded, renderer-facing data (outlines, starfield, overlay text)
//! - `highscores`: Persisted high score with pluggable storage
//! - `session`: Fixed-step frame driver that owns the state between frames
//! - `settings`: Runtime configuration
//! - `platform`: Browser/native platform abstraction

pub mod highscores;
pub mod platform;
pub mod presentation;
pub mod session;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscores::{HighScoreStore, MemoryStore, StorageError};
pub use session::{AudioSink, Session, SilentAudio};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation timestep in milliseconds (60 Hz)
    pub const FIXED_STEP_MS: f32 = 1000.0 / 60.0;
    /// Largest wall-clock delta a single frame may feed into the accumulator
    pub const MAX_FRAME_DELTA_MS: f32 = 120.0;

    /// World dimensions (wraps on both axes)
    pub const WORLD_WIDTH: f32 = 1024.0;
    pub const WORLD_HEIGHT: f32 = 768.0;

    pub const STARTING_LIVES: u8 = 3;

    /// Ship defaults
    pub const SHIP_RADIUS: f32 = 14.0;
    /// Turn rate (radians per second)
    pub const SHIP_TURN_SPEED: f32 = PI * 1.85;
    /// Thrust acceleration (pixels/s²)
    pub const SHIP_THRUST: f32 = 330.0;
    pub const SHIP_MAX_SPEED: f32 = 430.0;
    pub const SHIP_RESPAWN_INVULNERABLE_MS: f32 = 1800.0;
    /// Heading of a freshly spawned ship (nose up on screen)
    pub const SHIP_SPAWN_ANGLE: f32 = -PI * 0.5;

    /// Bullet defaults
    pub const BULLET_RADIUS: f32 = 2.5;
    pub const BULLET_SPEED: f32 = 590.0;
    pub const BULLET_TTL_MS: f32 = 1300.0;
    /// Bullets spawn this far past the ship's hull along the heading
    pub const BULLET_NOSE_OFFSET: f32 = 8.0;
    /// Fraction of ship velocity a new bullet inherits
    pub const BULLET_INHERIT: f32 = 0.2;
    pub const FIRE_COOLDOWN_MS: f32 = 190.0;

    /// Asteroid speed band at level 0 (pixels/s)
    pub const ASTEROID_SPEED_MIN: f32 = 28.0;
    pub const ASTEROID_SPEED_MAX: f32 = 82.0;
    /// Maximum asteroids in a freshly spawned level
    pub const MAX_LEVEL_ASTEROIDS: usize = 14;

    /// Heartbeat pacing bounds (ms between beats)
    pub const BEAT_INTERVAL_MAX_MS: f32 = 950.0;
    pub const BEAT_INTERVAL_MIN_MS: f32 = 290.0;

    /// Level asteroids avoid this radius around the safe point
    pub const RESPAWN_SAFE_RADIUS: f32 = 190.0;
    /// Extra gap a respawning ship keeps from asteroid edges
    pub const SHIP_SPAWN_CLEARANCE: f32 = 34.0;
}
