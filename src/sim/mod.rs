//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Randomness only through an injected `RandomSource`
//! - No rendering, audio or platform dependencies

pub mod random;
pub mod snapshot;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod torus;

pub use random::{RandomSource, ScriptedRandom};
pub use snapshot::StateSnapshot;
pub use spawn::{
    SpeedBand, asteroid_count_for_level, create_asteroid, find_safe_ship_spawn,
    spawn_level_asteroids, speed_band_for_level, split_asteroid,
};
pub use state::{Asteroid, AsteroidSize, Bullet, GameMode, GameState, Ship};
pub use tick::{StepEvents, TickInput, step};
pub use torus::{
    circles_overlap, torus_distance_squared, wrap_position, wrap_value, wrapped_axis_distance,
};
