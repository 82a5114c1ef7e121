//! Game state and core simulation types
//!
//! The engine's caller owns exactly one `GameState` and hands it to
//! [`super::tick::step`] once per fixed tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::spawn::{spawn_level_asteroids, split_asteroid};
use crate::consts::*;

/// Current mode of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Title screen with a drifting field, waiting for any key
    Attract,
    /// Active gameplay
    Playing,
    /// Frozen until the next pause edge
    Paused,
    /// Run ended, waiting for restart
    GameOver,
}

/// Asteroid size classes, largest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    /// Collision radius for this size class
    pub fn radius(self) -> f32 {
        match self {
            AsteroidSize::Large => 48.0,
            AsteroidSize::Medium => 28.0,
            AsteroidSize::Small => 16.0,
        }
    }

    /// Points awarded for destroying an asteroid of this size
    pub fn score(self) -> u64 {
        match self {
            AsteroidSize::Large => 20,
            AsteroidSize::Medium => 50,
            AsteroidSize::Small => 100,
        }
    }

    /// Size of the fragments this asteroid breaks into (None = no fragments)
    pub fn fragment_size(self) -> Option<AsteroidSize> {
        match self {
            AsteroidSize::Large => Some(AsteroidSize::Medium),
            AsteroidSize::Medium => Some(AsteroidSize::Small),
            AsteroidSize::Small => None,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Heading (radians, 0 = +x, positive turns clockwise on screen)
    pub angle: f32,
    pub radius: f32,
    /// Milliseconds of invulnerability remaining
    pub invulnerable_ms: f32,
    pub alive: bool,
}

impl Ship {
    /// A fresh ship at rest, invulnerable for the respawn window
    pub fn spawn_at(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            angle: SHIP_SPAWN_ANGLE,
            radius: SHIP_RADIUS,
            invulnerable_ms: SHIP_RESPAWN_INVULNERABLE_MS,
            alive: true,
        }
    }

    /// Unit vector along the heading
    #[inline]
    pub fn heading(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable_ms > 0.0
    }
}

/// A bullet entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Milliseconds left before the bullet expires
    pub ttl_ms: f32,
}

impl Bullet {
    pub fn is_expired(&self) -> bool {
        self.ttl_ms <= 0.0
    }
}

/// An asteroid entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub size: AsteroidSize,
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Cosmetic rotation (radians)
    pub rotation: f32,
    /// Cosmetic spin rate (radians/sec)
    pub spin: f32,
    /// Seed for the rendered outline; never read by the simulation
    pub shape_seed: u32,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub mode: GameMode,
    pub world_width: f32,
    pub world_height: f32,
    pub ship: Ship,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    /// Current level (1-based)
    pub level: u32,
    pub fire_cooldown_ms: f32,
    pub beat_timer_ms: f32,
    /// Asteroids present when the current level was spawned
    pub level_start_asteroids: usize,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create the attract-mode state with a level-1 field drifting behind the title
    pub fn new(high_score: u64, rng: &mut dyn RandomSource) -> Self {
        let center = Vec2::new(WORLD_WIDTH * 0.5, WORLD_HEIGHT * 0.5);
        let mut state = Self {
            mode: GameMode::Attract,
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            ship: Ship::spawn_at(center),
            bullets: Vec::new(),
            asteroids: Vec::new(),
            score: 0,
            high_score,
            lives: STARTING_LIVES,
            level: 1,
            fire_cooldown_ms: 0.0,
            beat_timer_ms: BEAT_INTERVAL_MAX_MS,
            level_start_asteroids: 0,
            next_id: 1,
        };

        state.spawn_level(center, rng);
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// The ID the next spawned entity will receive
    pub fn peek_next_id(&self) -> u32 {
        self.next_id
    }

    /// World center, where new runs put the ship
    pub fn world_center(&self) -> Vec2 {
        Vec2::new(self.world_width * 0.5, self.world_height * 0.5)
    }

    /// Replace the field with the current level's asteroids, keeping clear of `safe`
    pub fn spawn_level(&mut self, safe: Vec2, rng: &mut dyn RandomSource) {
        let (asteroids, next_id) = spawn_level_asteroids(
            self.level,
            self.next_id,
            self.world_width,
            self.world_height,
            safe,
            rng,
        );
        self.level_start_asteroids = asteroids.len();
        self.asteroids = asteroids;
        self.next_id = next_id;
    }

    /// Reset everything a run owns and start playing
    pub fn begin_run(&mut self, rng: &mut dyn RandomSource) {
        self.mode = GameMode::Playing;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.level = 1;
        self.bullets.clear();
        self.fire_cooldown_ms = 0.0;
        self.beat_timer_ms = BEAT_INTERVAL_MAX_MS;

        let center = self.world_center();
        self.ship = Ship::spawn_at(center);
        self.spawn_level(center, rng);
    }

    /// Fragments for a destroyed asteroid, with fresh IDs
    pub fn fragments_of(&mut self, asteroid: &Asteroid, rng: &mut dyn RandomSource) -> Vec<Asteroid> {
        let (fragments, next_id) = split_asteroid(asteroid, self.next_id, rng);
        self.next_id = next_id;
        fragments
    }

    /// Raise the high score to the current score; true if it moved
    pub fn reconcile_high_score(&mut self) -> bool {
        if self.score > self.high_score {
            self.high_score = self.score;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::ScriptedRandom;

    #[test]
    fn test_new_state_is_attract_with_field() {
        let mut rng = ScriptedRandom::new(vec![0.1, 0.9, 0.3, 0.7, 0.5]);
        let state = GameState::new(1234, &mut rng);
        assert_eq!(state.mode, GameMode::Attract);
        assert_eq!(state.high_score, 1234);
        assert_eq!(state.level, 1);
        assert_eq!(state.asteroids.len(), 4);
        assert_eq!(state.level_start_asteroids, 4);
        assert_eq!(state.peek_next_id(), 5);
    }

    #[test]
    fn test_entity_ids_increase() {
        let mut rng = ScriptedRandom::constant(0.25);
        let mut state = GameState::new(0, &mut rng);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
        assert!(state.asteroids.iter().all(|x| x.id < a));
    }

    #[test]
    fn test_size_order_and_tables() {
        assert!(AsteroidSize::Large > AsteroidSize::Medium);
        assert!(AsteroidSize::Medium > AsteroidSize::Small);
        assert!(AsteroidSize::Large.radius() > AsteroidSize::Medium.radius());
        assert!(AsteroidSize::Medium.radius() > AsteroidSize::Small.radius());
        assert_eq!(AsteroidSize::Small.fragment_size(), None);
    }

    #[test]
    fn test_reconcile_high_score_only_when_exceeded() {
        let mut rng = ScriptedRandom::constant(0.25);
        let mut state = GameState::new(100, &mut rng);
        state.score = 100;
        assert!(!state.reconcile_high_score());
        state.score = 120;
        assert!(state.reconcile_high_score());
        assert_eq!(state.high_score, 120);
    }
}
