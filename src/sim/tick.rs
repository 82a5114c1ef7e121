//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation deterministically and reports
//! what happened through a plain [`StepEvents`] record.

use serde::{Deserialize, Serialize};

use super::random::RandomSource;
use super::spawn::find_safe_ship_spawn;
use super::state::{Bullet, GameMode, GameState};
use super::torus::{circles_overlap, wrap_position};
use crate::consts::*;

/// Input commands for a single tick (deterministic)
///
/// The first four fields are held-down levels; the rest are edges that are
/// true only on the tick representing the originating press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub rotate_left: bool,
    pub rotate_right: bool,
    pub thrust: bool,
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Restart after game over
    pub restart: bool,
    /// Fullscreen toggle (handled by the page, ignored by the simulation)
    pub fullscreen: bool,
    /// Any key went down this tick
    pub any_key: bool,
}

impl TickInput {
    /// The same held controls with every edge cleared, for catch-up ticks
    pub fn steady(&self) -> Self {
        Self {
            pause: false,
            restart: false,
            fullscreen: false,
            any_key: false,
            ..*self
        }
    }
}

/// Everything a tick did that audio or persistence might react to
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepEvents {
    pub fired: bool,
    pub explosions: u32,
    pub beat: bool,
    pub thrusting: bool,
    pub started: bool,
    pub game_over: bool,
    pub high_score_updated: bool,
    pub mode_changed: Option<GameMode>,
    pub level_up: bool,
}

/// Beat interval for the current field: slow when full, fast when nearly cleared
pub fn beat_interval_ms(remaining: usize, level_start: usize) -> f32 {
    let fraction = (remaining as f32 / level_start.max(1) as f32).min(1.0);
    BEAT_INTERVAL_MIN_MS + (BEAT_INTERVAL_MAX_MS - BEAT_INTERVAL_MIN_MS) * fraction
}

/// Advance the game state by one fixed timestep
pub fn step(
    state: &mut GameState,
    input: &TickInput,
    dt_ms: f32,
    rng: &mut dyn RandomSource,
) -> StepEvents {
    let mut events = StepEvents::default();

    match state.mode {
        GameMode::Attract | GameMode::GameOver => {
            let wants_run = input.any_key || (state.mode == GameMode::GameOver && input.restart);
            if wants_run {
                state.begin_run(rng);
                events.started = true;
                events.mode_changed = Some(GameMode::Playing);
                log::debug!("Run started with {} asteroids", state.asteroids.len());
            }
            return events;
        }
        GameMode::Playing | GameMode::Paused => {}
    }

    // Pausing consumes its tick; resuming plays on through it
    if input.pause {
        state.mode = if state.mode == GameMode::Paused {
            GameMode::Playing
        } else {
            GameMode::Paused
        };
        events.mode_changed = Some(state.mode);
    }

    if state.mode != GameMode::Playing {
        return events;
    }

    let dt = dt_ms / 1000.0;
    update_ship(state, input, dt, dt_ms, &mut events);
    fire_bullet(state, input, &mut events);
    update_bullets(state, dt, dt_ms);
    update_asteroids(state, dt);
    resolve_bullet_hits(state, rng, &mut events);
    resolve_ship_collision(state, rng, &mut events);

    if state.mode != GameMode::Playing {
        return events;
    }

    advance_level_if_cleared(state, rng, &mut events);
    update_beat(state, &mut events);

    events
}

fn update_ship(state: &mut GameState, input: &TickInput, dt: f32, dt_ms: f32, events: &mut StepEvents) {
    let ship = &mut state.ship;

    if input.rotate_left {
        ship.angle -= SHIP_TURN_SPEED * dt;
    }
    if input.rotate_right {
        ship.angle += SHIP_TURN_SPEED * dt;
    }

    if input.thrust {
        ship.vel += ship.heading() * SHIP_THRUST * dt;
        events.thrusting = true;
    }

    // Scale rather than clamp per axis so the direction survives
    let speed = ship.vel.length();
    if speed > SHIP_MAX_SPEED {
        ship.vel *= SHIP_MAX_SPEED / speed;
    }

    ship.pos = wrap_position(ship.pos + ship.vel * dt, state.world_width, state.world_height);
    ship.invulnerable_ms = (ship.invulnerable_ms - dt_ms).max(0.0);
}

fn fire_bullet(state: &mut GameState, input: &TickInput, events: &mut StepEvents) {
    state.fire_cooldown_ms = (state.fire_cooldown_ms - FIXED_STEP_MS).max(0.0);

    if !(input.fire && state.fire_cooldown_ms <= 0.0 && state.ship.alive) {
        return;
    }

    let heading = state.ship.heading();
    let nose = state.ship.pos + heading * (state.ship.radius + BULLET_NOSE_OFFSET);
    let id = state.next_entity_id();

    state.bullets.push(Bullet {
        id,
        pos: wrap_position(nose, state.world_width, state.world_height),
        vel: heading * BULLET_SPEED + state.ship.vel * BULLET_INHERIT,
        radius: BULLET_RADIUS,
        ttl_ms: BULLET_TTL_MS,
    });

    state.fire_cooldown_ms = FIRE_COOLDOWN_MS;
    events.fired = true;
}

fn update_bullets(state: &mut GameState, dt: f32, dt_ms: f32) {
    for bullet in &mut state.bullets {
        bullet.pos = wrap_position(bullet.pos + bullet.vel * dt, state.world_width, state.world_height);
        bullet.ttl_ms -= dt_ms;
    }
}

fn update_asteroids(state: &mut GameState, dt: f32) {
    for asteroid in &mut state.asteroids {
        asteroid.pos =
            wrap_position(asteroid.pos + asteroid.vel * dt, state.world_width, state.world_height);
        asteroid.rotation += asteroid.spin * dt;
    }
}

/// Each bullet destroys at most one asteroid and each asteroid dies at most
/// once. Fragments join the field after the pass. Expired bullets still take
/// part and are dropped with the spent ones at the end.
fn resolve_bullet_hits(state: &mut GameState, rng: &mut dyn RandomSource, events: &mut StepEvents) {
    let (width, height) = (state.world_width, state.world_height);
    let mut destroyed = vec![false; state.asteroids.len()];
    let mut spent = vec![false; state.bullets.len()];
    let mut hits = Vec::new();

    for (bullet_idx, bullet) in state.bullets.iter().enumerate() {
        let target = state.asteroids.iter().enumerate().position(|(idx, asteroid)| {
            !destroyed[idx]
                && circles_overlap(bullet.pos, bullet.radius, asteroid.pos, asteroid.radius, width, height)
        });
        if let Some(asteroid_idx) = target {
            destroyed[asteroid_idx] = true;
            spent[bullet_idx] = true;
            hits.push(asteroid_idx);
        }
    }

    let mut fragments = Vec::new();
    for asteroid_idx in hits {
        let asteroid = state.asteroids[asteroid_idx].clone();
        state.score += asteroid.size.score();
        events.explosions += 1;
        fragments.extend(state.fragments_of(&asteroid, rng));
        if state.reconcile_high_score() {
            events.high_score_updated = true;
        }
    }

    let mut idx = 0;
    state.asteroids.retain(|_| {
        let keep = !destroyed[idx];
        idx += 1;
        keep
    });
    state.asteroids.extend(fragments);

    let mut idx = 0;
    state.bullets.retain(|bullet| {
        let keep = !spent[idx] && !bullet.is_expired();
        idx += 1;
        keep
    });
}

fn resolve_ship_collision(state: &mut GameState, rng: &mut dyn RandomSource, events: &mut StepEvents) {
    let ship = &state.ship;
    if ship.is_invulnerable() || !ship.alive {
        return;
    }

    let collided = state.asteroids.iter().any(|asteroid| {
        circles_overlap(
            ship.pos,
            ship.radius,
            asteroid.pos,
            asteroid.radius,
            state.world_width,
            state.world_height,
        )
    });
    if !collided {
        return;
    }

    events.explosions += 1;
    state.lives = state.lives.saturating_sub(1);

    if state.lives == 0 {
        state.mode = GameMode::GameOver;
        state.ship.alive = false;
        events.game_over = true;
        events.mode_changed = Some(GameMode::GameOver);
        if state.reconcile_high_score() {
            events.high_score_updated = true;
        }
        log::debug!("Game over at level {} with score {}", state.level, state.score);
        return;
    }

    let spawn = find_safe_ship_spawn(&state.asteroids, state.world_width, state.world_height, rng);
    let ship = &mut state.ship;
    ship.pos = spawn;
    ship.vel = glam::Vec2::ZERO;
    ship.angle = SHIP_SPAWN_ANGLE;
    ship.invulnerable_ms = SHIP_RESPAWN_INVULNERABLE_MS;
}

fn advance_level_if_cleared(state: &mut GameState, rng: &mut dyn RandomSource, events: &mut StepEvents) {
    if !state.asteroids.is_empty() {
        return;
    }

    state.level += 1;
    events.level_up = true;
    let safe = state.ship.pos;
    state.spawn_level(safe, rng);
    state.beat_timer_ms = BEAT_INTERVAL_MAX_MS;
    log::debug!("Level {} with {} asteroids", state.level, state.asteroids.len());
}

/// Re-arming adds to the (possibly negative) residual so the pulse stays
/// sub-tick accurate. The timer only drops by one fixed step per tick and the
/// shortest interval is many steps long, so at most one beat fires per tick.
fn update_beat(state: &mut GameState, events: &mut StepEvents) {
    let interval = beat_interval_ms(state.asteroids.len(), state.level_start_asteroids);

    state.beat_timer_ms -= FIXED_STEP_MS;
    if state.beat_timer_ms <= 0.0 {
        state.beat_timer_ms += interval;
        events.beat = true;
    }
}
