//! Asteroid creation, level fields, fragmentation and safe ship placement
//!
//! Every random draw goes through [`RandomSource`], so the same stream always
//! produces the same field.

use glam::Vec2;

use super::random::RandomSource;
use super::state::{Asteroid, AsteroidSize};
use super::torus::{torus_distance_squared, wrap_position};
use crate::consts::*;

/// Re-samples allowed per level asteroid before settling for the best candidate
const LEVEL_SPAWN_ATTEMPTS: u32 = 40;
/// Random candidates tried for a ship respawn after the center is blocked
const SHIP_SPAWN_ATTEMPTS: u32 = 120;
/// Spin rate range for new asteroids (radians/sec, symmetric)
const MAX_SPIN: f32 = 1.2;
/// Exclusive upper bound of shape seeds
const SHAPE_SEED_RANGE: f32 = 100_000.0;

/// Fragments fly faster than their parent by this factor
const FRAGMENT_SPEEDUP: f32 = 1.18;
/// Fragment speed floor, as a multiple of the base minimum speed
const FRAGMENT_MIN_SPEED_FACTOR: f32 = 1.4;
/// Width of the fragment speed band above its base
const FRAGMENT_SPEED_SPREAD: f32 = 26.0;
/// Fragments veer this far either side of the parent's heading (radians)
const FRAGMENT_SPREAD_ANGLE: f32 = 0.65;

/// Inclusive speed range for new asteroids (pixels/s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedBand {
    pub min: f32,
    pub max: f32,
}

impl SpeedBand {
    pub fn contains(&self, speed: f32) -> bool {
        speed >= self.min && speed <= self.max
    }
}

/// Speed band for a level; both ends rise linearly so later levels are faster
pub fn speed_band_for_level(level: u32) -> SpeedBand {
    let level = level as f32;
    SpeedBand {
        min: ASTEROID_SPEED_MIN + 5.0 * level,
        max: ASTEROID_SPEED_MAX + 8.0 * level,
    }
}

/// Large asteroids in a freshly spawned level
pub fn asteroid_count_for_level(level: u32) -> usize {
    (3 + level as usize).min(MAX_LEVEL_ASTEROIDS)
}

/// Create an asteroid with a random speed in `[speed_min, speed_max]`
///
/// When `angle` is `None` the heading is random too. Rotation, spin and the
/// shape seed are always random; the radius comes from the size class.
pub fn create_asteroid(
    id: u32,
    size: AsteroidSize,
    pos: Vec2,
    speed_min: f32,
    speed_max: f32,
    angle: Option<f32>,
    rng: &mut dyn RandomSource,
) -> Asteroid {
    let speed = rng.between(speed_min, speed_max);
    let heading = angle.unwrap_or_else(|| rng.angle());
    let rotation = rng.angle();
    let spin = rng.between(-MAX_SPIN, MAX_SPIN);
    let shape_seed = ((rng.next_f32() * SHAPE_SEED_RANGE) as u32).min(SHAPE_SEED_RANGE as u32 - 1);

    Asteroid {
        id,
        size,
        pos,
        vel: Vec2::from_angle(heading) * speed,
        radius: size.radius(),
        rotation,
        spin,
        shape_seed,
    }
}

fn random_point(width: f32, height: f32, rng: &mut dyn RandomSource) -> Vec2 {
    let x = rng.between(0.0, width);
    let y = rng.between(0.0, height);
    // A draw just below 1.0 can round up to the extent
    wrap_position(Vec2::new(x, y), width, height)
}

/// Spawn a level's worth of large asteroids away from `safe`
///
/// Each asteroid re-samples its position while it lands inside
/// `RESPAWN_SAFE_RADIUS` of `safe`, up to a fixed number of attempts, then
/// takes the farthest candidate seen. Returns the asteroids and the updated
/// ID counter.
pub fn spawn_level_asteroids(
    level: u32,
    mut next_id: u32,
    width: f32,
    height: f32,
    safe: Vec2,
    rng: &mut dyn RandomSource,
) -> (Vec<Asteroid>, u32) {
    let count = asteroid_count_for_level(level);
    let band = speed_band_for_level(level);
    let safe_sq = RESPAWN_SAFE_RADIUS * RESPAWN_SAFE_RADIUS;
    let mut asteroids = Vec::with_capacity(count);

    while asteroids.len() < count {
        let mut candidate = random_point(width, height, rng);
        let mut best = candidate;
        let mut best_dist_sq = torus_distance_squared(candidate, safe, width, height);
        let mut attempts = 0;

        while best_dist_sq < safe_sq && attempts < LEVEL_SPAWN_ATTEMPTS {
            candidate = random_point(width, height, rng);
            let dist_sq = torus_distance_squared(candidate, safe, width, height);
            if dist_sq > best_dist_sq {
                best = candidate;
                best_dist_sq = dist_sq;
            }
            attempts += 1;
        }

        asteroids.push(create_asteroid(
            next_id,
            AsteroidSize::Large,
            best,
            band.min,
            band.max,
            None,
            rng,
        ));
        next_id += 1;
    }

    (asteroids, next_id)
}

/// Break an asteroid into two fragments of the next size down
///
/// Fragments start at the parent's position, faster than the parent, and
/// veer to either side of its heading. Small asteroids leave nothing.
pub fn split_asteroid(
    asteroid: &Asteroid,
    mut next_id: u32,
    rng: &mut dyn RandomSource,
) -> (Vec<Asteroid>, u32) {
    let Some(size) = asteroid.size.fragment_size() else {
        return (Vec::new(), next_id);
    };

    let base_speed = (asteroid.vel.length() * FRAGMENT_SPEEDUP)
        .max(ASTEROID_SPEED_MIN * FRAGMENT_MIN_SPEED_FACTOR);
    let heading = asteroid.vel.y.atan2(asteroid.vel.x);

    let mut fragments = Vec::with_capacity(2);
    for sign in [-1.0, 1.0] {
        fragments.push(create_asteroid(
            next_id,
            size,
            asteroid.pos,
            base_speed,
            base_speed + FRAGMENT_SPEED_SPREAD,
            Some(heading + sign * FRAGMENT_SPREAD_ANGLE),
            rng,
        ));
        next_id += 1;
    }

    (fragments, next_id)
}

fn is_clear_of_asteroids(pos: Vec2, asteroids: &[Asteroid], width: f32, height: f32) -> bool {
    asteroids.iter().all(|asteroid| {
        let clearance = asteroid.radius + SHIP_RADIUS + SHIP_SPAWN_CLEARANCE;
        torus_distance_squared(pos, asteroid.pos, width, height) > clearance * clearance
    })
}

/// Pick a respawn point for the ship; never fails
///
/// Prefers the world center, then the first clear random candidate, and
/// falls back to the center when nothing is clear.
pub fn find_safe_ship_spawn(
    asteroids: &[Asteroid],
    width: f32,
    height: f32,
    rng: &mut dyn RandomSource,
) -> Vec2 {
    let center = Vec2::new(width * 0.5, height * 0.5);
    if is_clear_of_asteroids(center, asteroids, width, height) {
        return center;
    }

    for _ in 0..SHIP_SPAWN_ATTEMPTS {
        let candidate = random_point(width, height, rng);
        if is_clear_of_asteroids(candidate, asteroids, width, height) {
            return candidate;
        }
    }

    log::debug!("No clear respawn point found, using world center");
    center
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::{ScriptedRandom, seeded};
    use crate::sim::torus::wrapped_axis_distance;
    use proptest::prelude::*;

    fn still_asteroid(size: AsteroidSize, pos: Vec2, vel: Vec2) -> Asteroid {
        Asteroid {
            id: 1,
            size,
            pos,
            vel,
            radius: size.radius(),
            rotation: 0.0,
            spin: 0.0,
            shape_seed: 0,
        }
    }

    #[test]
    fn test_speed_band_and_count() {
        assert_eq!(speed_band_for_level(1), SpeedBand { min: 33.0, max: 90.0 });
        assert_eq!(asteroid_count_for_level(1), 4);
        assert_eq!(asteroid_count_for_level(11), 14);
        assert_eq!(asteroid_count_for_level(50), 14);
    }

    #[test]
    fn test_create_asteroid_uses_size_table_and_band() {
        let mut rng = ScriptedRandom::new(vec![0.5, 0.0, 0.25, 0.75, 0.123_45]);
        let asteroid = create_asteroid(
            7,
            AsteroidSize::Medium,
            Vec2::new(10.0, 20.0),
            40.0,
            60.0,
            Some(0.0),
            &mut rng,
        );
        assert_eq!(asteroid.radius, 28.0);
        assert!((asteroid.vel.x - 50.0).abs() < 1e-4);
        assert!(asteroid.vel.y.abs() < 1e-4);
        assert!(asteroid.spin >= -1.2 && asteroid.spin <= 1.2);
        assert!(asteroid.shape_seed < 100_000);
        // speed, rotation, spin, seed: heading was supplied
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn test_level_spawn_avoids_safe_point() {
        let mut rng = seeded(7);
        let safe = Vec2::new(512.0, 384.0);
        let (asteroids, _) = spawn_level_asteroids(3, 1, WORLD_WIDTH, WORLD_HEIGHT, safe, &mut rng);
        for a in &asteroids {
            let d2 = torus_distance_squared(a.pos, safe, WORLD_WIDTH, WORLD_HEIGHT);
            assert!(d2 >= RESPAWN_SAFE_RADIUS * RESPAWN_SAFE_RADIUS);
        }
    }

    #[test]
    fn test_level_spawn_terminates_when_every_sample_is_unsafe() {
        // Every sample lands on the safe point itself
        let mut rng = ScriptedRandom::constant(0.5);
        let safe = Vec2::new(512.0, 384.0);
        let (asteroids, next_id) =
            spawn_level_asteroids(2, 10, WORLD_WIDTH, WORLD_HEIGHT, safe, &mut rng);
        assert_eq!(asteroids.len(), 5);
        assert_eq!(next_id, 15);
        assert!(asteroids.iter().all(|a| a.pos == safe));
    }

    #[test]
    fn test_split_large_into_two_faster_medium() {
        let mut rng = seeded(3);
        let parent = still_asteroid(AsteroidSize::Large, Vec2::new(140.0, 140.0), Vec2::new(60.0, 0.0));
        let (fragments, next_id) = split_asteroid(&parent, 50, &mut rng);
        assert_eq!(fragments.len(), 2);
        assert_eq!(next_id, 52);
        for f in &fragments {
            assert_eq!(f.size, AsteroidSize::Medium);
            assert_eq!(f.pos, parent.pos);
            assert!(f.vel.length() > parent.vel.length());
        }
        // Headings straddle the parent's
        let a0 = fragments[0].vel.y.atan2(fragments[0].vel.x);
        let a1 = fragments[1].vel.y.atan2(fragments[1].vel.x);
        assert!((a0 + 0.65).abs() < 1e-4);
        assert!((a1 - 0.65).abs() < 1e-4);
    }

    #[test]
    fn test_split_stationary_uses_speed_floor() {
        let mut rng = ScriptedRandom::constant(0.0);
        let parent = still_asteroid(AsteroidSize::Medium, Vec2::new(5.0, 5.0), Vec2::ZERO);
        let (fragments, _) = split_asteroid(&parent, 1, &mut rng);
        assert_eq!(fragments.len(), 2);
        for f in &fragments {
            assert_eq!(f.size, AsteroidSize::Small);
            assert!((f.vel.length() - ASTEROID_SPEED_MIN * 1.4).abs() < 1e-3);
        }
    }

    #[test]
    fn test_split_small_yields_nothing() {
        let mut rng = ScriptedRandom::constant(0.5);
        let parent = still_asteroid(AsteroidSize::Small, Vec2::ZERO, Vec2::new(10.0, 10.0));
        let (fragments, next_id) = split_asteroid(&parent, 9, &mut rng);
        assert!(fragments.is_empty());
        assert_eq!(next_id, 9);
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_safe_spawn_prefers_center() {
        let mut rng = ScriptedRandom::constant(0.1);
        let far = still_asteroid(AsteroidSize::Large, Vec2::new(100.0, 100.0), Vec2::ZERO);
        let spawn = find_safe_ship_spawn(&[far], WORLD_WIDTH, WORLD_HEIGHT, &mut rng);
        assert_eq!(spawn, Vec2::new(512.0, 384.0));
        assert_eq!(rng.draws(), 0);
    }

    #[test]
    fn test_safe_spawn_moves_off_blocked_center() {
        let mut rng = ScriptedRandom::constant(0.1);
        let blocker = still_asteroid(AsteroidSize::Large, Vec2::new(512.0, 384.0), Vec2::ZERO);
        let spawn = find_safe_ship_spawn(&[blocker], WORLD_WIDTH, WORLD_HEIGHT, &mut rng);
        assert!((spawn - Vec2::new(102.4, 76.8)).length() < 1e-3);
    }

    #[test]
    fn test_safe_spawn_falls_back_to_center() {
        // Scripted points always land on the blocker
        let mut rng = ScriptedRandom::constant(0.5);
        let blocker = still_asteroid(AsteroidSize::Large, Vec2::new(512.0, 384.0), Vec2::ZERO);
        let spawn = find_safe_ship_spawn(&[blocker], WORLD_WIDTH, WORLD_HEIGHT, &mut rng);
        assert_eq!(spawn, Vec2::new(512.0, 384.0));
        assert_eq!(rng.draws(), 240);
    }

    proptest! {
        #[test]
        fn prop_level_spawn_count_band_and_size(level in 0u32..20, seed in any::<u64>()) {
            let mut rng = seeded(seed);
            let safe = Vec2::new(512.0, 384.0);
            let (asteroids, next_id) =
                spawn_level_asteroids(level, 1, WORLD_WIDTH, WORLD_HEIGHT, safe, &mut rng);
            let band = speed_band_for_level(level);

            prop_assert_eq!(asteroids.len(), asteroid_count_for_level(level));
            prop_assert_eq!(next_id as usize, 1 + asteroids.len());
            for a in &asteroids {
                let speed = a.vel.length();
                prop_assert_eq!(a.size, AsteroidSize::Large);
                prop_assert!(speed >= band.min - 1e-3 && speed <= band.max + 1e-3);
                prop_assert!(a.pos.x >= 0.0 && a.pos.x < WORLD_WIDTH);
                prop_assert!(a.pos.y >= 0.0 && a.pos.y < WORLD_HEIGHT);
            }
        }

        #[test]
        fn prop_split_fragments_are_smaller_and_faster(
            seed in any::<u64>(),
            vx in -200.0f32..200.0,
            vy in -200.0f32..200.0,
            medium in any::<bool>(),
        ) {
            let size = if medium { AsteroidSize::Medium } else { AsteroidSize::Large };
            let parent = still_asteroid(size, Vec2::new(300.0, 200.0), Vec2::new(vx, vy));
            let mut rng = seeded(seed);
            let (fragments, _) = split_asteroid(&parent, 1, &mut rng);

            prop_assert_eq!(fragments.len(), 2);
            for f in &fragments {
                prop_assert!(f.size < parent.size);
                prop_assert!(f.vel.length() > parent.vel.length());
                prop_assert!(wrapped_axis_distance(f.pos.x, parent.pos.x, WORLD_WIDTH) == 0.0);
            }
        }
    }
}
