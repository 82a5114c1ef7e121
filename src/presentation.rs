//! Renderer-facing data derived from simulation state
//!
//! Nothing here feeds back into gameplay. Decorative variation comes from an
//! explicitly seeded generator so the same asteroid always draws the same.

use glam::Vec2;
use serde::Serialize;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::random::{RandomSource, seeded};
use crate::sim::{Asteroid, GameMode};

/// Vertices per asteroid outline
pub const OUTLINE_VERTICES: usize = 11;
/// Mixed into the shape seed so outlines don't correlate with other seeded streams
const OUTLINE_SALT: u64 = 11_791;
const STARFIELD_SEED: u64 = 246_041_985;

/// Radial scale per outline vertex, each in `[0.74, 1.08)`
pub fn outline_profile(shape_seed: u32) -> [f32; OUTLINE_VERTICES] {
    let mut rng = seeded(shape_seed as u64 + OUTLINE_SALT);
    let mut profile = [0.0; OUTLINE_VERTICES];
    for scale in &mut profile {
        *scale = rng.between(0.74, 1.08);
    }
    profile
}

/// World-space outline of an asteroid, rotated by its cosmetic rotation
pub fn asteroid_outline(asteroid: &Asteroid) -> Vec<Vec2> {
    let step = std::f32::consts::TAU / OUTLINE_VERTICES as f32;
    outline_profile(asteroid.shape_seed)
        .iter()
        .enumerate()
        .map(|(i, scale)| {
            let theta = asteroid.rotation + i as f32 * step;
            asteroid.pos + Vec2::from_angle(theta) * asteroid.radius * scale
        })
        .collect()
}

/// A background star
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Star {
    pub pos: Vec2,
    /// 0.3 - 1.0
    pub brightness: f32,
}

/// The fixed backdrop; identical on every call
pub fn starfield(count: usize) -> Vec<Star> {
    let mut rng = seeded(STARFIELD_SEED);
    (0..count)
        .map(|_| {
            let x = rng.between(0.0, WORLD_WIDTH);
            let y = rng.between(0.0, WORLD_HEIGHT);
            Star {
                pos: Vec2::new(x, y),
                brightness: rng.between(0.3, 1.0),
            }
        })
        .collect()
}

/// A line of overlay text and its font size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OverlayLine {
    pub text: &'static str,
    pub size: u32,
}

const ATTRACT_OVERLAY: &[OverlayLine] = &[
    OverlayLine { text: "TORUS ASTEROIDS", size: 44 },
    OverlayLine { text: "Press Any Key To Start", size: 24 },
    OverlayLine {
        text: "Arrow Left/Right Rotate  |  Arrow Up Thrust  |  Space Fire",
        size: 15,
    },
    OverlayLine { text: "P Pause  |  R Restart  |  F Fullscreen", size: 15 },
];

const PAUSED_OVERLAY: &[OverlayLine] = &[
    OverlayLine { text: "PAUSED", size: 40 },
    OverlayLine { text: "Press P To Resume", size: 19 },
];

const GAME_OVER_OVERLAY: &[OverlayLine] = &[
    OverlayLine { text: "GAME OVER", size: 44 },
    OverlayLine { text: "Press R Or Any Key To Restart", size: 21 },
];

/// Text drawn over the field for a mode (None while playing)
pub fn overlay_lines(mode: GameMode) -> Option<&'static [OverlayLine]> {
    match mode {
        GameMode::Attract => Some(ATTRACT_OVERLAY),
        GameMode::Paused => Some(PAUSED_OVERLAY),
        GameMode::GameOver => Some(GAME_OVER_OVERLAY),
        GameMode::Playing => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::AsteroidSize;

    #[test]
    fn test_outline_is_reproducible_and_bounded() {
        let a = outline_profile(4242);
        let b = outline_profile(4242);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| (0.74..1.08).contains(s)));
        assert_ne!(outline_profile(4242), outline_profile(4243));
    }

    #[test]
    fn test_outline_surrounds_asteroid() {
        let asteroid = Asteroid {
            id: 1,
            size: AsteroidSize::Medium,
            pos: Vec2::new(200.0, 150.0),
            vel: Vec2::ZERO,
            radius: AsteroidSize::Medium.radius(),
            rotation: 0.3,
            spin: 0.0,
            shape_seed: 99,
        };
        let points = asteroid_outline(&asteroid);
        assert_eq!(points.len(), OUTLINE_VERTICES);
        for p in points {
            let d = p.distance(asteroid.pos);
            assert!(d >= asteroid.radius * 0.74 - 1e-3);
            assert!(d <= asteroid.radius * 1.08 + 1e-3);
        }
    }

    #[test]
    fn test_starfield_is_stable() {
        let stars = starfield(32);
        assert_eq!(stars, starfield(32));
        assert!(stars.iter().all(|s| s.brightness >= 0.3 && s.brightness <= 1.0));
    }

    #[test]
    fn test_overlay_only_outside_play() {
        assert!(overlay_lines(GameMode::Playing).is_none());
        assert_eq!(overlay_lines(GameMode::Paused).map(|l| l[0].text), Some("PAUSED"));
        assert_eq!(overlay_lines(GameMode::GameOver).map(|l| l.len()), Some(2));
    }
}
