//! Read-only state export for inspection and test tooling
//!
//! Never fed back into the simulation.

use serde::Serialize;

use super::state::{AsteroidSize, GameMode, GameState};

#[derive(Debug, Clone, Serialize)]
pub struct CoordinateSystem {
    pub origin: &'static str,
    pub x_axis: &'static str,
    pub y_axis: &'static str,
}

impl Default for CoordinateSystem {
    fn default() -> Self {
        Self {
            origin: "top-left",
            x_axis: "positive-right",
            y_axis: "positive-down",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WorldExtent {
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub angle: f32,
    pub invulnerable_ms: f32,
    pub alive: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct AsteroidSnapshot {
    pub id: u32,
    pub size: AsteroidSize,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub radius: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct BulletSnapshot {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    pub ttl_ms: f32,
}

/// Flat view of everything an outside observer may want to check
#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub mode: GameMode,
    pub coordinate_system: CoordinateSystem,
    pub world: WorldExtent,
    pub player: PlayerSnapshot,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub bullets: Vec<BulletSnapshot>,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub level: u32,
}

impl StateSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let ship = &state.ship;
        Self {
            mode: state.mode,
            coordinate_system: CoordinateSystem::default(),
            world: WorldExtent {
                width: state.world_width,
                height: state.world_height,
            },
            player: PlayerSnapshot {
                x: ship.pos.x,
                y: ship.pos.y,
                vx: ship.vel.x,
                vy: ship.vel.y,
                angle: ship.angle,
                invulnerable_ms: ship.invulnerable_ms,
                alive: ship.alive,
            },
            asteroids: state
                .asteroids
                .iter()
                .map(|a| AsteroidSnapshot {
                    id: a.id,
                    size: a.size,
                    x: a.pos.x,
                    y: a.pos.y,
                    vx: a.vel.x,
                    vy: a.vel.y,
                    radius: a.radius,
                })
                .collect(),
            bullets: state
                .bullets
                .iter()
                .map(|b| BulletSnapshot {
                    id: b.id,
                    x: b.pos.x,
                    y: b.pos.y,
                    vx: b.vel.x,
                    vy: b.vel.y,
                    ttl_ms: b.ttl_ms,
                })
                .collect(),
            score: state.score,
            high_score: state.high_score,
            lives: state.lives,
            level: state.level,
        }
    }

    /// JSON text, the form external tooling reads
    pub fn to_json(&self) -> String {
        // Plain data with string keys; serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::random::seeded;

    #[test]
    fn test_snapshot_json_shape() {
        let mut rng = seeded(5);
        let state = GameState::new(77, &mut rng);
        let json = StateSnapshot::capture(&state).to_json();
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

        assert_eq!(value["mode"], "attract");
        assert_eq!(value["high_score"], 77);
        assert_eq!(value["world"]["width"], 1024.0);
        assert_eq!(value["coordinate_system"]["origin"], "top-left");
        assert_eq!(value["asteroids"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["asteroids"][0]["size"], "large");
        assert_eq!(value["bullets"].as_array().map(Vec::len), Some(0));
        assert_eq!(value["player"]["alive"], true);
    }
}
