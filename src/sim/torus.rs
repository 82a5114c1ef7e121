//! Wraparound geometry on a rectangular torus
//!
//! Each axis is topologically a circle: leaving one edge re-enters the
//! opposite edge, and the distance between two points takes the shorter of
//! the direct or wrapped path per axis.

use glam::Vec2;

/// Wrap a scalar into `[0, extent)`
#[inline]
pub fn wrap_value(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    // rem_euclid rounds tiny negative inputs up to `extent` itself
    if wrapped >= extent { 0.0 } else { wrapped }
}

/// Wrap a position into `[0, width) × [0, height)`
#[inline]
pub fn wrap_position(pos: Vec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(wrap_value(pos.x, width), wrap_value(pos.y, height))
}

/// Shortest separation between two coordinates on one wrapped axis
#[inline]
pub fn wrapped_axis_distance(a: f32, b: f32, extent: f32) -> f32 {
    let raw = (a - b).abs();
    raw.min(extent - raw)
}

/// Squared torus distance between two points (no square root needed for proximity tests)
#[inline]
pub fn torus_distance_squared(a: Vec2, b: Vec2, width: f32, height: f32) -> f32 {
    let dx = wrapped_axis_distance(a.x, b.x, width);
    let dy = wrapped_axis_distance(a.y, b.y, height);
    dx * dx + dy * dy
}

/// True if two circles touch or overlap, measured across the wrap
#[inline]
pub fn circles_overlap(
    a: Vec2,
    a_radius: f32,
    b: Vec2,
    b_radius: f32,
    width: f32,
    height: f32,
) -> bool {
    let min_distance = a_radius + b_radius;
    torus_distance_squared(a, b, width, height) <= min_distance * min_distance
}
