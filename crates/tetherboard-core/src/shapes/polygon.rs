//! Regular polygon geometry.

use kurbo::Vec2;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Vertex offsets of a regular polygon of circumradius `radius`, relative to its center.
///
/// The first vertex points straight up; the rest follow clockwise in screen space.
pub fn regular_polygon_offsets(sides: u8, radius: f64) -> Vec<Vec2> {
    (0..sides)
        .map(|i| {
            let angle = f64::from(i) * TAU / f64::from(sides) - FRAC_PI_2;
            Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}
