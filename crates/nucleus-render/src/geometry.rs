//! Radial placement on the orbital canvas.
//!
//! Angles are in degrees, measured clockwise from the positive x axis in SVG coordinates (y grows
//! downwards), so −90° is the top of the circle.
//!
//! `total` / `child_count` must be non-zero: empty sets are short-circuited by the caller before
//! any angle is computed.

use crate::model::LayoutPoint;

/// Angular distance between neighbouring company nodes.
pub const CHILD_SPACING_DEG: f64 = 15.0;

/// Angle of the `index`-th of `total` evenly spaced nodes, starting at the top and proceeding
/// clockwise.
pub fn angle_for_index(index: usize, total: usize) -> f64 {
    debug_assert!(total > 0, "angle_for_index called with total == 0");
    (index as f64) * 360.0 / (total as f64) - 90.0
}

/// Angle of the `child_index`-th of `child_count` children fanned symmetrically around
/// `parent_angle`, [`CHILD_SPACING_DEG`] apart.
pub fn angle_for_child(child_index: usize, child_count: usize, parent_angle: f64) -> f64 {
    angle_for_child_with_spacing(child_index, child_count, parent_angle, CHILD_SPACING_DEG)
}

pub fn angle_for_child_with_spacing(
    child_index: usize,
    child_count: usize,
    parent_angle: f64,
    spacing: f64,
) -> f64 {
    debug_assert!(child_count > 0, "angle_for_child called with child_count == 0");
    let start = parent_angle - spacing * ((child_count as f64) - 1.0) / 2.0;
    start + (child_index as f64) * spacing
}

pub fn polar_to_cartesian(angle_deg: f64, radius: f64, center: LayoutPoint) -> LayoutPoint {
    let rad = angle_deg.to_radians();
    LayoutPoint {
        x: center.x + radius * rad.cos(),
        y: center.y + radius * rad.sin(),
    }
}

/// Inverse of [`polar_to_cartesian`]: `(angle in [0, 360), radius)`.
pub fn cartesian_to_polar(point: LayoutPoint, center: LayoutPoint) -> (f64, f64) {
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    let radius = dx.hypot(dy);
    if radius == 0.0 {
        return (0.0, 0.0);
    }
    (normalize_degrees(dy.atan2(dx).to_degrees()), radius)
}

pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // `rem_euclid` can round up to exactly 360 for tiny negative inputs.
    if a >= 360.0 { 0.0 } else { a }
}

/// Labels on the right half of the circle grow rightwards. Uses the raw (unnormalized) angle:
/// strictly between −90° and 90°.
pub fn is_right_half(angle_deg: f64) -> bool {
    angle_deg > -90.0 && angle_deg < 90.0
}
