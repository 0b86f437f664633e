//! Closed-form placement primitives: polar vectors, projections, and
//! line/circle intersections.
//!
//! None of these fail. Infeasible inputs (a circle that does not reach the
//! line, a degenerate line through two equal points) come back as NaN points.

use crate::types::Point;

/// Relative slack (against `r²`) below which a negative radicand counts as tangent
pub const TANGENT_TOLERANCE: f64 = 1e-9;

/// `(length·cos(angle), length·sin(angle))`
pub fn vector_from_polar(length: f64, angle: f64) -> Point {
    Point::new(length * angle.cos(), length * angle.sin())
}

/// Foot of the perpendicular from `p` onto the infinite line through `l1`, `l2`.
///
/// NaN when `l1 == l2`.
pub fn project_onto_line(l1: Point, l2: Point, p: Point) -> Point {
    let unit12 = (l2 - l1).unit();
    let k = unit12.dot(p - l1);
    l1 + unit12.scale(k)
}

/// Both points where the circle (`center`, `radius`) meets the infinite line
/// through `l1`, `l2`.
///
/// Returns `[k + n, k - n]` where `k` is the foot of the perpendicular from
/// `center` and `n` runs along `l2 - l1` for half the chord. The order is
/// stable, so callers pick a root by index. When the circle does not reach
/// the line the half chord is `sqrt` of a negative number and both points
/// are NaN. A radicand within [`TANGENT_TOLERANCE`]`·r²` below zero is a
/// tangent lost to rounding and yields two coincident points.
pub fn circle_line_intersections(
    l1: Point,
    l2: Point,
    center: Point,
    radius: f64,
) -> [Point; 2] {
    let k = project_onto_line(l1, l2, center);
    let d = (k - center).length();
    let r2 = radius * radius;
    let mut radicand = r2 - d * d;
    if radicand < 0.0 && radicand > -TANGENT_TOLERANCE * r2 {
        radicand = 0.0;
    }
    let n_len = radicand.sqrt();
    let n = (l2 - l1).unit().scale(n_len);
    [k + n, k - n]
}

/// Signed perpendicular distance from `p` to the line through `l1`, `l2`.
///
/// The magnitude is the length of `foot - p`; the sign is the three-way sign
/// of `cross(foot - p, l1 - p)`. When that cross product is zero (the foot is
/// `l1` itself, or `p` is on the line) the result is `0.0`.
pub fn signed_offset(p: Point, l1: Point, l2: Point) -> f64 {
    let offset = project_onto_line(l1, l2, p) - p;
    let side = offset.cross(l1 - p);
    if side == 0.0 {
        return 0.0;
    }
    offset.length() * side.signum()
}
