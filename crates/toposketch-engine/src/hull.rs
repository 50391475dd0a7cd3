//! Convex hull and geometric diameter of a mask.
//!
//! Foreground cell coordinates are sorted lexicographically (x, then y)
//! and the hull is built with the monotone-chain method. A cross product
//! of zero is treated as "not a left turn", so collinear points are
//! pruned and never bloat the hull. The diameter (maximum pairwise
//! distance over hull vertices) is then found with rotating calipers:
//! `O(h)` after the `O(n log n)` hull construction.

use crate::mask::Mask;

/// Geometric diameter of a mask's foreground, in cells.
///
/// Rounded to two decimal places. A mask with fewer than 2 foreground
/// cells has diameter 0.
#[must_use]
pub fn diameter(mask: &Mask) -> f64 {
    let mut points = mask.foreground_points();
    if points.len() < 2 {
        return 0.0;
    }

    let hull = convex_hull(&mut points);
    let max_sq = match hull.len() {
        0 | 1 => return 0.0,
        2 => dist_sq(hull[0], hull[1]),
        _ => calipers_max_distance_sq(&hull),
    };

    round2(to_f64(max_sq).sqrt())
}

/// Monotone-chain convex hull in counterclockwise order (grid
/// coordinates, y down). Collinear points are dropped.
///
/// Sorts `points` in place; duplicates are tolerated.
#[must_use]
pub fn convex_hull(points: &mut Vec<(i64, i64)>) -> Vec<(i64, i64)> {
    points.sort_unstable();
    if points.len() < 3 {
        return points.clone();
    }

    let mut hull: Vec<(i64, i64)> = Vec::with_capacity(points.len() + 1);

    // Lower hull.
    for &p in points.iter() {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    // Upper hull.
    let lower_len = hull.len() + 1;
    for &p in points.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0 {
            hull.pop();
        }
        hull.push(p);
    }

    // The last point is the first point repeated.
    hull.pop();
    hull
}

/// Cross product of `(a - o) x (b - o)`.
///
/// Positive for a left turn, zero for collinear, negative for a right
/// turn. Grid coordinates fit comfortably in `i64`.
const fn cross(o: (i64, i64), a: (i64, i64), b: (i64, i64)) -> i64 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

const fn dist_sq(a: (i64, i64), b: (i64, i64)) -> i64 {
    let dx = a.0 - b.0;
    let dy = a.1 - b.1;
    dx * dx + dy * dy
}

/// Rotating calipers: walk an antipodal point around the hull once.
fn calipers_max_distance_sq(hull: &[(i64, i64)]) -> i64 {
    let n = hull.len();
    let mut max_sq = 0;
    let mut j = 1;

    for i in 0..n {
        let next = (i + 1) % n;
        loop {
            let next_j = (j + 1) % n;
            // Advance j while it moves farther from edge (i, next).
            let advance = cross(hull[i], hull[next], hull[next_j]).abs()
                > cross(hull[i], hull[next], hull[j]).abs();
            if advance {
                j = next_j;
            } else {
                break;
            }
        }
        max_sq = max_sq.max(dist_sq(hull[i], hull[j]));
    }
    max_sq
}

#[allow(clippy::cast_precision_loss)]
const fn to_f64(v: i64) -> f64 {
    v as f64
}

/// Round to two decimal places (the reporting precision).
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
