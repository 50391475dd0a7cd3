//! Stroke rasterization: vector strokes to binary masks.
//!
//! Rasterization is explicit and owned rather than delegated to a
//! platform canvas: closed strokes are filled by a polygon scanline
//! pass with a selectable [`FillRule`], and open strokes are rendered
//! as a fixed-width path by stamping a circular brush along each
//! Bresenham-traversed segment (round caps and joins).
//!
//! Scanline sampling happens at cell centers (`x + 0.5`, `y + 0.5`):
//! a cell is foreground iff its center is inside the polygon under the
//! active fill rule. Geometry outside the grid is clipped by the
//! scanline itself; open-stroke vertices are clamped to the grid before
//! traversal.

use image::Luma;
use imageproc::drawing::{BresenhamLineIter, draw_filled_circle_mut};
use serde::{Deserialize, Serialize};

use crate::mask::Mask;
use crate::types::{AnalysisConfig, Point, Stroke, StrokeKind};

/// Polygon fill rule for closed strokes.
///
/// [`EvenOdd`](Self::EvenOdd) is the default: a cell is inside when a
/// ray from its center crosses the polygon outline an odd number of
/// times. [`NonZero`](Self::NonZero) uses the winding number instead, so
/// self-overlapping loops stay filled where even-odd would punch holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FillRule {
    /// Parity of outline crossings.
    #[default]
    EvenOdd,
    /// Nonzero winding number.
    NonZero,
}

/// Rasterize a stroke into a `width x height` mask.
///
/// A stroke with fewer than 2 points yields an all-empty mask. Pure
/// function over immutable input; a fresh mask is allocated per call.
#[must_use = "returns the stroke's occupancy mask"]
pub fn rasterize(stroke: &Stroke, config: &AnalysisConfig) -> Mask {
    let mut mask = Mask::new(config.width, config.height);
    if stroke.points.len() < 2 {
        return mask;
    }
    match stroke.kind {
        StrokeKind::Closed => fill_polygon(&mut mask, &stroke.points, config.fill_rule),
        StrokeKind::Open => stroke_polyline(&mut mask, &stroke.points, config.stroke_width),
    }
    mask
}

/// Scanline-fill the polygon traced by `points` (implicitly closed from
/// the last point back to the first).
fn fill_polygon(mask: &mut Mask, points: &[Point], rule: FillRule) {
    let n = points.len();
    let mut crossings: Vec<(f64, i32)> = Vec::new();

    for y in 0..mask.height() {
        let yc = f64::from(y) + 0.5;
        crossings.clear();

        for i in 0..n {
            let a = points[i];
            let b = points[(i + 1) % n];
            // Half-open vertical interval so shared vertices count once.
            if (a.y <= yc && yc < b.y) || (b.y <= yc && yc < a.y) {
                let t = (yc - a.y) / (b.y - a.y);
                let x = t.mul_add(b.x - a.x, a.x);
                let winding = if b.y > a.y { 1 } else { -1 };
                crossings.push((x, winding));
            }
        }

        crossings.sort_by(|(ax, _), (bx, _)| ax.total_cmp(bx));

        match rule {
            FillRule::EvenOdd => {
                for pair in crossings.chunks_exact(2) {
                    fill_span(mask, pair[0].0, pair[1].0, y);
                }
            }
            FillRule::NonZero => {
                let mut winding = 0;
                for pair in crossings.windows(2) {
                    winding += pair[0].1;
                    if winding != 0 {
                        fill_span(mask, pair[0].0, pair[1].0, y);
                    }
                }
            }
        }
    }
}

/// Mark every cell in row `y` whose center lies in `[x1, x2)`.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn fill_span(mask: &mut Mask, x1: f64, x2: f64, y: u32) {
    let start = (x1 - 0.5).ceil().max(0.0);
    let end = ((x2 - 0.5).ceil() - 1.0).min(f64::from(mask.width() - 1));
    if start > end {
        return;
    }
    for x in (start as u32)..=(end as u32) {
        mask.set(x, y);
    }
}

/// Stamp a circular brush of radius `stroke_width / 2` along the
/// polyline. The rendered stroke is `2 * (stroke_width / 2) + 1` cells
/// across.
#[allow(clippy::cast_possible_truncation)]
fn stroke_polyline(mask: &mut Mask, points: &[Point], stroke_width: u32) {
    let radius = (stroke_width / 2) as i32;
    let max_x = f64::from(mask.width() - 1);
    let max_y = f64::from(mask.height() - 1);
    let clamp = |p: Point| (p.x.clamp(0.0, max_x) as f32, p.y.clamp(0.0, max_y) as f32);

    for pair in points.windows(2) {
        let start = clamp(pair[0]);
        let end = clamp(pair[1]);
        for (x, y) in BresenhamLineIter::new(start, end) {
            stamp(mask, x, y, radius);
        }
        // Bresenham traversal may stop short of the endpoint.
        stamp(mask, end.0 as i32, end.1 as i32, radius);
    }
}

/// Stamp the brush centered at `(x, y)`.
#[allow(clippy::cast_sign_loss)]
fn stamp(mask: &mut Mask, x: i32, y: i32, radius: i32) {
    if radius >= 1 {
        draw_filled_circle_mut(mask.as_image_mut(), (x, y), radius, Luma([255]));
    }
    if x >= 0 && y >= 0 {
        mask.set(x as u32, y as u32);
    }
}
