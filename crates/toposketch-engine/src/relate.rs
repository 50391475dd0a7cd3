//! Relational analysis: points vs. regions and region vs. region.
//!
//! Consumes finished per-region results (final mask, boundary mask,
//! diameter) plus the point markers and produces structured facts:
//! interior/boundary/exterior membership per point, disc-neighborhood
//! relations for markers with a radius, and pairwise set relations
//! (intersection and difference emptiness, containment, equality).
//!
//! The boundary-proximity rule in [`classify_point`] is a display
//! heuristic of the drawing surface, not a topological definition: a point within `boundary_proximity` cells (Chebyshev) of
//! any boundary cell reads as "on the boundary" even when its own cell
//! tests as background.

use serde::{Deserialize, Serialize};

use crate::mask::Mask;
use crate::types::{AnalysisConfig, PointMarker, RegionAnalysis, RegionId};

/// Where a point sits relative to one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointClass {
    /// Foreground in the final mask and not a boundary cell.
    Interior,
    /// On the boundary mask, or within the proximity window of it.
    Boundary,
    /// Neither of the above.
    Exterior,
}

/// One point's classification against one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointRegionClassification {
    /// The region being tested against.
    pub region: RegionId,
    /// The classification outcome.
    pub class: PointClass,
}

impl PointRegionClassification {
    /// Whether the point belongs to the region's closure (interior or
    /// boundary).
    #[must_use]
    pub fn in_closure(&self) -> bool {
        matches!(self.class, PointClass::Interior | PointClass::Boundary)
    }
}

/// How a marker's disc neighborhood relates to one region's final mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborhoodRelation {
    /// Every sampled disc cell is inside the region.
    ContainedIn,
    /// Some sampled cells are inside and some are outside.
    Meets,
    /// No sampled cell is inside the region.
    Disjoint,
}

/// A neighborhood statement for one point against one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeighborhoodStatement {
    /// The region being tested against.
    pub region: RegionId,
    /// The derived relation.
    pub relation: NeighborhoodRelation,
}

/// All facts derived for one point marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointReport {
    /// The marker as placed (coordinates and radius).
    pub marker: PointMarker,
    /// One classification per analyzed region, in region order.
    pub classifications: Vec<PointRegionClassification>,
    /// Neighborhood statements, present only when `marker.radius > 0`
    /// and the disc sampled at least one grid cell.
    pub neighborhoods: Vec<NeighborhoodStatement>,
}

/// Containment fact for a region pair, at most one per pair.
///
/// Equality is reported once, from the first region's side. A region
/// with zero diameter never participates in containment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Containment {
    /// The two final masks are identical (and the first has extent).
    Equal,
    /// `first \ second` is empty, `second \ first` is not.
    FirstInSecond,
    /// `second \ first` is empty, `first \ second` is not.
    SecondInFirst,
}

/// Set relations between two regions' final masks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairRelation {
    /// First region of the unordered pair (smaller identifier).
    pub first: RegionId,
    /// Second region of the unordered pair.
    pub second: RegionId,
    /// Whether `first` and `second` share any foreground cell.
    pub intersection_nonempty: bool,
    /// Whether `first \ second` has any foreground cell.
    pub first_minus_second_nonempty: bool,
    /// Whether `second \ first` has any foreground cell.
    pub second_minus_first_nonempty: bool,
    /// Containment or equality fact, when one holds.
    pub containment: Option<Containment>,
}

/// Classify a point against one region.
#[must_use]
pub fn classify_point(
    marker: &PointMarker,
    analysis: &RegionAnalysis,
    config: &AnalysisConfig,
) -> PointClass {
    let (cx, cy) = cell_of(marker.x, marker.y, config.width, config.height);
    let in_set = analysis.mask.contains(cx, cy);
    let on_boundary = analysis.boundary.contains(cx, cy);

    if in_set {
        if on_boundary {
            PointClass::Boundary
        } else {
            PointClass::Interior
        }
    } else if on_boundary
        || near_boundary(
            marker.x,
            marker.y,
            &analysis.boundary,
            config.boundary_proximity,
        )
    {
        PointClass::Boundary
    } else {
        PointClass::Exterior
    }
}

/// Whether any boundary cell lies within a `±distance` square window of
/// the point's cell.
///
/// Chebyshev distance (a square window scan). Tunable via
/// [`AnalysisConfig::boundary_proximity`].
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn near_boundary(px: f64, py: f64, boundary: &Mask, distance: u32) -> bool {
    let cx = px.floor() as i64;
    let cy = py.floor() as i64;
    let d = i64::from(distance);
    let width = i64::from(boundary.width());
    let height = i64::from(boundary.height());

    for dy in -d..=d {
        for dx in -d..=d {
            let nx = cx + dx;
            let ny = cy + dy;
            if nx >= 0 && nx < width && ny >= 0 && ny < height && boundary.contains(nx as u32, ny as u32)
            {
                return true;
            }
        }
    }
    false
}

/// Relate a marker's disc neighborhood to one region's final mask.
///
/// Samples every grid cell within Euclidean distance `radius` of the
/// marker. Returns `None` for a degenerate radius (<= 0) or when the
/// disc samples no cells at all.
#[must_use]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub fn neighborhood_relation(marker: &PointMarker, mask: &Mask) -> Option<NeighborhoodRelation> {
    if marker.radius <= 0.0 {
        return None;
    }

    let r = marker.radius;
    let min_x = (marker.x - r).floor().max(0.0) as u32;
    let max_x = ((marker.x + r).ceil().min(f64::from(mask.width() - 1))).max(0.0) as u32;
    let min_y = (marker.y - r).floor().max(0.0) as u32;
    let max_y = ((marker.y + r).ceil().min(f64::from(mask.height() - 1))).max(0.0) as u32;

    let mut inside: u64 = 0;
    let mut outside: u64 = 0;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let dx = f64::from(x) - marker.x;
            let dy = f64::from(y) - marker.y;
            if dx.hypot(dy) <= r {
                if mask.contains(x, y) {
                    inside += 1;
                } else {
                    outside += 1;
                }
            }
        }
    }

    if inside == 0 && outside == 0 {
        return None;
    }
    Some(if inside > 0 && outside == 0 {
        NeighborhoodRelation::ContainedIn
    } else if inside > 0 {
        NeighborhoodRelation::Meets
    } else {
        NeighborhoodRelation::Disjoint
    })
}

/// Compute the pairwise relation between two regions' final masks in a
/// single scan.
#[must_use]
pub fn relate_pair(
    first_id: &RegionId,
    first: &RegionAnalysis,
    second_id: &RegionId,
    second: &RegionAnalysis,
) -> PairRelation {
    debug_assert_eq!(first.mask.width(), second.mask.width());
    debug_assert_eq!(first.mask.height(), second.mask.height());

    let mut intersection: u64 = 0;
    let mut only_first: u64 = 0;
    let mut only_second: u64 = 0;

    for (&a, &b) in first.mask.as_raw().iter().zip(second.mask.as_raw()) {
        let a = a == 255;
        let b = b == 255;
        intersection += u64::from(a && b);
        only_first += u64::from(a && !b);
        only_second += u64::from(b && !a);
    }

    let first_in_second = only_first == 0;
    let second_in_first = only_second == 0;

    // A zero-diameter (degenerate) region never participates in
    // containment; equality is reported from the first side only.
    let containment = if first.diameter > 0.0 && first_in_second {
        if only_second > 0 {
            Some(Containment::FirstInSecond)
        } else {
            Some(Containment::Equal)
        }
    } else if second.diameter > 0.0 && second_in_first && only_first > 0 {
        Some(Containment::SecondInFirst)
    } else {
        None
    };

    PairRelation {
        first: first_id.clone(),
        second: second_id.clone(),
        intersection_nonempty: intersection > 0,
        first_minus_second_nonempty: only_first > 0,
        second_minus_first_nonempty: only_second > 0,
        containment,
    }
}

/// Clamp a point to its containing grid cell.
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
fn cell_of(x: f64, y: f64, width: u32, height: u32) -> (u32, u32) {
    let cx = x.floor().clamp(0.0, f64::from(width - 1)) as u32;
    let cy = y.floor().clamp(0.0, f64::from(height - 1)) as u32;
    (cx, cy)
}
