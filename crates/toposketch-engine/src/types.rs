//! Shared types for the toposketch analysis engine.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::mask::Mask;
use crate::raster::FillRule;
use crate::relate::{PairRelation, PointReport};

/// A 2D point in grid coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (cells from the left edge).
    pub x: f64,
    /// Vertical position (cells from the top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// How a stroke closes, which determines both its rasterization and the
/// topological type it contributes to its part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StrokeKind {
    /// An unclosed polyline, rasterized as a fixed-width stroke.
    Open,
    /// A closed loop, rasterized as a filled polygon.
    Closed,
}

/// A freehand stroke: an ordered point sequence and its closure tag.
///
/// Created by the drawing collaborator and immutable once stored. A
/// stroke with fewer than 2 points rasterizes to an empty mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Whether the stroke is an open polyline or a closed loop.
    pub kind: StrokeKind,
    /// The ordered points of the stroke, in grid coordinates.
    pub points: Vec<Point>,
}

impl Stroke {
    /// Create a new stroke.
    #[must_use]
    pub const fn new(kind: StrokeKind, points: Vec<Point>) -> Self {
        Self { kind, points }
    }

    /// Create an open stroke.
    #[must_use]
    pub const fn open(points: Vec<Point>) -> Self {
        Self::new(StrokeKind::Open, points)
    }

    /// Create a closed stroke.
    #[must_use]
    pub const fn closed(points: Vec<Point>) -> Self {
        Self::new(StrokeKind::Closed, points)
    }
}

/// Stable identifier for a region.
///
/// The drawing collaborator assigns these (single letters by default,
/// but any non-empty string works). Ordering is lexicographic, which
/// fixes the iteration order of every analysis run.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Create a region identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RegionId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A named region ("set"): a display name and an ordered stroke list.
///
/// A region with zero strokes produces no analysis result (absent from
/// the report, not empty-masked).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    /// User-visible display name (mutable by the user, defaults to the id).
    pub name: String,
    /// The strokes drawn into this region, in drawing order.
    pub strokes: Vec<Stroke>,
}

impl Region {
    /// Create a region with the given display name and no strokes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            strokes: Vec::new(),
        }
    }
}

/// A point marker placed on the canvas.
///
/// `radius == 0` denotes a bare point; `radius > 0` adds a disc
/// neighborhood used for neighborhood-vs-region statements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointMarker {
    /// Horizontal position in grid coordinates.
    pub x: f64,
    /// Vertical position in grid coordinates.
    pub y: f64,
    /// Neighborhood disc radius in cells (>= 0).
    pub radius: f64,
}

impl PointMarker {
    /// Create a point marker.
    #[must_use]
    pub const fn new(x: f64, y: f64, radius: f64) -> Self {
        Self { x, y, radius }
    }
}

/// Everything the engine consumes for one analysis run: the region table
/// and the point markers.
///
/// Regions are keyed by [`RegionId`] in a `BTreeMap` so iteration (and
/// therefore every derived ordering in the report) is deterministic.
/// There is no process-wide state; the scene value is passed into every
/// call.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    /// Region table, keyed by stable identifier.
    pub regions: BTreeMap<RegionId, Region>,
    /// Ordered point markers.
    pub points: Vec<PointMarker>,
}

/// Topological classification of a part or of a whole region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetType {
    /// Bordered exclusively by open strokes.
    Open,
    /// Bordered exclusively by closed strokes.
    Closed,
    /// Mixed or undetermined border composition.
    Neither,
}

impl fmt::Display for SetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Open => "Open",
            Self::Closed => "Closed",
            Self::Neither => "Neither",
        })
    }
}

/// Configuration for an analysis run.
///
/// All parameters have documented defaults matching the drawing
/// surface: a 1280x720 grid, a 4-cell stroke width, and a 4-cell
/// boundary-proximity window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Grid width in cells.
    pub width: u32,

    /// Grid height in cells.
    pub height: u32,

    /// Nominal width of open strokes, in cells. Must be at least 1.
    ///
    /// The brush radius is `stroke_width / 2`, so the rendered stroke
    /// is `2 * (stroke_width / 2) + 1` cells across (5 cells at the
    /// default of 4).
    pub stroke_width: u32,

    /// Half-size of the square window used by the boundary-proximity
    /// heuristic when classifying point markers, in cells.
    ///
    /// A point within this many cells (Chebyshev distance) of any
    /// boundary cell classifies as `Boundary` even when its own cell
    /// tests as background. This is a display heuristic, not a
    /// topological definition; see
    /// [`relate::near_boundary`](crate::relate::near_boundary).
    pub boundary_proximity: u32,

    /// Which fill rule closed strokes are rasterized with.
    pub fill_rule: FillRule,
}

impl AnalysisConfig {
    /// Create a configuration for a `width` x `height` grid with default
    /// stroke width, proximity window, and fill rule.
    #[must_use]
    pub fn with_grid(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::InvalidConfig`] if the grid has a zero
    /// dimension or the stroke width is zero.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.width == 0 || self.height == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "grid dimensions must be nonzero, got {}x{}",
                self.width, self.height,
            )));
        }
        if self.stroke_width == 0 {
            return Err(AnalysisError::InvalidConfig(
                "stroke width must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            stroke_width: 4,
            boundary_proximity: 4,
            fill_rule: FillRule::default(),
        }
    }
}

/// Result of analyzing a single region.
///
/// Recomputed in full on every run; never incrementally updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionAnalysis {
    /// Connected components of the region's strokes, each listed as
    /// ascending stroke indices. Parts are ordered by their smallest
    /// member index.
    pub parts: Vec<Vec<usize>>,

    /// Topological type of each part, parallel to `parts`.
    pub part_types: Vec<SetType>,

    /// Topological type of the whole region: the parts' shared type if
    /// they all agree, otherwise [`SetType::Neither`].
    pub set_type: SetType,

    /// The final occupancy mask all downstream geometry and relational
    /// logic operate on. For open regions this excludes the boundary
    /// cells; otherwise it equals the union of the part masks.
    pub mask: Mask,

    /// Boundary cells of the union mask (before any open-set exclusion).
    pub boundary: Mask,

    /// Geometric diameter of the final mask in cells, rounded to two
    /// decimal places. Zero when the mask has fewer than 2 foreground
    /// cells.
    pub diameter: f64,
}

impl RegionAnalysis {
    /// Number of connected parts in the region.
    #[must_use]
    pub const fn parts_count(&self) -> usize {
        self.parts.len()
    }
}

/// Per-region entry in an [`AnalysisReport`]: the display name alongside
/// the computed analysis, so report renderers need no second lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionReport {
    /// The region's display name at analysis time.
    pub name: String,
    /// The computed analysis.
    pub analysis: RegionAnalysis,
}

/// Result of a full analysis run: per-region results, per-point
/// classifications, and pairwise region relations.
///
/// Pure output; discarded and replaced each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Results for every region that had at least one stroke.
    pub regions: BTreeMap<RegionId, RegionReport>,
    /// One report per point marker, in scene order.
    pub points: Vec<PointReport>,
    /// One relation per unordered pair of analyzed regions, ordered by
    /// (first, second) identifier.
    pub pairs: Vec<PairRelation>,
}

/// Errors that can occur when starting an analysis run.
///
/// The engine itself is total over well-formed input; only configuration
/// problems are reportable errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
pub enum AnalysisError {
    /// Analysis configuration is invalid.
    #[error("invalid analysis configuration: {0}")]
    InvalidConfig(String),
}
