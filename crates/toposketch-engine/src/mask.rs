//! Binary occupancy masks over the analysis grid.
//!
//! A [`Mask`] is a `width x height` grid with one byte per cell:
//! 255 = foreground, 0 = background. It is backed by [`image::GrayImage`]
//! so raster primitives from `imageproc` can draw into it directly.
//!
//! All set-theoretic operations the engine needs live here: cell-wise OR,
//! AND, difference, overlap tests, and foreground enumeration. Every
//! operation requires both operands to share the same dimensions; the
//! engine allocates all masks for one run from a single
//! [`AnalysisConfig`](crate::AnalysisConfig), so a mismatch is a
//! programming defect and is checked with `debug_assert!`.

use image::GrayImage;
use serde::{Deserialize, Serialize};

/// Foreground cell value.
const ON: u8 = 255;

/// A binary occupancy grid, 255 = foreground.
///
/// Does not derive `PartialEq` or serde traits because `GrayImage`
/// implements neither; equality compares dimensions and raw bytes, and
/// serde uses a `(width, height, raw_bytes)` proxy.
#[derive(Debug, Clone)]
pub struct Mask(GrayImage);

impl Mask {
    /// Create an all-background mask.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self(GrayImage::new(width, height))
    }

    /// Grid width in cells.
    #[must_use]
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Grid height in cells.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.0.height()
    }

    /// Whether the cell at `(x, y)` is foreground.
    ///
    /// Out-of-grid coordinates are background.
    #[must_use]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x < self.width() && y < self.height() && self.0.get_pixel(x, y).0[0] == ON
    }

    /// Set the cell at `(x, y)` to foreground. Out-of-grid coordinates
    /// are ignored.
    pub fn set(&mut self, x: u32, y: u32) {
        if x < self.width() && y < self.height() {
            self.0.put_pixel(x, y, image::Luma([ON]));
        }
    }

    /// Cell-wise OR of `other` into `self`.
    pub fn or_assign(&mut self, other: &Self) {
        debug_assert_eq!(self.0.dimensions(), other.0.dimensions());
        for (dst, src) in self.0.iter_mut().zip(other.0.iter()) {
            *dst |= *src;
        }
    }

    /// Whether `self` and `other` share at least one foreground cell.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        debug_assert_eq!(self.0.dimensions(), other.0.dimensions());
        self.0.iter().zip(other.0.iter()).any(|(a, b)| (a & b) == ON)
    }

    /// Cell-wise AND.
    #[must_use = "returns the intersection mask"]
    pub fn and(&self, other: &Self) -> Self {
        debug_assert_eq!(self.0.dimensions(), other.0.dimensions());
        let mut out = self.clone();
        for (dst, src) in out.0.iter_mut().zip(other.0.iter()) {
            *dst &= *src;
        }
        out
    }

    /// Cell-wise difference: foreground of `self` that is background in
    /// `other`.
    #[must_use = "returns the difference mask"]
    pub fn minus(&self, other: &Self) -> Self {
        debug_assert_eq!(self.0.dimensions(), other.0.dimensions());
        let mut out = self.clone();
        for (dst, src) in out.0.iter_mut().zip(other.0.iter()) {
            *dst &= !*src;
        }
        out
    }

    /// Number of foreground cells.
    #[must_use]
    pub fn foreground_count(&self) -> u64 {
        self.0.iter().map(|&v| u64::from(v == ON)).sum()
    }

    /// Whether the mask has no foreground cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&v| v != ON)
    }

    /// Coordinates of every foreground cell, in row-major order.
    #[must_use]
    pub fn foreground_points(&self) -> Vec<(i64, i64)> {
        let mut points = Vec::new();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.contains(x, y) {
                    points.push((i64::from(x), i64::from(y)));
                }
            }
        }
        points
    }

    /// Borrow the underlying grayscale buffer.
    #[must_use]
    pub const fn as_image(&self) -> &GrayImage {
        &self.0
    }

    /// Mutably borrow the underlying grayscale buffer, for drawing
    /// primitives. Callers must only write 0 or 255.
    pub const fn as_image_mut(&mut self) -> &mut GrayImage {
        &mut self.0
    }

    /// Raw row-major bytes, one per cell.
    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        self.0.as_raw()
    }
}

impl PartialEq for Mask {
    fn eq(&self, other: &Self) -> bool {
        self.0.dimensions() == other.0.dimensions() && self.0.as_raw() == other.0.as_raw()
    }
}

impl Eq for Mask {}

/// Serde-compatible proxy: `(width, height, raw_bytes)`.
#[derive(Serialize, Deserialize)]
struct MaskProxy(u32, u32, Vec<u8>);

impl Serialize for Mask {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MaskProxy(self.width(), self.height(), self.0.as_raw().clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Mask {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let MaskProxy(width, height, raw) = MaskProxy::deserialize(deserializer)?;
        GrayImage::from_raw(width, height, raw)
            .map(Self)
            .ok_or_else(|| serde::de::Error::custom("invalid mask dimensions"))
    }
}
