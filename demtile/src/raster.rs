//! Collaborator seam for raster-tile decoding.
//!
//! The mosaic code never parses raster bytes itself; it asks a
//! [`RasterSource`] to open tiles and hand back extents, transforms,
//! and elevation bands.

use crate::{extent::TileExtent, C};
use std::path::Path;

/// Opaque error type surfaced by raster collaborators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Opens raster tiles by path.
pub trait RasterSource {
    type Dataset: RasterDataset;

    fn open(&self, path: &Path) -> Result<Self::Dataset, BoxError>;
}

/// One opened raster tile.
pub trait RasterDataset {
    /// Geographic bounding box of this tile.
    fn extent(&self) -> TileExtent;

    /// Pixel-to-geographic affine transform.
    fn transform(&self) -> GeoTransform;

    /// Decodes the given 1-based band into a dense elevation grid.
    fn read_band(&self, band: usize) -> Result<Band, BoxError>;
}

/// A 2-D affine transform `x' = a*x + b*y + c`, `y' = d*x + e*y + f`.
///
/// In the pixel-to-geographic direction, `x` is the column index and
/// `y` the row index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoTransform {
    pub a: C,
    pub b: C,
    pub c: C,
    pub d: C,
    pub e: C,
    pub f: C,
}

impl GeoTransform {
    pub fn new(a: C, b: C, c: C, d: C, e: C, f: C) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Transform for a north-up raster with its top-left pixel corner
    /// at `(west, north)` and cell sizes `xres` x `yres` (both
    /// positive).
    pub fn from_origin(west: C, north: C, xres: C, yres: C) -> Self {
        Self::new(xres, 0.0, west, 0.0, -yres, north)
    }

    pub fn apply(&self, x: C, y: C) -> (C, C) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }

    /// Returns the inverse transform, or `None` if this transform is
    /// singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.e - self.b * self.d;
        if det == 0.0 {
            return None;
        }
        Some(Self::new(
            self.e / det,
            -self.b / det,
            (self.b * self.f - self.c * self.e) / det,
            -self.d / det,
            self.a / det,
            (self.c * self.d - self.a * self.f) / det,
        ))
    }
}

/// A dense, row-major grid of elevation samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    samples: Box<[f32]>,
    rows: usize,
    cols: usize,
}

impl Band {
    pub fn new(samples: Vec<f32>, rows: usize, cols: usize) -> Self {
        assert_eq!(samples.len(), rows * cols);
        Self {
            samples: samples.into_boxed_slice(),
            rows,
            cols,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the sample at `(row, col)`, or `None` when either
    /// index is out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.rows && col < self.cols {
            Some(self.samples[row * self.cols + col])
        } else {
            None
        }
    }
}
