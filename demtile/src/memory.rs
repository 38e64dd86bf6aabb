//! In-memory raster source, for tests, benchmarks, and synthetic
//! mosaics.

use crate::{
    extent::TileExtent,
    raster::{Band, BoxError, GeoTransform, RasterDataset, RasterSource},
};
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::atomic::{AtomicUsize, Ordering},
};

/// A fully-materialized single-band raster tile.
#[derive(Debug, Clone)]
pub struct MemoryRaster {
    extent: TileExtent,
    transform: GeoTransform,
    band: Band,
}

impl MemoryRaster {
    pub fn new(extent: TileExtent, transform: GeoTransform, band: Band) -> Self {
        Self {
            extent,
            transform,
            band,
        }
    }

    /// A north-up tile spanning `extent` with a `rows` x `cols` grid
    /// holding `elevation` in every cell.
    pub fn flat(extent: TileExtent, rows: usize, cols: usize, elevation: f32) -> Self {
        Self::with_samples(extent, rows, cols, vec![elevation; rows * cols])
    }

    /// A north-up tile spanning `extent` with the given row-major
    /// samples.
    pub fn with_samples(extent: TileExtent, rows: usize, cols: usize, samples: Vec<f32>) -> Self {
        let xres = (extent.right - extent.left) / cols as f64;
        let yres = (extent.top - extent.bottom) / rows as f64;
        let transform = GeoTransform::from_origin(extent.left, extent.top, xres, yres);
        Self::new(extent, transform, Band::new(samples, rows, cols))
    }
}

impl RasterDataset for MemoryRaster {
    fn extent(&self) -> TileExtent {
        self.extent
    }

    fn transform(&self) -> GeoTransform {
        self.transform
    }

    fn read_band(&self, band: usize) -> Result<Band, BoxError> {
        if band == 1 {
            Ok(self.band.clone())
        } else {
            Err(format!("no band {band}").into())
        }
    }
}

/// Serves registered [`MemoryRaster`]s by path and counts how many
/// times tiles were opened, so callers can observe caching behavior.
#[derive(Debug, Default)]
pub struct MemoryRasterSource {
    rasters: HashMap<PathBuf, MemoryRaster>,
    opens: AtomicUsize,
}

impl MemoryRasterSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, raster: MemoryRaster) {
        self.rasters.insert(path.into(), raster);
    }

    /// Number of `open` calls made against this source so far.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::Relaxed)
    }
}

impl RasterSource for MemoryRasterSource {
    type Dataset = MemoryRaster;

    fn open(&self, path: &Path) -> Result<MemoryRaster, BoxError> {
        self.opens.fetch_add(1, Ordering::Relaxed);
        self.rasters
            .get(path)
            .cloned()
            .ok_or_else(|| format!("no raster registered at {}", path.display()).into())
    }
}
