//! DEM tile mosaic access.
//!
//! A mosaic is a flat directory of raster tiles, each covering a
//! rectangular geographic extent. This crate indexes those extents,
//! keeps a bounded cache of decoded tiles, and answers point
//! elevation queries against the mosaic. Decoding the tiles
//! themselves is a collaborator concern behind [`RasterSource`].

mod cache;
mod error;
mod extent;
mod memory;
mod raster;
mod sampler;

pub use crate::{
    cache::{CachedTile, TileCache, DEFAULT_CACHE_CAPACITY},
    error::TileError,
    extent::{ExtentIndex, TileExtent, TILE_EXTENSION},
    memory::{MemoryRaster, MemoryRasterSource},
    raster::{Band, BoxError, GeoTransform, RasterDataset, RasterSource},
    sampler::sample_elevation,
};

/// Base floating point type used for all coordinates.
///
/// Note: this _could_ be a generic parameter, but tile lookup and
/// affine math are not the hot path here (tile decoding is), so the
/// flexibility buys nothing.
pub type C = f64;
