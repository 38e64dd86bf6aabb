use crate::{
    error::TileError,
    raster::{RasterDataset, RasterSource},
    C,
};
use geo::geometry::Coord;
use log::debug;
use std::{
    ffi::OsStr,
    path::{Path, PathBuf},
};

/// File extension of raster tiles in a DEM directory.
pub const TILE_EXTENSION: &str = "tif";

/// Geographic bounding box of one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileExtent {
    pub left: C,
    pub bottom: C,
    pub right: C,
    pub top: C,
}

impl TileExtent {
    pub fn new(left: C, bottom: C, right: C, top: C) -> Self {
        debug_assert!(left < right && bottom < top);
        Self {
            left,
            bottom,
            right,
            top,
        }
    }

    /// Closed-interval containment; points on the boundary count as
    /// inside.
    pub fn contains(&self, Coord { x, y }: Coord<C>) -> bool {
        self.left <= x && x <= self.right && self.bottom <= y && y <= self.top
    }
}

/// Maps tile extents to tile paths for one DEM directory.
pub struct ExtentIndex {
    entries: Vec<(TileExtent, PathBuf)>,
}

impl ExtentIndex {
    /// Scans `tile_dir` (non-recursive) and records the extent of
    /// every `tif` tile in it.
    ///
    /// Any tile that fails to open aborts the whole build; a mosaic
    /// with one unreadable tile is unusable.
    pub fn build<R: RasterSource>(tile_dir: &Path, raster: &R) -> Result<Self, TileError> {
        let mut entries = Vec::new();
        for entry in std::fs::read_dir(tile_dir)? {
            let path = entry?.path();
            if path.extension().and_then(OsStr::to_str) != Some(TILE_EXTENSION) {
                continue;
            }
            let dataset = raster.open(&path).map_err(|source| TileError::TileRead {
                path: path.clone(),
                source,
            })?;
            let extent = dataset.extent();
            debug!("extent of {path:?}: {extent:?}");
            entries.push((extent, path));
        }
        if entries.is_empty() {
            return Err(TileError::NoTiles(tile_dir.to_owned()));
        }
        Ok(Self { entries })
    }

    /// Returns the path of a tile whose extent contains `coord`.
    ///
    /// A linear scan; the first matching entry wins. Extents in a
    /// well-formed mosaic do not overlap, but this is not enforced.
    pub fn locate(&self, coord: Coord<C>) -> Result<&Path, TileError> {
        self.entries
            .iter()
            .find(|(extent, _)| extent.contains(coord))
            .map(|(_, path)| path.as_path())
            .ok_or(TileError::NoTileForPoint {
                x: coord.x,
                y: coord.y,
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
