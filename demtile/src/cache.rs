use crate::{
    error::TileError,
    raster::{Band, GeoTransform, RasterDataset, RasterSource},
};
use log::debug;
use lru::LruCache;
use std::{
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::Arc,
};

/// Default number of resident decoded tiles.
pub const DEFAULT_CACHE_CAPACITY: usize = 32;

/// Decoded tile data shared by every sample that lands in the tile.
///
/// Never mutated after creation.
pub struct CachedTile {
    band: Band,
    inverse_transform: GeoTransform,
}

impl CachedTile {
    pub fn band(&self) -> &Band {
        &self.band
    }

    /// Geographic-to-pixel transform for this tile.
    pub fn inverse_transform(&self) -> GeoTransform {
        self.inverse_transform
    }
}

/// Bounded, least-recently-used cache of decoded tiles.
///
/// Tile decoding dominates the cost of profile extraction, and
/// consecutive samples along a path usually land in the same tile, so
/// even a small cache absorbs nearly all repeat opens.
pub struct TileCache {
    tiles: LruCache<PathBuf, Arc<CachedTile>>,
}

impl TileCache {
    /// Creates a cache holding at most `capacity` tiles. A capacity
    /// of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            tiles: LruCache::new(capacity),
        }
    }

    /// Returns the decoded first band and inverse transform of the
    /// tile at `path`, decoding and caching it on a miss.
    ///
    /// A hit refreshes the entry's recency; a miss beyond capacity
    /// evicts the least-recently-used tile.
    pub fn get<R: RasterSource>(
        &mut self,
        path: &Path,
        raster: &R,
    ) -> Result<Arc<CachedTile>, TileError> {
        if let Some(tile) = self.tiles.get(path) {
            return Ok(Arc::clone(tile));
        }

        debug!("loading {path:?}");
        let dataset = raster.open(path).map_err(|source| TileError::TileRead {
            path: path.to_owned(),
            source,
        })?;
        let band = dataset.read_band(1).map_err(|source| TileError::TileRead {
            path: path.to_owned(),
            source,
        })?;
        let inverse_transform = dataset
            .transform()
            .inverse()
            .ok_or_else(|| TileError::SingularTransform(path.to_owned()))?;

        let tile = Arc::new(CachedTile {
            band,
            inverse_transform,
        });
        self.tiles.put(path.to_owned(), Arc::clone(&tile));
        Ok(tile)
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.tiles.cap().get()
    }
}

#[cfg(test)]
mod tests {
    use super::{TileCache, DEFAULT_CACHE_CAPACITY};
    use crate::{
        error::TileError,
        extent::TileExtent,
        memory::{MemoryRaster, MemoryRasterSource},
        raster::{Band, GeoTransform},
    };
    use std::path::PathBuf;

    fn source_with_tiles(count: usize) -> (MemoryRasterSource, Vec<PathBuf>) {
        let mut raster = MemoryRasterSource::new();
        let mut paths = Vec::with_capacity(count);
        for i in 0..count {
            let path = PathBuf::from(format!("tile_{i}.tif"));
            let left = 10.0 * i as f64;
            raster.insert(
                &path,
                MemoryRaster::flat(
                    TileExtent::new(left, 0.0, left + 10.0, 10.0),
                    10,
                    10,
                    i as f32,
                ),
            );
            paths.push(path);
        }
        (raster, paths)
    }

    #[test]
    fn test_hit_does_not_redecode() {
        let (raster, paths) = source_with_tiles(1);
        let mut cache = TileCache::new(DEFAULT_CACHE_CAPACITY);

        let first = cache.get(&paths[0], &raster).unwrap();
        assert_eq!(raster.open_count(), 1);

        let second = cache.get(&paths[0], &raster).unwrap();
        assert_eq!(raster.open_count(), 1);
        assert_eq!(first.band(), second.band());
        assert_eq!(first.inverse_transform(), second.inverse_transform());
    }

    #[test]
    fn test_evicts_least_recently_used() {
        let (raster, paths) = source_with_tiles(3);
        let mut cache = TileCache::new(2);

        cache.get(&paths[0], &raster).unwrap();
        cache.get(&paths[1], &raster).unwrap();
        // Refresh tile 0 so tile 1 is now the LRU entry.
        cache.get(&paths[0], &raster).unwrap();
        assert_eq!(raster.open_count(), 2);

        cache.get(&paths[2], &raster).unwrap();
        assert_eq!(cache.len(), 2);

        // Tile 0 survived the eviction; tile 1 did not.
        cache.get(&paths[0], &raster).unwrap();
        assert_eq!(raster.open_count(), 3);
        cache.get(&paths[1], &raster).unwrap();
        assert_eq!(raster.open_count(), 4);
    }

    #[test]
    fn test_stays_within_capacity() {
        let (raster, paths) = source_with_tiles(40);
        let mut cache = TileCache::new(DEFAULT_CACHE_CAPACITY);
        for path in &paths {
            cache.get(path, &raster).unwrap();
            assert!(cache.len() <= DEFAULT_CACHE_CAPACITY);
        }
        assert_eq!(cache.len(), DEFAULT_CACHE_CAPACITY);
        assert_eq!(raster.open_count(), 40);
    }

    #[test]
    fn test_zero_capacity_holds_one_tile() {
        let (raster, paths) = source_with_tiles(2);
        let mut cache = TileCache::new(0);
        assert_eq!(cache.capacity(), 1);
        cache.get(&paths[0], &raster).unwrap();
        cache.get(&paths[1], &raster).unwrap();
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unregistered_tile_is_read_error() {
        let (raster, _paths) = source_with_tiles(1);
        let mut cache = TileCache::new(DEFAULT_CACHE_CAPACITY);
        assert!(matches!(
            cache.get(PathBuf::from("missing.tif").as_path(), &raster),
            Err(TileError::TileRead { .. })
        ));
    }

    #[test]
    fn test_singular_transform_is_an_error() {
        let path = PathBuf::from("flatline.tif");
        let mut raster = MemoryRasterSource::new();
        raster.insert(
            &path,
            MemoryRaster::new(
                TileExtent::new(0.0, 0.0, 10.0, 10.0),
                GeoTransform::new(1.0, 0.0, 0.0, 2.0, 0.0, 0.0),
                Band::new(vec![0.0; 4], 2, 2),
            ),
        );
        let mut cache = TileCache::new(DEFAULT_CACHE_CAPACITY);
        assert!(matches!(
            cache.get(&path, &raster),
            Err(TileError::SingularTransform(_))
        ));
    }
}
