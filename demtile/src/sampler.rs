use crate::{cache::TileCache, error::TileError, extent::ExtentIndex, raster::RasterSource, C};
use geo::geometry::Coord;

/// Returns the elevation of the mosaic cell containing `coord`.
///
/// Nearest-cell sampling: the fractional pixel position is floored on
/// both axes, rounding toward the tile origin. No interpolation
/// between cell centers.
///
/// Floored indices can land one cell outside the grid when `coord`
/// sits on a tile's extent boundary; that is surfaced as
/// [`TileError::PixelOutOfBounds`] rather than clamped.
pub fn sample_elevation<R: RasterSource>(
    index: &ExtentIndex,
    cache: &mut TileCache,
    raster: &R,
    coord: Coord<C>,
) -> Result<f32, TileError> {
    let path = index.locate(coord)?;
    let tile = cache.get(path, raster)?;

    let (col, row) = tile.inverse_transform().apply(coord.x, coord.y);
    let (row, col) = (row.floor(), col.floor());
    let out_of_bounds = || TileError::PixelOutOfBounds {
        path: path.to_owned(),
        row: row as i64,
        col: col as i64,
    };

    if row < 0.0 || col < 0.0 {
        return Err(out_of_bounds());
    }
    tile.band()
        .get(row as usize, col as usize)
        .ok_or_else(out_of_bounds)
}

#[cfg(test)]
mod tests {
    use super::{sample_elevation, Coord};
    use crate::{
        cache::TileCache,
        error::TileError,
        extent::{ExtentIndex, TileExtent},
        memory::{MemoryRaster, MemoryRasterSource},
    };
    use tempfile::TempDir;

    /// One 10x10 tile over [0, 0, 10, 10] whose cell at (row, col)
    /// holds `row * 10 + col`.
    fn graded_mosaic() -> (TempDir, MemoryRasterSource) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("graded.tif");
        std::fs::write(&path, []).unwrap();

        let samples = (0..100).map(|v| v as f32).collect();
        let mut raster = MemoryRasterSource::new();
        raster.insert(
            &path,
            MemoryRaster::with_samples(TileExtent::new(0.0, 0.0, 10.0, 10.0), 10, 10, samples),
        );
        (tmp, raster)
    }

    #[test]
    fn test_nearest_cell() {
        let (tmp, raster) = graded_mosaic();
        let index = ExtentIndex::build(tmp.path(), &raster).unwrap();
        let mut cache = TileCache::new(4);

        // Row 0 is the tile's top edge (y just under 10), so
        // y = 3.5 is row 6; x = 2.5 is column 2.
        let elevation =
            sample_elevation(&index, &mut cache, &raster, Coord { x: 2.5, y: 3.5 }).unwrap();
        assert_eq!(elevation, 62.0);

        // Anywhere within the same cell samples the same value.
        let elevation =
            sample_elevation(&index, &mut cache, &raster, Coord { x: 2.99, y: 3.01 }).unwrap();
        assert_eq!(elevation, 62.0);
    }

    #[test]
    fn test_no_tile_for_point() {
        let (tmp, raster) = graded_mosaic();
        let index = ExtentIndex::build(tmp.path(), &raster).unwrap();
        let mut cache = TileCache::new(4);
        assert!(matches!(
            sample_elevation(&index, &mut cache, &raster, Coord { x: 25.0, y: 5.0 }),
            Err(TileError::NoTileForPoint { .. })
        ));
    }

    #[test]
    fn test_bottom_edge_is_out_of_bounds() {
        let (tmp, raster) = graded_mosaic();
        let index = ExtentIndex::build(tmp.path(), &raster).unwrap();
        let mut cache = TileCache::new(4);

        // y = 0 is inside the extent (closed interval) but floors to
        // row 10, one past the grid.
        assert!(matches!(
            sample_elevation(&index, &mut cache, &raster, Coord { x: 5.0, y: 0.0 }),
            Err(TileError::PixelOutOfBounds { .. })
        ));
    }
}
