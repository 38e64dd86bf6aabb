use crate::raster::BoxError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TileError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("no raster tiles in {0}")]
    NoTiles(PathBuf),

    #[error("failed to read tile {path}")]
    TileRead { path: PathBuf, source: BoxError },

    #[error("tile {0} has a non-invertible transform")]
    SingularTransform(PathBuf),

    #[error("no tile contains x {x} y {y}")]
    NoTileForPoint { x: f64, y: f64 },

    #[error("pixel ({row}, {col}) is outside the grid of {path}")]
    PixelOutOfBounds { path: PathBuf, row: i64, col: i64 },
}
