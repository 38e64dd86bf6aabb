use demtile::TileError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("missing required parameters")]
    Builder,

    #[error("path geometry needs at least two points")]
    DegeneratePath,

    #[error("{0}")]
    Tile(#[from] TileError),
}
