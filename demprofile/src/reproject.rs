use demtile::C;
use geo::geometry::{Coord, LineString, Point};
use std::fmt;

/// Numeric EPSG code identifying a coordinate reference system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Epsg(pub u32);

impl Epsg {
    /// Geographic WGS 84 (longitude/latitude in degrees).
    pub const WGS84: Epsg = Epsg(4326);

    /// British National Grid, a meter-linear projection.
    pub const OSGB36: Epsg = Epsg(27700);
}

impl fmt::Display for Epsg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.0)
    }
}

/// Coordinate reprojection capability.
///
/// Implementations are assumed infallible for in-range coordinates;
/// the profile pipeline never feeds a reprojector coordinates outside
/// the CRS pair's domain of validity.
pub trait Reproject {
    /// Transforms one point from `from` to `to`.
    fn point(&self, from: Epsg, to: Epsg, point: Point<C>) -> Point<C>;

    /// Transforms a whole line, point by point.
    fn line(&self, from: Epsg, to: Epsg, line: &LineString<C>) -> LineString<C> {
        LineString::new(
            line.points()
                .map(|point| Coord::from(self.point(from, to, point)))
                .collect(),
        )
    }
}
