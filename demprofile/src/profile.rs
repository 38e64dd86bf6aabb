use crate::{
    error::ProfileError,
    reproject::{Epsg, Reproject},
    walk::{increment_for, PathWalk},
};
use demtile::{sample_elevation, ExtentIndex, RasterSource, TileCache, C, DEFAULT_CACHE_CAPACITY};
use geo::{
    algorithm::EuclideanLength,
    geometry::{LineString, Point},
};
use log::debug;
use std::path::PathBuf;

/// An elevation profile along a path.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Projected path length, floored to whole linear units.
    pub length_m: u64,

    /// Distance between consecutive samples.
    pub increment_m: u64,

    /// Geographic location of each sample, in path order.
    pub positions: Vec<Point<C>>,

    /// Elevation at each sample, in path order.
    ///
    /// The sample count follows from the path length and increment
    /// policy; callers must not assume a fixed length.
    pub elevations: Vec<f32>,
}

impl Profile {
    pub fn builder() -> ProfileBuilder {
        ProfileBuilder {
            tile_dir: None,
            geometry: None,
            geographic_crs: Epsg::WGS84,
            projected_crs: Epsg::OSGB36,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

pub struct ProfileBuilder {
    tile_dir: Option<PathBuf>,

    geometry: Option<LineString<C>>,

    /// CRS of the input geometry and of the output positions.
    geographic_crs: Epsg,

    /// Linear CRS used for length measurement and walking.
    projected_crs: Epsg,

    /// Maximum number of resident decoded tiles.
    cache_capacity: usize,
}

impl ProfileBuilder {
    /// Directory holding the DEM tile mosaic.
    pub fn tile_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tile_dir = Some(dir.into());
        self
    }

    /// The path to profile, in geographic coordinates.
    pub fn geometry(mut self, line: LineString<C>) -> Self {
        self.geometry = Some(line);
        self
    }

    pub fn geographic_crs(mut self, crs: Epsg) -> Self {
        self.geographic_crs = crs;
        self
    }

    pub fn projected_crs(mut self, crs: Epsg) -> Self {
        self.projected_crs = crs;
        self
    }

    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Extracts the elevation profile.
    ///
    /// Any failure aborts the whole extraction; a profile with a
    /// silent gap would mislead the propagation model downstream.
    pub fn build<R, P>(&self, raster: &R, reproject: &P) -> Result<Profile, ProfileError>
    where
        R: RasterSource,
        P: Reproject,
    {
        let (Some(tile_dir), Some(geometry)) = (&self.tile_dir, &self.geometry) else {
            return Err(ProfileError::Builder);
        };
        if geometry.0.len() < 2 {
            return Err(ProfileError::DegeneratePath);
        }

        let index = ExtentIndex::build(tile_dir, raster)?;
        let mut cache = TileCache::new(self.cache_capacity);

        let projected = reproject.line(self.geographic_crs, self.projected_crs, geometry);
        let length_m = projected.euclidean_length().floor() as u64;
        let increment_m = increment_for(length_m);

        let now = std::time::Instant::now();
        let walk = PathWalk::new(&projected, increment_m);
        let mut positions = Vec::with_capacity(walk.len());
        let mut elevations = Vec::with_capacity(walk.len());
        for projected_point in walk {
            let point = reproject.point(self.projected_crs, self.geographic_crs, projected_point);
            let elevation = sample_elevation(&index, &mut cache, raster, point.into())?;
            positions.push(point);
            elevations.push(elevation);
        }
        debug!(
            "profile; len: {}, length_m: {length_m}, increment_m: {increment_m}, sample_exec: {:?}",
            elevations.len(),
            now.elapsed()
        );

        Ok(Profile {
            length_m,
            increment_m,
            positions,
            elevations,
        })
    }
}
