use demtile::C;
use geo::{
    algorithm::{EuclideanLength, LineInterpolatePoint},
    geometry::{LineString, Point},
};

/// Hard ceiling on profile points, imposed by the downstream
/// propagation model.
pub const MAX_PROFILE_POINTS: u64 = 600;

/// Target sample count for short paths.
const FULL_RES_POINTS: u64 = 100;

/// Paths at least this long (projected linear units) are sampled at
/// the ceiling.
const LONG_PATH_METERS: u64 = 60_000;

/// Returns the sampling increment for a path of `length_m`.
///
/// Short paths get up to [`FULL_RES_POINTS`] samples; anything at or
/// beyond [`LONG_PATH_METERS`] stretches its increment to stay within
/// [`MAX_PROFILE_POINTS`]. A zero-length path yields an increment of
/// one.
pub fn increment_for(length_m: u64) -> u64 {
    if length_m >= LONG_PATH_METERS {
        length_m / MAX_PROFILE_POINTS
    } else {
        (length_m / FULL_RES_POINTS).max(1)
    }
}

/// Iterator over sample positions spaced `increment_m` apart along a
/// projected path, starting at the path's first point.
///
/// Yields `floor(floor(length) / increment_m)` positions, the `i`th
/// at arc-length distance `i * increment_m` from the start.
pub struct PathWalk<'a> {
    line: &'a LineString<C>,
    length_m: C,
    increment_m: u64,
    total_points: u64,
    current_point: u64,
}

impl<'a> PathWalk<'a> {
    pub fn new(line: &'a LineString<C>, increment_m: u64) -> Self {
        let length_m = line.euclidean_length();
        let total_points = if increment_m == 0 {
            0
        } else {
            (length_m.floor() as u64) / increment_m
        };
        Self {
            line,
            length_m,
            increment_m,
            total_points,
            current_point: 0,
        }
    }

    pub fn increment_m(&self) -> u64 {
        self.increment_m
    }
}

impl Iterator for PathWalk<'_> {
    type Item = Point<C>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_point < self.total_points {
            let distance = (self.current_point * self.increment_m) as C;
            self.current_point += 1;
            self.line.line_interpolate_point(distance / self.length_m)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.total_points - self.current_point) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for PathWalk<'_> {}
