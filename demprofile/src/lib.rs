//! Elevation-profile extraction along a geographic path over a DEM
//! tile mosaic.
//!
//! Produces the bounded sequence of terrain samples that downstream
//! radio-propagation models (e.g. Longley-Rice) take as input: the
//! path is measured in a linear projected CRS, walked at an adaptive
//! increment that caps the sample count, and each sample position is
//! resolved to a mosaic cell via the `demtile` crate.

mod error;
mod profile;
mod reproject;
mod walk;

pub use crate::{
    error::ProfileError,
    profile::{Profile, ProfileBuilder},
    reproject::{Epsg, Reproject},
    walk::{increment_for, PathWalk, MAX_PROFILE_POINTS},
};
