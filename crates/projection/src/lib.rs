//! Coordinate transformations for the mosaicking grids.
//!
//! Implements the ISIN tiled sinusoidal projection and the handful of map
//! projections the CRS grid supports, from scratch.

pub mod affine;
pub mod crs;
pub mod ellipsoid;
pub mod equal_area;
pub mod error;
pub mod isin;
pub mod mercator;
pub mod polar;
pub mod transverse_mercator;

pub use affine::AffineTransform;
pub use crs::{CrsDefinition, Projection, Units};
pub use ellipsoid::Ellipsoid;
pub use error::ProjectionError;
pub use isin::{IsinApi, IsinForward, IsinInverse, IsinPoint, Raster, RowTable};
