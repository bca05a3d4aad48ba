//! Integerized sinusoidal (ISIN) projection.
//!
//! ```text
//!   RowTable ──► IsinForward / IsinInverse ──► IsinApi
//!   (zones,        (radians ↔ metres)           (global map, global pixel,
//!    columns)                                    tile image coordinates)
//! ```
//!
//! Three tiled resolutions are supported through [`Raster`]: 1 km, 500 m and 250 m.

mod api;
mod row_table;
mod transform;

pub use api::{
    IsinApi, IsinParameters, IsinPoint, Raster, MODIS_SPHERE, NUM_TILES_HORIZONTAL,
    NUM_TILES_VERTICAL,
};
pub use row_table::{RowDescriptor, RowTable, EPS_CNVT, EPS_SPHERE, MAX_NZONE};
pub use transform::{IsinForward, IsinInverse};
