//! Planetary mosaicking grids for Level-3 binning
//!
//! Two interchangeable grid engines map geographic coordinates to globally
//! addressable bins and back:
//!
//! - **`IsinGrid`**: MODIS-style tiled integerized sinusoidal grid at
//!   1 km, 500 m or 250 m, with decimal-packed bin indices
//! - **`CrsGrid`**: regular raster in an EPSG CRS, optionally restricted to
//!   a target polygon
//!
//! # Architecture
//!
//! ```text
//! GridConfig ──► PlanetaryGrid::from_config
//!                     │
//!                     ├─► TiledSinusoidal(IsinGrid) ──► projection::IsinApi
//!                     │
//!                     └─► Crs(CrsGrid) ──► CrsGeoCoding (cached)
//!                               │
//!                               ├─► reproject_to_grid(product)
//!                               │
//!                               └─► data_slice_rectangles(footprint, tile)
//! ```
//!
//! # Example
//!
//! ```
//! use binning_grid::{IsinGrid, MosaickingGrid};
//!
//! let grid = IsinGrid::new(21600).unwrap();
//! let bin = grid.bin_index(53.551086, 9.993682);
//! assert_eq!(bin, 31807730712);
//!
//! let [lat, lon] = grid.center_lat_lon(bin);
//! assert_eq!(grid.bin_index(lat, lon), bin);
//! ```

pub mod config;
pub mod crs_grid;
pub mod geocoding;
pub mod grid;
pub mod isin_grid;
pub mod product;
pub mod region;
pub mod reproject;
pub mod slices;

pub use config::{GridConfig, GridKind};
pub use crs_grid::{polygon_from_wkt, CrsGrid};
pub use geocoding::{CrsGeoCoding, GeoCoding};
pub use grid::{BinIndex, MosaickingGrid, PlanetaryGrid, INVALID_BIN_INDEX};
pub use isin_grid::IsinGrid;
pub use product::{Band, Product};
pub use region::{
    binning_line_bin_indices, compute_raster_sub_region, line_bin_indices,
    mosaicking_line_bin_indices, raster_pixel_size,
};
pub use slices::{align_to_tile_grid, pixel_bounds, BORDER_SNAP_MARGIN};

pub use mosaic_common::{GridError, GridResult};
