//! The contract shared by every mosaicking grid.

use crate::config::{GridConfig, GridKind};
use crate::crs_grid::CrsGrid;
use crate::isin_grid::IsinGrid;
use mosaic_common::{GridError, GridResult};

/// Global address of a grid cell. Valid indices are non-negative.
pub type BinIndex = i64;

/// Returned by lookups outside the grid domain.
pub const INVALID_BIN_INDEX: BinIndex = -1;

/// A planetary grid whose cells are addressed by a single [`BinIndex`].
///
/// Bins are ordered row by row from north to south, so
/// `first_bin_index(row) <= bin_index(lat, lon)` for any coordinate in `row`.
/// How contiguous the indices are depends on the grid.
pub trait MosaickingGrid: Send + Sync {
    /// Bin containing the coordinate in degrees, [`INVALID_BIN_INDEX`] outside the domain.
    fn bin_index(&self, lat: f64, lon: f64) -> BinIndex;

    /// Row containing the bin, `-1` for invalid bins.
    fn row_index(&self, bin: BinIndex) -> i32;

    fn num_bins(&self) -> i64;

    fn num_rows(&self) -> i32;

    /// Addressable columns in `row`.
    fn num_cols(&self, row: i32) -> i32;

    fn first_bin_index(&self, row: i32) -> BinIndex;

    /// Centre latitude of `row` in degrees.
    fn center_lat(&self, row: i32) -> f64;

    /// `[lat, lon]` of the bin centre, a NaN pair when it falls outside the Earth.
    fn center_lat_lon(&self, bin: BinIndex) -> [f64; 2];
}

/// The closed set of grid engines.
#[derive(Debug)]
pub enum PlanetaryGrid {
    TiledSinusoidal(IsinGrid),
    Crs(CrsGrid),
}

impl PlanetaryGrid {
    /// Build the grid described by a configuration.
    pub fn from_config(config: &GridConfig) -> GridResult<Self> {
        config.validate().map_err(GridError::Config)?;
        match config.kind {
            GridKind::Isin => Ok(PlanetaryGrid::TiledSinusoidal(IsinGrid::new(config.num_rows)?)),
            GridKind::Crs => {
                let spec = config.crs_spec()?;
                let grid = match config.pixel_size {
                    Some(pixel_size) => CrsGrid::with_pixel_size(pixel_size, spec)?,
                    None => CrsGrid::new(config.num_rows, spec)?,
                };
                Ok(PlanetaryGrid::Crs(grid))
            }
        }
    }

    pub fn as_crs(&self) -> Option<&CrsGrid> {
        match self {
            PlanetaryGrid::Crs(grid) => Some(grid),
            PlanetaryGrid::TiledSinusoidal(_) => None,
        }
    }

    pub fn as_isin(&self) -> Option<&IsinGrid> {
        match self {
            PlanetaryGrid::TiledSinusoidal(grid) => Some(grid),
            PlanetaryGrid::Crs(_) => None,
        }
    }

    fn inner(&self) -> &dyn MosaickingGrid {
        match self {
            PlanetaryGrid::TiledSinusoidal(grid) => grid,
            PlanetaryGrid::Crs(grid) => grid,
        }
    }
}

impl MosaickingGrid for PlanetaryGrid {
    fn bin_index(&self, lat: f64, lon: f64) -> BinIndex {
        self.inner().bin_index(lat, lon)
    }

    fn row_index(&self, bin: BinIndex) -> i32 {
        self.inner().row_index(bin)
    }

    fn num_bins(&self) -> i64 {
        self.inner().num_bins()
    }

    fn num_rows(&self) -> i32 {
        self.inner().num_rows()
    }

    fn num_cols(&self, row: i32) -> i32 {
        self.inner().num_cols(row)
    }

    fn first_bin_index(&self, row: i32) -> BinIndex {
        self.inner().first_bin_index(row)
    }

    fn center_lat(&self, row: i32) -> f64 {
        self.inner().center_lat(row)
    }

    fn center_lat_lon(&self, bin: BinIndex) -> [f64; 2] {
        self.inner().center_lat_lon(bin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_isin() {
        let config = GridConfig {
            kind: GridKind::Isin,
            num_rows: 21600,
            ..GridConfig::default()
        };
        let grid = PlanetaryGrid::from_config(&config).unwrap();
        assert!(grid.as_isin().is_some());
        assert_eq!(grid.num_rows(), 21600);
        assert_eq!(grid.bin_index(0.0, 0.0), 91800000000);
    }

    #[test]
    fn test_from_config_crs() {
        let config = GridConfig {
            kind: GridKind::Crs,
            num_rows: 180,
            crs: "EPSG:4326".to_string(),
            pixel_size: None,
            ..GridConfig::default()
        };
        let grid = PlanetaryGrid::from_config(&config).unwrap();
        assert!(grid.as_crs().is_some());
        assert_eq!(grid.num_rows(), 180);
        assert_eq!(grid.num_cols(0), 360);
    }

    #[test]
    fn test_from_config_rejects_invalid() {
        let config = GridConfig {
            kind: GridKind::Isin,
            num_rows: 11,
            ..GridConfig::default()
        };
        assert!(PlanetaryGrid::from_config(&config).is_err());

        let config = GridConfig {
            kind: GridKind::Crs,
            crs: "EPSG:99999".to_string(),
            ..GridConfig::default()
        };
        assert!(PlanetaryGrid::from_config(&config).is_err());
    }
}
