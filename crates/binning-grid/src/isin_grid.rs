//! Tiled integerized sinusoidal grid (MODIS land tiling).
//!
//! Bin indices pack the tile position and the pixel within the tile as
//! decimal digits: `tile_line·10^10 + tile_col·10^8 + y·10^4 + x`.

use tracing::debug;

use mosaic_common::{GridError, GridResult};
use projection::isin::{IsinApi, IsinPoint, Raster, NUM_TILES_HORIZONTAL, NUM_TILES_VERTICAL};

use crate::grid::{BinIndex, MosaickingGrid, INVALID_BIN_INDEX};

const TILE_LINE_FACTOR: i64 = 10_000_000_000;
const TILE_COL_FACTOR: i64 = 100_000_000;
const Y_FACTOR: i64 = 10_000;

#[derive(Debug, Clone)]
pub struct IsinGrid {
    api: IsinApi,
    tile_size: i32,
    num_rows: i32,
    num_cols: i32,
}

impl IsinGrid {
    /// Build the grid for one of the supported global row counts
    /// (18 × 1200, 18 × 2400 or 18 × 4800).
    pub fn new(num_rows: i32) -> GridResult<Self> {
        let raster = Raster::from_num_rows(num_rows).ok_or_else(|| {
            GridError::invalid_parameter(
                "num_rows",
                format!(
                    "{} is not one of {}, {} or {}",
                    num_rows,
                    Raster::Grid1Km.num_rows(),
                    Raster::Grid500M.num_rows(),
                    Raster::Grid250M.num_rows()
                ),
            )
        })?;
        Self::with_raster(raster)
    }

    pub fn with_raster(raster: Raster) -> GridResult<Self> {
        let api = IsinApi::new(raster)?;
        let tile_size = raster.tile_size();
        debug!(
            ?raster,
            tile_size,
            num_rows = raster.num_rows(),
            "Created ISIN grid"
        );
        Ok(Self {
            api,
            tile_size,
            num_rows: NUM_TILES_VERTICAL * tile_size,
            num_cols: NUM_TILES_HORIZONTAL * tile_size,
        })
    }

    pub fn raster(&self) -> Raster {
        self.api.raster()
    }

    pub fn tile_size(&self) -> i32 {
        self.tile_size
    }

    pub fn api(&self) -> &IsinApi {
        &self.api
    }

    /// Pack a tile position into a bin index.
    pub fn to_bin_index(x: i64, y: i64, tile_col: i64, tile_line: i64) -> BinIndex {
        tile_line * TILE_LINE_FACTOR + tile_col * TILE_COL_FACTOR + y * Y_FACTOR + x
    }

    /// Unpack a bin index into its tile position; x and y are integral.
    pub fn to_isin_point(bin: BinIndex) -> IsinPoint {
        let x = bin % Y_FACTOR;
        let y = (bin / Y_FACTOR) % Y_FACTOR;
        let tile_col = (bin / TILE_COL_FACTOR) % 100;
        let tile_line = bin / TILE_LINE_FACTOR;
        IsinPoint::new(x as f64, y as f64, tile_col as i32, tile_line as i32)
    }

    /// Column count the ISIN row table assigns to `row`, the number of
    /// sinusoidal cells actually covering the Earth at that latitude.
    pub fn sinusoidal_cols(&self, row: i32) -> i32 {
        if row < 0 || row >= self.num_rows {
            return 0;
        }
        let table = self.api.table();
        let row = row as i64;
        let half_row = if row < table.nrow_half {
            row
        } else {
            table.nrow - 1 - row
        };
        table
            .row(half_row as usize)
            .map(|r| r.ncol as i32)
            .unwrap_or(0)
    }
}

impl MosaickingGrid for IsinGrid {
    fn bin_index(&self, lat: f64, lon: f64) -> BinIndex {
        let (gx, gy) = match self.api.to_global_pixel(lon, lat) {
            Ok(g) => g,
            Err(_) => return INVALID_BIN_INDEX,
        };

        let ix = (gx.floor() as i64).clamp(0, self.num_cols as i64 - 1);
        let iy = (gy.floor() as i64).clamp(0, self.num_rows as i64 - 1);
        let ts = self.tile_size as i64;
        Self::to_bin_index(ix % ts, iy % ts, ix / ts, iy / ts)
    }

    fn row_index(&self, bin: BinIndex) -> i32 {
        if bin < 0 {
            return -1;
        }
        let point = Self::to_isin_point(bin);
        let row = point.tile_line as i64 * self.tile_size as i64 + point.y as i64;
        if row >= self.num_rows as i64 {
            return -1;
        }
        row as i32
    }

    fn num_bins(&self) -> i64 {
        self.num_rows as i64 * self.num_cols as i64
    }

    fn num_rows(&self) -> i32 {
        self.num_rows
    }

    fn num_cols(&self, _row: i32) -> i32 {
        self.num_cols
    }

    fn first_bin_index(&self, row: i32) -> BinIndex {
        if row < 0 || row >= self.num_rows {
            return INVALID_BIN_INDEX;
        }
        let ts = self.tile_size as i64;
        let row = row as i64;
        (row / ts) * TILE_LINE_FACTOR + (row % ts) * Y_FACTOR
    }

    fn center_lat(&self, row: i32) -> f64 {
        90.0 - (row as f64 + 0.5) * 180.0 / self.num_rows as f64
    }

    fn center_lat_lon(&self, bin: BinIndex) -> [f64; 2] {
        if bin < 0 {
            return [f64::NAN, f64::NAN];
        }
        let p = Self::to_isin_point(bin);
        match self
            .api
            .tile_image_coordinates_to_geo(p.x, p.y, p.tile_col, p.tile_line)
        {
            Ok((lon, lat)) => [lat, lon],
            Err(_) => [f64::NAN, f64::NAN],
        }
    }
}
