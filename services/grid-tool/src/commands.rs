//! Subcommand implementations, each producing a serializable result.

use anyhow::{anyhow, Result};
use geo::Polygon;
use serde::Serialize;

use binning_grid::{
    compute_raster_sub_region, polygon_from_wkt, BinIndex, GridConfig, MosaickingGrid,
    PlanetaryGrid, INVALID_BIN_INDEX,
};
use mosaic_common::{PixelRect, TileSize};

#[derive(Debug, Serialize, PartialEq)]
pub struct BinOutput {
    pub lat: f64,
    pub lon: f64,
    /// `None` when the coordinate lies outside the grid
    pub bin: Option<BinIndex>,
    pub row: Option<i32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct CenterOutput {
    pub bin: BinIndex,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct InfoOutput {
    pub kind: String,
    pub num_rows: i32,
    pub num_cols: i32,
    pub num_bins: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pixel_size: Option<[f64; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tile_size: Option<i32>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RectOutput {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl From<PixelRect> for RectOutput {
    fn from(r: PixelRect) -> Self {
        Self {
            x: r.x,
            y: r.y,
            width: r.width,
            height: r.height,
        }
    }
}

pub fn bin(grid: &PlanetaryGrid, lat: f64, lon: f64) -> BinOutput {
    let bin = grid.bin_index(lat, lon);
    let valid = bin != INVALID_BIN_INDEX;
    BinOutput {
        lat,
        lon,
        bin: valid.then_some(bin),
        row: valid.then(|| grid.row_index(bin)),
    }
}

pub fn center(grid: &PlanetaryGrid, bin: BinIndex) -> CenterOutput {
    let [lat, lon] = grid.center_lat_lon(bin);
    CenterOutput {
        bin,
        lat: lat.is_finite().then_some(lat),
        lon: lon.is_finite().then_some(lon),
    }
}

pub fn info(grid: &PlanetaryGrid, config: &GridConfig) -> InfoOutput {
    let mut out = InfoOutput {
        kind: config.kind.to_string(),
        num_rows: grid.num_rows(),
        num_cols: grid.num_cols(0),
        num_bins: grid.num_bins(),
        crs: None,
        pixel_size: None,
        tile_size: None,
    };
    match grid {
        PlanetaryGrid::Crs(g) => {
            out.crs = Some(g.crs().to_string());
            out.pixel_size = Some([g.pixel_size_x(), g.pixel_size()]);
        }
        PlanetaryGrid::TiledSinusoidal(g) => {
            out.tile_size = Some(g.tile_size());
        }
    }
    out
}

pub fn slices(grid: &PlanetaryGrid, footprint: &str, tile_size: TileSize) -> Result<Vec<RectOutput>> {
    let crs_grid = grid
        .as_crs()
        .ok_or_else(|| anyhow!("data slices need a CRS grid"))?;
    let polygon = parse_polygon(footprint)?;
    let rects = crs_grid.data_slice_rectangles(&polygon, tile_size)?;
    Ok(rects.into_iter().map(RectOutput::from).collect())
}

pub fn region(grid: &PlanetaryGrid, roi: Option<&str>) -> Result<RectOutput> {
    let roi = roi.map(parse_polygon).transpose()?;
    Ok(compute_raster_sub_region(grid, roi.as_ref()).into())
}

fn parse_polygon(text: &str) -> Result<Polygon<f64>> {
    polygon_from_wkt(text).map_err(|e| anyhow!("invalid footprint: {}", e))
}
