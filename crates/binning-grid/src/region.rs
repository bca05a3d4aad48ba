//! Equirectangular output raster regions and the bins behind each raster line.

use geo::{BoundingRect, Polygon};

use mosaic_common::PixelRect;

use crate::grid::{BinIndex, MosaickingGrid, PlanetaryGrid, INVALID_BIN_INDEX};

/// Width of the output raster: the widest row of the grid.
pub fn raster_width<G: MosaickingGrid + ?Sized>(grid: &G) -> i32 {
    (0..grid.num_rows())
        .map(|row| grid.num_cols(row))
        .max()
        .unwrap_or(0)
}

/// Pixel size in degrees of the equirectangular raster rendered from `grid`.
pub fn raster_pixel_size<G: MosaickingGrid + ?Sized>(grid: &G) -> f64 {
    180.0 / grid.num_rows() as f64
}

/// Region of the output raster covering `roi`, the whole raster when `roi` is `None`.
pub fn compute_raster_sub_region(grid: &PlanetaryGrid, roi: Option<&Polygon<f64>>) -> PixelRect {
    let width = raster_width(grid);
    let height = grid.num_rows();
    let full = PixelRect::new(0, 0, width, height);

    let rect = match roi.and_then(|r| r.bounding_rect()) {
        Some(r) => r,
        None => return full,
    };

    match grid {
        PlanetaryGrid::Crs(_) => {
            let corners = [
                (rect.min().x, rect.min().y),
                (rect.max().x, rect.min().y),
                (rect.max().x, rect.max().y),
                (rect.min().x, rect.max().y),
            ];
            let mut gx = (width, 0);
            let mut gy = (height, 0);
            let mut found = false;
            for (lon, lat) in corners {
                let bin = grid.bin_index(lat, lon);
                if bin == INVALID_BIN_INDEX {
                    continue;
                }
                let row = grid.row_index(bin);
                let col = (bin - grid.first_bin_index(row)) as i32;
                gx = (gx.0.min(col), gx.1.max(col));
                gy = (gy.0.min(row), gy.1.max(row));
                found = true;
            }
            if !found {
                return PixelRect::new(0, 0, 0, 0);
            }
            PixelRect::new(gx.0, gy.0, gx.1 - gx.0 + 1, gy.1 - gy.0 + 1).intersection(&full)
        }
        PlanetaryGrid::TiledSinusoidal(_) => {
            let p = raster_pixel_size(grid);
            let x = ((180.0 + rect.min().x) / p).floor() as i32;
            let y = ((90.0 - rect.max().y) / p).floor() as i32;
            let w = ((rect.max().x - rect.min().x) / p).ceil() as i32;
            let h = ((rect.max().y - rect.min().y) / p).ceil() as i32;
            PixelRect::new(x, y, w, h).intersection(&full)
        }
    }
}

/// Bins of raster line `y` from `x1` to `x2` inclusive when raster pixels are grid cells.
pub fn mosaicking_line_bin_indices<G: MosaickingGrid + ?Sized>(
    grid: &G,
    y: i32,
    x1: i32,
    x2: i32,
) -> Vec<BinIndex> {
    let width = grid.num_cols(0) as i64;
    (x1..=x2).map(|x| x as i64 + y as i64 * width).collect()
}

/// Bins of raster line `y` from `x1` to `x2` inclusive, looked up at the
/// pixel centres of a global 2:1 equirectangular raster.
pub fn binning_line_bin_indices<G: MosaickingGrid + ?Sized>(
    grid: &G,
    y: i32,
    x1: i32,
    x2: i32,
) -> Vec<BinIndex> {
    let height = grid.num_rows() as f64;
    let width = 2.0 * height;
    let lat = 90.0 - (y as f64 + 0.5) * 180.0 / height;
    (x1..=x2)
        .map(|x| {
            let lon = -180.0 + (x as f64 + 0.5) * 360.0 / width;
            grid.bin_index(lat, lon)
        })
        .collect()
}

/// Bins behind a raster line, picking the lookup that matches the grid engine.
pub fn line_bin_indices(grid: &PlanetaryGrid, y: i32, x1: i32, x2: i32) -> Vec<BinIndex> {
    match grid {
        PlanetaryGrid::Crs(_) => mosaicking_line_bin_indices(grid, y, x1, x2),
        PlanetaryGrid::TiledSinusoidal(_) => binning_line_bin_indices(grid, y, x1, x2),
    }
}
