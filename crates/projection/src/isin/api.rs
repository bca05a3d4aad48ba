//! MODIS-style tiled ISIN raster: global map, global pixel and tile image coordinates.
//!
//! The world is covered by 36 × 18 square tiles. Tile image coordinates use
//! the pixel-centre convention, so the upper-left corner of a tile is (-0.5, -0.5).

use std::sync::Arc;

use super::row_table::RowTable;
use super::transform::{IsinForward, IsinInverse};
use crate::error::ProjectionError;

/// Sphere radius used by the MODIS land ISIN grids (metres).
pub const MODIS_SPHERE: f64 = 6371007.181;
/// Number of tile columns around the globe.
pub const NUM_TILES_HORIZONTAL: i32 = 36;
/// Number of tile rows from pole to pole.
pub const NUM_TILES_VERTICAL: i32 = 18;

/// Supported ISIN raster resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Raster {
    /// 1200 × 1200 pixels per tile
    Grid1Km,
    /// 2400 × 2400 pixels per tile
    Grid500M,
    /// 4800 × 4800 pixels per tile
    Grid250M,
}

impl Raster {
    /// Pixels along one edge of a tile.
    pub fn tile_size(&self) -> i32 {
        match self {
            Raster::Grid1Km => 1200,
            Raster::Grid500M => 2400,
            Raster::Grid250M => 4800,
        }
    }

    /// Total number of pixel rows (and ISIN zones) from pole to pole.
    pub fn num_rows(&self) -> i32 {
        NUM_TILES_VERTICAL * self.tile_size()
    }

    /// Resolution with the given global row count, if supported.
    pub fn from_num_rows(num_rows: i32) -> Option<Self> {
        [Raster::Grid1Km, Raster::Grid500M, Raster::Grid250M]
            .into_iter()
            .find(|r| r.num_rows() == num_rows)
    }
}

/// Image position within a tile, together with the tile's column and line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsinPoint {
    pub x: f64,
    pub y: f64,
    /// Horizontal tile index, [0, 35]
    pub tile_col: i32,
    /// Vertical tile index, [0, 17]
    pub tile_line: i32,
}

impl IsinPoint {
    pub fn new(x: f64, y: f64, tile_col: i32, tile_line: i32) -> Self {
        Self {
            x,
            y,
            tile_col,
            tile_line,
        }
    }
}

/// Parameters the ISIN transforms were initialised with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IsinParameters {
    pub sphere: f64,
    pub lon_cen_mer: f64,
    pub false_east: f64,
    pub false_north: f64,
    pub nzone: i64,
    pub ijustify: i32,
}

/// Façade over the forward and inverse transforms for one raster resolution.
#[derive(Debug, Clone)]
pub struct IsinApi {
    raster: Raster,
    table: Arc<RowTable>,
    forward: IsinForward,
    inverse: IsinInverse,
}

impl IsinApi {
    pub fn new(raster: Raster) -> Result<Self, ProjectionError> {
        let table = Arc::new(RowTable::new(
            MODIS_SPHERE,
            0.0,
            0.0,
            0.0,
            raster.num_rows() as f64,
            1.0,
        )?);
        Ok(Self {
            raster,
            forward: IsinForward::from_table(Arc::clone(&table)),
            inverse: IsinInverse::from_table(Arc::clone(&table)),
            table,
        })
    }

    pub fn raster(&self) -> Raster {
        self.raster
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    pub fn tile_size(&self) -> i32 {
        self.raster.tile_size()
    }

    /// Tile width and height in pixels.
    pub fn tile_dimensions(&self) -> (i32, i32) {
        (self.tile_size(), self.tile_size())
    }

    pub fn projection_param(&self) -> IsinParameters {
        let t = &*self.table;
        IsinParameters {
            sphere: t.sphere,
            lon_cen_mer: t.lon_cen_mer,
            false_east: t.false_east,
            false_north: t.false_north,
            nzone: t.nrow,
            ijustify: t.ijustify,
        }
    }

    /// Longitude/latitude in degrees to global ISIN map coordinates in metres.
    pub fn to_global_map(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        self.forward.transform(lon.to_radians(), lat.to_radians())
    }

    /// Global ISIN map metres to longitude/latitude in degrees.
    pub fn global_map_to_geo(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let (lon, lat) = self.inverse.transform(x, y)?;
        Ok((lon.to_degrees(), lat.to_degrees()))
    }

    /// Unshifted global raster coordinates: (0, 0) is the upper-left corner
    /// of the whole tiled raster, one unit per pixel.
    pub fn to_global_pixel(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        let (x, y) = self.to_global_map(lon, lat)?;
        let t = &*self.table;
        let gx = t.nrow as f64 + (x - t.false_east) * t.col_dist_inv;
        let gy = t.nrow_half as f64 - (y - t.false_north) * t.col_dist_inv;
        Ok((gx, gy))
    }

    /// Longitude/latitude in degrees to pixel-centre image coordinates of the containing tile.
    pub fn to_tile_image_coordinates(&self, lon: f64, lat: f64) -> Result<IsinPoint, ProjectionError> {
        let (gx, gy) = self.to_global_pixel(lon, lat)?;
        let ts = self.tile_size() as f64;
        let tile_col = (gx / ts).floor();
        let tile_line = (gy / ts).floor();
        Ok(IsinPoint::new(
            gx - tile_col * ts - 0.5,
            gy - tile_line * ts - 0.5,
            tile_col as i32,
            tile_line as i32,
        ))
    }

    /// Pixel-centre image coordinates of a tile back to longitude/latitude in degrees.
    pub fn tile_image_coordinates_to_geo(
        &self,
        x: f64,
        y: f64,
        tile_col: i32,
        tile_line: i32,
    ) -> Result<(f64, f64), ProjectionError> {
        let ts = self.tile_size() as f64;
        let gx = x + 0.5 + tile_col as f64 * ts;
        let gy = y + 0.5 + tile_line as f64 * ts;

        let t = &*self.table;
        let map_x = t.false_east + (gx - t.nrow as f64) * t.col_dist;
        let map_y = t.false_north + (t.nrow_half as f64 - gy) * t.col_dist;
        self.global_map_to_geo(map_x, map_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_sizes() {
        assert_eq!(Raster::Grid1Km.tile_size(), 1200);
        assert_eq!(Raster::Grid500M.num_rows(), 43200);
        assert_eq!(Raster::from_num_rows(86400), Some(Raster::Grid250M));
        assert_eq!(Raster::from_num_rows(21599), None);
    }

    #[test]
    fn test_projection_param() {
        let api = IsinApi::new(Raster::Grid500M).unwrap();
        let params = api.projection_param();
        assert_eq!(params.sphere, MODIS_SPHERE);
        assert_eq!(params.nzone, 43200);
        assert_eq!(params.ijustify, 1);
        assert_eq!(api.tile_dimensions(), (2400, 2400));
    }

    #[test]
    fn test_front_pole_is_tile_corner() {
        let api = IsinApi::new(Raster::Grid1Km).unwrap();
        let p = api.to_tile_image_coordinates(0.0, 0.0).unwrap();
        assert!((p.x + 0.5).abs() < 1e-9);
        assert!((p.y + 0.5).abs() < 1e-9);
        assert_eq!((p.tile_col, p.tile_line), (18, 9));
    }

    #[test]
    fn test_global_pixel_of_origin() {
        let api = IsinApi::new(Raster::Grid250M).unwrap();
        let (gx, gy) = api.to_global_pixel(0.0, 0.0).unwrap();
        assert!((gx - 86400.0).abs() < 1e-9);
        assert!((gy - 43200.0).abs() < 1e-9);
    }

    #[test]
    fn test_tile_image_round_trip() {
        let api = IsinApi::new(Raster::Grid1Km).unwrap();
        let p = api.to_tile_image_coordinates(9.993682, 53.551086).unwrap();
        let (lon, lat) = api
            .tile_image_coordinates_to_geo(p.x, p.y, p.tile_col, p.tile_line)
            .unwrap();
        assert!((lon - 9.993682).abs() < 1e-9);
        assert!((lat - 53.551086).abs() < 1e-9);
    }
}
