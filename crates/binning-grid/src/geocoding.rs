//! Pixel ↔ geographic mappings attached to rasters.

use std::fmt::Debug;

use mosaic_common::{GeoPos, GridResult, PixelPos, PixelRect};
use projection::{AffineTransform, CrsDefinition};

/// Maps raster pixel positions to geographic positions and back.
///
/// Unmappable positions yield `PixelPos::invalid()` / `GeoPos::invalid()`.
pub trait GeoCoding: Send + Sync + Debug {
    fn geo_to_pixel(&self, geo: GeoPos) -> PixelPos;

    fn pixel_to_geo(&self, pixel: PixelPos) -> GeoPos;
}

/// Geocoding of a north-up raster in a map CRS.
///
/// Pixel (0, 0) is the upper-left corner of the upper-left pixel; pixel
/// centres sit at half-integer positions.
#[derive(Debug, Clone)]
pub struct CrsGeoCoding {
    crs: CrsDefinition,
    width: i32,
    height: i32,
    image_to_map: AffineTransform,
    map_to_image: AffineTransform,
}

impl CrsGeoCoding {
    pub fn new(
        crs: CrsDefinition,
        width: i32,
        height: i32,
        easting: f64,
        northing: f64,
        pixel_size_x: f64,
        pixel_size_y: f64,
    ) -> GridResult<Self> {
        let image_to_map = AffineTransform::north_up(easting, northing, pixel_size_x, pixel_size_y);
        let map_to_image = image_to_map.inverse()?;
        Ok(Self {
            crs,
            width,
            height,
            image_to_map,
            map_to_image,
        })
    }

    pub fn crs(&self) -> &CrsDefinition {
        &self.crs
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn image_to_map(&self) -> &AffineTransform {
        &self.image_to_map
    }

    pub fn map_to_image(&self) -> &AffineTransform {
        &self.map_to_image
    }

    /// Geocoding of a sub-raster of this one.
    pub fn subset(&self, region: &PixelRect) -> GridResult<Self> {
        let (easting, northing) = self.image_to_map.transform(region.x as f64, region.y as f64);
        let (psx, neg_psy) = self.image_to_map.scale();
        Self::new(
            self.crs.clone(),
            region.width,
            region.height,
            easting,
            northing,
            psx,
            -neg_psy,
        )
    }

    pub fn crs_to_pixel(&self, x: f64, y: f64) -> PixelPos {
        let (px, py) = self.map_to_image.transform(x, y);
        PixelPos::new(px, py)
    }

    pub fn pixel_to_crs(&self, pixel: PixelPos) -> (f64, f64) {
        self.image_to_map.transform(pixel.x, pixel.y)
    }
}

impl GeoCoding for CrsGeoCoding {
    fn geo_to_pixel(&self, geo: GeoPos) -> PixelPos {
        match self.crs.project(geo.lon, geo.lat) {
            Some((x, y)) => self.crs_to_pixel(x, y),
            None => PixelPos::invalid(),
        }
    }

    fn pixel_to_geo(&self, pixel: PixelPos) -> GeoPos {
        if !pixel.is_valid() {
            return GeoPos::invalid();
        }
        let (x, y) = self.pixel_to_crs(pixel);
        match self.crs.unproject(x, y) {
            Some((lon, lat)) => GeoPos::new(lat, lon),
            None => GeoPos::invalid(),
        }
    }
}
