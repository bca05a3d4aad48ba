//! Regular raster grid in an arbitrary EPSG coordinate reference system.
//!
//! Bins are numbered row-major, `row·num_cols + col`, so every row is a
//! contiguous index range.

use std::f64::consts::PI;
use std::sync::{Arc, OnceLock};

use geo::{LineString, Polygon};
use tracing::debug;

use mosaic_common::{BoundingBox, CrsSpec, GeoPos, GridError, GridResult, PixelPos};
use projection::CrsDefinition;

use crate::geocoding::{CrsGeoCoding, GeoCoding};
use crate::grid::{BinIndex, MosaickingGrid, INVALID_BIN_INDEX};
use crate::product::Product;

#[derive(Debug)]
pub struct CrsGrid {
    crs: CrsDefinition,
    spec: CrsSpec,
    /// Pixel height in CRS units
    pixel_size: f64,
    /// Pixel width in CRS units
    pixel_size_x: f64,
    num_rows: i32,
    num_cols: i32,
    /// CRS x of the left raster edge
    easting: f64,
    /// CRS y of the top raster edge
    northing: f64,
    target_polygon: Option<Polygon<f64>>,
    geo_coding: OnceLock<Arc<CrsGeoCoding>>,
}

impl CrsGrid {
    /// Grid covering the whole CRS envelope with `num_rows_global` rows per
    /// half meridian: pixels are 180/n degrees, or b·π/n metres with b the
    /// semi-minor axis.
    pub fn new(num_rows_global: i32, spec: CrsSpec) -> GridResult<Self> {
        if num_rows_global <= 0 {
            return Err(GridError::invalid_parameter(
                "num_rows",
                format!("must be > 0, got {}", num_rows_global),
            ));
        }
        let crs = CrsDefinition::from_epsg(spec.epsg)?;
        let target_polygon = parse_target_polygon(&spec)?;

        let pixel_size = if crs.is_geographic() {
            180.0 / num_rows_global as f64
        } else {
            crs.ellipsoid.semi_minor * PI / num_rows_global as f64
        };
        let pixel_size_x = pixel_size / spec.ratio;

        let envelope = crs.envelope;
        let num_cols = (envelope.width() / pixel_size_x) as i32;
        let num_rows = (envelope.height() / pixel_size) as i32;

        debug!(
            crs = %crs,
            ?envelope,
            pixel_size,
            pixel_size_x,
            num_cols,
            num_rows,
            "Created CRS grid from global row count"
        );

        Self::build(
            crs,
            spec,
            pixel_size,
            pixel_size_x,
            num_cols,
            num_rows,
            envelope.min_x,
            envelope.max_y,
            target_polygon,
        )
    }

    /// Grid with an explicit pixel height in CRS units, covering the target
    /// polygon when one is given and the CRS envelope otherwise. The extent
    /// is snapped outward to whole pixels.
    pub fn with_pixel_size(pixel_size: f64, spec: CrsSpec) -> GridResult<Self> {
        if !pixel_size.is_finite() || pixel_size <= 0.0 {
            return Err(GridError::invalid_parameter(
                "pixel_size",
                format!("must be a positive number, got {}", pixel_size),
            ));
        }
        let crs = CrsDefinition::from_epsg(spec.epsg)?;
        let target_polygon = parse_target_polygon(&spec)?;

        let pixel_size_x = if target_polygon.is_some() {
            pixel_size
        } else {
            pixel_size / spec.ratio
        };

        let extent = match &target_polygon {
            Some(polygon) => polygon_envelope(polygon)?,
            None => crs.envelope,
        };
        let snapped = BoundingBox::new(
            (extent.min_x / pixel_size_x).floor() * pixel_size_x,
            (extent.min_y / pixel_size).floor() * pixel_size,
            (extent.max_x / pixel_size_x).ceil() * pixel_size_x,
            (extent.max_y / pixel_size).ceil() * pixel_size,
        );

        let num_cols = (snapped.width() / pixel_size_x).round() as i32;
        let num_rows = (snapped.height() / pixel_size).round() as i32;

        debug!(
            crs = %crs,
            ?extent,
            ?snapped,
            pixel_size,
            pixel_size_x,
            num_cols,
            num_rows,
            "Created CRS grid from pixel size"
        );

        Self::build(
            crs,
            spec,
            pixel_size,
            pixel_size_x,
            num_cols,
            num_rows,
            snapped.min_x,
            snapped.max_y,
            target_polygon,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        crs: CrsDefinition,
        spec: CrsSpec,
        pixel_size: f64,
        pixel_size_x: f64,
        num_cols: i32,
        num_rows: i32,
        easting: f64,
        northing: f64,
        target_polygon: Option<Polygon<f64>>,
    ) -> GridResult<Self> {
        if num_cols < 1 || num_rows < 1 {
            return Err(GridError::invalid_parameter(
                "pixel_size",
                format!(
                    "grid for {} would be {}x{} pixels",
                    spec, num_cols, num_rows
                ),
            ));
        }
        Ok(Self {
            crs,
            spec,
            pixel_size,
            pixel_size_x,
            num_rows,
            num_cols,
            easting,
            northing,
            target_polygon,
            geo_coding: OnceLock::new(),
        })
    }

    pub fn crs(&self) -> &CrsDefinition {
        &self.crs
    }

    pub fn spec(&self) -> &CrsSpec {
        &self.spec
    }

    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    pub fn pixel_size_x(&self) -> f64 {
        self.pixel_size_x
    }

    pub fn easting(&self) -> f64 {
        self.easting
    }

    pub fn northing(&self) -> f64 {
        self.northing
    }

    pub fn target_polygon(&self) -> Option<&Polygon<f64>> {
        self.target_polygon.as_ref()
    }

    /// Extent of the raster in CRS coordinates.
    pub fn envelope(&self) -> BoundingBox {
        BoundingBox::new(
            self.easting,
            self.northing - self.num_rows as f64 * self.pixel_size,
            self.easting + self.num_cols as f64 * self.pixel_size_x,
            self.northing,
        )
    }

    /// The shared geocoding of the whole grid raster, built on first use.
    pub fn geo_coding(&self) -> GridResult<Arc<CrsGeoCoding>> {
        if let Some(gc) = self.geo_coding.get() {
            return Ok(Arc::clone(gc));
        }
        let gc = Arc::new(CrsGeoCoding::new(
            self.crs.clone(),
            self.num_cols,
            self.num_rows,
            self.easting,
            self.northing,
            self.pixel_size_x,
            self.pixel_size,
        )?);
        Ok(Arc::clone(self.geo_coding.get_or_init(|| gc)))
    }

    /// Column and row of a bin, `None` for indices outside the raster.
    pub fn bin_to_col_row(&self, bin: BinIndex) -> Option<(i32, i32)> {
        if bin < 0 || bin >= self.num_bins() {
            return None;
        }
        let cols = self.num_cols as i64;
        Some(((bin % cols) as i32, (bin / cols) as i32))
    }

    /// Geographic centre of a bin.
    pub fn center_pos(&self, bin: BinIndex) -> GeoPos {
        let (col, row) = match self.bin_to_col_row(bin) {
            Some(cr) => cr,
            None => return GeoPos::invalid(),
        };
        match self.geo_coding() {
            Ok(gc) => gc.pixel_to_geo(PixelPos::new(col as f64 + 0.5, row as f64 + 0.5)),
            Err(_) => GeoPos::invalid(),
        }
    }

    /// Empty product spanning the grid raster and carrying its geocoding.
    pub fn grid_product(&self) -> GridResult<Product> {
        let gc: Arc<dyn GeoCoding> = self.geo_coding()?;
        Ok(Product::new("mosaic_grid", self.num_cols as usize, self.num_rows as usize)
            .with_geo_coding(gc))
    }
}

/// Build a polygon from WKT `POLYGON` text.
pub fn polygon_from_wkt(text: &str) -> GridResult<Polygon<f64>> {
    let mut rings = mosaic_common::wkt::parse_polygon(text)?
        .into_iter()
        .map(LineString::from);
    let exterior = rings
        .next()
        .ok_or_else(|| GridError::invalid_parameter("wkt", "polygon has no rings"))?;
    Ok(Polygon::new(exterior, rings.collect()))
}

fn parse_target_polygon(spec: &CrsSpec) -> GridResult<Option<Polygon<f64>>> {
    let wkt = match &spec.polygon_wkt {
        Some(wkt) => wkt,
        None => return Ok(None),
    };
    let polygon = polygon_from_wkt(wkt).map_err(|e| {
        GridError::invalid_parameter("crs", format!("invalid target polygon '{}': {}", wkt, e))
    })?;
    Ok(Some(polygon))
}

/// Cell containing a pixel coordinate. The far raster edge belongs to the
/// last cell, so the south pole and lon 180 stay on a global grid.
fn cell_index(coord: f64, count: i32) -> Option<i64> {
    if coord < 0.0 || coord > count as f64 {
        return None;
    }
    Some((coord as i64).min(count as i64 - 1))
}

fn polygon_envelope(polygon: &Polygon<f64>) -> GridResult<BoundingBox> {
    BoundingBox::from_points(polygon.exterior().coords().map(|c| (c.x, c.y)))
        .filter(|b| b.width() > 0.0 && b.height() > 0.0)
        .ok_or_else(|| GridError::invalid_parameter("crs", "target polygon has an empty extent"))
}

impl MosaickingGrid for CrsGrid {
    fn bin_index(&self, lat: f64, lon: f64) -> BinIndex {
        let gc = match self.geo_coding() {
            Ok(gc) => gc,
            Err(_) => return INVALID_BIN_INDEX,
        };
        let pixel = gc.geo_to_pixel(GeoPos::new(lat, lon));
        if !pixel.is_valid() {
            return INVALID_BIN_INDEX;
        }
        match (cell_index(pixel.x, self.num_cols), cell_index(pixel.y, self.num_rows)) {
            (Some(x), Some(y)) => y * self.num_cols as i64 + x,
            _ => INVALID_BIN_INDEX,
        }
    }

    fn row_index(&self, bin: BinIndex) -> i32 {
        self.bin_to_col_row(bin).map(|(_, row)| row).unwrap_or(-1)
    }

    fn num_bins(&self) -> i64 {
        self.num_cols as i64 * self.num_rows as i64
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
        row as i64 * self.num_cols as i64
    }

    fn center_lat(&self, row: i32) -> f64 {
        match self.geo_coding() {
            Ok(gc) => gc.pixel_to_geo(PixelPos::new(0.5, row as f64 + 0.5)).lat,
            Err(_) => f64::NAN,
        }
    }

    fn center_lat_lon(&self, bin: BinIndex) -> [f64; 2] {
        let pos = self.center_pos(bin);
        [pos.lat, pos.lon]
    }
}
