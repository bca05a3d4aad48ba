//! Planning of tile-aligned data slices of a CRS grid covered by a source footprint.
//!
//! ```text
//! footprint (lon/lat) ──► image geometry (grid pixels, clipped)
//!                               │
//!                               ├─► bounds (0.01 px snap margin)
//!                               │
//!                               └─► tiles of the aligned bounds
//!                                     intersecting with positive area
//!                                           │
//!                                           ▼
//!                                    bounds ∩ tile rectangles
//! ```

use geo::{Area, BooleanOps, BoundingRect, Coord, LineString, MultiPolygon, Polygon, Rect};
use tracing::{debug, warn};

use mosaic_common::{GeoPos, GridError, GridResult, PixelRect, TileSize};

use crate::crs_grid::CrsGrid;
use crate::geocoding::{CrsGeoCoding, GeoCoding};
use crate::grid::MosaickingGrid;

/// Snap margin in pixels applied to geometry envelopes.
pub const BORDER_SNAP_MARGIN: f64 = 0.01;

/// Longest footprint edge, in degrees, kept straight before projecting.
const MAX_SEGMENT_DEGREES: f64 = 1.0;

impl CrsGrid {
    /// Transform a lon/lat footprint into grid pixel space, clipped to the
    /// raster and to the target polygon when the grid has one.
    ///
    /// Returns `None` when nothing of the footprint falls on the grid.
    pub fn image_geometry(&self, footprint: &Polygon<f64>) -> GridResult<Option<MultiPolygon<f64>>> {
        let gc = self.geo_coding()?;

        let footprint = if self.crs().is_geographic() {
            footprint.clone()
        } else {
            densify(footprint, MAX_SEGMENT_DEGREES)
        };

        let pixels = match footprint_to_pixels(&gc, &footprint) {
            Some(p) => p,
            None => {
                warn!(crs = %self.crs(), "Footprint cannot be mapped onto the grid");
                return Ok(None);
            }
        };

        let raster = Rect::new(
            Coord { x: 0.0, y: 0.0 },
            Coord {
                x: self.num_cols(0) as f64,
                y: self.num_rows() as f64,
            },
        )
        .to_polygon();
        let mut clipped = pixels.intersection(&raster);

        if let Some(target) = self.target_polygon() {
            let target_pixels = target_to_pixels(&gc, target);
            clipped = clipped.intersection(&MultiPolygon::new(vec![target_pixels]));
        }

        if clipped.0.is_empty() || clipped.unsigned_area() <= 0.0 {
            return Ok(None);
        }
        Ok(Some(clipped))
    }

    /// Integer envelope of a pixel geometry. Edges within 0.01 px of a pixel
    /// border snap to it; otherwise partially covered pixels are included.
    pub fn bounds(&self, geometry: &MultiPolygon<f64>) -> PixelRect {
        pixel_bounds(geometry)
    }

    /// Geocoding of a sub-region of the grid raster.
    pub fn geo_coding_for_region(&self, region: &PixelRect) -> GridResult<CrsGeoCoding> {
        if region.is_empty() {
            return Err(GridError::invalid_parameter(
                "region",
                format!("empty region {}", region),
            ));
        }
        let raster = PixelRect::new(0, 0, self.num_cols(0), self.num_rows());
        if raster.intersection(region) != *region {
            return Err(GridError::out_of_bounds(format!(
                "region {} exceeds the grid raster {}",
                region, raster
            )));
        }
        self.geo_coding()?.subset(region)
    }

    /// Rectangles of the grid covered by a footprint, one per tile of the
    /// tile grid that the footprint overlaps with positive area.
    pub fn data_slice_rectangles(
        &self,
        footprint: &Polygon<f64>,
        tile_size: TileSize,
    ) -> GridResult<Vec<PixelRect>> {
        if tile_size.width <= 0 || tile_size.height <= 0 {
            return Err(GridError::invalid_parameter(
                "tile_size",
                format!("must be positive, got {}x{}", tile_size.width, tile_size.height),
            ));
        }

        let image = match self.image_geometry(footprint)? {
            Some(g) => g,
            None => return Ok(Vec::new()),
        };

        let bounds = pixel_bounds(&image);
        let aligned = align_to_tile_grid(&bounds, tile_size);
        let x_start = aligned.x / tile_size.width;
        let y_start = aligned.y / tile_size.height;
        let tiles_x = aligned.width / tile_size.width;
        let tiles_y = aligned.height / tile_size.height;

        let mut rectangles = Vec::new();
        for ty in y_start..y_start + tiles_y {
            for tx in x_start..x_start + tiles_x {
                let tile = PixelRect::new(
                    tx * tile_size.width,
                    ty * tile_size.height,
                    tile_size.width,
                    tile_size.height,
                );
                let overlap = image.intersection(&MultiPolygon::new(vec![rect_polygon(&tile)]));
                if overlap.unsigned_area() > 0.0 {
                    let slice = bounds.intersection(&tile);
                    if !slice.is_empty() {
                        rectangles.push(slice);
                    }
                }
            }
        }

        debug!(
            ?bounds,
            ?aligned,
            slices = rectangles.len(),
            "Planned data slices"
        );
        Ok(rectangles)
    }
}

/// Integer envelope with the border snap margin.
pub fn pixel_bounds(geometry: &MultiPolygon<f64>) -> PixelRect {
    let rect = match geometry.bounding_rect() {
        Some(r) => r,
        None => return PixelRect::new(0, 0, 0, 0),
    };
    let min_x = (rect.min().x + BORDER_SNAP_MARGIN).floor() as i32;
    let min_y = (rect.min().y + BORDER_SNAP_MARGIN).floor() as i32;
    let max_x = (rect.max().x - BORDER_SNAP_MARGIN).ceil() as i32;
    let max_y = (rect.max().y - BORDER_SNAP_MARGIN).ceil() as i32;
    PixelRect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// Grow a rectangle outward to whole tiles of the tile grid anchored at (0, 0).
pub fn align_to_tile_grid(rect: &PixelRect, tile_size: TileSize) -> PixelRect {
    let x0 = rect.x.div_euclid(tile_size.width) * tile_size.width;
    let y0 = rect.y.div_euclid(tile_size.height) * tile_size.height;
    let x1 = ceil_to_multiple(rect.max_x(), tile_size.width);
    let y1 = ceil_to_multiple(rect.max_y(), tile_size.height);
    PixelRect::new(x0, y0, x1 - x0, y1 - y0)
}

fn ceil_to_multiple(value: i32, step: i32) -> i32 {
    -(-value).div_euclid(step) * step
}

fn rect_polygon(rect: &PixelRect) -> Polygon<f64> {
    Rect::new(
        Coord {
            x: rect.x as f64,
            y: rect.y as f64,
        },
        Coord {
            x: rect.max_x() as f64,
            y: rect.max_y() as f64,
        },
    )
    .to_polygon()
}

/// Insert vertices so that no edge spans more than `max_step` degrees.
fn densify(polygon: &Polygon<f64>, max_step: f64) -> Polygon<f64> {
    let densify_ring = |ring: &LineString<f64>| -> LineString<f64> {
        let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
        for segment in ring.lines() {
            let span = (segment.end.x - segment.start.x)
                .abs()
                .max((segment.end.y - segment.start.y).abs());
            let steps = (span / max_step).ceil().max(1.0) as usize;
            for i in 0..steps {
                let t = i as f64 / steps as f64;
                coords.push(Coord {
                    x: segment.start.x + t * (segment.end.x - segment.start.x),
                    y: segment.start.y + t * (segment.end.y - segment.start.y),
                });
            }
        }
        if let Some(&first) = coords.first() {
            coords.push(first);
        }
        LineString::from(coords)
    };

    Polygon::new(
        densify_ring(polygon.exterior()),
        polygon.interiors().iter().map(densify_ring).collect(),
    )
}

fn ring_to_pixels(gc: &CrsGeoCoding, ring: &LineString<f64>) -> Option<LineString<f64>> {
    let mut coords: Vec<Coord<f64>> = Vec::with_capacity(ring.0.len());
    let mut dropped = 0usize;
    for c in ring.coords() {
        let p = gc.geo_to_pixel(GeoPos::new(c.y, c.x));
        if p.is_valid() {
            coords.push(Coord { x: p.x, y: p.y });
        } else {
            dropped += 1;
        }
    }
    if dropped > 0 {
        warn!(dropped, "Footprint vertices outside the grid projection were skipped");
    }
    if coords.len() > 1 && coords.first() == coords.last() {
        coords.pop();
    }
    if coords.len() < 3 {
        return None;
    }
    let mut ring = LineString::from(coords);
    ring.close();
    Some(ring)
}

fn footprint_to_pixels(gc: &CrsGeoCoding, footprint: &Polygon<f64>) -> Option<Polygon<f64>> {
    let exterior = ring_to_pixels(gc, footprint.exterior())?;
    let interiors = footprint
        .interiors()
        .iter()
        .filter_map(|ring| ring_to_pixels(gc, ring))
        .collect();
    Some(Polygon::new(exterior, interiors))
}

fn target_to_pixels(gc: &CrsGeoCoding, target: &Polygon<f64>) -> Polygon<f64> {
    let to_pixels = |ring: &LineString<f64>| -> LineString<f64> {
        ring.coords()
            .map(|c| {
                let p = gc.crs_to_pixel(c.x, c.y);
                Coord { x: p.x, y: p.y }
            })
            .collect()
    };
    Polygon::new(
        to_pixels(target.exterior()),
        target.interiors().iter().map(to_pixels).collect(),
    )
}
