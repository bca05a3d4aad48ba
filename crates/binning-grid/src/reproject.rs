//! Nearest-neighbour reprojection of products onto a CRS grid.
//!
//! The source index of every target pixel is computed once (in parallel over
//! rows) and then applied to each band, so the geocodings are evaluated only
//! once per product regardless of the band count.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use mosaic_common::{GridError, GridResult, PixelPos};

use crate::crs_grid::CrsGrid;
use crate::geocoding::GeoCoding;
use crate::product::{Band, Product};

/// Source sample index per target pixel; `None` where the target pixel has no source.
pub type IndexMap = Vec<Option<usize>>;

impl CrsGrid {
    /// Resample every band of `source` onto this grid.
    ///
    /// Target pixels without a source sample, or whose source sample is
    /// no-data, receive the band's fill value.
    pub fn reproject_to_grid(&self, source: &Product) -> GridResult<Product> {
        let target = self.grid_product()?;
        reproject(source, target)
    }
}

/// Resample `source` onto the raster and geocoding of `target`.
pub fn reproject(source: &Product, mut target: Product) -> GridResult<Product> {
    let source_gc = source.geo_coding.as_ref().ok_or_else(|| {
        GridError::invalid_parameter(
            "source",
            format!("product '{}' has no geocoding", source.name),
        )
    })?;
    let target_gc = target.geo_coding.as_ref().ok_or_else(|| {
        GridError::invalid_parameter(
            "target",
            format!("product '{}' has no geocoding", target.name),
        )
    })?;

    let index_map = compute_index_map(
        source_gc,
        source.width,
        source.height,
        target_gc,
        target.width,
        target.height,
    );
    let mapped = index_map.iter().filter(|i| i.is_some()).count();
    if mapped == 0 {
        warn!(
            source = %source.name,
            "Source product does not overlap the target grid"
        );
    }
    debug!(
        source = %source.name,
        width = target.width,
        height = target.height,
        mapped,
        bands = source.bands.len(),
        "Reprojecting product"
    );

    for band in &source.bands {
        let resampled = resample_band(band, &index_map);
        target.add_band(resampled)?;
    }

    target.start_time = source.start_time;
    target.end_time = source.end_time;
    target.preferred_tile_size = source.preferred_tile_size;
    Ok(target)
}

/// For every target pixel centre, find the source pixel containing it.
pub fn compute_index_map(
    source_gc: &Arc<dyn GeoCoding>,
    source_width: usize,
    source_height: usize,
    target_gc: &Arc<dyn GeoCoding>,
    target_width: usize,
    target_height: usize,
) -> IndexMap {
    let mut map = vec![None; target_width * target_height];
    if target_width == 0 {
        return map;
    }

    map.par_chunks_mut(target_width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, slot) in row.iter_mut().enumerate() {
                let geo = target_gc.pixel_to_geo(PixelPos::new(x as f64 + 0.5, y as f64 + 0.5));
                if !geo.is_valid() {
                    continue;
                }
                let pixel = source_gc.geo_to_pixel(geo);
                if !pixel.is_valid() {
                    continue;
                }
                let sx = pixel.x.floor();
                let sy = pixel.y.floor();
                if sx >= 0.0
                    && sy >= 0.0
                    && sx < source_width as f64
                    && sy < source_height as f64
                {
                    *slot = Some(sy as usize * source_width + sx as usize);
                }
            }
        });

    map
}

fn resample_band(band: &Band, index_map: &IndexMap) -> Band {
    let fill = band.fill_value();
    let data = index_map
        .par_iter()
        .map(|index| match index.and_then(|i| band.data.get(i).copied()) {
            Some(v) if !band.is_no_data(v) => v,
            _ => fill,
        })
        .collect();
    Band {
        name: band.name.clone(),
        data,
        no_data_value: band.no_data_value,
    }
}
