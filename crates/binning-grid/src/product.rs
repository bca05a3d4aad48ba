//! Minimal raster product model consumed and produced by reprojection.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use mosaic_common::{GridError, GridResult, TileSize};

use crate::geocoding::GeoCoding;

/// A single f32 raster band stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub name: String,
    pub data: Vec<f32>,
    /// Value marking missing samples, NaN when not set
    pub no_data_value: Option<f32>,
}

impl Band {
    pub fn new(name: impl Into<String>, data: Vec<f32>) -> Self {
        Self {
            name: name.into(),
            data,
            no_data_value: None,
        }
    }

    pub fn with_no_data(mut self, value: f32) -> Self {
        self.no_data_value = Some(value);
        self
    }

    /// The value written where no source sample is available.
    pub fn fill_value(&self) -> f32 {
        self.no_data_value.unwrap_or(f32::NAN)
    }

    pub fn is_no_data(&self, value: f32) -> bool {
        match self.no_data_value {
            Some(nd) => value == nd || (nd.is_nan() && value.is_nan()),
            None => value.is_nan(),
        }
    }
}

/// A georeferenced multi-band raster.
#[derive(Debug, Clone)]
pub struct Product {
    pub name: String,
    pub width: usize,
    pub height: usize,
    pub geo_coding: Option<Arc<dyn GeoCoding>>,
    pub bands: Vec<Band>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    /// Tile size preferred for processing this product
    pub preferred_tile_size: Option<TileSize>,
}

impl Product {
    pub fn new(name: impl Into<String>, width: usize, height: usize) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            geo_coding: None,
            bands: Vec::new(),
            start_time: None,
            end_time: None,
            preferred_tile_size: None,
        }
    }

    pub fn with_geo_coding(mut self, geo_coding: Arc<dyn GeoCoding>) -> Self {
        self.geo_coding = Some(geo_coding);
        self
    }

    pub fn with_time_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_time = Some(start);
        self.end_time = Some(end);
        self
    }

    /// Add a band; its sample count must match the raster size.
    pub fn add_band(&mut self, band: Band) -> GridResult<()> {
        let expected = self.width * self.height;
        if band.data.len() != expected {
            return Err(GridError::invalid_parameter(
                "band",
                format!(
                    "band '{}' has {} samples, product '{}' needs {}",
                    band.name,
                    band.data.len(),
                    self.name,
                    expected
                ),
            ));
        }
        if self.band(&band.name).is_some() {
            return Err(GridError::invalid_parameter(
                "band",
                format!("duplicate band name '{}'", band.name),
            ));
        }
        self.bands.push(band);
        Ok(())
    }

    pub fn band(&self, name: &str) -> Option<&Band> {
        self.bands.iter().find(|b| b.name == name)
    }

    /// Sample of `band` at (x, y), `None` outside the raster.
    pub fn sample(&self, band: &Band, x: usize, y: usize) -> Option<f32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        band.data.get(y * self.width + x).copied()
    }
}
