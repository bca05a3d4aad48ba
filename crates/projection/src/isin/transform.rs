//! Forward and inverse ISIN mapping between radians and metres.

use std::f64::consts::{FRAC_PI_2, PI};
use std::sync::Arc;

use super::row_table::RowTable;
use crate::error::ProjectionError;

const TWO_PI: f64 = 2.0 * PI;

/// Geographic (radians) to map (metres) ISIN transform.
#[derive(Debug, Clone)]
pub struct IsinForward {
    table: Arc<RowTable>,
}

impl IsinForward {
    pub fn new(
        sphere: f64,
        lon_cen_mer: f64,
        false_east: f64,
        false_north: f64,
        dzone: f64,
        djustify: f64,
    ) -> Result<Self, ProjectionError> {
        let table = RowTable::new(sphere, lon_cen_mer, false_east, false_north, dzone, djustify)?;
        Ok(Self::from_table(Arc::new(table)))
    }

    pub fn from_table(table: Arc<RowTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    /// Map a longitude/latitude pair in radians to ISIN metres.
    ///
    /// Any longitude is accepted; latitudes beyond the poles are rejected.
    pub fn transform(&self, lon: f64, lat: f64) -> Result<(f64, f64), ProjectionError> {
        if !lon.is_finite() || !lat.is_finite() || lat.abs() > FRAC_PI_2 {
            return Err(ProjectionError::out_of_range(format!(
                "latitude {} rad is outside [-π/2, π/2]",
                lat
            )));
        }

        let t = &*self.table;
        let y = t.false_north + lat * t.sphere;
        let row = t.descriptor_for_lat(lat);

        let mut flon = (lon - t.ref_lon) / TWO_PI;
        flon -= flon.floor();
        let x = t.false_east + t.col_dist * (flon * row.ncol as f64 - row.icol_cen as f64);

        Ok((x, y))
    }
}

/// Map (metres) to geographic (radians) ISIN transform.
#[derive(Debug, Clone)]
pub struct IsinInverse {
    table: Arc<RowTable>,
}

impl IsinInverse {
    pub fn new(
        sphere: f64,
        lon_cen_mer: f64,
        false_east: f64,
        false_north: f64,
        dzone: f64,
        djustify: f64,
    ) -> Result<Self, ProjectionError> {
        let table = RowTable::new(sphere, lon_cen_mer, false_east, false_north, dzone, djustify)?;
        Ok(Self::from_table(Arc::new(table)))
    }

    pub fn from_table(table: Arc<RowTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RowTable {
        &self.table
    }

    /// Map ISIN metres back to a longitude/latitude pair in radians.
    ///
    /// Points north or south of the poles, or east or west of the
    /// sinusoidal edge of their row, are rejected.
    pub fn transform(&self, x: f64, y: f64) -> Result<(f64, f64), ProjectionError> {
        let t = &*self.table;
        let lat = (y - t.false_north) * t.sphere_inv;
        if !lat.is_finite() || lat.abs() > FRAC_PI_2 {
            return Err(ProjectionError::out_of_range(format!(
                "y {} maps to latitude {} rad beyond the poles",
                y, lat
            )));
        }

        let row = t.descriptor_for_lat(lat);
        let flon = ((x - t.false_east) * t.col_dist_inv + row.icol_cen as f64) * row.ncol_inv;
        if !(0.0..=1.0).contains(&flon) {
            return Err(ProjectionError::out_of_range(format!(
                "x {} is outside the sinusoidal edge of its row",
                x
            )));
        }

        let mut lon = t.ref_lon + flon * TWO_PI;
        if lon > PI {
            lon -= TWO_PI;
        } else if lon < -PI {
            lon += TWO_PI;
        }

        Ok((lon, lat))
    }
}
