//! Per-row column layout of the integerized sinusoidal grid.
//!
//! The sphere is cut into `nzone` equal latitude bands. Each band of the
//! northern half carries its own column count, proportional to the cosine of
//! the band's centre latitude; the southern half mirrors the northern one.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::error::ProjectionError;

/// Tolerance used when checking that a float parameter is integral.
pub const EPS_CNVT: f64 = 0.01;
/// Smallest accepted sphere radius (metres).
pub const EPS_SPHERE: f64 = 1.0e-10;
/// Largest accepted number of latitudinal zones (one per arc second).
pub const MAX_NZONE: i64 = 360 * 3600;

const TWO_PI: f64 = 2.0 * PI;

/// Column layout of a single half-band row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowDescriptor {
    /// Number of columns in the row, at least 1
    pub ncol: i64,
    /// 1 / ncol
    pub ncol_inv: f64,
    /// Column whose edge (justify 0) or centre (otherwise) sits on the central meridian
    pub icol_cen: i64,
}

/// Precomputed ISIN row table and its derived constants.
#[derive(Debug, Clone)]
pub struct RowTable {
    /// Sphere radius (metres)
    pub sphere: f64,
    pub sphere_inv: f64,
    /// Central meridian in radians, folded into [-π, π]
    pub lon_cen_mer: f64,
    /// Longitude of the left grid edge in radians
    pub ref_lon: f64,
    /// False easting (metres)
    pub false_east: f64,
    /// False northing (metres)
    pub false_north: f64,
    /// Number of latitudinal zones, pole to pole
    pub nrow: i64,
    pub nrow_half: i64,
    /// Zones per radian of latitude
    pub ang_size_inv: f64,
    /// Column justification: 0, 1 or 2
    pub ijustify: i32,
    /// Width of one column (metres)
    pub col_dist: f64,
    pub col_dist_inv: f64,
    rows: Vec<RowDescriptor>,
}

impl RowTable {
    /// Validate the parameters and build the row table.
    ///
    /// # Arguments
    /// * `sphere` - sphere radius in metres
    /// * `lon_cen_mer` - central meridian in radians, [-2π, 2π]
    /// * `false_east` / `false_north` - offsets in metres
    /// * `dzone` - number of latitudinal zones, an even integer in [2, MAX_NZONE]
    /// * `djustify` - 0, 1 or 2
    pub fn new(
        sphere: f64,
        lon_cen_mer: f64,
        false_east: f64,
        false_north: f64,
        dzone: f64,
        djustify: f64,
    ) -> Result<Self, ProjectionError> {
        if !(sphere > EPS_SPHERE) {
            return Err(ProjectionError::invalid_parameter(
                "sphere",
                format!("radius must exceed {}, got {}", EPS_SPHERE, sphere),
            ));
        }

        if !(-TWO_PI..=TWO_PI).contains(&lon_cen_mer) {
            return Err(ProjectionError::invalid_parameter(
                "lon_cen_mer",
                format!("central meridian {} is outside [-2π, 2π]", lon_cen_mer),
            ));
        }
        let lon_cen_mer = if lon_cen_mer < -PI {
            lon_cen_mer + TWO_PI
        } else if lon_cen_mer > PI {
            lon_cen_mer - TWO_PI
        } else {
            lon_cen_mer
        };

        if !(2.0..=MAX_NZONE as f64).contains(&dzone) {
            return Err(ProjectionError::invalid_parameter(
                "dzone",
                format!("zone count {} is outside [2, {}]", dzone, MAX_NZONE),
            ));
        }
        let nzone = (dzone + EPS_CNVT) as i64;
        if (dzone - nzone as f64).abs() > EPS_CNVT {
            return Err(ProjectionError::invalid_parameter(
                "dzone",
                format!("zone count {} is not an integer", dzone),
            ));
        }
        if nzone % 2 != 0 {
            return Err(ProjectionError::invalid_parameter(
                "dzone",
                format!("zone count {} is not even", nzone),
            ));
        }

        if !(-EPS_CNVT..=2.0 + EPS_CNVT).contains(&djustify) {
            return Err(ProjectionError::invalid_parameter(
                "djustify",
                format!("justify flag {} is outside [0, 2]", djustify),
            ));
        }
        let ijustify = (djustify + EPS_CNVT) as i32;
        if (djustify - ijustify as f64).abs() > EPS_CNVT {
            return Err(ProjectionError::invalid_parameter(
                "djustify",
                format!("justify flag {} is not an integer", djustify),
            ));
        }

        let nrow = nzone;
        let nrow_half = nzone / 2;
        let mut ref_lon = lon_cen_mer - PI;
        if ref_lon < -PI {
            ref_lon += TWO_PI;
        }
        let col_dist = PI * sphere / nrow as f64;

        let rows = (0..nrow_half)
            .map(|irow| {
                let clat = FRAC_PI_2 * (1.0 - (irow as f64 + 0.5) / nrow_half as f64);
                let ncol = if ijustify < 2 {
                    (2.0 * clat.cos() * nrow as f64 + 0.5) as i64
                } else {
                    2 * ((clat.cos() * nrow as f64 + 0.5) as i64)
                };
                let ncol = ncol.max(1);
                let icol_cen = if ijustify == 0 { ncol / 2 } else { (ncol + 1) / 2 };
                RowDescriptor {
                    ncol,
                    ncol_inv: 1.0 / ncol as f64,
                    icol_cen,
                }
            })
            .collect();

        Ok(Self {
            sphere,
            sphere_inv: 1.0 / sphere,
            lon_cen_mer,
            ref_lon,
            false_east,
            false_north,
            nrow,
            nrow_half,
            ang_size_inv: nrow as f64 / PI,
            ijustify,
            col_dist,
            col_dist_inv: 1.0 / col_dist,
            rows,
        })
    }

    /// All half-band rows, index 0 touching the north pole.
    pub fn rows(&self) -> &[RowDescriptor] {
        &self.rows
    }

    /// Descriptor of half-band row `irow`, `None` past the equator.
    pub fn row(&self, irow: usize) -> Option<&RowDescriptor> {
        self.rows.get(irow)
    }

    /// Half-band row containing a latitude (radians), mirrored in the south.
    pub fn row_for_lat(&self, lat: f64) -> usize {
        let mut irow = ((FRAC_PI_2 - lat) * self.ang_size_inv).floor() as i64;
        if irow >= self.nrow_half {
            irow = self.nrow - 1 - irow;
        }
        irow.clamp(0, self.nrow_half - 1) as usize
    }

    pub(crate) fn descriptor_for_lat(&self, lat: f64) -> &RowDescriptor {
        // row_for_lat is clamped into the table
        &self.rows[self.row_for_lat(lat)]
    }
}
