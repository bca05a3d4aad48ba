//! Ellipsoidal polar stereographic projection with a standard parallel.
//!
//! A negative standard parallel selects the south polar aspect. Formulas
//! follow Snyder, "Map Projections: A Working Manual", §21.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use mosaic_common::position::wrap_longitude;

use crate::ellipsoid::Ellipsoid;

const MAX_ITERATIONS: usize = 15;
const CONVERGENCE: f64 = 1e-12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarStereographic {
    pub ellipsoid: Ellipsoid,
    /// Latitude of true scale in degrees (sign selects the pole)
    pub lat_ts: f64,
    /// Straight vertical longitude from pole, in degrees
    pub lon0: f64,
    south: bool,
    /// a·m_c / t_c
    scale: f64,
}

impl PolarStereographic {
    pub fn new(ellipsoid: Ellipsoid, lat_ts: f64, lon0: f64) -> Self {
        let south = lat_ts < 0.0;
        let phi_c = lat_ts.abs().to_radians();
        let e2 = ellipsoid.e2();
        let m_c = phi_c.cos() / (1.0 - e2 * phi_c.sin().powi(2)).sqrt();
        let t_c = Self::t(ellipsoid.e(), phi_c);
        Self {
            ellipsoid,
            lat_ts,
            lon0,
            south,
            scale: ellipsoid.semi_major * m_c / t_c,
        }
    }

    fn t(e: f64, phi: f64) -> f64 {
        let es = e * phi.sin();
        (FRAC_PI_4 - phi / 2.0).tan() / ((1.0 - es) / (1.0 + es)).powf(e / 2.0)
    }

    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !(lat.abs() <= 90.0) {
            return None;
        }
        let phi = if self.south { -lat } else { lat }.to_radians();
        let lambda = wrap_longitude(lon - self.lon0).to_radians();

        let rho = self.scale * Self::t(self.ellipsoid.e(), phi);
        if !rho.is_finite() {
            return None;
        }

        let x = rho * lambda.sin();
        let y = if self.south {
            rho * lambda.cos()
        } else {
            -rho * lambda.cos()
        };
        Some((x, y))
    }

    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let rho = x.hypot(y);
        let t = rho / self.scale;
        let e = self.ellipsoid.e();

        let mut phi = FRAC_PI_2 - 2.0 * t.atan();
        for _ in 0..MAX_ITERATIONS {
            let es = e * phi.sin();
            let next = FRAC_PI_2 - 2.0 * (t * ((1.0 - es) / (1.0 + es)).powf(e / 2.0)).atan();
            let done = (next - phi).abs() < CONVERGENCE;
            phi = next;
            if done {
                break;
            }
        }

        let (lat, dlon) = if self.south {
            (-phi, x.atan2(y))
        } else {
            (phi, x.atan2(-y))
        };
        let lon = wrap_longitude(self.lon0 + dlon.to_degrees());
        Some((lon, lat.to_degrees()))
    }
}
