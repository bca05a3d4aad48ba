//! Spherical (pseudo) Mercator, as used by EPSG:3857.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use mosaic_common::position::wrap_longitude;

/// Half the extent of the square Web Mercator world, in metres.
pub const WEB_MERCATOR_EXTENT: f64 = 20037508.342789244;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WebMercator {
    /// Sphere radius (metres)
    pub radius: f64,
    /// Central meridian in degrees
    pub lon0: f64,
}

impl WebMercator {
    pub fn new(radius: f64) -> Self {
        Self { radius, lon0: 0.0 }
    }

    /// Longitude/latitude in degrees to metres. The poles have no image.
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !(lat.abs() < 90.0) {
            return None;
        }
        let lambda = wrap_longitude(lon - self.lon0).to_radians();
        let phi = lat.to_radians();
        let x = self.radius * lambda;
        let y = self.radius * (FRAC_PI_4 + phi / 2.0).tan().ln();
        Some((x, y))
    }

    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let lon = (x / self.radius).to_degrees() + self.lon0;
        let lat = (2.0 * (y / self.radius).exp().atan() - FRAC_PI_2).to_degrees();
        Some((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_point() {
        let m = WebMercator::new(6378137.0);
        let (x, y) = m.project(10.0, 50.0).unwrap();
        assert!((x - 1113194.9079327357).abs() < 1e-6);
        assert!((y - 6446275.841017158).abs() < 1e-6);

        let (lon, lat) = m.unproject(x, y).unwrap();
        assert!((lon - 10.0).abs() < 1e-10);
        assert!((lat - 50.0).abs() < 1e-10);
    }

    #[test]
    fn test_extent_matches_antimeridian() {
        let m = WebMercator::new(6378137.0);
        let (x, _) = m.project(-180.0, 0.0).unwrap();
        assert!((x + WEB_MERCATOR_EXTENT).abs() < 1e-6);
    }

    #[test]
    fn test_poles_rejected() {
        let m = WebMercator::new(6378137.0);
        assert!(m.project(0.0, 90.0).is_none());
        assert!(m.project(0.0, -90.0).is_none());
        assert!(m.project(f64::NAN, 0.0).is_none());
    }
}
