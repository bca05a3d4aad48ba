//! Ellipsoidal Lambert cylindrical equal-area projection (EASE-Grid 2.0 global).

use mosaic_common::position::wrap_longitude;

use crate::ellipsoid::Ellipsoid;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylindricalEqualArea {
    pub ellipsoid: Ellipsoid,
    /// Central meridian in degrees
    pub lon0: f64,
    /// Latitude of true scale in degrees
    pub lat_ts: f64,
    k0: f64,
    qp: f64,
}

impl CylindricalEqualArea {
    pub fn new(ellipsoid: Ellipsoid, lon0: f64, lat_ts: f64) -> Self {
        let e2 = ellipsoid.e2();
        let sin_ts = lat_ts.to_radians().sin();
        let k0 = lat_ts.to_radians().cos() / (1.0 - e2 * sin_ts * sin_ts).sqrt();
        let mut proj = Self {
            ellipsoid,
            lon0,
            lat_ts,
            k0,
            qp: 0.0,
        };
        proj.qp = proj.q(1.0);
        proj
    }

    /// EPSG:6933 parameters.
    pub fn ease2_global() -> Self {
        Self::new(Ellipsoid::WGS84, 0.0, 30.0)
    }

    fn q(&self, sin_phi: f64) -> f64 {
        let e2 = self.ellipsoid.e2();
        if e2 == 0.0 {
            return 2.0 * sin_phi;
        }
        let e = e2.sqrt();
        let es = e * sin_phi;
        (1.0 - e2) * (sin_phi / (1.0 - es * es) - (1.0 / (2.0 * e)) * ((1.0 - es) / (1.0 + es)).ln())
    }

    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !(lat.abs() <= 90.0) {
            return None;
        }
        let a = self.ellipsoid.semi_major;
        let lambda = wrap_longitude(lon - self.lon0).to_radians();
        let x = a * self.k0 * lambda;
        let y = a * self.q(lat.to_radians().sin()) / (2.0 * self.k0);
        Some((x, y))
    }

    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let a = self.ellipsoid.semi_major;
        let sin_beta = 2.0 * y * self.k0 / (a * self.qp);
        if sin_beta.abs() > 1.0 {
            return None;
        }
        let beta = sin_beta.asin();

        // authalic latitude back to geodetic latitude
        let e2 = self.ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let phi = beta
            + (e2 / 3.0 + 31.0 * e4 / 180.0 + 517.0 * e6 / 5040.0) * (2.0 * beta).sin()
            + (23.0 * e4 / 360.0 + 251.0 * e6 / 3780.0) * (4.0 * beta).sin()
            + (761.0 * e6 / 45360.0) * (6.0 * beta).sin();

        let lon = (x / (a * self.k0)).to_degrees() + self.lon0;
        Some((lon, phi.to_degrees()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease2_extent() {
        let p = CylindricalEqualArea::ease2_global();
        let (x, _) = p.project(-180.0, 0.0).unwrap();
        assert!((x + 17367530.445161372).abs() < 1e-3);
        let (_, y) = p.project(0.0, 90.0).unwrap();
        assert!((y - 7342230.136498678).abs() < 1e-3);
    }

    #[test]
    fn test_round_trip() {
        let p = CylindricalEqualArea::ease2_global();
        let (x, y) = p.project(10.0, 50.0).unwrap();
        assert!((x - 964862.8025089651).abs() < 1e-3);
        assert!((y - 5614050.1030608015).abs() < 1e-3);
        let (lon, lat) = p.unproject(x, y).unwrap();
        assert!((lon - 10.0).abs() < 1e-9);
        assert!((lat - 50.0).abs() < 1e-7);
    }

    #[test]
    fn test_beyond_pole_rejected() {
        let p = CylindricalEqualArea::ease2_global();
        assert!(p.unproject(0.0, 8.0e6).is_none());
        assert!(p.project(0.0, 91.0).is_none());
    }
}
