//! Ellipsoidal transverse Mercator and the UTM zone system.
//!
//! Series expansions from Snyder §8; accurate to well under a millimetre
//! within a UTM zone.

use mosaic_common::position::wrap_longitude;
use mosaic_common::BoundingBox;

use crate::ellipsoid::Ellipsoid;

pub const UTM_SCALE_FACTOR: f64 = 0.9996;
pub const UTM_FALSE_EASTING: f64 = 500000.0;
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10000000.0;

/// Longitudinal distance from the central meridian beyond which the series are not used.
const MAX_DLON_DEG: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    /// Central meridian in degrees
    pub lon0: f64,
    pub k0: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

impl TransverseMercator {
    pub fn new(ellipsoid: Ellipsoid, lon0: f64, k0: f64, false_easting: f64, false_northing: f64) -> Self {
        Self {
            ellipsoid,
            lon0,
            k0,
            false_easting,
            false_northing,
        }
    }

    /// UTM zone 1..=60 on WGS84.
    pub fn utm(zone: u32, south: bool) -> Self {
        let lon0 = zone as f64 * 6.0 - 183.0;
        let false_northing = if south { UTM_FALSE_NORTHING_SOUTH } else { 0.0 };
        Self::new(Ellipsoid::WGS84, lon0, UTM_SCALE_FACTOR, UTM_FALSE_EASTING, false_northing)
    }

    /// Meridian arc length from the equator to latitude `phi` (radians).
    fn meridian_arc(&self, phi: f64) -> f64 {
        let a = self.ellipsoid.semi_major;
        let e2 = self.ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        a * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
            - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
            + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
            - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }

    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !(lat.abs() < 90.0) {
            return None;
        }
        let dlon = wrap_longitude(lon - self.lon0);
        if dlon.abs() > MAX_DLON_DEG {
            return None;
        }

        let a = self.ellipsoid.semi_major;
        let e2 = self.ellipsoid.e2();
        let ep2 = self.ellipsoid.ep2();
        let phi = lat.to_radians();
        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();

        let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let big_a = dlon.to_radians() * cos_phi;
        let a2 = big_a * big_a;

        let x = self.k0
            * n
            * (big_a
                + (1.0 - t + c) * a2 * big_a / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a2 * a2 * big_a / 120.0);
        let y = self.k0
            * (self.meridian_arc(phi)
                + n * tan_phi
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a2 * a2 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a2 * a2 * a2 / 720.0));

        Some((x + self.false_easting, y + self.false_northing))
    }

    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }
        let a = self.ellipsoid.semi_major;
        let e2 = self.ellipsoid.e2();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        let ep2 = self.ellipsoid.ep2();

        let m = (y - self.false_northing) / self.k0;
        let mu = m / (a * (1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0));
        let sqrt_1me2 = (1.0 - e2).sqrt();
        let e1 = (1.0 - sqrt_1me2) / (1.0 + sqrt_1me2);
        let phi1 = mu
            + (3.0 * e1 / 2.0 - 27.0 * e1.powi(3) / 32.0) * (2.0 * mu).sin()
            + (21.0 * e1 * e1 / 16.0 - 55.0 * e1.powi(4) / 32.0) * (4.0 * mu).sin()
            + (151.0 * e1.powi(3) / 96.0) * (6.0 * mu).sin()
            + (1097.0 * e1.powi(4) / 512.0) * (8.0 * mu).sin();
        if !(phi1.abs() < std::f64::consts::FRAC_PI_2) {
            return None;
        }

        let (sin1, cos1) = phi1.sin_cos();
        let tan1 = phi1.tan();
        let c1 = ep2 * cos1 * cos1;
        let t1 = tan1 * tan1;
        let w = 1.0 - e2 * sin1 * sin1;
        let n1 = a / w.sqrt();
        let r1 = a * (1.0 - e2) / w.powf(1.5);
        let d = (x - self.false_easting) / (n1 * self.k0);
        let d2 = d * d;

        let lat = phi1
            - (n1 * tan1 / r1)
                * (d2 / 2.0
                    - (5.0 + 3.0 * t1 + 10.0 * c1 - 4.0 * c1 * c1 - 9.0 * ep2) * d2 * d2 / 24.0
                    + (61.0 + 90.0 * t1 + 298.0 * c1 + 45.0 * t1 * t1 - 252.0 * ep2 - 3.0 * c1 * c1)
                        * d2
                        * d2
                        * d2
                        / 720.0);
        let dlon = (d - (1.0 + 2.0 * t1 + c1) * d2 * d / 6.0
            + (5.0 - 2.0 * c1 + 28.0 * t1 - 3.0 * c1 * c1 + 8.0 * ep2 + 24.0 * t1 * t1) * d2 * d2 * d
                / 120.0)
            / cos1;

        Some((wrap_longitude(self.lon0 + dlon.to_degrees()), lat.to_degrees()))
    }

    /// Projected extent of a UTM zone: six degrees of longitude between
    /// the equator and 84°N (north) or 80°S and the equator (south).
    pub fn utm_envelope(&self) -> BoundingBox {
        let south = self.false_northing >= UTM_FALSE_NORTHING_SOUTH;
        let (lat_min, lat_max) = if south { (-80.0, 0.0) } else { (0.0, 84.0) };
        let corners = [
            (self.lon0 - 3.0, lat_min),
            (self.lon0 + 3.0, lat_min),
            (self.lon0 - 3.0, lat_max),
            (self.lon0 + 3.0, lat_max),
            (self.lon0, lat_min),
            (self.lon0, lat_max),
        ];
        let projected = corners
            .iter()
            .filter_map(|&(lon, lat)| self.project(lon, lat));
        BoundingBox::from_points(projected).unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_known_point() {
        let tm = TransverseMercator::utm(32, false);
        assert_eq!(tm.lon0, 9.0);
        let (x, y) = tm.project(10.0, 50.0).unwrap();
        assert!((x - 571666.4475).abs() < 1e-3, "x = {}", x);
        assert!((y - 5539109.8157).abs() < 1e-3, "y = {}", y);

        let (lon, lat) = tm.unproject(x, y).unwrap();
        assert!((lon - 10.0).abs() < 1e-8);
        assert!((lat - 50.0).abs() < 1e-8);
    }

    #[test]
    fn test_utm_north_envelope() {
        let env = TransverseMercator::utm(36, false).utm_envelope();
        assert!((env.min_x - 166021.44317933184).abs() < 1e-3);
        assert!((env.max_x - 833978.5568206682).abs() < 1e-3);
        assert!(env.min_y.abs() < 1e-6);
        assert!((env.max_y - 9329005.18301614).abs() < 1e-3);
    }

    #[test]
    fn test_utm_south_envelope() {
        let env = TransverseMercator::utm(32, true).utm_envelope();
        assert!((env.min_y - 1116915.043292435).abs() < 1e-3);
        assert!((env.max_y - 10000000.0).abs() < 1e-6);
    }

    #[test]
    fn test_far_from_meridian_rejected() {
        let tm = TransverseMercator::utm(32, false);
        assert!(tm.project(100.0, 10.0).is_none());
        assert!(tm.project(9.0, 90.0).is_none());
    }
}
