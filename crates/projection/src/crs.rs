//! Registry of the coordinate reference systems a grid can be built on.

use std::fmt;

use mosaic_common::position::wrap_longitude;
use mosaic_common::BoundingBox;

use crate::ellipsoid::Ellipsoid;
use crate::equal_area::CylindricalEqualArea;
use crate::error::ProjectionError;
use crate::mercator::{WebMercator, WEB_MERCATOR_EXTENT};
use crate::polar::PolarStereographic;
use crate::transverse_mercator::TransverseMercator;

/// Unit of the CRS axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Degree,
    Metre,
}

impl Units {
    pub fn is_angular(&self) -> bool {
        matches!(self, Units::Degree)
    }
}

/// Map projection of a CRS. Geographic CRS use the identity on lon/lat.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Geographic,
    WebMercator(WebMercator),
    CylindricalEqualArea(CylindricalEqualArea),
    PolarStereographic(PolarStereographic),
    TransverseMercator(TransverseMercator),
}

impl Projection {
    /// Longitude/latitude in degrees to CRS coordinates.
    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        match self {
            Projection::Geographic => {
                if !lon.is_finite() || !(lat.abs() <= 90.0) {
                    return None;
                }
                let lon = if (-180.0..=180.0).contains(&lon) {
                    lon
                } else {
                    wrap_longitude(lon)
                };
                Some((lon, lat))
            }
            Projection::WebMercator(p) => p.project(lon, lat),
            Projection::CylindricalEqualArea(p) => p.project(lon, lat),
            Projection::PolarStereographic(p) => p.project(lon, lat),
            Projection::TransverseMercator(p) => p.project(lon, lat),
        }
    }

    /// CRS coordinates to longitude/latitude in degrees.
    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        match self {
            Projection::Geographic => {
                if !x.is_finite() || !(y.abs() <= 90.0) {
                    return None;
                }
                Some((x, y))
            }
            Projection::WebMercator(p) => p.unproject(x, y),
            Projection::CylindricalEqualArea(p) => p.unproject(x, y),
            Projection::PolarStereographic(p) => p.unproject(x, y),
            Projection::TransverseMercator(p) => p.unproject(x, y),
        }
    }
}

/// A supported CRS: axis units, datum ellipsoid, valid envelope and projection.
#[derive(Debug, Clone, PartialEq)]
pub struct CrsDefinition {
    pub code: u32,
    pub name: &'static str,
    pub units: Units,
    pub ellipsoid: Ellipsoid,
    /// Envelope in CRS coordinates
    pub envelope: BoundingBox,
    pub projection: Projection,
}

impl CrsDefinition {
    pub fn from_epsg(code: u32) -> Result<Self, ProjectionError> {
        let def = match code {
            4326 => Self::geographic(code, "WGS 84", Ellipsoid::WGS84),
            4269 => Self::geographic(code, "NAD83", Ellipsoid::GRS80),
            3857 => Self {
                code,
                name: "WGS 84 / Pseudo-Mercator",
                units: Units::Metre,
                ellipsoid: Ellipsoid::WGS84,
                envelope: BoundingBox::new(
                    -WEB_MERCATOR_EXTENT,
                    -WEB_MERCATOR_EXTENT,
                    WEB_MERCATOR_EXTENT,
                    WEB_MERCATOR_EXTENT,
                ),
                projection: Projection::WebMercator(WebMercator::new(
                    Ellipsoid::WEB_MERCATOR_SPHERE.semi_major,
                )),
            },
            6933 => Self {
                code,
                name: "WGS 84 / NSIDC EASE-Grid 2.0 Global",
                units: Units::Metre,
                ellipsoid: Ellipsoid::WGS84,
                envelope: BoundingBox::new(-17367530.45, -7314540.83, 17367530.45, 7314540.83),
                projection: Projection::CylindricalEqualArea(CylindricalEqualArea::ease2_global()),
            },
            3413 => Self::polar(code, "WGS 84 / NSIDC Sea Ice Polar Stereographic North", 70.0, -45.0),
            3031 => Self::polar(code, "WGS 84 / Antarctic Polar Stereographic", -71.0, 0.0),
            3995 => Self::polar(code, "WGS 84 / Arctic Polar Stereographic", 71.0, 0.0),
            32601..=32660 => Self::utm(code, code - 32600, false),
            32701..=32760 => Self::utm(code, code - 32700, true),
            _ => return Err(ProjectionError::UnsupportedCrs(format!("EPSG:{}", code))),
        };
        Ok(def)
    }

    fn geographic(code: u32, name: &'static str, ellipsoid: Ellipsoid) -> Self {
        Self {
            code,
            name,
            units: Units::Degree,
            ellipsoid,
            envelope: BoundingBox::new(-180.0, -90.0, 180.0, 90.0),
            projection: Projection::Geographic,
        }
    }

    fn polar(code: u32, name: &'static str, lat_ts: f64, lon0: f64) -> Self {
        Self {
            code,
            name,
            units: Units::Metre,
            ellipsoid: Ellipsoid::WGS84,
            envelope: BoundingBox::new(-4000000.0, -4000000.0, 4000000.0, 4000000.0),
            projection: Projection::PolarStereographic(PolarStereographic::new(
                Ellipsoid::WGS84,
                lat_ts,
                lon0,
            )),
        }
    }

    fn utm(code: u32, zone: u32, south: bool) -> Self {
        let tm = TransverseMercator::utm(zone, south);
        Self {
            code,
            name: if south { "WGS 84 / UTM south" } else { "WGS 84 / UTM north" },
            units: Units::Metre,
            ellipsoid: Ellipsoid::WGS84,
            envelope: tm.utm_envelope(),
            projection: Projection::TransverseMercator(tm),
        }
    }

    pub fn is_geographic(&self) -> bool {
        self.units.is_angular()
    }

    pub fn project(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        self.projection.project(lon, lat)
    }

    pub fn unproject(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        self.projection.unproject(x, y)
    }
}

impl fmt::Display for CrsDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes() {
        for code in [4326, 4269, 3857, 6933, 3413, 3031, 3995, 32601, 32632, 32660, 32701, 32760] {
            let def = CrsDefinition::from_epsg(code).unwrap();
            assert_eq!(def.code, code);
            assert!(def.envelope.width() > 0.0 && def.envelope.height() > 0.0);
        }
    }

    #[test]
    fn test_unknown_codes() {
        for code in [0, 2154, 32600, 32661, 32700, 32761, 99999] {
            assert!(matches!(
                CrsDefinition::from_epsg(code),
                Err(ProjectionError::UnsupportedCrs(_))
            ));
        }
    }

    #[test]
    fn test_units() {
        assert!(CrsDefinition::from_epsg(4326).unwrap().is_geographic());
        assert!(!CrsDefinition::from_epsg(3857).unwrap().is_geographic());
        assert_eq!(CrsDefinition::from_epsg(32636).unwrap().units, Units::Metre);
    }

    #[test]
    fn test_geographic_identity() {
        let def = CrsDefinition::from_epsg(4326).unwrap();
        assert_eq!(def.project(10.0, 50.0), Some((10.0, 50.0)));
        assert_eq!(def.project(180.0, 0.0), Some((180.0, 0.0)));
        assert_eq!(def.project(190.0, 0.0), Some((-170.0, 0.0)));
        assert!(def.project(0.0, 95.0).is_none());
        assert_eq!(def.unproject(-5.0, 45.0), Some((-5.0, 45.0)));
    }

    #[test]
    fn test_display() {
        assert_eq!(CrsDefinition::from_epsg(32632).unwrap().to_string(), "EPSG:32632");
    }
}
