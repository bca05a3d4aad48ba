//! Common test fixtures for the grid tests.
//!
//! Landmark coordinates are paired with the bins they fall into on the
//! 1 km, 500 m and 250 m ISIN grids.

use geo::{polygon, Polygon};

/// A named geographic location.
#[derive(Debug, Clone, Copy)]
pub struct Landmark {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// Expected bins on the 1 km, 500 m and 250 m ISIN grids
    pub isin_bins: [i64; 3],
}

pub const ORIGIN: Landmark = Landmark {
    name: "origin",
    lat: 0.0,
    lon: 0.0,
    isin_bins: [91800000000, 91800000000, 91800000000],
};

pub const HAMBURG: Landmark = Landmark {
    name: "Hamburg",
    lat: 53.551086,
    lon: 9.993682,
    isin_bins: [31807730712, 31815471424, 31830952849],
};

pub const SOUTH_ATLANTIC: Landmark = Landmark {
    name: "South Atlantic",
    lat: -34.357203,
    lon: -18.49755,
    isin_bins: [121605220567, 121610451134, 121620912270],
};

pub const GREEN_PATCH: Landmark = Landmark {
    name: "Green Patch, Falkland Islands",
    lat: -51.557058,
    lon: -58.130897,
    isin_bins: [141401860462, 141403730925, 141407471851],
};

pub const TATOOSH: Landmark = Landmark {
    name: "Tatoosh Island",
    lat: 48.391578,
    lon: -124.736636,
    isin_bins: [40901930859, 40903861719, 40907723440],
};

pub const NEAR_NORTH_POLE: Landmark = Landmark {
    name: "near north pole",
    lat: 89.45673,
    lon: 116.8765,
    isin_bins: [1800650133, 1801300266, 1802600530],
};

pub const DOME_C: Landmark = Landmark {
    name: "Dome C",
    lat: -75.0,
    lon: -125.0,
    isin_bins: [161406000918, 161412001835, 161424003671],
};

/// All landmarks with known ISIN bins.
pub const LANDMARKS: [Landmark; 7] = [
    ORIGIN,
    HAMBURG,
    SOUTH_ATLANTIC,
    GREEN_PATCH,
    TATOOSH,
    NEAR_NORTH_POLE,
    DOME_C,
];

/// Supported ISIN global row counts, in the order of `Landmark::isin_bins`.
pub const ISIN_ROW_COUNTS: [i32; 3] = [21600, 43200, 86400];

/// Footprint polygons in lon/lat.
pub mod footprint {
    use super::*;

    /// Rectangle 10°E..30°E, 40°N..50°N
    pub fn europe_rectangle() -> Polygon<f64> {
        polygon![
            (x: 10.0, y: 40.0),
            (x: 30.0, y: 40.0),
            (x: 30.0, y: 50.0),
            (x: 10.0, y: 50.0),
        ]
    }

    /// Right triangle with its hypotenuse running from (30°E, 50°N) to (10°E, 30°N)
    pub fn triangle() -> Polygon<f64> {
        polygon![(x: 10.0, y: 50.0), (x: 30.0, y: 50.0), (x: 10.0, y: 30.0)]
    }

    /// Rectangle 10°E..30°E, 10°N..50°N
    pub fn tall_rectangle() -> Polygon<f64> {
        polygon![
            (x: 10.0, y: 10.0),
            (x: 30.0, y: 10.0),
            (x: 30.0, y: 50.0),
            (x: 10.0, y: 50.0),
        ]
    }

    /// Small swath over northern Germany
    pub fn germany_swath() -> Polygon<f64> {
        polygon![
            (x: 8.0, y: 52.0),
            (x: 12.0, y: 52.0),
            (x: 12.0, y: 55.0),
            (x: 8.0, y: 55.0),
        ]
    }

    /// Footprint far from any UTM zone 32 coverage
    pub fn pacific() -> Polygon<f64> {
        polygon![
            (x: -150.0, y: -10.0),
            (x: -140.0, y: -10.0),
            (x: -140.0, y: 0.0),
            (x: -150.0, y: 0.0),
        ]
    }
}

/// Common time values for testing.
pub mod time {
    /// Start of a reference acquisition (2024-01-15T12:00:00Z)
    pub const START_TIME: &str = "2024-01-15T12:00:00Z";

    /// End of the reference acquisition
    pub const END_TIME: &str = "2024-01-15T12:05:00Z";
}
