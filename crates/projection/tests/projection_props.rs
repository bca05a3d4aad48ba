//! Round-trip properties of the supported projections.

use proptest::prelude::*;

use projection::isin::{IsinApi, Raster};
use projection::CrsDefinition;

proptest! {
    #[test]
    fn isin_global_map_round_trips(lon in -179.999f64..179.999, lat in -89.9f64..89.9) {
        let api = IsinApi::new(Raster::Grid1Km).unwrap();
        let (x, y) = api.to_global_map(lon, lat).unwrap();
        let (rlon, rlat) = api.global_map_to_geo(x, y).unwrap();
        prop_assert!((rlon - lon).abs() < 1e-8);
        prop_assert!((rlat - lat).abs() < 1e-8);
    }

    #[test]
    fn utm_round_trips_inside_zone(dlon in -3.0f64..3.0, lat in 0.0f64..84.0, zone in 1u32..=60) {
        let def = CrsDefinition::from_epsg(32600 + zone).unwrap();
        let lon0 = zone as f64 * 6.0 - 183.0;
        let (x, y) = def.project(lon0 + dlon, lat).unwrap();
        let (rlon, rlat) = def.unproject(x, y).unwrap();
        let dl = (rlon - (lon0 + dlon) + 540.0).rem_euclid(360.0) - 180.0;
        prop_assert!(dl.abs() < 1e-7);
        prop_assert!((rlat - lat).abs() < 1e-7);
    }

    #[test]
    fn polar_round_trips(lon in -179.0f64..179.0, lat in 50.0f64..89.5) {
        let def = CrsDefinition::from_epsg(3413).unwrap();
        let (x, y) = def.project(lon, lat).unwrap();
        let (rlon, rlat) = def.unproject(x, y).unwrap();
        prop_assert!((rlon - lon).abs() < 1e-7);
        prop_assert!((rlat - lat).abs() < 1e-7);
    }

    #[test]
    fn web_mercator_round_trips(lon in -179.9f64..179.9, lat in -85.0f64..85.0) {
        let def = CrsDefinition::from_epsg(3857).unwrap();
        let (x, y) = def.project(lon, lat).unwrap();
        let (rlon, rlat) = def.unproject(x, y).unwrap();
        prop_assert!((rlon - lon).abs() < 1e-9);
        prop_assert!((rlat - lat).abs() < 1e-9);
    }
}
