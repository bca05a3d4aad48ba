//! Nearest-neighbour reprojection onto CRS grids.

use std::sync::Arc;

use binning_grid::{Band, CrsGeoCoding, CrsGrid, GridError, Product};
use chrono::{DateTime, Utc};
use mosaic_common::{CrsSpec, TileSize};
use projection::CrsDefinition;
use test_utils::{create_constant_band, create_index_band, time, with_no_data_holes};

fn europe_source() -> Product {
    let crs = CrsDefinition::from_epsg(4326).unwrap();
    let gc = CrsGeoCoding::new(crs, 40, 20, 10.0, 50.0, 0.5, 0.5).unwrap();
    let mut product = Product::new("swath", 40, 20).with_geo_coding(Arc::new(gc));
    product
        .add_band(Band::new("index", create_index_band(40, 20)))
        .unwrap();
    product
}

fn one_degree() -> CrsGrid {
    CrsGrid::with_pixel_size(1.0, CrsSpec::parse("EPSG:4326").unwrap()).unwrap()
}

#[test]
fn test_nearest_neighbour_values() {
    let grid = one_degree();
    let output = grid.reproject_to_grid(&europe_source()).unwrap();
    assert_eq!((output.width, output.height), (360, 180));

    let band = output.band("index").unwrap();
    // target pixel (190, 40) centred on 10.5°E 49.5°N
    assert_eq!(output.sample(band, 190, 40), Some(1001.0));
    assert_eq!(output.sample(band, 209, 49), Some(39019.0));
    assert!(output.sample(band, 0, 0).unwrap().is_nan());

    let mapped = band.data.iter().filter(|v| !v.is_nan()).count();
    assert_eq!(mapped, 200);
}

#[test]
fn test_no_data_propagates() {
    let grid = one_degree();
    let mut source = europe_source();
    let holes = with_no_data_holes(create_constant_band(40, 20, 3.0), 2, -999.0);
    source
        .add_band(Band::new("flagged", holes).with_no_data(-999.0))
        .unwrap();

    let output = grid.reproject_to_grid(&source).unwrap();
    let band = output.band("flagged").unwrap();
    assert_eq!(band.no_data_value, Some(-999.0));
    // source pixels at even columns are holes, odd ones keep their value
    assert_eq!(output.sample(band, 190, 40), Some(3.0));
    assert_eq!(output.sample(band, 0, 0), Some(-999.0));
    assert!(band.data.iter().all(|&v| v == 3.0 || v == -999.0));
}

#[test]
fn test_metadata_is_copied() {
    let grid = one_degree();
    let start: DateTime<Utc> = time::START_TIME.parse().unwrap();
    let end: DateTime<Utc> = time::END_TIME.parse().unwrap();
    let mut source = europe_source().with_time_range(start, end);
    source.preferred_tile_size = Some(TileSize::square(64));

    let output = grid.reproject_to_grid(&source).unwrap();
    assert_eq!(output.start_time, Some(start));
    assert_eq!(output.end_time, Some(end));
    assert_eq!(output.preferred_tile_size, Some(TileSize::square(64)));
    assert_eq!(output.bands.len(), 1);
    assert!(output.geo_coding.is_some());
}

#[test]
fn test_source_without_geo_coding() {
    let grid = one_degree();
    let mut source = Product::new("raw", 2, 2);
    source.add_band(Band::new("b", vec![1.0; 4])).unwrap();
    assert!(matches!(
        grid.reproject_to_grid(&source),
        Err(GridError::InvalidParameter { .. })
    ));
}

#[test]
fn test_reproject_onto_utm() {
    let grid = CrsGrid::with_pixel_size(10000.0, CrsSpec::parse("EPSG:32632").unwrap()).unwrap();
    let output = grid.reproject_to_grid(&europe_source()).unwrap();
    let band = output.band("index").unwrap();
    let mapped = band.data.iter().filter(|v| !v.is_nan()).count();
    assert!(mapped > 0);
    assert!(band.data.iter().any(|v| v.is_nan()));
}
