//! CRS grid lookups, image geometry and data-slice planning.

use binning_grid::{CrsGrid, GeoCoding, MosaickingGrid, PlanetaryGrid, INVALID_BIN_INDEX};
use geo::{polygon, Area};
use mosaic_common::{CrsSpec, GeoPos, GridError, PixelRect, TileSize};
use test_utils::{assert_approx_eq, footprint, HAMBURG};

fn one_degree() -> CrsGrid {
    CrsGrid::with_pixel_size(1.0, CrsSpec::parse("EPSG:4326").unwrap()).unwrap()
}

#[test]
fn test_global_geographic_lookups() {
    let grid = one_degree();
    assert_eq!(grid.num_rows(), 180);
    assert_eq!(grid.num_cols(0), 360);
    assert_eq!(grid.num_bins(), 64800);

    let bin = grid.bin_index(HAMBURG.lat, HAMBURG.lon);
    assert_eq!(bin, 36 * 360 + 189);
    assert_eq!(grid.row_index(bin), 36);
    assert_eq!(grid.first_bin_index(36), 36 * 360);

    let [lat, lon] = grid.center_lat_lon(bin);
    assert_approx_eq!(lat, 53.5, 1e-12);
    assert_approx_eq!(lon, 9.5, 1e-12);
    assert_eq!(grid.bin_index(lat, lon), bin);

    assert_eq!(grid.bin_index(95.0, 0.0), INVALID_BIN_INDEX);
    assert!(grid.center_lat_lon(64800)[0].is_nan());
}

#[test]
fn test_poles_and_antimeridian_stay_on_global_grid() {
    let grid = one_degree();
    assert_eq!(grid.bin_index(90.0, 0.0), 180);
    assert_eq!(grid.bin_index(-90.0, 0.0), 179 * 360 + 180);
    assert_eq!(grid.bin_index(0.0, -180.0), 90 * 360);
    assert_eq!(grid.bin_index(0.0, 180.0), 90 * 360 + 359);
    assert_eq!(grid.bin_index(-90.0, 180.0), grid.num_bins() - 1);
    assert_eq!(grid.bin_index(-90.5, 0.0), INVALID_BIN_INDEX);
}

#[test]
fn test_polar_grid_round_trip() {
    let grid = CrsGrid::with_pixel_size(25000.0, CrsSpec::parse("EPSG:3413").unwrap()).unwrap();
    assert_eq!(grid.num_cols(0), 320);
    assert_eq!(grid.num_rows(), 320);
    let bin = grid.bin_index(75.0, -40.0);
    assert_ne!(bin, INVALID_BIN_INDEX);
    let [lat, lon] = grid.center_lat_lon(bin);
    assert_eq!(grid.bin_index(lat, lon), bin);
    assert_eq!(grid.bin_index(-60.0, 0.0), INVALID_BIN_INDEX);
}

#[test]
fn test_utm_grid_round_trip() {
    let grid = CrsGrid::with_pixel_size(1000.0, CrsSpec::parse("EPSG:32632").unwrap()).unwrap();
    assert_eq!(grid.num_cols(0), 668);
    let bin = grid.bin_index(HAMBURG.lat, HAMBURG.lon);
    assert_ne!(bin, INVALID_BIN_INDEX);
    let [lat, lon] = grid.center_lat_lon(bin);
    assert_eq!(grid.bin_index(lat, lon), bin);
    assert_eq!(grid.bin_index(0.0, -150.0), INVALID_BIN_INDEX);
}

#[test]
fn test_rectangle_slices() {
    let grid = one_degree();
    let slices = grid
        .data_slice_rectangles(&footprint::europe_rectangle(), TileSize::square(16))
        .unwrap();
    assert_eq!(
        slices,
        vec![
            PixelRect::new(190, 40, 2, 8),
            PixelRect::new(192, 40, 16, 8),
            PixelRect::new(208, 40, 2, 8),
            PixelRect::new(190, 48, 2, 2),
            PixelRect::new(192, 48, 16, 2),
            PixelRect::new(208, 48, 2, 2),
        ]
    );
    let covered: i64 = slices.iter().map(|r| r.area()).sum();
    assert_eq!(covered, 200);
}

#[test]
fn test_triangle_skips_uncovered_tile() {
    let grid = one_degree();
    let slices = grid
        .data_slice_rectangles(&footprint::triangle(), TileSize::square(16))
        .unwrap();
    assert_eq!(
        slices,
        vec![
            PixelRect::new(190, 40, 2, 8),
            PixelRect::new(192, 40, 16, 8),
            PixelRect::new(208, 40, 2, 8),
            PixelRect::new(190, 48, 2, 12),
            PixelRect::new(192, 48, 16, 12),
        ]
    );
}

#[test]
fn test_image_geometry_and_bounds() {
    let grid = one_degree();
    let geometry = grid
        .image_geometry(&footprint::europe_rectangle())
        .unwrap()
        .unwrap();
    assert_approx_eq!(geometry.unsigned_area(), 200.0, 1e-9);
    assert_eq!(grid.bounds(&geometry), PixelRect::new(190, 40, 20, 10));
}

#[test]
fn test_target_polygon_clips_footprint() {
    let spec = CrsSpec::parse("EPSG:4326,POLYGON((0 0,40 0,40 40,0 40,0 0))").unwrap();
    let grid = CrsGrid::with_pixel_size(1.0, spec).unwrap();
    assert_eq!((grid.num_cols(0), grid.num_rows()), (40, 40));

    let geometry = grid
        .image_geometry(&footprint::tall_rectangle())
        .unwrap()
        .unwrap();
    assert_eq!(grid.bounds(&geometry), PixelRect::new(10, 0, 20, 30));
}

#[test]
fn test_triangular_target_polygon() {
    let spec = CrsSpec::parse("EPSG:4326,POLYGON((0 0,40 0,0 40,0 0))").unwrap();
    let grid = CrsGrid::with_pixel_size(1.0, spec).unwrap();
    let whole = polygon![(x: 0.0, y: 0.0), (x: 40.0, y: 0.0), (x: 40.0, y: 40.0), (x: 0.0, y: 40.0)];
    let slices = grid.data_slice_rectangles(&whole, TileSize::square(20)).unwrap();
    assert_eq!(
        slices,
        vec![
            PixelRect::new(0, 0, 20, 20),
            PixelRect::new(0, 20, 20, 20),
            PixelRect::new(20, 20, 20, 20),
        ]
    );
}

#[test]
fn test_footprint_outside_target_polygon() {
    let spec = CrsSpec::parse("EPSG:4326,POLYGON((0 0,40 0,0 40,0 0))").unwrap();
    let grid = CrsGrid::with_pixel_size(1.0, spec).unwrap();
    let corner = polygon![(x: 30.0, y: 30.0), (x: 38.0, y: 30.0), (x: 38.0, y: 38.0), (x: 30.0, y: 38.0)];
    assert!(grid.image_geometry(&corner).unwrap().is_none());
    assert!(grid
        .data_slice_rectangles(&corner, TileSize::square(20))
        .unwrap()
        .is_empty());
}

#[test]
fn test_footprint_outside_grid() {
    let grid = CrsGrid::with_pixel_size(1000.0, CrsSpec::parse("EPSG:32632").unwrap()).unwrap();
    assert!(grid.image_geometry(&footprint::pacific()).unwrap().is_none());
    assert!(grid
        .data_slice_rectangles(&footprint::pacific(), TileSize::square(256))
        .unwrap()
        .is_empty());
}

#[test]
fn test_projected_slices_stay_on_grid() {
    let grid = CrsGrid::with_pixel_size(1000.0, CrsSpec::parse("EPSG:32632").unwrap()).unwrap();
    let tile = TileSize::square(128);
    let slices = grid
        .data_slice_rectangles(&footprint::germany_swath(), tile)
        .unwrap();
    assert!(!slices.is_empty());
    let raster = PixelRect::new(0, 0, grid.num_cols(0), grid.num_rows());
    for rect in &slices {
        assert!(!rect.is_empty());
        assert!(rect.width <= tile.width && rect.height <= tile.height);
        assert_eq!(raster.intersection(rect), *rect);
        assert_eq!(rect.x.div_euclid(tile.width), (rect.max_x() - 1).div_euclid(tile.width));
    }

    let bin = grid.bin_index(HAMBURG.lat, HAMBURG.lon);
    let (col, row) = grid.bin_to_col_row(bin).unwrap();
    assert!(slices
        .iter()
        .any(|r| col >= r.x && col < r.max_x() && row >= r.y && row < r.max_y()));
}

#[test]
fn test_web_mercator_slices() {
    let grid = CrsGrid::with_pixel_size(1_000_000.0, CrsSpec::parse("EPSG:3857").unwrap()).unwrap();
    assert_eq!((grid.num_cols(0), grid.num_rows()), (42, 42));
    let slices = grid
        .data_slice_rectangles(&footprint::europe_rectangle(), TileSize::square(8))
        .unwrap();
    assert!(!slices.is_empty());
    assert!(slices.iter().all(|r| r.x >= 21 && r.max_y() <= 21));
}

#[test]
fn test_invalid_tile_size() {
    let grid = one_degree();
    assert!(grid
        .data_slice_rectangles(&footprint::europe_rectangle(), TileSize::new(0, 16))
        .is_err());
}

#[test]
fn test_geo_coding_for_region() {
    let grid = one_degree();
    let gc = grid
        .geo_coding_for_region(&PixelRect::new(190, 40, 20, 10))
        .unwrap();
    assert_eq!((gc.width(), gc.height()), (20, 10));
    let geo = gc.pixel_to_geo(mosaic_common::PixelPos::new(0.5, 0.5));
    assert_approx_eq!(geo.lon, 10.5, 1e-12);
    assert_approx_eq!(geo.lat, 49.5, 1e-12);
    let p = gc.geo_to_pixel(GeoPos::new(45.0, 20.0));
    assert_approx_eq!(p.x, 10.0, 1e-9);
    assert_approx_eq!(p.y, 5.0, 1e-9);

    assert!(grid.geo_coding_for_region(&PixelRect::new(0, 0, 0, 5)).is_err());
    assert!(matches!(
        grid.geo_coding_for_region(&PixelRect::new(350, 170, 20, 20)),
        Err(GridError::OutOfBounds(_))
    ));
}

#[test]
fn test_planetary_grid_crs_variant() {
    let planetary = PlanetaryGrid::Crs(one_degree());
    assert_eq!(planetary.bin_index(0.5, 0.5), 89 * 360 + 180);
    assert!(planetary.as_crs().is_some());
}
