//! Benchmarks for the ISIN transforms.
//!
//! Run with: cargo bench --package projection --bench isin_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use projection::isin::{IsinApi, Raster, RowTable};

fn bench_row_table(c: &mut Criterion) {
    let mut group = c.benchmark_group("row_table");

    for raster in [Raster::Grid1Km, Raster::Grid500M, Raster::Grid250M] {
        let nrow = raster.num_rows();
        group.bench_with_input(BenchmarkId::from_parameter(nrow), &nrow, |b, &nrow| {
            b.iter(|| RowTable::new(6371007.181, 0.0, 0.0, 0.0, black_box(nrow as f64), 1.0))
        });
    }

    group.finish();
}

fn bench_tile_coordinates(c: &mut Criterion) {
    let mut group = c.benchmark_group("tile_image_coordinates");
    let api = IsinApi::new(Raster::Grid1Km).expect("ISIN api");

    let points: Vec<(f64, f64)> = (0..1000)
        .map(|i| {
            let f = i as f64 / 1000.0;
            (-180.0 + 360.0 * f, -89.0 + 178.0 * ((f * 7.0) % 1.0))
        })
        .collect();
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("forward_1000", |b| {
        b.iter(|| {
            for &(lon, lat) in &points {
                let _ = black_box(api.to_tile_image_coordinates(lon, lat));
            }
        })
    });

    group.bench_function("round_trip_1000", |b| {
        b.iter(|| {
            for &(lon, lat) in &points {
                if let Ok(p) = api.to_tile_image_coordinates(lon, lat) {
                    let _ = black_box(api.tile_image_coordinates_to_geo(
                        p.x,
                        p.y,
                        p.tile_col,
                        p.tile_line,
                    ));
                }
            }
        })
    });

    group.finish();
}

criterion_group!(benches, bench_row_table, bench_tile_coordinates);
criterion_main!(benches);
