//! Benchmarks for LUT evaluation and the image pipeline.
//!
//! Run with: `cargo bench -p cubelut-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use cubelut_color::{ColorPipeline, RgbImage, TransformOptions};
use cubelut_io::resize::{Filter, resize_rgb8};
use cubelut_lut::{Interpolation, LutTable, parse_cube, write_cube_to};

fn ramp(n: usize) -> Vec<[f32; 3]> {
    (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            [t, t * 0.8, t * 0.6]
        })
        .collect()
}

/// Trilinear vs tetrahedral across lattice sizes.
fn bench_interpolation(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolation");

    let pixels = ramp(10_000);
    group.throughput(Throughput::Elements(pixels.len() as u64));

    for size in [17usize, 33, 65] {
        let lut = LutTable::identity(size).unwrap();
        for interp in [Interpolation::Trilinear, Interpolation::Tetrahedral] {
            group.bench_with_input(BenchmarkId::new(interp.name(), size), &lut, |b, lut| {
                b.iter(|| {
                    pixels
                        .iter()
                        .map(|&p| interp.apply(lut, black_box(p)))
                        .collect::<Vec<_>>()
                })
            });
        }
    }

    group.finish();
}

/// Full 8-bit pipeline with and without the gamma wrap.
fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");

    let lut = LutTable::identity(33).unwrap();
    let image = RgbImage::filled(512, 512, [180, 90, 45]);
    group.throughput(Throughput::Elements(image.pixel_count() as u64));

    for log in [false, true] {
        let pipeline = ColorPipeline::new(&lut, TransformOptions::default().with_log_gamma(log));
        let name = if log { "log" } else { "linear" };
        group.bench_function(name, |b| b.iter(|| pipeline.transform(black_box(&image))));
    }

    group.finish();
}

/// Parsing a 33^3 cube file from text.
fn bench_parse(c: &mut Criterion) {
    let mut text = Vec::new();
    write_cube_to(&mut text, &LutTable::identity(33).unwrap()).unwrap();
    let text = String::from_utf8(text).unwrap();

    c.bench_function("parse_cube_33", |b| b.iter(|| parse_cube(black_box(&text)).unwrap()));
}

/// Thumbnail downscale 1920x1080 -> 500x281.
fn bench_thumbnail(c: &mut Criterion) {
    let mut group = c.benchmark_group("thumbnail");
    let src = vec![128u8; 1920 * 1080 * 3];

    for filter in [Filter::Bilinear, Filter::Bicubic, Filter::Lanczos3] {
        group.bench_function(format!("{:?}", filter), |b| {
            b.iter(|| resize_rgb8(black_box(&src), 1920, 1080, 500, 281, filter).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_interpolation, bench_pipeline, bench_parse, bench_thumbnail);
criterion_main!(benches);
