//! Benchmarks for pixkit engines.
//!
//! Run with: `cargo bench -p pixkit-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

use pixkit_core::PixelBuffer;
use pixkit_ops::composite::{CompositionItem, CompositionOptions, Direction, AutoLayout, compose};
use pixkit_ops::grayscale::{GrayMode, to_grayscale};
use pixkit_ops::sketch::extract_sketch;
use pixkit_ops::tone::{FilterPreset, ToneParameters, apply_tone};

/// Deterministic gradient with some texture.
fn test_image(w: u32, h: u32) -> PixelBuffer {
    let mut img = PixelBuffer::new(w, h).unwrap();
    for y in 0..h {
        for x in 0..w {
            let n = ((x * 31) ^ (y * 17)) as u8;
            img.set_pixel(x, y, [(x % 256) as u8, (y % 256) as u8, n, 255]);
        }
    }
    img
}

const SIZES: [u32; 3] = [128, 512, 1024];

fn bench_tone(c: &mut Criterion) {
    let mut group = c.benchmark_group("tone");
    let full = ToneParameters {
        brightness: 10.0,
        contrast: 20.0,
        saturation: 15.0,
        highlights: -10.0,
        temperature: 65.0,
        sharpness: 40.0,
        vignette: 30.0,
        filter: FilterPreset::Cinema,
        ..Default::default()
    };
    let rotated = ToneParameters { rotation: 30.0, ..Default::default() };

    for size in SIZES {
        let img = test_image(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));

        group.bench_with_input(BenchmarkId::new("full_chain", size), &img, |b, img| {
            b.iter(|| apply_tone(black_box(img), &full).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("rotate_30", size), &img, |b, img| {
            b.iter(|| apply_tone(black_box(img), &rotated).unwrap())
        });
    }

    group.finish();
}

fn bench_grayscale(c: &mut Criterion) {
    let mut group = c.benchmark_group("grayscale");
    for size in SIZES {
        let img = test_image(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("soft", size), &img, |b, img| {
            b.iter(|| to_grayscale(black_box(img), GrayMode::Soft, 110.0, 130.0))
        });
    }
    group.finish();
}

fn bench_sketch(c: &mut Criterion) {
    let mut group = c.benchmark_group("sketch");
    group.sample_size(20);
    for size in SIZES {
        let img = test_image(size, size);
        group.throughput(Throughput::Elements((size * size) as u64));
        group.bench_with_input(BenchmarkId::new("default", size), &img, |b, img| {
            b.iter(|| extract_sketch(black_box(img), 30.0, 50.0, 50.0).unwrap())
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let items: Vec<CompositionItem> = (0..6)
        .map(|i| CompositionItem::new(test_image(300 + i * 20, 200), 0, 0))
        .collect();
    let options = CompositionOptions {
        gap: 8,
        padding: 16,
        auto_layout: Some(AutoLayout { direction: Direction::Horizontal, fixed_size: None }),
        ..Default::default()
    };
    group.bench_function("six_strip", |b| b.iter(|| compose(black_box(&items), &options).unwrap()));

    let fixed = CompositionOptions {
        auto_layout: Some(AutoLayout { direction: Direction::Vertical, fixed_size: Some((256, 256)) }),
        ..options
    };
    group.bench_function("six_fixed_cells", |b| b.iter(|| compose(black_box(&items), &fixed).unwrap()));
    group.finish();
}

criterion_group!(benches, bench_tone, bench_grayscale, bench_sketch, bench_compose);
criterion_main!(benches);
