//! Benchmarks for the memecut pipeline.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{Rgba, RgbaImage};

use memecut::render::{quantize, Encoder};
use memecut::{
    compose_cell, partition, split_image, Background, CellAdjustment, GridModel, Margins,
    OutputFormat, OutputSize, Rect, SplitSettings, StandardEncoder,
};

/// Gradient with a transparent corner, so GIF quantization has work to do.
fn source(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if x < width / 8 && y < height / 8 { 0 } else { 255 };
        Rgba([
            ((x * 2) % 256) as u8,
            ((y * 2) % 256) as u8,
            (((x + y) * 3) % 256) as u8,
            alpha,
        ])
    })
}

// -- Partition benchmarks --

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("partition");

    let small = GridModel::new(2, 2);
    let large = GridModel::new(20, 20);

    group.bench_function("partition_2x2", |b| {
        b.iter(|| partition(black_box(&small), 1024, 768))
    });

    group.bench_function("partition_20x20", |b| {
        b.iter(|| partition(black_box(&large), 4096, 4096))
    });

    group.finish();
}

// -- Compositing benchmarks --

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    let img = source(512, 512);
    let rect = Rect::new(0, 0, 256, 256);

    let neutral = CellAdjustment::default();
    let padded = CellAdjustment {
        margins: Margins::uniform(16),
        is_square: true,
        background: Background::White,
        ..Default::default()
    };
    let resized = CellAdjustment {
        output_size: OutputSize::Fixed(128),
        is_square: true,
        ..Default::default()
    };

    group.bench_function("compose_neutral", |b| {
        b.iter(|| compose_cell(black_box(&img), &rect, &neutral).unwrap())
    });

    group.bench_function("compose_square_white", |b| {
        b.iter(|| compose_cell(black_box(&img), &rect, &padded).unwrap())
    });

    group.bench_function("compose_resample_128", |b| {
        b.iter(|| compose_cell(black_box(&img), &rect, &resized).unwrap())
    });

    group.finish();
}

// -- Encoding benchmarks --

fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let cell = source(128, 128);
    let encoder = StandardEncoder;

    group.bench_function("png_128", |b| {
        b.iter(|| encoder.encode_png(black_box(&cell)).unwrap())
    });

    group.bench_function("quantize_128", |b| {
        b.iter(|| quantize(black_box(&cell), Background::Transparent))
    });

    group.bench_function("gif_128", |b| {
        b.iter(|| {
            encoder
                .try_encode_gif(black_box(&cell), Background::Transparent)
                .unwrap()
        })
    });

    group.finish();
}

// -- Full split benchmarks --

fn bench_split(c: &mut Criterion) {
    let mut group = c.benchmark_group("split");
    group.sample_size(10);

    let img = source(512, 512);
    let grid = GridModel::new(3, 3);
    let png = SplitSettings::default();
    let gif = SplitSettings {
        format: OutputFormat::Gif,
        ..Default::default()
    };

    group.bench_function("split_3x3_png", |b| {
        b.iter(|| split_image(black_box(&img), &grid, &png, &StandardEncoder).unwrap())
    });

    group.bench_function("split_3x3_gif", |b| {
        b.iter(|| split_image(black_box(&img), &grid, &gif, &StandardEncoder).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_partition, bench_compose, bench_encode, bench_split);
criterion_main!(benches);
