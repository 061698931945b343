//! Benchmarks for texture descriptors

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use texturefeat_algorithms::texture::{
    cooccurrence_matrix, glcm_features, haralick_features, lbp_features, GlcmParams, LbpConfig,
    LbpVariant,
};
use texturefeat_core::raster::{Direction, GrayscaleMatrix};

fn create_texture(size: usize, levels: u32) -> GrayscaleMatrix {
    let data = (0..size * size)
        .map(|i| {
            let (row, col) = (i / size, i % size);
            ((row * 7 + col * 13 + (row * col) % 11) as u32) % levels
        })
        .collect();
    GrayscaleMatrix::from_vec(data, size, size, levels).unwrap()
}

fn bench_cooccurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture/cooccurrence");
    for size in [256, 512, 1024] {
        let img = create_texture(size, 64);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| cooccurrence_matrix(black_box(&img), 1, Direction::Deg45).unwrap())
        });
    }
    group.finish();
}

fn bench_haralick(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture/haralick");
    for levels in [16, 64, 256] {
        let img = create_texture(256, levels);
        let glcm = cooccurrence_matrix(&img, 1, Direction::Deg0).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(levels), &levels, |b, _| {
            b.iter(|| haralick_features(black_box(&glcm)).unwrap())
        });
    }
    group.finish();
}

fn bench_glcm_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture/glcm");
    for size in [256, 512, 1024] {
        let img = create_texture(size, 32);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| glcm_features(black_box(&img), GlcmParams::default()).unwrap())
        });
    }
    group.finish();
}

fn bench_lbp_variants(c: &mut Criterion) {
    let mut group = c.benchmark_group("texture/lbp");
    let img = create_texture(512, 256);
    for (name, variant) in [
        ("basic", LbpVariant::Basic),
        ("riu2", LbpVariant::Riu2),
        ("completed", LbpVariant::Completed),
        ("riv", LbpVariant::Riv { phase: 0.0 }),
    ] {
        let config = LbpConfig {
            variant,
            ..LbpConfig::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(name), &config, |b, config| {
            b.iter(|| lbp_features(black_box(&img), *config).unwrap())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_cooccurrence,
    bench_haralick,
    bench_glcm_pipeline,
    bench_lbp_variants
);
criterion_main!(benches);
