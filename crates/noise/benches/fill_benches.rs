//! Criterion benchmarks for hasty-noise
//!
//! Measures grid fill throughput per noise type at every registered level.
//! Run with: cargo bench --bench fill_benches

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hasty_noise::{BackendRegistry, GridRegion, NoiseType, PerturbType};
use std::hint::black_box;

const EDGE: usize = 32;

/// Benchmark a 32^3 grid fill for each noise type and level
fn bench_grid_fill(c: &mut Criterion) {
    let registry = BackendRegistry::global();
    let region = GridRegion::sized(EDGE, EDGE, EDGE);

    for noise_type in NoiseType::ALL {
        let mut group = c.benchmark_group(format!("grid/{noise_type}"));
        group.throughput(Throughput::Elements(region.len() as u64));

        for level in registry.levels() {
            let mut noise = registry.create_noise_at(1337, level);
            noise.set_noise_type(noise_type);
            let mut out = noise.empty_set(region.len());

            group.bench_with_input(BenchmarkId::from_parameter(level), &region, |bencher, region| {
                bencher.iter(|| noise.fill_set(black_box(&mut out), black_box(region), 1.0))
            });
        }

        group.finish();
    }
}

/// Benchmark the perturbation layer on top of simplex
fn bench_perturb(c: &mut Criterion) {
    let registry = BackendRegistry::global();
    let region = GridRegion::sized(EDGE, EDGE, EDGE);
    let level = registry.fastest_available();
    let mut group = c.benchmark_group("perturb");
    group.throughput(Throughput::Elements(region.len() as u64));

    for perturb_type in PerturbType::ALL {
        let mut noise = registry.create_noise_at(1337, level);
        noise.set_noise_type(NoiseType::Simplex);
        noise.set_perturb_type(perturb_type);
        let mut out = noise.empty_set(region.len());

        group.bench_function(perturb_type.name(), |bencher| {
            bencher.iter(|| noise.fill_set(black_box(&mut out), black_box(&region), 1.0))
        });
    }

    group.finish();
}

/// Benchmark point-set fills against the equivalent grid
fn bench_vector_set(c: &mut Criterion) {
    let registry = BackendRegistry::global();
    let mut noise = registry.create_noise(1337, usize::MAX);
    noise.set_noise_type(NoiseType::PerlinFractal);
    let set = noise.vector_set(EDGE, EDGE, EDGE);
    let mut out = noise.empty_set(set.len());

    c.bench_function("vector_set/perlin_fractal", |bencher| {
        bencher.iter(|| noise.fill_vector_set(black_box(&mut out), black_box(&set), [0.0; 3]))
    });
}

criterion_group!(benches, bench_grid_fill, bench_perturb, bench_vector_set);
criterion_main!(benches);
