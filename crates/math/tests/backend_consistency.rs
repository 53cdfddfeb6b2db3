//! Backend Consistency Tests
//!
//! Every vector backend must reproduce the scalar backend bit for bit on the
//! operations noise kernels are built from. Backends the running CPU cannot
//! execute are skipped.

use hasty_math::{ScalarInt, ScalarVector, SimdInt, SimdVector};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;

fn proptest_config() -> ProptestConfig {
    ProptestConfig {
        cases: 2_000,
        ..ProptestConfig::default()
    }
}

/// The kernel-shaped expression under test: lattice hash plus interpolation
fn probe<V: SimdVector>(x: V, y: V, seed: i32) -> (V, V::IntBits) {
    let xf = x.floor();
    let t = x.sub(xf);
    let cell = x.floor_to_int().mul_scalar(1619);
    let row = y.round_to_int().mul_scalar(31337);
    let mut hash = V::IntBits::splat(seed).xor(cell).xor(row);
    hash = hash.mul(hash).mul_scalar(60493).mul(hash);
    hash = hash.shr(13).xor(hash);

    let value = V::from_int(hash.and_scalar(1023)).sub(V::splat(511.5));
    let blend = V::select(t.lt(V::splat(0.5)), value.abs(), value.neg());
    let shaped = blend.mul(t).add(y.max(x).min(V::splat(64.0))).div(V::splat(3.0));
    (shaped.add(x.abs().sqrt()), hash)
}

fn scalar_reference(xs: &[f32], ys: &[f32], seed: i32) -> (Vec<f32>, Vec<i32>) {
    let mut values = Vec::new();
    let mut hashes = Vec::new();
    for (&x, &y) in xs.iter().zip(ys) {
        let (v, h): (ScalarVector, ScalarInt) = probe(ScalarVector(x), ScalarVector(y), seed);
        values.push(v.0);
        hashes.push(h.0);
    }
    (values, hashes)
}

fn run_backend<V: SimdVector>(xs: &[f32], ys: &[f32], seed: i32) -> (Vec<f32>, Vec<i32>) {
    let mut values = vec![0.0; xs.len()];
    let mut hashes = vec![0; xs.len()];
    for start in (0..xs.len()).step_by(V::LANES) {
        let end = start + V::LANES;
        let (v, h) = probe(V::from_slice(&xs[start..end]), V::from_slice(&ys[start..end]), seed);
        v.to_slice(&mut values[start..end]);
        h.to_slice(&mut hashes[start..end]);
    }
    (values, hashes)
}

fn assert_matches_scalar<V: SimdVector>(xs: &[f32], ys: &[f32], seed: i32) {
    let (expected_v, expected_h) = scalar_reference(xs, ys, seed);
    let (actual_v, actual_h) = run_backend::<V>(xs, ys, seed);
    assert_eq!(expected_h, actual_h, "hash lanes diverged");
    for (i, (e, a)) in expected_v.iter().zip(&actual_v).enumerate() {
        assert_eq!(e.to_bits(), a.to_bits(), "lane {i}: scalar {e} vs vector {a}");
    }
}

fn coords() -> impl Strategy<Value = (Vec<f32>, Vec<f32>)> {
    (
        prop::collection::vec(-4096.0f32..4096.0, 16),
        prop::collection::vec(-4096.0f32..4096.0, 16),
    )
}

#[cfg(all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64")))]
#[test]
fn test_sse2_matches_scalar() {
    proptest!(proptest_config(), |((xs, ys) in coords(), seed in any::<i32>())| {
        assert_matches_scalar::<hasty_math::Sse2Vector>(&xs, &ys, seed);
    });
}

#[cfg(all(feature = "sse41", any(target_arch = "x86", target_arch = "x86_64")))]
#[test]
fn test_sse41_matches_scalar() {
    if !std::arch::is_x86_feature_detected!("sse4.1") {
        return;
    }
    proptest!(proptest_config(), |((xs, ys) in coords(), seed in any::<i32>())| {
        assert_matches_scalar::<hasty_math::Sse41Vector>(&xs, &ys, seed);
    });
}

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
#[test]
fn test_avx2_matches_scalar() {
    if !(std::arch::is_x86_feature_detected!("avx2") && std::arch::is_x86_feature_detected!("fma")) {
        return;
    }
    proptest!(proptest_config(), |((xs, ys) in coords(), seed in any::<i32>())| {
        assert_matches_scalar::<hasty_math::Avx2Vector>(&xs, &ys, seed);
    });
}

#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
#[test]
fn test_avx512_matches_scalar() {
    if !std::arch::is_x86_feature_detected!("avx512f") {
        return;
    }
    proptest!(proptest_config(), |((xs, ys) in coords(), seed in any::<i32>())| {
        assert_matches_scalar::<hasty_math::Avx512Vector>(&xs, &ys, seed);
    });
}

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
#[test]
fn test_neon_matches_scalar() {
    proptest!(proptest_config(), |((xs, ys) in coords(), seed in any::<i32>())| {
        assert_matches_scalar::<hasty_math::NeonVector>(&xs, &ys, seed);
    });
}

#[test]
fn test_scalar_negative_zero_floor() {
    let floored = ScalarVector(-0.0).floor();
    assert!(floored.0 == 0.0 && floored.0.is_sign_negative());
}
