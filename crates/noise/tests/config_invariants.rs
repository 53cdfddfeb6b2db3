//! Configuration invariants
//!
//! Derived parameters (fractal bounding, distance indices) must stay
//! consistent with whatever sequence of setters the caller uses.

use hasty_noise::{
    calculate_fractal_bounding, create_noise, CellularReturnType, FractalType, NoiseConfig,
    NoiseSettings, NoiseType, PerturbType, AUTO_LEVEL,
};
use proptest::prelude::*;

#[test]
fn test_defaults() {
    let settings = NoiseSettings::default();
    assert_eq!(settings.noise.seed(), 1337);
    assert_eq!(settings.noise.frequency(), 0.01);
    assert_eq!(settings.noise_type, NoiseType::SimplexFractal);
    assert_eq!(settings.fractal_type, FractalType::Fbm);
    assert_eq!(settings.noise.octaves(), 3);
    assert_eq!(settings.cellular_return_type, CellularReturnType::Distance);
    assert_eq!(settings.perturb_type, PerturbType::None);
    assert_eq!(settings.noise.cellular_distance_indices(), (0, 1));
    assert_eq!(settings.noise.cellular_jitter(), 0.45);
}

#[test]
fn test_default_bounding() {
    let bounding = NoiseConfig::default().fractal_bounding();
    assert!((bounding - 0.571_428_6).abs() < 1e-6);
}

#[test]
fn test_bounding_tracks_octaves_and_gain() {
    let mut noise = create_noise(0, AUTO_LEVEL);
    noise.set_fractal_octaves(5);
    noise.set_fractal_gain(0.6);
    let expected = calculate_fractal_bounding(5, 0.6);
    assert_eq!(noise.settings().noise.fractal_bounding(), expected);

    noise.set_perturb_fractal_octaves(2);
    noise.set_perturb_fractal_gain(0.25);
    assert_eq!(noise.settings().perturb.fractal_bounding(), 1.0 / 1.25);
}

#[test]
fn test_zero_octaves_clamps_to_one() {
    let mut config = NoiseConfig::default();
    config.set_octaves(0);
    assert_eq!(config.octaves(), 1);
    assert_eq!(config.fractal_bounding(), 1.0);
}

#[test]
fn test_distance_indices_are_reordered() {
    let mut noise = create_noise(0, AUTO_LEVEL);
    noise.set_cellular_distance2_indices(3, 1);
    assert_eq!(noise.settings().noise.cellular_distance_indices(), (1, 3));
    noise.set_cellular_distance2_indices(-4, 9);
    assert_eq!(noise.settings().noise.cellular_distance_indices(), (0, 3));
}

#[test]
fn test_cellular_lookup_never_selects_cellular() {
    let mut noise = create_noise(0, AUTO_LEVEL);
    noise.set_cellular_noise_lookup_type(NoiseType::Cellular);
    assert_eq!(noise.settings().cellular_lookup_type(), NoiseType::Simplex);
    noise.set_cellular_noise_lookup_type(NoiseType::PerlinFractal);
    assert_eq!(noise.settings().cellular_lookup_type(), NoiseType::PerlinFractal);
}

#[test]
fn test_names_parse_back() {
    for noise_type in NoiseType::ALL {
        assert_eq!(noise_type.to_string().parse::<NoiseType>().ok(), Some(noise_type));
    }
    for perturb_type in PerturbType::ALL {
        assert_eq!(perturb_type.name().parse::<PerturbType>().ok(), Some(perturb_type));
    }
    assert!("Voronoi".parse::<NoiseType>().is_err());
}

proptest! {
    #[test]
    fn prop_distance_indices_ordered_and_clamped(a in -100i32..100, b in -100i32..100) {
        let mut config = NoiseConfig::default();
        config.set_cellular_distance_indices(a, b);
        let (i0, i1) = config.cellular_distance_indices();
        prop_assert!(i0 <= i1);
        prop_assert!(i1 <= NoiseConfig::MAX_DISTANCE_INDEX);
    }

    #[test]
    fn prop_bounding_normalises_geometric_sum(octaves in 1u32..12, gain in 0.05f32..1.5) {
        let bounding = calculate_fractal_bounding(octaves, gain);
        let sum: f32 = (0..octaves).map(|i| gain.powi(i as i32)).sum();
        prop_assert!((bounding * sum - 1.0).abs() < 1e-4);
    }
}
