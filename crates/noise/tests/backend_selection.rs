//! Backend Selection Integration Tests
//!
//! Checks that the registry resolves AUTO to the probed level, falls back to
//! scalar for missing levels and honours the `force-*` caps.

use hasty_noise::{
    aligned_size, allocate, create_noise, fastest_simd, highest_supported_level, supported_simd,
    BackendRegistry, CpuFeatures, SimdLevel, AUTO_LEVEL, SIMD_LEVEL_COUNT,
};
use proptest::prelude::*;

#[test]
fn test_probe_is_stable() {
    let features = CpuFeatures::detect();
    assert_eq!(features, CpuFeatures::detect());
    assert_eq!(features.highest_level(), highest_supported_level());
    assert!(features.supports(SimdLevel::None));

    #[cfg(target_arch = "aarch64")]
    assert!(!features.supports(SimdLevel::Avx2));

    #[cfg(target_arch = "x86_64")]
    {
        assert!(features.supports(SimdLevel::Sse2));
        assert!(!features.supports(SimdLevel::Neon));
    }
}

#[test]
fn test_scalar_is_always_supported() {
    assert!(supported_simd(SimdLevel::None.index()));
    assert!(!supported_simd(SIMD_LEVEL_COUNT));
    assert!(!supported_simd(AUTO_LEVEL));
}

#[test]
fn test_auto_resolves_to_fastest() {
    let fastest = fastest_simd();
    assert!(supported_simd(fastest.index()));
    assert!(fastest <= highest_supported_level());
    assert_eq!(create_noise(1337, AUTO_LEVEL).level(), fastest);
    assert_eq!(create_noise(1337, SIMD_LEVEL_COUNT + 3).level(), fastest);

    #[cfg(feature = "force-scalar")]
    assert_eq!(fastest, SimdLevel::None);
}

#[test]
fn test_every_registered_level_builds_its_own_engine() {
    let registry = BackendRegistry::global();
    for level in registry.levels() {
        let noise = registry.create_noise_at(42, level);
        assert_eq!(noise.level(), level);
        assert_eq!(noise.seed(), 42);
    }
}

#[test]
fn test_missing_level_falls_back_to_scalar() {
    let registry = BackendRegistry::new();
    for level in SimdLevel::ALL.into_iter().skip(1) {
        assert!(!registry.is_supported(level.index()));
        assert_eq!(registry.create_noise_at(7, level).level(), SimdLevel::None);
    }
}

#[test]
fn test_allocation_for_unregistered_level() {
    let unregistered = SimdLevel::ALL
        .into_iter()
        .find(|level| !supported_simd(level.index()));
    if let Some(level) = unregistered {
        assert_eq!(aligned_size(10, level.index()), 0);
        assert!(allocate(10, level.index()).is_none());
    }
    assert_eq!(aligned_size(10, SIMD_LEVEL_COUNT), 0);
    assert!(allocate(10, SIMD_LEVEL_COUNT).is_none());
}

#[test]
fn test_global_cannot_be_replaced_after_use() {
    let _ = fastest_simd();
    assert!(BackendRegistry::new().install_global().is_err());
}

proptest! {
    #[test]
    fn prop_aligned_size_rounds_up_to_lanes(count in 0usize..100_000) {
        let registry = BackendRegistry::global();
        for level in registry.levels() {
            let size = registry.aligned_size(count, level.index());
            prop_assert!(size >= count);
            prop_assert!(size < count + level.lanes());
            prop_assert_eq!(size % level.lanes(), 0);
        }
    }

    #[test]
    fn prop_allocations_are_aligned_and_zeroed(count in 1usize..2_000) {
        let registry = BackendRegistry::global();
        for level in registry.levels() {
            let buffer = registry.allocate(count, level.index());
            prop_assert!(buffer.is_some());
            if let Some(buffer) = buffer {
                prop_assert!(buffer.len() >= count);
                prop_assert_eq!(buffer.as_ptr() as usize % level.alignment(), 0);
                prop_assert!(buffer.iter().all(|&v| v == 0.0));
            }
        }
    }
}
