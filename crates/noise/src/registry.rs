//! Backend Registry & Dispatch
//!
//! The registry maps each [`SimdLevel`] to the entry points of a compiled
//! backend. It is built once at startup (built-in backends, then optionally
//! plugins) and is read-only afterwards. A process-wide instance is created on
//! first use; applications that load plugins build their own and install it
//! with [`BackendRegistry::install_global`] before creating any engine.

use crate::backends;
use crate::buffer::AlignedBuffer;
use crate::engine::NoiseSimd;
use crate::level::{SimdLevel, SIMD_LEVEL_COUNT};
use crate::probe::CpuFeatures;
use std::sync::OnceLock;

/// Entry points of one backend
#[derive(Debug, Clone, Copy)]
pub struct BackendEntry {
    /// Build an engine with default settings and the given seed
    pub construct: fn(i32) -> NoiseSimd,
    /// Round a count up to the backend's lane width
    pub aligned_size: fn(usize) -> usize,
    /// Allocate a zeroed, lane-aligned buffer of at least `count` floats
    pub allocate: fn(usize) -> AlignedBuffer,
}

/// Level-indexed table of backends
#[derive(Debug)]
pub struct BackendRegistry {
    entries: [Option<BackendEntry>; SIMD_LEVEL_COUNT],
    features: CpuFeatures,
    probed: SimdLevel,
}

static GLOBAL: OnceLock<BackendRegistry> = OnceLock::new();

/// Level AUTO resolution may not exceed, set by the `force-*` features
fn forced_cap() -> Option<SimdLevel> {
    if cfg!(feature = "force-scalar") {
        Some(SimdLevel::None)
    } else if cfg!(feature = "force-neon") {
        Some(SimdLevel::Neon)
    } else if cfg!(feature = "force-sse2") {
        Some(SimdLevel::Sse2)
    } else if cfg!(feature = "force-sse41") {
        Some(SimdLevel::Sse41)
    } else if cfg!(feature = "force-avx2") {
        Some(SimdLevel::Avx2)
    } else if cfg!(feature = "force-avx512") {
        Some(SimdLevel::Avx512)
    } else {
        None
    }
}

impl BackendRegistry {
    /// Registry holding only the scalar backend
    pub fn new() -> Self {
        Self::with_features(CpuFeatures::detect())
    }

    pub(crate) fn with_features(features: CpuFeatures) -> Self {
        let probed = features.highest_level();
        log::debug!("probed SIMD level: {probed}");
        let mut entries = [None; SIMD_LEVEL_COUNT];
        entries[SimdLevel::None.index()] = Some(backends::scalar::entry());
        Self {
            entries,
            features,
            probed,
        }
    }

    /// Registry with every compiled backend this CPU can run
    ///
    /// Without the `runtime-dispatch` feature only the scalar backend and the
    /// highest usable compiled backend are registered.
    pub fn with_builtin_backends() -> Self {
        let mut registry = Self::new();
        let compiled = backends::compiled();

        if cfg!(feature = "runtime-dispatch") {
            for (level, entry) in compiled {
                registry.register(level.index(), entry);
            }
        } else if let Some((level, entry)) = compiled
            .into_iter()
            .rev()
            .find(|(level, _)| registry.features.supports(*level))
        {
            registry.register(level.index(), entry);
        }

        registry
    }

    /// Process-wide registry, built with
    /// [`with_builtin_backends`](Self::with_builtin_backends) unless another
    /// one was installed first
    pub fn global() -> &'static BackendRegistry {
        GLOBAL.get_or_init(Self::with_builtin_backends)
    }

    /// Make this registry the process-wide one
    ///
    /// Fails, handing the registry back, when the global registry has already
    /// been installed or used.
    pub fn install_global(self) -> Result<(), BackendRegistry> {
        GLOBAL.set(self)
    }

    /// Register `entry` for `level`
    ///
    /// Returns `false`, leaving the table untouched, when `level` is out of
    /// range or the CPU cannot execute that level. A second registration for
    /// the same level replaces the first.
    pub fn register(&mut self, level: usize, entry: BackendEntry) -> bool {
        let Some(simd_level) = SimdLevel::from_index(level) else {
            log::warn!("ignoring backend registration for out-of-range level {level}");
            return false;
        };
        if !self.features.supports(simd_level) {
            log::debug!("skipping {simd_level} backend: not supported by this CPU");
            return false;
        }
        let replaced = self.entries[level].replace(entry).is_some();
        log::debug!(
            "{} {simd_level} backend",
            if replaced { "replaced" } else { "registered" }
        );
        true
    }

    /// Highest level the CPU supports, regardless of registration
    pub fn probed_level(&self) -> SimdLevel {
        self.probed
    }

    /// CPU features the registry was built against
    pub fn features(&self) -> CpuFeatures {
        self.features
    }

    /// Highest registered level not above the probed level
    pub fn fastest_available(&self) -> SimdLevel {
        let ceiling = match forced_cap() {
            Some(cap) => cap.min(self.probed),
            None => self.probed,
        };
        (0..=ceiling.index())
            .rev()
            .find(|&i| self.entries[i].is_some())
            .and_then(SimdLevel::from_index)
            .unwrap_or(SimdLevel::None)
    }

    /// Whether `level` has a registered backend
    pub fn is_supported(&self, level: usize) -> bool {
        self.entry(level).is_some()
    }

    /// Registered levels in ascending order
    pub fn levels(&self) -> impl Iterator<Item = SimdLevel> + '_ {
        SimdLevel::ALL
            .into_iter()
            .filter(|level| self.entries[level.index()].is_some())
    }

    fn entry(&self, level: usize) -> Option<BackendEntry> {
        self.entries.get(level).copied().flatten()
    }

    fn scalar(&self) -> BackendEntry {
        self.entries[SimdLevel::None.index()].unwrap_or_else(backends::scalar::entry)
    }

    /// Build an engine at `level`
    ///
    /// Levels outside `0..SIMD_LEVEL_COUNT`, such as
    /// [`AUTO_LEVEL`](crate::AUTO_LEVEL), resolve to
    /// [`fastest_available`](Self::fastest_available). A level without a
    /// backend falls back to scalar; check [`NoiseSimd::level`] to detect it.
    pub fn create_noise(&self, seed: i32, level: usize) -> NoiseSimd {
        let resolved = match SimdLevel::from_index(level) {
            Some(level) => level,
            None => {
                let fastest = self.fastest_available();
                log::debug!("resolving automatic SIMD level to {fastest}");
                fastest
            }
        };

        match self.entry(resolved.index()) {
            Some(entry) => (entry.construct)(seed),
            None => {
                log::warn!("{resolved} backend is not available, falling back to scalar");
                (self.scalar().construct)(seed)
            }
        }
    }

    /// [`create_noise`](Self::create_noise) with a typed level
    pub fn create_noise_at(&self, seed: i32, level: SimdLevel) -> NoiseSimd {
        self.create_noise(seed, level.index())
    }

    /// `count` rounded up to the lane width of `level`, 0 when unregistered
    pub fn aligned_size(&self, count: usize, level: usize) -> usize {
        self.entry(level).map_or(0, |entry| (entry.aligned_size)(count))
    }

    /// Zeroed buffer for `count` floats at `level`, `None` when unregistered
    pub fn allocate(&self, count: usize, level: usize) -> Option<AlignedBuffer> {
        self.entry(level).map(|entry| (entry.allocate)(count))
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Build an engine through the global registry, see
/// [`BackendRegistry::create_noise`]
pub fn create_noise(seed: i32, level: usize) -> NoiseSimd {
    BackendRegistry::global().create_noise(seed, level)
}

/// Fastest level in the global registry
pub fn fastest_simd() -> SimdLevel {
    BackendRegistry::global().fastest_available()
}

/// Whether `level` is registered in the global registry
pub fn supported_simd(level: usize) -> bool {
    BackendRegistry::global().is_supported(level)
}

/// Lane-padded size for `level` in the global registry, 0 when unregistered
pub fn aligned_size(count: usize, level: usize) -> usize {
    BackendRegistry::global().aligned_size(count, level)
}

/// Allocate through the global registry, `None` when `level` is unregistered
pub fn allocate(count: usize, level: usize) -> Option<AlignedBuffer> {
    BackendRegistry::global().allocate(count, level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::AUTO_LEVEL;

    fn avx2_cpu() -> CpuFeatures {
        CpuFeatures {
            has_sse2: true,
            has_sse41: true,
            has_avx: true,
            has_avx2: true,
            has_fma: true,
            has_avx512_f: false,
            has_neon: false,
        }
    }

    // Scalar entry points run on any CPU, so they can stand in for any level
    fn stand_in() -> BackendEntry {
        backends::scalar::entry()
    }

    #[test]
    fn test_scalar_always_registered() {
        let registry = BackendRegistry::with_features(CpuFeatures::default());
        assert!(registry.is_supported(0));
        assert_eq!(registry.fastest_available(), SimdLevel::None);
        assert_eq!(registry.create_noise(1, AUTO_LEVEL).level(), SimdLevel::None);
    }

    #[test]
    fn test_register_rejects_unsupported_and_out_of_range() {
        let mut registry = BackendRegistry::with_features(avx2_cpu());
        assert!(!registry.register(SimdLevel::Avx512.index(), stand_in()));
        assert!(!registry.register(SimdLevel::Neon.index(), stand_in()));
        assert!(!registry.register(SIMD_LEVEL_COUNT, stand_in()));
        assert!(registry.register(SimdLevel::Sse41.index(), stand_in()));
        assert!(registry.is_supported(SimdLevel::Sse41.index()));
        assert!(!registry.is_supported(SimdLevel::Avx512.index()));
    }

    #[test]
    fn test_fastest_walks_down_to_registered() {
        let mut registry = BackendRegistry::with_features(avx2_cpu());
        registry.register(SimdLevel::Sse2.index(), stand_in());
        if forced_cap().is_none() {
            assert_eq!(registry.fastest_available(), SimdLevel::Sse2);
        }
        assert_eq!(registry.levels().collect::<Vec<_>>(), vec![SimdLevel::None, SimdLevel::Sse2]);
    }

    #[test]
    fn test_unregistered_level_falls_back() {
        let registry = BackendRegistry::with_features(avx2_cpu());
        let noise = registry.create_noise(1337, SimdLevel::Avx2.index());
        assert_eq!(noise.level(), SimdLevel::None);
        assert_eq!(noise.seed(), 1337);
        assert_eq!(registry.aligned_size(9, SimdLevel::Avx2.index()), 0);
        assert!(registry.allocate(9, SimdLevel::Avx2.index()).is_none());
        assert_eq!(registry.aligned_size(9, 0), 9);
        assert_eq!(registry.allocate(9, 0).map(|b| b.len()), Some(9));
    }

    #[test]
    fn test_auto_matches_fastest() {
        let registry = BackendRegistry::with_builtin_backends();
        let fastest = registry.fastest_available();
        assert!(registry.is_supported(fastest.index()));
        assert_eq!(registry.create_noise(0, AUTO_LEVEL).level(), fastest);
        assert_eq!(registry.create_noise(0, SIMD_LEVEL_COUNT).level(), fastest);
    }
}
