//! Built-in backends
//!
//! One module per instruction-set level. Each instantiates the generic fill
//! loops with its vector type inside `#[target_feature]` functions and exposes
//! a [`BackendEntry`]. The SIMD entries are only safe to call on a CPU that
//! supports the level, which [`BackendRegistry::register`] enforces.
//!
//! [`BackendRegistry::register`]: crate::BackendRegistry::register

use crate::level::SimdLevel;
use crate::registry::BackendEntry;

pub(crate) mod scalar;

#[cfg(all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) mod sse2;

#[cfg(all(feature = "sse41", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) mod sse41;

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) mod avx2;

#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
pub(crate) mod avx512;

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub(crate) mod neon;

/// Every backend compiled into this build, lowest level first
pub(crate) fn compiled() -> Vec<(SimdLevel, BackendEntry)> {
    #[allow(unused_mut)]
    let mut backends = vec![(SimdLevel::None, scalar::entry())];

    #[cfg(all(feature = "neon", target_arch = "aarch64"))]
    backends.push((SimdLevel::Neon, neon::entry()));

    #[cfg(all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64")))]
    backends.push((SimdLevel::Sse2, sse2::entry()));

    #[cfg(all(feature = "sse41", any(target_arch = "x86", target_arch = "x86_64")))]
    backends.push((SimdLevel::Sse41, sse41::entry()));

    #[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
    backends.push((SimdLevel::Avx2, avx2::entry()));

    #[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
    backends.push((SimdLevel::Avx512, avx512::entry()));

    backends
}
