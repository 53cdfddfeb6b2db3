//! Capability Probe
//!
//! Runtime CPU feature detection. On x86 the `cpufeatures` crate executes
//! CPUID and, for the AVX family, also checks via XGETBV that the OS saves the
//! wider register state. On AArch64 the platform feature API reports NEON.

use crate::level::SimdLevel;

/// CPU Feature Detection Results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuFeatures {
    /// SSE2 (x86 baseline on 64-bit)
    pub has_sse2: bool,

    /// SSE4.1 (`roundps`, `pmulld`, `blendvps`)
    pub has_sse41: bool,

    /// AVX, including OS support for the YMM save state
    pub has_avx: bool,

    /// AVX2 integer operations
    pub has_avx2: bool,

    /// FMA3 fused multiply-add
    pub has_fma: bool,

    /// AVX-512 Foundation, including OS support for the ZMM save state
    pub has_avx512_f: bool,

    /// AArch64 Advanced SIMD
    pub has_neon: bool,
}

impl CpuFeatures {
    /// Detect CPU features at runtime
    ///
    /// # Platform Behavior
    /// - **x86 / x86_64**: CPUID + XGETBV through `cpufeatures`
    /// - **aarch64**: `is_aarch64_feature_detected!("neon")`
    /// - **other**: nothing detected, scalar only
    ///
    /// The first call costs a few hundred cycles; `cpufeatures` caches the
    /// result so repeated calls are cheap.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            cpufeatures::new!(cpuid_sse2, "sse2");
            cpufeatures::new!(cpuid_sse41, "sse4.1");
            cpufeatures::new!(cpuid_avx, "avx");
            cpufeatures::new!(cpuid_avx2, "avx2");
            cpufeatures::new!(cpuid_fma, "fma");
            cpufeatures::new!(cpuid_avx512f, "avx512f");

            Self {
                has_sse2: cpuid_sse2::get(),
                has_sse41: cpuid_sse41::get(),
                has_avx: cpuid_avx::get(),
                has_avx2: cpuid_avx2::get(),
                has_fma: cpuid_fma::get(),
                has_avx512_f: cpuid_avx512f::get(),
                has_neon: false,
            }
        }

        #[cfg(target_arch = "aarch64")]
        {
            Self {
                has_neon: std::arch::is_aarch64_feature_detected!("neon"),
                ..Self::default()
            }
        }

        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
        {
            Self::default()
        }
    }

    /// Highest level these features can execute
    ///
    /// Walks the x86 ladder in order and stops at the first missing step:
    /// SSE2, SSE4.1, AVX (with OS save state), AVX2 + FMA, AVX-512F. On ARM the
    /// answer is either Neon or None.
    pub fn highest_level(&self) -> SimdLevel {
        if self.has_neon {
            return SimdLevel::Neon;
        }
        if !self.has_sse2 {
            return SimdLevel::None;
        }
        if !self.has_sse41 {
            return SimdLevel::Sse2;
        }
        if !self.has_avx || !self.has_avx2 || !self.has_fma {
            return SimdLevel::Sse41;
        }
        if !self.has_avx512_f {
            return SimdLevel::Avx2;
        }
        SimdLevel::Avx512
    }

    /// Whether code compiled for `level` can run on this CPU
    pub fn supports(&self, level: SimdLevel) -> bool {
        let highest = self.highest_level();
        match level {
            SimdLevel::None => true,
            SimdLevel::Neon => highest == SimdLevel::Neon,
            _ => highest != SimdLevel::Neon && level <= highest,
        }
    }
}

/// Highest instruction-set level usable by this process
///
/// Pure with respect to process state; the registry caches the answer.
pub fn highest_supported_level() -> SimdLevel {
    CpuFeatures::detect().highest_level()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x86(sse41: bool, avx: bool, avx2: bool, fma: bool, avx512: bool) -> CpuFeatures {
        CpuFeatures {
            has_sse2: true,
            has_sse41: sse41,
            has_avx: avx,
            has_avx2: avx2,
            has_fma: fma,
            has_avx512_f: avx512,
            has_neon: false,
        }
    }

    #[test]
    fn test_ladder_stops_at_first_gap() {
        assert_eq!(CpuFeatures::default().highest_level(), SimdLevel::None);
        assert_eq!(x86(false, true, true, true, true).highest_level(), SimdLevel::Sse2);
        assert_eq!(x86(true, false, true, true, false).highest_level(), SimdLevel::Sse41);
        assert_eq!(x86(true, true, true, false, false).highest_level(), SimdLevel::Sse41);
        assert_eq!(x86(true, true, true, true, false).highest_level(), SimdLevel::Avx2);
        assert_eq!(x86(true, true, true, true, true).highest_level(), SimdLevel::Avx512);
    }

    #[test]
    fn test_supports_is_family_aware() {
        let avx2 = x86(true, true, true, true, false);
        assert!(avx2.supports(SimdLevel::None));
        assert!(avx2.supports(SimdLevel::Sse41));
        assert!(!avx2.supports(SimdLevel::Neon));
        assert!(!avx2.supports(SimdLevel::Avx512));

        let arm = CpuFeatures {
            has_neon: true,
            ..CpuFeatures::default()
        };
        assert_eq!(arm.highest_level(), SimdLevel::Neon);
        assert!(arm.supports(SimdLevel::Neon));
        assert!(!arm.supports(SimdLevel::Sse2));
    }

    #[test]
    fn test_detect_is_stable() {
        assert_eq!(CpuFeatures::detect(), CpuFeatures::detect());
        println!("Highest supported level: {}", highest_supported_level());
    }
}
