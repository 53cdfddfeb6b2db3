//! Instruction-set levels
//!
//! Levels are ordered by capability and double as indices into the backend
//! registry. Integer level arguments outside `0..SIMD_LEVEL_COUNT` (including
//! [`AUTO_LEVEL`]) mean "fastest available".

use crate::error::ParseNameError;
use core::fmt;
use core::str::FromStr;

/// Number of instruction-set levels
pub const SIMD_LEVEL_COUNT: usize = 6;

/// Sentinel level index that resolves to the fastest available backend
pub const AUTO_LEVEL: usize = usize::MAX;

/// SIMD instruction-set level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SimdLevel {
    /// Scalar fallback (1 lane, always available)
    None = 0,

    /// AArch64 NEON (4 lanes)
    Neon = 1,

    /// x86 SSE2 (4 lanes)
    Sse2 = 2,

    /// x86 SSE4.1 (4 lanes)
    Sse41 = 3,

    /// x86 AVX2 + FMA3 (8 lanes)
    Avx2 = 4,

    /// x86 AVX-512F (16 lanes)
    Avx512 = 5,
}

impl SimdLevel {
    /// Every level in ascending order
    pub const ALL: [SimdLevel; SIMD_LEVEL_COUNT] = [
        SimdLevel::None,
        SimdLevel::Neon,
        SimdLevel::Sse2,
        SimdLevel::Sse41,
        SimdLevel::Avx2,
        SimdLevel::Avx512,
    ];

    /// Level for a registry index, `None` when out of range
    pub fn from_index(index: usize) -> Option<SimdLevel> {
        Self::ALL.get(index).copied()
    }

    /// Registry index of this level
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of f32 lanes processed per instruction
    pub fn lanes(self) -> usize {
        match self {
            SimdLevel::None => 1,
            SimdLevel::Neon | SimdLevel::Sse2 | SimdLevel::Sse41 => 4,
            SimdLevel::Avx2 => 8,
            SimdLevel::Avx512 => 16,
        }
    }

    /// Byte alignment of buffers allocated for this level
    pub fn alignment(self) -> usize {
        self.lanes() * core::mem::size_of::<f32>()
    }

    /// `count` rounded up to a multiple of the lane width
    ///
    /// # Panics
    ///
    /// Panics if the rounded count overflows `usize`.
    pub fn aligned_size(self, count: usize) -> usize {
        count
            .checked_next_multiple_of(self.lanes())
            .expect("lane-aligned size overflows usize")
    }

    /// Display name, also used in regression dump file names
    pub fn name(self) -> &'static str {
        match self {
            SimdLevel::None => "None",
            SimdLevel::Neon => "Neon",
            SimdLevel::Sse2 => "SSE2",
            SimdLevel::Sse41 => "SSE4.1",
            SimdLevel::Avx2 => "AVX2",
            SimdLevel::Avx512 => "AVX512",
        }
    }
}

impl fmt::Display for SimdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for SimdLevel {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s.chars().filter(|c| *c != '.' && *c != '_').collect();
        Self::ALL
            .iter()
            .copied()
            .find(|level| {
                let name: String = level.name().chars().filter(|c| *c != '.').collect();
                name.eq_ignore_ascii_case(&wanted)
            })
            .ok_or_else(|| ParseNameError::new("SIMD level", s))
    }
}
