//! AVX2 backend implementation (x86-64)
//!
//! This backend provides 8-lane (256-bit) SIMD operations using AVX2 and FMA3.
//! Requires an x86-64 CPU with AVX2 support (Intel Haswell 2013+, AMD Excavator 2015+).
//!
//! **Note**: the wrappers are `#[inline(always)]` and carry no target features of
//! their own. They must be reached from a `#[target_feature(enable = "avx2,fma")]`
//! function, which is how the noise crate's dispatch entry points call them.

// This backend only compiles on x86/x86_64 targets
#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use crate::traits::{SimdInt, SimdMask, SimdVector};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// AVX2 vector wrapper (8 lanes of f32)
///
/// Wraps __m256 intrinsic type to provide SimdVector trait implementation.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Vector(__m256);

/// AVX2 mask wrapper (8-lane mask)
///
/// Uses __m256 to represent per-lane boolean values.
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Mask(__m256);

/// AVX2 integer vector wrapper (8 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx2Int(__m256i);

impl SimdInt for Avx2Int {
    type FloatVec = Avx2Vector;

    const LANES: usize = 8;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { Avx2Int(_mm256_set1_epi32(value)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        unsafe { _mm256_storeu_si256(slice.as_mut_ptr() as *mut __m256i, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_mullo_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_and_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_or_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Avx2Int(_mm256_xor_si256(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe {
            // AVX2 shift requires a 128-bit count vector
            let shift_count = _mm_cvtsi32_si128(count as i32);
            Avx2Int(_mm256_srl_epi32(self.0, shift_count))
        }
    }

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe {
            let shift_count = _mm_cvtsi32_si128(count as i32);
            Avx2Int(_mm256_sll_epi32(self.0, shift_count))
        }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask(_mm256_castsi256_ps(_mm256_cmpgt_epi32(rhs.0, self.0))) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Avx2Mask {
        unsafe { Avx2Mask(_mm256_castsi256_ps(_mm256_cmpeq_epi32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn select(mask: Avx2Mask, true_val: Self, false_val: Self) -> Self {
        unsafe {
            Avx2Int(_mm256_blendv_epi8(
                false_val.0,
                true_val.0,
                _mm256_castps_si256(mask.0),
            ))
        }
    }

    #[inline(always)]
    fn to_f32(self) -> Avx2Vector {
        unsafe { Avx2Vector(_mm256_cvtepi32_ps(self.0)) }
    }
}

impl SimdVector for Avx2Vector {
    type Mask = Avx2Mask;
    type IntBits = Avx2Int;

    const LANES: usize = 8;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Avx2Vector(_mm256_set1_ps(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 load");
        unsafe { Avx2Vector(_mm256_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX2 store");
        unsafe { _mm256_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_add_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_sub_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_mul_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_div_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Avx2Vector(_mm256_xor_ps(self.0, _mm256_set1_ps(-0.0))) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe {
            let mask = _mm256_set1_ps(f32::from_bits(0x7fffffff));
            Avx2Vector(_mm256_and_ps(self.0, mask))
        }
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        unsafe { Avx2Vector(_mm256_fmadd_ps(self.0, b.0, c.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Avx2Vector(_mm256_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Avx2Vector(_mm256_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_LT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_LE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_GT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_GE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { Avx2Mask(_mm256_cmp_ps::<_CMP_EQ_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { Avx2Vector(_mm256_blendv_ps(false_val.0, true_val.0, mask.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe {
            // Fold the high half onto the low half, then reduce 4 lanes
            let hi = _mm256_extractf128_ps::<1>(self.0);
            let lo = _mm256_castps256_ps128(self.0);
            let sum4 = _mm_add_ps(lo, hi);
            let sum2 = _mm_add_ps(sum4, _mm_movehl_ps(sum4, sum4));
            let sum1 = _mm_add_ss(sum2, _mm_shuffle_ps::<0b01>(sum2, sum2));
            _mm_cvtss_f32(sum1)
        }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        let mut lanes = [0.0f32; 8];
        self.to_slice(&mut lanes);
        lanes.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        let mut lanes = [0.0f32; 8];
        self.to_slice(&mut lanes);
        lanes.iter().copied().fold(f32::INFINITY, f32::min)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { Avx2Vector(_mm256_floor_ps(self.0)) }
    }

    #[inline(always)]
    fn round_to_int(self) -> Self::IntBits {
        unsafe { Avx2Int(_mm256_cvtps_epi32(self.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { Avx2Int(_mm256_castps_si256(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { Avx2Vector(_mm256_castsi256_ps(bits.0)) }
    }
}

impl SimdMask for Avx2Mask {
    #[inline(always)]
    fn all(self) -> bool {
        unsafe { _mm256_movemask_ps(self.0) == 0xFF }
    }

    #[inline(always)]
    fn any(self) -> bool {
        unsafe { _mm256_movemask_ps(self.0) != 0 }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_and_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_or_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe {
            let all_ones = _mm256_castsi256_ps(_mm256_set1_epi32(-1));
            Avx2Mask(_mm256_xor_ps(self.0, all_ones))
        }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Avx2Mask(_mm256_xor_ps(self.0, rhs.0)) }
    }
}
