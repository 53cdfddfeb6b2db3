//! SSE2 backend implementation (x86 / x86-64)
//!
//! 4-lane (128-bit) operations using only SSE2, the x86-64 baseline. SSE2
//! lacks a rounding instruction, a 32-bit low multiply and a variable blend,
//! so floor, `SimdInt::mul` and `select` are emulated here. The emulations are
//! exact: results match the scalar backend bit for bit.

#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use crate::traits::{SimdInt, SimdMask, SimdVector};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// SSE2 vector wrapper (4 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Sse2Vector(__m128);

/// SSE2 mask wrapper (all-ones / all-zeros per lane)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Sse2Mask(__m128);

/// SSE2 integer vector wrapper (4 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Sse2Int(__m128i);

const SIGN_BIT: f32 = -0.0;

impl SimdInt for Sse2Int {
    type FloatVec = Sse2Vector;

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { Sse2Int(_mm_set1_epi32(value)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE2 store");
        unsafe { _mm_storeu_si128(slice.as_mut_ptr() as *mut __m128i, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Sse2Int(_mm_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Sse2Int(_mm_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe {
            // Even lanes, then odd lanes shifted down, recombined in order
            let even = _mm_mul_epu32(self.0, rhs.0);
            let odd = _mm_mul_epu32(_mm_srli_si128::<4>(self.0), _mm_srli_si128::<4>(rhs.0));
            Sse2Int(_mm_unpacklo_epi32(
                _mm_shuffle_epi32::<0b00_00_10_00>(even),
                _mm_shuffle_epi32::<0b00_00_10_00>(odd),
            ))
        }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Sse2Int(_mm_and_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Sse2Int(_mm_or_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Sse2Int(_mm_xor_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe { Sse2Int(_mm_srl_epi32(self.0, _mm_cvtsi32_si128(count as i32))) }
    }

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe { Sse2Int(_mm_sll_epi32(self.0, _mm_cvtsi32_si128(count as i32))) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Sse2Mask {
        unsafe { Sse2Mask(_mm_castsi128_ps(_mm_cmplt_epi32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Sse2Mask {
        unsafe { Sse2Mask(_mm_castsi128_ps(_mm_cmpeq_epi32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn select(mask: Sse2Mask, true_val: Self, false_val: Self) -> Self {
        unsafe {
            let m = _mm_castps_si128(mask.0);
            Sse2Int(_mm_or_si128(
                _mm_and_si128(m, true_val.0),
                _mm_andnot_si128(m, false_val.0),
            ))
        }
    }

    #[inline(always)]
    fn to_f32(self) -> Sse2Vector {
        unsafe { Sse2Vector(_mm_cvtepi32_ps(self.0)) }
    }
}

impl SimdVector for Sse2Vector {
    type Mask = Sse2Mask;
    type IntBits = Sse2Int;

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Sse2Vector(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE2 load");
        unsafe { Sse2Vector(_mm_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE2 store");
        unsafe { _mm_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Sse2Vector(_mm_add_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Sse2Vector(_mm_sub_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Sse2Vector(_mm_mul_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Sse2Vector(_mm_div_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Sse2Vector(_mm_xor_ps(self.0, _mm_set1_ps(SIGN_BIT))) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Sse2Vector(_mm_andnot_ps(_mm_set1_ps(SIGN_BIT), self.0)) }
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        unsafe { Sse2Vector(_mm_add_ps(_mm_mul_ps(self.0, b.0), c.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Sse2Vector(_mm_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Sse2Vector(_mm_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Sse2Vector(_mm_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { Sse2Mask(_mm_cmplt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { Sse2Mask(_mm_cmple_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { Sse2Mask(_mm_cmpgt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { Sse2Mask(_mm_cmpge_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { Sse2Mask(_mm_cmpeq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe {
            Sse2Vector(_mm_or_ps(
                _mm_and_ps(mask.0, true_val.0),
                _mm_andnot_ps(mask.0, false_val.0),
            ))
        }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        let mut lanes = [0.0f32; 4];
        self.to_slice(&mut lanes);
        (lanes[0] + lanes[1]) + (lanes[2] + lanes[3])
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        let mut lanes = [0.0f32; 4];
        self.to_slice(&mut lanes);
        lanes.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        let mut lanes = [0.0f32; 4];
        self.to_slice(&mut lanes);
        lanes.iter().copied().fold(f32::INFINITY, f32::min)
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe {
            let sign = _mm_set1_ps(SIGN_BIT);
            // Truncate, then step down where truncation rounded up
            let truncated = _mm_cvtepi32_ps(_mm_cvttps_epi32(self.0));
            let rounded_up = _mm_cmpgt_ps(truncated, self.0);
            let floored = _mm_sub_ps(truncated, _mm_and_ps(rounded_up, _mm_set1_ps(1.0)));
            // Keep -0.0 negative
            let floored = _mm_or_ps(floored, _mm_and_ps(self.0, sign));
            // |x| >= 2^23 is already integral (and out of cvtt range past 2^31)
            let small = _mm_cmplt_ps(_mm_andnot_ps(sign, self.0), _mm_set1_ps(8_388_608.0));
            Sse2Vector(_mm_or_ps(
                _mm_and_ps(small, floored),
                _mm_andnot_ps(small, self.0),
            ))
        }
    }

    #[inline(always)]
    fn round_to_int(self) -> Self::IntBits {
        unsafe { Sse2Int(_mm_cvtps_epi32(self.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { Sse2Int(_mm_castps_si128(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { Sse2Vector(_mm_castsi128_ps(bits.0)) }
    }
}

impl SimdMask for Sse2Mask {
    #[inline(always)]
    fn all(self) -> bool {
        unsafe { _mm_movemask_ps(self.0) == 0b1111 }
    }

    #[inline(always)]
    fn any(self) -> bool {
        unsafe { _mm_movemask_ps(self.0) != 0 }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Sse2Mask(_mm_and_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Sse2Mask(_mm_or_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { Sse2Mask(_mm_xor_ps(self.0, _mm_castsi128_ps(_mm_set1_epi32(-1)))) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Sse2Mask(_mm_xor_ps(self.0, rhs.0)) }
    }
}
