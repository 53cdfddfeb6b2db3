//! AVX-512 backend implementation (x86-64)
//!
//! 16-lane (512-bit) operations using AVX-512F only. Masks are native
//! `__mmask16` registers; float bit operations go through the integer domain
//! because `vandps` on zmm needs AVX-512DQ.
//!
//! Like the AVX2 backend, these wrappers must be called from code compiled
//! with `avx512f` enabled.

#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use crate::traits::{SimdInt, SimdMask, SimdVector};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// AVX-512 vector wrapper (16 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx512Vector(__m512);

/// AVX-512 mask wrapper (one bit per lane)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx512Mask(__mmask16);

/// AVX-512 integer vector wrapper (16 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Avx512Int(__m512i);

impl SimdInt for Avx512Int {
    type FloatVec = Avx512Vector;

    const LANES: usize = 16;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { Avx512Int(_mm512_set1_epi32(value)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX-512 store");
        unsafe { _mm512_storeu_si512(slice.as_mut_ptr() as *mut __m512i, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx512Int(_mm512_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx512Int(_mm512_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx512Int(_mm512_mullo_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Avx512Int(_mm512_and_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Avx512Int(_mm512_or_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Avx512Int(_mm512_xor_si512(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe {
            let shift_count = _mm_cvtsi32_si128(count as i32);
            Avx512Int(_mm512_srl_epi32(self.0, shift_count))
        }
    }

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe {
            let shift_count = _mm_cvtsi32_si128(count as i32);
            Avx512Int(_mm512_sll_epi32(self.0, shift_count))
        }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Avx512Mask {
        unsafe { Avx512Mask(_mm512_cmplt_epi32_mask(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Avx512Mask {
        unsafe { Avx512Mask(_mm512_cmpeq_epi32_mask(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Avx512Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { Avx512Int(_mm512_mask_blend_epi32(mask.0, false_val.0, true_val.0)) }
    }

    #[inline(always)]
    fn to_f32(self) -> Avx512Vector {
        unsafe { Avx512Vector(_mm512_cvtepi32_ps(self.0)) }
    }
}

impl SimdVector for Avx512Vector {
    type Mask = Avx512Mask;
    type IntBits = Avx512Int;

    const LANES: usize = 16;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Avx512Vector(_mm512_set1_ps(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX-512 load");
        unsafe { Avx512Vector(_mm512_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for AVX-512 store");
        unsafe { _mm512_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Avx512Vector(_mm512_add_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Avx512Vector(_mm512_sub_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Avx512Vector(_mm512_mul_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Avx512Vector(_mm512_div_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe {
            let sign = _mm512_set1_epi32(i32::MIN);
            Avx512Vector(_mm512_castsi512_ps(_mm512_xor_si512(
                _mm512_castps_si512(self.0),
                sign,
            )))
        }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe {
            let magnitude = _mm512_set1_epi32(i32::MAX);
            Avx512Vector(_mm512_castsi512_ps(_mm512_and_si512(
                _mm512_castps_si512(self.0),
                magnitude,
            )))
        }
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        unsafe { Avx512Vector(_mm512_fmadd_ps(self.0, b.0, c.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Avx512Vector(_mm512_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Avx512Vector(_mm512_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Avx512Vector(_mm512_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { Avx512Mask(_mm512_cmp_ps_mask::<_CMP_LT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { Avx512Mask(_mm512_cmp_ps_mask::<_CMP_LE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { Avx512Mask(_mm512_cmp_ps_mask::<_CMP_GT_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { Avx512Mask(_mm512_cmp_ps_mask::<_CMP_GE_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { Avx512Mask(_mm512_cmp_ps_mask::<_CMP_EQ_OQ>(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { Avx512Vector(_mm512_mask_blend_ps(mask.0, false_val.0, true_val.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe { _mm512_reduce_add_ps(self.0) }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        unsafe { _mm512_reduce_max_ps(self.0) }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        unsafe { _mm512_reduce_min_ps(self.0) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        // Round toward -inf, exceptions suppressed
        unsafe { Avx512Vector(_mm512_roundscale_ps::<0x09>(self.0)) }
    }

    #[inline(always)]
    fn round_to_int(self) -> Self::IntBits {
        unsafe { Avx512Int(_mm512_cvtps_epi32(self.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { Avx512Int(_mm512_castps_si512(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { Avx512Vector(_mm512_castsi512_ps(bits.0)) }
    }
}

impl SimdMask for Avx512Mask {
    #[inline(always)]
    fn all(self) -> bool {
        self.0 == 0xFFFF
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.0 != 0
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        Avx512Mask(self.0 & rhs.0)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        Avx512Mask(self.0 | rhs.0)
    }

    #[inline(always)]
    fn not(self) -> Self {
        Avx512Mask(!self.0)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        Avx512Mask(self.0 ^ rhs.0)
    }
}
