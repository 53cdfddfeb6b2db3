//! SSE4.1 backend implementation (x86 / x86-64)
//!
//! Same 4-lane layout as the SSE2 backend, but with the native `roundps`,
//! `pmulld` and `blendvps` instructions. Callers must only reach this code
//! from functions compiled with `sse4.1` enabled.

#![cfg(any(target_arch = "x86", target_arch = "x86_64"))]

use crate::traits::{SimdInt, SimdMask, SimdVector};

#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

#[cfg(target_arch = "x86")]
use core::arch::x86::*;

/// SSE2 vector wrapper (4 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Sse41Vector(__m128);

/// SSE2 mask wrapper (all-ones / all-zeros per lane)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Sse41Mask(__m128);

/// SSE2 integer vector wrapper (4 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct Sse41Int(__m128i);

const SIGN_BIT: f32 = -0.0;

impl SimdInt for Sse41Int {
    type FloatVec = Sse41Vector;

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { Sse41Int(_mm_set1_epi32(value)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE4.1 store");
        unsafe { _mm_storeu_si128(slice.as_mut_ptr() as *mut __m128i, self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Sse41Int(_mm_add_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Sse41Int(_mm_sub_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Sse41Int(_mm_mullo_epi32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { Sse41Int(_mm_and_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Sse41Int(_mm_or_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Sse41Int(_mm_xor_si128(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe { Sse41Int(_mm_srl_epi32(self.0, _mm_cvtsi32_si128(count as i32))) }
    }

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe { Sse41Int(_mm_sll_epi32(self.0, _mm_cvtsi32_si128(count as i32))) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Sse41Mask {
        unsafe { Sse41Mask(_mm_castsi128_ps(_mm_cmplt_epi32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Sse41Mask {
        unsafe { Sse41Mask(_mm_castsi128_ps(_mm_cmpeq_epi32(self.0, rhs.0))) }
    }

    #[inline(always)]
    fn select(mask: Sse41Mask, true_val: Self, false_val: Self) -> Self {
        unsafe {
            Sse41Int(_mm_blendv_epi8(
                false_val.0,
                true_val.0,
                _mm_castps_si128(mask.0),
            ))
        }
    }

    #[inline(always)]
    fn to_f32(self) -> Sse41Vector {
        unsafe { Sse41Vector(_mm_cvtepi32_ps(self.0)) }
    }
}

impl SimdVector for Sse41Vector {
    type Mask = Sse41Mask;
    type IntBits = Sse41Int;

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { Sse41Vector(_mm_set1_ps(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE4.1 load");
        unsafe { Sse41Vector(_mm_loadu_ps(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for SSE4.1 store");
        unsafe { _mm_storeu_ps(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { Sse41Vector(_mm_add_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { Sse41Vector(_mm_sub_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { Sse41Vector(_mm_mul_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { Sse41Vector(_mm_div_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { Sse41Vector(_mm_xor_ps(self.0, _mm_set1_ps(SIGN_BIT))) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { Sse41Vector(_mm_andnot_ps(_mm_set1_ps(SIGN_BIT), self.0)) }
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        unsafe { Sse41Vector(_mm_add_ps(_mm_mul_ps(self.0, b.0), c.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { Sse41Vector(_mm_min_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { Sse41Vector(_mm_max_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { Sse41Vector(_mm_sqrt_ps(self.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { Sse41Mask(_mm_cmplt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { Sse41Mask(_mm_cmple_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { Sse41Mask(_mm_cmpgt_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { Sse41Mask(_mm_cmpge_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { Sse41Mask(_mm_cmpeq_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { Sse41Vector(_mm_blendv_ps(false_val.0, true_val.0, mask.0)) }
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
        unsafe { Sse41Vector(_mm_floor_ps(self.0)) }
    }

    #[inline(always)]
    fn round_to_int(self) -> Self::IntBits {
        unsafe { Sse41Int(_mm_cvtps_epi32(self.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { Sse41Int(_mm_castps_si128(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { Sse41Vector(_mm_castsi128_ps(bits.0)) }
    }
}

impl SimdMask for Sse41Mask {
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
        unsafe { Sse41Mask(_mm_and_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { Sse41Mask(_mm_or_ps(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { Sse41Mask(_mm_xor_ps(self.0, _mm_castsi128_ps(_mm_set1_epi32(-1)))) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { Sse41Mask(_mm_xor_ps(self.0, rhs.0)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_sse41() -> bool {
        std::arch::is_x86_feature_detected!("sse4.1")
    }

    #[test]
    fn test_native_floor_and_blend() {
        if !has_sse41() {
            return;
        }
        let v = Sse41Vector::from_slice(&[-1.5, -0.25, 2.999, 7.0]);
        let floored = v.floor();
        let picked = Sse41Vector::select(v.lt(Sse41Vector::splat(0.0)), floored, v);
        let mut out = [0.0f32; 4];
        picked.to_slice(&mut out);
        assert_eq!(out, [-2.0, -1.0, 2.999, 7.0]);
    }

    #[test]
    fn test_native_mullo() {
        if !has_sse41() {
            return;
        }
        let mut out = [0i32; 4];
        Sse41Int::splat(60493).mul(Sse41Int::splat(1337 * 1337)).to_slice(&mut out);
        assert_eq!(out, [60493i32.wrapping_mul(1337 * 1337); 4]);
    }
}
