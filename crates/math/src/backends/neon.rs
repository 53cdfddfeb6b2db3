//! NEON backend implementation (AArch64)
//!
//! 4-lane (128-bit) operations. NEON is architecturally guaranteed on AArch64,
//! so no extra target feature is needed at the call site. Rounding uses the
//! explicit toward-minus-infinity and to-nearest-even conversions to stay
//! consistent with the x86 backends.

#![cfg(target_arch = "aarch64")]

use crate::traits::{SimdInt, SimdMask, SimdVector};
use core::arch::aarch64::*;

/// NEON vector wrapper (4 lanes of f32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonVector(float32x4_t);

/// NEON mask wrapper (all-ones / all-zeros u32 per lane)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonMask(uint32x4_t);

/// NEON integer vector wrapper (4 lanes of i32)
#[derive(Copy, Clone)]
#[repr(transparent)]
pub struct NeonInt(int32x4_t);

impl SimdInt for NeonInt {
    type FloatVec = NeonVector;

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        unsafe { NeonInt(vdupq_n_s32(value)) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON store");
        unsafe { vst1q_s32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonInt(vaddq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonInt(vsubq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { NeonInt(vmulq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { NeonInt(vandq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { NeonInt(vorrq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { NeonInt(veorq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        unsafe {
            // Negative shift amounts shift right on NEON
            let shift = vdupq_n_s32(-(count as i32));
            let bits = vreinterpretq_u32_s32(self.0);
            NeonInt(vreinterpretq_s32_u32(vshlq_u32(bits, shift)))
        }
    }

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        unsafe {
            let shift = vdupq_n_s32(count as i32);
            NeonInt(vshlq_s32(self.0, shift))
        }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vcltq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> NeonMask {
        unsafe { NeonMask(vceqq_s32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: NeonMask, true_val: Self, false_val: Self) -> Self {
        unsafe { NeonInt(vbslq_s32(mask.0, true_val.0, false_val.0)) }
    }

    #[inline(always)]
    fn to_f32(self) -> NeonVector {
        unsafe { NeonVector(vcvtq_f32_s32(self.0)) }
    }
}

impl SimdVector for NeonVector {
    type Mask = NeonMask;
    type IntBits = NeonInt;

    const LANES: usize = 4;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        unsafe { NeonVector(vdupq_n_f32(value)) }
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON load");
        unsafe { NeonVector(vld1q_f32(slice.as_ptr())) }
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(slice.len() >= Self::LANES, "Slice too short for NEON store");
        unsafe { vst1q_f32(slice.as_mut_ptr(), self.0) }
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        unsafe { NeonVector(vaddq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        unsafe { NeonVector(vsubq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        unsafe { NeonVector(vmulq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        unsafe { NeonVector(vdivq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn neg(self) -> Self {
        unsafe { NeonVector(vnegq_f32(self.0)) }
    }

    #[inline(always)]
    fn abs(self) -> Self {
        unsafe { NeonVector(vabsq_f32(self.0)) }
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        // vfmaq_f32(a, b, c) computes a + b * c
        unsafe { NeonVector(vfmaq_f32(c.0, self.0, b.0)) }
    }

    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        unsafe { NeonVector(vminq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        unsafe { NeonVector(vmaxq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        unsafe { NeonVector(vsqrtq_f32(self.0)) }
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcltq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcleq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcgtq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vcgeq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        unsafe { NeonMask(vceqq_f32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        unsafe { NeonVector(vbslq_f32(mask.0, true_val.0, false_val.0)) }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        unsafe { vaddvq_f32(self.0) }
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        unsafe { vmaxvq_f32(self.0) }
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        unsafe { vminvq_f32(self.0) }
    }

    #[inline(always)]
    fn floor(self) -> Self {
        unsafe { NeonVector(vrndmq_f32(self.0)) }
    }

    #[inline(always)]
    fn round_to_int(self) -> Self::IntBits {
        unsafe { NeonInt(vcvtnq_s32_f32(self.0)) }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        unsafe { NeonInt(vreinterpretq_s32_f32(self.0)) }
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        unsafe { NeonVector(vreinterpretq_f32_s32(bits.0)) }
    }
}

impl SimdMask for NeonMask {
    #[inline(always)]
    fn all(self) -> bool {
        unsafe { vminvq_u32(self.0) == u32::MAX }
    }

    #[inline(always)]
    fn any(self) -> bool {
        unsafe { vmaxvq_u32(self.0) != 0 }
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        unsafe { NeonMask(vandq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        unsafe { NeonMask(vorrq_u32(self.0, rhs.0)) }
    }

    #[inline(always)]
    fn not(self) -> Self {
        unsafe { NeonMask(vmvnq_u32(self.0)) }
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        unsafe { NeonMask(veorq_u32(self.0, rhs.0)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_rounding_matches_scalar() {
        let v = NeonVector::from_slice(&[-1.5, 2.5, 3.5, -0.25]);
        let mut floored = [0.0f32; 4];
        v.floor().to_slice(&mut floored);
        assert_eq!(floored, [-2.0, 2.0, 3.0, -1.0]);

        let mut rounded = [0i32; 4];
        v.round_to_int().to_slice(&mut rounded);
        assert_eq!(rounded, [-2, 2, 4, 0]);
    }

    #[test]
    fn test_neon_logical_shift() {
        let mut out = [0i32; 4];
        NeonInt::splat(-1).shr(28).to_slice(&mut out);
        assert_eq!(out, [0xF; 4]);
    }
}
