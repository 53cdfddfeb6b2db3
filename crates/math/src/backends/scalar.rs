//! Scalar backend implementation
//!
//! Single-lane fallback that works on any platform. It is the `None`
//! instruction-set level of the noise engine and the reference the vector
//! backends are checked against.

use crate::traits::{SimdInt, SimdMask, SimdVector};

/// Scalar vector wrapper (single-lane SIMD)
#[derive(Debug, Copy, Clone, PartialEq)]
#[repr(transparent)]
pub struct ScalarVector(pub f32);

/// Scalar integer wrapper
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarInt(pub i32);

/// Scalar mask wrapper (single boolean)
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(transparent)]
pub struct ScalarMask(pub bool);

impl SimdVector for ScalarVector {
    type Mask = ScalarMask;
    type IntBits = ScalarInt;

    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: f32) -> Self {
        ScalarVector(value)
    }

    #[inline(always)]
    fn from_slice(slice: &[f32]) -> Self {
        assert!(slice.len() >= Self::LANES, "Slice too short for scalar load");
        ScalarVector(slice[0])
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [f32]) {
        assert!(
            slice.len() >= Self::LANES,
            "Slice too short for scalar store"
        );
        slice[0] = self.0;
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        ScalarVector(self.0 + rhs.0)
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        ScalarVector(self.0 - rhs.0)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        ScalarVector(self.0 * rhs.0)
    }

    #[inline(always)]
    fn div(self, rhs: Self) -> Self {
        ScalarVector(self.0 / rhs.0)
    }

    #[inline(always)]
    fn neg(self) -> Self {
        ScalarVector(-self.0)
    }

    #[inline(always)]
    fn abs(self) -> Self {
        ScalarVector(libm::fabsf(self.0))
    }

    #[inline(always)]
    fn fma(self, b: Self, c: Self) -> Self {
        ScalarVector(libm::fmaf(self.0, b.0, c.0))
    }

    // min/max follow the x86 convention (second operand wins on NaN)
    #[inline(always)]
    fn min(self, rhs: Self) -> Self {
        ScalarVector(if self.0 < rhs.0 { self.0 } else { rhs.0 })
    }

    #[inline(always)]
    fn max(self, rhs: Self) -> Self {
        ScalarVector(if self.0 > rhs.0 { self.0 } else { rhs.0 })
    }

    #[inline(always)]
    fn sqrt(self) -> Self {
        ScalarVector(libm::sqrtf(self.0))
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> Self::Mask {
        ScalarMask(self.0 < rhs.0)
    }

    #[inline(always)]
    fn le(self, rhs: Self) -> Self::Mask {
        ScalarMask(self.0 <= rhs.0)
    }

    #[inline(always)]
    fn gt(self, rhs: Self) -> Self::Mask {
        ScalarMask(self.0 > rhs.0)
    }

    #[inline(always)]
    fn ge(self, rhs: Self) -> Self::Mask {
        ScalarMask(self.0 >= rhs.0)
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> Self::Mask {
        ScalarMask(self.0 == rhs.0)
    }

    #[inline(always)]
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self {
        if mask.0 {
            true_val
        } else {
            false_val
        }
    }

    #[inline(always)]
    fn horizontal_sum(self) -> f32 {
        self.0
    }

    #[inline(always)]
    fn horizontal_max(self) -> f32 {
        self.0
    }

    #[inline(always)]
    fn horizontal_min(self) -> f32 {
        self.0
    }

    #[inline(always)]
    fn floor(self) -> Self {
        ScalarVector(libm::floorf(self.0))
    }

    #[inline(always)]
    fn round_to_int(self) -> Self::IntBits {
        let rounded = libm::rintf(self.0);
        // Out-of-range and NaN lanes produce the x86 "integer indefinite" value
        if rounded >= -2_147_483_648.0 && rounded < 2_147_483_648.0 {
            ScalarInt(rounded as i32)
        } else {
            ScalarInt(i32::MIN)
        }
    }

    #[inline(always)]
    fn to_bits(self) -> Self::IntBits {
        ScalarInt(self.0.to_bits() as i32)
    }

    #[inline(always)]
    fn from_bits(bits: Self::IntBits) -> Self {
        ScalarVector(f32::from_bits(bits.0 as u32))
    }
}

impl SimdInt for ScalarInt {
    type FloatVec = ScalarVector;

    const LANES: usize = 1;

    #[inline(always)]
    fn splat(value: i32) -> Self {
        ScalarInt(value)
    }

    #[inline(always)]
    fn to_slice(self, slice: &mut [i32]) {
        assert!(!slice.is_empty(), "Slice too short for scalar store");
        slice[0] = self.0;
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        ScalarInt(self.0.wrapping_add(rhs.0))
    }

    #[inline(always)]
    fn sub(self, rhs: Self) -> Self {
        ScalarInt(self.0.wrapping_sub(rhs.0))
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        ScalarInt(self.0.wrapping_mul(rhs.0))
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        ScalarInt(self.0 & rhs.0)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        ScalarInt(self.0 | rhs.0)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        ScalarInt(self.0 ^ rhs.0)
    }

    #[inline(always)]
    fn shr(self, count: u32) -> Self {
        ScalarInt(((self.0 as u32) >> count) as i32)
    }

    #[inline(always)]
    fn shl(self, count: u32) -> Self {
        ScalarInt(((self.0 as u32) << count) as i32)
    }

    #[inline(always)]
    fn lt(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 < rhs.0)
    }

    #[inline(always)]
    fn eq(self, rhs: Self) -> ScalarMask {
        ScalarMask(self.0 == rhs.0)
    }

    #[inline(always)]
    fn select(mask: ScalarMask, true_val: Self, false_val: Self) -> Self {
        if mask.0 {
            true_val
        } else {
            false_val
        }
    }

    #[inline(always)]
    fn to_f32(self) -> ScalarVector {
        ScalarVector(self.0 as f32)
    }
}

impl SimdMask for ScalarMask {
    #[inline(always)]
    fn all(self) -> bool {
        self.0
    }

    #[inline(always)]
    fn any(self) -> bool {
        self.0
    }

    #[inline(always)]
    fn and(self, rhs: Self) -> Self {
        ScalarMask(self.0 && rhs.0)
    }

    #[inline(always)]
    fn or(self, rhs: Self) -> Self {
        ScalarMask(self.0 || rhs.0)
    }

    #[inline(always)]
    fn not(self) -> Self {
        ScalarMask(!self.0)
    }

    #[inline(always)]
    fn xor(self, rhs: Self) -> Self {
        ScalarMask(self.0 ^ rhs.0)
    }
}
