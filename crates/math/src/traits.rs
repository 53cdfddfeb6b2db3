//! Core SIMD abstraction traits
//!
//! These traits describe "a vector of W float lanes" together with its integer
//! and mask companions. Noise kernels are written once against them and every
//! backend (scalar, SSE2, SSE4.1, AVX2, AVX-512, NEON) instantiates the same
//! algorithm at its own lane width.
//!
//! All operations are lane-wise unless documented as horizontal. Backends must
//! produce IEEE-identical results for the non-fused operations so that the same
//! kernel yields the same bits regardless of width.

/// Float SIMD vector abstraction
///
/// # Example
///
/// ```rust
/// use hasty_math::{ScalarVector, SimdVector};
///
/// let a = ScalarVector::splat(2.0);
/// let b = ScalarVector::splat(3.0);
/// assert_eq!(a.mul(b).horizontal_sum(), 6.0);
/// ```
pub trait SimdVector: Copy + Clone + Sized {
    /// Associated mask type for comparison operations
    type Mask: SimdMask;

    /// Integer vector with the same lane count, used for hashing and bit casts
    type IntBits: SimdInt<FloatVec = Self>;

    /// Number of f32 lanes (1 scalar, 4 SSE/NEON, 8 AVX2, 16 AVX-512)
    const LANES: usize;

    // Construction

    /// Broadcast a scalar value to all lanes
    fn splat(value: f32) -> Self;

    /// Load from a slice (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn from_slice(slice: &[f32]) -> Self;

    /// Store to a slice (must have at least LANES elements)
    ///
    /// # Panics
    ///
    /// Panics if slice has fewer than LANES elements
    fn to_slice(self, slice: &mut [f32]);

    // Arithmetic

    /// Lane-wise addition
    fn add(self, rhs: Self) -> Self;

    /// Lane-wise subtraction
    fn sub(self, rhs: Self) -> Self;

    /// Lane-wise multiplication
    fn mul(self, rhs: Self) -> Self;

    /// Lane-wise division
    fn div(self, rhs: Self) -> Self;

    /// Flip the sign bit of every lane
    fn neg(self) -> Self;

    /// Clear the sign bit of every lane
    fn abs(self) -> Self;

    /// Multiply-add: `self * b + c`
    ///
    /// Fused on backends with hardware FMA (and the scalar backend, which
    /// uses `libm::fmaf`); SSE2 and SSE4.1 round the product separately.
    fn fma(self, b: Self, c: Self) -> Self;

    /// Lane-wise minimum
    fn min(self, rhs: Self) -> Self;

    /// Lane-wise maximum
    fn max(self, rhs: Self) -> Self;

    /// Correctly rounded square root
    fn sqrt(self) -> Self;

    // Comparisons

    /// Lane-wise `self < rhs`
    fn lt(self, rhs: Self) -> Self::Mask;

    /// Lane-wise `self <= rhs`
    fn le(self, rhs: Self) -> Self::Mask;

    /// Lane-wise `self > rhs`
    fn gt(self, rhs: Self) -> Self::Mask;

    /// Lane-wise `self >= rhs`
    fn ge(self, rhs: Self) -> Self::Mask;

    /// Lane-wise `self == rhs`
    fn eq(self, rhs: Self) -> Self::Mask;

    // Blending

    /// Select values based on mask
    ///
    /// For each lane: mask[i] ? true_val[i] : false_val[i]
    ///
    /// # Example
    ///
    /// ```rust
    /// use hasty_math::{ScalarVector, SimdVector};
    /// let a = ScalarVector::splat(1.0);
    /// let b = ScalarVector::splat(2.0);
    /// let picked = ScalarVector::select(a.lt(b), a, b);
    /// assert_eq!(picked.horizontal_sum(), 1.0);
    /// ```
    fn select(mask: Self::Mask, true_val: Self, false_val: Self) -> Self;

    // Horizontal operations

    /// Sum all lanes into a scalar
    fn horizontal_sum(self) -> f32;

    /// Maximum value across all lanes
    fn horizontal_max(self) -> f32;

    /// Minimum value across all lanes
    fn horizontal_min(self) -> f32;

    // Rounding and conversion

    /// Round toward negative infinity
    fn floor(self) -> Self;

    /// Round to the nearest integer (ties to even) and convert to i32 lanes
    fn round_to_int(self) -> Self::IntBits;

    /// Floor and convert to i32 lanes
    #[inline(always)]
    fn floor_to_int(self) -> Self::IntBits {
        self.floor().round_to_int()
    }

    /// Reinterpret float bits as integer bits
    ///
    /// ```rust
    /// use hasty_math::{ScalarVector, SimdInt, SimdVector};
    /// let bits = ScalarVector::splat(1.0).to_bits();
    /// let mut out = [0i32; 1];
    /// bits.to_slice(&mut out);
    /// assert_eq!(out[0], 0x3F80_0000);
    /// ```
    fn to_bits(self) -> Self::IntBits;

    /// Reinterpret integer bits as float bits
    fn from_bits(bits: Self::IntBits) -> Self;

    /// Numerical conversion i32 -> f32 (round to nearest)
    #[inline(always)]
    fn from_int(int_vec: Self::IntBits) -> Self {
        int_vec.to_f32()
    }
}

/// Integer SIMD vector with 32-bit lanes
///
/// Arithmetic wraps on overflow; shifts are logical. These are the semantics
/// lattice hashing relies on, and every backend reproduces them exactly.
pub trait SimdInt: Copy + Clone + Sized {
    /// Associated float vector type
    type FloatVec: SimdVector;

    /// Number of lanes (matches the associated float vector)
    const LANES: usize;

    /// Broadcast a scalar i32 value to all lanes
    fn splat(value: i32) -> Self;

    /// Store to a slice (must have at least LANES elements)
    fn to_slice(self, slice: &mut [i32]);

    /// Wrapping addition
    fn add(self, rhs: Self) -> Self;

    /// Wrapping subtraction
    fn sub(self, rhs: Self) -> Self;

    /// Wrapping multiplication (low 32 bits of the product)
    fn mul(self, rhs: Self) -> Self;

    /// Bitwise AND
    fn and(self, rhs: Self) -> Self;

    /// Bitwise OR
    fn or(self, rhs: Self) -> Self;

    /// Bitwise XOR
    fn xor(self, rhs: Self) -> Self;

    /// Logical right shift
    fn shr(self, count: u32) -> Self;

    /// Left shift
    fn shl(self, count: u32) -> Self;

    /// Signed lane-wise `self < rhs`
    fn lt(self, rhs: Self) -> <Self::FloatVec as SimdVector>::Mask;

    /// Lane-wise `self == rhs`
    fn eq(self, rhs: Self) -> <Self::FloatVec as SimdVector>::Mask;

    /// Select integer lanes based on a mask
    fn select(mask: <Self::FloatVec as SimdVector>::Mask, true_val: Self, false_val: Self)
        -> Self;

    /// Convert to f32 lanes (numerical conversion, not bit reinterpretation)
    fn to_f32(self) -> Self::FloatVec;

    /// AND with a broadcast constant
    #[inline(always)]
    fn and_scalar(self, rhs: i32) -> Self {
        self.and(Self::splat(rhs))
    }

    /// Add a broadcast constant
    #[inline(always)]
    fn add_scalar(self, rhs: i32) -> Self {
        self.add(Self::splat(rhs))
    }

    /// Multiply by a broadcast constant
    #[inline(always)]
    fn mul_scalar(self, rhs: i32) -> Self {
        self.mul(Self::splat(rhs))
    }
}

/// Mask type for conditional SIMD operations
///
/// Masks represent per-lane boolean values, enabling branchless conditional logic.
///
/// # Example
///
/// ```rust
/// use hasty_math::{ScalarVector, SimdMask, SimdVector};
/// let a = ScalarVector::splat(1.0);
/// let b = ScalarVector::splat(2.0);
/// assert!(a.lt(b).all());
/// ```
pub trait SimdMask: Copy + Clone + Sized {
    /// Returns true if all lanes are set
    fn all(self) -> bool;

    /// Returns true if any lane is set
    fn any(self) -> bool;

    /// Returns true if no lanes are set
    #[inline(always)]
    fn none(self) -> bool {
        !self.any()
    }

    /// Bitwise AND of two masks
    fn and(self, rhs: Self) -> Self;

    /// Bitwise OR of two masks
    fn or(self, rhs: Self) -> Self;

    /// Bitwise NOT of mask
    fn not(self) -> Self;

    /// Bitwise XOR of two masks
    fn xor(self, rhs: Self) -> Self;
}
