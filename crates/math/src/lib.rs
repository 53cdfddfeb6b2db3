#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

//! hasty-math: lane-width agnostic SIMD vectors for noise kernels
//!
//! Algorithms are written once against [`SimdVector`], [`SimdInt`] and
//! [`SimdMask`] and instantiated per backend:
//!
//! | Backend          | Lanes | Target                      |
//! |------------------|-------|-----------------------------|
//! | [`ScalarVector`] | 1     | any                         |
//! | `Sse2Vector`     | 4     | x86 / x86-64                |
//! | `Sse41Vector`    | 4     | x86 / x86-64 with SSE4.1    |
//! | `Avx2Vector`     | 8     | x86-64 with AVX2 + FMA      |
//! | `Avx512Vector`   | 16    | x86-64 with AVX-512F        |
//! | `NeonVector`     | 4     | AArch64                     |
//!
//! # Quick Start
//!
//! ```rust
//! use hasty_math::{ScalarVector, SimdInt, SimdVector};
//!
//! fn lattice_cell<V: SimdVector>(x: V) -> V::IntBits {
//!     x.floor_to_int().mul_scalar(1619)
//! }
//!
//! let mut out = [0i32; 1];
//! lattice_cell(ScalarVector::splat(2.5)).to_slice(&mut out);
//! assert_eq!(out[0], 2 * 1619);
//! ```

// Core trait definitions
pub mod traits;

// Backend implementations
pub mod backends;

pub use backends::scalar::{ScalarInt, ScalarMask, ScalarVector};
pub use traits::{SimdInt, SimdMask, SimdVector};

#[cfg(all(feature = "sse2", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::sse2::{Sse2Int, Sse2Mask, Sse2Vector};

#[cfg(all(feature = "sse41", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::sse41::{Sse41Int, Sse41Mask, Sse41Vector};

#[cfg(all(feature = "avx2", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::avx2::{Avx2Int, Avx2Mask, Avx2Vector};

#[cfg(all(feature = "avx512", any(target_arch = "x86", target_arch = "x86_64")))]
pub use backends::avx512::{Avx512Int, Avx512Mask, Avx512Vector};

#[cfg(all(feature = "neon", target_arch = "aarch64"))]
pub use backends::neon::{NeonInt, NeonMask, NeonVector};
