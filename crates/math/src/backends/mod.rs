//! SIMD backend implementations
//!
//! One module per instruction-set level. Each module is gated on its cargo
//! feature and on the target architecture it can run on; with
//! `runtime-dispatch` several of them are compiled side by side and the noise
//! crate picks one per engine instance.

// Scalar backend (always available as fallback)
pub mod scalar;

#[cfg(feature = "sse2")]
pub mod sse2;

#[cfg(feature = "sse41")]
pub mod sse41;

#[cfg(feature = "avx2")]
pub mod avx2;

#[cfg(feature = "avx512")]
pub mod avx512;

#[cfg(feature = "neon")]
pub mod neon;
