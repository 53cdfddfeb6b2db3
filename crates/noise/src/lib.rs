#![warn(missing_docs)]
#![warn(clippy::all)]

//! hasty-noise: runtime-dispatched SIMD coherent noise
//!
//! One binary carries several compiled variants of the same noise kernels
//! (scalar, SSE2, SSE4.1, AVX2, AVX-512, NEON) and picks the widest one the
//! running CPU supports when an engine is created.
//!
//! # Architecture
//!
//! - `probe`: CPU feature detection and the highest usable [`SimdLevel`]
//! - `registry`: level-indexed [`BackendEntry`] table, AUTO resolution and
//!   fallback, the process-wide registry
//! - `engine`: [`NoiseSimd`], a configured generator bound to one backend
//! - `config`: noise selectors and the [`NoiseConfig`] / [`PerturbConfig`]
//!   parameter blocks
//! - `buffer` / `vector_set`: lane-aligned output buffers and point sets
//! - `kernels`: the noise family, written once against `hasty_math` traits
//! - `fill`: grid and point-set loops instantiated per backend
//! - `plugin`: loading extra backends from shared libraries
//!   (feature `dynamic-backends`)
//!
//! # Feature Flags
//!
//! - `runtime-dispatch`: register every compiled backend and choose per engine
//! - `sse2`, `sse41`, `avx2` (default), `avx512`, `neon`: compile that backend
//! - `fma`: fuse interpolation multiply-adds (levels stop agreeing bit-for-bit)
//! - `force-scalar`, `force-sse2`, `force-sse41`, `force-avx2`,
//!   `force-avx512`, `force-neon`: cap AUTO resolution for deterministic tests
//! - `dynamic-backends`: plugin loader
//!
//! # Example
//!
//! ```rust
//! use hasty_noise::{create_noise, GridRegion, NoiseType, AUTO_LEVEL};
//!
//! let mut noise = create_noise(1337, AUTO_LEVEL);
//! noise.set_noise_type(NoiseType::PerlinFractal);
//! noise.set_frequency(0.02);
//!
//! let region = GridRegion::new([0, 0, 0], [16, 16, 16]);
//! let mut out = vec![0.0f32; region.len()];
//! noise.fill_set(&mut out, &region, 1.0);
//! assert!(out.iter().all(|v| v.is_finite()));
//! ```

pub mod buffer;
pub mod config;
pub mod engine;
pub mod error;
pub mod fill;
pub mod level;
pub mod probe;
pub mod registry;
pub mod vector_set;

mod backends;
mod kernels;

#[cfg(feature = "dynamic-backends")]
pub mod plugin;

pub use buffer::{AlignedBuffer, ReleaseFn};
pub use config::{
    calculate_fractal_bounding, BuildType, CellularDistance, CellularReturnType, FractalType,
    NoiseClass, NoiseConfig, NoiseSettings, NoiseType, PerturbConfig, PerturbType,
};
pub use engine::{FillKernels, GridFillFn, NoiseSimd, PointFillFn};
pub use error::{ParseNameError, PluginError};
pub use fill::{fill_grid, fill_points, GridRegion};
pub use level::{SimdLevel, AUTO_LEVEL, SIMD_LEVEL_COUNT};
pub use probe::{highest_supported_level, CpuFeatures};
pub use registry::{
    aligned_size, allocate, create_noise, fastest_simd, supported_simd, BackendEntry,
    BackendRegistry,
};
pub use vector_set::VectorSet;

/// Vector traits and backend types, for plugins that instantiate
/// [`fill_grid`] and [`fill_points`] themselves
pub use hasty_math as math;
