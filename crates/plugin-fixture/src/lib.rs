//! Test backend plugin
//!
//! Registers the scalar fill loops under the baseline vector level of the
//! target, so a host can tell the plugin's engines from its own scalar ones
//! while expecting identical output.

use hasty_noise::math::ScalarVector;
use hasty_noise::{
    fill_grid, fill_points, AlignedBuffer, BackendEntry, BackendRegistry, FillKernels, GridRegion, NoiseSettings,
    NoiseSimd, SimdLevel, VectorSet,
};

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
const LEVEL: SimdLevel = SimdLevel::Sse2;
#[cfg(target_arch = "aarch64")]
const LEVEL: SimdLevel = SimdLevel::Neon;
#[cfg(not(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64")))]
const LEVEL: SimdLevel = SimdLevel::None;

fn grid(settings: &NoiseSettings, out: &mut [f32], region: &GridRegion, scale_modifier: f32) {
    fill_grid::<ScalarVector>(settings, out, region, scale_modifier);
}

fn points(settings: &NoiseSettings, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
    fill_points::<ScalarVector>(settings, out, set, offset);
}

const KERNELS: FillKernels = FillKernels {
    level: LEVEL,
    grid,
    points,
};

/// Plugin entry point resolved by `BackendRegistry::load_plugins`
#[no_mangle]
pub fn hasty_noise_register(registry: &mut BackendRegistry) {
    registry.register(
        LEVEL.index(),
        BackendEntry {
            construct: |seed| NoiseSimd::new(seed, KERNELS),
            aligned_size: |count| LEVEL.aligned_size(count),
            allocate: |count| AlignedBuffer::zeroed(LEVEL.aligned_size(count), LEVEL),
        },
    );
}
