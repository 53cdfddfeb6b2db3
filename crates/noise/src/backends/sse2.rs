//! SSE2 backend

use crate::buffer::AlignedBuffer;
use crate::config::NoiseSettings;
use crate::engine::{FillKernels, NoiseSimd};
use crate::fill::{fill_grid, fill_points, GridRegion};
use crate::level::SimdLevel;
use crate::registry::BackendEntry;
use crate::vector_set::VectorSet;
use hasty_math::Sse2Vector;

const LEVEL: SimdLevel = SimdLevel::Sse2;

#[target_feature(enable = "sse2")]
unsafe fn grid_sse2(settings: &NoiseSettings, out: &mut [f32], region: &GridRegion, scale_modifier: f32) {
    fill_grid::<Sse2Vector>(settings, out, region, scale_modifier);
}

#[target_feature(enable = "sse2")]
unsafe fn points_sse2(settings: &NoiseSettings, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
    fill_points::<Sse2Vector>(settings, out, set, offset);
}

fn grid(settings: &NoiseSettings, out: &mut [f32], region: &GridRegion, scale_modifier: f32) {
    // SAFETY: the registry only accepts this entry when the CPU supports SSE2
    unsafe { grid_sse2(settings, out, region, scale_modifier) }
}

fn points(settings: &NoiseSettings, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
    // SAFETY: as for grid
    unsafe { points_sse2(settings, out, set, offset) }
}

pub(crate) const KERNELS: FillKernels = FillKernels {
    level: LEVEL,
    grid,
    points,
};

pub(crate) fn entry() -> BackendEntry {
    BackendEntry {
        construct: |seed| NoiseSimd::new(seed, KERNELS),
        aligned_size: |count| LEVEL.aligned_size(count),
        allocate: |count| AlignedBuffer::zeroed(LEVEL.aligned_size(count), LEVEL),
    }
}
