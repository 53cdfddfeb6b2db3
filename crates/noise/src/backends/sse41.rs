//! SSE4.1 backend

use crate::buffer::AlignedBuffer;
use crate::config::NoiseSettings;
use crate::engine::{FillKernels, NoiseSimd};
use crate::fill::{fill_grid, fill_points, GridRegion};
use crate::level::SimdLevel;
use crate::registry::BackendEntry;
use crate::vector_set::VectorSet;
use hasty_math::Sse41Vector;

const LEVEL: SimdLevel = SimdLevel::Sse41;

#[target_feature(enable = "sse4.1")]
unsafe fn grid_sse41(settings: &NoiseSettings, out: &mut [f32], region: &GridRegion, scale_modifier: f32) {
    fill_grid::<Sse41Vector>(settings, out, region, scale_modifier);
}

#[target_feature(enable = "sse4.1")]
unsafe fn points_sse41(settings: &NoiseSettings, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
    fill_points::<Sse41Vector>(settings, out, set, offset);
}

fn grid(settings: &NoiseSettings, out: &mut [f32], region: &GridRegion, scale_modifier: f32) {
    // SAFETY: the registry only accepts this entry when the CPU supports SSE4.1
    unsafe { grid_sse41(settings, out, region, scale_modifier) }
}

fn points(settings: &NoiseSettings, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
    // SAFETY: as for grid
    unsafe { points_sse41(settings, out, set, offset) }
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
