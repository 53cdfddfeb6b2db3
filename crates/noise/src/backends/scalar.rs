//! Scalar backend, one lane, available everywhere

use crate::buffer::AlignedBuffer;
use crate::config::NoiseSettings;
use crate::engine::{FillKernels, NoiseSimd};
use crate::fill::{fill_grid, fill_points, GridRegion};
use crate::level::SimdLevel;
use crate::registry::BackendEntry;
use crate::vector_set::VectorSet;
use hasty_math::ScalarVector;

const LEVEL: SimdLevel = SimdLevel::None;

fn grid(settings: &NoiseSettings, out: &mut [f32], region: &GridRegion, scale_modifier: f32) {
    fill_grid::<ScalarVector>(settings, out, region, scale_modifier);
}

fn points(settings: &NoiseSettings, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
    fill_points::<ScalarVector>(settings, out, set, offset);
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
