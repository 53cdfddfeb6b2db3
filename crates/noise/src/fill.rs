//! Grid and point-set fill loops
//!
//! Both loops are generic over the vector type and carry no target features of
//! their own. Each backend instantiates them inside a `#[target_feature]`
//! function so the inlined kernels compile for that instruction set.

use crate::config::NoiseSettings;
use crate::kernels::{perturb::perturb, sample};
use crate::vector_set::VectorSet;
use hasty_math::SimdVector;

/// Maximum lane count of any backend
pub const MAX_LANES: usize = 16;

/// Per-lane index offsets, loaded as the first `LANES` entries
pub const LANE_OFFSETS: [f32; MAX_LANES] = [
    0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0,
];

/// Axis-aligned block of integer sample coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridRegion {
    /// First sample coordinate on each axis
    pub start: [i32; 3],
    /// Number of samples on each axis
    pub size: [usize; 3],
}

impl GridRegion {
    /// Region starting at `start` with `size` samples per axis
    pub fn new(start: [i32; 3], size: [usize; 3]) -> Self {
        Self { start, size }
    }

    /// Region at the origin
    pub fn sized(x: usize, y: usize, z: usize) -> Self {
        Self {
            start: [0; 3],
            size: [x, y, z],
        }
    }

    /// Total number of samples
    ///
    /// # Panics
    ///
    /// Panics if the sample count overflows `usize`. Use
    /// [`checked_len`](Self::checked_len) for untrusted extents.
    pub fn len(&self) -> usize {
        self.checked_len().expect("grid region sample count overflows usize")
    }

    /// Total number of samples, `None` on overflow
    pub fn checked_len(&self) -> Option<usize> {
        self.size[0].checked_mul(self.size[1])?.checked_mul(self.size[2])
    }

    /// Whether any axis is empty
    pub fn is_empty(&self) -> bool {
        self.size.contains(&0)
    }

    /// Flat output index of a sample, x outermost and z innermost
    pub fn index(&self, x: usize, y: usize, z: usize) -> usize {
        (x * self.size[1] + y) * self.size[2] + z
    }
}

#[inline(always)]
fn evaluate<V: SimdVector>(settings: &NoiseSettings, x: V, y: V, z: V) -> V {
    let (x, y, z) = perturb(settings, x, y, z);
    sample(settings, x, y, z)
}

#[inline(always)]
fn store<V: SimdVector>(value: V, out: &mut [f32]) {
    if out.len() >= V::LANES {
        value.to_slice(out);
    } else {
        let mut tmp = [0.0f32; MAX_LANES];
        value.to_slice(&mut tmp);
        out.copy_from_slice(&tmp[..out.len()]);
    }
}

#[inline(always)]
fn load<V: SimdVector>(input: &[f32]) -> V {
    if input.len() >= V::LANES {
        V::from_slice(input)
    } else {
        let mut tmp = [0.0f32; MAX_LANES];
        tmp[..input.len()].copy_from_slice(input);
        V::from_slice(&tmp)
    }
}

/// Fill `out` with one value per sample of `region`
///
/// Samples are written x-major, then y, with z contiguous. Each value is
/// multiplied by `scale_modifier` after every other step.
///
/// # Panics
///
/// Panics if `out` is shorter than `region.len()`.
#[inline(always)]
pub fn fill_grid<V: SimdVector>(
    settings: &NoiseSettings,
    out: &mut [f32],
    region: &GridRegion,
    scale_modifier: f32,
) {
    let total = region.len();
    assert!(
        out.len() >= total,
        "noise output holds {} floats but the region needs {}",
        out.len(),
        total
    );
    if total == 0 {
        return;
    }

    let frequency = settings.noise.frequency();
    let [sx, sy, sz] = settings.noise.axis_scales();
    let x_freq = V::splat(frequency * sx);
    let y_freq = V::splat(frequency * sy);
    let z_freq = V::splat(frequency * sz);
    let scale = V::splat(scale_modifier);
    let lanes = V::from_slice(&LANE_OFFSETS);

    let [x_size, y_size, z_size] = region.size;
    let [x_start, y_start, z_start] = region.start;

    let mut rows = out[..total].chunks_exact_mut(z_size);
    for ix in 0..x_size {
        let x = V::splat(x_start.wrapping_add(ix as i32) as f32).mul(x_freq);
        for iy in 0..y_size {
            let y = V::splat(y_start.wrapping_add(iy as i32) as f32).mul(y_freq);
            let Some(row) = rows.next() else { return };
            for (chunk, iz) in row.chunks_mut(V::LANES).zip((0..z_size).step_by(V::LANES)) {
                let z = V::splat(z_start.wrapping_add(iz as i32) as f32).add(lanes).mul(z_freq);
                store(evaluate(settings, x, y, z).mul(scale), chunk);
            }
        }
    }
}

/// Fill `out` with one value per point of `set`, shifted by `offset`
///
/// # Panics
///
/// Panics if `out` is shorter than `set.len()`.
#[inline(always)]
pub fn fill_points<V: SimdVector>(settings: &NoiseSettings, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
    let total = set.len();
    assert!(
        out.len() >= total,
        "noise output holds {} floats but the vector set has {} points",
        out.len(),
        total
    );

    let frequency = settings.noise.frequency();
    let [sx, sy, sz] = settings.noise.axis_scales();
    let x_freq = V::splat(frequency * sx);
    let y_freq = V::splat(frequency * sy);
    let z_freq = V::splat(frequency * sz);
    let x_offset = V::splat(offset[0]);
    let y_offset = V::splat(offset[1]);
    let z_offset = V::splat(offset[2]);

    let (xs, ys, zs) = (set.x(), set.y(), set.z());
    for (i, chunk) in out[..total].chunks_mut(V::LANES).enumerate() {
        let base = i * V::LANES;
        let end = base + chunk.len();
        let x = load::<V>(&xs[base..end]).add(x_offset).mul(x_freq);
        let y = load::<V>(&ys[base..end]).add(y_offset).mul(y_freq);
        let z = load::<V>(&zs[base..end]).add(z_offset).mul(z_freq);
        store(evaluate(settings, x, y, z), chunk);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseType;
    use crate::level::SimdLevel;
    use hasty_math::ScalarVector;

    #[test]
    fn test_region_indexing() {
        let region = GridRegion::sized(3, 4, 5);
        assert_eq!(region.len(), 60);
        assert_eq!(region.index(0, 0, 4), 4);
        assert_eq!(region.index(0, 1, 0), 5);
        assert_eq!(region.index(2, 3, 4), 59);
        assert!(GridRegion::sized(3, 0, 5).is_empty());
    }

    #[test]
    fn test_oversized_region_len() {
        let region = GridRegion::sized(usize::MAX, 2, 1);
        assert_eq!(region.checked_len(), None);
        assert!(!region.is_empty());
        assert!(GridRegion::sized(usize::MAX, 2, 0).is_empty());
        assert_eq!(GridRegion::sized(usize::MAX, 1, 1).checked_len(), Some(usize::MAX));
    }

    #[test]
    #[should_panic(expected = "grid region sample count overflows usize")]
    fn test_oversized_region_len_panics() {
        GridRegion::sized(usize::MAX / 2, 1, 4).len();
    }

    #[test]
    fn test_scale_modifier_applies_last() {
        let mut settings = NoiseSettings::default();
        settings.noise_type = NoiseType::Perlin;
        let region = GridRegion::new([-3, 7, 11], [2, 3, 5]);
        let mut plain = vec![0.0; region.len()];
        let mut scaled = vec![0.0; region.len()];
        fill_grid::<ScalarVector>(&settings, &mut plain, &region, 1.0);
        fill_grid::<ScalarVector>(&settings, &mut scaled, &region, -2.0);
        for (p, s) in plain.iter().zip(&scaled) {
            assert_eq!(*s, *p * -2.0);
        }
    }

    #[test]
    fn test_points_follow_grid_order() {
        let mut settings = NoiseSettings::default();
        settings.noise_type = NoiseType::Value;
        settings.noise.set_frequency(0.37);
        let region = GridRegion::sized(3, 2, 3);
        let set = VectorSet::with_grid(SimdLevel::None, 3, 2, 3);

        let mut grid = vec![0.0; region.len()];
        let mut points = vec![0.0; set.len()];
        fill_grid::<ScalarVector>(&settings, &mut grid, &region, 1.0);
        fill_points::<ScalarVector>(&settings, &mut points, &set, [0.0; 3]);
        assert_eq!(grid, points);
    }

    #[test]
    fn test_extra_output_is_untouched() {
        let settings = NoiseSettings::default();
        let region = GridRegion::sized(1, 1, 3);
        let mut out = vec![42.0; 8];
        fill_grid::<ScalarVector>(&settings, &mut out, &region, 1.0);
        assert!(out[3..].iter().all(|&v| v == 42.0));
    }

    #[test]
    #[should_panic(expected = "noise output holds")]
    fn test_short_output_panics() {
        let settings = NoiseSettings::default();
        let mut out = vec![0.0; 7];
        fill_grid::<ScalarVector>(&settings, &mut out, &GridRegion::sized(2, 2, 2), 1.0);
    }
}
