//! Noise engine instances
//!
//! A [`NoiseSimd`] pairs one backend's fill kernels with a mutable
//! [`NoiseSettings`]. The level is fixed at construction; build a new engine to
//! change it. Fills take `&self` and only read the settings, so one engine may
//! serve several threads at once.

use crate::buffer::AlignedBuffer;
use crate::config::{
    CellularDistance, CellularReturnType, FractalType, NoiseSettings, NoiseType, PerturbType,
};
use crate::fill::GridRegion;
use crate::level::SimdLevel;
use crate::vector_set::VectorSet;

/// Grid fill entry point of a backend
pub type GridFillFn = fn(&NoiseSettings, &mut [f32], &GridRegion, f32);

/// Point-set fill entry point of a backend
pub type PointFillFn = fn(&NoiseSettings, &mut [f32], &VectorSet, [f32; 3]);

/// Fill entry points compiled for one instruction-set level
#[derive(Debug, Clone, Copy)]
pub struct FillKernels {
    /// Level the entry points were compiled for
    pub level: SimdLevel,
    /// Grid fill
    pub grid: GridFillFn,
    /// Point-set fill
    pub points: PointFillFn,
}

/// A configured noise generator bound to one backend
#[derive(Debug, Clone)]
pub struct NoiseSimd {
    kernels: FillKernels,
    settings: NoiseSettings,
}

impl NoiseSimd {
    /// Engine with default settings and the given seed
    ///
    /// Applications normally go through [`create_noise`](crate::create_noise);
    /// this is for backends that construct their own engines.
    pub fn new(seed: i32, kernels: FillKernels) -> Self {
        Self {
            kernels,
            settings: NoiseSettings::with_seed(seed),
        }
    }

    /// Level this engine executes at
    pub fn level(&self) -> SimdLevel {
        self.kernels.level
    }

    /// Backend entry points
    pub fn kernels(&self) -> FillKernels {
        self.kernels
    }

    /// Current settings
    pub fn settings(&self) -> &NoiseSettings {
        &self.settings
    }

    /// Mutable settings
    pub fn settings_mut(&mut self) -> &mut NoiseSettings {
        &mut self.settings
    }

    // Configuration

    /// Hash seed
    pub fn seed(&self) -> i32 {
        self.settings.noise.seed()
    }

    /// Set the hash seed
    pub fn set_seed(&mut self, seed: i32) {
        self.settings.noise.set_seed(seed);
    }

    /// Lattice frequency
    pub fn frequency(&self) -> f32 {
        self.settings.noise.frequency()
    }

    /// Set the lattice frequency (default 0.01)
    pub fn set_frequency(&mut self, frequency: f32) {
        self.settings.noise.set_frequency(frequency);
    }

    /// Set per-axis frequency multipliers (default 1)
    pub fn set_axis_scales(&mut self, x: f32, y: f32, z: f32) {
        self.settings.noise.set_axis_scales(x, y, z);
    }

    /// Selected noise family
    pub fn noise_type(&self) -> NoiseType {
        self.settings.noise_type
    }

    /// Select the noise family
    pub fn set_noise_type(&mut self, noise_type: NoiseType) {
        self.settings.noise_type = noise_type;
    }

    /// Select the octave accumulation policy
    pub fn set_fractal_type(&mut self, fractal_type: FractalType) {
        self.settings.fractal_type = fractal_type;
    }

    /// Set the octave count (minimum 1)
    pub fn set_fractal_octaves(&mut self, octaves: u32) {
        self.settings.noise.set_octaves(octaves);
    }

    /// Set the frequency multiplier between octaves
    pub fn set_fractal_lacunarity(&mut self, lacunarity: f32) {
        self.settings.noise.set_lacunarity(lacunarity);
    }

    /// Set the amplitude multiplier between octaves
    pub fn set_fractal_gain(&mut self, gain: f32) {
        self.settings.noise.set_gain(gain);
    }

    /// Select the cellular distance metric
    pub fn set_cellular_distance_function(&mut self, distance: CellularDistance) {
        self.settings.cellular_distance = distance;
    }

    /// Select the cellular output
    pub fn set_cellular_return_type(&mut self, return_type: CellularReturnType) {
        self.settings.cellular_return_type = return_type;
    }

    /// Select the noise sampled by [`CellularReturnType::NoiseLookup`]
    pub fn set_cellular_noise_lookup_type(&mut self, noise_type: NoiseType) {
        self.settings.set_cellular_lookup_type(noise_type);
    }

    /// Set the frequency of the cellular lookup noise
    pub fn set_cellular_noise_lookup_frequency(&mut self, frequency: f32) {
        self.settings.noise.set_cellular_lookup_frequency(frequency);
    }

    /// Set the ranked distances combined by the `Distance2*` return types
    ///
    /// The pair is reordered and clamped into `0..=3`.
    pub fn set_cellular_distance2_indices(&mut self, index0: i32, index1: i32) {
        self.settings.noise.set_cellular_distance_indices(index0, index1);
    }

    /// Set the feature point jitter (default 0.45)
    pub fn set_cellular_jitter(&mut self, jitter: f32) {
        self.settings.noise.set_cellular_jitter(jitter);
    }

    /// Select the domain perturbation
    pub fn set_perturb_type(&mut self, perturb_type: PerturbType) {
        self.settings.perturb_type = perturb_type;
    }

    /// Set the perturbation amplitude
    pub fn set_perturb_amp(&mut self, amp: f32) {
        self.settings.perturb.set_amp(amp);
    }

    /// Set the perturbation frequency
    pub fn set_perturb_frequency(&mut self, frequency: f32) {
        self.settings.perturb.set_frequency(frequency);
    }

    /// Set the perturbation octave count (minimum 1)
    pub fn set_perturb_fractal_octaves(&mut self, octaves: u32) {
        self.settings.perturb.set_octaves(octaves);
    }

    /// Set the perturbation lacunarity
    pub fn set_perturb_fractal_lacunarity(&mut self, lacunarity: f32) {
        self.settings.perturb.set_lacunarity(lacunarity);
    }

    /// Set the perturbation gain
    pub fn set_perturb_fractal_gain(&mut self, gain: f32) {
        self.settings.perturb.set_gain(gain);
    }

    /// Set the target length of the normalise perturbations
    pub fn set_perturb_normalise_length(&mut self, length: f32) {
        self.settings.perturb.set_normalise_length(length);
    }

    // Evaluation

    /// Fill `out` with the noise of `region`, multiplied by `scale_modifier`
    ///
    /// # Panics
    ///
    /// Panics if `out.len() < region.len()`.
    pub fn fill_set(&self, out: &mut [f32], region: &GridRegion, scale_modifier: f32) {
        (self.kernels.grid)(&self.settings, out, region, scale_modifier);
    }

    /// Allocate a buffer for `region` and fill it
    ///
    /// The buffer is padded to the lane width; padding stays zero.
    ///
    /// ```rust
    /// use hasty_noise::{create_noise, GridRegion, NoiseType, AUTO_LEVEL};
    ///
    /// let mut noise = create_noise(1337, AUTO_LEVEL);
    /// noise.set_noise_type(NoiseType::Perlin);
    /// let values = noise.noise_set(&GridRegion::sized(4, 4, 4), 1.0);
    /// assert!(values.len() >= 64);
    /// ```
    pub fn noise_set(&self, region: &GridRegion, scale_modifier: f32) -> AlignedBuffer {
        let mut buffer = self.empty_set(region.len());
        self.fill_set(&mut buffer, region, scale_modifier);
        buffer
    }

    /// Fill `out` with the noise at every point of `set`, shifted by `offset`
    ///
    /// # Panics
    ///
    /// Panics if `out.len() < set.len()`.
    pub fn fill_vector_set(&self, out: &mut [f32], set: &VectorSet, offset: [f32; 3]) {
        (self.kernels.points)(&self.settings, out, set, offset);
    }

    /// Allocate a buffer for `set` and fill it
    pub fn noise_vector_set(&self, set: &VectorSet, offset: [f32; 3]) -> AlignedBuffer {
        let mut buffer = self.empty_set(set.len());
        self.fill_vector_set(&mut buffer, set, offset);
        buffer
    }

    // Allocation at this engine's level

    /// Zeroed buffer for `len` values, padded to the lane width
    pub fn empty_set(&self, len: usize) -> AlignedBuffer {
        let level = self.level();
        AlignedBuffer::zeroed(level.aligned_size(len), level)
    }

    /// Every integer point of an `x * y * z` grid
    pub fn vector_set(&self, x: usize, y: usize, z: usize) -> VectorSet {
        VectorSet::with_grid(self.level(), x, y, z)
    }

    /// Decimated anchors covering an `x * y * z` grid, see
    /// [`VectorSet::with_sampling`]
    pub fn sampling_vector_set(&self, scale: i32, x: usize, y: usize, z: usize) -> VectorSet {
        VectorSet::with_sampling(self.level(), scale, x, y, z)
    }
}
