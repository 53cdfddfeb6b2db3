//! Noise selectors and parameter blocks
//!
//! [`NoiseConfig`] and [`PerturbConfig`] keep their fractal bounding constant
//! in sync with octaves and gain: the only way to change either is through a
//! setter that recomputes it.

use crate::error::ParseNameError;
use std::fmt;
use std::str::FromStr;

fn parse_named<T: Copy>(
    all: &[T],
    name: fn(T) -> &'static str,
    kind: &'static str,
    input: &str,
) -> Result<T, ParseNameError> {
    all.iter()
        .copied()
        .find(|v| name(*v).eq_ignore_ascii_case(input))
        .ok_or_else(|| ParseNameError::new(kind, input))
}

/// Noise family evaluated by an engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseType {
    /// Interpolated lattice values
    Value,
    /// Fractal [`NoiseType::Value`]
    ValueFractal,
    /// Gradient noise
    Perlin,
    /// Fractal [`NoiseType::Perlin`]
    PerlinFractal,
    /// Simplex noise
    Simplex,
    /// Fractal [`NoiseType::Simplex`]
    SimplexFractal,
    /// OpenSimplex2 (two offset lattices, no grid artifacts)
    OpenSimplex2,
    /// Fractal [`NoiseType::OpenSimplex2`]
    OpenSimplex2Fractal,
    /// Hash of the sample coordinate
    WhiteNoise,
    /// Worley noise, see [`CellularReturnType`]
    Cellular,
    /// Cubic convolution of a 4x4x4 lattice neighbourhood
    Cubic,
    /// Fractal [`NoiseType::Cubic`]
    CubicFractal,
}

/// Broad class of a [`NoiseType`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoiseClass {
    /// One octave
    Single,
    /// Octave accumulation driven by [`FractalType`]
    Fractal,
    /// Cellular settings apply
    Cellular,
}

impl NoiseType {
    /// Every noise type
    pub const ALL: [NoiseType; 12] = [
        NoiseType::Value,
        NoiseType::ValueFractal,
        NoiseType::Perlin,
        NoiseType::PerlinFractal,
        NoiseType::Simplex,
        NoiseType::SimplexFractal,
        NoiseType::OpenSimplex2,
        NoiseType::OpenSimplex2Fractal,
        NoiseType::WhiteNoise,
        NoiseType::Cellular,
        NoiseType::Cubic,
        NoiseType::CubicFractal,
    ];

    /// Stable name
    pub fn name(self) -> &'static str {
        match self {
            NoiseType::Value => "Value",
            NoiseType::ValueFractal => "ValueFractal",
            NoiseType::Perlin => "Perlin",
            NoiseType::PerlinFractal => "PerlinFractal",
            NoiseType::Simplex => "Simplex",
            NoiseType::SimplexFractal => "SimplexFractal",
            NoiseType::OpenSimplex2 => "OpenSimplex2",
            NoiseType::OpenSimplex2Fractal => "OpenSimplex2Fractal",
            NoiseType::WhiteNoise => "WhiteNoise",
            NoiseType::Cellular => "Cellular",
            NoiseType::Cubic => "Cubic",
            NoiseType::CubicFractal => "CubicFractal",
        }
    }

    /// Class of this type
    pub fn class(self) -> NoiseClass {
        match self {
            NoiseType::ValueFractal
            | NoiseType::PerlinFractal
            | NoiseType::SimplexFractal
            | NoiseType::OpenSimplex2Fractal
            | NoiseType::CubicFractal => NoiseClass::Fractal,
            NoiseType::Cellular => NoiseClass::Cellular,
            _ => NoiseClass::Single,
        }
    }

    /// Whether octave accumulation applies
    pub fn is_fractal(self) -> bool {
        self.class() == NoiseClass::Fractal
    }

    /// Single-octave type a fractal type accumulates
    pub fn base(self) -> NoiseType {
        match self {
            NoiseType::ValueFractal => NoiseType::Value,
            NoiseType::PerlinFractal => NoiseType::Perlin,
            NoiseType::SimplexFractal => NoiseType::Simplex,
            NoiseType::OpenSimplex2Fractal => NoiseType::OpenSimplex2,
            NoiseType::CubicFractal => NoiseType::Cubic,
            other => other,
        }
    }
}

/// Octave accumulation policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FractalType {
    /// Signed sum of octaves
    Fbm,
    /// `2|n| - 1` per octave
    Billow,
    /// `1 - |n|` per octave
    RigidMulti,
}

impl FractalType {
    /// Every fractal type
    pub const ALL: [FractalType; 3] = [FractalType::Fbm, FractalType::Billow, FractalType::RigidMulti];

    /// Stable name
    pub fn name(self) -> &'static str {
        match self {
            FractalType::Fbm => "FBM",
            FractalType::Billow => "Billow",
            FractalType::RigidMulti => "RigidMulti",
        }
    }
}

/// Domain perturbation applied before evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerturbType {
    /// No perturbation
    None,
    /// One octave of gradient displacement
    Gradient,
    /// Fractal gradient displacement
    GradientFractal,
    /// Project the sample position to the normalise length
    Normalise,
    /// Gradient displacement rescaled to the normalise length
    GradientNormalise,
    /// Fractal gradient displacement rescaled to the normalise length
    GradientFractalNormalise,
}

impl PerturbType {
    /// Every perturb type
    pub const ALL: [PerturbType; 6] = [
        PerturbType::None,
        PerturbType::Gradient,
        PerturbType::GradientFractal,
        PerturbType::Normalise,
        PerturbType::GradientNormalise,
        PerturbType::GradientFractalNormalise,
    ];

    /// Stable name
    pub fn name(self) -> &'static str {
        match self {
            PerturbType::None => "None",
            PerturbType::Gradient => "Gradient",
            PerturbType::GradientFractal => "GradientFractal",
            PerturbType::Normalise => "Normalise",
            PerturbType::GradientNormalise => "Gradient_Normalise",
            PerturbType::GradientFractalNormalise => "GradientFractal_Normalise",
        }
    }
}

/// Distance metric for cellular noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellularDistance {
    /// Squared Euclidean distance
    Euclidean,
    /// Sum of absolute offsets
    Manhattan,
    /// Euclidean plus Manhattan
    Natural,
}

impl CellularDistance {
    /// Every distance function
    pub const ALL: [CellularDistance; 3] = [
        CellularDistance::Euclidean,
        CellularDistance::Manhattan,
        CellularDistance::Natural,
    ];

    /// Stable name
    pub fn name(self) -> &'static str {
        match self {
            CellularDistance::Euclidean => "Euclidean",
            CellularDistance::Manhattan => "Manhattan",
            CellularDistance::Natural => "Natural",
        }
    }
}

/// Output of cellular noise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellularReturnType {
    /// Hash value of the nearest cell
    Value,
    /// Nearest distance
    Distance,
    /// Distance at rank `index1`
    Distance2,
    /// Nearest cell value scaled by the gap between the two ranked distances
    ValueDistance2,
    /// Sum of the two ranked distances
    Distance2Add,
    /// Difference of the two ranked distances
    Distance2Sub,
    /// Product of the two ranked distances
    Distance2Mul,
    /// Ratio of the two ranked distances
    Distance2Div,
    /// Secondary noise sampled at the nearest point
    NoiseLookup,
    /// Full-range ratio of the ranked distances
    Distance2Cave,
}

impl CellularReturnType {
    /// Every return type
    pub const ALL: [CellularReturnType; 10] = [
        CellularReturnType::Value,
        CellularReturnType::Distance,
        CellularReturnType::Distance2,
        CellularReturnType::ValueDistance2,
        CellularReturnType::Distance2Add,
        CellularReturnType::Distance2Sub,
        CellularReturnType::Distance2Mul,
        CellularReturnType::Distance2Div,
        CellularReturnType::NoiseLookup,
        CellularReturnType::Distance2Cave,
    ];

    /// Stable name
    pub fn name(self) -> &'static str {
        match self {
            CellularReturnType::Value => "Value",
            CellularReturnType::Distance => "Distance",
            CellularReturnType::Distance2 => "Distance2",
            CellularReturnType::ValueDistance2 => "ValueDistance2",
            CellularReturnType::Distance2Add => "Distance2Add",
            CellularReturnType::Distance2Sub => "Distance2Sub",
            CellularReturnType::Distance2Mul => "Distance2Mul",
            CellularReturnType::Distance2Div => "Distance2Div",
            CellularReturnType::NoiseLookup => "NoiseLookup",
            CellularReturnType::Distance2Cave => "Distance2Cave",
        }
    }

    /// Whether the ranked distance pair is tracked
    pub fn uses_distance2(self) -> bool {
        !matches!(
            self,
            CellularReturnType::Value | CellularReturnType::Distance | CellularReturnType::NoiseLookup
        )
    }
}

/// How a harness drives the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildType {
    /// Allocate and fill a grid
    Default,
    /// Fill a caller-provided grid buffer
    Map,
    /// Fill through a sample-position set
    Vector,
}

impl BuildType {
    /// Every build type
    pub const ALL: [BuildType; 3] = [BuildType::Default, BuildType::Map, BuildType::Vector];

    /// Stable name
    pub fn name(self) -> &'static str {
        match self {
            BuildType::Default => "Default",
            BuildType::Map => "Map",
            BuildType::Vector => "Vector",
        }
    }
}

impl fmt::Display for NoiseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for NoiseType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, Self::name, "noise type", s)
    }
}

impl fmt::Display for FractalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for FractalType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, Self::name, "fractal type", s)
    }
}

impl fmt::Display for PerturbType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for PerturbType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, Self::name, "perturb type", s)
    }
}

impl fmt::Display for CellularDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CellularDistance {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, Self::name, "cellular distance", s)
    }
}

impl fmt::Display for CellularReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for CellularReturnType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, Self::name, "cellular return type", s)
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for BuildType {
    type Err = ParseNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_named(&Self::ALL, Self::name, "build type", s)
    }
}

/// `1 / (1 + gain + gain^2 + ... + gain^(octaves-1))`
///
/// ```rust
/// let bounding = hasty_noise::calculate_fractal_bounding(3, 0.5);
/// assert!((bounding - 1.0 / 1.75).abs() < 1e-6);
/// ```
pub fn calculate_fractal_bounding(octaves: u32, gain: f32) -> f32 {
    let mut amp = gain;
    let mut amp_fractal = 1.0f32;
    for _ in 1..octaves {
        amp_fractal += amp;
        amp *= gain;
    }
    1.0 / amp_fractal
}

/// Primary noise parameters
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseConfig {
    seed: i32,
    frequency: f32,
    axis_scales: [f32; 3],
    octaves: u32,
    lacunarity: f32,
    gain: f32,
    fractal_bounding: f32,
    cellular_lookup_frequency: f32,
    cellular_distance_index0: usize,
    cellular_distance_index1: usize,
    cellular_jitter: f32,
}

impl NoiseConfig {
    /// Highest rank usable as a cellular distance index
    pub const MAX_DISTANCE_INDEX: usize = 3;

    /// Defaults with the given seed
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Hash seed
    pub fn seed(&self) -> i32 {
        self.seed
    }

    /// Set the hash seed
    pub fn set_seed(&mut self, seed: i32) {
        self.seed = seed;
    }

    /// Lattice frequency
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set the lattice frequency
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    /// Per-axis frequency multipliers
    pub fn axis_scales(&self) -> [f32; 3] {
        self.axis_scales
    }

    /// Set the per-axis frequency multipliers
    pub fn set_axis_scales(&mut self, x: f32, y: f32, z: f32) {
        self.axis_scales = [x, y, z];
    }

    /// Octave count
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Set the octave count (minimum 1) and recompute the bounding
    pub fn set_octaves(&mut self, octaves: u32) {
        self.octaves = octaves.max(1);
        self.fractal_bounding = calculate_fractal_bounding(self.octaves, self.gain);
    }

    /// Frequency multiplier between octaves
    pub fn lacunarity(&self) -> f32 {
        self.lacunarity
    }

    /// Set the frequency multiplier between octaves
    pub fn set_lacunarity(&mut self, lacunarity: f32) {
        self.lacunarity = lacunarity;
    }

    /// Amplitude multiplier between octaves
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Set the amplitude multiplier and recompute the bounding
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
        self.fractal_bounding = calculate_fractal_bounding(self.octaves, self.gain);
    }

    /// Normalization applied to fractal sums
    pub fn fractal_bounding(&self) -> f32 {
        self.fractal_bounding
    }

    /// Frequency of the secondary noise for [`CellularReturnType::NoiseLookup`]
    pub fn cellular_lookup_frequency(&self) -> f32 {
        self.cellular_lookup_frequency
    }

    /// Set the lookup frequency
    pub fn set_cellular_lookup_frequency(&mut self, frequency: f32) {
        self.cellular_lookup_frequency = frequency;
    }

    /// Ranked distance indices `(index0, index1)`, `index0 <= index1`
    pub fn cellular_distance_indices(&self) -> (usize, usize) {
        (self.cellular_distance_index0, self.cellular_distance_index1)
    }

    /// Set the ranked distance indices
    ///
    /// The pair is reordered so the smaller index comes first, then both are
    /// clamped into `0..=3`.
    ///
    /// ```rust
    /// let mut config = hasty_noise::NoiseConfig::default();
    /// config.set_cellular_distance_indices(3, 1);
    /// assert_eq!(config.cellular_distance_indices(), (1, 3));
    /// ```
    pub fn set_cellular_distance_indices(&mut self, index0: i32, index1: i32) {
        let clamp = |i: i32| i.clamp(0, Self::MAX_DISTANCE_INDEX as i32) as usize;
        self.cellular_distance_index0 = clamp(index0.min(index1));
        self.cellular_distance_index1 = clamp(index0.max(index1));
    }

    /// Distance of each cell point from its cell center
    pub fn cellular_jitter(&self) -> f32 {
        self.cellular_jitter
    }

    /// Set the cell point jitter
    pub fn set_cellular_jitter(&mut self, jitter: f32) {
        self.cellular_jitter = jitter;
    }
}

impl Default for NoiseConfig {
    fn default() -> Self {
        let octaves = 3;
        let gain = 0.5;
        Self {
            seed: 1337,
            frequency: 0.01,
            axis_scales: [1.0; 3],
            octaves,
            lacunarity: 2.0,
            gain,
            fractal_bounding: calculate_fractal_bounding(octaves, gain),
            cellular_lookup_frequency: 0.2,
            cellular_distance_index0: 0,
            cellular_distance_index1: 1,
            cellular_jitter: 0.45,
        }
    }
}

/// Domain perturbation parameters
#[derive(Debug, Clone, PartialEq)]
pub struct PerturbConfig {
    amp: f32,
    frequency: f32,
    octaves: u32,
    lacunarity: f32,
    gain: f32,
    fractal_bounding: f32,
    normalise_length: f32,
}

impl PerturbConfig {
    /// Half-range of the 10-bit hash fields that seed displacement vectors
    pub const HASH_HALF_RANGE: f32 = 511.5;

    /// Displacement amplitude in noise-space units
    pub fn amp(&self) -> f32 {
        self.amp
    }

    /// Amplitude scaled to the raw hash-field range
    pub fn hash_amp(&self) -> f32 {
        self.amp / Self::HASH_HALF_RANGE
    }

    /// Set the displacement amplitude
    pub fn set_amp(&mut self, amp: f32) {
        self.amp = amp;
    }

    /// Frequency of the displacement field
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Set the displacement field frequency
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
    }

    /// Octaves of fractal perturbation
    pub fn octaves(&self) -> u32 {
        self.octaves
    }

    /// Set the octave count (minimum 1) and recompute the bounding
    pub fn set_octaves(&mut self, octaves: u32) {
        self.octaves = octaves.max(1);
        self.fractal_bounding = calculate_fractal_bounding(self.octaves, self.gain);
    }

    /// Frequency multiplier between perturb octaves
    pub fn lacunarity(&self) -> f32 {
        self.lacunarity
    }

    /// Set the frequency multiplier between perturb octaves
    pub fn set_lacunarity(&mut self, lacunarity: f32) {
        self.lacunarity = lacunarity;
    }

    /// Amplitude multiplier between perturb octaves
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Set the amplitude multiplier and recompute the bounding
    pub fn set_gain(&mut self, gain: f32) {
        self.gain = gain;
        self.fractal_bounding = calculate_fractal_bounding(self.octaves, self.gain);
    }

    /// Normalization applied to the fractal displacement
    pub fn fractal_bounding(&self) -> f32 {
        self.fractal_bounding
    }

    /// Target length of the normalise variants
    pub fn normalise_length(&self) -> f32 {
        self.normalise_length
    }

    /// Set the normalise target length
    pub fn set_normalise_length(&mut self, length: f32) {
        self.normalise_length = length;
    }
}

impl Default for PerturbConfig {
    fn default() -> Self {
        let octaves = 3;
        let gain = 0.5;
        Self {
            amp: 1.0,
            frequency: 0.5,
            octaves,
            lacunarity: 2.0,
            gain,
            fractal_bounding: calculate_fractal_bounding(octaves, gain),
            normalise_length: 1.0,
        }
    }
}

/// Everything a fill kernel reads
///
/// Engines own one of these; plugin kernels receive it by reference.
#[derive(Debug, Clone, PartialEq)]
pub struct NoiseSettings {
    /// Selected noise family
    pub noise_type: NoiseType,
    /// Octave accumulation policy for fractal types
    pub fractal_type: FractalType,
    /// Cellular distance metric
    pub cellular_distance: CellularDistance,
    /// Cellular output selection
    pub cellular_return_type: CellularReturnType,
    /// Domain perturbation
    pub perturb_type: PerturbType,
    cellular_lookup_type: NoiseType,
    /// Primary parameters
    pub noise: NoiseConfig,
    /// Perturbation parameters
    pub perturb: PerturbConfig,
}

impl NoiseSettings {
    /// Defaults with the given seed
    pub fn with_seed(seed: i32) -> Self {
        Self {
            noise: NoiseConfig::with_seed(seed),
            ..Self::default()
        }
    }

    /// Noise type sampled by [`CellularReturnType::NoiseLookup`]
    pub fn cellular_lookup_type(&self) -> NoiseType {
        self.cellular_lookup_type
    }

    /// Set the lookup noise type
    ///
    /// Cellular cannot look itself up; it is replaced by Simplex.
    pub fn set_cellular_lookup_type(&mut self, noise_type: NoiseType) {
        if noise_type == NoiseType::Cellular {
            log::warn!("cellular noise cannot be its own lookup type, using Simplex");
            self.cellular_lookup_type = NoiseType::Simplex;
        } else {
            self.cellular_lookup_type = noise_type;
        }
    }
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            noise_type: NoiseType::SimplexFractal,
            fractal_type: FractalType::Fbm,
            cellular_distance: CellularDistance::Euclidean,
            cellular_return_type: CellularReturnType::Distance,
            perturb_type: PerturbType::None,
            cellular_lookup_type: NoiseType::Simplex,
            noise: NoiseConfig::default(),
            perturb: PerturbConfig::default(),
        }
    }
}
