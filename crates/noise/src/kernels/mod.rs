//! Noise kernels
//!
//! Every kernel is written once against [`SimdVector`] and evaluates one
//! sample per lane. Coordinates arrive already multiplied by the frequency and
//! axis scales. Kernels are `#[inline(always)]` so that each backend's
//! `#[target_feature]` fill entry point compiles the whole chain for its own
//! instruction set.

pub(crate) mod cellular;
pub(crate) mod cubic;
pub(crate) mod fractal;
pub(crate) mod hash;
pub(crate) mod perlin;
pub(crate) mod perturb;
pub(crate) mod simplex;
pub(crate) mod value;
pub(crate) mod white;

use crate::config::{NoiseSettings, NoiseType};
use hasty_math::{SimdInt, SimdVector};

/// `a * b + c`, fused only when the `fma` feature is enabled
#[inline(always)]
pub(crate) fn mul_add<V: SimdVector>(a: V, b: V, c: V) -> V {
    #[cfg(feature = "fma")]
    {
        a.fma(b, c)
    }
    #[cfg(not(feature = "fma"))]
    {
        a.mul(b).add(c)
    }
}

#[inline(always)]
pub(crate) fn lerp<V: SimdVector>(a: V, b: V, t: V) -> V {
    mul_add(t, b.sub(a), a)
}

/// `6t^5 - 15t^4 + 10t^3`
#[inline(always)]
pub(crate) fn interp_quintic<V: SimdVector>(t: V) -> V {
    let inner = mul_add(t, mul_add(t, V::splat(6.0), V::splat(-15.0)), V::splat(10.0));
    t.mul(t).mul(t).mul(inner)
}

/// Lattice cell of each coordinate plus the fractional offset within it
#[inline(always)]
pub(crate) fn lattice<V: SimdVector>(x: V) -> (V::IntBits, V) {
    let floor = x.floor();
    (floor.round_to_int(), x.sub(floor))
}

/// Evaluate the configured noise type at pre-scaled coordinates
#[inline(always)]
pub(crate) fn sample<V: SimdVector>(settings: &NoiseSettings, x: V, y: V, z: V) -> V {
    match settings.noise_type {
        NoiseType::Cellular => cellular::cellular(settings, x, y, z),
        other => lattice_noise(settings, other, x, y, z),
    }
}

/// Every noise type except cellular
///
/// Cellular noise-lookup calls this, so cellular never nests inside itself. A
/// cellular request here evaluates Simplex instead.
#[inline(always)]
pub(crate) fn lattice_noise<V: SimdVector>(
    settings: &NoiseSettings,
    noise_type: NoiseType,
    x: V,
    y: V,
    z: V,
) -> V {
    let seed = V::IntBits::splat(settings.noise.seed());
    match noise_type {
        NoiseType::Value => value::value(seed, x, y, z),
        NoiseType::ValueFractal => fractal::fractal(settings, x, y, z, value::value::<V>),
        NoiseType::Perlin => perlin::perlin(seed, x, y, z),
        NoiseType::PerlinFractal => fractal::fractal(settings, x, y, z, perlin::perlin::<V>),
        NoiseType::Simplex | NoiseType::Cellular => simplex::simplex(seed, x, y, z),
        NoiseType::SimplexFractal => fractal::fractal(settings, x, y, z, simplex::simplex::<V>),
        NoiseType::OpenSimplex2 => simplex::open_simplex2(seed, x, y, z),
        NoiseType::OpenSimplex2Fractal => {
            fractal::fractal(settings, x, y, z, simplex::open_simplex2::<V>)
        }
        NoiseType::WhiteNoise => white::white(seed, x, y, z),
        NoiseType::Cubic => cubic::cubic(seed, x, y, z),
        NoiseType::CubicFractal => fractal::fractal(settings, x, y, z, cubic::cubic::<V>),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hasty_math::ScalarVector;

    #[test]
    fn test_quintic_endpoints() {
        assert_eq!(interp_quintic(ScalarVector(0.0)).0, 0.0);
        assert_eq!(interp_quintic(ScalarVector(1.0)).0, 1.0);
        assert!((interp_quintic(ScalarVector(0.5)).0 - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_lattice_negative_coordinates() {
        let (cell, frac) = lattice(ScalarVector(-1.25));
        assert_eq!(cell.0, -2);
        assert!((frac.0 - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_cellular_lookup_never_recurses() {
        let settings = NoiseSettings::default();
        let (x, y, z) = (ScalarVector(0.3), ScalarVector(1.7), ScalarVector(-2.2));
        let direct: ScalarVector = lattice_noise(&settings, NoiseType::Simplex, x, y, z);
        let substituted: ScalarVector = lattice_noise(&settings, NoiseType::Cellular, x, y, z);
        assert_eq!(direct.0.to_bits(), substituted.0.to_bits());
    }
}
