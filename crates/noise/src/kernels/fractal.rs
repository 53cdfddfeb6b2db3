//! Octave accumulation

use super::mul_add;
use crate::config::{FractalType, NoiseSettings};
use hasty_math::{SimdInt, SimdVector};

#[inline(always)]
fn shape<V: SimdVector>(fractal_type: FractalType, n: V) -> V {
    match fractal_type {
        FractalType::Fbm => n,
        FractalType::Billow => mul_add(n.abs(), V::splat(2.0), V::splat(-1.0)),
        FractalType::RigidMulti => V::splat(1.0).sub(n.abs()),
    }
}

/// Sum `octaves` layers of `single`, each at a higher frequency and lower
/// amplitude, then normalise by the fractal bounding
#[inline(always)]
pub(crate) fn fractal<V, F>(settings: &NoiseSettings, x: V, y: V, z: V, single: F) -> V
where
    V: SimdVector,
    F: Fn(V::IntBits, V, V, V) -> V,
{
    let config = &settings.noise;
    let fractal_type = settings.fractal_type;
    let lacunarity = V::splat(config.lacunarity());
    let gain = V::splat(config.gain());

    let mut seed = V::IntBits::splat(config.seed());
    let (mut x, mut y, mut z) = (x, y, z);
    let mut amp = V::splat(1.0);
    let mut sum = shape(fractal_type, single(seed, x, y, z));

    for _ in 1..config.octaves() {
        x = x.mul(lacunarity);
        y = y.mul(lacunarity);
        z = z.mul(lacunarity);
        seed = seed.add_scalar(1);
        amp = amp.mul(gain);
        sum = mul_add(shape(fractal_type, single(seed, x, y, z)), amp, sum);
    }

    sum.mul(V::splat(config.fractal_bounding()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernels::perlin::perlin;
    use hasty_math::{ScalarInt, ScalarVector};

    fn constant(value: f32) -> impl Fn(ScalarInt, ScalarVector, ScalarVector, ScalarVector) -> ScalarVector {
        move |_, _, _, _| ScalarVector(value)
    }

    #[test]
    fn test_constant_layers_normalise_to_one() {
        let mut settings = NoiseSettings::default();
        settings.noise.set_octaves(5);
        let p = ScalarVector(0.5);
        let v = fractal(&settings, p, p, p, constant(1.0)).0;
        assert!((v - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_shapes() {
        let mut settings = NoiseSettings::default();
        settings.noise.set_octaves(1);
        let p = ScalarVector(0.5);

        settings.fractal_type = FractalType::Billow;
        assert_eq!(fractal(&settings, p, p, p, constant(-0.25)).0, -0.5);

        settings.fractal_type = FractalType::RigidMulti;
        assert_eq!(fractal(&settings, p, p, p, constant(-0.25)).0, 0.75);
    }

    #[test]
    fn test_octave_seeds_and_frequencies() {
        let mut settings = NoiseSettings::default();
        settings.noise.set_seed(10);
        settings.noise.set_octaves(2);
        settings.noise.set_gain(0.5);
        let (x, y, z) = (ScalarVector(0.37), ScalarVector(1.91), ScalarVector(-0.44));

        let expected = {
            let first = perlin(ScalarInt(10), x, y, z).0;
            let second = perlin(ScalarInt(11), ScalarVector(0.74), ScalarVector(3.82), ScalarVector(-0.88)).0;
            (second * 0.5 + first) * settings.noise.fractal_bounding()
        };
        let got = fractal(&settings, x, y, z, perlin::<ScalarVector>).0;
        assert!((got - expected).abs() < 1e-6);
    }
}
