//! Domain perturbation
//!
//! Displacement vectors come from three 10-bit hash fields per lattice
//! corner, blended with the quintic curve. They span +-511.5 before scaling,
//! so the configured amplitude is divided by that half-range.

use super::hash::{hash_hb, hash_offsets, X_PRIME, Y_PRIME, Z_PRIME};
use super::{interp_quintic, lattice, lerp, mul_add};
use crate::config::{NoiseSettings, PerturbType};
use hasty_math::{SimdInt, SimdVector};

#[derive(Clone, Copy)]
struct Vec3<V> {
    x: V,
    y: V,
    z: V,
}

impl<V: SimdVector> Vec3<V> {
    #[inline(always)]
    fn lerp(self, other: Self, t: V) -> Self {
        Vec3 {
            x: lerp(self.x, other.x, t),
            y: lerp(self.y, other.y, t),
            z: lerp(self.z, other.z, t),
        }
    }

    #[inline(always)]
    fn length(self) -> V {
        self.x.mul(self.x).add(self.y.mul(self.y)).add(self.z.mul(self.z)).sqrt()
    }

    /// Rescale to `target` length; zero vectors stay zero
    #[inline(always)]
    fn with_length(self, target: V) -> Self {
        let length = self.length();
        let zero = V::splat(0.0);
        let scale = V::select(length.eq(zero), zero, target.div(length));
        Vec3 {
            x: self.x.mul(scale),
            y: self.y.mul(scale),
            z: self.z.mul(scale),
        }
    }
}

#[inline(always)]
fn corner<V: SimdVector>(seed: V::IntBits, x: V::IntBits, y: V::IntBits, z: V::IntBits) -> Vec3<V> {
    let (x, y, z) = hash_offsets::<V>(hash_hb(seed, x, y, z));
    Vec3 { x, y, z }
}

/// Raw displacement field (+-511.5 per axis) at `p * frequency`
#[inline(always)]
fn gradient_field<V: SimdVector>(seed: V::IntBits, frequency: V, p: Vec3<V>) -> Vec3<V> {
    let (xc, xf) = lattice(p.x.mul(frequency));
    let (yc, yf) = lattice(p.y.mul(frequency));
    let (zc, zf) = lattice(p.z.mul(frequency));

    let x0 = xc.mul_scalar(X_PRIME);
    let y0 = yc.mul_scalar(Y_PRIME);
    let z0 = zc.mul_scalar(Z_PRIME);
    let x1 = x0.add_scalar(X_PRIME);
    let y1 = y0.add_scalar(Y_PRIME);
    let z1 = z0.add_scalar(Z_PRIME);

    let xs = interp_quintic(xf);
    let ys = interp_quintic(yf);
    let zs = interp_quintic(zf);

    let near = corner(seed, x0, y0, z0)
        .lerp(corner(seed, x1, y0, z0), xs)
        .lerp(corner(seed, x0, y1, z0).lerp(corner(seed, x1, y1, z0), xs), ys);
    let far = corner(seed, x0, y0, z1)
        .lerp(corner(seed, x1, y0, z1), xs)
        .lerp(corner(seed, x0, y1, z1).lerp(corner(seed, x1, y1, z1), xs), ys);
    near.lerp(far, zs)
}

/// Displace `p` by one octave of the field, scaled by `amp`
#[inline(always)]
fn displace<V: SimdVector>(seed: V::IntBits, frequency: V, amp: V, p: Vec3<V>) -> Vec3<V> {
    let d = gradient_field(seed, frequency, p);
    Vec3 {
        x: mul_add(d.x, amp, p.x),
        y: mul_add(d.y, amp, p.y),
        z: mul_add(d.z, amp, p.z),
    }
}

#[inline(always)]
fn displace_fractal<V: SimdVector>(settings: &NoiseSettings, seed: V::IntBits, p: Vec3<V>) -> Vec3<V> {
    let perturb = &settings.perturb;
    let lacunarity = V::splat(perturb.lacunarity());
    let gain = V::splat(perturb.gain());
    let mut frequency = V::splat(perturb.frequency());
    let mut amp = V::splat(perturb.hash_amp() * perturb.fractal_bounding());

    let mut p = displace(seed, frequency, amp, p);
    for _ in 1..perturb.octaves() {
        frequency = frequency.mul(lacunarity);
        amp = amp.mul(gain);
        p = displace(seed, frequency, amp, p);
    }
    p
}

/// Move `moved` so that its offset from `origin` has the normalise length
#[inline(always)]
fn renormalise<V: SimdVector>(origin: Vec3<V>, moved: Vec3<V>, length: V) -> Vec3<V> {
    let offset = Vec3 {
        x: moved.x.sub(origin.x),
        y: moved.y.sub(origin.y),
        z: moved.z.sub(origin.z),
    }
    .with_length(length);
    Vec3 {
        x: origin.x.add(offset.x),
        y: origin.y.add(offset.y),
        z: origin.z.add(offset.z),
    }
}

/// Apply the configured perturbation to frequency-scaled coordinates
#[inline(always)]
pub(crate) fn perturb<V: SimdVector>(settings: &NoiseSettings, x: V, y: V, z: V) -> (V, V, V) {
    let perturb = &settings.perturb;
    let seed = V::IntBits::splat(settings.noise.seed());
    let frequency = V::splat(perturb.frequency());
    let amp = V::splat(perturb.hash_amp());
    let length = V::splat(perturb.normalise_length());
    let p = Vec3 { x, y, z };

    let out = match settings.perturb_type {
        PerturbType::None => p,
        PerturbType::Gradient => displace(seed, frequency, amp, p),
        PerturbType::GradientFractal => displace_fractal(settings, seed, p),
        PerturbType::Normalise => p.with_length(length),
        PerturbType::GradientNormalise => renormalise(p, displace(seed, frequency, amp, p), length),
        PerturbType::GradientFractalNormalise => renormalise(p, displace_fractal(settings, seed, p), length),
    };
    (out.x, out.y, out.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hasty_math::ScalarVector;

    fn run(settings: &NoiseSettings, p: (f32, f32, f32)) -> (f32, f32, f32) {
        let (x, y, z) = perturb(settings, ScalarVector(p.0), ScalarVector(p.1), ScalarVector(p.2));
        (x.0, y.0, z.0)
    }

    fn offset_len(a: (f32, f32, f32), b: (f32, f32, f32)) -> f32 {
        ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2) + (a.2 - b.2).powi(2)).sqrt()
    }

    #[test]
    fn test_none_is_identity() {
        let settings = NoiseSettings::default();
        assert_eq!(run(&settings, (1.5, -2.0, 3.25)), (1.5, -2.0, 3.25));
    }

    #[test]
    fn test_gradient_displacement_bounded_by_amp() {
        let mut settings = NoiseSettings::default();
        settings.perturb_type = PerturbType::Gradient;
        settings.perturb.set_amp(0.8);
        let max = 0.8 * 3f32.sqrt() + 1e-4;
        let mut moved = false;
        for i in 0..1000 {
            let p = (i as f32 * 0.37, i as f32 * -0.11, 4.0);
            let q = run(&settings, p);
            let d = offset_len(p, q);
            assert!(d <= max, "displacement {d} exceeds {max}");
            moved |= d > 0.01;
        }
        assert!(moved);
    }

    #[test]
    fn test_normalise_projects_onto_sphere() {
        let mut settings = NoiseSettings::default();
        settings.perturb_type = PerturbType::Normalise;
        settings.perturb.set_normalise_length(2.0);
        let q = run(&settings, (3.0, 4.0, 0.0));
        assert!((q.0 - 1.2).abs() < 1e-6 && (q.1 - 1.6).abs() < 1e-6 && q.2 == 0.0);
        assert_eq!(run(&settings, (0.0, 0.0, 0.0)), (0.0, 0.0, 0.0));
    }

    #[test]
    fn test_gradient_normalise_fixes_step_length() {
        let mut settings = NoiseSettings::default();
        settings.perturb.set_normalise_length(0.25);
        for perturb_type in [PerturbType::GradientNormalise, PerturbType::GradientFractalNormalise] {
            settings.perturb_type = perturb_type;
            for i in 0..200 {
                let p = (i as f32 * 0.53 + 0.1, 2.2, i as f32 * -0.29);
                let d = offset_len(p, run(&settings, p));
                assert!((d - 0.25).abs() < 1e-3 || d == 0.0, "{perturb_type}: step {d}");
            }
        }
    }
}
