//! Value noise

use super::hash::{val_coord, X_PRIME, Y_PRIME, Z_PRIME};
use super::{interp_quintic, lattice, lerp};
use hasty_math::{SimdInt, SimdVector};

#[inline(always)]
pub(crate) fn value<V: SimdVector>(seed: V::IntBits, x: V, y: V, z: V) -> V {
    let (xc, xf) = lattice(x);
    let (yc, yf) = lattice(y);
    let (zc, zf) = lattice(z);

    let x0 = xc.mul_scalar(X_PRIME);
    let y0 = yc.mul_scalar(Y_PRIME);
    let z0 = zc.mul_scalar(Z_PRIME);
    let x1 = x0.add_scalar(X_PRIME);
    let y1 = y0.add_scalar(Y_PRIME);
    let z1 = z0.add_scalar(Z_PRIME);

    let xs = interp_quintic(xf);
    let ys = interp_quintic(yf);
    let zs = interp_quintic(zf);

    let near = lerp(
        lerp(val_coord(seed, x0, y0, z0), val_coord(seed, x1, y0, z0), xs),
        lerp(val_coord(seed, x0, y1, z0), val_coord(seed, x1, y1, z0), xs),
        ys,
    );
    let far = lerp(
        lerp(val_coord(seed, x0, y0, z1), val_coord(seed, x1, y0, z1), xs),
        lerp(val_coord(seed, x0, y1, z1), val_coord(seed, x1, y1, z1), xs),
        ys,
    );
    lerp(near, far, zs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hasty_math::{ScalarInt, ScalarVector};

    #[test]
    fn test_lattice_points_hit_hash_values() {
        let seed = ScalarInt(1337);
        let v = value(seed, ScalarVector(3.0), ScalarVector(-2.0), ScalarVector(7.0));
        let expected: ScalarVector = val_coord(
            seed,
            ScalarInt(3 * X_PRIME),
            ScalarInt(-2 * Y_PRIME),
            ScalarInt(7 * Z_PRIME),
        );
        assert_eq!(v.0, expected.0);
    }

    #[test]
    fn test_bounded_and_continuous() {
        let seed = ScalarInt(7);
        let mut prev = value(seed, ScalarVector(0.0), ScalarVector(0.5), ScalarVector(0.25)).0;
        for i in 1..2000 {
            let x = i as f32 * 0.001;
            let v = value(seed, ScalarVector(x), ScalarVector(0.5), ScalarVector(0.25)).0;
            assert!((-1.0..=1.0).contains(&v));
            assert!((v - prev).abs() < 0.02, "jump at {x}");
            prev = v;
        }
    }
}
