//! Cubic noise

use super::hash::{val_coord, X_PRIME, Y_PRIME, Z_PRIME};
use super::lattice;
use hasty_math::{SimdInt, SimdVector};

const CUBIC_BOUNDING: f32 = 1.0 / (1.5 * 1.5 * 1.5);

#[inline(always)]
fn cubic_lerp<V: SimdVector>(a: V, b: V, c: V, d: V, t: V) -> V {
    let p = d.sub(c).sub(a.sub(b));
    t.mul(t.mul(t.mul(p).add(a.sub(b).sub(p))).add(c.sub(a))).add(b)
}

/// One x row of the 4x4x4 value lattice
#[inline(always)]
fn cubic_row<V: SimdVector>(seed: V::IntBits, xi: &[V::IntBits; 4], yj: V::IntBits, zk: V::IntBits, xs: V) -> V {
    cubic_lerp(
        val_coord(seed, xi[0], yj, zk),
        val_coord(seed, xi[1], yj, zk),
        val_coord(seed, xi[2], yj, zk),
        val_coord(seed, xi[3], yj, zk),
        xs,
    )
}

#[inline(always)]
fn cubic_plane<V: SimdVector>(
    seed: V::IntBits,
    xi: &[V::IntBits; 4],
    yi: &[V::IntBits; 4],
    zk: V::IntBits,
    xs: V,
    ys: V,
) -> V {
    cubic_lerp(
        cubic_row(seed, xi, yi[0], zk, xs),
        cubic_row(seed, xi, yi[1], zk, xs),
        cubic_row(seed, xi, yi[2], zk, xs),
        cubic_row(seed, xi, yi[3], zk, xs),
        ys,
    )
}

#[inline(always)]
pub(crate) fn cubic<V: SimdVector>(seed: V::IntBits, x: V, y: V, z: V) -> V {
    let (xc, xs) = lattice(x);
    let (yc, ys) = lattice(y);
    let (zc, zs) = lattice(z);

    let x1 = xc.mul_scalar(X_PRIME);
    let y1 = yc.mul_scalar(Y_PRIME);
    let z1 = zc.mul_scalar(Z_PRIME);

    let xi = [x1.add_scalar(-X_PRIME), x1, x1.add_scalar(X_PRIME), x1.add_scalar(2 * X_PRIME)];
    let yi = [y1.add_scalar(-Y_PRIME), y1, y1.add_scalar(Y_PRIME), y1.add_scalar(2 * Y_PRIME)];
    let zi = [z1.add_scalar(-Z_PRIME), z1, z1.add_scalar(Z_PRIME), z1.add_scalar(2 * Z_PRIME)];

    cubic_lerp(
        cubic_plane(seed, &xi, &yi, zi[0], xs, ys),
        cubic_plane(seed, &xi, &yi, zi[1], xs, ys),
        cubic_plane(seed, &xi, &yi, zi[2], xs, ys),
        cubic_plane(seed, &xi, &yi, zi[3], xs, ys),
        zs,
    )
    .mul(V::splat(CUBIC_BOUNDING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hasty_math::{ScalarInt, ScalarVector};

    #[test]
    fn test_cubic_lerp_interpolates_inner_points() {
        let (a, b, c, d) = (ScalarVector(-0.3), ScalarVector(0.8), ScalarVector(0.1), ScalarVector(0.5));
        assert!((cubic_lerp(a, b, c, d, ScalarVector(0.0)).0 - 0.8).abs() < 1e-6);
        assert!((cubic_lerp(a, b, c, d, ScalarVector(1.0)).0 - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_cubic_bounded() {
        for i in 0..5000 {
            let t = i as f32 * 0.0173;
            let v = cubic(ScalarInt(31), ScalarVector(t), ScalarVector(t * 0.5 - 4.0), ScalarVector(t * 1.9)).0;
            assert!(v.is_finite() && v.abs() <= 1.0 + 1e-5, "cubic out of range at {t}: {v}");
        }
    }

    #[test]
    fn test_lattice_points_take_the_hashed_value() {
        let seed = ScalarInt(1337);
        for (x, y, z) in [(0i32, 0i32, 0i32), (3, -2, 7), (-11, 5, -1)] {
            let expected = val_coord::<ScalarVector>(
                seed,
                ScalarInt(x.wrapping_mul(X_PRIME)),
                ScalarInt(y.wrapping_mul(Y_PRIME)),
                ScalarInt(z.wrapping_mul(Z_PRIME)),
            )
            .0 * CUBIC_BOUNDING;
            let v = cubic(seed, ScalarVector(x as f32), ScalarVector(y as f32), ScalarVector(z as f32)).0;
            assert!((v - expected).abs() < 1e-6, "lattice ({x}, {y}, {z}): {v} != {expected}");
        }
    }
}
