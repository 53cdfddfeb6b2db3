//! Gradient (Perlin) noise

use super::hash::{grad_coord, X_PRIME, Y_PRIME, Z_PRIME};
use super::{interp_quintic, lattice, lerp};
use hasty_math::{SimdInt, SimdVector};

#[inline(always)]
pub(crate) fn perlin<V: SimdVector>(seed: V::IntBits, x: V, y: V, z: V) -> V {
    let (xc, xf0) = lattice(x);
    let (yc, yf0) = lattice(y);
    let (zc, zf0) = lattice(z);

    let x0 = xc.mul_scalar(X_PRIME);
    let y0 = yc.mul_scalar(Y_PRIME);
    let z0 = zc.mul_scalar(Z_PRIME);
    let x1 = x0.add_scalar(X_PRIME);
    let y1 = y0.add_scalar(Y_PRIME);
    let z1 = z0.add_scalar(Z_PRIME);

    let one = V::splat(1.0);
    let xf1 = xf0.sub(one);
    let yf1 = yf0.sub(one);
    let zf1 = zf0.sub(one);

    let xs = interp_quintic(xf0);
    let ys = interp_quintic(yf0);
    let zs = interp_quintic(zf0);

    let near = lerp(
        lerp(
            grad_coord(seed, x0, y0, z0, xf0, yf0, zf0),
            grad_coord(seed, x1, y0, z0, xf1, yf0, zf0),
            xs,
        ),
        lerp(
            grad_coord(seed, x0, y1, z0, xf0, yf1, zf0),
            grad_coord(seed, x1, y1, z0, xf1, yf1, zf0),
            xs,
        ),
        ys,
    );
    let far = lerp(
        lerp(
            grad_coord(seed, x0, y0, z1, xf0, yf0, zf1),
            grad_coord(seed, x1, y0, z1, xf1, yf0, zf1),
            xs,
        ),
        lerp(
            grad_coord(seed, x0, y1, z1, xf0, yf1, zf1),
            grad_coord(seed, x1, y1, z1, xf1, yf1, zf1),
            xs,
        ),
        ys,
    );
    lerp(near, far, zs)
}
