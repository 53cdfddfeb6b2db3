//! Simplex and OpenSimplex2 noise

use super::hash::{grad_coord, X_PRIME, Y_PRIME, Z_PRIME};
use hasty_math::{SimdInt, SimdMask, SimdVector};

const F3: f32 = 1.0 / 3.0;
const G3: f32 = 1.0 / 6.0;
const G33: f32 = G3 * 3.0 - 1.0;

const SIMPLEX_SCALE: f32 = 32.0;
const OPEN_SIMPLEX2_SCALE: f32 = 32.694_282_531_738_28;

/// `t^4 * grad`, zero where the corner is out of reach
#[inline(always)]
fn corner<V: SimdVector>(t: V, grad: V) -> V {
    let t2 = t.mul(t);
    let n = t2.mul(t2).mul(grad);
    V::select(t.lt(V::splat(0.0)), V::splat(0.0), n)
}

#[inline(always)]
fn falloff<V: SimdVector>(x: V, y: V, z: V) -> V {
    V::splat(0.6).sub(x.mul(x)).sub(y.mul(y)).sub(z.mul(z))
}

#[inline(always)]
fn step<V: SimdVector>(mask: <V as SimdVector>::Mask) -> V {
    V::select(mask, V::splat(1.0), V::splat(0.0))
}

#[inline(always)]
fn prime_if<V: SimdVector>(mask: <V as SimdVector>::Mask, prime: i32) -> V::IntBits {
    V::IntBits::select(mask, V::IntBits::splat(prime), V::IntBits::splat(0))
}

/// `-1` where `neg` is set, `+1` elsewhere
#[inline(always)]
fn signed_one<V: SimdVector>(neg: <V as SimdVector>::Mask) -> V {
    V::select(neg, V::splat(-1.0), V::splat(1.0))
}

/// Signed hash step along the dominant axis, zero off it
#[inline(always)]
fn step_prime<V: SimdVector>(neg: <V as SimdVector>::Mask, dom: <V as SimdVector>::Mask, prime: i32) -> V::IntBits {
    V::IntBits::select(
        dom,
        V::IntBits::select(neg, V::IntBits::splat(prime), V::IntBits::splat(-prime)),
        V::IntBits::splat(0),
    )
}

#[inline(always)]
pub(crate) fn simplex<V: SimdVector>(seed: V::IntBits, x: V, y: V, z: V) -> V {
    let f = V::splat(F3).mul(x.add(y).add(z));
    let xs = x.add(f).floor();
    let ys = y.add(f).floor();
    let zs = z.add(f).floor();

    let i = xs.round_to_int().mul_scalar(X_PRIME);
    let j = ys.round_to_int().mul_scalar(Y_PRIME);
    let k = zs.round_to_int().mul_scalar(Z_PRIME);

    let g = V::splat(G3).mul(xs.add(ys).add(zs));
    let x0 = x.sub(xs.sub(g));
    let y0 = y.sub(ys.sub(g));
    let z0 = z.sub(zs.sub(g));

    let x_ge_y = x0.ge(y0);
    let y_ge_z = y0.ge(z0);
    let x_ge_z = x0.ge(z0);

    let i1 = x_ge_y.and(x_ge_z);
    let j1 = x_ge_y.not().and(y_ge_z);
    let k1 = x_ge_z.not().and(y_ge_z.not());

    let i2 = x_ge_y.or(x_ge_z);
    let j2 = x_ge_y.not().or(y_ge_z);
    let k2 = x_ge_z.and(y_ge_z).not();

    let g3 = V::splat(G3);
    let x1 = x0.sub(step::<V>(i1)).add(g3);
    let y1 = y0.sub(step::<V>(j1)).add(g3);
    let z1 = z0.sub(step::<V>(k1)).add(g3);

    let f3 = V::splat(F3);
    let x2 = x0.sub(step::<V>(i2)).add(f3);
    let y2 = y0.sub(step::<V>(j2)).add(f3);
    let z2 = z0.sub(step::<V>(k2)).add(f3);

    let g33 = V::splat(G33);
    let x3 = x0.add(g33);
    let y3 = y0.add(g33);
    let z3 = z0.add(g33);

    let n0 = corner(falloff(x0, y0, z0), grad_coord(seed, i, j, k, x0, y0, z0));
    let n1 = corner(
        falloff(x1, y1, z1),
        grad_coord(
            seed,
            i.add(prime_if::<V>(i1, X_PRIME)),
            j.add(prime_if::<V>(j1, Y_PRIME)),
            k.add(prime_if::<V>(k1, Z_PRIME)),
            x1,
            y1,
            z1,
        ),
    );
    let n2 = corner(
        falloff(x2, y2, z2),
        grad_coord(
            seed,
            i.add(prime_if::<V>(i2, X_PRIME)),
            j.add(prime_if::<V>(j2, Y_PRIME)),
            k.add(prime_if::<V>(k2, Z_PRIME)),
            x2,
            y2,
            z2,
        ),
    );
    let n3 = corner(
        falloff(x3, y3, z3),
        grad_coord(
            seed,
            i.add_scalar(X_PRIME),
            j.add_scalar(Y_PRIME),
            k.add_scalar(Z_PRIME),
            x3,
            y3,
            z3,
        ),
    );

    V::splat(SIMPLEX_SCALE).mul(n0.add(n1).add(n2).add(n3))
}

/// OpenSimplex2 over two offset body-centred cubic lattices
///
/// The input is first rotated so that the lattice diagonal points along an
/// axis, which hides the cubic grid when slicing in XY.
#[inline(always)]
pub(crate) fn open_simplex2<V: SimdVector>(seed: V::IntBits, x: V, y: V, z: V) -> V {
    let r = x.add(y).add(z).mul(V::splat(2.0 / 3.0));
    let x = r.sub(x);
    let y = r.sub(y);
    let z = r.sub(z);

    let xr = x.round_to_int();
    let yr = y.round_to_int();
    let zr = z.round_to_int();

    let mut x0 = x.sub(xr.to_f32());
    let mut y0 = y.sub(yr.to_f32());
    let mut z0 = z.sub(zr.to_f32());

    let zero = V::splat(0.0);
    let one = V::splat(1.0);

    // Sign of the step back towards the other lattice: true means -1
    let mut x_neg = x0.ge(zero);
    let mut y_neg = y0.ge(zero);
    let mut z_neg = z0.ge(zero);

    let mut ax0 = x0.abs();
    let mut ay0 = y0.abs();
    let mut az0 = z0.abs();

    let mut i = xr.mul_scalar(X_PRIME);
    let mut j = yr.mul_scalar(Y_PRIME);
    let mut k = zr.mul_scalar(Z_PRIME);
    let mut seed = seed;

    let mut value = zero;
    let mut a = V::splat(0.6).sub(x0.mul(x0)).sub(y0.mul(y0).add(z0.mul(z0)));

    for pass in 0..2 {
        let a_pos = a.gt(zero);
        let a2 = a.mul(a);
        let n = a2.mul(a2).mul(grad_coord(seed, i, j, k, x0, y0, z0));
        value = value.add(V::select(a_pos, n, zero));

        let x_dom = ax0.ge(ay0).and(ax0.ge(az0));
        let y_dom = x_dom.not().and(ay0.gt(ax0)).and(ay0.ge(az0));
        let z_dom = x_dom.or(y_dom).not();

        let axis = V::select(x_dom, ax0, V::select(y_dom, ay0, az0));
        let b = a.add(axis).add(axis);
        let b_pos = b.gt(one);
        let b = b.sub(one);

        let xb = x0.add(V::select(x_dom, signed_one(x_neg), zero));
        let yb = y0.add(V::select(y_dom, signed_one(y_neg), zero));
        let zb = z0.add(V::select(z_dom, signed_one(z_neg), zero));
        let ib = i.add(step_prime::<V>(x_neg, x_dom, X_PRIME));
        let jb = j.add(step_prime::<V>(y_neg, y_dom, Y_PRIME));
        let kb = k.add(step_prime::<V>(z_neg, z_dom, Z_PRIME));

        let b2 = b.mul(b);
        let nb = b2.mul(b2).mul(grad_coord(seed, ib, jb, kb, xb, yb, zb));
        value = value.add(V::select(b_pos, nb, zero));

        if pass == 1 {
            break;
        }

        let half = V::splat(0.5);
        ax0 = half.sub(ax0);
        ay0 = half.sub(ay0);
        az0 = half.sub(az0);

        x0 = V::select(x_neg, ax0.neg(), ax0);
        y0 = V::select(y_neg, ay0.neg(), ay0);
        z0 = V::select(z_neg, az0.neg(), az0);

        a = a.add(V::splat(0.75).sub(ax0).sub(ay0.add(az0)));

        i = i.add(prime_if::<V>(x_neg, X_PRIME));
        j = j.add(prime_if::<V>(y_neg, Y_PRIME));
        k = k.add(prime_if::<V>(z_neg, Z_PRIME));

        x_neg = x_neg.not();
        y_neg = y_neg.not();
        z_neg = z_neg.not();

        seed = seed.xor(V::IntBits::splat(-1));
    }

    value.mul(V::splat(OPEN_SIMPLEX2_SCALE))
}
