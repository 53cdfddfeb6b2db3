//! Lattice hashing
//!
//! All integer arithmetic wraps. The shift is logical on every backend.

use hasty_math::{SimdInt, SimdVector};

pub(crate) const X_PRIME: i32 = 1619;
pub(crate) const Y_PRIME: i32 = 31337;
pub(crate) const Z_PRIME: i32 = 6971;

const HASH_MULTIPLIER: i32 = 60493;

/// 2^-31: maps a full-range i32 into [-1, 1]
pub(crate) const HASH_TO_FLOAT: f32 = 1.0 / 2_147_483_648.0;

#[inline(always)]
pub(crate) fn hash_hb<I: SimdInt>(seed: I, x: I, y: I, z: I) -> I {
    let h = seed.xor(x).xor(y).xor(z);
    h.mul(h).mul_scalar(HASH_MULTIPLIER).mul(h)
}

#[inline(always)]
pub(crate) fn hash<I: SimdInt>(seed: I, x: I, y: I, z: I) -> I {
    let h = hash_hb(seed, x, y, z);
    h.shr(13).xor(h)
}

/// Pseudo-random value in [-1, 1] for a lattice point
#[inline(always)]
pub(crate) fn val_coord<V: SimdVector>(seed: V::IntBits, x: V::IntBits, y: V::IntBits, z: V::IntBits) -> V {
    hash_hb(seed, x, y, z).to_f32().mul(V::splat(HASH_TO_FLOAT))
}

/// Dot product of the offset with one of 12 edge gradients picked by the hash
#[inline(always)]
pub(crate) fn grad_coord<V: SimdVector>(
    seed: V::IntBits,
    xi: V::IntBits,
    yi: V::IntBits,
    zi: V::IntBits,
    x: V,
    y: V,
    z: V,
) -> V {
    let h = hash(seed, xi, yi, zi);
    let h13 = h.and_scalar(13);

    let u = V::select(h13.lt(V::IntBits::splat(8)), x, y);
    let v = V::select(
        h13.lt(V::IntBits::splat(2)),
        y,
        V::select(h13.eq(V::IntBits::splat(12)), x, z),
    );

    let u = V::from_bits(u.to_bits().xor(h.shl(31)));
    let v = V::from_bits(v.to_bits().xor(h.and_scalar(2).shl(30)));
    u.add(v)
}

/// Three signed 10-bit fields of `h`, centred on zero
#[inline(always)]
pub(crate) fn hash_offsets<V: SimdVector>(h: V::IntBits) -> (V, V, V) {
    let half = V::splat(511.5);
    let x = h.and_scalar(1023).to_f32().sub(half);
    let y = h.shr(10).and_scalar(1023).to_f32().sub(half);
    let z = h.shr(20).and_scalar(1023).to_f32().sub(half);
    (x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hasty_math::{ScalarInt, ScalarVector};

    #[test]
    fn test_hash_matches_wrapping_reference() {
        let seed = 1337i32;
        let (x, y, z) = (5 * X_PRIME, -3 * Y_PRIME, 11 * Z_PRIME);
        let mut h = seed ^ x ^ y ^ z;
        h = h.wrapping_mul(h).wrapping_mul(HASH_MULTIPLIER).wrapping_mul(h);
        let expected = (((h as u32) >> 13) as i32) ^ h;

        let got = hash(ScalarInt(seed), ScalarInt(x), ScalarInt(y), ScalarInt(z));
        assert_eq!(got.0, expected);
        assert_eq!(hash_hb(ScalarInt(seed), ScalarInt(x), ScalarInt(y), ScalarInt(z)).0, h);
    }

    #[test]
    fn test_val_coord_range() {
        for i in -200..200 {
            let v: ScalarVector = val_coord(
                ScalarInt(i * 7),
                ScalarInt(i * X_PRIME),
                ScalarInt(i * 3 * Y_PRIME),
                ScalarInt(-i * Z_PRIME),
            );
            assert!((-1.0..=1.0).contains(&v.0));
        }
    }

    #[test]
    fn test_grad_coord_is_edge_gradient() {
        // Every gradient has two unit components, so the dot product with
        // (1, 10, 100) is a signed sum of two of those components.
        let allowed = [9.0, 11.0, 90.0, 99.0, 101.0, 110.0];
        for i in 0..256 {
            let g: ScalarVector = grad_coord(
                ScalarInt(42),
                ScalarInt(i * X_PRIME),
                ScalarInt((i / 3) * Y_PRIME),
                ScalarInt((i % 5) * Z_PRIME),
                ScalarVector(1.0),
                ScalarVector(10.0),
                ScalarVector(100.0),
            );
            assert!(allowed.contains(&g.0.abs()), "unexpected gradient dot {}", g.0);
        }
    }

    #[test]
    fn test_hash_offsets_are_centred() {
        let (x, y, z): (ScalarVector, ScalarVector, ScalarVector) = hash_offsets(ScalarInt(0));
        assert_eq!((x.0, y.0, z.0), (-511.5, -511.5, -511.5));
        let (x, y, z): (ScalarVector, ScalarVector, ScalarVector) = hash_offsets(ScalarInt(-1));
        assert_eq!((x.0, y.0, z.0), (511.5, 511.5, 511.5));
    }
}
