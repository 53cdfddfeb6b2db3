//! White noise

use super::hash::{val_coord, X_PRIME, Y_PRIME, Z_PRIME};
use hasty_math::{SimdInt, SimdVector};

#[inline(always)]
fn coord_bits<V: SimdVector>(v: V, prime: i32) -> V::IntBits {
    let bits = v.to_bits();
    bits.xor(bits.shr(16)).mul_scalar(prime)
}

/// Hash of the exact coordinate bits, no interpolation
#[inline(always)]
pub(crate) fn white<V: SimdVector>(seed: V::IntBits, x: V, y: V, z: V) -> V {
    val_coord(
        seed,
        coord_bits(x, X_PRIME),
        coord_bits(y, Y_PRIME),
        coord_bits(z, Z_PRIME),
    )
}
