//! Cellular (Worley) noise
//!
//! One jittered feature point per lattice cell; the 3x3x3 block of cells
//! around the sample is scanned. Euclidean distances stay squared.

use super::hash::{hash_hb, hash_offsets, HASH_TO_FLOAT, X_PRIME, Y_PRIME, Z_PRIME};
use super::lattice_noise;
use crate::config::{CellularDistance, CellularReturnType, NoiseConfig, NoiseSettings};
use hasty_math::{SimdInt, SimdVector};

const START_DISTANCE: f32 = 999_999.0;

#[inline(always)]
fn distance<V: SimdVector>(metric: CellularDistance, x: V, y: V, z: V) -> V {
    match metric {
        CellularDistance::Euclidean => x.mul(x).add(y.mul(y)).add(z.mul(z)),
        CellularDistance::Manhattan => x.abs().add(y.abs()).add(z.abs()),
        CellularDistance::Natural => {
            let manhattan = x.abs().add(y.abs()).add(z.abs());
            let euclidean = x.mul(x).add(y.mul(y)).add(z.mul(z));
            manhattan.add(euclidean)
        }
    }
}

/// What the neighbourhood scan keeps per lane
#[derive(Clone, Copy)]
struct Nearest<V: SimdVector> {
    /// Ranked distances, ascending
    distances: [V; NoiseConfig::MAX_DISTANCE_INDEX + 1],
    /// Hash value of the nearest point
    value: V,
    /// Offset from the sample to the nearest point
    offset: [V; 3],
}

#[inline(always)]
fn scan<V: SimdVector>(settings: &NoiseSettings, track_rank: usize, x: V, y: V, z: V) -> Nearest<V> {
    let seed = V::IntBits::splat(settings.noise.seed());
    let metric = settings.cellular_distance;
    let jitter = V::splat(settings.noise.cellular_jitter());
    let one = V::splat(1.0);

    let xr = x.round_to_int();
    let yr = y.round_to_int();
    let zr = z.round_to_int();

    let mut nearest = Nearest {
        distances: [V::splat(START_DISTANCE); NoiseConfig::MAX_DISTANCE_INDEX + 1],
        value: V::splat(0.0),
        offset: [V::splat(0.0); 3],
    };

    let mut xcf = xr.add_scalar(-1).to_f32().sub(x);
    let mut xc = xr.add_scalar(-1).mul_scalar(X_PRIME);
    for _ in 0..3 {
        let mut ycf = yr.add_scalar(-1).to_f32().sub(y);
        let mut yc = yr.add_scalar(-1).mul_scalar(Y_PRIME);
        for _ in 0..3 {
            let mut zcf = zr.add_scalar(-1).to_f32().sub(z);
            let mut zc = zr.add_scalar(-1).mul_scalar(Z_PRIME);
            for _ in 0..3 {
                let h = hash_hb(seed, xc, yc, zc);
                let (xd, yd, zd) = hash_offsets::<V>(h);
                let inv_mag = jitter.div(xd.mul(xd).add(yd.mul(yd)).add(zd.mul(zd)).sqrt());
                let xd = xd.mul(inv_mag).add(xcf);
                let yd = yd.mul(inv_mag).add(ycf);
                let zd = zd.mul(inv_mag).add(zcf);

                let new_distance = distance(metric, xd, yd, zd);
                let closer = new_distance.lt(nearest.distances[0]);

                // Insertion into the ranked list, highest tracked rank first
                for rank in (1..=track_rank).rev() {
                    nearest.distances[rank] = nearest.distances[rank]
                        .min(new_distance)
                        .max(nearest.distances[rank - 1]);
                }
                nearest.distances[0] = nearest.distances[0].min(new_distance);

                nearest.value = V::select(closer, h.to_f32().mul(V::splat(HASH_TO_FLOAT)), nearest.value);
                nearest.offset = [
                    V::select(closer, xd, nearest.offset[0]),
                    V::select(closer, yd, nearest.offset[1]),
                    V::select(closer, zd, nearest.offset[2]),
                ];

                zcf = zcf.add(one);
                zc = zc.add_scalar(Z_PRIME);
            }
            ycf = ycf.add(one);
            yc = yc.add_scalar(Y_PRIME);
        }
        xcf = xcf.add(one);
        xc = xc.add_scalar(X_PRIME);
    }

    nearest
}

#[inline(always)]
fn clamp01<V: SimdVector>(v: V) -> V {
    v.max(V::splat(0.0)).min(V::splat(1.0))
}

#[inline(always)]
pub(crate) fn cellular<V: SimdVector>(settings: &NoiseSettings, x: V, y: V, z: V) -> V {
    let return_type = settings.cellular_return_type;
    let (i0, i1) = settings.noise.cellular_distance_indices();
    let track_rank = if return_type.uses_distance2() { i1 } else { 0 };
    let nearest = scan(settings, track_rank, x, y, z);

    let one = V::splat(1.0);
    let d0 = nearest.distances[i0];
    let d1 = nearest.distances[i1];

    match return_type {
        CellularReturnType::Value => nearest.value,
        CellularReturnType::Distance => nearest.distances[0].sub(one),
        CellularReturnType::Distance2 => d1.sub(one),
        CellularReturnType::Distance2Add => d1.add(d0).sub(one),
        CellularReturnType::Distance2Sub => d1.sub(d0).sub(one),
        CellularReturnType::Distance2Mul => d1.mul(d0).sub(one),
        CellularReturnType::Distance2Div => d0.div(d1).sub(one),
        CellularReturnType::Distance2Cave => clamp01(d0.div(d1)).mul(V::splat(2.0)).sub(one),
        CellularReturnType::ValueDistance2 => nearest.value.mul(clamp01(d1.sub(d0))),
        CellularReturnType::NoiseLookup => {
            let frequency = V::splat(settings.noise.cellular_lookup_frequency());
            let [xo, yo, zo] = nearest.offset;
            lattice_noise(
                settings,
                settings.cellular_lookup_type(),
                x.add(xo).mul(frequency),
                y.add(yo).mul(frequency),
                z.add(zo).mul(frequency),
            )
        }
    }
}
