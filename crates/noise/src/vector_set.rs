//! Sample-position sets
//!
//! A [`VectorSet`] stores N points as three coordinate arrays inside one
//! aligned allocation. Each array starts on a lane boundary of the level the
//! set was built for.

use crate::buffer::AlignedBuffer;
use crate::level::SimdLevel;

/// Largest decimation exponent accepted by [`VectorSet::with_sampling`]
pub const MAX_SAMPLE_SCALE: i32 = 16;

/// Point positions for point-set fills
#[derive(Debug)]
pub struct VectorSet {
    buffer: AlignedBuffer,
    len: usize,
    stride: usize,
    sample_scale: i32,
    size: [usize; 3],
    points: [usize; 3],
}

fn point_count([x, y, z]: [usize; 3]) -> usize {
    x.checked_mul(y)
        .and_then(|xy| xy.checked_mul(z))
        .expect("vector set point count overflows usize")
}

impl VectorSet {
    /// `len` points, all at the origin
    ///
    /// # Panics
    ///
    /// Panics if three lane-aligned coordinate arrays of `len` floats do not
    /// fit in `usize`.
    pub fn new(len: usize, level: SimdLevel) -> Self {
        let stride = level.aligned_size(len);
        let floats = stride.checked_mul(3).expect("vector set size overflows usize");
        Self {
            buffer: AlignedBuffer::zeroed(floats, level),
            len,
            stride,
            sample_scale: 0,
            size: [len, 1, 1],
            points: [len, 1, 1],
        }
    }

    /// Every integer point of an `x * y * z` grid, z varying fastest
    ///
    /// Panics if the point count overflows `usize`.
    ///
    /// ```rust
    /// use hasty_noise::{SimdLevel, VectorSet};
    ///
    /// let set = VectorSet::with_grid(SimdLevel::Sse2, 2, 2, 2);
    /// assert_eq!(set.len(), 8);
    /// assert_eq!((set.x()[5], set.y()[5], set.z()[5]), (1.0, 0.0, 1.0));
    /// ```
    pub fn with_grid(level: SimdLevel, x: usize, y: usize, z: usize) -> Self {
        let mut set = Self::new(point_count([x, y, z]), level);
        set.size = [x, y, z];
        set.points = [x, y, z];
        set.fill_lattice(1);
        set
    }

    /// Decimated lattice covering an `x * y * z` grid
    ///
    /// Points are spaced `2^scale` apart. Each extent is rounded up to a
    /// multiple of the spacing and one extra point is added per axis, so the
    /// anchors enclose the whole grid. A `scale` of zero or below gives
    /// [`with_grid`](Self::with_grid); scales above [`MAX_SAMPLE_SCALE`] are
    /// clamped.
    ///
    /// # Panics
    ///
    /// Panics if an extent rounded up to the spacing, or the resulting point
    /// count, overflows `usize`.
    pub fn with_sampling(level: SimdLevel, scale: i32, x: usize, y: usize, z: usize) -> Self {
        if scale <= 0 {
            return Self::with_grid(level, x, y, z);
        }
        let scale = scale.min(MAX_SAMPLE_SCALE);
        let spacing = 1usize << scale;
        let coarse = |extent: usize| {
            let rounded = extent
                .checked_next_multiple_of(spacing)
                .expect("sampled extent overflows usize");
            (rounded >> scale) + 1
        };
        let points = [coarse(x), coarse(y), coarse(z)];

        let mut set = Self::new(point_count(points), level);
        set.sample_scale = scale;
        set.size = [x, y, z];
        set.points = points;
        set.fill_lattice(spacing);
        set
    }

    fn fill_lattice(&mut self, spacing: usize) {
        let [px, py, pz] = self.points;
        let (xs, ys, zs) = self.axes_mut();
        let mut index = 0;
        for ix in 0..px {
            for iy in 0..py {
                for iz in 0..pz {
                    xs[index] = (ix * spacing) as f32;
                    ys[index] = (iy * spacing) as f32;
                    zs[index] = (iz * spacing) as f32;
                    index += 1;
                }
            }
        }
    }

    /// Number of points
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the set has no points
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Level the backing allocation is aligned for
    pub fn level(&self) -> SimdLevel {
        self.buffer.level()
    }

    /// Distance in floats between the starts of the coordinate arrays
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Decimation exponent, 0 for a full-resolution set
    pub fn sample_scale(&self) -> i32 {
        self.sample_scale
    }

    /// Grid extents the set was built for
    pub fn size(&self) -> [usize; 3] {
        self.size
    }

    /// Points per axis actually stored
    pub fn points(&self) -> [usize; 3] {
        self.points
    }

    /// X coordinates
    pub fn x(&self) -> &[f32] {
        &self.buffer[..self.len]
    }

    /// Y coordinates
    pub fn y(&self) -> &[f32] {
        &self.buffer[self.stride..self.stride + self.len]
    }

    /// Z coordinates
    pub fn z(&self) -> &[f32] {
        &self.buffer[self.stride * 2..self.stride * 2 + self.len]
    }

    /// Mutable views of the three coordinate arrays
    pub fn axes_mut(&mut self) -> (&mut [f32], &mut [f32], &mut [f32]) {
        let (len, stride) = (self.len, self.stride);
        let (xs, rest) = self.buffer.split_at_mut(stride);
        let (ys, zs) = rest.split_at_mut(stride);
        (&mut xs[..len], &mut ys[..len], &mut zs[..len])
    }
}
